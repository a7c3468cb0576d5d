//! Case repository seam between the conversation and storage.

use async_trait::async_trait;
use chrono_tz::Tz;
use database::{hearing, request, CaseRecord, Database, PhoneKey};

use crate::error::ConversationError;

/// Storage operations the conversation needs.
///
/// Phone numbers are passed in plaintext; implementations are responsible for
/// encrypting them before storage.
#[async_trait]
pub trait CaseRepository: Send + Sync {
    /// Hearings whose case id matches exactly, flagged against the court day.
    async fn find_exact_case(&self, case_id: &str) -> Result<Vec<CaseRecord>, ConversationError>;

    /// Whether the sender has an active request for this case.
    async fn has_active_request(&self, case_id: &str, phone: &str)
        -> Result<bool, ConversationError>;

    /// Insert a request or renew an existing one.
    async fn create_or_renew_request(
        &self,
        case_id: &str,
        phone: &str,
        known_case: bool,
    ) -> Result<(), ConversationError>;

    /// Deactivate every request for the sender. Returns affected case ids.
    async fn deactivate_all(&self, phone: &str) -> Result<Vec<String>, ConversationError>;

    /// Deactivate one request for the sender.
    async fn deactivate(&self, case_id: &str, phone: &str) -> Result<(), ConversationError>;
}

/// [`CaseRepository`] backed by the SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteCaseRepository {
    db: Database,
    key: PhoneKey,
    court_tz: Tz,
}

impl SqliteCaseRepository {
    pub fn new(db: Database, key: PhoneKey, court_tz: Tz) -> Self {
        Self { db, key, court_tz }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl CaseRepository for SqliteCaseRepository {
    async fn find_exact_case(&self, case_id: &str) -> Result<Vec<CaseRecord>, ConversationError> {
        Ok(hearing::find_citation(self.db.pool(), case_id, self.court_tz).await?)
    }

    async fn has_active_request(
        &self,
        case_id: &str,
        phone: &str,
    ) -> Result<bool, ConversationError> {
        let requests = request::find_request(self.db.pool(), &self.key, case_id, phone).await?;
        Ok(!requests.is_empty())
    }

    async fn create_or_renew_request(
        &self,
        case_id: &str,
        phone: &str,
        known_case: bool,
    ) -> Result<(), ConversationError> {
        request::add_request(self.db.pool(), &self.key, case_id, phone, known_case).await?;
        Ok(())
    }

    async fn deactivate_all(&self, phone: &str) -> Result<Vec<String>, ConversationError> {
        Ok(request::deactivate_requests_for(self.db.pool(), &self.key, phone).await?)
    }

    async fn deactivate(&self, case_id: &str, phone: &str) -> Result<(), ConversationError> {
        request::deactivate_request(self.db.pool(), &self.key, case_id, phone).await?;
        Ok(())
    }
}
