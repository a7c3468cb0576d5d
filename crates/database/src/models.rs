//! Database models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A scheduled court hearing as returned by lookups.
///
/// `is_today` and `is_past` are computed by the query, not stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct CaseRecord {
    /// Citation or case number (e.g., "ABC12345", "1AB-2345678901")
    pub case_id: String,
    /// Defendant name as provided by the court feed
    pub defendant: String,
    /// Hearing date and time (UTC)
    #[sqlx(rename = "date")]
    #[serde(rename = "date")]
    pub hearing_date: NaiveDateTime,
    /// Courtroom
    pub room: String,
    /// Hearing time as provided by the court feed
    pub time: String,
    /// Hearing falls on the current court-local calendar day.
    pub is_today: bool,
    /// Hearing timestamp is before now.
    pub is_past: bool,
}

/// A hearing row to be written by a loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHearing {
    pub case_id: String,
    pub defendant: String,
    pub date: NaiveDateTime,
    pub room: String,
    pub time: String,
}

/// A reminder request for a case, keyed by (case_id, encrypted phone).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SubscriptionRequest {
    /// Case the sender asked about.
    pub case_id: String,
    /// Encrypted phone number (hex).
    pub phone: String,
    /// Whether the case was in the hearings table when the request was made.
    pub known_case: bool,
    /// Cleared on DELETE or opt-out.
    pub active: bool,
    /// Creation timestamp.
    pub created_at: String,
    /// Last renewal timestamp.
    pub updated_at: String,
}
