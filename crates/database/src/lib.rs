//! SQLite persistence layer for Courtbot.
//!
//! This crate provides async database operations for court hearings and
//! reminder requests using SQLx with SQLite. Phone numbers are encrypted with
//! [`PhoneKey`] before they are written or used as a lookup key.
//!
//! # Example
//!
//! ```no_run
//! use database::{hearing, request, Database, PhoneKey};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:courtbot.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Look up a citation and file a reminder request
//!     let key = PhoneKey::new("secret")?;
//!     let court_tz = chrono_tz::America::Anchorage;
//!     let cases = hearing::find_citation(db.pool(), "ABC12345", court_tz).await?;
//!     request::add_request(db.pool(), &key, "ABC12345", "+19075551234", !cases.is_empty()).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod clock;
pub mod crypto;
pub mod error;
pub mod hearing;
pub mod models;
pub mod request;

pub use clock::CourtDay;
pub use crypto::{decrypt_phone, encrypt_phone, CryptoError, PhoneKey};
pub use error::{DatabaseError, Result};
pub use models::{CaseRecord, NewHearing, SubscriptionRequest};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 10;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/courtbot.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing)
    /// let db = database::Database::connect("sqlite::memory:").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDateTime, TimeZone, Timelike, Utc};
    use chrono_tz::{Tz, UTC};

    const PHONE: &str = "+19075551234";

    async fn test_db() -> Database {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();
        db
    }

    fn test_key() -> PhoneKey {
        PhoneKey::new("test-secret").unwrap()
    }

    fn hearing(case_id: &str, defendant: &str, offset: Duration) -> NewHearing {
        NewHearing {
            case_id: case_id.to_string(),
            defendant: defendant.to_string(),
            date: Utc::now().naive_utc() + offset,
            room: "Courtroom 2A".to_string(),
            time: "09:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_citation_flags() {
        let db = test_db().await;
        hearing::insert_hearing(db.pool(), &hearing("ABC12345", "JANE DOE", Duration::days(3)))
            .await
            .unwrap();
        hearing::insert_hearing(db.pool(), &hearing("PAST1234", "JOHN ROE", Duration::days(-3)))
            .await
            .unwrap();

        let upcoming = hearing::find_citation(db.pool(), "ABC12345", UTC).await.unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].defendant, "JANE DOE");
        assert!(!upcoming[0].is_today);
        assert!(!upcoming[0].is_past);

        let past = hearing::find_citation(db.pool(), "PAST1234", UTC).await.unwrap();
        assert_eq!(past.len(), 1);
        assert!(past[0].is_past);

        let missing = hearing::find_citation(db.pool(), "NOPE1234", UTC).await.unwrap();
        assert!(missing.is_empty());
    }

    /// A zone whose local clock is nowhere near midnight right now.
    fn zone_away_from_midnight() -> Tz {
        if Utc::now().hour() < 22 {
            UTC
        } else {
            chrono_tz::Etc::GMTPlus6
        }
    }

    fn at_utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap().naive_utc()
    }

    #[tokio::test]
    async fn test_find_citation_later_today() {
        let db = test_db().await;
        hearing::insert_hearing(db.pool(), &hearing("ABC12345", "JANE DOE", Duration::seconds(60)))
            .await
            .unwrap();

        let found = hearing::find_citation(db.pool(), "ABC12345", zone_away_from_midnight())
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].is_today);
        assert!(!found[0].is_past);
    }

    #[tokio::test]
    async fn test_today_follows_court_time_zone() {
        let db = test_db().await;
        let anchorage = chrono_tz::America::Anchorage;
        // 23:30 on Oct 18 in Anchorage, already Oct 19 in UTC
        let day = CourtDay::at(anchorage, Utc.with_ymd_and_hms(2026, 10, 19, 7, 30, 0).unwrap());

        for (case_id, date) in [
            ("EARLIER1", at_utc(2026, 10, 19, 7, 0)),
            ("LATENIGHT", at_utc(2026, 10, 19, 7, 45)),
            ("NEXTMORNING", at_utc(2026, 10, 19, 16, 0)),
        ] {
            let row = NewHearing {
                case_id: case_id.to_string(),
                defendant: "JANE DOE".to_string(),
                date,
                room: "2A".to_string(),
                time: "09:00".to_string(),
            };
            hearing::insert_hearing(db.pool(), &row).await.unwrap();
        }

        let earlier = hearing::find_citation_on(db.pool(), "EARLIER1", &day).await.unwrap();
        assert!(earlier[0].is_today);
        assert!(earlier[0].is_past);

        let late_night = hearing::find_citation_on(db.pool(), "LATENIGHT", &day).await.unwrap();
        assert!(late_night[0].is_today);
        assert!(!late_night[0].is_past);

        // Same UTC date as now, but tomorrow in Anchorage
        let next_morning = hearing::find_citation_on(db.pool(), "NEXTMORNING", &day)
            .await
            .unwrap();
        assert!(!next_morning[0].is_today);
        assert!(!next_morning[0].is_past);
    }

    #[tokio::test]
    async fn test_insert_hearing_updates_existing_row() {
        let db = test_db().await;
        let mut row = hearing("ABC12345", "JANE DOE", Duration::days(3));
        hearing::insert_hearing(db.pool(), &row).await.unwrap();

        row.room = "Courtroom 5".to_string();
        hearing::insert_hearing(db.pool(), &row).await.unwrap();

        assert_eq!(hearing::count_hearings(db.pool()).await.unwrap(), 1);
        let found = hearing::find_citation(db.pool(), "ABC12345", UTC).await.unwrap();
        assert_eq!(found[0].room, "Courtroom 5");
    }

    #[tokio::test]
    async fn test_fuzzy_search() {
        let db = test_db().await;
        hearing::insert_hearing(db.pool(), &hearing("ABC12345", "JANE DOE", Duration::days(1)))
            .await
            .unwrap();
        hearing::insert_hearing(db.pool(), &hearing("XYZ98765", "JANE SMITH", Duration::days(2)))
            .await
            .unwrap();
        hearing::insert_hearing(db.pool(), &hearing("QRS55555", "BOB DOE", Duration::days(2)))
            .await
            .unwrap();

        let by_first_name = hearing::fuzzy_search(db.pool(), "jane", UTC).await.unwrap();
        assert_eq!(by_first_name.len(), 2);

        let by_full_name = hearing::fuzzy_search(db.pool(), "jane doe", UTC).await.unwrap();
        assert_eq!(by_full_name.len(), 1);
        assert_eq!(by_full_name[0].case_id, "ABC12345");

        let by_citation = hearing::fuzzy_search(db.pool(), "qrs55555", UTC).await.unwrap();
        assert_eq!(by_citation.len(), 1);
        assert_eq!(by_citation[0].defendant, "BOB DOE");

        let wildcard = hearing::fuzzy_search(db.pool(), "%", UTC).await.unwrap();
        assert!(wildcard.is_empty());

        let empty = hearing::fuzzy_search(db.pool(), "   ", UTC).await.unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_fuzzy_search_limit() {
        let db = test_db().await;
        for i in 0..15 {
            let case_id = format!("SMITH{:04}X", i);
            hearing::insert_hearing(db.pool(), &hearing(&case_id, "ALEX SMITH", Duration::days(i)))
                .await
                .unwrap();
        }

        let results = hearing::fuzzy_search(db.pool(), "smith", UTC).await.unwrap();
        assert_eq!(results.len(), hearing::FUZZY_SEARCH_LIMIT as usize);
    }

    #[tokio::test]
    async fn test_add_request_is_idempotent() {
        let db = test_db().await;
        let key = test_key();

        request::add_request(db.pool(), &key, "ABC12345", PHONE, false)
            .await
            .unwrap();
        let first = request::list_requests_for_case(db.pool(), "ABC12345")
            .await
            .unwrap();
        assert_eq!(first.len(), 1);

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        request::add_request(db.pool(), &key, "ABC12345", PHONE, false)
            .await
            .unwrap();
        let second = request::list_requests_for_case(db.pool(), "ABC12345")
            .await
            .unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].created_at, first[0].created_at);
        assert!(second[0].updated_at > first[0].updated_at);
    }

    #[tokio::test]
    async fn test_phone_is_stored_encrypted() {
        let db = test_db().await;
        let key = test_key();

        request::add_request(db.pool(), &key, "ABC12345", PHONE, true)
            .await
            .unwrap();
        let rows = request::list_requests_for_case(db.pool(), "ABC12345")
            .await
            .unwrap();
        assert_ne!(rows[0].phone, PHONE);
        assert_eq!(key.decrypt(&rows[0].phone).unwrap(), PHONE);
        assert!(rows[0].known_case);
    }

    #[tokio::test]
    async fn test_find_and_deactivate_request() {
        let db = test_db().await;
        let key = test_key();

        request::add_request(db.pool(), &key, "ABC12345", PHONE, true)
            .await
            .unwrap();
        let found = request::find_request(db.pool(), &key, "ABC12345", PHONE)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);

        let other_phone = request::find_request(db.pool(), &key, "ABC12345", "+15550000000")
            .await
            .unwrap();
        assert!(other_phone.is_empty());

        assert!(request::deactivate_request(db.pool(), &key, "ABC12345", PHONE)
            .await
            .unwrap());
        assert!(!request::deactivate_request(db.pool(), &key, "ABC12345", PHONE)
            .await
            .unwrap());

        let found = request::find_request(db.pool(), &key, "ABC12345", PHONE)
            .await
            .unwrap();
        assert!(found.is_empty());

        // Subscribing again reactivates the same row
        request::add_request(db.pool(), &key, "ABC12345", PHONE, true)
            .await
            .unwrap();
        let rows = request::list_requests_for_case(db.pool(), "ABC12345")
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].active);
    }

    #[tokio::test]
    async fn test_deactivate_requests_for_phone() {
        let db = test_db().await;
        let key = test_key();

        request::add_request(db.pool(), &key, "ABC12345", PHONE, true)
            .await
            .unwrap();
        request::add_request(db.pool(), &key, "XYZ98765", PHONE, false)
            .await
            .unwrap();
        request::add_request(db.pool(), &key, "ABC12345", "+15550000000", true)
            .await
            .unwrap();

        let mut deactivated = request::deactivate_requests_for(db.pool(), &key, PHONE)
            .await
            .unwrap();
        deactivated.sort();
        assert_eq!(deactivated, vec!["ABC12345", "XYZ98765"]);

        assert!(request::requests_for(db.pool(), &key, PHONE)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            request::requests_for(db.pool(), &key, "+15550000000")
                .await
                .unwrap(),
            vec!["ABC12345"]
        );
    }
}
