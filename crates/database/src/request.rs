//! Reminder request CRUD operations.
//!
//! Every function takes the plaintext phone number and encrypts it with the
//! given [`PhoneKey`] before it touches SQL.

use sqlx::SqlitePool;
use tracing::debug;

use crate::crypto::PhoneKey;
use crate::error::Result;
use crate::models::SubscriptionRequest;

/// Add a reminder request, or renew it if the (case_id, phone) pair exists.
///
/// Renewing only touches `updated_at` (and reactivates the row), which
/// restarts the clock on unmatched requests.
pub async fn add_request(
    pool: &SqlitePool,
    key: &PhoneKey,
    case_id: &str,
    phone: &str,
    known_case: bool,
) -> Result<()> {
    let encrypted = key.encrypt(phone)?;

    sqlx::query(
        r#"
        INSERT INTO requests (case_id, phone, known_case)
        VALUES (?, ?, ?)
        ON CONFLICT(case_id, phone) DO UPDATE SET
            active = 1,
            updated_at = strftime('%Y-%m-%d %H:%M:%f', 'now')
        "#,
    )
    .bind(case_id)
    .bind(&encrypted)
    .bind(known_case)
    .execute(pool)
    .await?;

    debug!(case_id, known_case, "Request stored");
    Ok(())
}

/// Find active requests for a case id and phone.
pub async fn find_request(
    pool: &SqlitePool,
    key: &PhoneKey,
    case_id: &str,
    phone: &str,
) -> Result<Vec<SubscriptionRequest>> {
    let encrypted = key.encrypt(phone)?;

    let requests = sqlx::query_as::<_, SubscriptionRequest>(
        r#"
        SELECT case_id, phone, known_case, active, created_at, updated_at
        FROM requests
        WHERE case_id = ? AND phone = ? AND active = 1
        "#,
    )
    .bind(case_id)
    .bind(&encrypted)
    .fetch_all(pool)
    .await?;

    Ok(requests)
}

/// Case ids with an active request from this phone.
pub async fn requests_for(pool: &SqlitePool, key: &PhoneKey, phone: &str) -> Result<Vec<String>> {
    let encrypted = key.encrypt(phone)?;

    let case_ids = sqlx::query_scalar::<_, String>(
        r#"
        SELECT case_id
        FROM requests
        WHERE phone = ? AND active = 1
        ORDER BY case_id
        "#,
    )
    .bind(&encrypted)
    .fetch_all(pool)
    .await?;

    Ok(case_ids)
}

/// Deactivate every active request for a phone.
///
/// Returns the case ids that were deactivated.
pub async fn deactivate_requests_for(
    pool: &SqlitePool,
    key: &PhoneKey,
    phone: &str,
) -> Result<Vec<String>> {
    let encrypted = key.encrypt(phone)?;

    let case_ids = sqlx::query_scalar::<_, String>(
        r#"
        UPDATE requests
        SET active = 0, updated_at = strftime('%Y-%m-%d %H:%M:%f', 'now')
        WHERE phone = ? AND active = 1
        RETURNING case_id
        "#,
    )
    .bind(&encrypted)
    .fetch_all(pool)
    .await?;

    debug!(count = case_ids.len(), "Requests deactivated for phone");
    Ok(case_ids)
}

/// Deactivate the request for one case id and phone.
///
/// Returns `true` if an active request was found.
pub async fn deactivate_request(
    pool: &SqlitePool,
    key: &PhoneKey,
    case_id: &str,
    phone: &str,
) -> Result<bool> {
    let encrypted = key.encrypt(phone)?;

    let result = sqlx::query(
        r#"
        UPDATE requests
        SET active = 0, updated_at = strftime('%Y-%m-%d %H:%M:%f', 'now')
        WHERE case_id = ? AND phone = ? AND active = 1
        "#,
    )
    .bind(case_id)
    .bind(&encrypted)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// List every request row for a case id, active or not.
///
/// Used by the reminder sender and operator tooling when a hearing changes.
/// Phones are returned encrypted; decrypt with the same [`PhoneKey`].
pub async fn list_requests_for_case(
    pool: &SqlitePool,
    case_id: &str,
) -> Result<Vec<SubscriptionRequest>> {
    let requests = sqlx::query_as::<_, SubscriptionRequest>(
        r#"
        SELECT case_id, phone, known_case, active, created_at, updated_at
        FROM requests
        WHERE case_id = ?
        ORDER BY created_at
        "#,
    )
    .bind(case_id)
    .fetch_all(pool)
    .await?;

    Ok(requests)
}
