//! Hearing lookups.

use chrono_tz::Tz;
use sqlx::SqlitePool;

use crate::clock::CourtDay;
use crate::error::Result;
use crate::models::{CaseRecord, NewHearing};

/// Maximum number of rows returned by [`fuzzy_search`].
pub const FUZZY_SEARCH_LIMIT: i64 = 10;

/// Find hearings whose case id matches exactly.
///
/// `is_today` and `is_past` are evaluated against the current court day in `tz`.
pub async fn find_citation(pool: &SqlitePool, case_id: &str, tz: Tz) -> Result<Vec<CaseRecord>> {
    find_citation_on(pool, case_id, &CourtDay::now(tz)).await
}

/// [`find_citation`] with an explicit court day.
pub async fn find_citation_on(
    pool: &SqlitePool,
    case_id: &str,
    day: &CourtDay,
) -> Result<Vec<CaseRecord>> {
    let records = sqlx::query_as::<_, CaseRecord>(
        r#"
        SELECT
            case_id,
            defendant,
            date,
            room,
            time,
            date >= ?2 AND date < ?3 AS is_today,
            date < ?4 AS is_past
        FROM hearings
        WHERE case_id = ?1
        ORDER BY date
        "#,
    )
    .bind(case_id)
    .bind(day.start)
    .bind(day.end)
    .bind(day.now)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// Search hearings by partial defendant name or exact case id.
///
/// The query is uppercased and split on whitespace. The first token must
/// appear in the defendant name, as must the second token when present.
/// Alternatively the first token may match a case id exactly.
pub async fn fuzzy_search(pool: &SqlitePool, query: &str, tz: Tz) -> Result<Vec<CaseRecord>> {
    let normalized = query.trim().to_uppercase();
    let mut parts = normalized.split_whitespace();
    let Some(first) = parts.next() else {
        return Ok(Vec::new());
    };
    let second = parts.next();
    let day = CourtDay::now(tz);

    let records = sqlx::query_as::<_, CaseRecord>(
        r#"
        SELECT
            case_id,
            defendant,
            date,
            room,
            time,
            date >= ?5 AND date < ?6 AS is_today,
            date < ?7 AS is_past
        FROM hearings
        WHERE (
            defendant LIKE ?1 ESCAPE '\'
            AND (?2 IS NULL OR defendant LIKE ?2 ESCAPE '\')
        )
        OR case_id = ?3
        ORDER BY date
        LIMIT ?4
        "#,
    )
    .bind(like_pattern(first))
    .bind(second.map(like_pattern))
    .bind(first)
    .bind(FUZZY_SEARCH_LIMIT)
    .bind(day.start)
    .bind(day.end)
    .bind(day.now)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// Insert a hearing, or update defendant, room and time for an existing
/// (case_id, date) row.
pub async fn insert_hearing(pool: &SqlitePool, hearing: &NewHearing) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO hearings (case_id, defendant, date, room, time)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(case_id, date) DO UPDATE SET
            defendant = excluded.defendant,
            room = excluded.room,
            time = excluded.time
        "#,
    )
    .bind(&hearing.case_id)
    .bind(&hearing.defendant)
    .bind(hearing.date)
    .bind(&hearing.room)
    .bind(&hearing.time)
    .execute(pool)
    .await?;

    Ok(())
}

/// Count hearing rows. Logged at startup so an empty court feed is visible.
pub async fn count_hearings(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM hearings
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Build a `%token%` LIKE pattern with wildcards in the token escaped.
fn like_pattern(token: &str) -> String {
    let mut pattern = String::with_capacity(token.len() + 2);
    pattern.push('%');
    for c in token.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
