//! Court-local day boundaries.
//!
//! Hearing timestamps are stored as naive UTC. Whether a hearing is "today"
//! depends on the court's time zone, so the local day is converted to a UTC
//! range and bound into the query.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// The moment a lookup runs, with the UTC bounds of that moment's local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourtDay {
    /// Current instant (UTC).
    pub now: NaiveDateTime,
    /// Local midnight starting the day (UTC).
    pub start: NaiveDateTime,
    /// Local midnight ending the day (UTC, exclusive).
    pub end: NaiveDateTime,
}

impl CourtDay {
    /// The current court day in `tz`.
    pub fn now(tz: Tz) -> Self {
        Self::at(tz, Utc::now())
    }

    /// The court day in `tz` containing `now`.
    pub fn at(tz: Tz, now: DateTime<Utc>) -> Self {
        let today = now.with_timezone(&tz).date_naive();
        let tomorrow = today.succ_opt().unwrap_or(today);

        Self {
            now: now.naive_utc(),
            start: local_midnight(tz, today),
            end: local_midnight(tz, tomorrow),
        }
    }
}

/// UTC instant of local midnight on `date`.
///
/// Zones that skip midnight for DST use the offset in effect at that wall time.
fn local_midnight(tz: Tz, date: NaiveDate) -> NaiveDateTime {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight).earliest() {
        Some(local) => local.naive_utc(),
        None => {
            let offset = tz.offset_from_utc_datetime(&midnight).fix();
            midnight - Duration::seconds(i64::from(offset.local_minus_utc()))
        }
    }
}
