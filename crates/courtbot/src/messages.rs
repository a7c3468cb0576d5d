//! Catalog of outbound message templates.

use chrono::{Datelike, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use database::CaseRecord;

/// Greeting served at the root route.
pub const I_AM_COURTBOT: &str =
    "Hello, I am Courtbot. I have a heart of justice and a knowledge of court cases.";

/// Renders the fixed set of replies the bot can send.
///
/// Several templates point the sender at the public court website and the
/// unmatched-case retention window, so both are held here. Hearing times are
/// shown in the court's time zone.
#[derive(Debug, Clone)]
pub struct Messages {
    court_public_url: String,
    queue_ttl_days: u32,
    court_tz: Tz,
}

impl Messages {
    pub fn new(court_public_url: impl Into<String>, queue_ttl_days: u32, court_tz: Tz) -> Self {
        Self {
            court_public_url: court_public_url.into(),
            queue_ttl_days,
            court_tz,
        }
    }

    pub fn court_tz(&self) -> Tz {
        self.court_tz
    }

    /// Court wall-clock time for a stored UTC timestamp.
    pub fn local_time(&self, utc: &NaiveDateTime) -> NaiveDateTime {
        self.court_tz.from_utc_datetime(utc).naive_local()
    }

    /// Reply when no handler understood the message.
    pub fn invalid_case_number(&self) -> String {
        "Sorry, I couldn't understand that. Please text a citation number \
         (a letter followed by 7 to 16 letters or numbers) or a 14 character \
         case number such as 1KE-19-01234CR."
            .to_string()
    }

    /// Identifier looks valid but no hearing exists yet.
    pub fn not_found_ask_to_keep_looking(&self) -> String {
        format!(
            "Could not find a case with that number. It can take several days for a case \
             to appear in our system. Would you like us to keep checking for the next {} \
             days and text you if we find it? (reply YES or NO)",
            self.queue_ttl_days
        )
    }

    /// A hearing was found; offer a courtesy reminder.
    pub fn found_it_ask_for_reminder(&self, case: &CaseRecord) -> String {
        let local = self.local_time(&case.hearing_date);
        let when = if case.is_today {
            format!("today at {}", clock_time(&local))
        } else {
            format!("on {} at {}", short_date(&local), clock_time(&local))
        };
        format!(
            "Found a case for {} scheduled {}, in courtroom {}. Would you like a courtesy \
             reminder the day before? (reply YES or NO)",
            cleanup_name(&case.defendant),
            when,
            case.room
        )
    }

    pub fn we_will_remind_you(&self) -> String {
        format!(
            "Sounds good. We will attempt to text you a courtesy reminder the day before your \
             hearing. Note that court schedules frequently change. You should always confirm \
             your hearing date and time by going to {}",
            self.court_public_url
        )
    }

    pub fn we_will_keep_looking(&self) -> String {
        format!(
            "OK. We will keep checking for up to {} days. You can always go to {} for more \
             information about your case and contact information.",
            self.queue_ttl_days, self.court_public_url
        )
    }

    pub fn replied_no(&self) -> String {
        format!(
            "OK. You can always go to {} for more information about your case and contact \
             information.",
            self.court_public_url
        )
    }

    pub fn replied_no_to_keep_checking(&self) -> String {
        format!(
            "You said no so we won't keep checking. You can always go to {} for more \
             information about your case and contact information.",
            self.court_public_url
        )
    }

    /// Sender already has an active request for this case.
    pub fn already_subscribed(&self, case_id: &str) -> String {
        format!(
            "You are already scheduled to receive reminders for case {}. To stop receiving \
             reminders for this case text DELETE. You can go to {} for more information.",
            case_id, self.court_public_url
        )
    }

    pub fn we_will_stop_sending(&self, case_id: &str) -> String {
        format!(
            "OK. We will stop sending reminders for case {}. If you want to resume reminders \
             you can text this case number to us again. You can go to {} for more information.",
            case_id, self.court_public_url
        )
    }
}

/// Change "JOHN Q PUBLIC" to "John Q Public".
pub fn cleanup_name(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// "Monday, Oct 19th"
pub fn readable_date(date: &NaiveDateTime) -> String {
    format!(
        "{}{}",
        date.format("%A, %b %-d"),
        ordinal_suffix(date.day())
    )
}

/// "Mon, Oct 19th"
pub fn short_date(date: &NaiveDateTime) -> String {
    format!("{}{}", date.format("%a, %b %-d"), ordinal_suffix(date.day()))
}

/// "9:05 AM"
pub fn clock_time(date: &NaiveDateTime) -> String {
    date.format("%-I:%M %p").to_string()
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn case(is_today: bool) -> CaseRecord {
        CaseRecord {
            case_id: "ABC12345".to_string(),
            defendant: "JANE Q DOE".to_string(),
            hearing_date: date(2026, 10, 19, 13, 30),
            room: "2A".to_string(),
            time: "13:30".to_string(),
            is_today,
            is_past: false,
        }
    }

    #[test]
    fn test_cleanup_name() {
        assert_eq!(cleanup_name("  JANE Q   DOE "), "Jane Q Doe");
        assert_eq!(cleanup_name("o'BRIEN"), "O'brien");
        assert_eq!(cleanup_name(""), "");
    }

    #[test]
    fn test_ordinals() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(4), "th");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(13), "th");
        assert_eq!(ordinal_suffix(21), "st");
        assert_eq!(ordinal_suffix(22), "nd");
        assert_eq!(ordinal_suffix(31), "st");
    }

    #[test]
    fn test_date_formats() {
        let d = date(2026, 10, 19, 9, 5);
        assert_eq!(readable_date(&d), "Monday, Oct 19th");
        assert_eq!(short_date(&d), "Mon, Oct 19th");
        assert_eq!(clock_time(&d), "9:05 AM");
    }

    #[test]
    fn test_found_it_includes_name_date_and_room() {
        let messages = Messages::new("https://courts.example.gov", 10, chrono_tz::UTC);
        let text = messages.found_it_ask_for_reminder(&case(false));
        assert!(text.contains("Jane Q Doe"));
        assert!(text.contains("Mon, Oct 19th at 1:30 PM"));
        assert!(text.contains("courtroom 2A"));
        assert!(text.contains("(reply YES or NO)"));
    }

    #[test]
    fn test_found_it_today() {
        let messages = Messages::new("https://courts.example.gov", 10, chrono_tz::UTC);
        let text = messages.found_it_ask_for_reminder(&case(true));
        assert!(text.contains("scheduled today at 1:30 PM"));
    }

    #[test]
    fn test_found_it_uses_court_time_zone() {
        let messages = Messages::new("https://courts.example.gov", 10, chrono_tz::America::Anchorage);
        let mut record = case(false);
        // 09:00 AKDT
        record.hearing_date = date(2026, 10, 19, 17, 0);
        let text = messages.found_it_ask_for_reminder(&record);
        assert!(text.contains("on Mon, Oct 19th at 9:00 AM"), "{text}");
    }

    #[test]
    fn test_local_date_can_fall_on_previous_day() {
        let messages = Messages::new("https://courts.example.gov", 10, chrono_tz::America::Anchorage);
        // 02:00 UTC on the 20th is 6 PM on the 19th in Anchorage
        let local = messages.local_time(&date(2026, 10, 20, 2, 0));
        assert_eq!(short_date(&local), "Mon, Oct 19th");
        assert_eq!(clock_time(&local), "6:00 PM");
    }

    #[test]
    fn test_templates_use_configuration() {
        let messages = Messages::new("https://courts.example.gov", 14, chrono_tz::UTC);
        assert!(messages.not_found_ask_to_keep_looking().contains("next 14 days"));
        assert!(messages.we_will_keep_looking().contains("up to 14 days"));
        assert!(messages.replied_no().contains("https://courts.example.gov"));
        assert!(messages.already_subscribed("ABC12345").contains("DELETE"));
        assert!(messages.we_will_stop_sending("ABC12345").contains("ABC12345"));
    }
}
