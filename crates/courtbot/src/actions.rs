//! Outcome tags for a conversation turn.

use serde::Serialize;

/// What a turn did, recorded in request logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Sender opted out of all messages.
    Stop,
    /// Reminder request stored for a known case.
    ScheduleReminder,
    /// Request stored for a case not yet in the hearings table.
    ScheduleUnmatched,
    /// Sender declined the offered reminder.
    DeclineReminder,
    /// Sender confirmed DELETE for an existing request.
    DeleteRequest,
    /// Sender texted a case they already have a request for.
    AlreadySubscribed,
    /// Identifier not found; asked whether to keep looking.
    UnmatchedCase,
    /// Identifier found; asked whether to send a reminder.
    FoundCase,
    /// Nothing understood the message.
    UnusableInput,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::ScheduleReminder => "schedule_reminder",
            Self::ScheduleUnmatched => "schedule_unmatched",
            Self::DeclineReminder => "decline_reminder",
            Self::DeleteRequest => "delete_request",
            Self::AlreadySubscribed => "already_subscribed",
            Self::UnmatchedCase => "unmatched_case",
            Self::FoundCase => "found_case",
            Self::UnusableInput => "unusable_input",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
