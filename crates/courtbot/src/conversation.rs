//! The inbound SMS handler chain.
//!
//! Handlers run in a fixed order and the first one that claims the message
//! produces the turn:
//!
//! 1. opt-out (STOP and friends)
//! 2. yes/no answer to an open reminder question
//! 3. DELETE confirmation for an existing request
//! 4. identifier the sender already has a request for
//! 5. identifier lookup
//! 6. fallback
//!
//! The conversation state is an immutable snapshot: each turn reads the
//! incoming state and returns the state to hand back to the sender.

use tracing::{debug, info};

use crate::actions::Action;
use crate::error::ConversationError;
use crate::identifier::possible_case_id;
use crate::messages::Messages;
use crate::normalize::canonical_text;
use crate::repository::CaseRepository;
use crate::session::ConversationState;

/// Carrier opt-out keywords.
pub const STOP_WORDS: [&str; 6] = ["STOP", "STOPALL", "UNSUBSCRIBE", "CANCEL", "END", "QUIT"];

const YES_WORDS: [&str; 4] = ["YES", "YEA", "YUP", "Y"];
const NO_WORDS: [&str; 2] = ["NO", "N"];
const DELETE_WORD: &str = "DELETE";

/// Result of one handled message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// State to return to the sender.
    pub state: ConversationState,
    /// Reply text. `None` means respond with an empty body.
    pub reply: Option<String>,
    /// What happened, for logging.
    pub action: Action,
}

impl Turn {
    fn reply(state: ConversationState, text: String, action: Action) -> Self {
        Self {
            state,
            reply: Some(text),
            action,
        }
    }
}

/// A handler either produces a turn or passes (`None`).
type Step = Result<Option<Turn>, ConversationError>;

/// Answer to an open yes/no question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

/// Parse a yes/no answer, ignoring case.
pub fn parse_answer(text: &str) -> Option<Answer> {
    if YES_WORDS.iter().any(|w| w.eq_ignore_ascii_case(text)) {
        Some(Answer::Yes)
    } else if NO_WORDS.iter().any(|w| w.eq_ignore_ascii_case(text)) {
        Some(Answer::No)
    } else {
        None
    }
}

/// True for carrier opt-out keywords, ignoring case.
pub fn is_stop_word(text: &str) -> bool {
    STOP_WORDS.iter().any(|w| w.eq_ignore_ascii_case(text))
}

/// Runs the handler chain against a [`CaseRepository`].
pub struct Conversation<R: CaseRepository> {
    repository: R,
    messages: Messages,
}

impl<R: CaseRepository> Conversation<R> {
    pub fn new(repository: R, messages: Messages) -> Self {
        Self {
            repository,
            messages,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Normalize a raw message body and run the chain.
    pub async fn handle(
        &self,
        body: &str,
        phone: &str,
        state: &ConversationState,
    ) -> Result<Turn, ConversationError> {
        let text = canonical_text(body);
        self.respond(&text, phone, state).await
    }

    /// Run the chain on already-canonical text.
    pub async fn respond(
        &self,
        text: &str,
        phone: &str,
        state: &ConversationState,
    ) -> Result<Turn, ConversationError> {
        if let Some(turn) = self.opt_out(text, phone).await? {
            return Ok(turn);
        }
        if let Some(turn) = self.yes_no(text, phone, state).await? {
            return Ok(turn);
        }
        if let Some(turn) = self.delete_confirmation(text, phone, state).await? {
            return Ok(turn);
        }
        if let Some(turn) = self.already_subscribed(text, phone).await? {
            return Ok(turn);
        }
        if let Some(turn) = self.case_lookup(text).await? {
            return Ok(turn);
        }
        Ok(self.fallback(state))
    }

    /// Opt-out keywords deactivate everything and get no reply; the carrier
    /// drops any message sent after a STOP.
    async fn opt_out(&self, text: &str, phone: &str) -> Step {
        if !is_stop_word(text) {
            return Ok(None);
        }

        let case_ids = self.repository.deactivate_all(phone).await?;
        info!(count = case_ids.len(), "Sender opted out; requests deactivated");

        Ok(Some(Turn {
            state: ConversationState::empty(),
            reply: None,
            action: Action::Stop,
        }))
    }

    /// Resolve an open reminder question.
    async fn yes_no(&self, text: &str, phone: &str, state: &ConversationState) -> Step {
        let Some(case_id) = state.case_id.as_deref() else {
            return Ok(None);
        };
        let Some(answer) = parse_answer(text) else {
            return Ok(None);
        };

        let known_case = state.known_case;
        let turn = match answer {
            Answer::Yes => {
                self.repository
                    .create_or_renew_request(case_id, phone, known_case)
                    .await?;
                if known_case {
                    Turn::reply(
                        ConversationState::empty(),
                        self.messages.we_will_remind_you(),
                        Action::ScheduleReminder,
                    )
                } else {
                    Turn::reply(
                        ConversationState::empty(),
                        self.messages.we_will_keep_looking(),
                        Action::ScheduleUnmatched,
                    )
                }
            }
            Answer::No => {
                let text = if known_case {
                    self.messages.replied_no()
                } else {
                    self.messages.replied_no_to_keep_checking()
                };
                Turn::reply(ConversationState::empty(), text, Action::DeclineReminder)
            }
        };

        debug!(case_id, action = %turn.action, "Resolved reminder question");
        Ok(Some(turn))
    }

    async fn delete_confirmation(
        &self,
        text: &str,
        phone: &str,
        state: &ConversationState,
    ) -> Step {
        let Some(case_id) = state.delete_case_id.as_deref() else {
            return Ok(None);
        };
        if text != DELETE_WORD {
            return Ok(None);
        }

        self.repository.deactivate(case_id, phone).await?;
        debug!(case_id, "Request deleted");

        Ok(Some(Turn::reply(
            ConversationState::empty(),
            self.messages.we_will_stop_sending(case_id),
            Action::DeleteRequest,
        )))
    }

    async fn already_subscribed(&self, text: &str, phone: &str) -> Step {
        if !possible_case_id(text) {
            return Ok(None);
        }
        if !self.repository.has_active_request(text, phone).await? {
            return Ok(None);
        }

        Ok(Some(Turn::reply(
            ConversationState::asking_delete(text),
            self.messages.already_subscribed(text),
            Action::AlreadySubscribed,
        )))
    }

    async fn case_lookup(&self, text: &str) -> Step {
        if !possible_case_id(text) {
            return Ok(None);
        }

        let cases = self.repository.find_exact_case(text).await?;
        let turn = match cases.first() {
            None => Turn::reply(
                ConversationState::asking_reminder(text, false),
                self.messages.not_found_ask_to_keep_looking(),
                Action::UnmatchedCase,
            ),
            Some(case) => Turn::reply(
                ConversationState::asking_reminder(text, true),
                self.messages.found_it_ask_for_reminder(case),
                Action::FoundCase,
            ),
        };

        debug!(case_id = text, matches = cases.len(), "Looked up case");
        Ok(Some(turn))
    }

    /// Nothing matched. The open question, if any, stays open.
    fn fallback(&self, state: &ConversationState) -> Turn {
        Turn::reply(
            state.clone(),
            self.messages.invalid_case_number(),
            Action::UnusableInput,
        )
    }
}
