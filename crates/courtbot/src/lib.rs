//! SMS conversation pipeline for court case lookups and reminder requests.
//!
//! This crate provides the [`Conversation`] type which turns one inbound text
//! message plus the sender's [`ConversationState`] into a reply and a new
//! state.
//!
//! # Architecture
//!
//! ```text
//! Inbound SMS (Body, From, session token)
//!          ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      CONVERSATION                           │
//! │                                                             │
//! │  1. Normalize text (first line, no emoji, uppercase)        │
//! │         ↓                                                   │
//! │  2. Run handlers in order until one claims the message:     │
//! │     • opt-out      → deactivate all requests, no reply      │
//! │     • yes / no     → store or decline the open request      │
//! │     • DELETE       → deactivate the pending request         │
//! │     • subscribed   → offer DELETE                           │
//! │     • lookup       → ask about a reminder                   │
//! │     • fallback     → "couldn't understand"                  │
//! │         ↓                                                   │
//! │  3. Return reply, action tag and the new state              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use courtbot::{Conversation, ConversationState, Messages, SqliteCaseRepository};
//! use database::{Database, PhoneKey};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("sqlite:courtbot.db?mode=rwc").await?;
//! db.migrate().await?;
//!
//! let court_tz = chrono_tz::America::Anchorage;
//! let repository = SqliteCaseRepository::new(db, PhoneKey::new("secret")?, court_tz);
//! let conversation = Conversation::new(
//!     repository,
//!     Messages::new("https://courts.example.gov", 10, court_tz),
//! );
//!
//! let turn = conversation
//!     .handle("abc12345", "+19075551234", &ConversationState::empty())
//!     .await?;
//! println!("{:?}: {:?}", turn.action, turn.reply);
//! # Ok(())
//! # }
//! ```

mod actions;
mod conversation;
mod error;
pub mod identifier;
pub mod messages;
pub mod normalize;
mod repository;
pub mod session;
pub mod twiml;

pub use actions::Action;
pub use conversation::{is_stop_word, parse_answer, Answer, Conversation, Turn, STOP_WORDS};
pub use error::ConversationError;
pub use identifier::{possible_case_id, IdentifierKind};
pub use messages::Messages;
pub use normalize::canonical_text;
pub use repository::{CaseRepository, SqliteCaseRepository};
pub use session::{ConversationState, SessionCodec, SESSION_COOKIE};
