//! Conversation state carried in a signed client-side session token.
//!
//! The token is `base64url(json) "." base64url(hmac_sha256(json))`. A missing,
//! malformed or tampered token decodes to an empty state; nothing about a
//! conversation is kept server-side.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Per-sender state for the one open question, if any.
///
/// At most one question is open at a time: either a yes/no question about
/// `case_id`, or a delete confirmation for `delete_case_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    /// Case the sender was asked to confirm a reminder for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    /// Whether `case_id` was found in the hearings table.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub known_case: bool,
    /// Case the sender may delete by replying DELETE.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_case_id: Option<String>,
}

impl ConversationState {
    /// State with no open question.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Open a yes/no reminder question, replacing any other open question.
    pub fn asking_reminder(case_id: impl Into<String>, known_case: bool) -> Self {
        Self {
            case_id: Some(case_id.into()),
            known_case,
            delete_case_id: None,
        }
    }

    /// Open a delete confirmation, replacing any other open question.
    pub fn asking_delete(case_id: impl Into<String>) -> Self {
        Self {
            case_id: None,
            known_case: false,
            delete_case_id: Some(case_id.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.case_id.is_none() && self.delete_case_id.is_none()
    }
}

/// Signs and verifies session tokens.
#[derive(Clone)]
pub struct SessionCodec {
    secret: Vec<u8>,
}

impl std::fmt::Debug for SessionCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCodec").finish_non_exhaustive()
    }
}

impl SessionCodec {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    /// Serialize and sign a state.
    pub fn encode(&self, state: &ConversationState) -> String {
        // Serializing a struct of strings and bools cannot fail.
        let payload = serde_json::to_vec(state).unwrap_or_default();
        let signature = self.sign(&payload);
        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(signature)
        )
    }

    /// Verify and deserialize a token, falling back to an empty state.
    pub fn decode(&self, token: Option<&str>) -> ConversationState {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return ConversationState::empty();
        };
        match self.verify(token) {
            Some(state) => state,
            None => {
                debug!("Ignoring invalid session token");
                ConversationState::empty()
            }
        }
    }

    fn verify(&self, token: &str) -> Option<ConversationState> {
        let (payload_b64, signature_b64) = token.split_once('.')?;
        let payload = URL_SAFE_NO_PAD.decode(payload_b64).ok()?;
        let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;

        let mut mac = self.mac()?;
        mac.update(&payload);
        mac.verify_slice(&signature).ok()?;

        serde_json::from_slice(&payload).ok()
    }

    fn sign(&self, payload: &[u8]) -> Vec<u8> {
        match self.mac() {
            Some(mut mac) => {
                mac.update(payload);
                mac.finalize().into_bytes().to_vec()
            }
            None => Vec::new(),
        }
    }

    fn mac(&self) -> Option<HmacSha256> {
        <HmacSha256 as Mac>::new_from_slice(&self.secret).ok()
    }
}
