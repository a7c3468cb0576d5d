//! Carrier webhook for inbound text messages.

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Form;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use courtbot::twiml::{messaging_response, TWIML_CONTENT_TYPE};
use courtbot::{ConversationState, SessionCodec, SESSION_COOKIE};
use serde::Deserialize;
use tracing::info;

use crate::error::Result;
use crate::state::AppState;

/// Form fields posted by the SMS gateway.
#[derive(Debug, Deserialize)]
pub struct InboundSms {
    /// Message text.
    #[serde(rename = "Body", default)]
    pub body: String,
    /// Sender phone number.
    #[serde(rename = "From", default)]
    pub from: String,
}

/// Handle one inbound text message.
pub async fn sms_webhook(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(sms): Form<InboundSms>,
) -> Result<(CookieJar, Response)> {
    let session = state
        .sessions
        .decode(jar.get(SESSION_COOKIE).map(Cookie::value));

    let turn = state
        .conversation
        .handle(&sms.body, &sms.from, &session)
        .await
        .map_err(|err| state.error(err))?;

    info!(action = %turn.action, "Handled inbound SMS");

    let response = match &turn.reply {
        Some(text) => (
            [(CONTENT_TYPE, TWIML_CONTENT_TYPE)],
            messaging_response(&[text]),
        )
            .into_response(),
        None => StatusCode::OK.into_response(),
    };

    Ok((store_session(jar, &state.sessions, &turn.state), response))
}

/// Store the new state in the session cookie, or expire the cookie when the
/// state was cleared. Nothing is sent for an empty state without a cookie.
fn store_session(jar: CookieJar, sessions: &SessionCodec, state: &ConversationState) -> CookieJar {
    if state.is_empty() {
        return jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    }

    jar.add(
        Cookie::build((SESSION_COOKIE, sessions.encode(state)))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}
