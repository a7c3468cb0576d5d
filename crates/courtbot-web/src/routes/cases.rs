//! Case search for the public web client.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use courtbot::messages::{readable_date, Messages};
use database::{hearing, CaseRecord};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::state::AppState;

/// Query string for `/cases`.
#[derive(Debug, Deserialize)]
pub struct CaseQuery {
    pub q: Option<String>,
}

/// A hearing with a display date, so browsers don't have to format it.
#[derive(Debug, Serialize)]
pub struct CaseView {
    #[serde(flatten)]
    pub record: CaseRecord,
    #[serde(rename = "readableDate")]
    pub readable_date: String,
}

impl CaseView {
    /// Attach the hearing date as read in the court's time zone.
    pub fn new(record: CaseRecord, messages: &Messages) -> Self {
        let readable_date = readable_date(&messages.local_time(&record.hearing_date));
        Self {
            record,
            readable_date,
        }
    }
}

/// Partial name match or exact citation match.
pub async fn search_cases(
    State(state): State<AppState>,
    Query(query): Query<CaseQuery>,
) -> Result<Response> {
    let Some(q) = query.q.filter(|q| !q.trim().is_empty()) else {
        return Ok(StatusCode::BAD_REQUEST.into_response());
    };

    let messages = state.conversation.messages();
    let records = hearing::fuzzy_search(state.db().pool(), &q, messages.court_tz())
        .await
        .map_err(|err| state.error(err))?;

    let cases: Vec<CaseView> = records
        .into_iter()
        .map(|record| CaseView::new(record, messages))
        .collect();
    Ok(Json(cases).into_response())
}
