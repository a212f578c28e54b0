//! Phonebook summary page.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use chrono::{DateTime, Utc};
use person_store::PersonStore;

use crate::error::ApiError;
use crate::routes::persons::AppState;

const TIMESTAMP_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT+0000 (Coordinated Universal Time)";

/// GET /info: record count and current server time.
#[tracing::instrument(skip(state))]
pub async fn get<S: PersonStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Html<String>, ApiError> {
    let count = state.phonebook.count().await?;
    Ok(Html(render(count, Utc::now())))
}

/// Renders the two-line summary body.
pub fn render(count: usize, now: DateTime<Utc>) -> String {
    [
        format!("<p>Phonebook has info for {count} people</p>"),
        format!("<p>{}</p>", now.format(TIMESTAMP_FORMAT)),
    ]
    .join("\n")
}
