//! Contact record CRUD endpoints.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{FromRequest, Path, Request, State};
use axum::http::{StatusCode, header};
use domain::{Person, PersonInput, Phonebook};
use person_store::{PersonStore, PersonStoreExt};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: PersonStore> {
    pub phonebook: Phonebook<S>,
}

type PersonJson<S> = Json<Person<<S as PersonStore>::Id>>;

/// Request body of create and update.
///
/// A request without a JSON content type or without a body carries no
/// fields, so it reaches validation as an empty payload. Only a JSON body
/// that fails to parse is rejected here.
#[derive(Debug)]
pub struct PersonPayload(pub PersonInput);

impl<T: Send + Sync> FromRequest<T> for PersonPayload {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &T) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(&req) {
            return Ok(Self(PersonInput::default()));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(PersonInput::default()));
        }

        let Json(input) = Json::<PersonInput>::from_bytes(&bytes)?;
        Ok(Self(input))
    }
}

fn has_json_content_type(req: &Request) -> bool {
    let Some(content_type) = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

/// GET /api/persons: list every record.
#[tracing::instrument(skip(state))]
pub async fn list<S: PersonStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Person<S::Id>>>, ApiError> {
    Ok(Json(state.phonebook.list().await?))
}

/// GET /api/persons/:id: load a single record.
#[tracing::instrument(skip(state))]
pub async fn get<S: PersonStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<PersonJson<S>, ApiError> {
    let id = <S as PersonStoreExt>::parse_id(&id)?;
    state
        .phonebook
        .get(&id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// POST /api/persons: validate and store a new record.
#[tracing::instrument(skip(state, payload))]
pub async fn create<S: PersonStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: PersonPayload,
) -> Result<PersonJson<S>, ApiError> {
    let person = state.phonebook.add(payload.0).await?;
    Ok(Json(person))
}

/// PUT /api/persons/:id: replace name and number of a record.
#[tracing::instrument(skip(state, payload))]
pub async fn update<S: PersonStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    payload: PersonPayload,
) -> Result<PersonJson<S>, ApiError> {
    let id = <S as PersonStoreExt>::parse_id(&id)?;
    state
        .phonebook
        .update(&id, payload.0)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// DELETE /api/persons/:id: remove a record; unknown ids still succeed.
#[tracing::instrument(skip(state))]
pub async fn delete<S: PersonStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = <S as PersonStoreExt>::parse_id(&id)?;
    state.phonebook.remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
