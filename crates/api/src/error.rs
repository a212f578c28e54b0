//! API error types with HTTP response mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{DomainError, StoreError};

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Well-formed id without a matching record. Answered with an empty body.
    NotFound,
    /// No route matches the request.
    UnknownRoute,
    /// Bad request from the client.
    BadRequest(String),
    /// Domain logic error.
    Domain(DomainError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound => {
                metrics::counter!("phonebook_api_errors_total", "status" => "404").increment(1);
                return StatusCode::NOT_FOUND.into_response();
            }
            ApiError::UnknownRoute => (StatusCode::NOT_FOUND, "unknown error".to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Domain(err) => domain_error_to_response(err),
        };

        metrics::counter!("phonebook_api_errors_total", "status" => status.as_str().to_owned())
            .increment(1);

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn domain_error_to_response(err: DomainError) -> (StatusCode, String) {
    match err {
        DomainError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        DomainError::Store(StoreError::MalformedId(_)) => {
            (StatusCode::BAD_REQUEST, "malformatted id".to_string())
        }
        DomainError::Store(err @ StoreError::DuplicateName(_)) => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        DomainError::Store(StoreError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg),
        DomainError::Store(err) => {
            tracing::error!(error = %err, "internal server error");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Domain(DomainError::Store(err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Field, ValidationError};

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn malformed_id_maps_to_400() {
        let response = ApiError::from(StoreError::MalformedId("xyz".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "malformatted id");
    }

    #[tokio::test]
    async fn missing_field_maps_to_400() {
        let err = DomainError::Validation(ValidationError::MissingField(Field::Number));
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "number missing");
    }

    #[tokio::test]
    async fn store_validation_message_is_passed_through() {
        let err = StoreError::Validation("Person validation failed".to_string());
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Person validation failed");
    }

    #[tokio::test]
    async fn exhausted_id_space_maps_to_500() {
        let err = StoreError::IdSpaceExhausted { attempts: 32 };
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn not_found_has_empty_body() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn unknown_route_body() {
        let response = ApiError::UnknownRoute.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "unknown error");
    }
}
