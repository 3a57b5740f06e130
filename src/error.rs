use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::inquiry::ValidationError;
use crate::mailer::DispatchError;

/// Errors surfaced to the submitting user. All are terminal for the current
/// submission and reported in the same response cycle; none are retried.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("email could not be sent: {0}")]
    Dispatch(#[from] DispatchError),

    /// Request reached the submission endpoint with the wrong method.
    #[error("invalid request")]
    InvalidRequest,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!(
                    "Please fill all required fields. Missing: {}.",
                    e.missing.join(", ")
                ),
            ),
            AppError::Dispatch(e) => (
                StatusCode::BAD_GATEWAY,
                format!("Email could not be sent. Mailer error: {e}"),
            ),
            AppError::InvalidRequest => {
                (StatusCode::METHOD_NOT_ALLOWED, "Invalid request.".to_string())
            }
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_unprocessable_entity() {
        let err = AppError::Validation(ValidationError {
            missing: vec!["name", "date"],
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn dispatch_maps_to_bad_gateway() {
        let err = AppError::Dispatch(DispatchError("connection refused".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn invalid_request_maps_to_method_not_allowed() {
        let response = AppError::InvalidRequest.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
