//! HTTP error mapping

use crate::respond;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde_json::Value;
use strive_core::ValidationError;
use thiserror::Error;

/// Errors a handler can surface to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// One or more fields failed validation.
    #[error("validation failed")]
    Validation(Vec<ValidationError>),

    /// Body was not a JSON document of the expected shape.
    #[error("malformed request body")]
    MalformedBody,

    /// No route matches the request path.
    #[error("not found")]
    RouteNotFound,

    /// The route exists but not for this method.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Storage failure or missing record.
    #[error(transparent)]
    Store(#[from] strive_db::Error),
}

impl ApiError {
    /// Render the error as the response the client sees.
    pub fn into_response(self) -> Response<Full<Bytes>> {
        match self {
            ApiError::Validation(errors) => {
                let mut fields = serde_json::Map::new();
                for ValidationError { field, message } in errors {
                    // first violation per field wins
                    fields.entry(field).or_insert_with(|| Value::String(message));
                }
                respond::json(
                    StatusCode::BAD_REQUEST,
                    &serde_json::json!({ "errors": fields }),
                )
            }
            ApiError::MalformedBody => {
                respond::error(StatusCode::BAD_REQUEST, "malformed request body")
            }
            ApiError::RouteNotFound => respond::error(StatusCode::NOT_FOUND, "not found"),
            ApiError::MethodNotAllowed => {
                respond::error(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
            }
            ApiError::Store(strive_db::Error::NotFound(what)) => {
                respond::error(StatusCode::NOT_FOUND, &format!("{what} not found"))
            }
            ApiError::Store(strive_db::Error::Database(e)) => {
                tracing::warn!("database failure: {e}");
                respond::error(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_body_shape() {
        let err = ApiError::Validation(vec![
            ValidationError::new("username", "This field is required."),
            ValidationError::new("username", "shadowed"),
            ValidationError::new("email", "Enter a valid email address."),
        ]);
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_status() {
        let err = ApiError::Store(strive_db::Error::not_found("Team"));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
