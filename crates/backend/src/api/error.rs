use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::config;
use crate::shared::error::ServiceError;

pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// RFC 7807 problem object. `instance`, `traceId` and `correlationId`
/// are filled in by the problem-details middleware, which knows the
/// request context.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(rename = "traceId", skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    #[serde(rename = "correlationId", skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

/// HTTP-boundary error type. Services signal absence with
/// `None`/`false`; handlers turn that into `NotFound` here.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 404 with an empty body, matching the lookup contract.
    #[error("Resource not found.")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    UnprocessableEntity(String),

    #[error("Unauthorized.")]
    Unauthorized,

    #[error("Forbidden.")]
    Forbidden,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::NotFound => "Resource not found.",
            Self::BadRequest(_) => "Bad request.",
            Self::UnprocessableEntity(_) => "Unprocessable entity.",
            Self::Unauthorized => "Unauthorized.",
            Self::Forbidden => "Forbidden.",
            Self::Internal(_) => "An unexpected error occurred.",
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidArgument(msg) => Self::BadRequest(msg),
            e @ ServiceError::ReferenceNotFound { .. } => Self::UnprocessableEntity(e.to_string()),
            ServiceError::Db(e) => Self::Internal(anyhow::Error::new(e)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Lookup misses are an expected outcome, not a problem report
        if matches!(self, Self::NotFound) {
            return status.into_response();
        }

        let detail = match &self {
            Self::Internal(err) => {
                tracing::error!(error = %err, "unhandled error");
                if config::is_development() {
                    err.to_string()
                } else {
                    // Do not leak internals outside development
                    "Please contact support with the provided correlationId.".to_string()
                }
            }
            other => other.to_string(),
        };

        let body = ProblemDetails {
            problem_type: format!("https://httpstatuses.com/{}", status.as_u16()),
            title: self.title().to_string(),
            status: status.as_u16(),
            detail: Some(detail),
            instance: None,
            trace_id: None,
            correlation_id: None,
        };

        let mut response = (status, Json(body)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::ServiceError;

    #[test]
    fn test_invalid_argument_maps_to_400() {
        let err: ApiError = ServiceError::invalid("unitPrice cannot be negative").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("unitPrice"));
    }

    #[test]
    fn test_reference_not_found_maps_to_422() {
        let err: ApiError = ServiceError::reference("Supplier", 42).into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.to_string().contains("Supplier '42'"));
    }

    #[test]
    fn test_db_error_maps_to_500() {
        let err: ApiError = ServiceError::Db(sea_orm::DbErr::Custom("boom".into())).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_has_empty_body() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_problem_response_content_type() {
        let response = ApiError::BadRequest("nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            PROBLEM_CONTENT_TYPE
        );
    }
}
