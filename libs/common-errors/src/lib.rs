use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// JSON body of every failure response. `issues` is only present on
/// validation failures.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<FieldIssue>>,
}

/// One violated rule on one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldIssue {
    pub field: String,
    pub rule: String,
    pub message: String,
}

/// The three failure kinds every request-handling error collapses into.
/// Matched exhaustively in `IntoResponse`, which is the single place
/// producing client-visible error bodies.
#[derive(Debug)]
pub enum AppError {
    /// Business-rule violation carrying an explicit HTTP status.
    Domain {
        status: StatusCode,
        message: String,
    },
    /// Malformed or out-of-range input. Always 400.
    Validation { issues: Vec<FieldIssue> },
    /// Anything else. Always 500, message passed through verbatim.
    Unexpected { message: String },
}

impl AppError {
    pub fn domain(status: StatusCode, message: &str) -> Self {
        Self::Domain {
            status,
            message: message.to_string(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::domain(StatusCode::NOT_FOUND, message)
    }

    /// Single-issue validation error, used for path/query parameters that
    /// never go through a derived schema.
    pub fn invalid_param(field: &str, rule: &str, message: &str) -> Self {
        Self::Validation {
            issues: vec![FieldIssue {
                field: field.to_string(),
                rule: rule.to_string(),
                message: message.to_string(),
            }],
        }
    }

    pub fn unexpected(message: &str) -> Self {
        Self::Unexpected {
            message: message.to_string(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Domain { status, .. } => *status,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn to_response_data(self) -> ApiErrorResponse {
        match self {
            Self::Domain { message, .. } => {
                ApiErrorResponse {
                    message,
                    issues: None,
                }
            }
            Self::Validation { issues } => {
                ApiErrorResponse {
                    message: "validation error".to_string(),
                    issues: Some(issues),
                }
            }
            Self::Unexpected { message } => {
                ApiErrorResponse {
                    message,
                    issues: None,
                }
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain { message, .. } => write!(f, "{}", message),
            Self::Validation { .. } => write!(f, "validation error"),
            Self::Unexpected { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let response_data = self.to_response_data();
        (status, Json(response_data)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut issues = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                issues.push(FieldIssue {
                    field: field.to_string(),
                    rule: error.code.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid")),
                });
            }
        }
        // field_errors() iterates a HashMap; order the report for stable
        // client output
        issues.sort_by(|a, b| a.field.cmp(&b.field));
        Self::Validation { issues }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(&format!("An unexpected error occurred: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::Value;

    use super::*;

    async fn response_parts(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn domain_error_uses_carried_status_and_message() {
        let err = AppError::not_found("product not found");
        let (status, body) = response_parts(err).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "product not found");
        assert!(body.get("issues").is_none());
    }

    #[tokio::test]
    async fn validation_error_is_400_with_issue_list() {
        let err = AppError::invalid_param("id", "number", "id must be a number");
        let (status, body) = response_parts(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "validation error");
        assert_eq!(body["issues"][0]["field"], "id");
        assert_eq!(body["issues"][0]["message"], "id must be a number");
    }

    #[tokio::test]
    async fn unexpected_error_is_500_with_verbatim_message() {
        let err = AppError::unexpected("connection refused");
        let (status, body) = response_parts(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "connection refused");
        assert!(body.get("issues").is_none());
    }

    #[tokio::test]
    async fn domain_error_never_reports_as_validation() {
        let err = AppError::domain(StatusCode::NOT_FOUND, "product not found");
        let (_, body) = response_parts(err).await;

        assert_ne!(body["message"], "validation error");
    }

    #[test]
    fn validation_errors_collect_every_field() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 6))]
            name: String,
            #[validate(range(exclusive_min = 0.0))]
            price: f64,
        }

        let probe = Probe {
            name: "short".to_string(),
            price: 0.0,
        };
        let err: AppError = probe.validate().unwrap_err().into();

        match err {
            AppError::Validation { issues } => {
                let fields: Vec<&str> =
                    issues.iter().map(|i| i.field.as_str()).collect();
                assert_eq!(fields, vec!["name", "price"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
