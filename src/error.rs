use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("User has no target skills; complete the skill survey first")]
    EmptyTargetSkills,

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::EmptyTargetSkills => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Repository(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Errors raised while loading offline artifacts at startup
///
/// These never reach a caller: the loader logs them and the affected feature
/// degrades to empty results.
#[derive(thiserror::Error, Debug)]
pub enum ArtifactError {
    #[error("Artifact not found at '{0}'")]
    Missing(String),

    #[error("Failed to read artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid artifact: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_target_skills_is_bad_request() {
        let response = AppError::EmptyTargetSkills.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_status() {
        let response = AppError::NotFound("Course 7 not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_repository_error_is_internal() {
        let response = AppError::Repository("store unavailable".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
