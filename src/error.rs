use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid file type '{0}'. Please upload a CSV file.")]
    InvalidFileType(String),
    #[error("File too large. Please upload a file no larger than {limit} bytes.")]
    FileTooLarge { limit: usize },
    #[error("Empty CSV file")]
    EmptyFile,
    #[error("No analysis found for '{0}'")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidFileType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::EmptyFile => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_distinct_statuses() {
        assert_eq!(
            AppError::InvalidFileType("application/pdf".into()).status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            AppError::FileTooLarge { limit: 10 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(AppError::EmptyFile.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            AppError::NotFound("file_1_abc".into()).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn messages_are_user_facing() {
        let err = AppError::InvalidFileType("application/pdf".into());
        assert!(err.to_string().contains("Please upload a CSV file"));
        assert_eq!(AppError::EmptyFile.to_string(), "Empty CSV file");

        let err = AppError::FileTooLarge { limit: 10 * 1024 * 1024 };
        assert!(err.to_string().contains("10485760 bytes"));
    }
}
