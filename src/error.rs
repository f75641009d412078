use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::blog::repository::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            AppError::Repository(e) => {
                tracing::error!("Repository error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Template(e) => {
                tracing::error!("Template render error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn response_status(err: AppError) -> StatusCode {
        let response = err.into_response();
        response.status()
    }

    #[test]
    fn not_found_returns_404() {
        assert_eq!(response_status(AppError::NotFound), StatusCode::NOT_FOUND);
    }

    #[test]
    fn repository_failure_returns_500() {
        let err = RepositoryError::Sql(rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(
            response_status(AppError::from(err)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn template_failure_returns_500() {
        let err = askama::Error::Custom("boom".into());
        assert_eq!(
            response_status(AppError::from(err)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
