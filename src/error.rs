use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Not enough context to generate a quiz. Provide a longer topic or a text-based PDF.")]
    InsufficientContext,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("AI response could not be parsed: {0}")]
    MalformedAiResponse(String),

    #[error("Upstream AI service error: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            Error::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            err @ Error::InsufficientContext => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::MalformedAiResponse(detail) => {
                // raw AI output stays in the logs, never in the response
                tracing::error!(detail = %detail, "Malformed AI response");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate quiz questions from the AI response".to_string(),
                )
            }
            Error::Upstream(msg) => {
                tracing::error!(error = %msg, "Upstream AI failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AI service request failed".to_string(),
                )
            }
            Error::Database(err) => {
                tracing::error!(error = %err, "Database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage unavailable".to_string(),
                )
            }
            Error::Reqwest(err) => {
                tracing::error!(error = %err, "Upstream request failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AI service request failed".to_string(),
                )
            }
            Error::Multipart(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Json(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            Error::Io(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            Error::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred".to_string(),
            ),
        };

        let body = Json(json!({ "message": message }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            other => Error::Database(other),
        }
    }
}
