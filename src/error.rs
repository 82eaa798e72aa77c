use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};
use serde_json::json;
use axum::Json;

/// Failures raised by the extraction engine. Only the aggregate pass and
/// catalog compilation can fail; missing matches are never errors.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid header pattern for metric {name}: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
    #[error("row {row} column {column}: {value:?} is not an integer")]
    InvalidInteger {
        row: usize,
        column: usize,
        value: String,
    },
    #[error("row {row} has no column {column}")]
    MissingCell { row: usize, column: usize },
    #[error("row {row} column {column}: running total overflows")]
    CountOverflow { row: usize, column: usize },
    #[error("disease registry total is zero")]
    ZeroTotal,
}

#[derive(Debug)]
pub enum AppError {
    InvalidInput(String),
    Extraction(ExtractError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::Extraction(err) => write!(f, "Extraction error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Extraction(err) => Some(err),
            AppError::InvalidInput(_) => None,
        }
    }
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        AppError::Extraction(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Extraction(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
