//! Error types for the service and its startup path.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::path::PathBuf;
use thiserror::Error;

use crate::models::ErrorBody;

/// Failures while loading artifacts at startup. All of them are fatal.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("artifact not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to load model {}: {message}", .path.display())]
    Model { path: PathBuf, message: String },
}

/// Failures raised by a classifier while scoring a row.
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("inference failed: {0}")]
    Inference(String),

    #[error("model produced no output")]
    EmptyOutput,

    #[error("model output has unsupported type {0}")]
    UnsupportedOutput(String),

    #[error("model returned unknown class index {0}")]
    UnknownClass(i64),
}

/// Errors surfaced to HTTP callers.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Inference(#[from] ClassifierError),

    #[error("inference task was cancelled")]
    Cancelled,
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::Inference(_) | ServiceError::Cancelled => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
