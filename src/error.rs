//! Error types for the store collaborator and composition, plus their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::protocol::ErrorOut;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store answered with a non-success status.
    #[error("{message}")]
    Rejected {
        status: u16,
        message: String,
        payload: Value,
    },

    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("store returned malformed rows: {0}")]
    Decode(#[from] serde_json::Error),
}

impl StoreError {
    /// Raw error payload forwarded to callers.
    pub fn details(&self) -> Value {
        match self {
            StoreError::Rejected { status, payload, .. } => {
                if payload.is_null() {
                    json!({ "status": status })
                } else {
                    payload.clone()
                }
            }
            other => Value::String(other.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("Missing grade/subject")]
    MissingFilter { grade: String, subject: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ComposeError {
    pub fn status(&self) -> StatusCode {
        match self {
            ComposeError::MissingFilter { .. } => StatusCode::BAD_REQUEST,
            ComposeError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_out(&self) -> ErrorOut {
        let error_details = match self {
            ComposeError::MissingFilter { grade, subject } => json!({ "grade": grade, "subject": subject }),
            ComposeError::Store(e) => e.details(),
        };
        ErrorOut {
            ok: false,
            error_message: self.to_string(),
            error_details,
        }
    }
}

impl IntoResponse for ComposeError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_out())).into_response()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
