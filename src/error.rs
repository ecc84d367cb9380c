//! Error types for the storage layer and the HTTP boundary
//!
//! Core catalog operations never fail. Errors only appear where data crosses
//! a boundary: the embedded database and incoming requests.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures while reading or writing the persisted catalog
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] redb::Error),

    #[error("database open error: {0}")]
    Open(#[from] redb::DatabaseError),

    #[error("transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("corrupt record: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Errors returned by request handlers
///
/// Each variant maps to a status code and a stable `code` string in the
/// JSON body, e.g. `{"error": "Property not found", "code": "not_found"}`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{kind} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("{0}")]
    Validation(String),

    /// Body or query string that failed to deserialize
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl AppError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        AppError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
            AppError::Rejected { status, .. } => (*status, "invalid_request"),
            AppError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
            AppError::Task(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            AppError::NotFound { kind, id } => {
                tracing::debug!(kind = *kind, id = %id, "lookup missed");
                self.to_string()
            }
            AppError::Validation(reason) => {
                tracing::debug!(%reason, "rejected payload");
                self.to_string()
            }
            AppError::Rejected { message, .. } => {
                tracing::debug!(%message, "malformed request");
                self.to_string()
            }
            // Storage details stay in the log
            AppError::Store(err) => {
                tracing::error!(error = %err, "storage failure");
                "Internal storage error".to_string()
            }
            AppError::Task(err) => {
                tracing::error!(error = %err, "persist task failed");
                "Internal error".to_string()
            }
        };

        (status, Json(json!({ "error": message, "code": code }))).into_response()
    }
}
