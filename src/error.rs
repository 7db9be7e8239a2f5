use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::SqlErr;
use thiserror::Error;

use crate::response::MessageResponse;

pub const SERVER_ERROR_MESSAGE: &str = "Terjadi kesalahan server";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error: {0}")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal Server Error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Constraint violations the store reports back to us.
enum Violation {
    Unique,
    ForeignKey,
    Check,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::Unauthorized(message.into())
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self.violation(), Some(Violation::Unique))
    }

    fn violation(&self) -> Option<Violation> {
        match self {
            AppError::DbError(err) => {
                let db_err = err.as_database_error()?;
                if db_err.is_unique_violation() {
                    Some(Violation::Unique)
                } else if db_err.is_foreign_key_violation() {
                    Some(Violation::ForeignKey)
                } else if db_err.is_check_violation() {
                    Some(Violation::Check)
                } else {
                    None
                }
            }
            AppError::OrmError(err) => match err.sql_err()? {
                SqlErr::UniqueConstraintViolation(_) => Some(Violation::Unique),
                SqlErr::ForeignKeyConstraintViolation(_) => Some(Violation::ForeignKey),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::DbError(_) | AppError::OrmError(_) => match self.violation() {
                Some(Violation::Unique) => (StatusCode::BAD_REQUEST, "Data sudah terdaftar".into()),
                Some(Violation::ForeignKey) => (
                    StatusCode::BAD_REQUEST,
                    "Data referensi tidak ditemukan".into(),
                ),
                Some(Violation::Check) => (StatusCode::BAD_REQUEST, "Data tidak valid".into()),
                None => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SERVER_ERROR_MESSAGE.into(),
                ),
            },
            AppError::Io(_) | AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                SERVER_ERROR_MESSAGE.into(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else if matches!(self, AppError::DbError(_) | AppError::OrmError(_)) {
            tracing::debug!(error = %self, "constraint violation");
        }

        (status, Json(MessageResponse::new(message))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
