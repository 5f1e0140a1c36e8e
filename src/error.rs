use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::response::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Email is already registered")]
    DuplicateEmail,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Map an insert failure against a unique index to a domain error.
    pub fn from_unique_violation(err: sqlx::Error, mapped: AppError) -> AppError {
        match err.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => mapped,
            _ => AppError::DbError(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Guarded routes bounce anonymous callers to the login entry point
        // instead of answering with an error body.
        if matches!(self, AppError::Unauthenticated) {
            return Redirect::to("/login").into_response();
        }

        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Unauthenticated => unreachable!(),
            AppError::DbError(_) | AppError::OrmError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = ?self, "request failed");
        }

        let body = ApiResponse::error(self.to_string());
        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
