//!
//! # Error handling
//!
//! `AppError` is the single error type used by the token service, the access
//! control chain and the resource handlers. It implements
//! `actix_web::error::ResponseError`, so gate rejections and handler failures
//! returned through `?` become HTTP responses with the right status code and
//! a JSON `{"message": ...}` body.
//!
//! Store and other internal failures are logged server-side with their full
//! detail and answered with a generic `"Server error"` body; nothing internal
//! is leaked to clients.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// All error conditions the API can answer with.
///
/// There is deliberately no 404 variant: a lookup that finds nothing on a
/// gated route is answered as `Forbidden`, and the single-user fetch returns
/// `null` with 200 instead of failing.
#[derive(Debug)]
pub enum AppError {
    /// Authentication missing or invalid (HTTP 401).
    Unauthorized(String),
    /// Authorization failed: identity mismatch, missing role, or an identity
    /// the store does not know (HTTP 403).
    Forbidden(String),
    /// Malformed or out-of-policy request input (HTTP 400).
    BadRequest(String),
    /// Typed payload failed `validator` checks (HTTP 422).
    ValidationError(String),
    /// A store operation failed (HTTP 500, generic body).
    DatabaseError(String),
    /// Any other unexpected server-side failure (HTTP 500, generic body).
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "message": msg
            })),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(json!({
                "message": msg
            })),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "message": msg
            })),
            AppError::ValidationError(msg) => HttpResponse::UnprocessableEntity().json(json!({
                "message": msg
            })),
            // 500s keep their detail in the server log only.
            AppError::DatabaseError(msg) => {
                log::error!("store failure: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "message": "Server error"
                }))
            }
            AppError::InternalServerError(msg) => {
                log::error!("internal failure: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "message": "Server error"
                }))
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        AppError::DatabaseError(error.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Token processing failures are uniformly an authentication problem; callers
/// cannot distinguish malformed, expired and badly signed tokens.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(error.to_string())
    }
}
