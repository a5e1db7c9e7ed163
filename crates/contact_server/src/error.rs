//! API error type and its JSON envelope rendering.

use std::any::Any;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use portfolio_contract::{
    ApiEnvelope, FieldError, MSG_INTERNAL_ERROR, MSG_INVALID_BODY, MSG_NOT_ALLOWED_BY_CORS,
    MSG_RATE_LIMITED, MSG_ROUTE_NOT_FOUND, MSG_STORE_FAILURE,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::store::StoreError;

pub const MSG_BODY_TOO_LARGE: &str = "Request body too large";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("request body exceeds limit")]
    BodyTooLarge,
    #[error("rate limit exceeded")]
    RateLimited { retry_after_secs: u64 },
    #[error("origin not allowed: {0}")]
    OriginNotAllowed(String),
    #[error("route not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("internal error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::OriginNotAllowed(_) => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing body. Store details stay out of it.
    pub fn envelope(&self) -> ApiEnvelope {
        match self {
            Self::Validation(errors) => ApiEnvelope::validation_failed(errors.clone()),
            Self::InvalidBody(_) => ApiEnvelope::failure(MSG_INVALID_BODY),
            Self::BodyTooLarge => ApiEnvelope::failure(MSG_BODY_TOO_LARGE),
            Self::RateLimited { .. } => ApiEnvelope::failure(MSG_RATE_LIMITED),
            Self::OriginNotAllowed(_) => ApiEnvelope::failure(MSG_NOT_ALLOWED_BY_CORS),
            Self::NotFound => ApiEnvelope::failure(MSG_ROUTE_NOT_FOUND),
            Self::Store(_) => ApiEnvelope::failure(MSG_STORE_FAILURE),
            Self::Internal => ApiEnvelope::failure(MSG_INTERNAL_ERROR),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Store(err) => error!(error = %err, "contact store insert failed"),
            Self::Internal => error!("internal server error"),
            Self::OriginNotAllowed(origin) => warn!(%origin, "rejected request from origin"),
            _ => {}
        }

        let mut response = (self.status(), Json(self.envelope())).into_response();
        if let Self::RateLimited { retry_after_secs } = self {
            response.headers_mut().insert(
                header::RETRY_AFTER,
                HeaderValue::from(retry_after_secs.max(1)),
            );
        }
        response
    }
}

/// `CatchPanicLayer` handler: logs the payload and answers with the generic 500 envelope.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!(panic = detail, "request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiEnvelope::failure(MSG_INTERNAL_ERROR)),
    )
        .into_response()
}
