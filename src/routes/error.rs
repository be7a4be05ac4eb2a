use std::{error::Error, fmt::Debug};

use actix_web::{error::{InternalError, JsonPayloadError, QueryPayloadError}, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;
use validator::ValidationErrors;

use crate::utils::{error_fmt_chain, json_error};

/// Error returned by every handler. Only the variant's fixed message reaches
/// the client; the cause chain of `UnexpectedError` is logged and dropped.
#[derive(Error)]
pub enum ApiError{
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Internal Server Error")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        if let ApiError::UnexpectedError(e) = self {
            tracing::error!(error.cause_chain = ?e, "Request failed");
        }

        json_error(self.status_code(), &format!("{}", self))
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::InvalidInput(format!("Invalid input: {}", errors))
    }
}

// Malformed bodies and query strings get the same JSON error shape as handler errors
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error{
    let response = json_error(StatusCode::BAD_REQUEST, &format!("Invalid request: {}", err));
    InternalError::from_response(err, response).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error{
    let response = json_error(StatusCode::BAD_REQUEST, &format!("Invalid request: {}", err));
    InternalError::from_response(err, response).into()
}
