//! Error kinds recognized by the HTTP adapters

pub mod filter;

use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, error};

use crate::codes::business::BusinessCode;
use crate::codes::http_status;
use crate::response::ErrorResponse;

pub use filter::{error_filter_middleware, ErrorFilter, ErrorLogger};

const GENERIC_ERROR_MESSAGE: &str = "Internal server error";

/// Application error carrying its own business code and HTTP status
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct BusinessError {
    pub code: i32,
    pub message: String,
    pub status_code: u16,
    pub details: Option<Value>,
}

impl BusinessError {
    /// Error for a catalog code; status and message default from the code
    pub fn new(code: BusinessCode, message: Option<&str>) -> Self {
        Self {
            code: code.value(),
            message: message.unwrap_or(code.message()).to_string(),
            status_code: code.status_code(),
            details: None,
        }
    }

    /// Error with a code outside the catalog
    pub fn custom(code: i32, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            code,
            message: message.into(),
            status_code,
            details: None,
        }
    }

    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Every failure a handler can surface, as a closed set
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Carries its own code and status
    #[error(transparent)]
    Business(#[from] BusinessError),

    /// Framework-level HTTP failure with one or more messages
    #[error("HTTP {status}: {}", .messages.join(", "))]
    Http { status: u16, messages: Vec<String> },

    /// Any other error with a message
    #[error(transparent)]
    Runtime(#[from] anyhow::Error),

    /// A value that is not an error at all (e.g. a non-string panic payload)
    #[error("unrecognized error: {0}")]
    Unknown(String),
}

/// Business code paired with a framework HTTP status
pub fn business_code_for_status(status: u16) -> BusinessCode {
    match status {
        400 => BusinessCode::InvalidInput,
        401 => BusinessCode::AuthFailed,
        403 => BusinessCode::PermissionDenied,
        404 => BusinessCode::ResourceNotFound,
        409 => BusinessCode::ResourceConflict,
        422 => BusinessCode::ValidationError,
        429 => BusinessCode::RateLimitExceeded,
        500 => BusinessCode::InternalError,
        503 => BusinessCode::ServiceUnavailable,
        _ => BusinessCode::InternalError,
    }
}

impl ApiError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            messages: vec![message.into()],
        }
    }

    pub fn http_messages<I, S>(status: u16, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Http {
            status,
            messages: messages.into_iter().map(Into::into).collect(),
        }
    }

    pub fn unknown(description: impl Into<String>) -> Self {
        Self::Unknown(description.into())
    }

    /// Classify a panic payload: string payloads carry a message, anything else is unknown
    pub fn from_panic(payload: Box<dyn Any + Send + 'static>) -> Self {
        if let Some(msg) = payload.downcast_ref::<String>() {
            Self::Runtime(anyhow::anyhow!(msg.clone()))
        } else if let Some(msg) = payload.downcast_ref::<&str>() {
            Self::Runtime(anyhow::anyhow!(*msg))
        } else {
            Self::Unknown("panic with non-string payload".to_string())
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Business(e) => e.status_code,
            Self::Http { status, .. } => *status,
            Self::Runtime(_) | Self::Unknown(_) => 500,
        }
    }

    pub fn business_code(&self) -> i32 {
        match self {
            Self::Business(e) => e.code,
            Self::Http { status, .. } => business_code_for_status(*status).value(),
            Self::Runtime(_) | Self::Unknown(_) => BusinessCode::InternalError.value(),
        }
    }

    /// Error envelope for this error, without a stack
    pub fn to_envelope(&self) -> ErrorResponse {
        let status = Some(self.status_code());
        let code = Some(self.business_code());
        match self {
            Self::Business(e) => {
                ErrorResponse::error(Some(&e.message), code, status, e.details.clone())
            }
            Self::Http { status: s, messages } => {
                let message = if messages.is_empty() {
                    http_status::status_message(i32::from(*s)).to_string()
                } else {
                    messages.join(", ")
                };
                let details = (messages.len() > 1).then(|| json!({ "messages": messages }));
                ErrorResponse::error(Some(&message), code, status, details)
            }
            Self::Runtime(e) => ErrorResponse::error(Some(&e.to_string()), code, status, None),
            Self::Unknown(_) => ErrorResponse::error(Some(GENERIC_ERROR_MESSAGE), code, status, None),
        }
    }

    /// Debug rendering used as `error.stack`
    pub fn stack(&self) -> String {
        match self {
            // anyhow's Debug lists the cause chain and a backtrace when captured
            Self::Runtime(e) => format!("{:?}", e),
            Self::Unknown(description) => description.clone(),
            other => format!("{:?}", other),
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        Self::http(rejection.status().as_u16(), rejection.body_text())
    }
}

impl From<axum::extract::rejection::QueryRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::QueryRejection) -> Self {
        Self::http(rejection.status().as_u16(), rejection.body_text())
    }
}

impl From<axum::extract::rejection::PathRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::PathRejection) -> Self {
        Self::http(rejection.status().as_u16(), rejection.body_text())
    }
}

/// The original error, kept on the response for [`error_filter_middleware`]
#[derive(Debug, Clone)]
pub struct CaughtError(pub Arc<ApiError>);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        debug!(status = self.status_code(), "Handler returned error: {}", self);
        let mut response = self.to_envelope().into_response();
        response.extensions_mut().insert(CaughtError(Arc::new(self)));
        response
    }
}

/// Raised when a locale-dependent accessor runs without a resolver installed
#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
    #[error("LocaleResolver is not installed as a request extension; add Extension(Arc<LocaleResolver>) to the router")]
    ResolverNotInstalled,
}

impl IntoResponse for LocaleError {
    fn into_response(self) -> Response {
        error!("{}", self);
        ErrorResponse::error(
            Some(&self.to_string()),
            Some(BusinessCode::ConfigurationError.value()),
            Some(500),
            None,
        )
        .into_response()
    }
}
