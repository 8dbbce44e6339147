use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{error, warn};

use super::{ApiError, CaughtError};
use crate::api::middleware::RequestId;
use crate::response::ErrorResponse;

/// Callback receiving every handled error and the request context it came from
pub type ErrorLogger = Arc<dyn Fn(&ApiError, &str) + Send + Sync>;

/// Turns any [`ApiError`] into an error envelope
#[derive(Clone, Default)]
pub struct ErrorFilter {
    include_stack: bool,
    logger: Option<ErrorLogger>,
}

impl fmt::Debug for ErrorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorFilter")
            .field("include_stack", &self.include_stack)
            .field("logger", &self.logger.as_ref().map(|_| "custom"))
            .finish()
    }
}

impl ErrorFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `error.stack` to every envelope
    pub fn with_stack(mut self, include_stack: bool) -> Self {
        self.include_stack = include_stack;
        self
    }

    /// Replace the default `tracing` output with a custom logger
    pub fn with_logger<F>(mut self, logger: F) -> Self
    where
        F: Fn(&ApiError, &str) + Send + Sync + 'static,
    {
        self.logger = Some(Arc::new(logger));
        self
    }

    pub fn include_stack(&self) -> bool {
        self.include_stack
    }

    /// Log `err` and build its envelope
    pub fn catch(&self, err: &ApiError, context: &str) -> ErrorResponse {
        self.log(err, context);

        let envelope = err.to_envelope();
        if self.include_stack {
            envelope.with_stack(err.stack())
        } else {
            envelope
        }
    }

    pub fn respond(&self, err: &ApiError, context: &str) -> Response {
        self.catch(err, context).into_response()
    }

    fn log(&self, err: &ApiError, context: &str) {
        match &self.logger {
            Some(logger) => {
                // A failing logger must never cost the client its response
                if panic::catch_unwind(AssertUnwindSafe(|| logger(err, context))).is_err() {
                    warn!(context = %context, "Error logger panicked; response still sent");
                }
            }
            None => {
                let status = err.status_code();
                if status >= 500 {
                    error!(
                        context = %context,
                        status = status,
                        code = err.business_code(),
                        "Request failed: {}",
                        err
                    );
                } else {
                    warn!(
                        context = %context,
                        status = status,
                        code = err.business_code(),
                        "Request rejected: {}",
                        err
                    );
                }
            }
        }
    }
}

/// Re-renders responses produced from an [`ApiError`] through the configured filter
pub async fn error_filter_middleware(
    State(filter): State<ErrorFilter>,
    request: Request,
    next: Next,
) -> Response {
    let context = match request.extensions().get::<RequestId>() {
        Some(id) => format!("{} {} [{}]", request.method(), request.uri().path(), id.0),
        None => format!("{} {}", request.method(), request.uri().path()),
    };

    let response = next.run(request).await;

    match response.extensions().get::<CaughtError>().cloned() {
        Some(CaughtError(err)) => filter.respond(&err, &context),
        None => response,
    }
}
