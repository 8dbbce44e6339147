use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::MethodRouter,
};
use serde_json::Value;
use tracing::{debug, error};

use crate::response::{ApiResponse, ErrorResponse};

/// Options for [`wrap_responses`]
#[derive(Debug, Clone)]
pub struct WrapOptions {
    /// Message used for wrapped success envelopes
    pub default_message: String,
    /// Leave bodies that already look like an envelope untouched
    pub skip_if_wrapped: bool,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self {
            default_message: "Success".to_string(),
            skip_if_wrapped: true,
        }
    }
}

impl WrapOptions {
    pub fn with_default_message(mut self, message: impl Into<String>) -> Self {
        self.default_message = message.into();
        self
    }
}

/// Per-route settings, attached when the route is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteOptions {
    pub wrap: bool,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self { wrap: true }
    }
}

impl RouteOptions {
    /// Route whose output is sent exactly as the handler returned it
    pub fn unwrapped() -> Self {
        Self { wrap: false }
    }
}

/// Register `options` for a single route
pub fn with_route_options<S>(route: MethodRouter<S>, options: RouteOptions) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.layer(middleware::map_response(move |mut response: Response| async move {
        response.extensions_mut().insert(options);
        response
    }))
}

/// Wrap successful handler output in a success envelope.
///
/// - 204 responses become `no_content()` envelopes whatever the handler returned
/// - JSON bodies become `data`; UTF-8 `text/plain` bodies become a string `data`
/// - non-2xx, other media types and opted-out responses pass through
/// - bodies that are already envelopes pass through when `skip_if_wrapped` is set
pub async fn wrap_responses(
    State(options): State<WrapOptions>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    let route = response
        .extensions()
        .get::<RouteOptions>()
        .copied()
        .unwrap_or_default();
    if !route.wrap {
        return response;
    }

    let status = response.status();
    if status == StatusCode::NO_CONTENT {
        return with_status(ErrorResponse::no_content(None).into_response(), status);
    }
    if !status.is_success() {
        return response;
    }
    let Some(kind) = body_kind(&response) else {
        return response;
    };

    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to read handler response body: {}", e);
            return ErrorResponse::internal_error(None, None).into_response();
        }
    };

    let value = match kind {
        BodyKind::Json => serde_json::from_slice::<Value>(&bytes).ok(),
        BodyKind::Text => std::str::from_utf8(&bytes)
            .ok()
            .map(|text| Value::String(text.to_string())),
    };
    let Some(value) = value else {
        return Response::from_parts(parts, Body::from(bytes));
    };

    if options.skip_if_wrapped && is_envelope(&value) {
        debug!("Response already enveloped, skipping wrap");
        return Response::from_parts(parts, Body::from(bytes));
    }

    let envelope = ApiResponse::success(
        Some(value),
        Some(&options.default_message),
        Some(status.as_u16()),
        None,
    );

    let mut wrapped = envelope.into_response();
    for (name, value) in parts.headers.iter() {
        if name != header::CONTENT_LENGTH && name != header::CONTENT_TYPE {
            wrapped.headers_mut().append(name.clone(), value.clone());
        }
    }
    wrapped
}

fn with_status(mut response: Response, status: StatusCode) -> Response {
    *response.status_mut() = status;
    response
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Text,
}

fn body_kind(response: &Response) -> Option<BodyKind> {
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())?;

    if content_type.starts_with("application/json") {
        Some(BodyKind::Json)
    } else if content_type.starts_with("text/plain") {
        Some(BodyKind::Text)
    } else {
        None
    }
}

/// Shape check for an already-built envelope
fn is_envelope(value: &Value) -> bool {
    value.get("success").map_or(false, Value::is_boolean)
        && value.get("statusCode").map_or(false, Value::is_number)
        && value.get("message").map_or(false, Value::is_string)
}
