use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::convert::Infallible;
use utoipa::{IntoParams, ToSchema};

use crate::codes::BusinessCode;
use crate::response::ErrorResponse;

/// Outcome of [`parse_json_body`]: the value, or a ready-to-send 400 response
#[derive(Debug)]
pub enum BodyResult<T> {
    Data(T),
    Error(Response),
}

impl<T> BodyResult<T> {
    pub fn into_result(self) -> Result<T, Response> {
        match self {
            Self::Data(data) => Ok(data),
            Self::Error(response) => Err(response),
        }
    }
}

/// Parse a JSON request body without ever failing the handler
pub fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> BodyResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return BodyResult::Error(
            ErrorResponse::bad_request(Some("Request body is required"), None).into_response(),
        );
    }

    match serde_json::from_slice(body) {
        Ok(data) => BodyResult::Data(data),
        Err(e) => {
            let details = json!({
                "reason": e.to_string(),
                "line": e.line(),
                "column": e.column(),
            });
            BodyResult::Error(
                ErrorResponse::error(
                    Some("Invalid JSON body"),
                    Some(BusinessCode::InvalidJson.value()),
                    Some(400),
                    Some(details),
                )
                .into_response(),
            )
        }
    }
}

/// Defaults and bounds for [`parse_pagination`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationOptions {
    pub default_page: i64,
    pub default_limit: i64,
    pub max_limit: i64,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_limit: 10,
            max_limit: 100,
        }
    }
}

/// Sanitized page/limit pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page number (starts at 1)
    pub page: i64,
    /// Results per page
    pub limit: i64,
}

impl PageParams {
    /// Number of items before this page
    pub fn offset(&self) -> usize {
        usize::try_from((self.page - 1).saturating_mul(self.limit)).unwrap_or(0)
    }
}

/// `page` and `limit` exactly as they appear in the query string
#[derive(Debug, Default, Deserialize)]
struct RawPageQuery {
    page: Option<String>,
    limit: Option<String>,
}

impl RawPageQuery {
    fn sanitize(self, options: &PaginationOptions) -> PageParams {
        let page = self.page.and_then(|v| v.trim().parse::<i64>().ok());
        let limit = self.limit.and_then(|v| v.trim().parse::<i64>().ok());

        let max_limit = options.max_limit.max(1);
        PageParams {
            page: page.unwrap_or(options.default_page).max(1),
            limit: limit.unwrap_or(options.default_limit).clamp(1, max_limit),
        }
    }
}

/// Read `page` and `limit` from a raw query string.
///
/// Never fails: missing or non-numeric values take the defaults, `page` is
/// raised to at least 1 and `limit` is clamped to `[1, max_limit]`.
pub fn parse_pagination(query: Option<&str>, options: &PaginationOptions) -> PageParams {
    serde_urlencoded::from_str::<RawPageQuery>(query.unwrap_or(""))
        .unwrap_or_default()
        .sanitize(options)
}

/// Extractor applying the [`parse_pagination`] rules; options come from an
/// `Extension<PaginationOptions>` when present
#[derive(Debug, Clone, Copy)]
pub struct PaginationQuery(pub PageParams);

#[async_trait]
impl<S> FromRequestParts<S> for PaginationQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let options = parts
            .extensions
            .get::<PaginationOptions>()
            .copied()
            .unwrap_or_default();
        let raw = Query::<RawPageQuery>::try_from_uri(&parts.uri)
            .map(|Query(raw)| raw)
            .unwrap_or_default();
        Ok(Self(raw.sanitize(&options)))
    }
}
