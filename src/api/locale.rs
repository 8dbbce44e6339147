use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{header, request::Parts},
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::codes::BusinessCode;
use crate::errors::LocaleError;
use crate::i18n::{normalize_locale, LocaleResolver};
use crate::response::ApiResponse;

/// Query parameter that selects the response locale
pub const LOCALE_QUERY_PARAM: &str = "lang";

/// Locale of the current request plus the resolver to translate with.
///
/// Requires `Extension(Arc<LocaleResolver>)` on the router; without it the
/// extractor rejects every request with [`LocaleError::ResolverNotInstalled`].
///
/// The locale is taken from `?lang=`, then the highest-weighted
/// `Accept-Language` tag, then the resolver's default locale.
#[derive(Debug, Clone)]
pub struct RequestLocale {
    resolver: Arc<LocaleResolver>,
    locale: String,
}

impl RequestLocale {
    pub fn new(resolver: Arc<LocaleResolver>, locale: Option<&str>) -> Self {
        let locale = locale
            .map(normalize_locale)
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| resolver.default_locale().to_string());
        Self { resolver, locale }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn resolver(&self) -> &LocaleResolver {
        &self.resolver
    }

    /// Message for `code` in the request locale
    pub fn message(&self, code: i32) -> String {
        self.resolver.resolve(code, Some(&self.locale))
    }

    /// Envelope for `code` with its message translated to the request locale
    pub fn envelope<T>(&self, code: BusinessCode, details: Option<Value>) -> ApiResponse<T> {
        let message = self.message(code.value());
        ApiResponse::from_business_code(code, Some(&message), details)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestLocale
where
    S: Send + Sync,
{
    type Rejection = LocaleError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let resolver = parts
            .extensions
            .get::<Arc<LocaleResolver>>()
            .cloned()
            .ok_or(LocaleError::ResolverNotInstalled)?;

        let requested = Query::<LocaleQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(query)| query.lang)
            .filter(|lang| !lang.trim().is_empty())
            .or_else(|| {
                parts
                    .headers
                    .get(header::ACCEPT_LANGUAGE)
                    .and_then(|v| v.to_str().ok())
                    .and_then(preferred_language_tag)
            });

        Ok(Self::new(resolver, requested.as_deref()))
    }
}

#[derive(Debug, Deserialize)]
struct LocaleQuery {
    lang: Option<String>,
}

/// Tag with the highest `q` weight; the earliest entry wins ties.
///
/// `"en;q=0.1, vi"` gives `"vi"`. Wildcards and `q=0` entries are ignored.
fn preferred_language_tag(header: &str) -> Option<String> {
    let mut best: Option<(&str, f32)> = None;

    for entry in header.split(',') {
        let mut params = entry.split(';');
        let tag = params.next().map(str::trim).unwrap_or("");
        if tag.is_empty() || tag == "*" {
            continue;
        }

        let weight = params
            .filter_map(|p| p.trim().strip_prefix("q="))
            .next()
            .map_or(Some(1.0), |q| q.trim().parse::<f32>().ok())
            .unwrap_or(0.0);
        if weight <= 0.0 {
            continue;
        }

        if best.map_or(true, |(_, w)| weight > w) {
            best = Some((tag, weight));
        }
    }

    best.map(|(tag, _)| tag.to_string())
}
