use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::debug;

use super::catalog::{normalize_locale, MessageCatalog, BASE_LOCALE};
use crate::codes::business::UNKNOWN_ERROR;

/// Resolves business code messages for a locale.
///
/// Lookup order for `resolve(code, locale)`, first hit wins:
/// 1. overrides registered for `locale`
/// 2. built-in table for `locale`
/// 3. overrides for the fallback locale (skipped when it equals `locale`)
/// 4. built-in table for the fallback locale
/// 5. the "unknown" sentinel of `locale`, else the one of [`BASE_LOCALE`]
///
/// There is no shared instance. Build one during startup and hand it to
/// whatever needs it; mutation after that point must be synchronized by the
/// owner (the HTTP layer keeps it behind an `Arc` and never mutates it).
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    catalog: Arc<MessageCatalog>,
    default_locale: String,
    fallback_locale: String,
    overrides: HashMap<String, HashMap<i32, String>>,
}

impl Default for LocaleResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LocaleResolver {
    /// Resolver over the built-in tables, defaulting and falling back to `en`
    pub fn new() -> Self {
        Self::with_catalog(MessageCatalog::builtin())
    }

    pub fn with_catalog(catalog: Arc<MessageCatalog>) -> Self {
        Self {
            catalog,
            default_locale: BASE_LOCALE.to_string(),
            fallback_locale: BASE_LOCALE.to_string(),
            overrides: HashMap::new(),
        }
    }

    pub fn with_default_locale(mut self, locale: &str) -> Self {
        self.set_default_locale(locale);
        self
    }

    pub fn with_fallback_locale(mut self, locale: &str) -> Self {
        self.set_fallback_locale(locale);
        self
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn fallback_locale(&self) -> &str {
        &self.fallback_locale
    }

    pub fn set_default_locale(&mut self, locale: &str) {
        self.default_locale = normalize_locale(locale);
        debug!(locale = %self.default_locale, "Default locale changed");
    }

    /// An empty locale resets the fallback to [`BASE_LOCALE`]
    pub fn set_fallback_locale(&mut self, locale: &str) {
        let locale = normalize_locale(locale);
        self.fallback_locale = if locale.is_empty() {
            BASE_LOCALE.to_string()
        } else {
            locale
        };
        debug!(locale = %self.fallback_locale, "Fallback locale changed");
    }

    /// Merge `entries` into the override table of `locale`; later writes win per code
    pub fn register_overrides<I, S>(&mut self, locale: &str, entries: I)
    where
        I: IntoIterator<Item = (i32, S)>,
        S: Into<String>,
    {
        let locale = normalize_locale(locale);
        let table = self.overrides.entry(locale.clone()).or_default();
        let before = table.len();
        table.extend(entries.into_iter().map(|(code, msg)| (code, msg.into())));
        debug!(
            locale = %locale,
            added = table.len() - before,
            total = table.len(),
            "Registered message overrides"
        );
    }

    pub fn resolve(&self, code: i32, locale: Option<&str>) -> String {
        let locale = self.target_locale(locale);

        if let Some(msg) = self.lookup(&locale, code) {
            return msg.to_string();
        }

        if self.fallback_locale != locale {
            if let Some(msg) = self.lookup(&self.fallback_locale, code) {
                return msg.to_string();
            }
        }

        self.catalog
            .unknown(&locale)
            .or_else(|| self.catalog.unknown(BASE_LOCALE))
            .unwrap_or(UNKNOWN_ERROR)
            .to_string()
    }

    /// Whether `locale` itself has a message, ignoring the fallback locale
    pub fn has_message(&self, code: i32, locale: Option<&str>) -> bool {
        let locale = self.target_locale(locale);
        self.lookup(&locale, code).is_some()
    }

    /// Locales with either built-in or registered messages, sorted
    pub fn supported_locales(&self) -> Vec<String> {
        self.catalog
            .locales()
            .chain(self.overrides.keys().map(String::as_str))
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn target_locale(&self, locale: Option<&str>) -> String {
        match locale {
            Some(locale) => normalize_locale(locale),
            None => self.default_locale.clone(),
        }
    }

    fn lookup(&self, locale: &str, code: i32) -> Option<&str> {
        self.overrides
            .get(locale)
            .and_then(|table| table.get(&code))
            .map(String::as_str)
            .or_else(|| self.catalog.get(locale, code))
    }
}
