use anyhow::{Context, Result};
use std::env;

use crate::api::{PaginationOptions, WrapOptions};
use crate::errors::ErrorFilter;
use crate::i18n::LocaleResolver;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub locale: LocaleConfig,
    pub errors: ErrorConfig,
    pub pagination: PaginationOptions,
    pub response: ResponseConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct LocaleConfig {
    pub default_locale: String,
    pub fallback_locale: String,
}

#[derive(Debug, Clone)]
pub struct ErrorConfig {
    pub include_stack: bool,
}

#[derive(Debug, Clone)]
pub struct ResponseConfig {
    pub default_message: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("API_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .context("API_PORT must be a valid port number")?,
            },
            locale: LocaleConfig {
                default_locale: env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "en".to_string()),
                fallback_locale: env::var("FALLBACK_LOCALE").unwrap_or_else(|_| "en".to_string()),
            },
            errors: ErrorConfig {
                include_stack: env::var("ERROR_INCLUDE_STACK")
                    .unwrap_or_else(|_| "false".to_string())
                    .parse()
                    .context("ERROR_INCLUDE_STACK must be true or false")?,
            },
            pagination: PaginationOptions {
                default_page: 1,
                default_limit: env::var("PAGINATION_DEFAULT_LIMIT")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .context("PAGINATION_DEFAULT_LIMIT must be a valid number")?,
                max_limit: env::var("PAGINATION_MAX_LIMIT")
                    .unwrap_or_else(|_| "100".to_string())
                    .parse()
                    .context("PAGINATION_MAX_LIMIT must be a valid number")?,
            },
            response: ResponseConfig {
                default_message: env::var("RESPONSE_DEFAULT_MESSAGE")
                    .unwrap_or_else(|_| "Success".to_string()),
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn locale_resolver(&self) -> LocaleResolver {
        LocaleResolver::new()
            .with_default_locale(&self.locale.default_locale)
            .with_fallback_locale(&self.locale.fallback_locale)
    }

    pub fn error_filter(&self) -> ErrorFilter {
        ErrorFilter::new().with_stack(self.errors.include_stack)
    }

    pub fn wrap_options(&self) -> WrapOptions {
        WrapOptions::default().with_default_message(self.response.default_message.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            locale: LocaleConfig {
                default_locale: "en".to_string(),
                fallback_locale: "en".to_string(),
            },
            errors: ErrorConfig {
                include_stack: false,
            },
            pagination: PaginationOptions::default(),
            response: ResponseConfig {
                default_message: "Success".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_address() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 3000;

        assert_eq!(config.server_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_derived_components() {
        let mut config = Config::default();
        config.locale.default_locale = "vi".to_string();
        config.errors.include_stack = true;
        config.response.default_message = "Done".to_string();

        let resolver = config.locale_resolver();
        assert_eq!(resolver.default_locale(), "vi");
        assert_eq!(resolver.fallback_locale(), "en");
        assert!(config.error_filter().include_stack());
        assert_eq!(config.wrap_options().default_message, "Done");
    }
}
