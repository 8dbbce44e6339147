//! Localized business code messages

pub mod catalog;
pub mod resolver;

pub use catalog::{normalize_locale, MessageCatalog, BASE_LOCALE};
pub use resolver::LocaleResolver;
