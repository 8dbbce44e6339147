//! Fixed catalogs of HTTP status codes and business codes

pub mod business;
pub mod http_status;

pub use business::{business_message, BusinessCategory, BusinessCode};
pub use http_status::status_message;
