// Library exports for testing
pub mod api;
pub mod codes;
pub mod config;
pub mod errors;
pub mod i18n;
pub mod response;

pub use codes::{business_message, status_message, BusinessCategory, BusinessCode};
pub use errors::{ApiError, BusinessError, ErrorFilter};
pub use i18n::LocaleResolver;
pub use response::{json_response, ApiResponse, ErrorResponse, PaginationMeta};
