//! Unified response envelope

pub mod envelope;
pub mod pagination;

pub use envelope::{json_response, ApiResponse, ErrorBody, ErrorResponse};
pub use pagination::PaginationMeta;
