//! axum adapters and the demo service built on them

pub mod handlers;
pub mod helpers;
pub mod interceptor;
pub mod locale;
pub mod middleware;
pub mod openapi;
pub mod routes;

pub use helpers::{
    parse_json_body, parse_pagination, BodyResult, PageParams, PaginationOptions, PaginationQuery,
};
pub use interceptor::{with_route_options, wrap_responses, RouteOptions, WrapOptions};
pub use locale::RequestLocale;
