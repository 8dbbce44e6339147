use utoipa::OpenApi;

use crate::api::handlers::{
    CodeInfo, CodeInfoResponse, ErrorEnvelope, Item, ItemListResponse, ItemResponse, NewItem,
};
use crate::api::helpers::PageParams;
use crate::response::{ErrorBody, PaginationMeta};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "API Conventions",
        version = "0.1.0",
        description = "Reference service for the response envelope, business code catalog and localized messages.",
        contact(
            name = "API Conventions",
        )
    ),
    paths(
        crate::api::handlers::health,
        crate::api::handlers::get_code,
        crate::api::handlers::code_error,
        crate::api::handlers::list_items,
        crate::api::handlers::create_item,
        crate::api::handlers::delete_item,
        crate::api::handlers::trigger_error,
        crate::api::handlers::wrapped,
        crate::api::handlers::raw,
    ),
    components(
        schemas(
            Item,
            NewItem,
            CodeInfo,
            ItemResponse,
            ItemListResponse,
            CodeInfoResponse,
            ErrorEnvelope,
            ErrorBody,
            PaginationMeta,
            PageParams,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "codes", description = "Business code catalog and localized messages"),
        (name = "items", description = "Paginated resource example"),
        (name = "errors", description = "Error envelope examples"),
        (name = "envelope", description = "Response wrapping examples"),
    )
)]
pub struct ApiDoc;
