use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use super::helpers::{parse_json_body, BodyResult, PaginationOptions, PaginationQuery};
use super::interceptor::WrapOptions;
use super::locale::RequestLocale;
use crate::codes::{business_message, BusinessCategory, BusinessCode};
use crate::config::Config;
use crate::errors::{ApiError, BusinessError, ErrorFilter};
use crate::i18n::LocaleResolver;
use crate::response::{ApiResponse, ErrorBody, PaginationMeta};

const SEED_ITEMS: u128 = 42;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub items: RwLock<Vec<Item>>,
    pub resolver: Arc<LocaleResolver>,
    pub error_filter: ErrorFilter,
    pub wrap: WrapOptions,
    pub pagination: PaginationOptions,
}

impl AppStateInner {
    pub fn new(config: &Config) -> Self {
        let items = (1..=SEED_ITEMS)
            .map(|n| Item {
                id: Uuid::from_u128(n),
                name: format!("Item {}", n),
                price_cents: (n as i64) * 100,
            })
            .collect();

        Self {
            items: RwLock::new(items),
            resolver: Arc::new(config.locale_resolver()),
            error_filter: config.error_filter(),
            wrap: config.wrap_options(),
            pagination: config.pagination,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub price_cents: i64,
}

/// Body of `POST /items`
#[derive(Debug, Deserialize, ToSchema)]
pub struct NewItem {
    /// Display name (must not be blank)
    pub name: String,
    /// Price in cents (must not be negative)
    pub price_cents: i64,
}

/// Catalog entry for a business code, localized
#[derive(Debug, Serialize, ToSchema)]
pub struct CodeInfo {
    pub code: i32,
    /// Constant name, absent for codes outside the catalog
    pub name: Option<String>,
    /// Range the code falls in, absent outside every range
    #[schema(value_type = Option<String>)]
    pub category: Option<BusinessCategory>,
    /// Message in the requested locale
    pub message: String,
    /// English catalog message
    pub default_message: String,
    pub locale: String,
    /// HTTP status conventionally paired with the code
    pub http_status: Option<u16>,
}

// Concrete envelope shapes for OpenAPI generation

/// Single item envelope
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub success: bool,
    pub data: Option<Item>,
    pub message: String,
    pub status_code: u16,
    pub error: Option<ErrorBody>,
}

/// Paginated item list envelope
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemListResponse {
    pub success: bool,
    pub data: Option<Vec<Item>>,
    pub message: String,
    pub status_code: u16,
    pub meta: Option<PaginationMeta>,
    pub error: Option<ErrorBody>,
}

/// Business code lookup envelope
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CodeInfoResponse {
    pub success: bool,
    pub data: Option<CodeInfo>,
    pub message: String,
    pub status_code: u16,
    pub error: Option<ErrorBody>,
}

/// Error envelope
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub success: bool,
    pub message: String,
    pub status_code: u16,
    pub error: ErrorBody,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = serde_json::Value)
    )
)]
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "api-conventions",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Look up a business code with its message in the request locale
#[utoipa::path(
    get,
    path = "/codes/{code}",
    tag = "codes",
    params(
        ("code" = i32, Path, description = "Business code"),
        ("lang" = Option<String>, Query, description = "Locale, e.g. `vi`; defaults to Accept-Language")
    ),
    responses(
        (status = 200, description = "Code information", body = CodeInfoResponse),
        (status = 400, description = "Code is not an integer", body = ErrorEnvelope)
    )
)]
pub async fn get_code(
    locale: RequestLocale,
    path: Result<Path<i32>, PathRejection>,
) -> Result<ApiResponse<CodeInfo>, ApiError> {
    let Path(code) = path?;
    let known = BusinessCode::from_i32(code);

    info!("Code lookup: code={}, locale={}", code, locale.locale());

    Ok(ApiResponse::ok(CodeInfo {
        code,
        name: known.map(|c| c.name().to_string()),
        category: BusinessCategory::of(code),
        message: locale.message(code),
        default_message: business_message(code).to_string(),
        locale: locale.locale().to_string(),
        http_status: known.map(BusinessCode::status_code),
    }))
}

/// List items, one page at a time
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(super::helpers::PageParams),
    responses(
        (status = 200, description = "Page of items", body = ItemListResponse)
    )
)]
pub async fn list_items(
    State(state): State<AppState>,
    PaginationQuery(params): PaginationQuery,
) -> ApiResponse<Vec<Item>> {
    let items = state.items.read().await;
    let total = items.len();
    let start = params.offset().min(total);
    let end = start
        .saturating_add(usize::try_from(params.limit).unwrap_or(0))
        .min(total);

    info!(
        "List items: page={}, limit={}, returned={}, total={}",
        params.page,
        params.limit,
        end - start,
        total
    );

    ApiResponse::paginated(
        items[start..end].to_vec(),
        params.page,
        params.limit,
        total as i64,
    )
}

/// Create an item
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = NewItem,
    responses(
        (status = 201, description = "Item created", body = ItemResponse),
        (status = 400, description = "Body is not valid JSON", body = ErrorEnvelope),
        (status = 422, description = "Body failed validation", body = ErrorEnvelope)
    )
)]
pub async fn create_item(State(state): State<AppState>, body: Bytes) -> Response {
    let new_item = match parse_json_body::<NewItem>(&body) {
        BodyResult::Data(new_item) => new_item,
        BodyResult::Error(response) => return response,
    };

    let mut problems = Vec::new();
    if new_item.name.trim().is_empty() {
        problems.push("name must not be blank");
    }
    if new_item.price_cents < 0 {
        problems.push("price_cents must not be negative");
    }
    if !problems.is_empty() {
        return ApiError::http_messages(422, problems).into_response();
    }

    let item = Item {
        id: Uuid::new_v4(),
        name: new_item.name.trim().to_string(),
        price_cents: new_item.price_cents,
    };
    info!("Created item {} ({})", item.id, item.name);
    state.items.write().await.push(item.clone());

    ApiResponse::created(item, None).into_response()
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = Uuid, Path, description = "Item UUID")
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Item not found", body = ErrorEnvelope)
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    let mut items = state.items.write().await;

    match items.iter().position(|item| item.id == id) {
        Some(index) => {
            items.remove(index);
            info!("Deleted item {}", id);
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(BusinessError::new(
            BusinessCode::ResourceNotFound,
            Some(&format!("Item not found: {}", id)),
        )
        .into()),
    }
}

/// Produce each kind of handled error
#[utoipa::path(
    get,
    path = "/errors/{kind}",
    tag = "errors",
    params(
        ("kind" = String, Path, description = "business, http, runtime, unknown or panic")
    ),
    responses(
        (status = 400, description = "Business error", body = ErrorEnvelope),
        (status = 422, description = "HTTP error with several messages", body = ErrorEnvelope),
        (status = 500, description = "Runtime, unknown or panic", body = ErrorEnvelope)
    )
)]
pub async fn trigger_error(Path(kind): Path<String>) -> Result<Json<Value>, ApiError> {
    match kind.as_str() {
        "business" => Err(BusinessError::new(BusinessCode::InsufficientBalance, None)
            .with_details(json!({ "balance": 0, "required": 100 }))
            .into()),
        "http" => Err(ApiError::http_messages(
            422,
            ["name must not be blank", "price_cents must not be negative"],
        )),
        "runtime" => Err(anyhow::anyhow!("connection reset by peer")
            .context("ledger service unreachable")
            .into()),
        "unknown" => Err(ApiError::unknown("opaque failure value")),
        // Exercises the panic handler
        "panic" => panic!("handler panicked on purpose"),
        other => Err(BusinessError::new(
            BusinessCode::ResourceNotFound,
            Some(&format!("No error kind named '{}'", other)),
        )
        .into()),
    }
}

/// Plain JSON, enveloped by the response interceptor
#[utoipa::path(
    get,
    path = "/wrapped",
    tag = "envelope",
    responses(
        (status = 200, description = "Greeting inside a success envelope", body = serde_json::Value)
    )
)]
pub async fn wrapped() -> Json<Value> {
    Json(json!({ "greeting": "hello" }))
}

/// Plain JSON on a route that opts out of wrapping
#[utoipa::path(
    get,
    path = "/raw",
    tag = "envelope",
    responses(
        (status = 200, description = "Greeting exactly as returned", body = serde_json::Value)
    )
)]
pub async fn raw() -> Json<Value> {
    Json(json!({ "greeting": "hello" }))
}

/// Localized error envelope for a business code
#[utoipa::path(
    get,
    path = "/codes/{code}/error",
    tag = "codes",
    params(
        ("code" = i32, Path, description = "Business code from the catalog"),
        ("lang" = Option<String>, Query, description = "Locale, e.g. `vi`")
    ),
    responses(
        (status = 400, description = "Envelope for the code", body = ErrorEnvelope),
        (status = 404, description = "Code is not in the catalog", body = ErrorEnvelope)
    )
)]
pub async fn code_error(
    locale: RequestLocale,
    path: Result<Path<i32>, PathRejection>,
) -> Result<ApiResponse<()>, ApiError> {
    let Path(code) = path?;
    let code = BusinessCode::from_i32(code).ok_or_else(|| {
        BusinessError::new(
            BusinessCode::ResourceNotFound,
            Some(&locale.message(BusinessCode::ResourceNotFound.value())),
        )
    })?;

    Ok(locale.envelope(code, None))
}
