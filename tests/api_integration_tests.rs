use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::Service;

use api_conventions::api::handlers::AppStateInner;
use api_conventions::api::routes::create_router;
use api_conventions::config::Config;

// Helper to create test app
fn create_test_app_with(config: Config) -> axum::Router {
    let state = std::sync::Arc::new(AppStateInner::new(&config));
    create_router(state)
}

fn create_test_app() -> axum::Router {
    create_test_app_with(Config::default())
}

// Helper to send request and parse JSON response
async fn send_json_request(app: &mut axum::Router, method: &str, uri: &str) -> (StatusCode, Value) {
    send_request(app, Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()).await
}

// Helper to send request with a raw body
async fn send_body_request(
    app: &mut axum::Router,
    method: &str,
    uri: &str,
    body: impl Into<Body>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    send_request(app, request).await
}

async fn send_request(app: &mut axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.call(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap_or(json!({}));

    (status, json)
}

#[tokio::test]
async fn test_health_endpoint_is_not_wrapped() {
    let mut app = create_test_app();
    let (status, body) = send_json_request(&mut app, "GET", "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "api-conventions");
    assert!(body.get("success").is_none());
}

#[tokio::test]
async fn test_list_items_first_page() {
    let mut app = create_test_app();
    let (status, body) = send_json_request(&mut app, "GET", "/items?page=1&limit=10").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["meta"]["total"], 42);
    assert_eq!(body["meta"]["totalPages"], 5);
    assert_eq!(body["meta"]["hasNextPage"], true);
    assert_eq!(body["meta"]["hasPreviousPage"], false);
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_list_items_clamps_query() {
    let mut app = create_test_app();
    let (status, body) = send_json_request(&mut app, "GET", "/items?page=-5&limit=500").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["limit"], 100);
    assert_eq!(body["data"].as_array().unwrap().len(), 42);
    assert_eq!(body["meta"]["hasNextPage"], false);
}

#[tokio::test]
async fn test_list_items_last_page() {
    let mut app = create_test_app();
    let (_, body) = send_json_request(&mut app, "GET", "/items?page=5&limit=10").await;

    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["hasNextPage"], false);
    assert_eq!(body["meta"]["hasPreviousPage"], true);
}

#[tokio::test]
async fn test_list_items_uses_configured_limits() {
    let mut config = Config::default();
    config.pagination.default_limit = 5;
    config.pagination.max_limit = 20;
    let mut app = create_test_app_with(config);

    let (_, body) = send_json_request(&mut app, "GET", "/items").await;
    assert_eq!(body["meta"]["limit"], 5);

    let (_, body) = send_json_request(&mut app, "GET", "/items?limit=50").await;
    assert_eq!(body["meta"]["limit"], 20);
}

#[tokio::test]
async fn test_create_item() {
    let mut app = create_test_app();
    let (status, body) = send_body_request(
        &mut app,
        "POST",
        "/items",
        json!({"name": "Lamp", "price_cents": 1999}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["message"], "Resource created successfully");
    assert_eq!(body["data"]["name"], "Lamp");

    let (_, list) = send_json_request(&mut app, "GET", "/items").await;
    assert_eq!(list["meta"]["total"], 43);
}

#[tokio::test]
async fn test_create_item_invalid_json() {
    let mut app = create_test_app();
    let (status, body) = send_body_request(&mut app, "POST", "/items", "{\"name\": ").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], 3007);
    assert!(body["error"]["details"]["reason"].is_string());
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_create_item_validation_messages() {
    let mut app = create_test_app();
    let (status, body) = send_body_request(
        &mut app,
        "POST",
        "/items",
        json!({"name": "  ", "price_cents": -1}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], 3000);
    assert_eq!(
        body["message"],
        "name must not be blank, price_cents must not be negative"
    );
    assert_eq!(body["error"]["details"]["messages"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_item_returns_no_content() {
    let mut app = create_test_app();
    let id = uuid::Uuid::from_u128(1);
    let (status, _) = send_json_request(&mut app, "DELETE", &format!("/items/{}", id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send_json_request(&mut app, "DELETE", &format!("/items/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 4000);
}

#[tokio::test]
async fn test_delete_item_bad_id() {
    let mut app = create_test_app();
    let (status, body) = send_json_request(&mut app, "DELETE", "/items/not-a-uuid").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 3001);
}

#[tokio::test]
async fn test_code_lookup_default_locale() {
    let mut app = create_test_app();
    let (status, body) = send_json_request(&mut app, "GET", "/codes/2001").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "USER_ALREADY_EXISTS");
    assert_eq!(body["data"]["category"], "user");
    assert_eq!(body["data"]["message"], "User already exists");
    assert_eq!(body["data"]["locale"], "en");
    assert_eq!(body["data"]["http_status"], 409);
}

#[tokio::test]
async fn test_code_lookup_localized() {
    let mut app = create_test_app();
    let (_, body) = send_json_request(&mut app, "GET", "/codes/2001?lang=vi").await;
    assert_eq!(body["data"]["message"], "Người dùng đã tồn tại");
    assert_eq!(body["data"]["default_message"], "User already exists");

    let request = Request::builder()
        .uri("/codes/9999")
        .header("accept-language", "vi-VN,vi;q=0.9")
        .body(Body::empty())
        .unwrap();
    let (_, body) = send_request(&mut app, request).await;
    assert_eq!(body["data"]["message"], "Lỗi không xác định");
    assert!(body["data"]["category"].is_null());
}

#[tokio::test]
async fn test_code_lookup_encoded_lang_and_weighted_header() {
    let mut app = create_test_app();
    let (_, body) = send_json_request(&mut app, "GET", "/codes/2001?lang=%76%69").await;
    assert_eq!(body["data"]["locale"], "vi");
    assert_eq!(body["data"]["message"], "Người dùng đã tồn tại");

    let request = Request::builder()
        .uri("/codes/2001")
        .header("accept-language", "en;q=0.1, vi")
        .body(Body::empty())
        .unwrap();
    let (_, body) = send_request(&mut app, request).await;
    assert_eq!(body["data"]["locale"], "vi");
}

#[tokio::test]
async fn test_code_lookup_uses_configured_default_locale() {
    let mut config = Config::default();
    config.locale.default_locale = "vi".to_string();
    let mut app = create_test_app_with(config);

    let (_, body) = send_json_request(&mut app, "GET", "/codes/1003").await;
    assert_eq!(body["data"]["locale"], "vi");
    assert_eq!(body["data"]["message"], "Không có quyền truy cập");
}

#[tokio::test]
async fn test_code_error_envelope() {
    let mut app = create_test_app();
    let (status, body) = send_json_request(&mut app, "GET", "/codes/5005/error?lang=vi").await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Vượt quá giới hạn yêu cầu");
    assert_eq!(body["error"]["code"], 5005);
}

#[tokio::test]
async fn test_code_lookup_non_numeric() {
    let mut app = create_test_app();
    let (status, body) = send_json_request(&mut app, "GET", "/codes/abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], 3001);
}

#[tokio::test]
async fn test_business_error_kind() {
    let mut app = create_test_app();
    let (status, body) = send_json_request(&mut app, "GET", "/errors/business").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Insufficient balance");
    assert_eq!(body["error"]["code"], 7001);
    assert_eq!(body["error"]["details"]["required"], 100);
    assert!(body["error"].get("stack").is_none());
}

#[tokio::test]
async fn test_http_error_kind() {
    let mut app = create_test_app();
    let (status, body) = send_json_request(&mut app, "GET", "/errors/http").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], 3000);
}

#[tokio::test]
async fn test_runtime_error_kind() {
    let mut app = create_test_app();
    let (status, body) = send_json_request(&mut app, "GET", "/errors/runtime").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "ledger service unreachable");
    assert_eq!(body["error"]["code"], 5000);
}

#[tokio::test]
async fn test_unknown_error_kind() {
    let mut app = create_test_app();
    let (status, body) = send_json_request(&mut app, "GET", "/errors/unknown").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal server error");
    assert_eq!(body["error"]["code"], 5000);
}

#[tokio::test]
async fn test_panic_becomes_error_envelope() {
    let mut app = create_test_app();
    let (status, body) = send_json_request(&mut app, "GET", "/errors/panic").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "handler panicked on purpose");
}

#[tokio::test]
async fn test_stack_included_when_configured() {
    let mut config = Config::default();
    config.errors.include_stack = true;
    let mut app = create_test_app_with(config);

    let (_, body) = send_json_request(&mut app, "GET", "/errors/runtime").await;
    let stack = body["error"]["stack"].as_str().unwrap();
    assert!(stack.contains("connection reset by peer"));
}

#[tokio::test]
async fn test_wrapped_and_raw_routes() {
    let mut app = create_test_app();

    let (status, body) = send_json_request(&mut app, "GET", "/wrapped").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "data": {"greeting": "hello"},
            "message": "Success",
            "statusCode": 200
        })
    );

    let (_, body) = send_json_request(&mut app, "GET", "/raw").await;
    assert_eq!(body, json!({"greeting": "hello"}));
}

#[tokio::test]
async fn test_configured_wrap_message() {
    let mut config = Config::default();
    config.response.default_message = "Done".to_string();
    let mut app = create_test_app_with(config);

    let (_, body) = send_json_request(&mut app, "GET", "/wrapped").await;
    assert_eq!(body["message"], "Done");
}

#[tokio::test]
async fn test_request_id_header_echoed() {
    let mut app = create_test_app();
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();
    let response = app.call(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-123");
}

#[tokio::test]
async fn test_openapi_document_not_wrapped() {
    let mut app = create_test_app();
    let (status, body) = send_json_request(&mut app, "GET", "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["openapi"].is_string());
    assert!(body["paths"]["/items"].is_object());
}

#[tokio::test]
async fn test_locale_extractor_requires_resolver() {
    use api_conventions::api::RequestLocale;
    use axum::routing::get;

    async fn handler(locale: RequestLocale) -> String {
        locale.message(0)
    }

    let mut app: axum::Router = axum::Router::new().route("/", get(handler));
    let (status, body) = send_json_request(&mut app, "GET", "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], 5004);
}
