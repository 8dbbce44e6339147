use axum::{
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Router,
};
use std::any::Any;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    code_error, create_item, delete_item, get_code, health, list_items, raw, trigger_error,
    wrapped, AppState,
};
use super::interceptor::{with_route_options, wrap_responses, RouteOptions};
use super::middleware::logging_middleware;
use super::openapi::ApiDoc;
use crate::errors::{error_filter_middleware, ApiError};

pub fn create_router(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    let api = Router::new()
        // Health check
        .route(
            "/health",
            with_route_options(get(health), RouteOptions::unwrapped()),
        )
        // Business code catalog
        .route("/codes/:code", get(get_code))
        .route("/codes/:code/error", get(code_error))
        // Items
        .route("/items", get(list_items).post(create_item))
        .route("/items/:id", axum::routing::delete(delete_item))
        // Envelope demos
        .route("/errors/:kind", get(trigger_error))
        .route("/wrapped", get(wrapped))
        .route("/raw", with_route_options(get(raw), RouteOptions::unwrapped()))
        // Order matters: wrap -> panic -> error filter -> extensions
        .layer(middleware::from_fn_with_state(
            state.wrap.clone(),
            wrap_responses,
        ))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(
            state.error_filter.clone(),
            error_filter_middleware,
        ))
        .layer(Extension(state.resolver.clone()))
        .layer(Extension(state.pagination));

    api
        // OpenAPI documentation, served outside the envelope
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // Add shared state
        .with_state(state)
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::from_panic(payload).into_response()
}
