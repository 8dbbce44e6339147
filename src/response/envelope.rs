use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, warn};
use utoipa::ToSchema;

use super::pagination::PaginationMeta;
use crate::codes::business::{self, BusinessCode};
use crate::codes::http_status;

const DEFAULT_SUCCESS_MESSAGE: &str = "Success";
const DEFAULT_ERROR_MESSAGE: &str = "Error";
const DEFAULT_CREATED_MESSAGE: &str = "Resource created successfully";
const DEFAULT_NO_CONTENT_MESSAGE: &str = "No content";

/// Error envelope with no payload type
pub type ErrorResponse = ApiResponse<()>;

/// Uniform response envelope for every API reply
///
/// Only the constructors below create envelopes, so `success` and the
/// presence of `error` always agree. Envelopes are never deserialized:
///
/// ```compile_fail
/// let _: api_conventions::ApiResponse<()> = serde_json::from_str(
///     r#"{"success":true,"message":"Success","statusCode":200,"error":{"code":5000}}"#,
/// )
/// .unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    success: bool,
    /// Response payload (success only)
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    /// Human-readable summary
    message: String,
    /// HTTP status code of the reply
    status_code: u16,
    /// Pagination metadata (paginated success only)
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<PaginationMeta>,
    /// Error details (failure only)
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody>,
}

/// Error details
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Business code for programmatic handling
    pub code: i32,
    /// Additional context (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Stack or cause chain, only when enabled on the error filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Success envelope. Defaults: "Success", 200.
    pub fn success(
        data: Option<T>,
        message: Option<&str>,
        status_code: Option<u16>,
        meta: Option<PaginationMeta>,
    ) -> Self {
        Self {
            success: true,
            data,
            message: message.unwrap_or(DEFAULT_SUCCESS_MESSAGE).to_string(),
            status_code: status_code.unwrap_or(200),
            meta,
            error: None,
        }
    }

    /// 200 with `data` and the default message
    pub fn ok(data: T) -> Self {
        Self::success(Some(data), None, None, None)
    }

    pub fn created(data: T, message: Option<&str>) -> Self {
        Self::success(
            Some(data),
            Some(message.unwrap_or(DEFAULT_CREATED_MESSAGE)),
            Some(201),
            None,
        )
    }

    pub fn no_content(message: Option<&str>) -> Self {
        Self::success(
            None,
            Some(message.unwrap_or(DEFAULT_NO_CONTENT_MESSAGE)),
            Some(204),
            None,
        )
    }

    /// Error envelope. Defaults: "Error", `INTERNAL_ERROR`, 500.
    pub fn error(
        message: Option<&str>,
        code: Option<i32>,
        status_code: Option<u16>,
        details: Option<Value>,
    ) -> Self {
        Self {
            success: false,
            data: None,
            message: message.unwrap_or(DEFAULT_ERROR_MESSAGE).to_string(),
            status_code: status_code.unwrap_or(500),
            meta: None,
            error: Some(ErrorBody {
                code: code.unwrap_or(BusinessCode::InternalError.value()),
                details,
                stack: None,
            }),
        }
    }

    /// Envelope for a catalog code, using its conventional status and message.
    ///
    /// Success-range codes produce an empty success envelope.
    pub fn from_business_code(
        code: BusinessCode,
        message: Option<&str>,
        details: Option<Value>,
    ) -> Self {
        let message = message.unwrap_or(code.message());
        if business::is_success(code.value()) {
            Self::success(None, Some(message), Some(code.status_code()), None)
        } else {
            Self::error(
                Some(message),
                Some(code.value()),
                Some(code.status_code()),
                details,
            )
        }
    }

    fn pinned(
        status_code: u16,
        code: BusinessCode,
        message: Option<&str>,
        details: Option<Value>,
    ) -> Self {
        let message = message.unwrap_or(http_status::status_message(i32::from(status_code)));
        Self::error(Some(message), Some(code.value()), Some(status_code), details)
    }

    pub fn bad_request(message: Option<&str>, details: Option<Value>) -> Self {
        Self::pinned(400, BusinessCode::InvalidInput, message, details)
    }

    pub fn unauthorized(message: Option<&str>, details: Option<Value>) -> Self {
        Self::pinned(401, BusinessCode::AuthFailed, message, details)
    }

    pub fn forbidden(message: Option<&str>, details: Option<Value>) -> Self {
        Self::pinned(403, BusinessCode::PermissionDenied, message, details)
    }

    pub fn not_found(message: Option<&str>, details: Option<Value>) -> Self {
        Self::pinned(404, BusinessCode::ResourceNotFound, message, details)
    }

    pub fn conflict(message: Option<&str>, details: Option<Value>) -> Self {
        Self::pinned(409, BusinessCode::ResourceConflict, message, details)
    }

    pub fn validation_error(message: Option<&str>, details: Option<Value>) -> Self {
        Self::pinned(422, BusinessCode::ValidationError, message, details)
    }

    pub fn too_many_requests(message: Option<&str>, details: Option<Value>) -> Self {
        Self::pinned(429, BusinessCode::RateLimitExceeded, message, details)
    }

    pub fn internal_error(message: Option<&str>, details: Option<Value>) -> Self {
        Self::pinned(500, BusinessCode::InternalError, message, details)
    }

    /// Attach a stack string to an error envelope before it is sent.
    /// Success envelopes are returned unchanged.
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        if let Some(error) = self.error.as_mut() {
            error.stack = Some(stack.into());
        }
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn meta(&self) -> Option<&PaginationMeta> {
        self.meta.as_ref()
    }

    pub fn error_body(&self) -> Option<&ErrorBody> {
        self.error.as_ref()
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// 200 page of results with derived pagination metadata
    pub fn paginated(data: Vec<T>, page: i64, limit: i64, total: i64) -> Self {
        Self::paginated_with(data, PaginationMeta::new(page, limit, total), None, None)
    }

    /// Paginated envelope with a prebuilt meta (e.g. carrying extra fields)
    pub fn paginated_with(
        data: Vec<T>,
        meta: PaginationMeta,
        message: Option<&str>,
        status_code: Option<u16>,
    ) -> Self {
        Self::success(Some(data), message, status_code, Some(meta))
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Serialization-ready JSON object; absent fields are omitted, never null.
    ///
    /// A payload that fails to serialize yields an internal error object.
    pub fn to_plain_object(&self) -> Value {
        match serde_json::to_value(self) {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to serialize response envelope: {}", e);
                json!({
                    "success": false,
                    "message": "Failed to serialize response",
                    "statusCode": 500,
                    "error": { "code": BusinessCode::InternalError.value() }
                })
            }
        }
    }
}

/// Send `envelope` as JSON with its `statusCode` as the HTTP status.
///
/// A `statusCode` that is not a valid HTTP status is sent as 500, and the body
/// is rewritten to match.
pub fn json_response<T: Serialize>(envelope: &ApiResponse<T>) -> Response {
    let mut body = envelope.to_plain_object();
    let status = body
        .get("statusCode")
        .and_then(Value::as_u64)
        .and_then(|code| u16::try_from(code).ok())
        .and_then(|code| StatusCode::from_u16(code).ok());

    let status = match status {
        Some(status) => status,
        None => {
            warn!(
                "Envelope statusCode {} is not a valid HTTP status, sending 500",
                envelope.status_code
            );
            if let Some(obj) = body.as_object_mut() {
                obj.insert("statusCode".to_string(), json!(500));
            }
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(body)).into_response()
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        json_response(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_defaults() {
        let res = ApiResponse::ok(json!({"id": 1}));
        assert!(res.is_success());
        assert_eq!(res.message(), "Success");
        assert_eq!(res.status_code(), 200);
        assert!(res.error_body().is_none());
        assert!(res.meta().is_none());
    }

    #[test]
    fn test_plain_object_omits_absent_fields() {
        let res: ApiResponse<Value> = ApiResponse::success(None, None, None, None);
        let plain = res.to_plain_object();
        let obj = plain.as_object().unwrap();
        assert!(!obj.contains_key("data"));
        assert!(!obj.contains_key("meta"));
        assert!(!obj.contains_key("error"));
        assert_eq!(plain, json!({"success": true, "message": "Success", "statusCode": 200}));

        // Stable across repeated serialization
        assert_eq!(
            serde_json::to_string(&plain).unwrap(),
            serde_json::to_string(&res.to_plain_object()).unwrap()
        );
    }

    #[test]
    fn test_error_defaults() {
        let res = ErrorResponse::error(None, None, None, None);
        assert!(!res.is_success());
        assert_eq!(res.message(), "Error");
        assert_eq!(res.status_code(), 500);
        assert_eq!(res.error_body().unwrap().code, 5000);
        assert!(res.data().is_none());
    }

    #[test]
    fn test_error_wire_shape() {
        let res = ErrorResponse::error(
            Some("Bad thing"),
            Some(BusinessCode::DatabaseError.value()),
            Some(503),
            Some(json!({"table": "users"})),
        );
        assert_eq!(
            res.to_plain_object(),
            json!({
                "success": false,
                "message": "Bad thing",
                "statusCode": 503,
                "error": { "code": 5001, "details": { "table": "users" } }
            })
        );
    }

    #[test]
    fn test_named_shorthands() {
        let cases: [(ErrorResponse, u16, BusinessCode); 8] = [
            (ErrorResponse::bad_request(None, None), 400, BusinessCode::InvalidInput),
            (ErrorResponse::unauthorized(None, None), 401, BusinessCode::AuthFailed),
            (ErrorResponse::forbidden(None, None), 403, BusinessCode::PermissionDenied),
            (ErrorResponse::not_found(None, None), 404, BusinessCode::ResourceNotFound),
            (ErrorResponse::conflict(None, None), 409, BusinessCode::ResourceConflict),
            (ErrorResponse::validation_error(None, None), 422, BusinessCode::ValidationError),
            (ErrorResponse::too_many_requests(None, None), 429, BusinessCode::RateLimitExceeded),
            (ErrorResponse::internal_error(None, None), 500, BusinessCode::InternalError),
        ];
        for (res, status, code) in cases {
            assert_eq!(res.status_code(), status);
            assert_eq!(res.error_body().unwrap().code, code.value());
            assert!(!res.is_success());
        }
    }

    #[test]
    fn test_bad_request_ignores_message_for_code() {
        let res = ErrorResponse::bad_request(Some("name is required"), None);
        assert_eq!(res.status_code(), 400);
        assert_eq!(res.error_body().unwrap().code, BusinessCode::InvalidInput.value());
        assert_eq!(res.message(), "name is required");
        assert_eq!(ErrorResponse::bad_request(None, None).message(), "Bad Request");
    }

    #[test]
    fn test_created_and_no_content() {
        let created = ApiResponse::created(json!({"id": 9}), None);
        assert_eq!(created.status_code(), 201);
        assert_eq!(created.message(), "Resource created successfully");
        assert!(created.data().is_some());

        let empty = ErrorResponse::no_content(None);
        assert!(empty.is_success());
        assert_eq!(empty.status_code(), 204);
        assert_eq!(empty.message(), "No content");
        assert!(empty.data().is_none());
    }

    #[test]
    fn test_paginated() {
        let res = ApiResponse::paginated(vec![1, 2, 3], 1, 10, 25);
        let meta = res.meta().unwrap();
        assert_eq!(meta.total_pages(), 3);
        assert!(meta.has_next_page());
        assert!(!meta.has_previous_page());
        assert_eq!(res.data().unwrap().len(), 3);

        let plain = res.to_plain_object();
        assert_eq!(plain["meta"]["totalPages"], 3);
        assert_eq!(plain["data"], json!([1, 2, 3]));
    }

    #[test]
    fn test_paginated_with_extra_meta() {
        let meta = PaginationMeta::new(2, 10, 25).with_extra([("sort", json!("name"))]);
        let res = ApiResponse::paginated_with(vec!["a"], meta, Some("Page"), None);
        let plain = res.to_plain_object();
        assert_eq!(plain["message"], "Page");
        assert_eq!(plain["meta"]["sort"], "name");
        assert_eq!(plain["meta"]["hasPreviousPage"], true);
    }

    #[test]
    fn test_with_stack() {
        let res = ErrorResponse::internal_error(None, None).with_stack("at main");
        assert_eq!(res.error_body().unwrap().stack.as_deref(), Some("at main"));
        assert_eq!(res.to_plain_object()["error"]["stack"], "at main");

        let ok = ApiResponse::ok(1).with_stack("ignored");
        assert!(ok.error_body().is_none());
    }

    #[test]
    fn test_from_business_code() {
        let res = ErrorResponse::from_business_code(BusinessCode::UserNotFound, None, None);
        assert_eq!(res.status_code(), 404);
        assert_eq!(res.message(), "User not found");
        assert_eq!(res.error_body().unwrap().code, 2000);

        let done = ErrorResponse::from_business_code(BusinessCode::Created, None, None);
        assert!(done.is_success());
        assert_eq!(done.status_code(), 201);
    }

    async fn read_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_into_response_status() {
        let response = ErrorResponse::not_found(None, None).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_body(response).await["statusCode"], 404);
    }

    #[tokio::test]
    async fn test_invalid_status_sent_as_500_in_header_and_body() {
        let envelope = ErrorResponse::error(None, None, Some(1000), None);
        let response = json_response(&envelope);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_body(response).await;
        assert_eq!(body["statusCode"], 500);
        assert_eq!(body["error"]["code"], 5000);

        let response = envelope.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(read_body(response).await["statusCode"], 500);
    }

    #[tokio::test]
    async fn test_json_response_keeps_envelope() {
        let envelope = ApiResponse::created(json!({"id": 3}), None);
        let response = json_response(&envelope);
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(read_body(response).await, envelope.to_plain_object());
    }
}
