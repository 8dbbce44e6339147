/// Description returned for status codes missing from the table
pub const UNKNOWN_STATUS: &str = "Unknown Status";

pub const CONTINUE: i32 = 100;
pub const SWITCHING_PROTOCOLS: i32 = 101;
pub const PROCESSING: i32 = 102;
pub const EARLY_HINTS: i32 = 103;

pub const OK: i32 = 200;
pub const CREATED: i32 = 201;
pub const ACCEPTED: i32 = 202;
pub const NON_AUTHORITATIVE_INFORMATION: i32 = 203;
pub const NO_CONTENT: i32 = 204;
pub const RESET_CONTENT: i32 = 205;
pub const PARTIAL_CONTENT: i32 = 206;

pub const MULTIPLE_CHOICES: i32 = 300;
pub const MOVED_PERMANENTLY: i32 = 301;
pub const FOUND: i32 = 302;
pub const SEE_OTHER: i32 = 303;
pub const NOT_MODIFIED: i32 = 304;
pub const TEMPORARY_REDIRECT: i32 = 307;
pub const PERMANENT_REDIRECT: i32 = 308;

pub const BAD_REQUEST: i32 = 400;
pub const UNAUTHORIZED: i32 = 401;
pub const PAYMENT_REQUIRED: i32 = 402;
pub const FORBIDDEN: i32 = 403;
pub const NOT_FOUND: i32 = 404;
pub const METHOD_NOT_ALLOWED: i32 = 405;
pub const NOT_ACCEPTABLE: i32 = 406;
pub const REQUEST_TIMEOUT: i32 = 408;
pub const CONFLICT: i32 = 409;
pub const GONE: i32 = 410;
pub const LENGTH_REQUIRED: i32 = 411;
pub const PRECONDITION_FAILED: i32 = 412;
pub const PAYLOAD_TOO_LARGE: i32 = 413;
pub const URI_TOO_LONG: i32 = 414;
pub const UNSUPPORTED_MEDIA_TYPE: i32 = 415;
pub const UNPROCESSABLE_ENTITY: i32 = 422;
pub const LOCKED: i32 = 423;
pub const TOO_MANY_REQUESTS: i32 = 429;

pub const INTERNAL_SERVER_ERROR: i32 = 500;
pub const NOT_IMPLEMENTED: i32 = 501;
pub const BAD_GATEWAY: i32 = 502;
pub const SERVICE_UNAVAILABLE: i32 = 503;
pub const GATEWAY_TIMEOUT: i32 = 504;
pub const HTTP_VERSION_NOT_SUPPORTED: i32 = 505;

/// English description for an HTTP status code.
///
/// Accepts any integer; codes missing from the table yield [`UNKNOWN_STATUS`].
pub fn status_message(code: i32) -> &'static str {
    match code {
        CONTINUE => "Continue",
        SWITCHING_PROTOCOLS => "Switching Protocols",
        PROCESSING => "Processing",
        EARLY_HINTS => "Early Hints",
        OK => "OK",
        CREATED => "Created",
        ACCEPTED => "Accepted",
        NON_AUTHORITATIVE_INFORMATION => "Non-Authoritative Information",
        NO_CONTENT => "No Content",
        RESET_CONTENT => "Reset Content",
        PARTIAL_CONTENT => "Partial Content",
        MULTIPLE_CHOICES => "Multiple Choices",
        MOVED_PERMANENTLY => "Moved Permanently",
        FOUND => "Found",
        SEE_OTHER => "See Other",
        NOT_MODIFIED => "Not Modified",
        TEMPORARY_REDIRECT => "Temporary Redirect",
        PERMANENT_REDIRECT => "Permanent Redirect",
        BAD_REQUEST => "Bad Request",
        UNAUTHORIZED => "Unauthorized",
        PAYMENT_REQUIRED => "Payment Required",
        FORBIDDEN => "Forbidden",
        NOT_FOUND => "Not Found",
        METHOD_NOT_ALLOWED => "Method Not Allowed",
        NOT_ACCEPTABLE => "Not Acceptable",
        REQUEST_TIMEOUT => "Request Timeout",
        CONFLICT => "Conflict",
        GONE => "Gone",
        LENGTH_REQUIRED => "Length Required",
        PRECONDITION_FAILED => "Precondition Failed",
        PAYLOAD_TOO_LARGE => "Payload Too Large",
        URI_TOO_LONG => "URI Too Long",
        UNSUPPORTED_MEDIA_TYPE => "Unsupported Media Type",
        UNPROCESSABLE_ENTITY => "Unprocessable Entity",
        LOCKED => "Locked",
        TOO_MANY_REQUESTS => "Too Many Requests",
        INTERNAL_SERVER_ERROR => "Internal Server Error",
        NOT_IMPLEMENTED => "Not Implemented",
        BAD_GATEWAY => "Bad Gateway",
        SERVICE_UNAVAILABLE => "Service Unavailable",
        GATEWAY_TIMEOUT => "Gateway Timeout",
        HTTP_VERSION_NOT_SUPPORTED => "HTTP Version Not Supported",
        _ => UNKNOWN_STATUS,
    }
}

pub fn is_informational(code: i32) -> bool {
    (100..200).contains(&code)
}

/// 2xx range. Named apart from [`super::business::is_success`].
pub fn is_success_status(code: i32) -> bool {
    (200..300).contains(&code)
}

pub fn is_redirect(code: i32) -> bool {
    (300..400).contains(&code)
}

pub fn is_client_error(code: i32) -> bool {
    (400..500).contains(&code)
}

pub fn is_server_error(code: i32) -> bool {
    (500..600).contains(&code)
}
