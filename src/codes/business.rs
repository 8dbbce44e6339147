use serde::{Deserialize, Serialize};
use std::fmt;

/// Message returned for business codes missing from the catalog
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Application-defined business codes carried in `error.code`
///
/// Values are grouped in ranges of 1000 per category, except success which
/// occupies `[0, 100)`. Serialized as the bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
#[repr(i32)]
pub enum BusinessCode {
    Success = 0,
    Created = 1,
    Updated = 2,
    Deleted = 3,

    AuthFailed = 1000,
    InvalidToken = 1001,
    TokenExpired = 1002,
    PermissionDenied = 1003,
    AccountLocked = 1004,
    AccountDisabled = 1005,
    InvalidCredentials = 1006,
    SessionExpired = 1007,

    UserNotFound = 2000,
    UserAlreadyExists = 2001,
    EmailAlreadyExists = 2002,
    InvalidPassword = 2003,
    UserInactive = 2004,
    ProfileIncomplete = 2005,

    ValidationError = 3000,
    InvalidInput = 3001,
    MissingRequiredField = 3002,
    InvalidFormat = 3003,
    ValueOutOfRange = 3004,
    InvalidEmail = 3005,
    InvalidPhone = 3006,
    InvalidJson = 3007,

    ResourceNotFound = 4000,
    ResourceAlreadyExists = 4001,
    ResourceConflict = 4002,
    ResourceLocked = 4003,
    ResourceDeleted = 4004,

    InternalError = 5000,
    DatabaseError = 5001,
    ServiceUnavailable = 5002,
    Timeout = 5003,
    ConfigurationError = 5004,
    RateLimitExceeded = 5005,

    ExternalServiceError = 6000,
    PaymentFailed = 6001,
    EmailSendFailed = 6002,
    SmsSendFailed = 6003,
    StorageError = 6004,

    OperationNotAllowed = 7000,
    InsufficientBalance = 7001,
    QuotaExceeded = 7002,
    InvalidState = 7003,
    DuplicateOperation = 7004,
}

impl BusinessCode {
    pub const ALL: [BusinessCode; 47] = [
        Self::Success,
        Self::Created,
        Self::Updated,
        Self::Deleted,
        Self::AuthFailed,
        Self::InvalidToken,
        Self::TokenExpired,
        Self::PermissionDenied,
        Self::AccountLocked,
        Self::AccountDisabled,
        Self::InvalidCredentials,
        Self::SessionExpired,
        Self::UserNotFound,
        Self::UserAlreadyExists,
        Self::EmailAlreadyExists,
        Self::InvalidPassword,
        Self::UserInactive,
        Self::ProfileIncomplete,
        Self::ValidationError,
        Self::InvalidInput,
        Self::MissingRequiredField,
        Self::InvalidFormat,
        Self::ValueOutOfRange,
        Self::InvalidEmail,
        Self::InvalidPhone,
        Self::InvalidJson,
        Self::ResourceNotFound,
        Self::ResourceAlreadyExists,
        Self::ResourceConflict,
        Self::ResourceLocked,
        Self::ResourceDeleted,
        Self::InternalError,
        Self::DatabaseError,
        Self::ServiceUnavailable,
        Self::Timeout,
        Self::ConfigurationError,
        Self::RateLimitExceeded,
        Self::ExternalServiceError,
        Self::PaymentFailed,
        Self::EmailSendFailed,
        Self::SmsSendFailed,
        Self::StorageError,
        Self::OperationNotAllowed,
        Self::InsufficientBalance,
        Self::QuotaExceeded,
        Self::InvalidState,
        Self::DuplicateOperation,
    ];

    pub const fn value(self) -> i32 {
        self as i32
    }

    pub fn from_i32(code: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.value() == code)
    }

    /// Constant-style name, e.g. `INVALID_INPUT`
    pub fn name(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Created => "CREATED",
            Self::Updated => "UPDATED",
            Self::Deleted => "DELETED",
            Self::AuthFailed => "AUTH_FAILED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::AccountLocked => "ACCOUNT_LOCKED",
            Self::AccountDisabled => "ACCOUNT_DISABLED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::SessionExpired => "SESSION_EXPIRED",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::UserInactive => "USER_INACTIVE",
            Self::ProfileIncomplete => "PROFILE_INCOMPLETE",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidInput => "INVALID_INPUT",
            Self::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::ValueOutOfRange => "VALUE_OUT_OF_RANGE",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidPhone => "INVALID_PHONE",
            Self::InvalidJson => "INVALID_JSON",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::ResourceAlreadyExists => "RESOURCE_ALREADY_EXISTS",
            Self::ResourceConflict => "RESOURCE_CONFLICT",
            Self::ResourceLocked => "RESOURCE_LOCKED",
            Self::ResourceDeleted => "RESOURCE_DELETED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::Timeout => "TIMEOUT",
            Self::ConfigurationError => "CONFIGURATION_ERROR",
            Self::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            Self::ExternalServiceError => "EXTERNAL_SERVICE_ERROR",
            Self::PaymentFailed => "PAYMENT_FAILED",
            Self::EmailSendFailed => "EMAIL_SEND_FAILED",
            Self::SmsSendFailed => "SMS_SEND_FAILED",
            Self::StorageError => "STORAGE_ERROR",
            Self::OperationNotAllowed => "OPERATION_NOT_ALLOWED",
            Self::InsufficientBalance => "INSUFFICIENT_BALANCE",
            Self::QuotaExceeded => "QUOTA_EXCEEDED",
            Self::InvalidState => "INVALID_STATE",
            Self::DuplicateOperation => "DUPLICATE_OPERATION",
        }
    }

    /// English description
    pub fn message(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Created => "Created successfully",
            Self::Updated => "Updated successfully",
            Self::Deleted => "Deleted successfully",
            Self::AuthFailed => "Authentication failed",
            Self::InvalidToken => "Invalid token",
            Self::TokenExpired => "Token has expired",
            Self::PermissionDenied => "Permission denied",
            Self::AccountLocked => "Account is locked",
            Self::AccountDisabled => "Account is disabled",
            Self::InvalidCredentials => "Invalid credentials",
            Self::SessionExpired => "Session has expired",
            Self::UserNotFound => "User not found",
            Self::UserAlreadyExists => "User already exists",
            Self::EmailAlreadyExists => "Email already exists",
            Self::InvalidPassword => "Invalid password",
            Self::UserInactive => "User is inactive",
            Self::ProfileIncomplete => "User profile is incomplete",
            Self::ValidationError => "Validation error",
            Self::InvalidInput => "Invalid input",
            Self::MissingRequiredField => "Missing required field",
            Self::InvalidFormat => "Invalid format",
            Self::ValueOutOfRange => "Value out of range",
            Self::InvalidEmail => "Invalid email address",
            Self::InvalidPhone => "Invalid phone number",
            Self::InvalidJson => "Invalid JSON body",
            Self::ResourceNotFound => "Resource not found",
            Self::ResourceAlreadyExists => "Resource already exists",
            Self::ResourceConflict => "Resource conflict",
            Self::ResourceLocked => "Resource is locked",
            Self::ResourceDeleted => "Resource has been deleted",
            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ServiceUnavailable => "Service unavailable",
            Self::Timeout => "Request timed out",
            Self::ConfigurationError => "Configuration error",
            Self::RateLimitExceeded => "Rate limit exceeded",
            Self::ExternalServiceError => "External service error",
            Self::PaymentFailed => "Payment failed",
            Self::EmailSendFailed => "Failed to send email",
            Self::SmsSendFailed => "Failed to send SMS",
            Self::StorageError => "Storage error",
            Self::OperationNotAllowed => "Operation not allowed",
            Self::InsufficientBalance => "Insufficient balance",
            Self::QuotaExceeded => "Quota exceeded",
            Self::InvalidState => "Invalid state for this operation",
            Self::DuplicateOperation => "Duplicate operation",
        }
    }

    /// HTTP status conventionally paired with this code
    pub fn status_code(self) -> u16 {
        match self {
            Self::Success | Self::Updated | Self::Deleted => 200,
            Self::Created => 201,
            Self::AuthFailed
            | Self::InvalidToken
            | Self::TokenExpired
            | Self::InvalidCredentials
            | Self::SessionExpired => 401,
            Self::PermissionDenied | Self::AccountLocked | Self::AccountDisabled => 403,
            Self::UserNotFound | Self::ResourceNotFound | Self::ResourceDeleted => 404,
            Self::UserAlreadyExists
            | Self::EmailAlreadyExists
            | Self::ResourceAlreadyExists
            | Self::ResourceConflict
            | Self::DuplicateOperation => 409,
            Self::ResourceLocked => 423,
            Self::ValidationError => 422,
            Self::InvalidPassword
            | Self::UserInactive
            | Self::ProfileIncomplete
            | Self::InvalidInput
            | Self::MissingRequiredField
            | Self::InvalidFormat
            | Self::ValueOutOfRange
            | Self::InvalidEmail
            | Self::InvalidPhone
            | Self::InvalidJson
            | Self::OperationNotAllowed
            | Self::InsufficientBalance
            | Self::InvalidState => 400,
            Self::RateLimitExceeded | Self::QuotaExceeded => 429,
            Self::InternalError | Self::DatabaseError | Self::ConfigurationError => 500,
            Self::ServiceUnavailable => 503,
            Self::Timeout => 504,
            Self::ExternalServiceError
            | Self::PaymentFailed
            | Self::EmailSendFailed
            | Self::SmsSendFailed
            | Self::StorageError => 502,
        }
    }

    pub fn category(self) -> BusinessCategory {
        // Every catalog entry lies inside a range
        BusinessCategory::of(self.value()).unwrap_or(BusinessCategory::System)
    }
}

impl fmt::Display for BusinessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<BusinessCode> for i32 {
    fn from(code: BusinessCode) -> Self {
        code.value()
    }
}

impl TryFrom<i32> for BusinessCode {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_i32(code).ok_or_else(|| format!("unknown business code {}", code))
    }
}

/// The eight business code ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessCategory {
    Success,
    Auth,
    User,
    Validation,
    Resource,
    System,
    External,
    BusinessLogic,
}

impl BusinessCategory {
    /// Classify a raw code by range. `None` outside every range.
    pub fn of(code: i32) -> Option<Self> {
        match code {
            0..=99 => Some(Self::Success),
            1000..=1999 => Some(Self::Auth),
            2000..=2999 => Some(Self::User),
            3000..=3999 => Some(Self::Validation),
            4000..=4999 => Some(Self::Resource),
            5000..=5999 => Some(Self::System),
            6000..=6999 => Some(Self::External),
            7000..=7999 => Some(Self::BusinessLogic),
            _ => None,
        }
    }
}

/// English description for any business code; [`UNKNOWN_ERROR`] when unregistered
pub fn business_message(code: i32) -> &'static str {
    BusinessCode::from_i32(code)
        .map(BusinessCode::message)
        .unwrap_or(UNKNOWN_ERROR)
}

pub fn is_success(code: i32) -> bool {
    (0..100).contains(&code)
}

pub fn is_auth_error(code: i32) -> bool {
    (1000..2000).contains(&code)
}

pub fn is_user_error(code: i32) -> bool {
    (2000..3000).contains(&code)
}

pub fn is_validation_error(code: i32) -> bool {
    (3000..4000).contains(&code)
}

pub fn is_resource_error(code: i32) -> bool {
    (4000..5000).contains(&code)
}

pub fn is_system_error(code: i32) -> bool {
    (5000..6000).contains(&code)
}

pub fn is_external_error(code: i32) -> bool {
    (6000..7000).contains(&code)
}

pub fn is_business_logic_error(code: i32) -> bool {
    (7000..8000).contains(&code)
}
