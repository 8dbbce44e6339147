use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Arc;

use crate::codes::BusinessCode;

/// Locale whose tables and sentinel back every other locale
pub const BASE_LOCALE: &str = "en";

const VI_MESSAGES: &[(BusinessCode, &str)] = &[
    (BusinessCode::Success, "Thành công"),
    (BusinessCode::Created, "Tạo thành công"),
    (BusinessCode::Updated, "Cập nhật thành công"),
    (BusinessCode::Deleted, "Xóa thành công"),
    (BusinessCode::AuthFailed, "Xác thực thất bại"),
    (BusinessCode::InvalidToken, "Token không hợp lệ"),
    (BusinessCode::TokenExpired, "Token đã hết hạn"),
    (BusinessCode::PermissionDenied, "Không có quyền truy cập"),
    (BusinessCode::AccountLocked, "Tài khoản đã bị khóa"),
    (BusinessCode::AccountDisabled, "Tài khoản đã bị vô hiệu hóa"),
    (BusinessCode::InvalidCredentials, "Thông tin đăng nhập không chính xác"),
    (BusinessCode::SessionExpired, "Phiên đăng nhập đã hết hạn"),
    (BusinessCode::UserNotFound, "Không tìm thấy người dùng"),
    (BusinessCode::UserAlreadyExists, "Người dùng đã tồn tại"),
    (BusinessCode::EmailAlreadyExists, "Email đã tồn tại"),
    (BusinessCode::InvalidPassword, "Mật khẩu không hợp lệ"),
    (BusinessCode::UserInactive, "Người dùng chưa được kích hoạt"),
    (BusinessCode::ProfileIncomplete, "Hồ sơ người dùng chưa hoàn thiện"),
    (BusinessCode::ValidationError, "Dữ liệu không hợp lệ"),
    (BusinessCode::InvalidInput, "Dữ liệu đầu vào không hợp lệ"),
    (BusinessCode::MissingRequiredField, "Thiếu trường bắt buộc"),
    (BusinessCode::InvalidFormat, "Sai định dạng"),
    (BusinessCode::ValueOutOfRange, "Giá trị nằm ngoài phạm vi cho phép"),
    (BusinessCode::InvalidEmail, "Địa chỉ email không hợp lệ"),
    (BusinessCode::InvalidPhone, "Số điện thoại không hợp lệ"),
    (BusinessCode::InvalidJson, "Nội dung JSON không hợp lệ"),
    (BusinessCode::ResourceNotFound, "Không tìm thấy tài nguyên"),
    (BusinessCode::ResourceAlreadyExists, "Tài nguyên đã tồn tại"),
    (BusinessCode::ResourceConflict, "Xung đột tài nguyên"),
    (BusinessCode::ResourceLocked, "Tài nguyên đang bị khóa"),
    (BusinessCode::ResourceDeleted, "Tài nguyên đã bị xóa"),
    (BusinessCode::InternalError, "Lỗi hệ thống"),
    (BusinessCode::DatabaseError, "Lỗi cơ sở dữ liệu"),
    (BusinessCode::ServiceUnavailable, "Dịch vụ tạm thời không khả dụng"),
    (BusinessCode::Timeout, "Hết thời gian chờ"),
    (BusinessCode::ConfigurationError, "Lỗi cấu hình"),
    (BusinessCode::RateLimitExceeded, "Vượt quá giới hạn yêu cầu"),
    (BusinessCode::ExternalServiceError, "Lỗi dịch vụ bên ngoài"),
    (BusinessCode::PaymentFailed, "Thanh toán thất bại"),
    (BusinessCode::EmailSendFailed, "Gửi email thất bại"),
    (BusinessCode::SmsSendFailed, "Gửi SMS thất bại"),
    (BusinessCode::StorageError, "Lỗi lưu trữ"),
    (BusinessCode::OperationNotAllowed, "Thao tác không được phép"),
    (BusinessCode::InsufficientBalance, "Số dư không đủ"),
    (BusinessCode::QuotaExceeded, "Vượt quá hạn mức"),
    (BusinessCode::InvalidState, "Trạng thái không hợp lệ cho thao tác này"),
    (BusinessCode::DuplicateOperation, "Thao tác bị trùng lặp"),
];

lazy_static! {
    static ref BUILTIN: Arc<MessageCatalog> = Arc::new(
        MessageCatalog::new()
            .with_table(
                BASE_LOCALE,
                BusinessCode::ALL.iter().map(|c| (c.value(), c.message())),
            )
            .with_unknown(BASE_LOCALE, "Unknown error")
            .with_table("vi", VI_MESSAGES.iter().map(|(c, m)| (c.value(), *m)))
            .with_unknown("vi", "Lỗi không xác định")
    );
}

/// Immutable per-locale message tables plus per-locale "unknown" sentinels
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    tables: HashMap<String, HashMap<i32, String>>,
    unknown: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shipped `en` and `vi` tables
    pub fn builtin() -> Arc<MessageCatalog> {
        BUILTIN.clone()
    }

    pub fn with_table<I, S>(mut self, locale: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = (i32, S)>,
        S: Into<String>,
    {
        self.tables
            .entry(normalize_locale(locale))
            .or_default()
            .extend(entries.into_iter().map(|(code, msg)| (code, msg.into())));
        self
    }

    pub fn with_unknown(mut self, locale: &str, message: impl Into<String>) -> Self {
        self.unknown.insert(normalize_locale(locale), message.into());
        self
    }

    pub fn get(&self, locale: &str, code: i32) -> Option<&str> {
        self.tables
            .get(locale)
            .and_then(|table| table.get(&code))
            .map(String::as_str)
    }

    /// Sentinel for unresolvable codes in `locale`, if that locale defines one
    pub fn unknown(&self, locale: &str) -> Option<&str> {
        self.unknown.get(locale).map(String::as_str)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

/// Canonical table key for a caller-supplied locale: `" vi-VN "` becomes `"vi"`
pub fn normalize_locale(locale: &str) -> String {
    locale
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("vi"), "vi");
        assert_eq!(normalize_locale("vi-VN"), "vi");
        assert_eq!(normalize_locale(" EN_us "), "en");
        assert_eq!(normalize_locale(""), "");
    }

    #[test]
    fn test_builtin_tables_cover_catalog() {
        let catalog = MessageCatalog::builtin();
        for code in BusinessCode::ALL {
            assert_eq!(catalog.get("en", code.value()), Some(code.message()));
            assert!(catalog.get("vi", code.value()).is_some(), "vi missing {}", code);
        }
        assert_eq!(catalog.get("vi", 2001), Some("Người dùng đã tồn tại"));
        assert_eq!(catalog.get("fr", 2001), None);
    }

    #[test]
    fn test_unknown_sentinels() {
        let catalog = MessageCatalog::builtin();
        assert_eq!(catalog.unknown("en"), Some("Unknown error"));
        assert_eq!(catalog.unknown("vi"), Some("Lỗi không xác định"));
        assert_eq!(catalog.unknown("de"), None);
    }

    #[test]
    fn test_with_table_merges() {
        let catalog = MessageCatalog::new()
            .with_table("en", [(1, "one")])
            .with_table("EN", [(2, "two")]);
        assert_eq!(catalog.get("en", 1), Some("one"));
        assert_eq!(catalog.get("en", 2), Some("two"));
        assert_eq!(catalog.locales().count(), 1);
    }
}
