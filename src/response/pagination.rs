use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use utoipa::ToSchema;

const COMPUTED_KEYS: [&str; 6] = [
    "page",
    "limit",
    "total",
    "totalPages",
    "hasNextPage",
    "hasPreviousPage",
];

/// Pagination metadata attached to paginated success responses
///
/// `total_pages` and both flags are always derived from `(page, limit, total)`.
/// Only [`PaginationMeta::new`] and [`PaginationMeta::with_extra`] build values:
///
/// ```compile_fail
/// let mut meta = api_conventions::PaginationMeta::new(1, 10, 25);
/// meta.has_next_page = false;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    page: i64,
    /// Number of results per page
    limit: i64,
    /// Total number of results across all pages
    total: i64,
    /// Total number of pages
    total_pages: i64,
    /// Whether a page follows this one
    has_next_page: bool,
    /// Whether a page precedes this one
    has_previous_page: bool,
    /// Caller-supplied fields emitted next to the computed ones
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl PaginationMeta {
    /// Derive pagination fields.
    ///
    /// A `limit` below 1 is treated as 1. A non-positive `total` yields zero
    /// pages. `page` is kept as given.
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let limit = limit.max(1);
        let total_pages = if total <= 0 {
            0
        } else {
            total / limit + i64::from(total % limit != 0)
        };

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
            extra: BTreeMap::new(),
        }
    }

    /// Attach extra fields. Keys that collide with computed fields are dropped.
    pub fn with_extra<I, K>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.extra.extend(
            extra
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .filter(|(k, _)| !COMPUTED_KEYS.contains(&k.as_str())),
        );
        self
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn total_pages(&self) -> i64 {
        self.total_pages
    }

    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    pub fn has_previous_page(&self) -> bool {
        self.has_previous_page
    }

    /// Extra fields, never keyed by a computed field name
    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }
}
