//! Query parameters and pagination utilities

use serde::Serialize;
use std::collections::HashMap;
use std::ops::Range;

/// Page size used when the request carries none
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes at or above this value mean "return everything".
///
/// Consumers such as the full monthly settlement export rely on it; it is
/// mapped onto [`ListParams::fetch_all`] while parsing.
pub const FETCH_ALL_THRESHOLD: usize = 1000;

/// Keys consumed by pagination and sorting; everything else is a filter
const RESERVED_KEYS: &[&str] = &["page", "pageSize", "size", "fetchAll", "sort"];

/// Pagination, sorting and filter parameters of a list request
///
/// Built from the raw query string map. Malformed values never fail the
/// request: they fall back to defaults or are ignored.
///
/// # Example
/// ```text
/// GET /api/users?page=2&pageSize=20&categories=shop,florist&search=kim
/// GET /api/settlements?pageSize=1000&status=PENDING
/// GET /api/transactions?sort=amount:desc
/// ```
#[derive(Debug, Clone)]
pub struct ListParams {
    /// Page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub page_size: usize,

    /// Return every filtered item on a single page
    pub fetch_all: bool,

    /// Optional sort order
    pub sort: Option<SortSpec>,

    /// Remaining query parameters, keyed by name
    pub filters: HashMap<String, String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            fetch_all: false,
            sort: None,
            filters: HashMap::new(),
        }
    }
}

impl ListParams {
    /// Parse a raw query map
    pub fn from_query(mut query: HashMap<String, String>) -> Self {
        let page = query
            .get("page")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);

        let page_size = query
            .get("pageSize")
            .or_else(|| query.get("size"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|s| *s >= 1)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let fetch_all = page_size >= FETCH_ALL_THRESHOLD
            || query
                .get("fetchAll")
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));

        let sort = query.get("sort").and_then(|s| SortSpec::parse(s));

        for key in RESERVED_KEYS {
            query.remove(*key);
        }

        Self {
            page,
            page_size,
            fetch_all,
            sort,
            filters: query,
        }
    }

    /// Builder-style filter insertion, mostly for callers composing queries
    pub fn with_filter(mut self, name: &str, value: &str) -> Self {
        self.filters.insert(name.to_string(), value.to_string());
        self
    }

    /// Builder-style page selection
    pub fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page.max(1);
        self.page_size = page_size.max(1);
        self.fetch_all = page_size >= FETCH_ALL_THRESHOLD;
        self
    }

    /// Get an active filter value
    ///
    /// Empty values and the `all` sentinel count as "no filter".
    pub fn filter(&self, name: &str) -> Option<&str> {
        self.filters
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
    }

    /// Index range of the requested page within `total` filtered items
    ///
    /// Out-of-range pages yield an empty range rather than an error.
    pub fn window(&self, total: usize) -> Range<usize> {
        if self.fetch_all {
            return 0..total;
        }
        let start = (self.page - 1).saturating_mul(self.page_size).min(total);
        let end = start.saturating_add(self.page_size).min(total);
        start..end
    }
}

/// Sort field and direction
///
/// # Format
/// - `field:asc` or `field` (ascending)
/// - `field:desc` (descending)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub descending: bool,
}

impl SortSpec {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let (field, direction) = raw.split_once(':').unwrap_or((raw, "asc"));
        let descending = match direction.trim().to_ascii_lowercase().as_str() {
            "asc" => false,
            "desc" => true,
            _ => return None,
        };
        Some(Self {
            field: field.trim().to_string(),
            descending,
        })
    }
}

/// Paginated response structure
///
/// Serializes as `{ data, total, page, pageSize }`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The items of the requested page
    pub data: Vec<T>,

    /// Total number of items after filters, before pagination
    pub total: usize,

    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page; equals `total` for fetch-all requests
    pub page_size: usize,
}

impl<T> Page<T> {
    /// Slice an already filtered sequence according to `params`
    pub fn paginate(filtered: Vec<T>, params: &ListParams) -> Self {
        let total = filtered.len();
        let window = params.window(total);

        let data: Vec<T> = filtered
            .into_iter()
            .skip(window.start)
            .take(window.len())
            .collect();

        Self {
            data,
            total,
            page: params.page,
            page_size: if params.fetch_all {
                total
            } else {
                params.page_size
            },
        }
    }

    /// Number of pages needed to show every item
    pub fn total_pages(&self) -> usize {
        if self.total == 0 || self.page_size == 0 {
            0
        } else {
            self.total.div_ceil(self.page_size)
        }
    }

    /// Transform the items while keeping pagination metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}
