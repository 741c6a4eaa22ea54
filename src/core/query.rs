//! Query parameters, paging and sorting values

use crate::core::error::QueryError;
use crate::core::filter::FilterCriterion;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = QueryError;

    /// Case-insensitive "asc" / "desc"; anything else is rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(QueryError::InvalidSortOrder(s.to_string()))
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("asc"),
            SortOrder::Desc => f.write_str("desc"),
        }
    }
}

/// A validated page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number (starts at 1)
    pub page_number: usize,

    /// Number of items per page (at least 1)
    pub page_size: usize,
}

impl PageRequest {
    /// Validate raw paging input, page size first
    pub fn new(page_number: i64, page_size: i64) -> Result<Self, QueryError> {
        if page_size < 1 {
            return Err(QueryError::InvalidPageSize(page_size));
        }
        if page_number < 1 {
            return Err(QueryError::InvalidPageNumber(page_number));
        }
        Ok(Self {
            page_number: usize::try_from(page_number).unwrap_or(usize::MAX),
            page_size: usize::try_from(page_size).unwrap_or(usize::MAX),
        })
    }

    /// Number of records to skip: `(page_number - 1) * page_size`
    ///
    /// Saturates instead of overflowing; a saturated offset simply yields an
    /// empty page.
    pub fn offset(&self) -> usize {
        (self.page_number - 1).saturating_mul(self.page_size)
    }

    /// Maximum number of records on the page
    pub fn limit(&self) -> usize {
        self.page_size
    }
}

/// Complete input of the query engine
///
/// Values are kept raw (signed page numbers, unparsed sort order) so that
/// the engine can report every invalid input with a distinct error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    /// Criteria combined with logical AND
    pub filters: Vec<FilterCriterion>,

    /// Free-text term matched against the entity's searchable fields
    pub search_term: Option<String>,

    /// Field to sort by; `None` keeps the store's natural order
    pub sort_field: Option<String>,

    /// "asc" or "desc", case-insensitive; only checked when sorting
    pub sort_order: String,

    /// Page number (starts at 1)
    pub page_number: i64,

    /// Number of items per page
    pub page_size: i64,
}

impl Default for QueryRequest {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            search_term: None,
            sort_field: None,
            sort_order: SortOrder::Asc.to_string(),
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryRequest {
    /// A request for one page with no filters, search or sort
    pub fn page(page_number: i64, page_size: i64) -> Self {
        Self {
            page_number,
            page_size,
            ..Self::default()
        }
    }

    /// Add one filter criterion
    pub fn filter(mut self, criterion: FilterCriterion) -> Self {
        self.filters.push(criterion);
        self
    }

    /// Replace the filter list
    pub fn filters(mut self, filters: Vec<FilterCriterion>) -> Self {
        self.filters = filters;
        self
    }

    /// Set the free-text search term
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// Sort by a field in the given direction
    pub fn sort(mut self, field: impl Into<String>, order: impl Into<String>) -> Self {
        self.sort_field = Some(field.into());
        self.sort_order = order.into();
        self
    }
}

const DEFAULT_PAGE_NUMBER: i64 = 1;
const DEFAULT_PAGE_SIZE: i64 = 1;

fn default_page_number() -> i64 {
    DEFAULT_PAGE_NUMBER
}

fn default_sort_order() -> String {
    SortOrder::Asc.to_string()
}

/// Query-string parameters of list endpoints
///
/// # Example
/// ```text
/// GET /students?pageNumber=2&pageSize=10
/// GET /students?sortField=LastName&sortOrder=desc
/// GET /students?searchTerm=smith
/// GET /students?filters=[{"PropertyName":"Age","Operator":"Equal","Value":"25"}]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Page number (starts at 1)
    #[serde(default = "default_page_number")]
    pub page_number: i64,

    /// Number of items per page; falls back to the configured default
    #[serde(default)]
    pub page_size: Option<i64>,

    /// Field to sort by
    #[serde(default)]
    pub sort_field: Option<String>,

    /// "asc" or "desc"
    #[serde(default = "default_sort_order")]
    pub sort_order: String,

    /// Free-text search term
    #[serde(default)]
    pub search_term: String,

    /// Filter criteria as a JSON array
    #[serde(default)]
    pub filters: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: None,
            sort_field: None,
            sort_order: default_sort_order(),
            search_term: String::new(),
            filters: None,
        }
    }
}

impl ListParams {
    /// Convert into an engine request
    ///
    /// Only the filter JSON is decoded here; every other check is left to
    /// the engine so that errors surface in a single place.
    pub fn into_request(self, default_page_size: i64) -> Result<QueryRequest, QueryError> {
        let filters = match self.filters.as_deref() {
            Some(raw) => FilterCriterion::parse_list(raw)?,
            None => Vec::new(),
        };

        Ok(QueryRequest {
            filters,
            search_term: Some(self.search_term).filter(|term| !term.is_empty()),
            sort_field: self.sort_field.filter(|field| !field.is_empty()),
            sort_order: self.sort_order,
            page_number: self.page_number,
            page_size: self.page_size.unwrap_or(default_page_size),
        })
    }
}
