//! Pagination primitives
//!
//! Page numbers are 1-based. Query parameters that are present but not
//! integers are rejected; integer values outside the allowed range are
//! clamped (`page >= 1`, `1 <= page_size <= max_page_size`).

use serde::Serialize;
use thiserror::Error;

/// Rejected pagination parameter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageParamError {
    #[error("Query parameter '{field}' must be an integer (got '{value}')")]
    NotAnInteger { field: &'static str, value: String },
}

/// A validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    page_size: u64,
}

impl PageRequest {
    /// Clamp raw integers into a valid request
    pub fn clamped(page: i64, page_size: i64, max_page_size: u64) -> Self {
        let max_page_size = max_page_size.max(1);
        let page = u64::try_from(page).unwrap_or(0).max(1);
        let page_size = u64::try_from(page_size)
            .unwrap_or(0)
            .clamp(1, max_page_size);
        Self { page, page_size }
    }

    /// Build from raw query-string values
    ///
    /// Missing or empty values fall back to page 1 / `default_page_size`.
    pub fn from_query(
        page: Option<&str>,
        page_size: Option<&str>,
        default_page_size: u64,
        max_page_size: u64,
    ) -> Result<Self, PageParamError> {
        let page = parse_param("page", page)?.unwrap_or(1);
        let default_page_size = i64::try_from(default_page_size).unwrap_or(i64::MAX);
        let page_size = parse_param("limit", page_size)?.unwrap_or(default_page_size);
        Ok(Self::clamped(page, page_size, max_page_size))
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of items to skip
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

fn parse_param(field: &'static str, raw: Option<&str>) -> Result<Option<i64>, PageParamError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| PageParamError::NotAnInteger {
                field,
                value: value.to_string(),
            }),
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub current_page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_items: u64, request: PageRequest) -> Self {
        Self {
            items,
            total_items,
            current_page: request.page(),
            page_size: request.page_size(),
            total_pages: total_items.div_ceil(request.page_size()),
        }
    }

    /// Convert the items, keeping the paging metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_items: self.total_items,
            current_page: self.current_page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}
