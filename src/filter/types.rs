use serde::{Deserialize, Serialize};

use super::error::FilterError;

/// 1-based page request. Construct through [`Pagination::new`] so both
/// numbers are at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    page: u64,
    size: u64,
}

impl Pagination {
    pub fn new(page: i64, size: i64) -> Result<Self, FilterError> {
        let page = positive(page).ok_or(FilterError::InvalidPage)?;
        let size = positive(size).ok_or(FilterError::InvalidSize)?;
        Ok(Self { page, size })
    }

    /// Parse raw query-string values, as the list endpoints receive them.
    /// `page` is checked completely before `size` is looked at.
    pub fn parse(page: Option<&str>, size: Option<&str>) -> Result<Self, FilterError> {
        let page = page
            .and_then(|p| p.parse::<i64>().ok())
            .and_then(positive)
            .ok_or(FilterError::InvalidPage)?;
        let size = size
            .and_then(|s| s.parse::<i64>().ok())
            .and_then(positive)
            .ok_or(FilterError::InvalidSize)?;
        Ok(Self { page, size })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of records to skip: `(page - 1) * size`, saturating.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.size)
    }

    pub fn limit(&self) -> u64 {
        self.size
    }

    /// Apply skip/limit to an already filtered and sorted list. Skipping past
    /// the end yields an empty list.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        let skip = usize::try_from(self.skip()).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit()).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(limit).collect()
    }
}

fn positive(value: i64) -> Option<u64> {
    u64::try_from(value).ok().filter(|v| *v >= 1)
}

/// Predicates the record store evaluates itself. Results always come back
/// sorted by email ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreQuery {
    All,
    /// Case-insensitive exact suffix match of `"@" + domain` on the email.
    EmailDomain(String),
    /// Exact membership in the roles list.
    Role(String),
    /// Records whose `manager` equals this email.
    Manager(String),
}
