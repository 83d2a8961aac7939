use serde::{Deserialize, Deserializer, Serialize};

/// Page selection as it arrives on the query string (`?page=2&limit=10`).
///
/// Missing, non-numeric or zero values quietly fall back to page 1 with 10 rows, so a mangled
/// query string degrades to the first page instead of a 400.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page", deserialize_with = "lenient_number")]
    pub page: u64,
    #[serde(default = "default_limit", deserialize_with = "lenient_number")]
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: default_page(), limit: default_limit() }
    }
}

impl Pagination {
    pub fn new(page: u64, limit: u64) -> Self {
        Self { page: page.max(1), limit: limit.max(1) }
    }

    /// The number of rows to skip for this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }

    /// Replaces out-of-range values with the defaults. The lenient deserializer leaves `0` behind
    /// as a marker for "could not parse".
    pub fn sanitized(&self) -> Self {
        Self {
            page: if self.page == 0 { default_page() } else { self.page },
            limit: if self.limit == 0 { default_limit() } else { self.limit },
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

fn lenient_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where D: Deserializer<'de> {
    let raw = String::deserialize(deserializer)?;
    Ok(raw.parse::<u64>().ok().filter(|n| *n > 0).unwrap_or(0))
}

/// One page of results plus the bookkeeping a client needs to render a pager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageMeta {
    pub total: u64,
    pub page: u64,
    pub pages: u64,
}

impl<T> PagedResult<T> {
    pub fn new(data: Vec<T>, total: u64, pagination: &Pagination) -> Self {
        let pagination = pagination.sanitized();
        let pages = total.div_ceil(pagination.limit);
        Self { data, meta: PageMeta { total, page: pagination.page, pages } }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_apply() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 10);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn non_numeric_values_fall_back() {
        let p: Pagination = serde_json::from_str(r#"{"page": "abc", "limit": "-3"}"#).unwrap();
        let p = p.sanitized();
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 10);
    }

    #[test]
    fn offsets_step_by_limit() {
        assert_eq!(Pagination::new(1, 10).offset(), 0);
        assert_eq!(Pagination::new(2, 10).offset(), 10);
        assert_eq!(Pagination::new(3, 10).offset(), 20);
    }

    #[test]
    fn page_count_rounds_up() {
        let result = PagedResult::new(vec![0u8; 5], 25, &Pagination::new(1, 10));
        assert_eq!(result.meta.pages, 3);
        let result = PagedResult::<u8>::new(vec![], 30, &Pagination::new(2, 10));
        assert_eq!(result.meta.pages, 3);
        let result = PagedResult::<u8>::new(vec![], 0, &Pagination::new(1, 10));
        assert_eq!(result.meta.pages, 0);
    }
}
