use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_PAGE: u64 = 12;
pub const MAX_PER_PAGE: u64 = 100;

/// 1-based page window for LIMIT/OFFSET queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    per_page: u64,
}

impl PageRequest {
    /// A missing or zero page is the first page; `per_page` is clamped to
    /// `1..=MAX_PER_PAGE`.
    pub fn new(page: Option<u64>, per_page: u64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn page(&self) -> u64 { self.page }

    pub fn per_page(&self) -> u64 { self.per_page }

    pub fn limit(&self) -> i64 { self.per_page as i64 }

    /// Saturates at `i64::MAX`; a page past the end simply comes back empty.
    pub fn offset(&self) -> i64 {
        let offset = self.page.saturating_sub(1).saturating_mul(self.per_page);
        i64::try_from(offset).unwrap_or(i64::MAX)
    }
}

impl Default for PageRequest {
    fn default() -> Self { Self::new(None, DEFAULT_PER_PAGE) }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub current_page: u64,
    pub per_page: u64,
    pub total: u64,
    pub last_page: u64,
    pub from: Option<u64>,
    pub to: Option<u64>,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        let last_page = total.div_ceil(request.per_page()).max(1);
        let (from, to) = if data.is_empty() {
            (None, None)
        }
        else {
            let first = request.offset() as u64 + 1;
            (Some(first), Some(first + data.len() as u64 - 1))
        };

        Self {
            data,
            current_page: request.page(),
            per_page: request.per_page(),
            total,
            last_page,
            from,
            to,
        }
    }

    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            current_page: self.current_page,
            per_page: self.per_page,
            total: self.total,
            last_page: self.last_page,
            from: self.from,
            to: self.to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_defaults_and_clamps() {
        assert_eq!(PageRequest::new(None, 12).page(), 1);
        assert_eq!(PageRequest::new(Some(0), 12).page(), 1);
        assert_eq!(PageRequest::new(Some(2), 500).per_page(), MAX_PER_PAGE);
        assert_eq!(PageRequest::new(Some(2), 0).per_page(), 1);
    }

    #[test]
    fn test_offset_and_limit() {
        let request = PageRequest::new(Some(3), 12);
        assert_eq!(request.limit(), 12);
        assert_eq!(request.offset(), 24);
    }

    #[test]
    fn test_huge_page_offset_saturates() {
        let request = PageRequest::new(Some(1_000_000_000_000_000_000), 12);
        assert_eq!(request.offset(), i64::MAX);

        let request = PageRequest::new(Some(u64::MAX), MAX_PER_PAGE);
        assert_eq!(request.offset(), i64::MAX);

        let page: Paginated<u8> = Paginated::new(vec![], request, 3);
        assert_eq!(page.current_page, u64::MAX);
        assert_eq!(page.from, None);
    }

    #[test]
    fn test_paginated_metadata() {
        let page = Paginated::new(vec!["a", "b"], PageRequest::new(Some(2), 2), 5);

        assert_eq!(page.current_page, 2);
        assert_eq!(page.last_page, 3);
        assert_eq!(page.from, Some(3));
        assert_eq!(page.to, Some(4));
    }

    #[test]
    fn test_empty_page_has_no_range() {
        let page: Paginated<u8> = Paginated::new(vec![], PageRequest::default(), 0);

        assert_eq!(page.last_page, 1);
        assert_eq!(page.from, None);
        assert_eq!(page.to, None);
        assert_eq!(page.per_page, DEFAULT_PER_PAGE);
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = Paginated::new(vec![1, 2, 3], PageRequest::new(Some(1), 3), 7)
            .map(|n| n * 10);

        assert_eq!(page.data, vec![10, 20, 30]);
        assert_eq!(page.total, 7);
        assert_eq!(page.last_page, 3);
    }
}
