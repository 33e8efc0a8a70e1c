//! Page-number pagination for list endpoints.
//!
//! List endpoints only paginate when the request carries a `page` parameter;
//! without it they return the full collection. [`PageRequest::from_params`]
//! encodes that switch, and [`PaginationMeta::new`] computes the metadata block
//! returned alongside a page of items.

use serde::Serialize;

/// Hard upper bound on `per_page`, regardless of what the client asks for.
pub const MAX_PER_PAGE: i64 = 100;

/// A resolved page request: 1-based page number and a clamped page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    /// Resolve raw `page` / `per_page` query values.
    ///
    /// Returns `None` (unpaginated mode) when `page` is absent or blank. A
    /// `page` that does not parse as an integer is treated as page 1, and
    /// pages below 1 are clamped to 1. `per_page` falls back to
    /// `default_per_page` when absent or unparsable and is clamped to
    /// `1..=MAX_PER_PAGE`.
    pub fn from_params(
        page: Option<&str>,
        per_page: Option<&str>,
        default_per_page: i64,
    ) -> Option<Self> {
        let page = page.map(str::trim).filter(|p| !p.is_empty())?;
        let page = page.parse::<i64>().unwrap_or(1).max(1);

        let per_page = per_page
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(default_per_page)
            .clamp(1, MAX_PER_PAGE);

        Some(Self { page, per_page })
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Maximum number of rows on this page.
    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

/// Metadata block of a paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub per_page: i64,
    #[serde(rename = "total")]
    pub total_count: i64,
    #[serde(rename = "pages")]
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
    pub next_page: Option<i64>,
    pub prev_page: Option<i64>,
}

impl PaginationMeta {
    /// Compute metadata for `request` over a collection of `total_count` rows.
    ///
    /// A page past the end is not an error: it simply has no items, reports
    /// `has_next = false`, and still points `prev_page` one page back.
    pub fn new(request: PageRequest, total_count: i64) -> Self {
        let total_pages = if total_count <= 0 {
            0
        } else {
            (total_count + request.per_page - 1) / request.per_page
        };
        let has_next = request.page < total_pages;
        let has_prev = request.page > 1;

        Self {
            page: request.page,
            per_page: request.per_page,
            total_count: total_count.max(0),
            total_pages,
            has_next,
            has_prev,
            next_page: has_next.then_some(request.page + 1),
            prev_page: has_prev.then_some(request.page - 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(page: i64, per_page: i64) -> PageRequest {
        PageRequest { page, per_page }
    }

    // -- PageRequest::from_params ---------------------------------------------

    #[test]
    fn no_page_param_means_unpaginated() {
        assert_eq!(PageRequest::from_params(None, Some("5"), 10), None);
        assert_eq!(PageRequest::from_params(Some(""), None, 10), None);
    }

    #[test]
    fn uses_endpoint_default_per_page() {
        assert_eq!(PageRequest::from_params(Some("2"), None, 5), Some(req(2, 5)));
    }

    #[test]
    fn per_page_is_capped() {
        assert_eq!(
            PageRequest::from_params(Some("1"), Some("500"), 10),
            Some(req(1, MAX_PER_PAGE))
        );
    }

    #[test]
    fn per_page_floors_at_one() {
        assert_eq!(PageRequest::from_params(Some("1"), Some("0"), 10), Some(req(1, 1)));
        assert_eq!(PageRequest::from_params(Some("1"), Some("-3"), 10), Some(req(1, 1)));
    }

    #[test]
    fn garbage_values_fall_back() {
        assert_eq!(
            PageRequest::from_params(Some("abc"), Some("xyz"), 5),
            Some(req(1, 5))
        );
    }

    #[test]
    fn page_below_one_is_clamped() {
        assert_eq!(PageRequest::from_params(Some("-4"), None, 5), Some(req(1, 5)));
    }

    #[test]
    fn offset_and_limit() {
        let r = req(3, 5);
        assert_eq!(r.offset(), 10);
        assert_eq!(r.limit(), 5);
        assert_eq!(req(1, 10).offset(), 0);
    }

    // -- PaginationMeta::new --------------------------------------------------

    #[test]
    fn middle_page_of_twelve() {
        let meta = PaginationMeta::new(req(2, 5), 12);
        assert_eq!(meta.total_count, 12);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(meta.has_prev);
        assert_eq!(meta.next_page, Some(3));
        assert_eq!(meta.prev_page, Some(1));
    }

    #[test]
    fn first_and_last_pages() {
        let first = PaginationMeta::new(req(1, 5), 12);
        assert!(!first.has_prev);
        assert_eq!(first.prev_page, None);
        assert!(first.has_next);

        let last = PaginationMeta::new(req(3, 5), 12);
        assert!(!last.has_next);
        assert_eq!(last.next_page, None);
        assert!(last.has_prev);
    }

    #[test]
    fn exact_multiple_has_no_partial_page() {
        assert_eq!(PaginationMeta::new(req(1, 5), 10).total_pages, 2);
    }

    #[test]
    fn empty_collection_has_zero_pages() {
        let meta = PaginationMeta::new(req(1, 10), 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
    }

    #[test]
    fn page_past_the_end() {
        let meta = PaginationMeta::new(req(7, 5), 12);
        assert!(!meta.has_next);
        assert_eq!(meta.prev_page, Some(6));
    }

    #[test]
    fn serializes_with_wire_names() {
        let json = serde_json::to_value(PaginationMeta::new(req(2, 5), 12)).unwrap();
        assert_eq!(json["total"], 12);
        assert_eq!(json["pages"], 3);
        assert_eq!(json["next_page"], 3);
        assert!(json.get("total_count").is_none());
    }
}
