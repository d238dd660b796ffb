use serde::{Deserialize, Serialize};

/// Page envelope returned by every list endpoint.
///
/// `total_count` always reflects the full matching set, not the slice.
/// Derived fields are computed once at construction so the envelope can
/// be serialized as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub page_number: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub total_pages: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, page_number: u64, page_size: u64, total_count: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_count.div_ceil(page_size)
        };
        Self {
            items,
            page_number,
            page_size,
            total_count,
            total_pages,
            has_previous: page_number > 1,
            has_next: page_number < total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let page: PagedResult<i32> = PagedResult::new(vec![], 1, 10, 25);
        assert_eq!(page.total_pages, 3);

        let page: PagedResult<i32> = PagedResult::new(vec![], 1, 10, 30);
        assert_eq!(page.total_pages, 3);

        let page: PagedResult<i32> = PagedResult::new(vec![], 1, 10, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_zero_page_size_yields_zero_pages() {
        let page: PagedResult<i32> = PagedResult::new(vec![], 1, 0, 100);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next);
    }

    #[test]
    fn test_has_previous_and_next() {
        let first: PagedResult<i32> = PagedResult::new(vec![], 1, 10, 25);
        assert!(!first.has_previous);
        assert!(first.has_next);

        let middle: PagedResult<i32> = PagedResult::new(vec![], 2, 10, 25);
        assert!(middle.has_previous);
        assert!(middle.has_next);

        let last: PagedResult<i32> = PagedResult::new(vec![], 3, 10, 25);
        assert!(last.has_previous);
        assert!(!last.has_next);
    }

    #[test]
    fn test_serializes_camel_case() {
        let page = PagedResult::new(vec![1, 2, 3], 1, 10, 3);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["pageNumber"], 1);
        assert_eq!(json["totalCount"], 3);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["hasPrevious"], false);
        assert_eq!(json["hasNext"], false);
    }
}
