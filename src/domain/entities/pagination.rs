use serde::{Deserialize, Serialize};

/// Which slice of a listing to fetch, after the requested page number has
/// been clamped against the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub num_pages: u32,
    pub per_page: u32,
    pub total: i64,
}

impl PageWindow {
    /// Non-numeric input selects the first page; a number outside
    /// `1..=num_pages` selects the last one. An empty listing still has one
    /// (empty) page.
    pub fn resolve(raw_page: Option<&str>, total: i64, per_page: u32) -> Self {
        let per_page = per_page.max(1);
        let total = total.max(0);
        let num_pages = u32::try_from((total + i64::from(per_page) - 1) / i64::from(per_page))
            .unwrap_or(u32::MAX)
            .max(1);

        let page = match raw_page.map(str::trim).filter(|p| !p.is_empty()) {
            None => 1,
            Some(raw) => match raw.parse::<i64>() {
                Err(_) => 1,
                Ok(n) if n >= 1 && n <= i64::from(num_pages) => n as u32,
                Ok(_) => num_pages,
            },
        };

        PageWindow { page, num_pages, per_page, total }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per_page)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

/// `?page=` as sent by the client; parsed leniently by [`PageWindow::resolve`].
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub num_pages: u32,
    pub per_page: u32,
    pub total: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, window: PageWindow) -> Self {
        Page {
            items,
            page: window.page,
            num_pages: window.num_pages,
            per_page: window.per_page,
            total: window.total,
            has_next: window.page < window.num_pages,
            has_previous: window.page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_page_means_first_page() {
        assert_eq!(PageWindow::resolve(Some("abc"), 40, 12).page, 1);
        assert_eq!(PageWindow::resolve(None, 40, 12).page, 1);
    }

    #[test]
    fn out_of_range_page_means_last_page() {
        let window = PageWindow::resolve(Some("9"), 40, 12);
        assert_eq!((window.page, window.num_pages), (4, 4));
        assert_eq!(window.offset(), 36);
        assert_eq!(PageWindow::resolve(Some("0"), 40, 12).page, 4);
    }

    #[test]
    fn empty_listing_has_a_single_page() {
        let window = PageWindow::resolve(Some("3"), 0, 12);
        assert_eq!((window.page, window.num_pages, window.offset()), (1, 1, 0));
    }

    #[test]
    fn page_flags_follow_position() {
        let page = Page::new(vec![1, 2], PageWindow::resolve(Some("2"), 30, 12));
        assert!(page.has_next && page.has_previous);
    }
}
