use std::num::NonZeroUsize;

/// Slices a collection into 1-based pages of a fixed size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paginator {
    page_size: NonZeroUsize,
}

impl Paginator {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self { page_size }
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// `ceil(total / page_size)`; zero for an empty collection.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size())
    }

    /// Page numbers below 1 count as page 1.
    pub fn clamp_page(page: usize) -> usize {
        page.max(1)
    }

    /// Items of the given page. Pages past the end are empty.
    pub fn page<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        let page = Self::clamp_page(page);
        let start = (page - 1).saturating_mul(self.page_size()).min(items.len());
        let end = start.saturating_add(self.page_size()).min(items.len());
        &items[start..end]
    }

    pub fn has_next(&self, page: usize, total: usize) -> bool {
        Self::clamp_page(page) < self.page_count(total)
    }

    pub fn has_prev(&self, page: usize) -> bool {
        Self::clamp_page(page) > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginator(size: usize) -> Paginator {
        Paginator::new(NonZeroUsize::new(size).unwrap())
    }

    #[test]
    fn page_slices_in_order() {
        let items: Vec<i32> = (1..=12).collect();
        let pages = paginator(5);
        assert_eq!(pages.page(&items, 1), &[1, 2, 3, 4, 5]);
        assert_eq!(pages.page(&items, 2), &[6, 7, 8, 9, 10]);
        assert_eq!(pages.page(&items, 3), &[11, 12]);
    }

    #[test]
    fn page_zero_is_clamped_to_first() {
        let items = vec!['a', 'b', 'c'];
        assert_eq!(paginator(2).page(&items, 0), &['a', 'b']);
    }

    #[test]
    fn page_past_end_is_empty() {
        let items = vec![1, 2, 3];
        assert!(paginator(5).page(&items, 2).is_empty());
        assert!(paginator(5).page(&items, usize::MAX).is_empty());
    }

    #[test]
    fn page_count_rounds_up() {
        let pages = paginator(5);
        assert_eq!(pages.page_count(0), 0);
        assert_eq!(pages.page_count(5), 1);
        assert_eq!(pages.page_count(6), 2);
    }

    #[test]
    fn navigation_bounds() {
        let pages = paginator(5);
        assert!(pages.has_next(1, 6));
        assert!(!pages.has_next(2, 6));
        assert!(!pages.has_next(1, 0));
        assert!(!pages.has_prev(1));
        assert!(!pages.has_prev(0));
        assert!(pages.has_prev(2));
    }
}
