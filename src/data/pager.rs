/// Products shown per page.
pub const PAGE_SIZE: usize = 6;

/// `ceil(len / page_size)`; zero for an empty sequence.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Clamp a 1-based page number into `[1, total_pages]` (1 when there are no
/// pages at all).
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Elements `(page-1)*page_size .. page*page_size` of `items`, cut to the
/// available length. Out-of-range pages yield an empty slice.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = page.saturating_mul(page_size).min(items.len());
    &items[start..end]
}

/// One entry of a page control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Page numbers to display for `current` out of `total` pages.
///
/// The first and last pages and the neighbours of the current page are
/// always listed. A hole of a single page is filled with that page number;
/// a hole of two or more pages collapses into one [`PageItem::Ellipsis`].
pub fn page_items(current: usize, total: usize) -> Vec<PageItem> {
    if total == 0 {
        return Vec::new();
    }
    let current = clamp_page(current, total);

    let mut shown: Vec<usize> = vec![1, current.saturating_sub(1), current, current + 1, total];
    shown.retain(|&p| p >= 1 && p <= total);
    shown.sort_unstable();
    shown.dedup();

    let mut items = Vec::with_capacity(shown.len() + 2);
    let mut prev = 0;
    for page in shown {
        match page - prev {
            1 => {}
            2 => items.push(PageItem::Page(prev + 1)),
            _ => items.push(PageItem::Ellipsis),
        }
        items.push(PageItem::Page(page));
        prev = page;
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Ellipsis, Page};

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, PAGE_SIZE), 0);
        assert_eq!(total_pages(1, PAGE_SIZE), 1);
        assert_eq!(total_pages(6, PAGE_SIZE), 1);
        assert_eq!(total_pages(7, PAGE_SIZE), 2);
        assert_eq!(total_pages(13, PAGE_SIZE), 3);
    }

    #[test]
    fn slices_are_clamped() {
        let items: Vec<u32> = (0..14).collect();
        assert_eq!(page_slice(&items, 1, PAGE_SIZE), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(page_slice(&items, 3, PAGE_SIZE), &[12, 13]);
        assert!(page_slice(&items, 4, PAGE_SIZE).is_empty());
        assert!(page_slice::<u32>(&[], 1, PAGE_SIZE).is_empty());
        assert_eq!(page_slice(&items, 0, PAGE_SIZE), page_slice(&items, 1, PAGE_SIZE));
    }

    #[test]
    fn pages_concatenate_to_the_whole_sequence() {
        for len in [0usize, 1, 5, 6, 7, 12, 13, 40] {
            let items: Vec<usize> = (0..len).collect();
            let pages = total_pages(len, PAGE_SIZE);
            let joined: Vec<usize> = (1..=pages)
                .flat_map(|p| page_slice(&items, p, PAGE_SIZE).iter().copied())
                .collect();
            assert_eq!(joined, items, "len {len}");
        }
    }

    #[test]
    fn clamp_keeps_page_in_range() {
        assert_eq!(clamp_page(0, 5), 1);
        assert_eq!(clamp_page(9, 5), 5);
        assert_eq!(clamp_page(3, 5), 3);
        assert_eq!(clamp_page(4, 0), 1);
    }

    #[test]
    fn small_page_counts_list_every_page() {
        assert!(page_items(1, 0).is_empty());
        assert_eq!(page_items(1, 1), [Page(1)]);
        assert_eq!(page_items(2, 3), [Page(1), Page(2), Page(3)]);
    }

    #[test]
    fn wide_gaps_collapse_to_one_ellipsis() {
        assert_eq!(page_items(1, 10), [Page(1), Page(2), Ellipsis, Page(10)]);
        assert_eq!(
            page_items(5, 10),
            [Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
        assert_eq!(page_items(10, 10), [Page(1), Ellipsis, Page(9), Page(10)]);
    }

    #[test]
    fn single_page_gap_shows_the_page() {
        assert_eq!(
            page_items(4, 10),
            [Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn first_and_last_always_present() {
        for total in 1..=12 {
            for current in 1..=total {
                let items = page_items(current, total);
                assert_eq!(items.first(), Some(&Page(1)));
                assert_eq!(items.last(), Some(&Page(total)));
                assert!(items.contains(&Page(current)));
            }
        }
    }
}
