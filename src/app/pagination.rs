//! Fixed-size pagination over the filtered list.
//!
//! Pages are 1-based. Every requested page number, however far out of range,
//! is clamped into `1..=total_pages`, and there is always at least one page so
//! an empty list renders as a single empty page rather than "page 0 of 0".

use std::num::NonZeroUsize;

/// One page cut from a slice of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Items on this page, in list order.
    pub page_items: &'a [T],
    /// Number of pages, never less than 1.
    pub total_pages: usize,
    /// The clamped page number actually shown.
    pub current_page: usize,
}

/// Clamps `requested` into `1..=total_pages`.
///
/// `total_pages` of zero is treated as one page.
///
/// # Examples
///
/// ```
/// use newsdesk::app::pagination::clamp_page;
///
/// assert_eq!(clamp_page(5, 3), 3);
/// assert_eq!(clamp_page(-2, 3), 1);
/// assert_eq!(clamp_page(2, 3), 2);
/// ```
#[must_use]
pub fn clamp_page(requested: i64, total_pages: usize) -> usize {
    let total = total_pages.max(1);
    match usize::try_from(requested) {
        Ok(page) => page.clamp(1, total),
        Err(_) => 1,
    }
}

/// Number of pages needed for `len` items, at least one.
#[must_use]
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get()).max(1)
}

/// Cuts the requested page out of `items`.
///
/// # Parameters
///
/// * `items` - The full (already filtered) list
/// * `page_size` - Items per page
/// * `requested` - Requested page number, any value accepted
///
/// # Returns
///
/// The page after clamping `requested`. `page_items` is empty only when
/// `items` is.
#[must_use]
pub fn paginate<T>(items: &[T], page_size: NonZeroUsize, requested: i64) -> Page<'_, T> {
    let total_pages = total_pages(items.len(), page_size);
    let current_page = clamp_page(requested, total_pages);

    let start = (current_page - 1) * page_size.get();
    let end = (start + page_size.get()).min(items.len());

    Page {
        page_items: &items[start.min(items.len())..end],
        total_pages,
        current_page,
    }
}

/// A numbered page button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub number: usize,
    pub is_current: bool,
}

/// Everything the pagination row needs to draw itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageControls {
    pub buttons: Vec<PageButton>,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub current_page: usize,
    pub total_pages: usize,
}

/// Builds the numbered buttons and prev/next state.
///
/// Buttons always cover `1..=min(total_pages, max_visible)`. The window is a
/// fixed head and does not follow the current page, so on page 9 of 12 with
/// seven visible buttons none of them is marked current.
#[must_use]
pub fn page_buttons(total_pages: usize, current_page: usize, max_visible: usize) -> PageControls {
    let total_pages = total_pages.max(1);
    let shown = total_pages.min(max_visible);

    let buttons = (1..=shown)
        .map(|number| PageButton {
            number,
            is_current: number == current_page,
        })
        .collect();

    PageControls {
        buttons,
        prev_enabled: current_page > 1,
        next_enabled: current_page < total_pages,
        current_page,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn out_of_range_request_is_clamped_to_last_page() {
        let items: Vec<u32> = (0..120).collect();

        let page = paginate(&items, size(50), 5);

        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.page_items.len(), 20);
        assert_eq!(page.page_items.first(), Some(&100));
    }

    #[test]
    fn empty_list_is_one_empty_page() {
        let items: Vec<u32> = vec![];

        let page = paginate(&items, size(50), 4);

        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 1);
        assert!(page.page_items.is_empty());
    }

    #[test]
    fn zero_and_negative_requests_go_to_first_page() {
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(paginate(&items, size(3), 0).current_page, 1);
        assert_eq!(paginate(&items, size(3), i64::MIN).page_items, &[0, 1, 2]);
    }

    #[test]
    fn pages_partition_the_list() {
        for len in [0usize, 1, 49, 50, 51, 100, 137] {
            let items: Vec<usize> = (0..len).collect();
            let total = total_pages(len, size(50));

            let mut rebuilt = Vec::new();
            for p in 1..=total {
                let page = paginate(&items, size(50), i64::try_from(p).unwrap());
                assert_eq!(page.current_page, p);
                rebuilt.extend_from_slice(page.page_items);
            }

            assert_eq!(rebuilt, items, "len {len}");
        }
    }

    #[test]
    fn clamp_always_lands_in_range() {
        for total in [0usize, 1, 2, 7] {
            for requested in [-10i64, 0, 1, 3, 100] {
                let page = clamp_page(requested, total);
                assert!(page >= 1 && page <= total.max(1));
            }
        }
    }

    #[test]
    fn buttons_are_a_fixed_head_window() {
        let controls = page_buttons(12, 9, 7);

        let numbers: Vec<usize> = controls.buttons.iter().map(|b| b.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(controls.buttons.iter().all(|b| !b.is_current));
        assert!(controls.prev_enabled);
        assert!(controls.next_enabled);
    }

    #[test]
    fn single_page_disables_both_directions() {
        let controls = page_buttons(1, 1, 7);

        assert_eq!(
            controls.buttons,
            vec![PageButton { number: 1, is_current: true }]
        );
        assert!(!controls.prev_enabled);
        assert!(!controls.next_enabled);
    }
}
