//! Page-window computation for the page bar.

/// Number of page buttons shown when the configuration does not say otherwise.
pub const DEFAULT_PAGE_WINDOW: u32 = 5;

/// Computes the contiguous run of page numbers to display around `current`.
///
/// The window is centred on `current` where possible and shifted to stay inside
/// `[1, total]`. An out-of-range `current` is clamped first.
///
/// # Parameters
///
/// * `current` - The page being shown (1-based)
/// * `total` - Total number of pages reported by the service
/// * `max_visible` - Upper bound on the window length
///
/// # Returns
///
/// Ascending page numbers, at most `max_visible` long. Empty when `total` or
/// `max_visible` is zero.
///
/// # Example
///
/// ```
/// use marquee::listing::compute_page_window;
///
/// assert_eq!(compute_page_window(50, 100, 5), vec![48, 49, 50, 51, 52]);
/// assert_eq!(compute_page_window(1, 3, 5), vec![1, 2, 3]);
/// ```
#[must_use]
pub fn compute_page_window(current: u32, total: u32, max_visible: u32) -> Vec<u32> {
    if total == 0 || max_visible == 0 {
        return Vec::new();
    }

    let current = current.clamp(1, total);
    let start = current.saturating_sub(max_visible / 2).max(1);
    let end = start.saturating_add(max_visible - 1).min(total);
    let start = end.saturating_sub(max_visible - 1).max(1);

    (start..=end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centres_on_current_page() {
        assert_eq!(compute_page_window(50, 100, 5), vec![48, 49, 50, 51, 52]);
        assert_eq!(compute_page_window(10, 20, 4), vec![8, 9, 10, 11]);
    }

    #[test]
    fn clamps_to_bounds() {
        assert_eq!(compute_page_window(1, 3, 5), vec![1, 2, 3]);
        assert_eq!(compute_page_window(1, 100, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(compute_page_window(100, 100, 5), vec![96, 97, 98, 99, 100]);
        assert_eq!(compute_page_window(99, 100, 5), vec![96, 97, 98, 99, 100]);
    }

    #[test]
    fn out_of_range_current_is_clamped() {
        assert_eq!(compute_page_window(0, 10, 3), vec![1, 2, 3]);
        assert_eq!(compute_page_window(42, 10, 3), vec![8, 9, 10]);
    }

    #[test]
    fn empty_when_nothing_to_show() {
        assert!(compute_page_window(1, 0, 5).is_empty());
        assert!(compute_page_window(3, 10, 0).is_empty());
    }

    #[test]
    fn single_slot_window_is_current_page() {
        assert_eq!(compute_page_window(7, 10, 1), vec![7]);
    }
}
