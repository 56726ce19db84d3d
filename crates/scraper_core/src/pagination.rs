//! Page slicing over the result set. Page indices are 1-based.

/// Rows shown per page.
pub const PAGE_SIZE: usize = 20;

/// Number of pages needed for `total_rows`; zero when there are no rows.
pub fn total_pages(total_rows: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_rows.div_ceil(page_size)
}

/// Rows of page `page_index`, in original order.
///
/// Out-of-range indices (including 0) yield an empty slice.
pub fn page<T>(rows: &[T], page_size: usize, page_index: usize) -> &[T] {
    if page_index == 0 || page_size == 0 {
        return &[];
    }
    let start = (page_index - 1).saturating_mul(page_size);
    if start >= rows.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

/// 1-based inclusive bounds of the rows on `page_index`, for the
/// "Showing X to Y of Z" line. `None` when the page is empty.
pub fn page_bounds(total_rows: usize, page_size: usize, page_index: usize) -> Option<(usize, usize)> {
    if page_index == 0 || page_size == 0 {
        return None;
    }
    let start = (page_index - 1).saturating_mul(page_size);
    if start >= total_rows {
        return None;
    }
    let end = start.saturating_add(page_size).min(total_rows);
    Some((start + 1, end))
}
