use scraper_core::{page, page_bounds, total_pages, PAGE_SIZE};

fn numbered(n: usize) -> Vec<usize> {
    (1..=n).collect()
}

#[test]
fn first_page_of_45_rows_is_rows_1_to_20() {
    let rows = numbered(45);
    assert_eq!(page(&rows, 20, 1), &numbered(20)[..]);
}

#[test]
fn last_page_of_45_rows_is_rows_41_to_45() {
    let rows = numbered(45);
    assert_eq!(page(&rows, 20, 3), &[41, 42, 43, 44, 45]);
}

#[test]
fn out_of_range_page_is_empty() {
    let rows = numbered(45);
    assert!(page(&rows, 20, 0).is_empty());
    assert!(page(&rows, 20, 4).is_empty());
    assert!(page(&Vec::<usize>::new(), 20, 1).is_empty());
}

#[test]
fn total_pages_rounds_up_and_is_zero_when_empty() {
    assert_eq!(total_pages(0, PAGE_SIZE), 0);
    assert_eq!(total_pages(1, PAGE_SIZE), 1);
    assert_eq!(total_pages(20, PAGE_SIZE), 1);
    assert_eq!(total_pages(21, PAGE_SIZE), 2);
    assert_eq!(total_pages(45, PAGE_SIZE), 3);
}

#[test]
fn page_bounds_are_clipped_to_total() {
    assert_eq!(page_bounds(45, 20, 1), Some((1, 20)));
    assert_eq!(page_bounds(45, 20, 3), Some((41, 45)));
    assert_eq!(page_bounds(45, 20, 4), None);
    assert_eq!(page_bounds(0, 20, 1), None);
}
