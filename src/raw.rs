//! Cursor-based paging over a filtered dataset for raw-record
//! inspection.

use crate::model::{FilteredDataset, TripRecord};

/// Records served per page unless the caller asks otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// One page of raw records, or a report that the cursor ran off the
/// end. Exhaustion is reported explicitly rather than as an empty page.
#[derive(Debug, PartialEq)]
pub enum Page<'a> {
    Records(&'a [TripRecord]),
    Exhausted,
}

/// Holds the caller's cursor into a dataset. Each call to
/// [`next_page`](RawDataPager::next_page) returns the next `page_size`
/// records in original order and advances the cursor.
pub struct RawDataPager<'a> {
    data: &'a FilteredDataset,
    cursor: usize,
    page_size: usize,
}

impl<'a> RawDataPager<'a> {
    pub fn new(data: &'a FilteredDataset) -> Self {
        Self::with_page_size(data, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(data: &'a FilteredDataset, page_size: usize) -> Self {
        Self {
            data,
            cursor: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn next_page(&mut self) -> Page<'a> {
        let records = self.data.records();
        if self.cursor >= records.len() {
            return Page::Exhausted;
        }

        let end = (self.cursor + self.page_size).min(records.len());
        let page = &records[self.cursor..end];
        self.cursor = end;
        Page::Records(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::testutil::{dataset, trip};

    fn seven_trips() -> FilteredDataset {
        dataset(
            (0..7)
                .map(|i| trip(1, 2, 8, &format!("S{}", i), "B", 60))
                .collect(),
        )
    }

    #[test]
    fn test_pages_advance_in_original_order() {
        let data = seven_trips();
        let mut pager = RawDataPager::new(&data);

        match pager.next_page() {
            Page::Records(page) => {
                assert_eq!(page.len(), 5);
                assert_eq!(page[0].start_station, "S0");
                assert_eq!(page[4].start_station, "S4");
            }
            Page::Exhausted => panic!("expected a first page"),
        }

        match pager.next_page() {
            Page::Records(page) => {
                assert_eq!(page.len(), 2);
                assert_eq!(page[0].start_station, "S5");
            }
            Page::Exhausted => panic!("expected a partial second page"),
        }
    }

    #[test]
    fn test_exhaustion_is_reported_not_an_empty_page() {
        let data = seven_trips();
        let mut pager = RawDataPager::new(&data);
        pager.next_page();
        pager.next_page();

        assert_eq!(pager.next_page(), Page::Exhausted);
        // and stays exhausted
        assert_eq!(pager.next_page(), Page::Exhausted);
    }

    #[test]
    fn test_empty_dataset_is_immediately_exhausted() {
        let data = dataset(vec![]);
        let mut pager = RawDataPager::new(&data);
        assert_eq!(pager.next_page(), Page::Exhausted);
    }

    #[test]
    fn test_custom_page_size() {
        let data = seven_trips();
        let mut pager = RawDataPager::with_page_size(&data, 3);

        let sizes: Vec<usize> = std::iter::from_fn(|| match pager.next_page() {
            Page::Records(page) => Some(page.len()),
            Page::Exhausted => None,
        })
        .collect();

        assert_eq!(sizes, vec![3, 3, 1]);
    }
}
