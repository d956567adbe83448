use crate::domain::entities::dataset::{Dataset, TripRecord};

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub position: usize,
    pub page_size: usize,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageCursor {
    pub fn new(page_size: usize) -> Self {
        Self {
            position: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn is_exhausted(&self, table: &Dataset) -> bool {
        self.position >= table.len()
    }
}

/// Returns the next batch of rows and the cursor advanced past them.
///
/// An exhausted cursor yields an empty batch and comes back unchanged.
pub fn next_page(table: &Dataset, cursor: PageCursor) -> (&[TripRecord], PageCursor) {
    let records = table.records();
    let start = cursor.position.min(records.len());
    let end = start.saturating_add(cursor.page_size).min(records.len());

    let next = PageCursor {
        position: end.max(cursor.position),
        ..cursor
    };
    (&records[start..end], next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_page_size_still_advances() {
        assert_eq!(PageCursor::new(0).page_size, 1);
        assert_eq!(PageCursor::default().page_size, DEFAULT_PAGE_SIZE);
    }
}
