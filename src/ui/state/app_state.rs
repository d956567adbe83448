use crate::domain::entities::dataset::{Dataset, FilterSpec, TripRecord};
use crate::usecase::services::page_service::{next_page, PageCursor};

pub struct RoundState {
    pub filter: FilterSpec,
    pub dataset: Dataset,
    page_size: usize,
    cursor: Option<PageCursor>,
}

impl RoundState {
    pub fn new(filter: FilterSpec, dataset: Dataset, page_size: usize) -> Self {
        Self {
            filter,
            dataset,
            page_size,
            cursor: None,
        }
    }

    pub fn position(&self) -> usize {
        self.cursor.map_or(0, |cursor| cursor.position)
    }

    pub fn has_more_rows(&self) -> bool {
        match self.cursor {
            Some(cursor) => !cursor.is_exhausted(&self.dataset),
            None => !self.dataset.is_empty(),
        }
    }

    pub fn next_page(&mut self) -> &[TripRecord] {
        let cursor = self
            .cursor
            .unwrap_or_else(|| PageCursor::new(self.page_size));
        let (rows, next) = next_page(&self.dataset, cursor);
        self.cursor = Some(next);
        rows
    }
}
