//! Page type for paginated query results.

use crate::model::ListedEntity;

/// One page of entities with pagination information.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    records: Vec<ListedEntity>,
    /// Offset of the first record within the full result set.
    offset: usize,
    /// Total matching rows, when the backend reports it.
    total_count: Option<usize>,
    has_more: bool,
}

impl Page {
    pub fn new(records: Vec<ListedEntity>, offset: usize) -> Self {
        Self {
            records,
            offset,
            total_count: None,
            has_more: false,
        }
    }

    pub fn with_total_count(mut self, count: usize) -> Self {
        self.total_count = Some(count);
        self
    }

    pub fn with_has_more(mut self, has_more: bool) -> Self {
        self.has_more = has_more;
        self
    }

    pub fn records(&self) -> &[ListedEntity] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ListedEntity> {
        self.records
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn total_count(&self) -> Option<usize> {
        self.total_count
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}
