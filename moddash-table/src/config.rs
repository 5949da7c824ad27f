use crate::broken_icons::DEFAULT_BROKEN_ICON_CAPACITY;
use crate::error::TableError;

/// Default row height in pixels.
pub const DEFAULT_ROW_HEIGHT: u32 = 64;

/// Lists with at least this many rows are windowed.
pub const DEFAULT_VIRTUALIZE_THRESHOLD: usize = 100;

/// Table layout and loading configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Fixed row height used for windowing.
    pub row_height: u32,
    /// Extra rows rendered above and below the viewport.
    pub buffer_rows: usize,
    pub virtualize_threshold: usize,
    /// Distance from the end (pixels) at which the next page is requested.
    pub load_more_margin: u32,
    pub broken_icon_capacity: usize,
    /// Viewport height (pixels) known at mount, before the first scroll
    /// event. Zero when unknown.
    pub viewport_height: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            buffer_rows: 5,
            virtualize_threshold: DEFAULT_VIRTUALIZE_THRESHOLD,
            load_more_margin: 200,
            broken_icon_capacity: DEFAULT_BROKEN_ICON_CAPACITY,
            viewport_height: 0,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row_height(mut self, height: u32) -> Self {
        self.row_height = height;
        self
    }

    pub fn with_buffer_rows(mut self, rows: usize) -> Self {
        self.buffer_rows = rows;
        self
    }

    pub fn with_virtualize_threshold(mut self, threshold: usize) -> Self {
        self.virtualize_threshold = threshold;
        self
    }

    pub fn with_load_more_margin(mut self, margin: u32) -> Self {
        self.load_more_margin = margin;
        self
    }

    pub fn with_broken_icon_capacity(mut self, capacity: usize) -> Self {
        self.broken_icon_capacity = capacity;
        self
    }

    pub fn with_viewport_height(mut self, height: u32) -> Self {
        self.viewport_height = height;
        self
    }

    /// Never window, whatever the row count.
    pub fn without_virtualization(mut self) -> Self {
        self.virtualize_threshold = usize::MAX;
        self
    }

    pub fn validate(&self) -> Result<(), TableError> {
        if self.row_height == 0 {
            return Err(TableError::InvalidConfig("row_height must be non-zero".into()));
        }
        Ok(())
    }
}
