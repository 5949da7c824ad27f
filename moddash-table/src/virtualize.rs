//! Row windowing for long lists.
//!
//! Only rows near the viewport are rendered; two spacers stand in for the
//! rows above and below so the scroll extent matches the full list. Rows
//! have a fixed height.

/// Visible index window `[start, end)` and the spacer sizes around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    pub start: usize,
    pub end: usize,
    pub top_spacer: u64,
    pub bottom_spacer: u64,
}

impl Window {
    /// The window covering every row, without spacers.
    pub fn full(total: usize) -> Self {
        Self {
            start: 0,
            end: total,
            top_spacer: 0,
            bottom_spacer: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }
}

#[derive(Debug, Clone)]
pub struct Virtualizer {
    row_height: u32,
    buffer_rows: usize,
    threshold: usize,
    /// Scroll offset in pixels from the top.
    offset: u64,
    viewport: u32,
}

impl Virtualizer {
    /// `row_height` must be non-zero; `TableConfig::validate` enforces it.
    pub fn new(row_height: u32, buffer_rows: usize, threshold: usize) -> Self {
        Self {
            row_height: row_height.max(1),
            buffer_rows,
            threshold,
            offset: 0,
            viewport: 0,
        }
    }

    pub fn row_height(&self) -> u32 {
        self.row_height
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn viewport(&self) -> u32 {
        self.viewport
    }

    /// Whether a list of `total` rows is windowed.
    pub fn is_active(&self, total: usize) -> bool {
        total >= self.threshold
    }

    /// Records a scroll position. Returns `true` if anything changed.
    pub fn scroll(&mut self, offset: u64, viewport: u32) -> bool {
        let changed = self.offset != offset || self.viewport != viewport;
        self.offset = offset;
        self.viewport = viewport;
        changed
    }

    pub fn content_height(&self, total: usize) -> u64 {
        total as u64 * u64::from(self.row_height)
    }

    /// Computes the window for `total` rows at the current position.
    ///
    /// Below the threshold this is the full list.
    pub fn window(&self, total: usize) -> Window {
        if !self.is_active(total) {
            return Window::full(total);
        }

        let row_height = u64::from(self.row_height);
        let max_offset = self.content_height(total).saturating_sub(u64::from(self.viewport));
        let offset = self.offset.min(max_offset);

        let first = usize::try_from(offset / row_height).unwrap_or(total).min(total);
        let visible = u64::from(self.viewport).div_ceil(row_height);
        let visible = usize::try_from(visible).unwrap_or(total).max(1);

        let start = first.saturating_sub(self.buffer_rows);
        let end = first
            .saturating_add(visible)
            .saturating_add(self.buffer_rows)
            .min(total);

        Window {
            start,
            end,
            top_spacer: start as u64 * row_height,
            bottom_spacer: (total - end) as u64 * row_height,
        }
    }

    /// Pixels between the bottom of the viewport and the end of the content.
    pub fn distance_to_end(&self, total: usize) -> u64 {
        self.content_height(total)
            .saturating_sub(self.offset.saturating_add(u64::from(self.viewport)))
    }
}
