//! Row rendering seam.
//!
//! A [`RowRenderer`] projects one record plus the ambient table state into
//! a [`RowView`]. Renderers are pure: they never perform I/O and never
//! call callbacks; clicks come back to the table as events.

use moddash_lib::model::ReviewStatus;

use crate::callbacks::TagAffordances;
use crate::cell::Cell;
use crate::column::Align;
use crate::column::ColumnWidth;
use crate::column::Columns;
use crate::column::Record;
use crate::selection::KeySet;
use crate::selection::SelectionMode;

/// Which workflow the table serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayMode {
    /// Action-focused: review buttons.
    #[default]
    Review,
    /// Tagging-focused: tag badges and editing affordances.
    Category,
}

/// Ambient state handed to the renderer for one row.
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a, K> {
    /// Position in the full row list.
    pub index: usize,
    pub mode: DisplayMode,
    pub selection_mode: SelectionMode,
    pub selection: Option<&'a KeySet<K>>,
    pub highlighted: Option<usize>,
    pub removing: Option<&'a KeySet<K>>,
    /// The record's icon is known to be broken.
    pub icon_broken: bool,
    pub tags: TagAffordances,
}

impl<K: Clone + Eq + std::hash::Hash> RowContext<'_, K> {
    pub fn is_selected(&self, key: &K) -> bool {
        self.selection.is_some_and(|s| s.contains(key))
    }

    pub fn is_removing(&self, key: &K) -> bool {
        self.removing.is_some_and(|s| s.contains(key))
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted == Some(self.index)
    }

    /// The checkbox cell, when selection is enabled.
    pub fn checkbox(&self, key: &K) -> Option<Cell> {
        self.selection_mode.is_enabled().then(|| Cell::Checkbox {
            checked: self.is_selected(key),
        })
    }
}

/// Header for one rendered column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub id: String,
    pub label: String,
    pub align: Align,
    pub width: ColumnWidth,
}

impl Header {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            align: Align::Left,
            width: ColumnWidth::default(),
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn fixed(mut self, width: u16) -> Self {
        self.width = ColumnWidth::Fixed(width);
        self
    }

    pub fn flex(mut self, weight: u16) -> Self {
        self.width = ColumnWidth::Flex(weight);
        self
    }
}

pub const SELECT_COLUMN: &str = "select";

/// One rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView<K> {
    pub key: K,
    pub index: usize,
    /// Cells in header order, tagged with their column id.
    pub cells: Vec<(String, Cell)>,
    pub selected: bool,
    pub highlighted: bool,
    /// Mid-removal; hosts may animate it out.
    pub removing: bool,
}

impl<K> RowView<K> {
    pub fn cell(&self, column: &str) -> Option<&Cell> {
        self.cells.iter().find(|(id, _)| id == column).map(|(_, c)| c)
    }
}

pub trait RowRenderer<R: Record> {
    /// Headers for the given mode and selection setting.
    fn headers(&self, mode: DisplayMode, selection: SelectionMode) -> Vec<Header>;

    fn render(&self, record: &R, ctx: &RowContext<'_, R::Key>) -> RowView<R::Key>;

    /// Whether a click on `action` should reach `on_action`.
    fn action_enabled(&self, _record: &R, _action: &str) -> bool {
        true
    }

    /// Whether `status` is a valid review decision for `record`.
    fn accepts_review(&self, _record: &R, _status: ReviewStatus) -> bool {
        true
    }
}

fn select_header() -> Header {
    Header::new(SELECT_COLUMN, "").fixed(3).align(Align::Center)
}

// =============================================================================
// ColumnRenderer
// =============================================================================

/// Renders any [`Record`] through a validated column set.
pub struct ColumnRenderer<R> {
    columns: Columns<R>,
}

impl<R> Clone for ColumnRenderer<R> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<R> std::fmt::Debug for ColumnRenderer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnRenderer")
            .field("columns", &self.columns)
            .finish()
    }
}

impl<R: Record> ColumnRenderer<R> {
    pub fn new(columns: Columns<R>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &Columns<R> {
        &self.columns
    }
}

impl<R: Record> RowRenderer<R> for ColumnRenderer<R> {
    fn headers(&self, _mode: DisplayMode, selection: SelectionMode) -> Vec<Header> {
        let mut headers = Vec::with_capacity(self.columns.len() + 1);
        if selection.is_enabled() {
            headers.push(select_header());
        }
        headers.extend(self.columns.iter().map(|def| Header {
            id: def.id.clone(),
            label: def.header.clone(),
            align: def.align,
            width: def.width,
        }));
        headers
    }

    fn render(&self, record: &R, ctx: &RowContext<'_, R::Key>) -> RowView<R::Key> {
        let key = record.key();
        let mut cells = Vec::with_capacity(self.columns.len() + 1);
        if let Some(checkbox) = ctx.checkbox(&key) {
            cells.push((SELECT_COLUMN.to_string(), checkbox));
        }
        cells.extend(
            self.columns
                .iter()
                .map(|def| (def.id.clone(), def.render(record, ctx.icon_broken))),
        );

        RowView {
            selected: ctx.is_selected(&key),
            highlighted: ctx.is_highlighted(),
            removing: ctx.is_removing(&key),
            key,
            index: ctx.index,
            cells,
        }
    }

    fn action_enabled(&self, record: &R, action: &str) -> bool {
        self.columns
            .iter()
            .find_map(|def| def.action(action))
            .is_some_and(|def| def.is_enabled(record))
    }
}

pub(crate) fn select_header_for(selection: SelectionMode) -> Option<Header> {
    selection.is_enabled().then(select_header)
}
