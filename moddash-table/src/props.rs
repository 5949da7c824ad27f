use std::fmt;
use std::sync::Arc;

use crate::callbacks::TableCallbacks;
use crate::column::Record;
use crate::row::DisplayMode;
use crate::selection::KeySet;
use crate::selection::SelectionMode;

/// Shared, immutable row snapshot. A new page means a new `Arc`.
pub type Rows<R> = Arc<[R]>;

/// Everything the caller owns about a table.
///
/// Props are replaced wholesale; see [`can_skip_render`](Self::can_skip_render)
/// for how a new value is compared with the previous one.
pub struct TableProps<R: Record> {
    pub rows: Rows<R>,
    pub loading: bool,
    pub has_more: bool,
    pub error: Option<String>,
    pub mode: DisplayMode,
    pub selection_mode: SelectionMode,
    pub selection: Option<KeySet<R::Key>>,
    /// Rows mid-removal.
    pub removing: Option<KeySet<R::Key>>,
    /// Icons the caller already knows are broken.
    pub broken: Option<KeySet<R::Key>>,
    pub highlighted: Option<usize>,
    pub callbacks: TableCallbacks<R::Key>,
}

impl<R: Record> Clone for TableProps<R> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
            loading: self.loading,
            has_more: self.has_more,
            error: self.error.clone(),
            mode: self.mode,
            selection_mode: self.selection_mode,
            selection: self.selection.clone(),
            removing: self.removing.clone(),
            broken: self.broken.clone(),
            highlighted: self.highlighted,
            callbacks: self.callbacks.clone(),
        }
    }
}

impl<R: Record> fmt::Debug for TableProps<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableProps")
            .field("rows", &self.rows.len())
            .field("loading", &self.loading)
            .field("has_more", &self.has_more)
            .field("error", &self.error)
            .field("mode", &self.mode)
            .field("selection_mode", &self.selection_mode)
            .field("selection", &self.selection.as_ref().map(KeySet::len))
            .field("removing", &self.removing.as_ref().map(KeySet::len))
            .field("broken", &self.broken.as_ref().map(KeySet::len))
            .field("highlighted", &self.highlighted)
            .field("callbacks", &self.callbacks)
            .finish()
    }
}

impl<R: Record> TableProps<R> {
    pub fn new(rows: Rows<R>) -> Self {
        Self {
            rows,
            loading: false,
            has_more: false,
            error: None,
            mode: DisplayMode::default(),
            selection_mode: SelectionMode::None,
            selection: None,
            removing: None,
            broken: None,
            highlighted: None,
            callbacks: TableCallbacks::default(),
        }
    }

    pub fn rows(mut self, rows: Rows<R>) -> Self {
        self.rows = rows;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn has_more(mut self, has_more: bool) -> Self {
        self.has_more = has_more;
        self
    }

    pub fn error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }

    pub fn mode(mut self, mode: DisplayMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enables selection. An unset selection is treated as empty.
    pub fn selectable(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    pub fn selection(mut self, selection: KeySet<R::Key>) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn removing(mut self, removing: KeySet<R::Key>) -> Self {
        self.removing = Some(removing);
        self
    }

    pub fn broken(mut self, broken: KeySet<R::Key>) -> Self {
        self.broken = Some(broken);
        self
    }

    pub fn highlighted(mut self, index: Option<usize>) -> Self {
        self.highlighted = index;
        self
    }

    pub fn callbacks(mut self, callbacks: TableCallbacks<R::Key>) -> Self {
        self.callbacks = callbacks;
        self
    }
}
