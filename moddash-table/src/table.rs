//! The table engine.
//!
//! [`Table`] owns the per-table state the caller should not have to manage:
//! the last view, the broken-icon cache, the infinite-scroll phase and the
//! scroll window. Everything else arrives as [`TableProps`].
//!
//! # Example
//!
//! ```
//! use moddash_lib::model::{ListedEntity, Platform};
//! use moddash_table::prelude::*;
//!
//! let rows: Rows<ListedEntity> = vec![ListedEntity::new(1, Platform::Reddit, "rust")].into();
//! let mut table = Table::new(EntityRenderer::new(), TableConfig::default(), TableProps::new(rows))?;
//!
//! let view = table.view();
//! assert_eq!(view.rows.len(), 1);
//! assert_eq!(view.status, TableStatus::Ready);
//! # Ok::<(), TableError>(())
//! ```

use std::collections::HashMap;

use moddash_lib::model::ReviewStatus;

use crate::broken_icons::SharedBrokenIcons;
use crate::callbacks::Callback;
use crate::column::Record;
use crate::compare::same_rows;
use crate::config::TableConfig;
use crate::error::TableError;
use crate::props::Rows;
use crate::props::TableProps;
use crate::row::Header;
use crate::row::RowContext;
use crate::row::RowRenderer;
use crate::row::RowView;
use crate::scroll::InfiniteScroll;
use crate::scroll::ScrollPhase;
use crate::selection::KeySet;
use crate::virtualize::Virtualizer;
use crate::virtualize::Window;

// =============================================================================
// Events and views
// =============================================================================

/// User interaction reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent<K> {
    /// Checkbox clicked.
    ToggleSelect(K),
    /// Review button clicked.
    Review(K, ReviewStatus),
    /// Apply a status to every selected row.
    BulkReview(ReviewStatus),
    AddTag(K, String),
    RemoveTag(K, String),
    EditTag { key: K, from: String, to: String },
    /// The row's icon failed to load.
    IconFailed(K),
    Action { key: K, action: String },
    /// The sentinel after the last row is `distance` pixels below the viewport.
    SentinelVisible { distance: u32 },
    Scrolled { offset: u64, viewport: u32 },
    /// Keyboard highlight moved.
    Highlight(Option<usize>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableStatus {
    Ready,
    /// First page in flight, nothing to show yet.
    Loading,
    Empty,
    Error(String),
}

/// Headless view of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<K> {
    pub status: TableStatus,
    pub headers: Vec<Header>,
    /// Rendered rows; only the window when virtualized.
    pub rows: Vec<RowView<K>>,
    pub top_spacer: u64,
    pub bottom_spacer: u64,
    /// Render the infinite-scroll sentinel after the last row.
    pub sentinel: bool,
    /// A further page is loading below existing rows.
    pub loading_more: bool,
    pub virtualized: bool,
    pub total_rows: usize,
}

impl<K> TableView<K> {
    pub fn row(&self, index: usize) -> Option<&RowView<K>> {
        self.rows.iter().find(|r| r.index == index)
    }
}

// =============================================================================
// Table
// =============================================================================

pub struct Table<R: Record, V> {
    renderer: V,
    config: TableConfig,
    props: TableProps<R>,
    index: HashMap<R::Key, usize>,
    broken: SharedBrokenIcons<R::Key>,
    scroll: InfiniteScroll,
    virtualizer: Virtualizer,
    view: Option<TableView<R::Key>>,
    renders: usize,
}

impl<R: Record, V: RowRenderer<R>> Table<R, V> {
    pub fn new(renderer: V, config: TableConfig, props: TableProps<R>) -> Result<Self, TableError> {
        config.validate()?;
        let index = build_index(&props.rows)?;

        let mut scroll = InfiniteScroll::new(config.load_more_margin);
        scroll.observe(props.loading, props.has_more);

        let mut virtualizer = Virtualizer::new(
            config.row_height,
            config.buffer_rows,
            config.virtualize_threshold,
        );
        virtualizer.scroll(0, config.viewport_height);

        Ok(Self {
            broken: SharedBrokenIcons::new(config.broken_icon_capacity),
            virtualizer,
            renderer,
            config,
            props,
            index,
            scroll,
            view: None,
            renders: 0,
        })
    }

    /// Shares a broken-icon cache with other tables.
    pub fn with_broken_icons(mut self, broken: SharedBrokenIcons<R::Key>) -> Self {
        self.broken = broken;
        self.view = None;
        self
    }

    pub fn props(&self) -> &TableProps<R> {
        &self.props
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn renderer(&self) -> &V {
        &self.renderer
    }

    pub fn broken_icons(&self) -> &SharedBrokenIcons<R::Key> {
        &self.broken
    }

    pub fn scroll_phase(&self) -> ScrollPhase {
        self.scroll.phase()
    }

    /// Number of times a view has been built.
    pub fn render_count(&self) -> usize {
        self.renders
    }

    pub fn is_virtualized(&self) -> bool {
        self.virtualizer.is_active(self.props.rows.len())
    }

    pub fn window(&self) -> Window {
        self.virtualizer.window(self.props.rows.len())
    }

    /// Replaces the props. Returns `true` if the view must be rebuilt.
    ///
    /// Props with an `error` and `loading == false` end any outstanding
    /// load-more request, so a failed page can be retried from the sentinel.
    ///
    /// On error the previous props stay in place.
    pub fn set_props(&mut self, next: TableProps<R>) -> Result<bool, TableError> {
        if next.error.is_some() && !next.loading {
            self.scroll.fail();
        }

        if self.props.can_skip_render(&next) {
            self.props = next;
            return Ok(false);
        }

        if !same_rows(&self.props.rows, &next.rows) {
            self.index = build_index(&next.rows)?;
            // A new snapshot is the completion of any outstanding page.
            self.scroll.finish();
        }
        self.scroll.observe(next.loading, next.has_more);

        self.props = next;
        self.view = None;
        Ok(true)
    }

    /// Reports that the last `on_load_more` request ended without new rows
    /// and without an error in the props.
    pub fn load_finished(&mut self) {
        self.scroll.finish();
    }

    /// The current view, rebuilt only when something it depends on changed.
    pub fn view(&mut self) -> &TableView<R::Key> {
        let view = match self.view.take() {
            Some(view) => view,
            None => {
                self.renders += 1;
                self.build_view()
            }
        };
        self.view.insert(view)
    }

    /// Applies an event. Returns `true` if it had an effect (a callback
    /// was invoked or the view changed).
    pub fn handle(&mut self, event: TableEvent<R::Key>) -> Result<bool, TableError> {
        match event {
            TableEvent::ToggleSelect(key) => {
                self.row_index(&key)?;
                let current = self.props.selection.clone().unwrap_or_default();
                let Some(next) = current.toggle(self.props.selection_mode, key) else {
                    return Ok(false);
                };
                Ok(self.dispatch(&self.props.callbacks.on_selection_change, |f| f(next)))
            }
            TableEvent::Review(key, status) => {
                let index = self.row_index(&key)?;
                let accepted = self
                    .props
                    .rows
                    .get(index)
                    .is_some_and(|record| self.renderer.accepts_review(record, status));
                if !accepted {
                    log::warn!("[table] {:?} does not apply to row {:?}", status, key);
                    return Ok(false);
                }
                Ok(self.dispatch(&self.props.callbacks.on_review, |f| f(key, status)))
            }
            TableEvent::BulkReview(status) => {
                let keys = self.selected_keys(status);
                if keys.is_empty() {
                    return Ok(false);
                }
                Ok(self.dispatch(&self.props.callbacks.on_bulk_review, |f| f(keys, status)))
            }
            TableEvent::AddTag(key, tag) => {
                self.row_index(&key)?;
                let tag = tag.trim().to_string();
                if tag.is_empty() {
                    return Ok(false);
                }
                Ok(self.dispatch(&self.props.callbacks.on_add_tag, |f| f(key, tag)))
            }
            TableEvent::RemoveTag(key, tag) => {
                self.row_index(&key)?;
                Ok(self.dispatch(&self.props.callbacks.on_remove_tag, |f| f(key, tag)))
            }
            TableEvent::EditTag { key, from, to } => {
                self.row_index(&key)?;
                let to = to.trim().to_string();
                if to.is_empty() || to == from {
                    return Ok(false);
                }
                Ok(self.dispatch(&self.props.callbacks.on_edit_tag, |f| f(key, from, to)))
            }
            TableEvent::IconFailed(key) => {
                let visible = self.index.contains_key(&key);
                let added = self.broken.report(key);
                if added && visible {
                    log::debug!("[table] icon failed, switching row to placeholder");
                    self.view = None;
                }
                Ok(added)
            }
            TableEvent::Action { key, action } => {
                let index = self.row_index(&key)?;
                let enabled = self
                    .props
                    .rows
                    .get(index)
                    .is_some_and(|record| self.renderer.action_enabled(record, &action));
                if !enabled {
                    return Ok(false);
                }
                Ok(self.dispatch(&self.props.callbacks.on_action, |f| f(key, action)))
            }
            TableEvent::SentinelVisible { distance } => {
                if self.is_virtualized() {
                    log::trace!("[table] sentinel ignored while virtualized");
                    return Ok(false);
                }
                Ok(self.maybe_load_more(distance))
            }
            TableEvent::Scrolled { offset, viewport } => {
                let total = self.props.rows.len();
                let before = self.virtualizer.window(total);
                self.virtualizer.scroll(offset, viewport);
                if !self.virtualizer.is_active(total) {
                    return Ok(false);
                }

                let moved = self.virtualizer.window(total) != before;
                if moved {
                    self.view = None;
                }
                let distance = self.virtualizer.distance_to_end(total);
                let distance = u32::try_from(distance).unwrap_or(u32::MAX);
                let loading = self.maybe_load_more(distance);
                Ok(moved || loading)
            }
            TableEvent::Highlight(index) => {
                let index = index.filter(|i| *i < self.props.rows.len());
                Ok(self.dispatch(&self.props.callbacks.on_highlight, |f| f(index)))
            }
        }
    }

    fn maybe_load_more(&mut self, distance: u32) -> bool {
        let Some(load_more) = self.props.callbacks.on_load_more.clone() else {
            return false;
        };
        if self
            .scroll
            .sentinel(distance, self.props.loading, self.props.has_more)
        {
            load_more();
            true
        } else {
            false
        }
    }

    fn dispatch<F: ?Sized>(&self, callback: &Option<Callback<F>>, call: impl FnOnce(&F)) -> bool {
        match callback {
            Some(f) => {
                call(f.as_ref());
                true
            }
            None => false,
        }
    }

    fn row_index(&self, key: &R::Key) -> Result<usize, TableError> {
        self.index
            .get(key)
            .copied()
            .ok_or_else(|| TableError::UnknownKey(format!("{:?}", key)))
    }

    /// Selected keys in row order, skipping rows that reject `status`.
    fn selected_keys(&self, status: ReviewStatus) -> Vec<R::Key> {
        let Some(selection) = &self.props.selection else {
            return Vec::new();
        };
        self.props
            .rows
            .iter()
            .filter(|record| selection.contains(&record.key()))
            .filter(|record| self.renderer.accepts_review(record, status))
            .map(Record::key)
            .collect()
    }

    fn build_view(&self) -> TableView<R::Key> {
        let props = &self.props;
        let total = props.rows.len();
        let headers = self.renderer.headers(props.mode, props.selection_mode);
        let virtualized = self.virtualizer.is_active(total);

        if let Some(error) = &props.error {
            return TableView {
                status: TableStatus::Error(error.clone()),
                headers,
                rows: Vec::new(),
                top_spacer: 0,
                bottom_spacer: 0,
                sentinel: false,
                loading_more: false,
                virtualized: false,
                total_rows: total,
            };
        }

        let status = match (total, props.loading) {
            (0, true) => TableStatus::Loading,
            (0, false) => TableStatus::Empty,
            _ => TableStatus::Ready,
        };

        let window = self.virtualizer.window(total);
        let tags = props.callbacks.tag_affordances();
        let rows = self.broken.with(|cache| {
            props.rows[window.start..window.end]
                .iter()
                .enumerate()
                .map(|(offset, record)| {
                    let key = record.key();
                    let ctx = RowContext {
                        index: window.start + offset,
                        mode: props.mode,
                        selection_mode: props.selection_mode,
                        selection: props.selection.as_ref(),
                        highlighted: props.highlighted,
                        removing: props.removing.as_ref(),
                        icon_broken: cache.contains(&key)
                            || props.broken.as_ref().is_some_and(|b| b.contains(&key)),
                        tags,
                    };
                    self.renderer.render(record, &ctx)
                })
                .collect()
        });

        TableView {
            status,
            headers,
            rows,
            top_spacer: window.top_spacer,
            bottom_spacer: window.bottom_spacer,
            sentinel: !virtualized && props.has_more,
            loading_more: props.loading && total > 0,
            virtualized,
            total_rows: total,
        }
    }
}

fn build_index<R: Record>(rows: &Rows<R>) -> Result<HashMap<R::Key, usize>, TableError> {
    let mut index = HashMap::with_capacity(rows.len());
    for (i, record) in rows.iter().enumerate() {
        if let Some(first) = index.insert(record.key(), i) {
            return Err(TableError::DuplicateKey {
                key: format!("{:?}", record.key()),
                first,
                second: i,
            });
        }
    }
    Ok(index)
}

/// Convenience for hosts that keep selection in a plain set.
pub fn selection_of<K, I>(keys: I) -> KeySet<K>
where
    K: Clone + Eq + std::hash::Hash,
    I: IntoIterator<Item = K>,
{
    keys.into_iter().collect()
}
