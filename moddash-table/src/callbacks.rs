//! Caller-supplied callbacks.
//!
//! Callbacks are compared by pointer identity when deciding whether a view
//! can be reused. Keep the same [`Callback`] across props to avoid forcing a
//! recompute; building a fresh `Arc` every time always counts as a change.

use std::fmt;
use std::sync::Arc;

use moddash_lib::model::ReviewStatus;

use crate::selection::KeySet;

pub type Callback<F> = Arc<F>;

pub type ReviewFn<K> = dyn Fn(K, ReviewStatus) + Send + Sync;
pub type BulkReviewFn<K> = dyn Fn(Vec<K>, ReviewStatus) + Send + Sync;
pub type SelectionFn<K> = dyn Fn(KeySet<K>) + Send + Sync;
pub type TagFn<K> = dyn Fn(K, String) + Send + Sync;
pub type TagEditFn<K> = dyn Fn(K, String, String) + Send + Sync;
pub type ActionFn<K> = dyn Fn(K, String) + Send + Sync;
pub type HighlightFn = dyn Fn(Option<usize>) + Send + Sync;
pub type LoadMoreFn = dyn Fn() + Send + Sync;

/// Compares two optional callbacks by identity. Both unset counts as equal.
pub fn same_callback<F: ?Sized>(a: &Option<Callback<F>>, b: &Option<Callback<F>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}

/// Mutation and navigation callbacks for one table.
///
/// Every callback is optional. Tag affordances are only rendered when the
/// matching callback is set.
pub struct TableCallbacks<K> {
    pub on_review: Option<Callback<ReviewFn<K>>>,
    pub on_bulk_review: Option<Callback<BulkReviewFn<K>>>,
    pub on_selection_change: Option<Callback<SelectionFn<K>>>,
    pub on_add_tag: Option<Callback<TagFn<K>>>,
    pub on_remove_tag: Option<Callback<TagFn<K>>>,
    pub on_edit_tag: Option<Callback<TagEditFn<K>>>,
    pub on_action: Option<Callback<ActionFn<K>>>,
    pub on_highlight: Option<Callback<HighlightFn>>,
    pub on_load_more: Option<Callback<LoadMoreFn>>,
}

impl<K> Default for TableCallbacks<K> {
    fn default() -> Self {
        Self {
            on_review: None,
            on_bulk_review: None,
            on_selection_change: None,
            on_add_tag: None,
            on_remove_tag: None,
            on_edit_tag: None,
            on_action: None,
            on_highlight: None,
            on_load_more: None,
        }
    }
}

impl<K> Clone for TableCallbacks<K> {
    fn clone(&self) -> Self {
        Self {
            on_review: self.on_review.clone(),
            on_bulk_review: self.on_bulk_review.clone(),
            on_selection_change: self.on_selection_change.clone(),
            on_add_tag: self.on_add_tag.clone(),
            on_remove_tag: self.on_remove_tag.clone(),
            on_edit_tag: self.on_edit_tag.clone(),
            on_action: self.on_action.clone(),
            on_highlight: self.on_highlight.clone(),
            on_load_more: self.on_load_more.clone(),
        }
    }
}

impl<K> fmt::Debug for TableCallbacks<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableCallbacks")
            .field("on_review", &self.on_review.is_some())
            .field("on_bulk_review", &self.on_bulk_review.is_some())
            .field("on_selection_change", &self.on_selection_change.is_some())
            .field("on_add_tag", &self.on_add_tag.is_some())
            .field("on_remove_tag", &self.on_remove_tag.is_some())
            .field("on_edit_tag", &self.on_edit_tag.is_some())
            .field("on_action", &self.on_action.is_some())
            .field("on_highlight", &self.on_highlight.is_some())
            .field("on_load_more", &self.on_load_more.is_some())
            .finish()
    }
}

impl<K> TableCallbacks<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_review(mut self, f: Callback<ReviewFn<K>>) -> Self {
        self.on_review = Some(f);
        self
    }

    pub fn on_bulk_review(mut self, f: Callback<BulkReviewFn<K>>) -> Self {
        self.on_bulk_review = Some(f);
        self
    }

    pub fn on_selection_change(mut self, f: Callback<SelectionFn<K>>) -> Self {
        self.on_selection_change = Some(f);
        self
    }

    pub fn on_add_tag(mut self, f: Callback<TagFn<K>>) -> Self {
        self.on_add_tag = Some(f);
        self
    }

    pub fn on_remove_tag(mut self, f: Callback<TagFn<K>>) -> Self {
        self.on_remove_tag = Some(f);
        self
    }

    pub fn on_edit_tag(mut self, f: Callback<TagEditFn<K>>) -> Self {
        self.on_edit_tag = Some(f);
        self
    }

    pub fn on_action(mut self, f: Callback<ActionFn<K>>) -> Self {
        self.on_action = Some(f);
        self
    }

    pub fn on_highlight(mut self, f: Callback<HighlightFn>) -> Self {
        self.on_highlight = Some(f);
        self
    }

    pub fn on_load_more(mut self, f: Callback<LoadMoreFn>) -> Self {
        self.on_load_more = Some(f);
        self
    }

    /// Field-by-field pointer identity.
    pub fn same_as(&self, other: &Self) -> bool {
        same_callback(&self.on_review, &other.on_review)
            && same_callback(&self.on_bulk_review, &other.on_bulk_review)
            && same_callback(&self.on_selection_change, &other.on_selection_change)
            && same_callback(&self.on_add_tag, &other.on_add_tag)
            && same_callback(&self.on_remove_tag, &other.on_remove_tag)
            && same_callback(&self.on_edit_tag, &other.on_edit_tag)
            && same_callback(&self.on_action, &other.on_action)
            && same_callback(&self.on_highlight, &other.on_highlight)
            && same_callback(&self.on_load_more, &other.on_load_more)
    }

    /// Which tag affordances a renderer may show.
    pub fn tag_affordances(&self) -> TagAffordances {
        TagAffordances {
            add: self.on_add_tag.is_some(),
            remove: self.on_remove_tag.is_some(),
            edit: self.on_edit_tag.is_some(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TagAffordances {
    pub add: bool,
    pub remove: bool,
    pub edit: bool,
}
