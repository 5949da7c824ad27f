//! Render-skip comparison for table props.
//!
//! Each kind of field gets its own equality policy:
//!
//! - scalars (flags, strings, numbers, enums) by value;
//! - row data by `Arc` identity only, never element by element;
//! - key sets structurally, where two unset sets are equal and one unset
//!   set is not;
//! - callbacks by pointer identity.
//!
//! The result is the AND over all fields.

use std::hash::Hash;
use std::sync::Arc;

use crate::column::Record;
use crate::props::Rows;
use crate::props::TableProps;
use crate::selection::KeySet;

/// Row snapshots are equal only when they are the same allocation.
pub fn same_rows<R>(a: &Rows<R>, b: &Rows<R>) -> bool {
    Arc::ptr_eq(a, b)
}

/// Structural set equality, order-insensitive.
pub fn same_set<K: Eq + Hash>(a: Option<&KeySet<K>>, b: Option<&KeySet<K>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

impl<R: Record> TableProps<R> {
    /// Whether the view built from `self` is still valid for `next`.
    pub fn can_skip_render(&self, next: &Self) -> bool {
        self.loading == next.loading
            && self.has_more == next.has_more
            && self.error == next.error
            && self.mode == next.mode
            && self.selection_mode == next.selection_mode
            && self.highlighted == next.highlighted
            && same_rows(&self.rows, &next.rows)
            && same_set(self.selection.as_ref(), next.selection.as_ref())
            && same_set(self.removing.as_ref(), next.removing.as_ref())
            && same_set(self.broken.as_ref(), next.broken.as_ref())
            && self.callbacks.same_as(&next.callbacks)
    }
}
