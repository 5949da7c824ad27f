//! Copy-on-write key sets for selection and row markers.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

/// Selection mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// No selection allowed; no checkbox is rendered.
    #[default]
    None,
    /// Single item selection (radio-button style).
    Single,
    /// Multiple items can be selected (checkbox style).
    Multi,
}

impl SelectionMode {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, SelectionMode::None)
    }
}

/// An immutable set of row keys.
///
/// Every change returns a new set and leaves the original untouched, so a
/// set held in old props never observes later edits. Cloning is cheap.
#[derive(Debug)]
pub struct KeySet<K> {
    keys: Arc<HashSet<K>>,
}

/// Rows checked for bulk actions.
pub type SelectionSet<K> = KeySet<K>;

impl<K> Clone for KeySet<K> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
        }
    }
}

impl<K: Eq + Hash> Default for KeySet<K> {
    fn default() -> Self {
        Self {
            keys: Arc::new(HashSet::new()),
        }
    }
}

impl<K: Eq + Hash> PartialEq for KeySet<K> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.keys, &other.keys)
            || (self.keys.len() == other.keys.len()
                && self.keys.iter().all(|k| other.keys.contains(k)))
    }
}

impl<K: Eq + Hash> Eq for KeySet<K> {}

impl<K: Eq + Hash> FromIterator<K> for KeySet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            keys: Arc::new(iter.into_iter().collect()),
        }
    }
}

impl<K: Clone + Eq + Hash> KeySet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }

    /// A new set that also contains `key`.
    pub fn with(&self, key: K) -> Self {
        let mut keys = (*self.keys).clone();
        keys.insert(key);
        Self {
            keys: Arc::new(keys),
        }
    }

    /// A new set without `key`.
    pub fn without(&self, key: &K) -> Self {
        let mut keys = (*self.keys).clone();
        keys.remove(key);
        Self {
            keys: Arc::new(keys),
        }
    }

    /// A new set with `key` flipped.
    pub fn toggled(&self, key: K) -> Self {
        if self.contains(&key) {
            self.without(&key)
        } else {
            self.with(key)
        }
    }

    /// Applies a checkbox click under `mode`.
    ///
    /// Returns `None` when selection is disabled.
    pub fn toggle(&self, mode: SelectionMode, key: K) -> Option<Self> {
        match mode {
            SelectionMode::None => None,
            SelectionMode::Single if self.contains(&key) => Some(Self::new()),
            SelectionMode::Single => Some(std::iter::once(key).collect()),
            SelectionMode::Multi => Some(self.toggled(key)),
        }
    }

    /// Whether both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.keys, &other.keys)
    }
}
