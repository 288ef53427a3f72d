//! Id-keyed row selection and the derived header checkbox state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::record::RowId;

/// Tri-state value of the "select all" checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    /// Nothing selected.
    #[default]
    Unchecked,
    /// Every row of the filtered view is selected.
    Checked,
    /// Some, but not all, rows are selected.
    Indeterminate,
}

impl CheckState {
    /// Derives the state from the selected count and the filtered length.
    #[must_use]
    pub const fn derive(selected: usize, filtered: usize) -> Self {
        if filtered > 0 && selected >= filtered {
            Self::Checked
        } else if selected > 0 {
            Self::Indeterminate
        } else {
            Self::Unchecked
        }
    }

    /// Value for an `aria-checked` style attribute.
    #[must_use]
    pub const fn aria(self) -> &'static str {
        match self {
            Self::Unchecked => "false",
            Self::Checked => "true",
            Self::Indeterminate => "mixed",
        }
    }

    /// Text checkbox marker.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Unchecked => "[ ]",
            Self::Checked => "[x]",
            Self::Indeterminate => "[-]",
        }
    }
}

/// Set of selected row ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<RowId>,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or removes one id. Returns whether the set changed.
    pub fn set(&mut self, id: RowId, checked: bool) -> bool {
        if checked {
            self.ids.insert(id)
        } else {
            self.ids.remove(&id)
        }
    }

    /// Replaces the selection with `ids`.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = RowId>) {
        self.ids = ids.into_iter().collect();
    }

    /// Removes every id.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Keeps only ids accepted by `keep`. Returns how many were dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(&RowId) -> bool) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| keep(id));
        before - self.ids.len()
    }

    /// Returns whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: &RowId) -> bool {
        self.ids.contains(id)
    }

    /// Number of selected rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates over selected ids in id order.
    pub fn iter(&self) -> impl Iterator<Item = &RowId> {
        self.ids.iter()
    }

    /// Returns the selected ids as a set.
    #[must_use]
    pub const fn ids(&self) -> &BTreeSet<RowId> {
        &self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_state_derivation() {
        assert_eq!(CheckState::derive(0, 0), CheckState::Unchecked);
        assert_eq!(CheckState::derive(0, 5), CheckState::Unchecked);
        assert_eq!(CheckState::derive(2, 5), CheckState::Indeterminate);
        assert_eq!(CheckState::derive(5, 5), CheckState::Checked);
    }

    #[test]
    fn test_check_state_labels() {
        assert_eq!(CheckState::Checked.aria(), "true");
        assert_eq!(CheckState::Indeterminate.aria(), "mixed");
        assert_eq!(CheckState::Unchecked.marker(), "[ ]");
        assert_eq!(CheckState::Indeterminate.marker(), "[-]");
    }

    #[test]
    fn test_set_and_clear() {
        let mut sel = Selection::new();
        assert!(sel.set(RowId::from("1"), true));
        assert!(!sel.set(RowId::from("1"), true));
        assert!(sel.set(RowId::from("2"), true));
        assert_eq!(sel.len(), 2);
        assert!(sel.set(RowId::from("1"), false));
        assert!(!sel.contains(&RowId::from("1")));
        sel.clear();
        assert!(sel.is_empty());
    }

    #[test]
    fn test_retain_reports_dropped() {
        let mut sel = Selection::new();
        sel.replace(["1", "2", "3"].map(RowId::from));
        let dropped = sel.retain(|id| id.as_str() != "2");
        assert_eq!(dropped, 1);
        assert_eq!(
            sel.iter().map(RowId::as_str).collect::<Vec<_>>(),
            vec!["1", "3"]
        );
    }
}
