//! Selection bookkeeping for server-paginated tables.
//!
//! Only one page of rows is materialized at a time, so the selection is kept
//! as keys and in one of two representations:
//!
//! - explicit mode: `selected_keys` holds the keys that ARE selected;
//! - all mode: every row of the full collection is selected except the keys
//!   in `excluded_keys`.
//!
//! Switching modes resets both sets. It does not translate one representation
//! into the other.

use std::collections::HashSet;
use std::hash::Hash;

/// Source of the full collection size for [`SelectionState::selected_count`].
///
/// Implemented for a plain `usize` and for `Fn() -> usize` closures, so a
/// caller can pass either a snapshot or a getter over its own state.
pub trait TotalCount {
    fn total_count(&self) -> usize;
}

impl TotalCount for usize {
    fn total_count(&self) -> usize {
        *self
    }
}

impl<F> TotalCount for F
where
    F: Fn() -> usize,
{
    fn total_count(&self) -> usize {
        self()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState<K>
where
    K: Eq + Hash,
{
    /// `true` = all mode
    pub all_selected: bool,
    /// Meaningful only in explicit mode
    pub selected_keys: HashSet<K>,
    /// Meaningful only in all mode
    pub excluded_keys: HashSet<K>,
}

impl<K> Default for SelectionState<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self {
            all_selected: false,
            selected_keys: HashSet::new(),
            excluded_keys: HashSet::new(),
        }
    }
}

impl<K> SelectionState<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches mode and drops both key sets. Idempotent.
    pub fn toggle_select_all(&mut self, enable: bool) {
        self.all_selected = enable;
        self.selected_keys.clear();
        self.excluded_keys.clear();
    }

    /// Back to explicit mode with nothing selected.
    pub fn clear_all(&mut self) {
        self.toggle_select_all(false);
    }

    /// Applies a table selection event for the visible page.
    ///
    /// `selected_rows` must be a subset of `page_rows`; this is not re-checked.
    /// Keys outside the page are never touched.
    pub fn on_selection_changed<R>(
        &mut self,
        selected_rows: &[R],
        page_rows: &[R],
        key_of: impl Fn(&R) -> K,
    ) {
        let selected_page_keys: HashSet<K> = selected_rows.iter().map(&key_of).collect();

        if self.all_selected {
            for key in page_rows.iter().map(&key_of) {
                if selected_page_keys.contains(&key) {
                    self.excluded_keys.remove(&key);
                } else {
                    self.excluded_keys.insert(key);
                }
            }
        } else {
            // Stale state for this page goes first, then the fresh selection.
            for row in page_rows {
                self.selected_keys.remove(&key_of(row));
            }
            self.selected_keys.extend(selected_page_keys);
        }
    }

    /// Whether a row with `key` is part of the selection.
    pub fn should_select(&self, key: &K) -> bool {
        if self.all_selected {
            !self.excluded_keys.contains(key)
        } else {
            self.selected_keys.contains(key)
        }
    }

    /// Rebuilds the visual selection of a freshly rendered page.
    ///
    /// `clear_visual` runs once before anything else, then `apply_selection`
    /// runs exactly once per row, in row order.
    pub fn reconcile_view<R>(
        &self,
        page_rows: &[R],
        key_of: impl Fn(&R) -> K,
        clear_visual: impl FnOnce(),
        mut apply_selection: impl FnMut(&R, bool),
    ) {
        clear_visual();
        for row in page_rows {
            let should_select = self.should_select(&key_of(row));
            apply_selection(row, should_select);
        }
    }

    /// Explicit-mode selection as a list. Order is unspecified.
    pub fn selected_keys_snapshot(&self) -> Vec<K> {
        self.selected_keys.iter().cloned().collect()
    }

    /// Filters the full key list of the collection down to the keys that are
    /// not excluded, keeping the input order.
    pub fn retain_selected(&self, all_keys: &[K]) -> Vec<K> {
        all_keys
            .iter()
            .filter(|key| !self.excluded_keys.contains(*key))
            .cloned()
            .collect()
    }

    /// Number of selected rows.
    ///
    /// In all mode this is `total - excluded`, clamped at zero; `total` may be
    /// stale relative to the live collection.
    pub fn selected_count(&self, total: &impl TotalCount) -> usize {
        if self.all_selected {
            total.total_count().saturating_sub(self.excluded_keys.len())
        } else {
            self.selected_keys.len()
        }
    }

    /// Nothing selected in either mode.
    pub fn is_empty(&self) -> bool {
        !self.all_selected && self.selected_keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
    }

    fn rows(ids: &[u32]) -> Vec<Row> {
        ids.iter().map(|&id| Row { id }).collect()
    }

    fn key(row: &Row) -> u32 {
        row.id
    }

    fn set(ids: &[u32]) -> HashSet<u32> {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_default_is_explicit_and_empty() {
        let state = SelectionState::<u32>::new();
        assert!(!state.all_selected);
        assert!(state.selected_keys.is_empty());
        assert!(state.excluded_keys.is_empty());
        assert!(state.is_empty());
    }

    #[test]
    fn test_explicit_mode_keeps_other_pages() {
        let mut state = SelectionState::new();
        let page1 = rows(&[1, 2, 3]);
        let page2 = rows(&[4, 5]);

        state.on_selection_changed(&rows(&[1, 2]), &page1, key);
        state.on_selection_changed(&rows(&[4, 5]), &page2, key);
        assert_eq!(state.selected_keys, set(&[1, 2, 4, 5]));

        // Revisit page 1 and narrow its selection
        state.on_selection_changed(&rows(&[3]), &page1, key);
        assert_eq!(state.selected_keys, set(&[3, 4, 5]));

        // Uncheck everything on page 2
        state.on_selection_changed(&[], &page2, key);
        assert_eq!(state.selected_keys, set(&[3]));
    }

    #[test]
    fn test_toggle_select_all_is_idempotent() {
        let mut once = SelectionState::<u32>::new();
        once.toggle_select_all(true);

        let mut twice = SelectionState::<u32>::new();
        twice.toggle_select_all(true);
        twice.toggle_select_all(true);

        assert_eq!(once, twice);
        assert!(twice.all_selected);
        assert!(twice.selected_keys.is_empty());
        assert!(twice.excluded_keys.is_empty());
    }

    #[test]
    fn test_mode_switch_resets_instead_of_translating() {
        let mut state = SelectionState::new();
        state.on_selection_changed(&rows(&[1, 2]), &rows(&[1, 2, 3]), key);
        state.toggle_select_all(true);
        state.on_selection_changed(&rows(&[4]), &rows(&[4, 5]), key);
        assert_eq!(state.excluded_keys, set(&[5]));

        state.toggle_select_all(false);
        assert!(!state.all_selected);
        assert!(state.selected_keys.is_empty());
        assert!(state.excluded_keys.is_empty());
    }

    #[test]
    fn test_clear_all_from_all_mode() {
        let mut state = SelectionState::new();
        state.toggle_select_all(true);
        state.on_selection_changed(&[], &rows(&[1, 2]), key);
        state.clear_all();
        assert_eq!(state, SelectionState::new());
    }

    #[test]
    fn test_all_mode_exclusion_round_trip() {
        let mut state = SelectionState::new();
        state.toggle_select_all(true);
        let page: Vec<Row> = rows(&(1..=10).collect::<Vec<_>>());

        state.on_selection_changed(&[], &page, key);
        assert_eq!(state.excluded_keys, set(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]));

        state.on_selection_changed(&rows(&[3, 7]), &page, key);
        assert_eq!(state.excluded_keys, set(&[1, 2, 4, 5, 6, 8, 9, 10]));
    }

    #[test]
    fn test_all_mode_leaves_other_pages_untouched() {
        let mut state = SelectionState::new();
        state.toggle_select_all(true);
        state.on_selection_changed(&rows(&[2]), &rows(&[1, 2]), key);
        state.on_selection_changed(&rows(&[3, 4]), &rows(&[3, 4]), key);
        assert_eq!(state.excluded_keys, set(&[1]));
        assert!(state.selected_keys.is_empty());
    }

    #[test]
    fn test_reconcile_view_after_navigation() {
        let mut state = SelectionState::new();
        let page1 = rows(&[1, 2, 3]);
        let page2 = rows(&[4, 5]);
        state.on_selection_changed(&rows(&[2]), &page1, key);
        assert_eq!(state.selected_keys, set(&[2]));
        state.on_selection_changed(&rows(&[4, 5]), &page2, key);
        assert_eq!(state.selected_keys, set(&[2, 4, 5]));

        let mut calls: Vec<String> = Vec::new();
        let mut cleared = false;
        state.reconcile_view(
            &page1,
            key,
            || cleared = true,
            |row, selected| calls.push(format!("{}:{}", row.id, selected)),
        );
        assert!(cleared);
        assert_eq!(calls, vec!["1:false", "2:true", "3:false"]);
    }

    #[test]
    fn test_reconcile_view_clears_before_applying() {
        let state = SelectionState::<u32>::new();
        let log = std::cell::RefCell::new(Vec::new());
        state.reconcile_view(
            &rows(&[1, 2]),
            key,
            || log.borrow_mut().push("clear".to_string()),
            |row, _| log.borrow_mut().push(format!("apply {}", row.id)),
        );
        assert_eq!(*log.borrow(), vec!["clear", "apply 1", "apply 2"]);
    }

    #[test]
    fn test_reconcile_view_in_all_mode() {
        let mut state = SelectionState::new();
        state.toggle_select_all(true);
        state.on_selection_changed(&rows(&[1, 3]), &rows(&[1, 2, 3]), key);

        let mut applied = Vec::new();
        state.reconcile_view(&rows(&[1, 2, 3, 4]), key, || {}, |row, sel| {
            applied.push((row.id, sel))
        });
        assert_eq!(applied, vec![(1, true), (2, false), (3, true), (4, true)]);
    }

    #[test]
    fn test_retain_selected_preserves_order() {
        let mut state = SelectionState::new();
        state.toggle_select_all(true);
        state.on_selection_changed(&rows(&[1, 2, 4]), &rows(&[1, 2, 3, 4]), key);
        assert_eq!(state.retain_selected(&[1, 2, 3, 4]), vec![1, 2, 4]);
        assert_eq!(state.retain_selected(&[4, 3, 2, 1]), vec![4, 2, 1]);
    }

    #[test]
    fn test_selected_count() {
        let mut state = SelectionState::<u32>::new();
        state.on_selection_changed(&rows(&[1, 2]), &rows(&[1, 2, 3]), key);
        assert_eq!(state.selected_count(&100usize), 2);

        state.toggle_select_all(true);
        state.excluded_keys = set(&[1, 2, 3, 4]);
        assert_eq!(state.selected_count(&25usize), 21);
        assert_eq!(state.selected_count(&|| 25usize), 21);

        state.excluded_keys = (1..=30).collect();
        assert_eq!(state.selected_count(&25usize), 0);
    }
}
