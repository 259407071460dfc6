//! Reactive wrapper over [`SelectionState`] for list pages.
//!
//! # Usage
//!
//! ```ignore
//! let selection = use_selection_across_pages(|row: &ProjectDto| row.id);
//!
//! // table checkbox event
//! selection.on_selection_changed(&checked_rows, &page_rows);
//!
//! // after a page load
//! selection.reconcile_view(&page_rows, || visual.set(HashSet::new()), |row, on| { ... });
//!
//! // bulk action
//! let ids = selection.resolve_selected_keys(Some(|| api::fetch_all_project_ids(filter))).await?;
//! ```

use super::state::{SelectionState, TotalCount};
use leptos::prelude::*;
use std::collections::HashSet;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

type KeyFn<R, K> = Arc<dyn Fn(&R) -> K + Send + Sync>;

/// Rows that carry their own selection key.
pub trait Keyed {
    type Key;

    fn key(&self) -> Self::Key;
}

/// Cross-page selection bound to the owning view.
///
/// Cheap to copy; the state lives in the reactive arena and is dropped together
/// with the component that created it.
pub struct SelectionAcrossPages<R: 'static, K: 'static>
where
    K: Eq + Hash + Send + Sync,
{
    state: RwSignal<SelectionState<K>>,
    key_of: StoredValue<KeyFn<R, K>>,
}

impl<R: 'static, K> Clone for SelectionAcrossPages<R, K>
where
    K: Eq + Hash + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: 'static, K> Copy for SelectionAcrossPages<R, K> where K: Eq + Hash + Send + Sync + 'static {}

/// Creates a selection tracker with an explicit key extractor.
pub fn use_selection_across_pages<R, K>(
    key_of: impl Fn(&R) -> K + Send + Sync + 'static,
) -> SelectionAcrossPages<R, K>
where
    R: 'static,
    K: Eq + Hash + Clone + Send + Sync + 'static,
{
    SelectionAcrossPages {
        state: RwSignal::new(SelectionState::default()),
        key_of: StoredValue::new(Arc::new(key_of) as KeyFn<R, K>),
    }
}

/// Creates a selection tracker keyed by [`Keyed::key`].
pub fn use_keyed_selection<R>() -> SelectionAcrossPages<R, R::Key>
where
    R: Keyed + 'static,
    R::Key: Eq + Hash + Clone + Send + Sync + 'static,
{
    use_selection_across_pages(|row: &R| row.key())
}

impl<R, K> SelectionAcrossPages<R, K>
where
    R: 'static,
    K: Eq + Hash + Clone + Send + Sync + 'static,
{
    pub fn all_selected(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.all_selected))
    }

    pub fn selected_keys(&self) -> Signal<HashSet<K>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.selected_keys.clone()))
    }

    pub fn excluded_keys(&self) -> Signal<HashSet<K>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.excluded_keys.clone()))
    }

    /// Derived count; `total` is read reactively when it is a closure over signals.
    pub fn selected_count<T>(&self, total: T) -> Signal<usize>
    where
        T: TotalCount + Send + Sync + 'static,
    {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.selected_count(&total)))
    }

    /// `true` when nothing is selected in either mode.
    pub fn is_empty(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.is_empty()))
    }

    pub fn is_selected(&self, row: &R) -> bool {
        let key = self.key_of.with_value(|f| f(row));
        self.state.with(|s| s.should_select(&key))
    }

    pub fn toggle_select_all(&self, enable: bool) {
        log::debug!("selection: toggle_select_all({})", enable);
        self.state.update(|s| s.toggle_select_all(enable));
    }

    pub fn clear_all(&self) {
        log::debug!("selection: clear_all");
        self.state.update(|s| s.clear_all());
    }

    pub fn on_selection_changed(&self, selected_rows: &[R], page_rows: &[R]) {
        let key_of = self.key_of.get_value();
        self.state
            .update(|s| s.on_selection_changed(selected_rows, page_rows, |row| key_of(row)));
    }

    /// Replays tracked state onto the visual selection of `page_rows`.
    ///
    /// Reads untracked so it can be called from the effect that loads a page.
    pub fn reconcile_view(
        &self,
        page_rows: &[R],
        clear_visual: impl FnOnce(),
        apply_selection: impl FnMut(&R, bool),
    ) {
        let key_of = self.key_of.get_value();
        self.state.with_untracked(|s| {
            s.reconcile_view(page_rows, |row| key_of(row), clear_visual, apply_selection)
        });
    }

    /// Keys of every selected row.
    ///
    /// Explicit mode resolves immediately. In all mode `fetch_all_keys` is
    /// awaited (no fetcher means an empty collection) and the exclusion set is
    /// read only after it completes, so edits made while the fetch is in
    /// flight are reflected. A fetch error is returned unchanged and leaves
    /// the tracked state untouched.
    pub async fn resolve_selected_keys<F, Fut, E>(
        &self,
        fetch_all_keys: Option<F>,
    ) -> Result<Vec<K>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<K>, E>>,
    {
        let before = self.state.get_untracked();
        if !before.all_selected {
            return Ok(before.selected_keys_snapshot());
        }

        let all_keys = match fetch_all_keys {
            Some(fetch) => fetch().await?,
            None => Vec::new(),
        };

        // The owning view may have unmounted while the fetch was pending; the
        // exclusions seen before the fetch still apply.
        Ok(self
            .state
            .try_with_untracked(|s| s.retain_selected(&all_keys))
            .unwrap_or_else(|| before.retain_selected(&all_keys)))
    }

    /// Snapshot of the raw state, mostly for diagnostics.
    pub fn snapshot(&self) -> SelectionState<K> {
        self.state.get_untracked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use leptos::reactive::owner::Owner;
    use std::future::{ready, Ready};

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
    }

    impl Keyed for Row {
        type Key = i64;

        fn key(&self) -> i64 {
            self.id
        }
    }

    fn rows(ids: &[i64]) -> Vec<Row> {
        ids.iter().map(|&id| Row { id }).collect()
    }

    type NoFetch = fn() -> Ready<Result<Vec<i64>, String>>;

    #[test]
    fn test_explicit_mode_resolves_without_fetch() {
        let owner = Owner::new();
        owner.set();

        let sel = use_keyed_selection::<Row>();
        sel.on_selection_changed(&rows(&[2]), &rows(&[1, 2, 3]));
        sel.on_selection_changed(&rows(&[4, 5]), &rows(&[4, 5]));

        let mut keys = block_on(sel.resolve_selected_keys(None::<NoFetch>)).unwrap();
        keys.sort();
        assert_eq!(keys, vec![2, 4, 5]);
        assert_eq!(sel.selected_count(0usize).get_untracked(), 3);
    }

    #[test]
    fn test_all_mode_filters_fetched_keys() {
        let owner = Owner::new();
        owner.set();

        let sel = use_selection_across_pages(|row: &Row| row.id);
        sel.toggle_select_all(true);
        sel.on_selection_changed(&rows(&[1, 2, 4]), &rows(&[1, 2, 3, 4]));
        assert_eq!(sel.excluded_keys().get_untracked(), HashSet::from([3]));

        let keys = block_on(
            sel.resolve_selected_keys(Some(|| ready(Ok::<_, String>(vec![1, 2, 3, 4])))),
        )
        .unwrap();
        assert_eq!(keys, vec![1, 2, 4]);
    }

    #[test]
    fn test_all_mode_without_fetcher_is_empty() {
        let owner = Owner::new();
        owner.set();

        let sel = use_keyed_selection::<Row>();
        sel.toggle_select_all(true);
        let keys = block_on(sel.resolve_selected_keys(None::<NoFetch>)).unwrap();
        assert!(keys.is_empty());
    }

    #[test]
    fn test_fetch_error_propagates_and_keeps_state() {
        let owner = Owner::new();
        owner.set();

        let sel = use_keyed_selection::<Row>();
        sel.toggle_select_all(true);
        sel.on_selection_changed(&rows(&[1]), &rows(&[1, 3]));
        let before = sel.snapshot();

        let result = block_on(sel.resolve_selected_keys(Some(|| {
            ready(Err::<Vec<i64>, _>("network error".to_string()))
        })));
        assert_eq!(result, Err("network error".to_string()));
        assert_eq!(sel.snapshot(), before);
        assert!(sel.all_selected().get_untracked());
    }

    #[test]
    fn test_exclusions_made_during_fetch_apply() {
        let owner = Owner::new();
        owner.set();

        let sel = use_keyed_selection::<Row>();
        sel.toggle_select_all(true);

        let keys = block_on(sel.resolve_selected_keys(Some(|| {
            // the user unchecks row 2 while the listing is still loading
            sel.on_selection_changed(&rows(&[1]), &rows(&[1, 2]));
            ready(Ok::<_, String>(vec![1, 2, 3]))
        })))
        .unwrap();
        assert_eq!(keys, vec![1, 3]);
    }

    #[test]
    fn test_exclusions_survive_view_disposal_during_fetch() {
        let root = Owner::new();
        root.set();

        let view = root.child();
        let sel = view.with(use_keyed_selection::<Row>);
        sel.toggle_select_all(true);
        sel.on_selection_changed(&rows(&[1, 3]), &rows(&[1, 2, 3]));

        let keys = block_on(sel.resolve_selected_keys(Some(|| {
            // the tab is closed while the listing is still loading
            view.cleanup();
            ready(Ok::<_, String>(vec![1, 2, 3]))
        })))
        .unwrap();
        assert_eq!(keys, vec![1, 3]);
    }

    #[test]
    fn test_selected_count_tracks_total_getter() {
        let owner = Owner::new();
        owner.set();

        let total = RwSignal::new(25usize);
        let sel = use_keyed_selection::<Row>();
        let count = sel.selected_count(move || total.get());

        sel.toggle_select_all(true);
        sel.on_selection_changed(&[], &rows(&[1, 2, 3, 4]));
        assert_eq!(count.get_untracked(), 21);

        total.set(3);
        assert_eq!(count.get_untracked(), 0);
    }

    #[test]
    fn test_reconcile_view_marks_rows() {
        let owner = Owner::new();
        owner.set();

        let sel = use_keyed_selection::<Row>();
        let page1 = rows(&[1, 2, 3]);
        sel.on_selection_changed(&rows(&[2]), &page1);
        sel.on_selection_changed(&rows(&[4, 5]), &rows(&[4, 5]));

        let mut visual: HashSet<i64> = HashSet::from([1, 3]);
        let mut calls = Vec::new();
        sel.reconcile_view(
            &page1,
            || visual.clear(),
            |row, on| calls.push((row.id, on)),
        );
        for (id, on) in &calls {
            if *on {
                visual.insert(*id);
            }
        }
        assert_eq!(calls, vec![(1, false), (2, true), (3, false)]);
        assert_eq!(visual, HashSet::from([2]));
        assert!(sel.is_selected(&Row { id: 4 }));
        assert!(!sel.is_selected(&Row { id: 1 }));
    }
}
