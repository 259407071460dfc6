//! Row checkbox bound to the page's visual selection

use leptos::prelude::*;
use std::collections::HashSet;
use std::hash::Hash;
use thaw::*;

/// Stops click propagation so the row click handler does not fire.
#[component]
pub fn TableCellCheckbox<K>(
    item_id: K,

    /// Visually selected keys
    #[prop(into)]
    selected: Signal<HashSet<K>>,

    /// (item_id, checked)
    on_change: Callback<(K, bool)>,
) -> impl IntoView
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
{
    let item_id_for_checked = item_id.clone();

    view! {
        <TableCell class="fixed-checkbox-column" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || selected.with(|s| s.contains(&item_id_for_checked))
                on:change=move |ev| {
                    on_change.run((item_id.clone(), event_target_checked(&ev)));
                }
            />
        </TableCell>
    }
}
