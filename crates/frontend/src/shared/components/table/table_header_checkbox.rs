//! Header checkbox that checks or unchecks every row of the current page
//!
//! # Usage
//!
//! ```ignore
//! <TableHeaderCheckbox
//!     items=page_rows
//!     selected=visual_selected
//!     get_id=Callback::new(|row: ProjectDto| row.id)
//!     on_change=Callback::new(move |check_all: bool| { ... })
//! />
//! ```

use leptos::prelude::*;
use std::collections::HashSet;
use std::hash::Hash;
use thaw::*;
use wasm_bindgen::JsCast;

/// Tri-state header checkbox.
///
/// Checked when every row of `items` is in `selected`, indeterminate when
/// only some are, unchecked otherwise.
#[component]
pub fn TableHeaderCheckbox<T, K>(
    /// Rows of the current page
    #[prop(into)]
    items: Signal<Vec<T>>,

    /// Visually selected keys
    #[prop(into)]
    selected: Signal<HashSet<K>>,

    /// Key of a row
    get_id: Callback<T, K>,

    /// `true` = check all, `false` = uncheck all
    on_change: Callback<bool>,
) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
    K: Eq + Hash + Clone + Send + Sync + 'static,
{
    let checkbox_state = Signal::derive(move || {
        let keys: Vec<K> = items.with(|rows| rows.iter().map(|row| get_id.run(row.clone())).collect());
        selected.with(|sel| header_state(&keys, sel))
    });

    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move |_| {
        if let Some(input) = checkbox_ref.get() {
            let state = checkbox_state.get();
            if let Some(input_el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                input_el.set_indeterminate(matches!(state, CheckboxState::Indeterminate));
            }
        }
    });

    view! {
        <TableHeaderCell resizable=false class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || matches!(checkbox_state.get(), CheckboxState::Checked)
                on:change=move |ev| {
                    // read from the DOM, the derived state is still borrowed here
                    on_change.run(event_target_checked(&ev));
                }
            />
        </TableHeaderCell>
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CheckboxState {
    Unchecked,
    Checked,
    Indeterminate,
}

pub fn header_state<K: Eq + Hash>(page_keys: &[K], selected: &HashSet<K>) -> CheckboxState {
    if page_keys.is_empty() {
        return CheckboxState::Unchecked;
    }
    let count = page_keys.iter().filter(|k| selected.contains(k)).count();
    if count == 0 {
        CheckboxState::Unchecked
    } else if count == page_keys.len() {
        CheckboxState::Checked
    } else {
        CheckboxState::Indeterminate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_state() {
        let selected: HashSet<i64> = [1, 2].into_iter().collect();
        assert_eq!(header_state::<i64>(&[], &selected), CheckboxState::Unchecked);
        assert_eq!(header_state(&[3, 4], &selected), CheckboxState::Unchecked);
        assert_eq!(header_state(&[1, 3], &selected), CheckboxState::Indeterminate);
        assert_eq!(header_state(&[1, 2], &selected), CheckboxState::Checked);
    }
}
