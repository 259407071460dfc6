//! Banner above a list table that reports the cross-page selection and
//! offers the "select everything" / "clear" shortcuts.

use leptos::prelude::*;
use thaw::*;

#[component]
pub fn SelectionBanner(
    /// Number of selected rows across every page
    #[prop(into)]
    selected_count: Signal<usize>,

    /// Total rows matching the current filter
    #[prop(into)]
    total_count: Signal<usize>,

    /// `true` while every row is implicitly selected
    #[prop(into)]
    all_selected: Signal<bool>,

    /// Switches to all mode
    on_select_all: Callback<()>,

    /// Drops the selection in both modes
    on_clear: Callback<()>,

    /// Bulk action buttons
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    let visible = move || selected_count.get() > 0 || all_selected.get();

    view! {
        <div class="selection-banner" class:selection-banner--hidden=move || !visible()>
            <span class="selection-banner__text">
                {move || selection_summary(selected_count.get(), total_count.get(), all_selected.get())}
            </span>
            <Show when=move || !all_selected.get() && selected_count.get() < total_count.get()>
                <Button
                    appearance=ButtonAppearance::Transparent
                    on_click=move |_| on_select_all.run(())
                >
                    {move || format!("选择全部 {} 条", total_count.get())}
                </Button>
            </Show>
            <Button appearance=ButtonAppearance::Transparent on_click=move |_| on_clear.run(())>
                "清除选择"
            </Button>
            <div class="selection-banner__actions">
                {children.map(|c| c())}
            </div>
        </div>
    }
}

pub fn selection_summary(selected: usize, total: usize, all_selected: bool) -> String {
    if all_selected {
        format!("已选择全部 {} 条中的 {} 条", total, selected)
    } else {
        format!("已选择 {} 条", selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_summary() {
        assert_eq!(selection_summary(3, 40, false), "已选择 3 条");
        assert_eq!(selection_summary(37, 40, true), "已选择全部 40 条中的 37 条");
    }
}
