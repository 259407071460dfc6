use crate::shared::config::PAGE_SIZE_OPTIONS;
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Reusable pagination bar for server-paginated tables
#[component]
pub fn PaginationControls(
    /// Current page (0-indexed)
    #[prop(into)]
    current_page: Signal<usize>,

    /// Total number of pages
    #[prop(into)]
    total_pages: Signal<usize>,

    /// Total count of items
    #[prop(into)]
    total_count: Signal<usize>,

    /// Current page size
    #[prop(into)]
    page_size: Signal<usize>,

    /// Callback when page changes
    on_page_change: Callback<usize>,

    /// Callback when page size changes
    on_page_size_change: Callback<usize>,

    /// Available page size options (defaults to `PAGE_SIZE_OPTIONS`)
    #[prop(optional)]
    page_size_options: Option<Vec<usize>>,
) -> impl IntoView {
    let page_size_opts = page_size_options.unwrap_or_else(|| PAGE_SIZE_OPTIONS.to_vec());
    let fallback_size = page_size_opts.first().copied().unwrap_or(20);

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(0)
                disabled=move || current_page.get() == 0
                title="首页"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 0 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=move || current_page.get() == 0
                title="上一页"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || pagination_label(current_page.get(), total_pages.get(), total_count.get())}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page + 1 < total_pages.get() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=move || current_page.get() + 1 >= total_pages.get()
                title="下一页"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let total = total_pages.get();
                    if total > 0 {
                        on_page_change.run(total - 1);
                    }
                }
                disabled=move || current_page.get() + 1 >= total_pages.get()
                title="末页"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    let val = event_target_value(&ev).parse().unwrap_or(fallback_size);
                    on_page_size_change.run(val);
                }
                prop:value=move || page_size.get().to_string()
            >
                {page_size_opts.iter().map(|&size| {
                    view! {
                        <option value={size.to_string()} selected=move || page_size.get() == size>
                            {format!("{} 条/页", size)}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}

/// "3 / 12 (共 236 条)"
pub fn pagination_label(current_page: usize, total_pages: usize, total_count: usize) -> String {
    format!(
        "{} / {} (共 {} 条)",
        current_page + 1,
        total_pages.max(1),
        total_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_label() {
        assert_eq!(pagination_label(2, 12, 236), "3 / 12 (共 236 条)");
        assert_eq!(pagination_label(0, 0, 0), "1 / 1 (共 0 条)");
    }
}
