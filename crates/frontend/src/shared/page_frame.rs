//! PageFrame, the root wrapper for every page rendered inside a tab.
//!
//! Sets `id` (`"{entity}--{category}"`) and `data-page-category` on the root
//! element so a page can be found from the DOM inspector.

use super::page_standard::*;
use leptos::prelude::*;

#[component]
pub fn PageFrame(
    /// HTML id in format `{entity}--{category}`, e.g. `"a001_project--list"`
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants from `page_standard`
    category: &'static str,
    /// Additional CSS classes appended after the base class
    #[prop(optional)]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    debug_assert!(is_valid_page_id(page_id), "bad page id: {page_id}");

    let full_class = frame_class(category, class);

    view! {
        <div id=page_id class=full_class data-page-category=category>
            {children()}
        </div>
    }
}

fn frame_class(category: &str, extra: &str) -> String {
    let base_class = match category {
        PAGE_CAT_DETAIL => "page page--detail",
        PAGE_CAT_CUSTOM => "page page--custom",
        _ => "page",
    };
    if extra.is_empty() {
        base_class.to_string()
    } else {
        format!("{base_class} {extra}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_class() {
        assert_eq!(frame_class(PAGE_CAT_LIST, ""), "page");
        assert_eq!(frame_class(PAGE_CAT_DETAIL, "wide"), "page page--detail wide");
    }
}
