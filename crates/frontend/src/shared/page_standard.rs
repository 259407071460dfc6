//! Page category constants for tab pages.
//!
//! Every page rendered inside a tab declares an HTML `id` in the format
//! `{entity}--{category}` (e.g. `"a001_project--list"`) and a
//! `data-page-category` with one of the constants below.

/// List of records, table with filters and pagination.
pub const PAGE_CAT_LIST: &str = "list";

/// Detail view of a single record.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Free-form page without the standard header/content structure.
pub const PAGE_CAT_CUSTOM: &str = "custom";

pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_LIST, PAGE_CAT_DETAIL, PAGE_CAT_CUSTOM];

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    matches!(id.split_once("--"), Some((entity, cat)) if !entity.is_empty() && !cat.is_empty())
}

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a001_project--list"));
        assert!(!is_valid_page_id("a001_project"));
        assert!(!is_valid_page_id("--list"));
    }

    #[test]
    fn test_known_categories() {
        assert!(is_known_category(PAGE_CAT_LIST));
        assert!(!is_known_category("dashboard"));
    }
}
