use contracts::domain::a002_base_material::{BaseMaterialDto, BaseMaterialFilter};
use leptos::prelude::*;

use crate::shared::config::DEFAULT_PAGE_SIZE;
use crate::shared::data_source::format_price_range;

#[derive(Clone, Debug)]
pub struct MaterialListState {
    pub items: Vec<BaseMaterialDto>,
    /// Draft inputs; only [`MaterialListState::apply_filter`] makes them effective.
    pub name_query: String,
    pub category: String,
    pub region: String,
    pub is_verified: Option<bool>,
    applied: BaseMaterialFilter,
    pub is_loaded: bool,
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

impl Default for MaterialListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            name_query: String::new(),
            category: String::new(),
            region: String::new(),
            is_verified: None,
            applied: BaseMaterialFilter::default(),
            is_loaded: false,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            total_count: 0,
            total_pages: 0,
        }
    }
}

fn trimmed(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl MaterialListState {
    /// Filter of the rows currently listed.
    pub fn filter(&self) -> BaseMaterialFilter {
        self.applied.clone()
    }

    fn draft_filter(&self) -> BaseMaterialFilter {
        BaseMaterialFilter {
            name: trimmed(&self.name_query),
            category: trimmed(&self.category),
            region: trimmed(&self.region),
            is_verified: self.is_verified,
            price_type: None,
        }
    }

    pub fn apply_filter(&mut self) {
        self.applied = self.draft_filter();
        self.page = 0;
    }

    pub fn active_filters_count(&self) -> usize {
        let f = &self.applied;
        [
            f.name.is_some(),
            f.category.is_some(),
            f.region.is_some(),
            f.is_verified.is_some(),
        ]
        .iter()
        .filter(|on| **on)
        .count()
    }
}

/// Tooltip for the price cell: tax-exclusive to tax-inclusive price.
pub fn tax_price_range(item: &BaseMaterialDto) -> String {
    format_price_range(item.price_excluding_tax, item.price_including_tax)
}

/// `""` / `"true"` / `"false"` from the verification select
pub fn parse_verified(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

pub fn create_state() -> RwSignal<MaterialListState> {
    RwSignal::new(MaterialListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_state() {
        let mut state = MaterialListState {
            name_query: " 水泥 ".into(),
            region: "  ".into(),
            is_verified: Some(false),
            ..Default::default()
        };
        assert_eq!(state.filter(), BaseMaterialFilter::default());
        state.apply_filter();
        let filter = state.filter();
        assert_eq!(filter.name.as_deref(), Some("水泥"));
        assert_eq!(filter.region, None);
        assert_eq!(filter.is_verified, Some(false));
        assert_eq!(state.active_filters_count(), 2);
    }

    #[test]
    fn test_verified_select_waits_for_apply() {
        let mut state = MaterialListState::default();
        state.apply_filter();
        state.is_verified = parse_verified("true");
        assert_eq!(state.filter().is_verified, None);
        assert_eq!(state.active_filters_count(), 0);

        state.apply_filter();
        assert_eq!(state.filter().is_verified, Some(true));
    }

    #[test]
    fn test_tax_price_range() {
        let mut item: BaseMaterialDto = serde_json::from_value(serde_json::json!({
            "id": 7, "name": "普通硅酸盐水泥", "unit": "t", "price": 480.0
        }))
        .unwrap();
        assert_eq!(tax_price_range(&item), "—");

        item.price_excluding_tax = Some(424.78);
        item.price_including_tax = Some(480.0);
        assert_eq!(tax_price_range(&item), "¥424.78 ~ ¥480.00");
    }

    #[test]
    fn test_parse_verified() {
        assert_eq!(parse_verified("true"), Some(true));
        assert_eq!(parse_verified("false"), Some(false));
        assert_eq!(parse_verified(""), None);
    }
}
