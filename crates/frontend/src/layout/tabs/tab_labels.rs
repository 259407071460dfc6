//! Tab titles for every tab key.

pub const A001_PROJECT: &str = "a001_project";
pub const A002_BASE_MATERIAL: &str = "a002_base_material";

/// Readable tab title; falls back to a generic label for unknown keys.
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        A001_PROJECT => "项目管理",
        A002_BASE_MATERIAL => "基准材料库",
        _ => "未知页面",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(tab_label_for_key(A001_PROJECT), "项目管理");
        assert_eq!(tab_label_for_key("nope"), "未知页面");
    }
}
