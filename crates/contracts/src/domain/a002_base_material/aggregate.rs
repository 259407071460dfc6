use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reference ("base") material with its information price
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BaseMaterialDto {
    pub id: i64,
    #[serde(default)]
    pub material_code: Option<String>,
    pub name: String,
    #[serde(default)]
    pub specification: Option<String>,
    pub unit: String,
    #[serde(default)]
    pub category: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub price_including_tax: Option<f64>,
    #[serde(default)]
    pub price_excluding_tax: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub region: String,
    /// `provincial` or `municipal`
    #[serde(default)]
    pub price_type: Option<String>,
    /// Information price issue, `YYYY-MM`
    #[serde(default)]
    pub price_date: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub effective_date: Option<DateTime<Utc>>,
}

fn default_currency() -> String {
    "CNY".to_string()
}

/// Filter part of the base material listing query
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BaseMaterialFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_type: Option<String>,
}

/// Operation applied by `POST /base-materials/batch-operation`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchOperation {
    Verify,
    Unverify,
    Delete,
}

impl BatchOperation {
    pub fn display_name(&self) -> &'static str {
        match self {
            BatchOperation::Verify => "批量审核",
            BatchOperation::Unverify => "取消审核",
            BatchOperation::Delete => "批量删除",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOperationRequest {
    pub material_ids: Vec<i64>,
    pub operation: BatchOperation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_operation_wire_format() {
        let req = BatchOperationRequest {
            material_ids: vec![1, 2],
            operation: BatchOperation::Delete,
            verification_notes: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["operation"], "delete");
        assert_eq!(json["material_ids"], serde_json::json!([1, 2]));
        assert!(json.get("verification_notes").is_none());
    }

    #[test]
    fn test_material_defaults() {
        let json = r#"{"id":9,"name":"Rebar HRB400","unit":"t","price":4200.0}"#;
        let dto: BaseMaterialDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.currency, "CNY");
        assert!(!dto.is_verified);
    }
}
