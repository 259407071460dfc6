use contracts::domain::a002_base_material::{
    BaseMaterialDto, BaseMaterialFilter, BatchOperation, BatchOperationRequest,
};
use contracts::shared::batch::MessageResponse;
use contracts::shared::pagination::PageData;
use serde::Serialize;

use crate::shared::http::{
    collect_all_keys, retry_request, ApiClient, ApiError, RequestOptions, RetryPolicy,
};

const MATERIALS_PATH: &str = "/base-materials/";
const BATCH_OPERATION_PATH: &str = "/base-materials/batch-operation";

/// Largest `page_size` the materials listing accepts
pub const ALL_IDS_PAGE_SIZE: usize = 2000;

#[derive(Debug, Serialize)]
struct MaterialListQuery<'a> {
    page: usize,
    page_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_type: Option<&'a str>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

impl<'a> MaterialListQuery<'a> {
    fn new(filter: &'a BaseMaterialFilter, page: usize, page_size: usize) -> Self {
        Self {
            page,
            page_size: page_size.min(ALL_IDS_PAGE_SIZE),
            name: non_blank(&filter.name),
            category: non_blank(&filter.category),
            region: non_blank(&filter.region),
            is_verified: filter.is_verified,
            price_type: non_blank(&filter.price_type),
        }
    }
}

/// Fetch one page of base materials (`page` is 1-based)
pub async fn fetch_materials(
    filter: &BaseMaterialFilter,
    page: usize,
    page_size: usize,
) -> Result<PageData<BaseMaterialDto>, String> {
    let client = ApiClient::new();
    let query = MaterialListQuery::new(filter, page, page_size);

    retry_request(RetryPolicy::default(), ApiError::is_server_error, || {
        client.get::<PageData<BaseMaterialDto>, _>(MATERIALS_PATH, &query, RequestOptions::default())
    })
    .await
    .map_err(|e| format!("Failed to fetch materials: {}", e))
}

/// Ids of every material matching `filter`, across all pages
pub async fn fetch_all_material_ids(filter: BaseMaterialFilter) -> Result<Vec<i64>, String> {
    collect_all_keys(ALL_IDS_PAGE_SIZE, |m: &BaseMaterialDto| m.id, |page, size| {
        let filter = filter.clone();
        async move { fetch_materials(&filter, page, size).await }
    })
    .await
}

/// Verify, unverify or delete materials by id
pub async fn batch_operation(
    operation: BatchOperation,
    material_ids: Vec<i64>,
) -> Result<MessageResponse, String> {
    let request = BatchOperationRequest {
        material_ids,
        operation,
        verification_notes: None,
    };
    ApiClient::new()
        .post::<MessageResponse, _>(BATCH_OPERATION_PATH, &request, RequestOptions::default())
        .await
        .map_err(|e| format!("{} failed: {}", operation.display_name(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_string() {
        let filter = BaseMaterialFilter {
            name: Some("钢筋".into()),
            category: None,
            region: Some(String::new()),
            is_verified: Some(true),
            price_type: Some("provincial".into()),
        };
        let qs = serde_qs::to_string(&MaterialListQuery::new(&filter, 3, 100)).unwrap();
        assert!(qs.starts_with("page=3&page_size=100&name="));
        assert!(qs.ends_with("&is_verified=true&price_type=provincial"));
        assert!(!qs.contains("region"));
    }

    #[test]
    fn test_page_size_is_capped() {
        let filter = BaseMaterialFilter::default();
        let qs = serde_qs::to_string(&MaterialListQuery::new(&filter, 1, 5000)).unwrap();
        assert_eq!(qs, "page=1&page_size=2000");
    }
}
