use contracts::domain::a001_project::{ProjectDto, ProjectFilter};
use contracts::shared::batch::{BatchDeleteRequest, BatchDeleteResponse};
use contracts::shared::pagination::PageData;
use serde::Serialize;

use crate::shared::http::{
    collect_all_keys, retry_request, ApiClient, ApiError, RequestOptions, RetryPolicy,
};

const PROJECTS_PATH: &str = "/projects/";
const BATCH_DELETE_PATH: &str = "/projects/batch-delete";

/// Page size used when collecting every id for a bulk action
pub const ALL_IDS_PAGE_SIZE: usize = 500;

#[derive(Debug, Serialize)]
struct ProjectListQuery<'a> {
    page: usize,
    size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_type: Option<&'a str>,
}

impl<'a> ProjectListQuery<'a> {
    fn new(filter: &'a ProjectFilter, page: usize, size: usize) -> Self {
        Self {
            page,
            size,
            name: filter.name.as_deref().filter(|s| !s.trim().is_empty()),
            status: filter.status.map(|s| s.as_str()),
            project_type: filter.project_type.as_deref().filter(|s| !s.trim().is_empty()),
        }
    }
}

/// Fetch one page of projects (`page` is 1-based)
pub async fn fetch_projects(
    filter: &ProjectFilter,
    page: usize,
    size: usize,
) -> Result<PageData<ProjectDto>, String> {
    let client = ApiClient::new();
    let query = ProjectListQuery::new(filter, page, size);

    retry_request(RetryPolicy::default(), ApiError::is_server_error, || {
        client.get::<PageData<ProjectDto>, _>(PROJECTS_PATH, &query, RequestOptions::default())
    })
    .await
    .map_err(|e| format!("Failed to fetch projects: {}", e))
}

/// Ids of every project matching `filter`, across all pages
pub async fn fetch_all_project_ids(filter: ProjectFilter) -> Result<Vec<i64>, String> {
    collect_all_keys(ALL_IDS_PAGE_SIZE, |p: &ProjectDto| p.id, |page, size| {
        let filter = filter.clone();
        async move { fetch_projects(&filter, page, size).await }
    })
    .await
}

/// Delete projects by id
pub async fn batch_delete_projects(ids: Vec<i64>) -> Result<BatchDeleteResponse, String> {
    ApiClient::new()
        .post::<BatchDeleteResponse, _>(
            BATCH_DELETE_PATH,
            &BatchDeleteRequest { ids },
            RequestOptions::default(),
        )
        .await
        .map_err(|e| format!("Failed to delete projects: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_project::ProjectStatus;

    #[test]
    fn test_list_query_string() {
        let filter = ProjectFilter {
            name: Some("桥梁".into()),
            status: Some(ProjectStatus::Completed),
            project_type: Some("  ".into()),
        };
        let qs = serde_qs::to_string(&ProjectListQuery::new(&filter, 2, 50)).unwrap();
        assert!(qs.starts_with("page=2&size=50&name="));
        assert!(qs.ends_with("&status=completed"));
        assert!(!qs.contains("project_type"));
    }

    #[test]
    fn test_empty_filter_query() {
        let filter = ProjectFilter::default();
        let qs = serde_qs::to_string(&ProjectListQuery::new(&filter, 1, 500)).unwrap();
        assert_eq!(qs, "page=1&size=500");
    }
}
