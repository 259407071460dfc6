use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audit project lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Draft,
    Processing,
    Completed,
    Failed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::Processing => "processing",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Failed => "failed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "草稿",
            ProjectStatus::Processing => "分析中",
            ProjectStatus::Completed => "已完成",
            ProjectStatus::Failed => "失败",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(ProjectStatus::Draft),
            "processing" => Some(ProjectStatus::Processing),
            "completed" => Some(ProjectStatus::Completed),
            "failed" => Some(ProjectStatus::Failed),
            _ => None,
        }
    }
}

/// Project row as returned by `GET /projects/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub project_code: Option<String>,
    #[serde(default)]
    pub project_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub contractor: Option<String>,
    /// Construction cost, in units of 10k CNY
    #[serde(default)]
    pub budget_amount: Option<f64>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub total_materials: Option<i64>,
    #[serde(default)]
    pub analyzed_materials: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Filter part of the project listing query
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProjectFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
}
