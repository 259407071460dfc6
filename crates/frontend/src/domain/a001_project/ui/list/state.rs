use contracts::domain::a001_project::{ProjectDto, ProjectFilter, ProjectStatus};
use leptos::prelude::*;

use crate::shared::config::DEFAULT_PAGE_SIZE;

#[derive(Clone, Debug)]
pub struct ProjectListState {
    pub items: Vec<ProjectDto>,
    /// Draft inputs; only [`ProjectListState::apply_filter`] makes them effective.
    pub name_query: String,
    pub status: Option<ProjectStatus>,
    applied: ProjectFilter,
    pub is_loaded: bool,
    /// 0-indexed; the API is 1-based
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

impl Default for ProjectListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            name_query: String::new(),
            status: None,
            applied: ProjectFilter::default(),
            is_loaded: false,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            total_count: 0,
            total_pages: 0,
        }
    }
}

impl ProjectListState {
    /// Filter of the rows currently listed.
    pub fn filter(&self) -> ProjectFilter {
        self.applied.clone()
    }

    fn draft_filter(&self) -> ProjectFilter {
        let name = self.name_query.trim();
        ProjectFilter {
            name: (!name.is_empty()).then(|| name.to_string()),
            status: self.status,
            project_type: None,
        }
    }

    pub fn apply_filter(&mut self) {
        self.applied = self.draft_filter();
        self.page = 0;
    }

    pub fn active_filters_count(&self) -> usize {
        usize::from(self.applied.name.is_some()) + usize::from(self.applied.status.is_some())
    }
}

pub fn create_state() -> RwSignal<ProjectListState> {
    RwSignal::new(ProjectListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_state() {
        let mut state = ProjectListState::default();
        assert_eq!(state.filter(), ProjectFilter::default());
        assert_eq!(state.active_filters_count(), 0);

        state.name_query = "  地铁 ".into();
        state.status = Some(ProjectStatus::Processing);
        state.apply_filter();
        let filter = state.filter();
        assert_eq!(filter.name.as_deref(), Some("地铁"));
        assert_eq!(filter.status, Some(ProjectStatus::Processing));
        assert_eq!(state.active_filters_count(), 2);
    }

    #[test]
    fn test_draft_inputs_do_not_change_listed_filter() {
        let mut state = ProjectListState::default();
        state.status = Some(ProjectStatus::Completed);
        state.apply_filter();
        state.page = 3;

        state.status = Some(ProjectStatus::Draft);
        state.name_query = "桥梁".into();
        assert_eq!(state.filter().status, Some(ProjectStatus::Completed));
        assert_eq!(state.filter().name, None);
        assert_eq!(state.active_filters_count(), 1);
        assert_eq!(state.page, 3);

        state.apply_filter();
        assert_eq!(state.filter().status, Some(ProjectStatus::Draft));
        assert_eq!(state.filter().name.as_deref(), Some("桥梁"));
        assert_eq!(state.page, 0);
    }
}
