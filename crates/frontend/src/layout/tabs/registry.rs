//! Maps a tab key to the page it renders.

use super::tab_labels::{A001_PROJECT, A002_BASE_MATERIAL};
use crate::domain::a001_project::ui::list::ProjectList;
use crate::domain::a002_base_material::ui::list::BaseMaterialList;
use leptos::logging::log;
use leptos::prelude::*;

pub fn render_tab_content(key: &str) -> AnyView {
    match key {
        A001_PROJECT => view! { <ProjectList /> }.into_any(),
        A002_BASE_MATERIAL => view! { <BaseMaterialList /> }.into_any(),
        _ => {
            log!("Unknown tab type: {}", key);
            view! { <div class="placeholder">"页面不存在"</div> }.into_any()
        }
    }
}
