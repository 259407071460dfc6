use contracts::domain::a001_project::ProjectStatus;
use leptos::prelude::*;

/// Badge component with different variants
#[component]
pub fn Badge(
    /// Badge variant: "primary", "success", "warning", "error", "neutral" (default)
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    children: Children,
    #[prop(optional, into)]
    class: MaybeProp<String>,
) -> impl IntoView {
    let variant_class = move || variant_class(variant.get().as_deref().unwrap_or("neutral"));
    let additional_class = move || class.get().unwrap_or_default();

    view! {
        <span class=move || format!("badge {} {}", variant_class(), additional_class())>
            {children()}
        </span>
    }
}

/// Project status pill
#[component]
pub fn StatusBadge(status: ProjectStatus) -> impl IntoView {
    view! {
        <span class=format!("badge badge--status {}", variant_class(status_variant(status)))>
            {status.display_name()}
        </span>
    }
}

fn variant_class(variant: &str) -> &'static str {
    match variant {
        "primary" => "badge--primary",
        "success" => "badge--success",
        "warning" => "badge--warning",
        "error" => "badge--error",
        _ => "badge--neutral",
    }
}

pub fn status_variant(status: ProjectStatus) -> &'static str {
    match status {
        ProjectStatus::Draft => "neutral",
        ProjectStatus::Processing => "primary",
        ProjectStatus::Completed => "success",
        ProjectStatus::Failed => "error",
    }
}
