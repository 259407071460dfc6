pub mod center;
pub mod global_context;
pub mod left;
pub mod tabs;

use crate::shared::config::APP_TITLE;
use crate::shared::icons::icon;
use global_context::AppGlobalContext;
use leptos::prelude::*;

/// Application shell.
///
/// ```text
/// +------------------------------------+
/// |              top bar               |
/// +------------------------------------+
/// |  Sidebar  |         Tabs           |
/// |   (Left)  |       (Center)         |
/// +------------------------------------+
/// ```
#[component]
pub fn Shell<L, C>(left: L, center: C) -> impl IntoView
where
    L: Fn() -> AnyView + 'static + Send,
    C: Fn() -> AnyView + 'static + Send,
{
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <div class="app-layout">
            <div class="app-topbar">
                <button class="app-topbar__toggle" on:click=move |_| ctx.toggle_left() title="菜单">
                    {icon("menu")}
                </button>
                <span class="app-topbar__title">{APP_TITLE}</span>
            </div>

            <div class="app-body">
                <left::Left>
                    {left()}
                </left::Left>
                <center::Center>
                    {center()}
                </center::Center>
            </div>
        </div>
    }
}
