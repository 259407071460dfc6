pub mod state;

use self::state::create_state;
use crate::domain::a001_project::api;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::selection_banner::SelectionBanner;
use crate::shared::components::table::{TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::components::ui::badge::{Badge as UiBadge, StatusBadge};
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::number_format::{format_currency, format_percent, progress_ratio};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::selection::use_keyed_selection;
use contracts::domain::a001_project::{ProjectDto, ProjectStatus};
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashSet;
use thaw::*;

const STATUS_OPTIONS: [ProjectStatus; 4] = [
    ProjectStatus::Draft,
    ProjectStatus::Processing,
    ProjectStatus::Completed,
    ProjectStatus::Failed,
];

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[component]
pub fn ProjectList() -> impl IntoView {
    let state = create_state();
    let selection = use_keyed_selection::<ProjectDto>();
    // checkboxes shown on the current page
    let visual = RwSignal::new(HashSet::<i64>::new());

    let (loading, set_loading) = signal(false);
    let (busy, set_busy) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);
    let (is_filter_expanded, set_is_filter_expanded) = signal(false);

    let sync_visual = move || {
        state.with_untracked(|s| {
            selection.reconcile_view(
                &s.items,
                || visual.set(HashSet::new()),
                |row, on| {
                    visual.update(|v| {
                        if on {
                            v.insert(row.id);
                        } else {
                            v.remove(&row.id);
                        }
                    })
                },
            )
        });
    };

    let load_items = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);

            let (filter, page, page_size) =
                state.with_untracked(|s| (s.filter(), s.page, s.page_size));

            match api::fetch_projects(&filter, page + 1, page_size).await {
                Ok(data) => {
                    let total_pages = data.total_pages();
                    state.update(|s| {
                        s.items = data.items;
                        s.total_count = data.total;
                        s.total_pages = total_pages;
                        s.is_loaded = true;
                    });
                    sync_visual();
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            log!("Loading projects...");
            load_items();
        }
    });

    let search_query = RwSignal::new(state.get_untracked().name_query.clone());
    Effect::new(move || {
        let v = search_query.get();
        untrack(move || state.update(|s| s.name_query = v));
    });

    let apply_filter = move || {
        // "select all" means all rows of the filter, so a new filter starts over
        selection.clear_all();
        state.update(|s| s.apply_filter());
        load_items();
    };

    let go_to_page = move |new_page: usize| {
        state.update(|s| s.page = new_page);
        load_items();
    };

    let change_page_size = move |new_size: usize| {
        state.update(|s| {
            s.page_size = new_size;
            s.page = 0;
        });
        load_items();
    };

    let emit_selection = move || {
        let page_rows = state.with_untracked(|s| s.items.clone());
        let selected_rows: Vec<ProjectDto> = visual.with_untracked(|v| {
            page_rows
                .iter()
                .filter(|row| v.contains(&row.id))
                .cloned()
                .collect()
        });
        selection.on_selection_changed(&selected_rows, &page_rows);
    };

    let toggle_selection = move |id: i64, checked: bool| {
        visual.update(|v| {
            if checked {
                v.insert(id);
            } else {
                v.remove(&id);
            }
        });
        emit_selection();
    };

    let toggle_all = move |check_all: bool| {
        let page_ids: HashSet<i64> = if check_all {
            state.with_untracked(|s| s.items.iter().map(|p| p.id).collect())
        } else {
            HashSet::new()
        };
        visual.set(page_ids);
        emit_selection();
    };

    let select_all_pages = move |_| {
        selection.toggle_select_all(true);
        sync_visual();
    };

    let clear_selection = move |_| {
        selection.clear_all();
        sync_visual();
    };

    let total_count = Signal::derive(move || state.with(|s| s.total_count));
    let selected_count = selection.selected_count(move || state.with(|s| s.total_count));

    let delete_selected = move || {
        let count = selected_count.get_untracked();
        if count == 0 || !confirm(&format!("确定删除选中的 {} 个项目吗？", count)) {
            return;
        }
        spawn_local(async move {
            set_busy.set(true);
            set_error.set(None);
            set_notice.set(None);

            let filter = state.with_untracked(|s| s.filter());
            let resolved = selection
                .resolve_selected_keys(Some(move || api::fetch_all_project_ids(filter)))
                .await;

            match resolved {
                Err(e) => set_error.set(Some(e)),
                Ok(ids) if ids.is_empty() => set_notice.set(Some("没有需要删除的项目".into())),
                Ok(ids) => {
                    log!("Deleting {} project(s)", ids.len());
                    match api::batch_delete_projects(ids).await {
                        Ok(resp) => {
                            let mut message = resp.message;
                            if resp.failed_count > 0 {
                                message.push_str(&format!(
                                    "（{} 个失败: {:?}）",
                                    resp.failed_count, resp.failed_projects
                                ));
                            }
                            set_notice.set(Some(message));
                            selection.clear_all();
                            load_items();
                        }
                        Err(e) => set_error.set(Some(e)),
                    }
                }
            }
            set_busy.set(false);
        });
    };

    let items_signal = Signal::derive(move || state.get().items);
    let visual_signal = Signal::derive(move || visual.get());
    let active_filters_count = Signal::derive(move || state.with(|s| s.active_filters_count()));

    view! {
        <PageFrame page_id="a001_project--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"项目管理"</h1>
                    <UiBadge variant="primary".to_string()>
                        {move || total_count.get().to_string()}
                    </UiBadge>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <div class="filter-panel-header">
                        <div
                            class="filter-panel-header__left"
                            on:click=move |_| set_is_filter_expanded.update(|e| *e = !*e)
                        >
                            <span class=move || {
                                if is_filter_expanded.get() {
                                    "filter-panel__chevron filter-panel__chevron--expanded"
                                } else {
                                    "filter-panel__chevron"
                                }
                            }>
                                {icon("chevron-down")}
                            </span>
                            <span class="filter-panel__title">"筛选"</span>
                            {move || {
                                let count = active_filters_count.get();
                                (count > 0).then(|| view! { <span class="filter-panel__badge">{count}</span> })
                            }}
                        </div>

                        <div class="filter-panel-header__center">
                            <PaginationControls
                                current_page=Signal::derive(move || state.with(|s| s.page))
                                total_pages=Signal::derive(move || state.with(|s| s.total_pages))
                                total_count=total_count
                                page_size=Signal::derive(move || state.with(|s| s.page_size))
                                on_page_change=Callback::new(go_to_page)
                                on_page_size_change=Callback::new(change_page_size)
                            />
                        </div>

                        <div class="filter-panel-header__right">
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| load_items()
                                disabled=Signal::derive(move || loading.get())
                            >
                                {icon("refresh")}
                                {move || if loading.get() { "加载中..." } else { "刷新" }}
                            </Button>
                        </div>
                    </div>

                    <Show when=move || is_filter_expanded.get()>
                        <div class="filter-panel-content">
                            <Flex gap=FlexGap::Small align=FlexAlign::End>
                                <div style="flex: 1; max-width: 360px;">
                                    <Flex vertical=true gap=FlexGap::Small>
                                        <Label>"项目名称:"</Label>
                                        <Input value=search_query placeholder="输入项目名称" />
                                    </Flex>
                                </div>
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"状态:"</Label>
                                    <select
                                        class="filter-select"
                                        on:change=move |ev| {
                                            let value = event_target_value(&ev);
                                            state.update(|s| s.status = ProjectStatus::from_str(&value));
                                        }
                                    >
                                        <option value="" selected=move || state.with(|s| s.status.is_none())>
                                            "全部"
                                        </option>
                                        {STATUS_OPTIONS.iter().map(|&status| view! {
                                            <option
                                                value=status.as_str()
                                                selected=move || state.with(|s| s.status == Some(status))
                                            >
                                                {status.display_name()}
                                            </option>
                                        }).collect_view()}
                                    </select>
                                </Flex>
                                <Button
                                    appearance=ButtonAppearance::Secondary
                                    on_click=move |_| apply_filter()
                                    disabled=Signal::derive(move || loading.get())
                                >
                                    "查询"
                                </Button>
                            </Flex>
                        </div>
                    </Show>
                </div>

                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}
                {move || notice.get().map(|msg| view! { <div class="alert alert--success">{msg}</div> })}

                <SelectionBanner
                    selected_count=selected_count
                    total_count=total_count
                    all_selected=selection.all_selected()
                    on_select_all=Callback::new(select_all_pages)
                    on_clear=Callback::new(clear_selection)
                >
                    <Button
                        appearance=ButtonAppearance::Primary
                        class="button--danger"
                        on_click=move |_| delete_selected()
                        disabled=Signal::derive(move || busy.get())
                    >
                        {icon("trash")}
                        {move || if busy.get() { "删除中..." } else { "批量删除" }}
                    </Button>
                </SelectionBanner>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 960px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCheckbox
                                    items=items_signal
                                    selected=visual_signal
                                    get_id=Callback::new(|row: ProjectDto| row.id)
                                    on_change=Callback::new(toggle_all)
                                />
                                <TableHeaderCell resizable=false min_width=220.0>"项目名称"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=120.0>"项目编号"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=100.0>"项目类型"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=90.0>"状态"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=140.0>"分析进度"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=120.0>"预算金额"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=110.0>"创建时间"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || state.get().items
                                key=|item| item.id
                                children=move |item: ProjectDto| {
                                    let progress = match progress_ratio(item.analyzed_materials, item.total_materials) {
                                        Some(ratio) => format!(
                                            "{}/{} ({})",
                                            item.analyzed_materials.unwrap_or(0),
                                            item.total_materials.unwrap_or(0),
                                            format_percent(ratio, 0)
                                        ),
                                        None => "—".to_string(),
                                    };
                                    view! {
                                        <TableRow>
                                            <TableCellCheckbox
                                                item_id=item.id
                                                selected=visual_signal
                                                on_change=Callback::new(move |(id, checked)| toggle_selection(id, checked))
                                            />
                                            <TableCell>
                                                <TableCellLayout truncate=true>{item.name.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-family: monospace; font-size: var(--font-size-xs);">
                                                        {item.project_code.clone().unwrap_or_else(|| "—".to_string())}
                                                    </span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {item.project_type.clone().unwrap_or_else(|| "—".to_string())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <StatusBadge status=item.status />
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{progress}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {item.budget_amount.map(format_currency).unwrap_or_else(|| "—".to_string())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format_date(item.created_at.as_ref())}</TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
            </div>
        </PageFrame>
    }
}
