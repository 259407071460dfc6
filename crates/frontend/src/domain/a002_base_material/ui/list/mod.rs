pub mod state;

use self::state::{create_state, parse_verified, tax_price_range};
use crate::domain::a002_base_material::api;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::selection_banner::SelectionBanner;
use crate::shared::components::table::{TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::components::ui::badge::Badge as UiBadge;
use crate::shared::date_utils::format_date_str;
use crate::shared::icons::icon;
use crate::shared::number_format::format_currency;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::selection::use_keyed_selection;
use contracts::domain::a002_base_material::{BaseMaterialDto, BatchOperation};
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashSet;
use thaw::*;

#[component]
pub fn BaseMaterialList() -> impl IntoView {
    let state = create_state();
    let selection = use_keyed_selection::<BaseMaterialDto>();
    let visual = RwSignal::new(HashSet::<i64>::new());

    let (loading, set_loading) = signal(false);
    let (busy, set_busy) = signal::<Option<BatchOperation>>(None);
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

            match api::fetch_materials(&filter, page + 1, page_size).await {
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
            log!("Loading base materials...");
            load_items();
        }
    });

    let name_query = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());
    let region = RwSignal::new(String::new());

    let apply_filter = move || {
        selection.clear_all();
        state.update(|s| {
            s.name_query = name_query.get_untracked();
            s.category = category.get_untracked();
            s.region = region.get_untracked();
            s.apply_filter();
        });
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
        let selected_rows: Vec<BaseMaterialDto> = visual.with_untracked(|v| {
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
            state.with_untracked(|s| s.items.iter().map(|m| m.id).collect())
        } else {
            HashSet::new()
        };
        visual.set(page_ids);
        emit_selection();
    };

    let total_count = Signal::derive(move || state.with(|s| s.total_count));
    let selected_count = selection.selected_count(move || state.with(|s| s.total_count));

    let run_batch = move |operation: BatchOperation| {
        let count = selected_count.get_untracked();
        if count == 0 {
            return;
        }
        if operation == BatchOperation::Delete {
            let confirmed = web_sys::window()
                .and_then(|w| {
                    w.confirm_with_message(&format!("确定删除选中的 {} 条材料吗？", count))
                        .ok()
                })
                .unwrap_or(false);
            if !confirmed {
                return;
            }
        }

        spawn_local(async move {
            set_busy.set(Some(operation));
            set_error.set(None);
            set_notice.set(None);

            let filter = state.with_untracked(|s| s.filter());
            let resolved = selection
                .resolve_selected_keys(Some(move || api::fetch_all_material_ids(filter)))
                .await;

            match resolved {
                Err(e) => set_error.set(Some(e)),
                Ok(ids) if ids.is_empty() => set_notice.set(Some("没有符合条件的材料".into())),
                Ok(ids) => {
                    log!("{} on {} material(s)", operation.display_name(), ids.len());
                    match api::batch_operation(operation, ids).await {
                        Ok(resp) => {
                            set_notice.set(Some(resp.message));
                            selection.clear_all();
                            load_items();
                        }
                        Err(e) => set_error.set(Some(e)),
                    }
                }
            }
            set_busy.set(None);
        });
    };

    let items_signal = Signal::derive(move || state.get().items);
    let visual_signal = Signal::derive(move || visual.get());
    let active_filters_count = Signal::derive(move || state.with(|s| s.active_filters_count()));
    let is_busy = Signal::derive(move || busy.get().is_some());

    let batch_button = move |operation: BatchOperation, appearance: ButtonAppearance| {
        view! {
            <Button
                appearance=appearance
                on_click=move |_| run_batch(operation)
                disabled=is_busy
            >
                {move || {
                    if busy.get() == Some(operation) {
                        "处理中...".to_string()
                    } else {
                        operation.display_name().to_string()
                    }
                }}
            </Button>
        }
    };

    view! {
        <PageFrame page_id="a002_base_material--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"基准材料库"</h1>
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
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"材料名称:"</Label>
                                    <Input value=name_query placeholder="名称或编码" />
                                </Flex>
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"分类:"</Label>
                                    <Input value=category placeholder="如 钢材" />
                                </Flex>
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"地区:"</Label>
                                    <Input value=region placeholder="如 北京" />
                                </Flex>
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"审核状态:"</Label>
                                    <select
                                        class="filter-select"
                                        on:change=move |ev| {
                                            let value = event_target_value(&ev);
                                            state.update(|s| s.is_verified = parse_verified(&value));
                                        }
                                    >
                                        <option value="">"全部"</option>
                                        <option value="true">"已审核"</option>
                                        <option value="false">"未审核"</option>
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
                    on_select_all=Callback::new(move |_| {
                        selection.toggle_select_all(true);
                        sync_visual();
                    })
                    on_clear=Callback::new(move |_| {
                        selection.clear_all();
                        sync_visual();
                    })
                >
                    {batch_button(BatchOperation::Verify, ButtonAppearance::Primary)}
                    {batch_button(BatchOperation::Unverify, ButtonAppearance::Secondary)}
                    {batch_button(BatchOperation::Delete, ButtonAppearance::Secondary)}
                </SelectionBanner>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 1100px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCheckbox
                                    items=items_signal
                                    selected=visual_signal
                                    get_id=Callback::new(|row: BaseMaterialDto| row.id)
                                    on_change=Callback::new(toggle_all)
                                />
                                <TableHeaderCell resizable=false min_width=110.0>"材料编码"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=200.0>"材料名称"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=160.0>"规格型号"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=60.0>"单位"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=110.0>"价格"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=90.0>"地区"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=100.0>"信息价期数"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=120.0>"来源"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=80.0>"审核"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || state.get().items
                                key=|item| item.id
                                children=move |item: BaseMaterialDto| {
                                    let dash = || "—".to_string();
                                    let price_title = tax_price_range(&item);
                                    view! {
                                        <TableRow>
                                            <TableCellCheckbox
                                                item_id=item.id
                                                selected=visual_signal
                                                on_change=Callback::new(move |(id, checked)| toggle_selection(id, checked))
                                            />
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-family: monospace; font-size: var(--font-size-xs);">
                                                        {item.material_code.clone().unwrap_or_else(dash)}
                                                    </span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{item.name.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {item.specification.clone().unwrap_or_else(dash)}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{item.unit.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span title=price_title>{format_currency(item.price)}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{item.region.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {item.price_date.as_deref().map(format_date_str).unwrap_or_else(dash)}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {item.source.clone().unwrap_or_else(dash)}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {if item.is_verified {
                                                        view! { <span class="badge badge--success">"已审核"</span> }.into_any()
                                                    } else {
                                                        view! { <span class="badge badge--neutral">"未审核"</span> }.into_any()
                                                    }}
                                                </TableCellLayout>
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
