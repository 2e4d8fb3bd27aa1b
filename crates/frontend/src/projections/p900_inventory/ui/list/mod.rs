mod cells;
pub mod state;

use self::cells::render_cell;
use self::state::create_state;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::api_utils::get_json;
use crate::shared::clock::local_today;
use crate::shared::components::status::{EmptyBlock, ErrorBlock, LoadingBlock};
use crate::shared::components::ui::badge::Badge;
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_class, get_sort_indicator, next_sort};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::query_cache::use_query_cache;
use crate::system::session::use_session;
use contracts::projections::p900_inventory::sorting::{compare_rows, matches_search};
use contracts::projections::p900_inventory::{
    inventory_columns, InventoryColumn, ProductInventoryRow, INVENTORY_PATH,
};
use contracts::shared::query_key::QueryKey;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn InventoryList() -> impl IntoView {
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let session = use_session();
    let cache = use_query_cache();
    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        let _ = cache.version(&QueryKey::Inventory);
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match get_json::<Vec<ProductInventoryRow>>(INVENTORY_PATH).await {
                Ok(rows) => {
                    log::debug!("inventory: {} rows", rows.len());
                    state.update(|s| {
                        s.items = rows;
                        s.is_loaded = true;
                    });
                }
                Err(e) => {
                    log::error!("inventory load failed: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    });

    let search_query = RwSignal::new(state.get_untracked().search_query.clone());
    Effect::new(move || {
        let v = search_query.get();
        untrack(move || {
            state.update(|s| s.search_query = v);
        });
    });

    let columns = Memo::new(move |_| inventory_columns(&session.role()));

    let visible_rows = Memo::new(move |_| {
        state.with(|s| {
            let mut rows: Vec<ProductInventoryRow> = s
                .items
                .iter()
                .filter(|row| matches_search(row, &s.search_query))
                .cloned()
                .collect();
            if let Some(column) = InventoryColumn::from_id(&s.sort_field).filter(|c| c.is_sortable()) {
                rows.sort_by(|a, b| {
                    let ordering = compare_rows(a, b, column);
                    if s.sort_ascending {
                        ordering
                    } else {
                        ordering.reverse()
                    }
                });
            }
            rows
        })
    });

    let toggle_sort = move |field: &'static str| {
        state.update(|s| {
            let (sort_field, sort_ascending) = next_sort(&s.sort_field, s.sort_ascending, field);
            s.sort_field = sort_field;
            s.sort_ascending = sort_ascending;
        });
    };

    let header_cell = move |column: InventoryColumn| {
        if !column.is_sortable() {
            return view! {
                <TableHeaderCell resizable=false>{column.title()}</TableHeaderCell>
            }
            .into_any();
        }
        let field = column.id();
        view! {
            <TableHeaderCell resizable=false>
                <div class="table__sortable-header" style="cursor: pointer;" on:click=move |_| toggle_sort(field)>
                    {column.title()}
                    <span class=move || state.with(|s| get_sort_class(&s.sort_field, field))>
                        {move || state.with(|s| get_sort_indicator(&s.sort_field, field, s.sort_ascending))}
                    </span>
                </div>
            </TableHeaderCell>
        }
        .into_any()
    };

    view! {
        <PageFrame page_id="p900_inventory--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("inventory")}
                    <h1 class="page__title">"Inventario"</h1>
                    <Badge variant="primary".to_string()>
                        {move || visible_rows.with(|rows| rows.len()).to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <div style="width: 280px;">
                        <Input value=search_query placeholder="Buscar por nombre, descripción o código" />
                    </div>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| cache.invalidate(&QueryKey::Inventory)
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { "Cargando..." } else { "Actualizar" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || {
                    if let Some(message) = error.get() {
                        return view! {
                            <ErrorBlock
                                message=format!("No se pudo cargar el inventario: {}", message)
                                on_retry=Callback::new(move |_| cache.invalidate(&QueryKey::Inventory))
                            />
                        }
                        .into_any();
                    }
                    if !state.with(|s| s.is_loaded) {
                        return view! { <LoadingBlock label="Cargando inventario..." /> }.into_any();
                    }
                    if visible_rows.with(|rows| rows.is_empty()) {
                        return view! { <EmptyBlock label="No hay productos que coincidan" /> }.into_any();
                    }
                    let today = local_today();
                    view! {
                        <div class="table-wrapper">
                            <Table class="table__data inventory__table">
                                <TableHeader>
                                    <TableRow>
                                        {columns.get().into_iter().map(header_cell).collect_view()}
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    {move || {
                                        let columns = columns.get();
                                        let search = state.with(|s| s.search_query.clone());
                                        visible_rows.get().into_iter().map(|row| {
                                            let cells = columns.iter().map(|&column| {
                                                let row = row.clone();
                                                let search = search.clone();
                                                view! {
                                                <TableCell>
                                                    <TableCellLayout>
                                                        {render_cell(column, &row, today, &search, tabs_store)}
                                                    </TableCellLayout>
                                                </TableCell>
                                                }
                                            }).collect_view();
                                            view! { <TableRow>{cells}</TableRow> }
                                        }).collect_view()
                                    }}
                                </TableBody>
                            </Table>
                        </div>
                    }
                    .into_any()
                }}
            </div>
        </PageFrame>
    }
}
