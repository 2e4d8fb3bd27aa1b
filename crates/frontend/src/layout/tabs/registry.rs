//! Maps a tab key to the page it shows.

use super::keys::TabKey;
use crate::dashboards::d400_operations::ui::OperationsDashboard;
use crate::domain::a001_stock_lot::ui::edit::EditStockPage;
use crate::domain::a002_product::ui::editor::ProductEditor;
use crate::domain::a003_sale::ui::invoice::InvoicePage;
use crate::layout::global_context::AppGlobalContext;
use crate::projections::p900_inventory::ui::list::InventoryList;
use leptos::prelude::*;

/// Renders the content of a tab, or a placeholder for unknown keys.
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();
    let on_close = Callback::new(move |_| tabs_store.close_tab(&key_for_close));

    match TabKey::parse(key) {
        Some(TabKey::Operations) => view! { <OperationsDashboard /> }.into_any(),
        Some(TabKey::Inventory) => view! { <InventoryList /> }.into_any(),
        Some(TabKey::StockEdit { id, kind }) => view! {
            <EditStockPage id=id kind=kind tab_key=key.to_string() on_close=on_close />
        }
        .into_any(),
        Some(TabKey::Editor { mode, id }) => view! {
            <ProductEditor mode=mode id=id tab_key=key.to_string() on_close=on_close />
        }
        .into_any(),
        Some(TabKey::Invoice { sale_id }) => view! {
            <InvoicePage sale_id=sale_id tab_key=key.to_string() on_close=on_close />
        }
        .into_any(),
        None => {
            log::warn!("unknown tab key: {}", key);
            view! { <div class="placeholder">{format!("Sección desconocida: {}", key)}</div> }
                .into_any()
        }
    }
}
