//! Cell renderers of the inventory table. Values come from the pure helpers
//! in `contracts::projections::p900_inventory::columns`.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::TabKey;
use crate::shared::clipboard::copy_to_clipboard_with_callback;
use crate::shared::icons::icon;
use crate::shared::list_utils::highlight_matches;
use crate::shared::toast::use_toast;
use chrono::NaiveDate;
use contracts::domain::a001_stock_lot::edit::format_quantity;
use contracts::domain::a001_stock_lot::StockKind;
use contracts::domain::a002_product::EditorMode;
use contracts::projections::p900_inventory::columns::{
    any_expired, branch_badges, days_since_expiry, inventory_value, is_expired, lots_by_expiry,
    lots_by_intake, more_label, proration_summary, split_visible, stock_edit_target,
    total_existing, StockEditTarget, VISIBLE_LOTS,
};
use contracts::projections::p900_inventory::{InventoryColumn, ProductInventoryRow, StockLot};
use contracts::shared::dates::parse_iso;
use contracts::shared::money::format_quetzal;
use leptos::prelude::*;

pub fn render_cell(
    column: InventoryColumn,
    row: &ProductInventoryRow,
    today: NaiveDate,
    search: &str,
    tabs_store: AppGlobalContext,
) -> AnyView {
    match column {
        InventoryColumn::Name => name_cell(row, search),
        InventoryColumn::Description => {
            let text = row.description.clone().unwrap_or_default();
            view! { <span class="inventory__description">{highlight_matches(&text, search)}</span> }
                .into_any()
        }
        InventoryColumn::Cost => view! {
            <span class="table__number">{format_quetzal(row.cost_price)}</span>
        }
        .into_any(),
        InventoryColumn::Proration => proration_cell(row),
        InventoryColumn::Existing => {
            let class = if any_expired(row, today) {
                "table__number inventory__existing--warning"
            } else {
                "table__number"
            };
            view! { <span class=class>{format_quantity(total_existing(row))}</span> }.into_any()
        }
        InventoryColumn::InventoryValue => view! {
            <span class="table__number">{format_quetzal(inventory_value(row))}</span>
        }
        .into_any(),
        InventoryColumn::Intakes => intakes_cell(row, tabs_store),
        InventoryColumn::Expiries => expiries_cell(row, today),
        InventoryColumn::Branches => branches_cell(row),
        InventoryColumn::Actions => actions_cell(row, tabs_store),
    }
}

fn name_cell(row: &ProductInventoryRow, search: &str) -> AnyView {
    let cover = row.cover_image().map(str::to_string);
    let type_name = row
        .presentation_type
        .as_ref()
        .map(|t| t.name().to_string())
        .filter(|n| !n.is_empty());
    let kind_class = match row.kind {
        StockKind::Product => "badge badge--primary",
        StockKind::Presentation => "badge badge--neutral",
    };
    view! {
        <div class="inventory__product">
            {match cover {
                Some(url) => view! { <img class="inventory__cover" src=url alt="" loading="lazy" /> }.into_any(),
                None => view! { <div class="inventory__cover inventory__cover--empty">{icon("products")}</div> }.into_any(),
            }}
            <div class="inventory__product-text">
                <span class="inventory__name">{highlight_matches(&row.name, search)}</span>
                <span class="inventory__code">{highlight_matches(&row.product_code, search)}</span>
                <span class=kind_class>{row.kind.label()}</span>
                {type_name.map(|name| view! { <span class="inventory__type">{name}</span> })}
            </div>
        </div>
    }
    .into_any()
}

fn proration_cell(row: &ProductInventoryRow) -> AnyView {
    let summary = proration_summary(row);
    let Some(value) = summary.headline_value() else {
        return view! { <span class="text-muted">"Sin prorrateo"</span> }.into_any();
    };
    let latest_date = summary
        .latest()
        .and_then(|t| parse_iso(&t.record.created_at))
        .map(|dt| dt.format("%d/%m/%Y").to_string())
        .unwrap_or_default();
    let count = summary.count();
    view! {
        <details class="inventory__proration">
            <summary>
                <span class="table__number">{format_quetzal(value)}</span>
                <span class="inventory__proration-meta">
                    {format!("{} registro{} · {}", count, if count == 1 { "" } else { "s" }, latest_date)}
                </span>
            </summary>
            <ul class="inventory__proration-list">
                {summary.records.into_iter().map(|t| {
                    let date = parse_iso(&t.record.created_at)
                        .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
                        .unwrap_or_default();
                    let resulting = t.record.resulting_unit_cost.unwrap_or(t.record.prorated_unit_cost);
                    view! {
                        <li>
                            <span>{format!("Lote #{} · {}", t.stock_id, date)}</span>
                            <span>{format!(
                                "Factura {} + gasto {} = {}",
                                format_quetzal(t.record.invoice_unit_cost),
                                format_quetzal(t.record.applied_unit_expense),
                                format_quetzal(resulting),
                            )}</span>
                            <span class="text-muted">{format!(
                                "Existencias {} → {}",
                                format_quantity(t.record.previous_stock),
                                format_quantity(t.record.new_stock),
                            )}</span>
                        </li>
                    }
                }).collect_view()}
            </ul>
        </details>
    }
    .into_any()
}

fn open_stock_edit(tabs_store: AppGlobalContext, target: StockEditTarget) {
    tabs_store.open(TabKey::StockEdit {
        id: target.stock_id,
        kind: Some(target.kind),
    });
}

fn lot_line(lot: &StockLot, date: Option<&str>) -> String {
    format!(
        "{} · {} u.",
        date.filter(|d| !d.trim().is_empty()).unwrap_or("Sin fecha"),
        format_quantity(lot.quantity)
    )
}

fn intakes_cell(row: &ProductInventoryRow, tabs_store: AppGlobalContext) -> AnyView {
    let lots = lots_by_intake(row);
    if lots.is_empty() {
        return view! { <span class="text-muted">"—"</span> }.into_any();
    }
    let (shown, extra) = split_visible(&lots, VISIBLE_LOTS);
    let render = |lot: &StockLot| {
        let target = stock_edit_target(row, lot);
        view! {
            <li class="inventory__lot">
                <span>{lot_line(lot, lot.intake_date.as_deref())}</span>
                <button
                    class="icon-button"
                    title="Editar fechas"
                    on:click=move |_| open_stock_edit(tabs_store, target)
                >
                    {icon("edit")}
                </button>
            </li>
        }
    };
    let shown_view = shown.iter().map(|&lot| render(lot)).collect_view();
    let hidden_view = lots[shown.len()..].iter().map(|&lot| render(lot)).collect_view();
    view! {
        <ul class="inventory__lots">{shown_view}</ul>
        {(extra > 0).then(|| view! {
            <details class="inventory__more">
                <summary>{more_label(extra)}</summary>
                <ul class="inventory__lots">{hidden_view}</ul>
            </details>
        })}
    }
    .into_any()
}

fn expiries_cell(row: &ProductInventoryRow, today: NaiveDate) -> AnyView {
    let lots = lots_by_expiry(row, today);
    if lots.is_empty() {
        return view! { <span class="text-muted">"—"</span> }.into_any();
    }
    let (shown, extra) = split_visible(&lots, VISIBLE_LOTS);
    let render = |lot: &StockLot| {
        let class = if is_expired(lot, today) {
            "inventory__lot inventory__lot--expired"
        } else {
            "inventory__lot"
        };
        let overdue = days_since_expiry(lot, today).map(|days| {
            view! { <span class="inventory__overdue">{format!("Vencido hace {} días", days)}</span> }
        });
        view! {
            <li class=class>
                <span>{lot_line(lot, lot.expiry_date.as_deref())}</span>
                {overdue}
            </li>
        }
    };
    let shown_view = shown.iter().map(|&lot| render(lot)).collect_view();
    let hidden_view = lots[shown.len()..].iter().map(|&lot| render(lot)).collect_view();
    view! {
        <ul class="inventory__lots">{shown_view}</ul>
        {(extra > 0).then(|| view! {
            <details class="inventory__more">
                <summary>{more_label(extra)}</summary>
                <ul class="inventory__lots">{hidden_view}</ul>
            </details>
        })}
    }
    .into_any()
}

fn branches_cell(row: &ProductInventoryRow) -> AnyView {
    let (shown, extra) = branch_badges(row);
    let hidden: Vec<String> = row.branch_stocks[shown.len()..]
        .iter()
        .map(|b| format!("{}: {}", b.name, format_quantity(b.quantity)))
        .collect();
    view! {
        <div class="inventory__branches">
            {shown.iter().map(|b| view! {
                <span class="badge badge--neutral">
                    {format!("{}: {}", b.name, format_quantity(b.quantity))}
                </span>
            }).collect_view()}
            {(extra > 0).then(|| view! {
                <span class="badge badge--primary" title=hidden.join("\n")>{format!("+{}", extra)}</span>
            })}
        </div>
    }
    .into_any()
}

/// Editor tab of the row: products by their id, presentations by theirs.
fn editor_tab(row: &ProductInventoryRow) -> TabKey {
    match row.kind {
        StockKind::Product => TabKey::Editor {
            mode: EditorMode::Product,
            id: Some(if row.product_id > 0 { row.product_id } else { row.id }),
        },
        StockKind::Presentation => TabKey::Editor {
            mode: EditorMode::Presentation,
            id: Some(row.id),
        },
    }
}

/// What "Copiar ID" puts on the clipboard: the row's own id.
fn copied_id(row: &ProductInventoryRow) -> String {
    row.id.to_string()
}

fn actions_cell(row: &ProductInventoryRow, tabs_store: AppGlobalContext) -> AnyView {
    let tab = editor_tab(row);
    let title = format!("Editar {}", row.kind.label().to_lowercase());
    let toast = use_toast();
    let id_text = copied_id(row);
    view! {
        <div class="table__actions">
            <button class="icon-button" title=title on:click=move |_| tabs_store.open(tab)>
                {icon("edit")}
            </button>
            <button
                class="icon-button"
                title="Copiar ID"
                on:click=move |_| copy_to_clipboard_with_callback(&id_text, move || toast.success("ID copiado"))
            >
                {icon("copy")}
            </button>
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(json: &str) -> ProductInventoryRow {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_row_actions() {
        let product = row(r#"{"id": 12, "productoId": null, "type": "PRODUCTO"}"#);
        assert_eq!(
            editor_tab(&product),
            TabKey::Editor { mode: EditorMode::Product, id: Some(12) }
        );
        assert_eq!(copied_id(&product), "12");

        let presentation = row(r#"{"id": 30, "productoId": 12, "type": "PRESENTACION"}"#);
        assert_eq!(
            editor_tab(&presentation),
            TabKey::Editor { mode: EditorMode::Presentation, id: Some(30) }
        );
        assert_eq!(copied_id(&presentation), "30");
    }
}
