//! Tab titles. Detail tabs start with a generic label and are renamed by the
//! page once its record is loaded.

use super::keys::TabKey;
use contracts::domain::a002_product::EditorMode;

/// Readable title for a tab key. Unknown keys get an empty label.
pub fn tab_label_for_key(key: &str) -> &'static str {
    match TabKey::parse(key) {
        Some(TabKey::Operations) => "Panel de operaciones",
        Some(TabKey::Inventory) => "Inventario",
        Some(TabKey::StockEdit { .. }) => "Editar stock",
        Some(TabKey::Editor {
            mode: EditorMode::Product,
            id: None,
        }) => "Nuevo producto",
        Some(TabKey::Editor {
            mode: EditorMode::Presentation,
            id: None,
        }) => "Nueva presentación",
        Some(TabKey::Editor {
            mode: EditorMode::Product,
            ..
        }) => "Editar producto",
        Some(TabKey::Editor {
            mode: EditorMode::Presentation,
            ..
        }) => "Editar presentación",
        Some(TabKey::Invoice { .. }) => "Comprobante",
        None => "",
    }
}

/// «<entity> · <identifier>», e.g. `"Producto · Arroz 1lb"`.
pub fn detail_tab_label(entity_label: &str, identifier: &str) -> String {
    format!("{} · {}", entity_label, identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(tab_label_for_key("p900_inventory"), "Inventario");
        assert_eq!(tab_label_for_key("a002_product_edit_4"), "Editar producto");
        assert_eq!(tab_label_for_key("a003_sale_invoice_9"), "Comprobante");
        assert_eq!(tab_label_for_key("x"), "");
    }

    #[test]
    fn test_detail_tab_label() {
        assert_eq!(detail_tab_label("Venta", "#12"), "Venta · #12");
    }
}
