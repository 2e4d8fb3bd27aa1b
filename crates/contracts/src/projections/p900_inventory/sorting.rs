//! Column comparators for the inventory table.

use super::columns::{inventory_value, latest_proration_millis, total_existing, InventoryColumn};
use super::dto::ProductInventoryRow;
use std::cmp::Ordering;

/// Primary collation weight of a character in Spanish order: case and
/// accents are ignored, `ñ` sorts right after `n`.
fn collation_weight(c: char) -> u32 {
    let folded = match c {
        'á' | 'à' | 'ä' | 'â' | 'Á' | 'À' | 'Ä' | 'Â' => 'a',
        'é' | 'è' | 'ë' | 'ê' | 'É' | 'È' | 'Ë' | 'Ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' | 'Í' | 'Ì' | 'Ï' | 'Î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' | 'Ó' | 'Ò' | 'Ö' | 'Ô' => 'o',
        'ú' | 'ù' | 'ü' | 'û' | 'Ú' | 'Ù' | 'Ü' | 'Û' => 'u',
        'ñ' | 'Ñ' => return ('n' as u32) * 2 + 1,
        other => other.to_lowercase().next().unwrap_or(other),
    };
    (folded as u32) * 2
}

/// Case- and accent-insensitive comparison in Spanish alphabetical order.
pub fn compare_spanish(a: &str, b: &str) -> Ordering {
    a.trim()
        .chars()
        .map(collation_weight)
        .cmp(b.trim().chars().map(collation_weight))
}

fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Ascending comparison of two rows by a sortable column. Non-sortable
/// columns compare equal.
pub fn compare_rows(a: &ProductInventoryRow, b: &ProductInventoryRow, column: InventoryColumn) -> Ordering {
    match column {
        InventoryColumn::Name => compare_spanish(&a.name, &b.name),
        InventoryColumn::Cost => compare_f64(a.cost_price, b.cost_price),
        InventoryColumn::Proration => latest_proration_millis(a).cmp(&latest_proration_millis(b)),
        InventoryColumn::Existing => compare_f64(total_existing(a), total_existing(b)),
        InventoryColumn::InventoryValue => compare_f64(inventory_value(a), inventory_value(b)),
        _ => Ordering::Equal,
    }
}

/// Case-insensitive substring filter over name, description and code.
pub fn matches_search(row: &ProductInventoryRow, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [
        Some(row.name.as_str()),
        row.description.as_deref(),
        Some(row.product_code.as_str()),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spanish_order() {
        let mut names = vec!["ñandú", "Nube", "oso", "árbol", "Zapato", "avión"];
        names.sort_by(|a, b| compare_spanish(a, b));
        assert_eq!(names, vec!["árbol", "avión", "Nube", "ñandú", "oso", "Zapato"]);
    }

    #[test]
    fn test_case_and_accents_ignored() {
        assert_eq!(compare_spanish("Cámara", "camara"), Ordering::Equal);
        assert_eq!(compare_spanish("  Funda", "funda"), Ordering::Equal);
    }

    #[test]
    fn test_compare_rows_numeric_columns() {
        let json = |cost: &str, qty: f64| {
            serde_json::from_value::<ProductInventoryRow>(serde_json::json!({
                "id": 1,
                "nombre": "x",
                "precioCosto": cost,
                "stocksBySucursal": [{"sucursalId": 1, "nombre": "A", "cantidad": qty}]
            }))
            .unwrap()
        };
        let cheap = json("9.5", 10.0);
        let pricey = json("10", 2.0);
        assert_eq!(compare_rows(&cheap, &pricey, InventoryColumn::Cost), Ordering::Less);
        assert_eq!(compare_rows(&cheap, &pricey, InventoryColumn::Existing), Ordering::Greater);
        assert_eq!(compare_rows(&cheap, &pricey, InventoryColumn::InventoryValue), Ordering::Greater);
        assert_eq!(compare_rows(&cheap, &pricey, InventoryColumn::Branches), Ordering::Equal);
    }

    #[test]
    fn test_matches_search() {
        let row: ProductInventoryRow = serde_json::from_value(serde_json::json!({
            "id": 1, "nombre": "Cable USB", "codigoProducto": "CAB-9", "descripcion": null
        }))
        .unwrap();
        assert!(matches_search(&row, "usb"));
        assert!(matches_search(&row, "cab-9"));
        assert!(matches_search(&row, "  "));
        assert!(!matches_search(&row, "funda"));
    }
}
