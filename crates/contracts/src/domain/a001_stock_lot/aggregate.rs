use crate::shared::lenient::{lenient_f64, lenient_opt_f64, null_as_default};
use serde::{Deserialize, Serialize};

/// What a stock lot belongs to: a base product or one of its presentations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StockKind {
    #[default]
    #[serde(rename = "PRODUCTO")]
    Product,
    #[serde(rename = "PRESENTACION")]
    Presentation,
}

impl StockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockKind::Product => "PRODUCTO",
            StockKind::Presentation => "PRESENTACION",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PRODUCTO" => Some(StockKind::Product),
            "PRESENTACION" => Some(StockKind::Presentation),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockKind::Product => "Producto",
            StockKind::Presentation => "Presentación",
        }
    }
}

/// Lot as returned by `GET /stock/get-stock-to-edit/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockToEdit {
    #[serde(default)]
    pub kind: StockKind,
    pub id: i64,
    #[serde(rename = "productoId", default)]
    pub product_id: i64,
    #[serde(rename = "productoNombre", default, deserialize_with = "null_as_default")]
    pub product_name: String,
    #[serde(rename = "sucursalId", default)]
    pub branch_id: i64,
    #[serde(rename = "sucursalNombre", default, deserialize_with = "null_as_default")]
    pub branch_name: String,
    #[serde(rename = "cantidad", default, deserialize_with = "lenient_f64")]
    pub quantity: f64,
    #[serde(rename = "fechaIngreso", default)]
    pub intake_date: Option<String>,
    #[serde(rename = "fechaVencimiento", default)]
    pub expiry_date: Option<String>,
    #[serde(rename = "precioCosto", default, deserialize_with = "lenient_opt_f64")]
    pub cost_price: Option<f64>,
    #[serde(rename = "presentacionId", default)]
    pub presentation_id: Option<i64>,
    #[serde(rename = "presentacionNombre", default)]
    pub presentation_name: Option<String>,
    #[serde(rename = "codigoProducto", default)]
    pub product_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&StockKind::Presentation).unwrap(),
            "\"PRESENTACION\""
        );
        assert_eq!(StockKind::parse("producto"), Some(StockKind::Product));
        assert_eq!(StockKind::parse("lote"), None);
    }

    #[test]
    fn test_deserialize_presentation_lot() {
        let json = r#"{
            "kind": "PRESENTACION",
            "id": 41,
            "productoId": 7,
            "productoNombre": "Cargador USB-C",
            "sucursalId": 2,
            "sucursalNombre": "Centro",
            "cantidad": 12,
            "fechaIngreso": "2024-03-15T00:00:00.000Z",
            "fechaVencimiento": null,
            "precioCosto": "35.5",
            "presentacionId": 9,
            "presentacionNombre": "Caja x10"
        }"#;
        let lot: StockToEdit = serde_json::from_str(json).unwrap();
        assert_eq!(lot.kind, StockKind::Presentation);
        assert_eq!(lot.quantity, 12.0);
        assert_eq!(lot.cost_price, Some(35.5));
        assert_eq!(lot.expiry_date, None);
        assert_eq!(lot.product_code, None);
    }
}
