use crate::domain::a001_stock_lot::StockKind;
use crate::shared::lenient::{lenient_f64, lenient_i64, lenient_opt_f64, null_as_default, one_or_many};
use serde::{Deserialize, Serialize};

pub const INVENTORY_PATH: &str = "/products/products/for-inventary";

/// One cost-allocation entry attached to a lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProrationRecord {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: i64,
    #[serde(rename = "creadoEn", default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(rename = "costoFacturaUnitario", default, deserialize_with = "lenient_f64")]
    pub invoice_unit_cost: f64,
    #[serde(rename = "gastoUnitarioAplicado", default, deserialize_with = "lenient_f64")]
    pub applied_unit_expense: f64,
    #[serde(rename = "costoUnitarioProrrateado", default, deserialize_with = "lenient_f64")]
    pub prorated_unit_cost: f64,
    #[serde(rename = "costoUnitarioResultante", default, deserialize_with = "lenient_opt_f64")]
    pub resulting_unit_cost: Option<f64>,
    #[serde(rename = "existenciasPrevias", default, deserialize_with = "lenient_f64")]
    pub previous_stock: f64,
    #[serde(rename = "nuevasExistencias", default, deserialize_with = "lenient_f64")]
    pub new_stock: f64,
    #[serde(rename = "inversionPrevias", default, deserialize_with = "lenient_f64")]
    pub previous_investment: f64,
    #[serde(rename = "inversionLinea", default, deserialize_with = "lenient_f64")]
    pub line_investment: f64,
}

/// A lot of the row's product. Dates are `DD-MM-YYYY`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLot {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: i64,
    #[serde(rename = "cantidad", default, deserialize_with = "lenient_f64")]
    pub quantity: f64,
    #[serde(rename = "costoUnitario", default, deserialize_with = "lenient_f64")]
    pub unit_cost: f64,
    #[serde(rename = "fechaIngreso", default)]
    pub intake_date: Option<String>,
    #[serde(rename = "fechaVencimiento", default)]
    pub expiry_date: Option<String>,
    #[serde(rename = "prorrateo", default, deserialize_with = "one_or_many")]
    pub prorations: Vec<ProrationRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchStock {
    #[serde(rename = "sucursalId", default, deserialize_with = "lenient_i64")]
    pub branch_id: i64,
    #[serde(rename = "nombre", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "cantidad", default, deserialize_with = "lenient_f64")]
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
}

/// Presentation type arrives either as its name or as `{ "nombre": .. }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PresentationTypeLabel {
    Name(String),
    Object {
        #[serde(default, deserialize_with = "null_as_default")]
        nombre: String,
    },
}

impl PresentationTypeLabel {
    pub fn name(&self) -> &str {
        match self {
            PresentationTypeLabel::Name(name) => name,
            PresentationTypeLabel::Object { nombre } => nombre,
        }
    }
}

/// Row of the inventory table: a product or a presentation with its lots
/// and per-branch totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInventoryRow {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: i64,
    #[serde(rename = "productoId", default, deserialize_with = "lenient_i64")]
    pub product_id: i64,
    #[serde(rename = "nombre", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "codigoProducto", default, deserialize_with = "null_as_default")]
    pub product_code: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: StockKind,
    #[serde(rename = "tipoPresentacion", default)]
    pub presentation_type: Option<PresentationTypeLabel>,
    #[serde(rename = "precioCosto", default, deserialize_with = "lenient_f64")]
    pub cost_price: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<ProductImage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stocks: Vec<StockLot>,
    #[serde(rename = "stocksBySucursal", default, deserialize_with = "null_as_default")]
    pub branch_stocks: Vec<BranchStock>,
}

impl ProductInventoryRow {
    /// Cover image: explicit cover, else the first gallery image.
    pub fn cover_image(&self) -> Option<&str> {
        self.image
            .as_deref()
            .filter(|u| !u.is_empty())
            .or_else(|| self.images.first().map(|i| i.url.as_str()))
            .filter(|u| !u.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_tolerates_backend_shapes() {
        let json = r#"{
            "id": 3,
            "productoId": 3,
            "nombre": "Mica templada",
            "descripcion": null,
            "codigoProducto": "MIC-01",
            "type": "PRESENTACION",
            "tipoPresentacion": {"nombre": "Caja"},
            "precioCosto": "4.25",
            "image": null,
            "images": [{"url": "https://cdn/mica.png", "id": "a1"}],
            "stocks": [
                {"id": 10, "cantidad": 5, "costoUnitario": "4", "fechaIngreso": "01-02-2024",
                 "fechaVencimiento": null, "prorrateo": {"id": 1, "creadoEn": "2024-02-01T10:00:00Z",
                 "costoUnitarioProrrateado": "4.4"}},
                {"id": 11, "cantidad": "x", "costoUnitario": null, "fechaIngreso": "05-02-2024",
                 "prorrateo": null}
            ],
            "stocksBySucursal": [{"sucursalId": 1, "nombre": "Centro", "cantidad": 5}]
        }"#;
        let row: ProductInventoryRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.kind, StockKind::Presentation);
        assert_eq!(row.cost_price, 4.25);
        assert_eq!(row.presentation_type.as_ref().map(|t| t.name()), Some("Caja"));
        assert_eq!(row.stocks[0].prorations.len(), 1);
        assert!(row.stocks[1].prorations.is_empty());
        assert_eq!(row.stocks[1].quantity, 0.0);
        assert_eq!(row.cover_image(), Some("https://cdn/mica.png"));
    }

    #[test]
    fn test_row_tolerates_missing_ids() {
        let json = r#"{
            "id": 8,
            "productoId": null,
            "nombre": "Cargador",
            "type": "PRODUCTO",
            "precioCosto": 10,
            "stocks": [
                {"cantidad": 2, "costoUnitario": 9, "fechaIngreso": "01-03-2024",
                 "prorrateo": [
                    {"creadoEn": "2024-03-01T10:00:00Z", "costoUnitarioResultante": 9.5},
                    {"id": 4, "creadoEn": "2024-03-02T10:00:00Z", "costoUnitarioResultante": "9.8"}
                 ]}
            ],
            "stocksBySucursal": [{"sucursalId": null, "nombre": "Centro", "cantidad": 2}]
        }"#;
        let rows: Vec<ProductInventoryRow> = serde_json::from_str(&format!("[{}]", json)).unwrap();
        let row = &rows[0];
        assert_eq!(row.id, 8);
        assert_eq!(row.product_id, 0);
        assert_eq!(row.stocks[0].id, 0);
        assert_eq!(row.stocks[0].quantity, 2.0);
        let ids: Vec<i64> = row.stocks[0].prorations.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 4]);
        assert_eq!(row.branch_stocks[0].branch_id, 0);
        assert_eq!(row.branch_stocks[0].quantity, 2.0);
    }

    #[test]
    fn test_plain_presentation_type() {
        let label: PresentationTypeLabel = serde_json::from_str("\"Blister\"").unwrap();
        assert_eq!(label.name(), "Blister");
    }
}
