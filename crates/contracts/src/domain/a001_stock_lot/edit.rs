//! Stock lot date editing: form seeding, phase tracking and the PATCH body.

use super::aggregate::{StockKind, StockToEdit};
use crate::shared::dates::{parse_iso, to_iso_millis};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const UPDATE_STOCK_DATES_PATH: &str = "/stock/update-stock-dates";

pub fn stock_to_edit_path(id: i64) -> String {
    format!("/stock/get-stock-to-edit/{}", id)
}

/// Query string of the fetch. `kind` is omitted when unknown so the backend
/// resolves it from the id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StockToEditQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<StockKind>,
}

/// Where the edit screen is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum EditStockPhase {
    Loading,
    Failed(String),
    Loaded(StockToEdit),
}

impl EditStockPhase {
    pub fn record(&self) -> Option<&StockToEdit> {
        match self {
            EditStockPhase::Loaded(record) => Some(record),
            _ => None,
        }
    }
}

/// The two editable fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StockDatesForm {
    pub intake_date: DateTime<Utc>,
    pub expiry_date: Option<DateTime<Utc>>,
}

impl StockDatesForm {
    /// Seed from a fetched lot. A missing or unreadable intake date becomes
    /// `now`; a missing or unreadable expiry stays empty.
    pub fn from_record(record: &StockToEdit, now: DateTime<Utc>) -> Self {
        Self {
            intake_date: record
                .intake_date
                .as_deref()
                .and_then(parse_iso)
                .unwrap_or(now),
            expiry_date: record.expiry_date.as_deref().and_then(parse_iso),
        }
    }

    pub fn to_request(&self, record: &StockToEdit) -> UpdateStockDatesRequest {
        UpdateStockDatesRequest {
            id: record.id,
            kind: record.kind,
            intake_date: to_iso_millis(&self.intake_date),
            expiry_date: self.expiry_date.as_ref().map(to_iso_millis),
        }
    }
}

/// Body of `PATCH /stock/update-stock-dates`. `fechaVencimiento` is sent as
/// an explicit `null` to clear the expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStockDatesRequest {
    pub id: i64,
    pub kind: StockKind,
    #[serde(rename = "fechaIngreso")]
    pub intake_date: String,
    #[serde(rename = "fechaVencimiento")]
    pub expiry_date: Option<String>,
}

/// Builds the PATCH body, or `None` when no lot is loaded.
pub fn prepare_submit(
    phase: &EditStockPhase,
    form: Option<&StockDatesForm>,
) -> Option<UpdateStockDatesRequest> {
    let record = phase.record()?;
    form.map(|f| f.to_request(record))
}

/// Read-only rows shown above the form.
pub fn summary_rows(record: &StockToEdit) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Producto", record.product_name.clone()),
        ("Sucursal", record.branch_name.clone()),
    ];
    if let Some(name) = record.presentation_name.as_ref().filter(|n| !n.is_empty()) {
        rows.push(("Presentación", name.clone()));
    }
    if let Some(code) = record.product_code.as_ref().filter(|c| !c.is_empty()) {
        rows.push(("Código", code.clone()));
    }
    rows.push(("Cantidad", format_quantity(record.quantity)));
    if let Some(cost) = record.cost_price {
        rows.push(("Precio costo", format!("{:.2}", cost)));
    }
    rows
}

/// Whole quantities print without decimals.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> StockToEdit {
        StockToEdit {
            kind: StockKind::Product,
            id: 15,
            product_id: 3,
            product_name: "Audífonos".into(),
            branch_id: 1,
            branch_name: "Zona 1".into(),
            quantity: 4.0,
            intake_date: Some("2024-03-15T00:00:00.000Z".into()),
            expiry_date: None,
            cost_price: Some(12.0),
            presentation_id: None,
            presentation_name: None,
            product_code: Some("AUD-01".into()),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 2, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_seed_from_record() {
        let form = StockDatesForm::from_record(&record(), now());
        assert_eq!(
            form.intake_date,
            Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap()
        );
        assert_eq!(form.expiry_date, None);
    }

    #[test]
    fn test_seed_invalid_dates() {
        let mut lot = record();
        lot.intake_date = Some("garbage".into());
        lot.expiry_date = Some("also garbage".into());
        let form = StockDatesForm::from_record(&lot, now());
        assert_eq!(form.intake_date, now());
        assert_eq!(form.expiry_date, None);
    }

    #[test]
    fn test_payload_has_iso_dates_and_explicit_null() {
        let form = StockDatesForm::from_record(&record(), now());
        let payload = serde_json::to_value(form.to_request(&record())).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({
                "id": 15,
                "kind": "PRODUCTO",
                "fechaIngreso": "2024-03-15T00:00:00.000Z",
                "fechaVencimiento": null
            })
        );
    }

    #[test]
    fn test_payload_with_expiry() {
        let form = StockDatesForm {
            intake_date: Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap(),
            expiry_date: Some(Utc.with_ymd_and_hms(2025, 6, 30, 0, 0, 0).unwrap()),
        };
        let payload = form.to_request(&record());
        assert_eq!(payload.expiry_date.as_deref(), Some("2025-06-30T00:00:00.000Z"));
    }

    #[test]
    fn test_submit_ignored_without_record() {
        let form = StockDatesForm::from_record(&record(), now());
        assert!(prepare_submit(&EditStockPhase::Loading, Some(&form)).is_none());
        assert!(prepare_submit(&EditStockPhase::Failed("x".into()), Some(&form)).is_none());
        assert!(prepare_submit(&EditStockPhase::Loaded(record()), Some(&form)).is_some());
    }

    #[test]
    fn test_summary_rows() {
        let rows = summary_rows(&record());
        let labels: Vec<&str> = rows.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["Producto", "Sucursal", "Código", "Cantidad", "Precio costo"]);
        assert_eq!(rows[4].1, "12.00");
    }
}
