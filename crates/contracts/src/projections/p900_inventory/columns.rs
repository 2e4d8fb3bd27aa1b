//! Derived columns of the inventory table.
//!
//! Everything here is pure: rows in, numbers/orderings out. Missing or
//! malformed numbers have already been read as zero by the DTO layer.

use super::dto::{BranchStock, ProductInventoryRow, ProrationRecord, StockLot};
use crate::domain::a001_stock_lot::StockKind;
use crate::shared::dates::{days_between, parse_dmy, parse_iso};
use crate::system::session::is_seller_role;
use chrono::NaiveDate;
use std::cmp::Ordering;

pub const VISIBLE_LOTS: usize = 2;
pub const VISIBLE_BRANCHES: usize = 3;

// ============================================================================
// Quantities and value
// ============================================================================

/// Sum of the per-branch quantities.
pub fn total_existing(row: &ProductInventoryRow) -> f64 {
    row.branch_stocks.iter().map(|b| b.quantity).sum()
}

/// Σ quantity × unit cost over lots; rows without lots fall back to the
/// aggregate quantity × the row's cost price.
pub fn inventory_value(row: &ProductInventoryRow) -> f64 {
    if row.stocks.is_empty() {
        total_existing(row) * row.cost_price
    } else {
        row.stocks.iter().map(|s| s.quantity * s.unit_cost).sum()
    }
}

// ============================================================================
// Proration
// ============================================================================

/// A proration record with the lot it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedProration {
    pub record: ProrationRecord,
    pub stock_id: i64,
    pub stock_intake_date: Option<String>,
}

impl TaggedProration {
    pub fn created_millis(&self) -> i64 {
        created_millis(&self.record)
    }
}

fn created_millis(record: &ProrationRecord) -> i64 {
    parse_iso(&record.created_at)
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProrationSummary {
    /// Newest first.
    pub records: Vec<TaggedProration>,
}

impl ProrationSummary {
    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn latest(&self) -> Option<&TaggedProration> {
        self.records.first()
    }

    /// Resulting unit cost of the newest record, falling back to its
    /// prorated unit cost.
    pub fn headline_value(&self) -> Option<f64> {
        self.latest().map(|t| {
            t.record
                .resulting_unit_cost
                .unwrap_or(t.record.prorated_unit_cost)
        })
    }
}

pub fn proration_summary(row: &ProductInventoryRow) -> ProrationSummary {
    let mut records: Vec<TaggedProration> = row
        .stocks
        .iter()
        .flat_map(|lot| {
            lot.prorations.iter().map(move |record| TaggedProration {
                record: record.clone(),
                stock_id: lot.id,
                stock_intake_date: lot.intake_date.clone(),
            })
        })
        .collect();
    records.sort_by_key(|t| std::cmp::Reverse(t.created_millis()));
    ProrationSummary { records }
}

/// Sort key of the proration column: newest `creadoEn` in ms, 0 when none.
pub fn latest_proration_millis(row: &ProductInventoryRow) -> i64 {
    row.stocks
        .iter()
        .flat_map(|lot| lot.prorations.iter())
        .map(created_millis)
        .max()
        .unwrap_or(0)
}

// ============================================================================
// Dates
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum ExpiryCategory {
    Expired,
    Upcoming,
    Unset,
}

fn expiry_category(date: Option<NaiveDate>, today: NaiveDate) -> ExpiryCategory {
    match date {
        None => ExpiryCategory::Unset,
        Some(d) if d < today => ExpiryCategory::Expired,
        Some(_) => ExpiryCategory::Upcoming,
    }
}

/// Expiry ordering: expired, then upcoming, then unset/unparseable;
/// ascending by date inside each group.
pub fn cmp_expiry(a: Option<&str>, b: Option<&str>, today: NaiveDate) -> Ordering {
    let da = a.and_then(parse_dmy);
    let db = b.and_then(parse_dmy);
    expiry_category(da, today)
        .cmp(&expiry_category(db, today))
        .then_with(|| da.cmp(&db))
}

/// Intake ordering: newest first, unset last.
pub fn cmp_intake_desc(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a.and_then(parse_dmy), b.and_then(parse_dmy)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => y.cmp(&x),
    }
}

pub fn is_expired(lot: &StockLot, today: NaiveDate) -> bool {
    expiry_category(lot.expiry_date.as_deref().and_then(parse_dmy), today)
        == ExpiryCategory::Expired
}

pub fn any_expired(row: &ProductInventoryRow, today: NaiveDate) -> bool {
    row.stocks.iter().any(|lot| is_expired(lot, today))
}

/// Days since the lot expired, `None` if it has not.
pub fn days_since_expiry(lot: &StockLot, today: NaiveDate) -> Option<i64> {
    let date = lot.expiry_date.as_deref().and_then(parse_dmy)?;
    (date < today).then(|| days_between(date, today))
}

/// Lots as the intake column lists them.
pub fn lots_by_intake(row: &ProductInventoryRow) -> Vec<&StockLot> {
    let mut lots: Vec<&StockLot> = row.stocks.iter().collect();
    lots.sort_by(|a, b| cmp_intake_desc(a.intake_date.as_deref(), b.intake_date.as_deref()));
    lots
}

/// Lots as the expiry column lists them.
pub fn lots_by_expiry(row: &ProductInventoryRow, today: NaiveDate) -> Vec<&StockLot> {
    let mut lots: Vec<&StockLot> = row.stocks.iter().collect();
    lots.sort_by(|a, b| cmp_expiry(a.expiry_date.as_deref(), b.expiry_date.as_deref(), today));
    lots
}

/// Items shown inline plus how many hide behind "Ver N más…".
pub fn split_visible<T>(items: &[T], visible: usize) -> (&[T], usize) {
    let shown = items.len().min(visible);
    (&items[..shown], items.len() - shown)
}

pub fn more_label(extra: usize) -> String {
    format!("Ver {} más…", extra)
}

pub fn branch_badges(row: &ProductInventoryRow) -> (&[BranchStock], usize) {
    split_visible(&row.branch_stocks, VISIBLE_BRANCHES)
}

/// Target of the per-lot edit link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockEditTarget {
    pub stock_id: i64,
    pub kind: StockKind,
}

pub fn stock_edit_target(row: &ProductInventoryRow, lot: &StockLot) -> StockEditTarget {
    StockEditTarget {
        stock_id: lot.id,
        kind: row.kind,
    }
}

// ============================================================================
// Column set
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InventoryColumn {
    Name,
    Description,
    Cost,
    Proration,
    Existing,
    InventoryValue,
    Intakes,
    Expiries,
    Branches,
    Actions,
}

impl InventoryColumn {
    pub fn id(&self) -> &'static str {
        match self {
            InventoryColumn::Name => "nombre",
            InventoryColumn::Description => "descripcion",
            InventoryColumn::Cost => "precioCosto",
            InventoryColumn::Proration => "prorrateo",
            InventoryColumn::Existing => "existencias",
            InventoryColumn::InventoryValue => "valorInventario",
            InventoryColumn::Intakes => "ingresos",
            InventoryColumn::Expiries => "vencimientos",
            InventoryColumn::Branches => "sucursales",
            InventoryColumn::Actions => "acciones",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        ALL_COLUMNS.into_iter().find(|c| c.id() == id)
    }

    pub fn title(&self) -> &'static str {
        match self {
            InventoryColumn::Name => "Producto",
            InventoryColumn::Description => "Desc.",
            InventoryColumn::Cost => "Costo",
            InventoryColumn::Proration => "Prorrateo",
            InventoryColumn::Existing => "Existencias",
            InventoryColumn::InventoryValue => "Valor inventario",
            InventoryColumn::Intakes => "Ingresos",
            InventoryColumn::Expiries => "Venc.",
            InventoryColumn::Branches => "Sucursales",
            InventoryColumn::Actions => "",
        }
    }

    pub fn is_sortable(&self) -> bool {
        matches!(
            self,
            InventoryColumn::Name
                | InventoryColumn::Cost
                | InventoryColumn::Proration
                | InventoryColumn::Existing
                | InventoryColumn::InventoryValue
        )
    }
}

const ALL_COLUMNS: [InventoryColumn; 10] = [
    InventoryColumn::Name,
    InventoryColumn::Description,
    InventoryColumn::Cost,
    InventoryColumn::Proration,
    InventoryColumn::Existing,
    InventoryColumn::InventoryValue,
    InventoryColumn::Intakes,
    InventoryColumn::Expiries,
    InventoryColumn::Branches,
    InventoryColumn::Actions,
];

/// Columns visible to `role`. Sellers do not see cost, proration or value.
pub fn inventory_columns(role: &str) -> Vec<InventoryColumn> {
    let mut columns = vec![
        InventoryColumn::Name,
        InventoryColumn::Description,
        InventoryColumn::Existing,
        InventoryColumn::Intakes,
        InventoryColumn::Expiries,
        InventoryColumn::Branches,
        InventoryColumn::Actions,
    ];
    if !is_seller_role(role) {
        columns.insert(2, InventoryColumn::Cost);
        columns.insert(3, InventoryColumn::Proration);
        columns.insert(5, InventoryColumn::InventoryValue);
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn lot(id: i64, quantity: f64, unit_cost: f64, intake: Option<&str>, expiry: Option<&str>) -> StockLot {
        StockLot {
            id,
            quantity,
            unit_cost,
            intake_date: intake.map(str::to_string),
            expiry_date: expiry.map(str::to_string),
            prorations: Vec::new(),
        }
    }

    fn branch(name: &str, quantity: f64) -> BranchStock {
        BranchStock {
            branch_id: 0,
            name: name.to_string(),
            quantity,
        }
    }

    fn row(stocks: Vec<StockLot>, branches: Vec<BranchStock>, cost_price: f64) -> ProductInventoryRow {
        ProductInventoryRow {
            id: 1,
            product_id: 1,
            name: "Cargador".into(),
            description: None,
            product_code: "CAR-1".into(),
            kind: StockKind::Product,
            presentation_type: None,
            cost_price,
            image: None,
            images: Vec::new(),
            stocks,
            branch_stocks: branches,
        }
    }

    fn proration(id: i64, created_at: &str, prorated: f64, resulting: Option<f64>) -> ProrationRecord {
        ProrationRecord {
            id,
            created_at: created_at.to_string(),
            invoice_unit_cost: 0.0,
            applied_unit_expense: 0.0,
            prorated_unit_cost: prorated,
            resulting_unit_cost: resulting,
            previous_stock: 0.0,
            new_stock: 0.0,
            previous_investment: 0.0,
            line_investment: 0.0,
        }
    }

    #[test]
    fn test_inventory_value_uses_lots_when_present() {
        let r = row(
            vec![lot(1, 3.0, 10.0, None, None), lot(2, 2.0, 12.5, None, None)],
            vec![branch("Centro", 100.0)],
            99.0,
        );
        assert_eq!(inventory_value(&r), 55.0);
        assert_eq!(total_existing(&r), 100.0);
    }

    #[test]
    fn test_inventory_value_falls_back_without_lots() {
        let r = row(vec![], vec![branch("Centro", 4.0), branch("Norte", 6.0)], 7.5);
        assert_eq!(inventory_value(&r), 75.0);
    }

    #[test]
    fn test_inventory_value_lots_summing_to_zero_stay_zero() {
        let r = row(vec![lot(1, 0.0, 10.0, None, None)], vec![branch("Centro", 4.0)], 7.5);
        assert_eq!(inventory_value(&r), 0.0);
    }

    #[test]
    fn test_cmp_expiry_categories() {
        let today = ymd(2024, 6, 1);
        let mut dates = vec![
            None,
            Some("10-06-2024"),
            Some("15-05-2024"),
            Some("garbage"),
            Some("01-06-2024"),
            Some("01-01-2024"),
        ];
        dates.sort_by(|a, b| cmp_expiry(*a, *b, today));
        assert_eq!(
            dates,
            vec![
                Some("01-01-2024"),
                Some("15-05-2024"),
                Some("01-06-2024"),
                Some("10-06-2024"),
                None,
                Some("garbage"),
            ]
        );
        assert_eq!(cmp_expiry(None, Some("x"), today), Ordering::Equal);
    }

    #[test]
    fn test_cmp_intake_desc() {
        let mut dates = vec![Some("01-01-2024"), None, Some("03-02-2024"), Some("")];
        dates.sort_by(|a, b| cmp_intake_desc(*a, *b));
        assert_eq!(dates, vec![Some("03-02-2024"), Some("01-01-2024"), None, Some("")]);
    }

    #[test]
    fn test_expired_flags() {
        let today = ymd(2024, 6, 10);
        let expired = lot(1, 1.0, 1.0, None, Some("01-06-2024"));
        let due_today = lot(2, 1.0, 1.0, None, Some("10-06-2024"));
        assert!(is_expired(&expired, today));
        assert!(!is_expired(&due_today, today));
        assert_eq!(days_since_expiry(&expired, today), Some(9));
        assert_eq!(days_since_expiry(&due_today, today), None);
        assert!(any_expired(&row(vec![due_today, expired], vec![], 0.0), today));
    }

    #[test]
    fn test_proration_summary_newest_first() {
        let mut first = lot(1, 1.0, 1.0, Some("01-01-2024"), None);
        first.prorations = vec![proration(1, "2024-01-01T10:00:00Z", 5.0, Some(5.5))];
        let mut second = lot(2, 1.0, 1.0, Some("01-03-2024"), None);
        second.prorations = vec![
            proration(2, "2024-03-01T10:00:00Z", 6.0, None),
            proration(3, "bad date", 1.0, None),
        ];
        let r = row(vec![first, second], vec![], 0.0);

        let summary = proration_summary(&r);
        assert_eq!(summary.count(), 3);
        let ids: Vec<i64> = summary.records.iter().map(|t| t.record.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert_eq!(summary.latest().map(|t| t.stock_id), Some(2));
        assert_eq!(summary.headline_value(), Some(6.0));
        assert_eq!(
            latest_proration_millis(&r),
            parse_iso("2024-03-01T10:00:00Z").unwrap().timestamp_millis()
        );
    }

    #[test]
    fn test_proration_empty() {
        let r = row(vec![lot(1, 1.0, 1.0, None, None)], vec![], 0.0);
        assert_eq!(proration_summary(&r).headline_value(), None);
        assert_eq!(latest_proration_millis(&r), 0);
    }

    #[test]
    fn test_columns_by_role() {
        let ids = |role: &str| -> Vec<&'static str> {
            inventory_columns(role).iter().map(|c| c.id()).collect()
        };
        assert_eq!(
            ids("VENDEDOR"),
            vec!["nombre", "descripcion", "existencias", "ingresos", "vencimientos", "sucursales", "acciones"]
        );
        assert_eq!(ids(" vendedor "), ids("VENDEDOR"));
        assert_eq!(
            ids("ADMIN"),
            vec![
                "nombre",
                "descripcion",
                "precioCosto",
                "prorrateo",
                "existencias",
                "valorInventario",
                "ingresos",
                "vencimientos",
                "sucursales",
                "acciones"
            ]
        );
    }

    #[test]
    fn test_visible_split() {
        let r = row(
            vec![],
            vec![branch("A", 1.0), branch("B", 1.0), branch("C", 1.0), branch("D", 1.0), branch("E", 1.0)],
            0.0,
        );
        let (shown, extra) = branch_badges(&r);
        assert_eq!(shown.len(), 3);
        assert_eq!(extra, 2);
        assert_eq!(more_label(extra), "Ver 2 más…");
        let (shown, extra) = split_visible(&[1, 2], VISIBLE_LOTS);
        assert_eq!((shown.len(), extra), (2, 0));
    }
}
