//! Read models of the operations dashboard widgets.

use crate::shared::lenient::{lenient_f64, null_as_default};
use serde::{Deserialize, Serialize};

pub const ANALYTICS_ERROR: &str = "Error al recuperar informacion de ventas del servidor";

pub fn sales_month_path(branch_id: i64) -> String {
    format!("/analytics/get-ventas/mes/{}", branch_id)
}

pub fn sales_week_path(branch_id: i64) -> String {
    format!("/analytics/get-ventas/semana/{}", branch_id)
}

pub fn sales_day_path(branch_id: i64) -> String {
    format!("/analytics/venta-dia/{}", branch_id)
}

pub fn weekly_chart_path(branch_id: i64) -> String {
    format!("/analytics/get-ventas/semanal-chart/{}", branch_id)
}

pub const TOP_PRODUCTS_PATH: &str = "/analytics/get-productos-mas-vendidos/";
pub const RECENT_SALES_PATH: &str = "/analytics/get-ventas-recientes/";
pub const OPEN_REPAIRS_PATH: &str = "/repair/get-regist-open-repair";
pub const ACTIVE_CREDITS_PATH: &str = "/credito/simple-credit-dashboard";
pub const BANK_ACCOUNTS_PATH: &str = "/cuentas-bancarias/get-simple-select";

pub fn cash_registers_path(branch_id: i64) -> String {
    format!("/caja/cajas-disponibles/{}", branch_id)
}

/// Plain-name reference embedded in most dashboard payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nombre: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySales {
    #[serde(rename = "totalDeHoy", default, deserialize_with = "lenient_f64")]
    pub total_de_hoy: f64,
}

/// Month, week and day totals of the branch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SalesOverview {
    pub month: f64,
    pub week: f64,
    pub day: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySalesPoint {
    #[serde(default, deserialize_with = "null_as_default")]
    pub dia: String,
    #[serde(rename = "totalVenta", default, deserialize_with = "lenient_f64")]
    pub total_venta: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ventas: f64,
}

/// Height of each bar relative to the best day, in percent.
pub fn chart_bar_heights(points: &[WeeklySalesPoint]) -> Vec<f64> {
    let max = points.iter().map(|p| p.total_venta).fold(0.0_f64, f64::max);
    points
        .iter()
        .map(|p| if max > 0.0 { p.total_venta / max * 100.0 } else { 0.0 })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nombre: String,
    #[serde(rename = "totalVentas", default, deserialize_with = "lenient_f64")]
    pub total_ventas: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentSale {
    pub id: i64,
    #[serde(rename = "fechaVenta", default, deserialize_with = "null_as_default")]
    pub fecha_venta: String,
    #[serde(rename = "totalVenta", default, deserialize_with = "lenient_f64")]
    pub total_venta: f64,
    #[serde(default)]
    pub sucursal: Option<NamedRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repair {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub estado: String,
    #[serde(rename = "fechaRecibido", default)]
    pub fecha_recibido: Option<String>,
    #[serde(default)]
    pub problemas: Option<String>,
    #[serde(default)]
    pub cliente: Option<NamedRef>,
    #[serde(default)]
    pub producto: Option<NamedRef>,
    #[serde(rename = "productoExterno", default)]
    pub producto_externo: Option<String>,
}

impl Repair {
    /// Catalogue product name, else the free-text one typed at reception.
    pub fn product_name(&self) -> String {
        self.producto
            .as_ref()
            .map(|p| p.nombre.clone())
            .filter(|n| !n.is_empty())
            .or_else(|| self.producto_externo.clone())
            .unwrap_or_else(|| "Producto no especificado".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveCredit {
    pub id: i64,
    #[serde(default)]
    pub cliente: Option<NamedRef>,
    #[serde(rename = "montoTotalConInteres", default, deserialize_with = "lenient_f64")]
    pub monto_total_con_interes: f64,
    #[serde(rename = "totalPagado", default, deserialize_with = "lenient_f64")]
    pub total_pagado: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub estado: String,
}

impl ActiveCredit {
    pub fn balance(&self) -> f64 {
        (self.monto_total_con_interes - self.total_pagado).max(0.0)
    }

    /// Paid share in percent, clamped to 0..=100.
    pub fn progress(&self) -> f64 {
        if self.monto_total_con_interes <= 0.0 {
            return 0.0;
        }
        (self.total_pagado / self.monto_total_con_interes * 100.0).clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nombre: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashRegister {
    pub id: i64,
    #[serde(rename = "saldoInicial", default, deserialize_with = "lenient_f64")]
    pub saldo_inicial: f64,
    #[serde(rename = "saldoActual", default, deserialize_with = "lenient_f64")]
    pub saldo_actual: f64,
    #[serde(rename = "usuarioInicio", default)]
    pub usuario_inicio: Option<NamedRef>,
}

impl CashRegister {
    pub fn label(&self) -> String {
        let owner = self
            .usuario_inicio
            .as_ref()
            .map(|u| u.nombre.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("Sin usuario");
        format!("Caja #{} · {}", self.id, owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_bar_heights() {
        let points: Vec<WeeklySalesPoint> = serde_json::from_str(
            r#"[{"dia":"lunes","totalVenta":"50"},{"dia":"martes","totalVenta":200},{"dia":"miércoles"}]"#,
        )
        .unwrap();
        assert_eq!(chart_bar_heights(&points), vec![25.0, 100.0, 0.0]);
        assert!(chart_bar_heights(&[]).is_empty());
    }

    #[test]
    fn test_active_credit_progress() {
        let credit: ActiveCredit = serde_json::from_str(
            r#"{"id":1,"montoTotalConInteres":"1000","totalPagado":250,"estado":"ACTIVA"}"#,
        )
        .unwrap();
        assert_eq!(credit.balance(), 750.0);
        assert_eq!(credit.progress(), 25.0);
    }

    #[test]
    fn test_repair_product_name_fallback() {
        let repair: Repair =
            serde_json::from_str(r#"{"id":1,"estado":"ABIERTO","productoExterno":"Xiaomi Note 12"}"#)
                .unwrap();
        assert_eq!(repair.product_name(), "Xiaomi Note 12");
    }
}
