//! Sale receipt: the DTO behind `GET /venta/get-sale/{id}` and the flattened
//! view both the HTML preview and the PDF render from.

use crate::shared::dates::{format_long_es, parse_iso};
use crate::shared::lenient::{lenient_f64, null_as_default};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

pub fn sale_path(id: i64) -> String {
    format!("/venta/get-sale/{}", id)
}

pub fn receipt_file_name(id: i64) -> String {
    format!("Comprobante_{}.pdf", id)
}

pub const WALK_IN_CUSTOMER: &str = "CF";
pub const THANK_YOU: &str = "¡Gracias por su compra!";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleBranch {
    #[serde(default, deserialize_with = "null_as_default")]
    pub nombre: String,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalePaymentMethod {
    #[serde(rename = "metodoPago", default)]
    pub metodo_pago: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleCustomer {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub apellidos: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub dpi: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoldProduct {
    #[serde(default, deserialize_with = "null_as_default")]
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cantidad: f64,
    #[serde(rename = "precioVenta", default, deserialize_with = "lenient_f64")]
    pub precio_venta: f64,
    #[serde(default)]
    pub producto: Option<SoldProduct>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    #[serde(rename = "fechaVenta", default, deserialize_with = "null_as_default")]
    pub fecha_venta: String,
    #[serde(default)]
    pub sucursal: Option<SaleBranch>,
    #[serde(rename = "metodoPago", default)]
    pub metodo_pago: Option<SalePaymentMethod>,
    #[serde(default)]
    pub cliente: Option<SaleCustomer>,
    #[serde(rename = "nombreClienteFinal", default)]
    pub nombre_cliente_final: Option<String>,
    #[serde(rename = "telefonoClienteFinal", default)]
    pub telefono_cliente_final: Option<String>,
    #[serde(rename = "direccionClienteFinal", default)]
    pub direccion_cliente_final: Option<String>,
    #[serde(default)]
    pub imei: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub productos: Vec<SaleLine>,
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl SaleLine {
    pub fn subtotal(&self) -> f64 {
        self.precio_venta * self.cantidad
    }
}

impl Sale {
    pub fn total(&self) -> f64 {
        self.productos.iter().map(SaleLine::subtotal).sum()
    }

    /// Registered customer's full name, else the walk-in name, else `CF`.
    pub fn customer_display_name(&self) -> String {
        let registered = self
            .cliente
            .as_ref()
            .map(|c| {
                [c.nombre.as_ref(), c.apellidos.as_ref()]
                    .into_iter()
                    .filter_map(non_empty)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|name| !name.is_empty());

        registered
            .or_else(|| non_empty(self.nombre_cliente_final.as_ref()))
            .unwrap_or_else(|| WALK_IN_CUSTOMER.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    pub name: String,
    pub description: Option<String>,
    pub quantity: f64,
    pub unit_price: f64,
    pub subtotal: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReceiptCustomer {
    Identified {
        name: String,
        phone: String,
        address: String,
        dpi: Option<String>,
        imei: Option<String>,
    },
    /// No customer data at all: the receipt prints "Cliente Final".
    WalkIn,
}

/// Everything the receipt prints, with fallbacks already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub sale_id: i64,
    pub branch_name: String,
    pub branch_address: String,
    pub branch_phone: String,
    pub sold_at: String,
    pub payment_method: String,
    pub customer: ReceiptCustomer,
    pub lines: Vec<ReceiptLine>,
    pub total: f64,
}

impl Receipt {
    /// `offset` is the viewer's local offset; the sale timestamp is UTC.
    pub fn from_sale(sale: &Sale, offset: FixedOffset) -> Self {
        let branch = sale.sucursal.clone().unwrap_or_default();
        let not_available = || "No disponible".to_string();

        let sold_at = parse_iso(&sale.fecha_venta)
            .map(|dt| format_long_es(&dt.with_timezone(&offset).naive_local()))
            .unwrap_or_else(not_available);

        let has_walk_in_name = non_empty(sale.nombre_cliente_final.as_ref()).is_some();
        let customer = if sale.cliente.is_some() || has_walk_in_name {
            let registered = sale.cliente.clone().unwrap_or_default();
            ReceiptCustomer::Identified {
                name: sale.customer_display_name(),
                phone: non_empty(registered.telefono.as_ref())
                    .or_else(|| non_empty(sale.telefono_cliente_final.as_ref()))
                    .unwrap_or_else(|| "No proporcionado".to_string()),
                address: non_empty(registered.direccion.as_ref())
                    .or_else(|| non_empty(sale.direccion_cliente_final.as_ref()))
                    .unwrap_or_else(|| "No proporcionada".to_string()),
                dpi: non_empty(registered.dpi.as_ref()),
                imei: non_empty(sale.imei.as_ref()),
            }
        } else {
            ReceiptCustomer::WalkIn
        };

        let lines = sale
            .productos
            .iter()
            .map(|line| {
                let product = line.producto.clone().unwrap_or_default();
                ReceiptLine {
                    name: non_empty(Some(&product.nombre))
                        .unwrap_or_else(|| "Producto no disponible".to_string()),
                    description: non_empty(product.descripcion.as_ref()),
                    quantity: line.cantidad,
                    unit_price: line.precio_venta,
                    subtotal: line.subtotal(),
                }
            })
            .collect();

        Self {
            sale_id: sale.id,
            branch_name: branch.nombre.clone(),
            branch_address: non_empty(branch.direccion.as_ref()).unwrap_or_else(not_available),
            branch_phone: non_empty(branch.telefono.as_ref()).unwrap_or_else(not_available),
            sold_at,
            payment_method: sale
                .metodo_pago
                .as_ref()
                .and_then(|m| non_empty(m.metodo_pago.as_ref()))
                .unwrap_or_else(|| "No especificado".to_string()),
            customer,
            lines,
            total: sale.total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(json: &str) -> Sale {
        serde_json::from_str(json).unwrap()
    }

    fn guatemala() -> FixedOffset {
        FixedOffset::west_opt(6 * 3600).unwrap()
    }

    const FULL: &str = r#"{
        "id": 501,
        "fechaVenta": "2024-07-01T20:15:00.000Z",
        "sucursal": {"nombre": "Nova Centro", "direccion": "6a Av 10-20", "telefono": null},
        "metodoPago": {"metodoPago": "CONTADO"},
        "cliente": {"nombre": " Ana ", "apellidos": "López", "telefono": "", "direccion": null, "dpi": "1234"},
        "telefonoClienteFinal": "5555-0000",
        "productos": [
            {"id": 1, "cantidad": 2, "precioVenta": "150.50", "producto": {"nombre": "Audífonos", "descripcion": "BT"}},
            {"id": 2, "cantidad": 1, "precioVenta": 99, "producto": null}
        ]
    }"#;

    #[test]
    fn test_total_is_sum_of_subtotals() {
        assert_eq!(sale(FULL).total(), 400.0);
    }

    #[test]
    fn test_customer_name_fallbacks() {
        assert_eq!(sale(FULL).customer_display_name(), "Ana López");
        let walk_in = sale(r#"{"id": 1, "cliente": {"nombre": "  "}, "nombreClienteFinal": "Pedro"}"#);
        assert_eq!(walk_in.customer_display_name(), "Pedro");
        let anonymous = sale(r#"{"id": 1}"#);
        assert_eq!(anonymous.customer_display_name(), "CF");
    }

    #[test]
    fn test_receipt_fallbacks() {
        let receipt = Receipt::from_sale(&sale(FULL), guatemala());
        assert_eq!(receipt.branch_address, "6a Av 10-20");
        assert_eq!(receipt.branch_phone, "No disponible");
        assert_eq!(receipt.payment_method, "CONTADO");
        assert_eq!(receipt.sold_at, "01 julio 2024, 02:15:00 PM");
        assert_eq!(
            receipt.customer,
            ReceiptCustomer::Identified {
                name: "Ana López".into(),
                phone: "5555-0000".into(),
                address: "No proporcionada".into(),
                dpi: Some("1234".into()),
                imei: None,
            }
        );
        assert_eq!(receipt.lines[1].name, "Producto no disponible");
        assert_eq!(receipt.lines[0].subtotal, 301.0);
        assert_eq!(receipt.total, 400.0);
    }

    #[test]
    fn test_anonymous_sale_prints_walk_in() {
        let receipt = Receipt::from_sale(&sale(r#"{"id": 7, "fechaVenta": "bad"}"#), guatemala());
        assert_eq!(receipt.customer, ReceiptCustomer::WalkIn);
        assert_eq!(receipt.sold_at, "No disponible");
        assert_eq!(receipt.payment_method, "No especificado");
        assert_eq!(receipt.total, 0.0);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(receipt_file_name(501), "Comprobante_501.pdf");
    }
}
