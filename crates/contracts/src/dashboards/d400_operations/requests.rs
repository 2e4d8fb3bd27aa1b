//! Price and transfer requests raised by sellers, resolved by an admin.

use super::dto::NamedRef;
use crate::shared::lenient::{lenient_f64, null_as_default};
use serde::{Deserialize, Serialize};

pub const PRICE_REQUESTS_PATH: &str = "/price-request";
pub const TRANSFER_REQUESTS_PATH: &str = "/solicitud-transferencia-producto";
pub const ACCEPT_TRANSFER_PATH: &str = "/solicitud-transferencia-producto/aceptar";

pub const PRICE_ACCEPTED: &str = "Petición aceptada, precio concedido";
pub const PRICE_REJECTED: &str = "Petición rechazada";
pub const TRANSFER_ACCEPTED: &str = "Tranferencia completada";
pub const TRANSFER_REJECTED: &str = "Solicitud de transferencia rechazada";

pub fn accept_price_path(request_id: i64, user_id: i64) -> String {
    format!("/price-request/acept-request-price/{}/{}", request_id, user_id)
}

pub fn reject_price_path(request_id: i64, user_id: i64) -> String {
    format!("/price-request/reject-request-price/{}/{}", request_id, user_id)
}

pub fn reject_transfer_path(request_id: i64, user_id: i64) -> String {
    format!(
        "/solicitud-transferencia-producto/rechazar/{}/{}",
        request_id, user_id
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRequest {
    pub id: i64,
    #[serde(default)]
    pub producto: Option<NamedRef>,
    #[serde(rename = "precioSolicitado", default, deserialize_with = "lenient_f64")]
    pub requested_price: f64,
    #[serde(rename = "solicitadoPor", default)]
    pub requested_by: Option<NamedRef>,
    #[serde(rename = "fechaSolicitud", default)]
    pub requested_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub estado: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub id: i64,
    #[serde(default)]
    pub producto: Option<NamedRef>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cantidad: f64,
    #[serde(rename = "sucursalOrigen", default)]
    pub from_branch: Option<NamedRef>,
    #[serde(rename = "sucursalDestino", default)]
    pub to_branch: Option<NamedRef>,
    #[serde(rename = "usuarioSolicitante", default)]
    pub requested_by: Option<NamedRef>,
    #[serde(rename = "fechaSolicitud", default)]
    pub requested_at: Option<String>,
}

fn name_or(reference: &Option<NamedRef>, fallback: &'static str) -> String {
    reference
        .as_ref()
        .map(|r| r.nombre.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

impl PriceRequest {
    pub fn product_name(&self) -> String {
        name_or(&self.producto, "Producto no disponible")
    }

    pub fn requester_name(&self) -> String {
        name_or(&self.requested_by, "Desconocido")
    }
}

impl TransferRequest {
    pub fn product_name(&self) -> String {
        name_or(&self.producto, "Producto no disponible")
    }

    /// "Origen → Destino"
    pub fn route(&self) -> String {
        format!(
            "{} → {}",
            name_or(&self.from_branch, "N/A"),
            name_or(&self.to_branch, "N/A")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcceptTransferRequest {
    #[serde(rename = "idSolicitudTransferencia")]
    pub request_id: i64,
    #[serde(rename = "userID")]
    pub user_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_paths() {
        assert_eq!(accept_price_path(4, 9), "/price-request/acept-request-price/4/9");
        assert_eq!(reject_price_path(4, 9), "/price-request/reject-request-price/4/9");
        assert_eq!(
            reject_transfer_path(12, 3),
            "/solicitud-transferencia-producto/rechazar/12/3"
        );
    }

    #[test]
    fn test_accept_transfer_body() {
        let body = serde_json::to_value(AcceptTransferRequest {
            request_id: 5,
            user_id: 2,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"idSolicitudTransferencia": 5, "userID": 2}));
    }

    #[test]
    fn test_transfer_display() {
        let transfer: TransferRequest = serde_json::from_value(serde_json::json!({
            "id": 1,
            "producto": {"id": 3, "nombre": "Cable USB-C"},
            "cantidad": "4",
            "sucursalOrigen": {"nombre": "Centro"},
            "sucursalDestino": null
        }))
        .unwrap();
        assert_eq!(transfer.cantidad, 4.0);
        assert_eq!(transfer.product_name(), "Cable USB-C");
        assert_eq!(transfer.route(), "Centro → N/A");
    }

    #[test]
    fn test_price_request_fallbacks() {
        let request: PriceRequest =
            serde_json::from_value(serde_json::json!({"id": 2, "precioSolicitado": 45.5}))
                .unwrap();
        assert_eq!(request.requested_price, 45.5);
        assert_eq!(request.product_name(), "Producto no disponible");
        assert_eq!(request.requester_name(), "Desconocido");
    }
}
