//! Warranty claims shown on the dashboard and their two admin actions.

use super::dto::NamedRef;
use crate::shared::lenient::null_as_default;
use serde::{Deserialize, Serialize};

pub const WARRANTIES_PATH: &str = "/warranty/get-regists-warranties";
pub const FINISH_WARRANTY_PATH: &str = "/warranty/create-regist-warranty";

pub fn warranty_path(id: i64) -> String {
    format!("/warranty/{}", id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarrantyState {
    Recibido,
    Diagnostico,
    EnReparacion,
    EsperandoPiezas,
    Reparado,
    Reemplazado,
    RechazadoCliente,
    Cancelado,
    Cerrado,
}

impl WarrantyState {
    pub const ALL: [WarrantyState; 9] = [
        WarrantyState::Recibido,
        WarrantyState::Diagnostico,
        WarrantyState::EnReparacion,
        WarrantyState::EsperandoPiezas,
        WarrantyState::Reparado,
        WarrantyState::Reemplazado,
        WarrantyState::RechazadoCliente,
        WarrantyState::Cancelado,
        WarrantyState::Cerrado,
    ];

    /// States an admin may close a claim with.
    pub const FINAL: [WarrantyState; 4] = [
        WarrantyState::Reparado,
        WarrantyState::Reemplazado,
        WarrantyState::RechazadoCliente,
        WarrantyState::Cancelado,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WarrantyState::Recibido => "RECIBIDO",
            WarrantyState::Diagnostico => "DIAGNOSTICO",
            WarrantyState::EnReparacion => "EN_REPARACION",
            WarrantyState::EsperandoPiezas => "ESPERANDO_PIEZAS",
            WarrantyState::Reparado => "REPARADO",
            WarrantyState::Reemplazado => "REEMPLAZADO",
            WarrantyState::RechazadoCliente => "RECHAZADO_CLIENTE",
            WarrantyState::Cancelado => "CANCELADO",
            WarrantyState::Cerrado => "CERRADO",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            WarrantyState::Recibido => "Recibido",
            WarrantyState::Diagnostico => "Diagnóstico",
            WarrantyState::EnReparacion => "En reparación",
            WarrantyState::EsperandoPiezas => "Esperando piezas",
            WarrantyState::Reparado => "Reparado",
            WarrantyState::Reemplazado => "Reemplazado",
            WarrantyState::RechazadoCliente => "Rechazado por cliente",
            WarrantyState::Cancelado => "Cancelado",
            WarrantyState::Cerrado => "Cerrado",
        }
    }

    /// CSS class of the state pill.
    pub fn color_class(&self) -> &'static str {
        match self {
            WarrantyState::Recibido => "state-pill state-pill--blue",
            WarrantyState::Diagnostico => "state-pill state-pill--yellow",
            WarrantyState::EnReparacion => "state-pill state-pill--orange",
            WarrantyState::EsperandoPiezas => "state-pill state-pill--indigo",
            WarrantyState::Reparado => "state-pill state-pill--green",
            WarrantyState::Reemplazado => "state-pill state-pill--teal",
            WarrantyState::RechazadoCliente => "state-pill state-pill--red",
            WarrantyState::Cancelado => "state-pill state-pill--gray-dark",
            WarrantyState::Cerrado => "state-pill state-pill--gray",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarrantyCustomer {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nombre: String,
    #[serde(default)]
    pub telefono: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarrantyProduct {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nombre: String,
    #[serde(rename = "codigoProducto", default)]
    pub codigo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warranty {
    pub id: i64,
    #[serde(default)]
    pub cliente: Option<WarrantyCustomer>,
    #[serde(default)]
    pub producto: Option<WarrantyProduct>,
    #[serde(default)]
    pub usuario: Option<NamedRef>,
    #[serde(default)]
    pub sucursal: Option<NamedRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comentario: String,
    #[serde(rename = "descripcionProblema", default, deserialize_with = "null_as_default")]
    pub descripcion_problema: String,
    #[serde(rename = "fechaRecepcion", default)]
    pub fecha_recepcion: Option<String>,
    pub estado: WarrantyState,
}

impl Warranty {
    pub fn customer_name(&self) -> &str {
        self.cliente
            .as_ref()
            .map(|c| c.nombre.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("Sin cliente")
    }

    pub fn product_name(&self) -> &str {
        self.producto
            .as_ref()
            .map(|p| p.nombre.as_str())
            .unwrap_or("Producto no disponible")
    }

    pub fn product_id(&self) -> i64 {
        self.producto.as_ref().map(|p| p.id).unwrap_or(0)
    }
}

/// Body of `PATCH warranty/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateWarrantyRequest {
    pub comentario: String,
    #[serde(rename = "descripcionProblema")]
    pub descripcion_problema: String,
    pub estado: Option<WarrantyState>,
}

impl UpdateWarrantyRequest {
    /// Seeds the update dialog with the claim's current values.
    pub fn from_warranty(warranty: &Warranty) -> Self {
        Self {
            comentario: warranty.comentario.clone(),
            descripcion_problema: warranty.descripcion_problema.clone(),
            estado: Some(warranty.estado),
        }
    }
}

/// Inputs of the close-claim dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinishWarrantyForm {
    pub state: String,
    pub conclusion: String,
    pub actions_taken: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinishWarrantyRequest {
    #[serde(rename = "garantiaId")]
    pub garantia_id: i64,
    #[serde(rename = "usuarioId")]
    pub usuario_id: i64,
    pub estado: String,
    #[serde(rename = "productoId")]
    pub producto_id: i64,
    pub conclusion: String,
    #[serde(rename = "accionesRealizadas")]
    pub acciones_realizadas: String,
}

impl FinishWarrantyForm {
    pub fn to_request(
        &self,
        warranty_id: i64,
        product_id: i64,
        user_id: i64,
    ) -> Result<FinishWarrantyRequest, &'static str> {
        if self.state.trim().is_empty() {
            return Err("Debe seleccionar un estado");
        }
        if self.conclusion.trim().is_empty() || self.actions_taken.trim().is_empty() {
            return Err("Debe llenar todos los campos");
        }
        Ok(FinishWarrantyRequest {
            garantia_id: warranty_id,
            usuario_id: user_id,
            estado: self.state.clone(),
            producto_id: product_id,
            conclusion: self.conclusion.trim().to_string(),
            acciones_realizadas: self.actions_taken.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_wire_names() {
        let state: WarrantyState = serde_json::from_str("\"EN_REPARACION\"").unwrap();
        assert_eq!(state, WarrantyState::EnReparacion);
        assert_eq!(
            serde_json::to_string(&WarrantyState::RechazadoCliente).unwrap(),
            "\"RECHAZADO_CLIENTE\""
        );
        for state in WarrantyState::ALL {
            assert_eq!(WarrantyState::parse(state.as_str()), Some(state));
        }
        assert_eq!(WarrantyState::parse("OTRO"), None);
    }

    #[test]
    fn test_state_colors() {
        assert!(WarrantyState::Recibido.color_class().ends_with("--blue"));
        assert!(WarrantyState::RechazadoCliente.color_class().ends_with("--red"));
        assert!(WarrantyState::Cerrado.color_class().ends_with("--gray"));
    }

    #[test]
    fn test_finish_form_rules() {
        let mut form = FinishWarrantyForm::default();
        assert_eq!(form.to_request(1, 2, 3), Err("Debe seleccionar un estado"));
        form.state = "REPARADO".into();
        form.conclusion = "Cambio de pantalla".into();
        assert_eq!(form.to_request(1, 2, 3), Err("Debe llenar todos los campos"));
        form.actions_taken = "Se reemplazó el display".into();
        let request = form.to_request(1, 2, 3).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["garantiaId"], 1);
        assert_eq!(json["productoId"], 2);
        assert_eq!(json["usuarioId"], 3);
        assert_eq!(json["accionesRealizadas"], "Se reemplazó el display");
    }

    #[test]
    fn test_warranty_fallbacks() {
        let warranty: Warranty = serde_json::from_value(serde_json::json!({
            "id": 8,
            "cliente": null,
            "comentario": null,
            "estado": "RECIBIDO"
        }))
        .unwrap();
        assert_eq!(warranty.customer_name(), "Sin cliente");
        assert_eq!(warranty.product_name(), "Producto no disponible");
        assert_eq!(warranty.product_id(), 0);
        let update = UpdateWarrantyRequest::from_warranty(&warranty);
        assert_eq!(update.estado, Some(WarrantyState::Recibido));
    }
}
