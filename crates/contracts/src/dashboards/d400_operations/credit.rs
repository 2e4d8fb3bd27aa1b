//! Credit authorizations: review, accept with a payment channel, reject.

use super::dto::NamedRef;
use crate::shared::lenient::{lenient_f64, null_as_default};
use serde::{Deserialize, Serialize};

pub const AUTHORIZATIONS_PATH: &str = "/credito-authorization";
pub const ACCEPT_CREDIT_PATH: &str = "/credito-authorization/create-credito-from-auth";
pub const REJECT_CREDIT_PATH: &str = "/credito-authorization/reject-credito-from-auth";
pub const DEFAULT_APPROVAL_COMMENT: &str = "Aprobación desde dashboard";
pub const MISSING_IDS_MESSAGE: &str = "Propiedades insuficientes, recargue la pagina";
const DOWN_PAYMENT_LABEL: &str = "ENGANCHE";

/// Filters the dashboard sends with the authorization list request.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationFilters {
    pub estado: &'static str,
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "sortBy")]
    pub sort_by: &'static str,
    #[serde(rename = "sortDir")]
    pub sort_dir: &'static str,
}

impl Default for AuthorizationFilters {
    fn default() -> Self {
        Self {
            estado: "PENDIENTE",
            page: 1,
            limit: 20,
            sort_by: "creadoEn",
            sort_dir: "desc",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthCustomer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub nombre: String,
    #[serde(default)]
    pub apellidos: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthEconomics {
    #[serde(rename = "totalPropuesto", default, deserialize_with = "lenient_f64")]
    pub total_propuesto: f64,
    #[serde(rename = "cuotasTotalesPropuestas", default, deserialize_with = "lenient_f64")]
    pub cuotas_totales: f64,
    #[serde(rename = "interesTipo", default, deserialize_with = "null_as_default")]
    pub interes_tipo: String,
    #[serde(rename = "interesPorcentaje", default, deserialize_with = "lenient_f64")]
    pub interes_porcentaje: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthDates {
    #[serde(rename = "primeraCuotaISO", default)]
    pub primera_cuota_iso: Option<String>,
    #[serde(rename = "solicitadoISO", default)]
    pub solicitado_iso: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub etiqueta: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub monto: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthSchedule {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cuotas: Vec<Installment>,
}

/// A pending credit sale waiting for an admin decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditAuthorization {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub estado: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cliente: AuthCustomer,
    #[serde(default, deserialize_with = "null_as_default")]
    pub economico: AuthEconomics,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fechas: AuthDates,
    #[serde(default, deserialize_with = "null_as_default")]
    pub schedule: AuthSchedule,
    #[serde(default)]
    pub sucursal: Option<NamedRef>,
    #[serde(rename = "solicitadoPor", default)]
    pub solicitado_por: Option<NamedRef>,
}

impl CreditAuthorization {
    pub fn customer_name(&self) -> String {
        match self.cliente.apellidos.as_deref().map(str::trim) {
            Some(last) if !last.is_empty() => format!("{} {}", self.cliente.nombre, last),
            _ => self.cliente.nombre.clone(),
        }
    }

    /// Amount of the `ENGANCHE` installment, 0 when the plan has none.
    pub fn down_payment(&self) -> f64 {
        self.schedule
            .cuotas
            .iter()
            .find(|c| c.etiqueta == DOWN_PAYMENT_LABEL)
            .map(|c| c.monto)
            .unwrap_or(0.0)
    }

    /// One-line plan description for the approval dialog.
    pub fn plan_summary(&self, first_due: Option<&str>) -> String {
        let cuotas = self.economico.cuotas_totales;
        format!(
            "Plan: {} cuota{} • Interés: {} {}% • Primera cuota: {}",
            cuotas,
            if cuotas == 1.0 { "" } else { "s" },
            self.economico.interes_tipo,
            self.economico.interes_porcentaje,
            first_due.unwrap_or("N/A")
        )
    }
}

/// Paginated envelope of `GET credito-authorization`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditAuthorizationList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<CreditAuthorization>,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

/// Insert a freshly pushed authorization at the top, replacing any entry
/// with the same id.
pub fn upsert_authorization(items: &mut Vec<CreditAuthorization>, item: CreditAuthorization) {
    items.retain(|a| a.id != item.id);
    items.insert(0, item);
}

/// Payment channel recorded by the POS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosPaymentMethod {
    Efectivo,
    Transferencia,
    Tarjeta,
    Cheque,
}

impl PosPaymentMethod {
    pub const CHOICES: [PosPaymentMethod; 4] = [
        PosPaymentMethod::Efectivo,
        PosPaymentMethod::Transferencia,
        PosPaymentMethod::Tarjeta,
        PosPaymentMethod::Cheque,
    ];

    /// Cash and "contado" are the same drawer; anything unknown is cash.
    pub fn from_selection(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "TRANSFERENCIA" => PosPaymentMethod::Transferencia,
            "TARJETA" => PosPaymentMethod::Tarjeta,
            "CHEQUE" => PosPaymentMethod::Cheque,
            _ => PosPaymentMethod::Efectivo,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PosPaymentMethod::Efectivo => "EFECTIVO",
            PosPaymentMethod::Transferencia => "TRANSFERENCIA",
            PosPaymentMethod::Tarjeta => "TARJETA",
            PosPaymentMethod::Cheque => "CHEQUE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PosPaymentMethod::Efectivo => "Efectivo",
            PosPaymentMethod::Transferencia => "Transferencia",
            PosPaymentMethod::Tarjeta => "Tarjeta",
            PosPaymentMethod::Cheque => "Cheque",
        }
    }

    pub fn uses_bank_account(&self) -> bool {
        matches!(
            self,
            PosPaymentMethod::Transferencia | PosPaymentMethod::Tarjeta | PosPaymentMethod::Cheque
        )
    }

    pub fn uses_cash_register(&self) -> bool {
        matches!(self, PosPaymentMethod::Efectivo)
    }
}

/// What the admin picked in the payment-channel dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcceptCreditForm {
    pub comment: String,
    pub method: String,
    pub bank_account_id: String,
    pub cash_register_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptCreditRequest {
    #[serde(rename = "adminId")]
    pub admin_id: i64,
    pub comentario: String,
    #[serde(rename = "metodoPago")]
    pub metodo_pago: PosPaymentMethod,
    #[serde(rename = "authCreditoId")]
    pub auth_credito_id: i64,
    #[serde(rename = "cuentaBancariaId")]
    pub cuenta_bancaria_id: Option<i64>,
    #[serde(rename = "cajaId")]
    pub caja_id: Option<i64>,
}

fn parse_id(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

impl AcceptCreditRequest {
    /// Bank account only travels for bank channels, cash register only for
    /// cash. Blank comment becomes the default approval note.
    pub fn build(admin_id: i64, authorization_id: i64, form: &AcceptCreditForm) -> Self {
        let method = PosPaymentMethod::from_selection(&form.method);
        let comment = form.comment.trim();
        Self {
            admin_id,
            comentario: if comment.is_empty() {
                DEFAULT_APPROVAL_COMMENT.to_string()
            } else {
                comment.to_string()
            },
            metodo_pago: method,
            auth_credito_id: authorization_id,
            cuenta_bancaria_id: method
                .uses_bank_account()
                .then(|| parse_id(&form.bank_account_id))
                .flatten(),
            caja_id: method
                .uses_cash_register()
                .then(|| parse_id(&form.cash_register_id))
                .flatten(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectCreditRequest {
    #[serde(rename = "authId")]
    pub auth_id: i64,
    #[serde(rename = "adminId")]
    pub admin_id: i64,
    #[serde(rename = "sucursalId")]
    pub sucursal_id: i64,
    #[serde(rename = "motivoRechazo")]
    pub motivo_rechazo: String,
}

impl RejectCreditRequest {
    /// Zero or missing ids mean the session is stale.
    pub fn build(
        authorization_id: Option<i64>,
        admin_id: i64,
        branch_id: i64,
        reason: &str,
    ) -> Result<Self, &'static str> {
        match authorization_id {
            Some(auth_id) if auth_id != 0 && admin_id != 0 && branch_id != 0 => Ok(Self {
                auth_id,
                admin_id,
                sucursal_id: branch_id,
                motivo_rechazo: reason.trim().to_string(),
            }),
            _ => Err(MISSING_IDS_MESSAGE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authorization(id: i64) -> CreditAuthorization {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "estado": "PENDIENTE",
            "cliente": {"nombre": "Luis", "apellidos": "Pérez"},
            "economico": {"totalPropuesto": "3600", "cuotasTotalesPropuestas": 6,
                          "interesTipo": "SIMPLE", "interesPorcentaje": 5},
            "schedule": {"cuotas": [
                {"etiqueta": "ENGANCHE", "monto": "600"},
                {"etiqueta": "CUOTA 1", "monto": 500}
            ]}
        }))
        .unwrap()
    }

    #[test]
    fn test_down_payment() {
        assert_eq!(authorization(1).down_payment(), 600.0);
        let mut no_down = authorization(1);
        no_down.schedule.cuotas.remove(0);
        assert_eq!(no_down.down_payment(), 0.0);
    }

    #[test]
    fn test_customer_and_plan_text() {
        let auth = authorization(1);
        assert_eq!(auth.customer_name(), "Luis Pérez");
        assert_eq!(
            auth.plan_summary(None),
            "Plan: 6 cuotas • Interés: SIMPLE 5% • Primera cuota: N/A"
        );
    }

    #[test]
    fn test_payment_method_mapping() {
        assert_eq!(PosPaymentMethod::from_selection("CONTADO"), PosPaymentMethod::Efectivo);
        assert_eq!(PosPaymentMethod::from_selection("EFECTIVO"), PosPaymentMethod::Efectivo);
        assert_eq!(PosPaymentMethod::from_selection("tarjeta"), PosPaymentMethod::Tarjeta);
        assert_eq!(PosPaymentMethod::from_selection(""), PosPaymentMethod::Efectivo);
        assert_eq!(PosPaymentMethod::from_selection("CREDITO"), PosPaymentMethod::Efectivo);
    }

    #[test]
    fn test_accept_payload_channels() {
        let form = AcceptCreditForm {
            comment: "  ".into(),
            method: "TRANSFERENCIA".into(),
            bank_account_id: "4".into(),
            cash_register_id: "9".into(),
        };
        let payload = AcceptCreditRequest::build(2, 17, &form);
        assert_eq!(payload.comentario, DEFAULT_APPROVAL_COMMENT);
        assert_eq!(payload.cuenta_bancaria_id, Some(4));
        assert_eq!(payload.caja_id, None);

        let cash = AcceptCreditForm {
            method: "CONTADO".into(),
            ..form
        };
        let payload = AcceptCreditRequest::build(2, 17, &cash);
        assert_eq!(payload.metodo_pago, PosPaymentMethod::Efectivo);
        assert_eq!(payload.cuenta_bancaria_id, None);
        assert_eq!(payload.caja_id, Some(9));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["metodoPago"], "EFECTIVO");
        assert_eq!(json["cuentaBancariaId"], serde_json::Value::Null);
    }

    #[test]
    fn test_reject_requires_ids() {
        assert_eq!(RejectCreditRequest::build(None, 1, 1, "x"), Err(MISSING_IDS_MESSAGE));
        assert_eq!(RejectCreditRequest::build(Some(5), 1, 0, "x"), Err(MISSING_IDS_MESSAGE));
        let ok = RejectCreditRequest::build(Some(5), 1, 2, " sin fiador ").unwrap();
        assert_eq!(ok.motivo_rechazo, "sin fiador");
    }

    #[test]
    fn test_upsert_prepends_and_dedupes() {
        let mut items = vec![authorization(1), authorization(2)];
        upsert_authorization(&mut items, authorization(3));
        upsert_authorization(&mut items, authorization(2));
        let ids: Vec<i64> = items.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
