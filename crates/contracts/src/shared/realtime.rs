//! Socket envelopes pushed by the backend and what each one means to the
//! client-side cache.

use crate::dashboards::d400_operations::CreditAuthorization;
use crate::shared::query_key::{BranchId, QueryKey, UserId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PRICE_REQUEST_EVENT: &str = "recibirSolicitud";
pub const TRANSFER_REQUEST_EVENT: &str = "recibirSolicitudTransferencia";
pub const CREDIT_AUTHORIZATION_EVENT: &str = "credit:authorization.created";
pub const NOTIFICATION_EVENT: &str = "notification:new";

/// `{ "event": "<name>", "data": <payload> }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocketEnvelope {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

pub fn parse_envelope(text: &str) -> Option<SocketEnvelope> {
    serde_json::from_str(text).ok()
}

/// Cache effect of a socket event for the current session.
#[derive(Debug, Clone, PartialEq)]
pub enum RealtimeEffect {
    Invalidate(QueryKey),
    UpsertAuthorization(CreditAuthorization),
}

/// Maps an envelope to its cache effect. Unknown events and malformed
/// authorization payloads yield `None`.
pub fn effect_of(
    envelope: &SocketEnvelope,
    branch_id: BranchId,
    user_id: UserId,
) -> Option<RealtimeEffect> {
    match envelope.event.as_str() {
        PRICE_REQUEST_EVENT => Some(RealtimeEffect::Invalidate(QueryKey::PriceRequests(
            branch_id,
        ))),
        TRANSFER_REQUEST_EVENT => Some(RealtimeEffect::Invalidate(
            QueryKey::TransferRequests(branch_id),
        )),
        NOTIFICATION_EVENT => Some(RealtimeEffect::Invalidate(QueryKey::Notifications(
            user_id,
        ))),
        CREDIT_AUTHORIZATION_EVENT => {
            serde_json::from_value::<CreditAuthorization>(envelope.data.clone())
                .ok()
                .map(RealtimeEffect::UpsertAuthorization)
        }
        _ => None,
    }
}

/// `http://host:3000` → `ws://host:3000/ws`, `https` → `wss`.
pub fn socket_url(api_base: &str) -> String {
    let base = api_base.trim_end_matches('/');
    let rest = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        base.to_string()
    };
    format!("{}/ws", rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_envelope() {
        let env = parse_envelope(r#"{"event":"recibirSolicitud","data":{"id":1}}"#).unwrap();
        assert_eq!(env.event, PRICE_REQUEST_EVENT);
        assert!(parse_envelope("ping").is_none());
        let bare = parse_envelope(r#"{"event":"notification:new"}"#).unwrap();
        assert_eq!(bare.data, Value::Null);
    }

    #[test]
    fn test_effects() {
        let env = |event: &str, data: Value| SocketEnvelope {
            event: event.to_string(),
            data,
        };
        assert_eq!(
            effect_of(&env(PRICE_REQUEST_EVENT, Value::Null), 3, 7),
            Some(RealtimeEffect::Invalidate(QueryKey::PriceRequests(3)))
        );
        assert_eq!(
            effect_of(&env(TRANSFER_REQUEST_EVENT, Value::Null), 3, 7),
            Some(RealtimeEffect::Invalidate(QueryKey::TransferRequests(3)))
        );
        assert_eq!(
            effect_of(&env(NOTIFICATION_EVENT, Value::Null), 3, 7),
            Some(RealtimeEffect::Invalidate(QueryKey::Notifications(7)))
        );
        assert_eq!(effect_of(&env("venta:creada", Value::Null), 3, 7), None);
        assert_eq!(effect_of(&env(CREDIT_AUTHORIZATION_EVENT, Value::Null), 3, 7), None);

        let created = env(
            CREDIT_AUTHORIZATION_EVENT,
            serde_json::json!({"id": 44, "cliente": {"nombre": "Ana"}}),
        );
        match effect_of(&created, 3, 7) {
            Some(RealtimeEffect::UpsertAuthorization(auth)) => assert_eq!(auth.id, 44),
            other => panic!("unexpected effect {:?}", other),
        }
    }

    #[test]
    fn test_socket_url() {
        assert_eq!(socket_url("http://localhost:3000"), "ws://localhost:3000/ws");
        assert_eq!(socket_url("https://api.nova.gt/"), "wss://api.nova.gt/ws");
    }
}
