//! Backend error bodies.
//!
//! Failed requests come back as `{ "message": "..." }`, `{ "message": ["..", ".."] }`
//! (validation pipes) or `{ "error": "..." }`. The UI only ever shows one line.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum MessageField {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<MessageField>,
    #[serde(default)]
    error: Option<String>,
}

/// Extract the user-facing message from an error response body.
///
/// Falls back to the HTTP status when the body carries nothing usable.
pub fn error_message_from_body(body: &str, status: u16) -> String {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok();
    let message = parsed.as_ref().and_then(|b| match &b.message {
        Some(MessageField::One(m)) if !m.trim().is_empty() => Some(m.trim().to_string()),
        Some(MessageField::Many(items)) if !items.is_empty() => Some(items.join(", ")),
        _ => None,
    });
    message
        .or_else(|| {
            parsed
                .and_then(|b| b.error)
                .filter(|e| !e.trim().is_empty())
        })
        .unwrap_or_else(|| format!("Error del servidor ({})", status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_variants() {
        assert_eq!(
            error_message_from_body(r#"{"message":"Stock no encontrado"}"#, 404),
            "Stock no encontrado"
        );
        assert_eq!(
            error_message_from_body(r#"{"message":["nombre vacío","precio inválido"]}"#, 400),
            "nombre vacío, precio inválido"
        );
        assert_eq!(
            error_message_from_body(r#"{"error":"Bad Request"}"#, 400),
            "Bad Request"
        );
    }

    #[test]
    fn test_fallback_to_status() {
        assert_eq!(error_message_from_body("<html>", 502), "Error del servidor (502)");
        assert_eq!(error_message_from_body(r#"{"message":""}"#, 500), "Error del servidor (500)");
    }
}
