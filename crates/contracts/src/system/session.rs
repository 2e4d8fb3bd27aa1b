//! Session claims carried in the POS access token.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// localStorage key the POS login writes the token under.
pub const TOKEN_KEY: &str = "authTokenPos";
pub const SELLER_ROLE: &str = "VENDEDOR";

/// Role names from the token are compared trimmed and case-insensitively.
pub fn is_seller_role(role: &str) -> bool {
    role.trim().eq_ignore_ascii_case(SELLER_ROLE)
}

pub fn branch_info_path(branch_id: i64) -> String {
    format!("/sucursales/get-info-sucursal/{}", branch_id)
}

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("token is not a JWT")]
    Malformed,
    #[error("token payload is not base64: {0}")]
    Encoding(String),
    #[error("token payload is not valid claims: {0}")]
    Claims(String),
}

/// Payload of the access token. Signature is not checked here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserToken {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub correo: String,
    #[serde(default)]
    pub activo: bool,
    #[serde(default)]
    pub rol: String,
    pub sub: i64,
    #[serde(rename = "sucursalId", default)]
    pub sucursal_id: i64,
}

impl UserToken {
    pub fn is_seller(&self) -> bool {
        is_seller_role(&self.rol)
    }

    pub fn initials(&self) -> String {
        initials(&self.nombre)
    }
}

pub fn decode_token(token: &str) -> Result<UserToken, SessionError> {
    let mut parts = token.trim().split('.');
    let payload = match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_)) => payload,
        _ => return Err(SessionError::Malformed),
    };
    // Some issuers keep the padding.
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| SessionError::Encoding(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| SessionError::Claims(e.to_string()))
}

/// "Ana María López" → "AM", "Ana" → "AN", blank → "??".
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let letters: String = match words.as_slice() {
        [] => return "??".to_string(),
        [single] => single.chars().take(2).collect(),
        [first, second, ..] => first.chars().take(1).chain(second.chars().take(1)).collect(),
    };
    letters.to_uppercase()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BranchInfo {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_for(payload: &str) -> String {
        format!(
            "eyJhbGciOiJIUzI1NiJ9.{}.signature",
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn test_decode_token() {
        let token = token_for(
            r#"{"nombre":"Ana López","correo":"ana@nova.gt","activo":true,"rol":"ADMIN","sub":5,"sucursalId":2,"iat":1}"#,
        );
        let claims = decode_token(&token).unwrap();
        assert_eq!(claims.sub, 5);
        assert_eq!(claims.sucursal_id, 2);
        assert!(!claims.is_seller());
        assert_eq!(claims.initials(), "AL");
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(decode_token("abc"), Err(SessionError::Malformed));
        assert!(matches!(decode_token("a.*&^.c"), Err(SessionError::Encoding(_))));
        let no_sub = token_for(r#"{"nombre":"x"}"#);
        assert!(matches!(decode_token(&no_sub), Err(SessionError::Claims(_))));
    }

    #[test]
    fn test_seller_role_matching() {
        assert!(is_seller_role("VENDEDOR"));
        assert!(is_seller_role(" vendedor "));
        assert!(!is_seller_role("ADMIN"));
        assert!(!is_seller_role(""));
        let claims = UserToken {
            rol: "Vendedor".to_string(),
            sub: 1,
            ..UserToken::default()
        };
        assert!(claims.is_seller());
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("ana maría lópez"), "AM");
        assert_eq!(initials("  Ana "), "AN");
        assert_eq!(initials("J"), "J");
        assert_eq!(initials(""), "??");
    }
}
