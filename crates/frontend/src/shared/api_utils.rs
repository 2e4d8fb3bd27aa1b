//! API utilities for frontend-backend communication
//!
//! Builds API URLs and wraps `gloo-net` requests with the session token,
//! JSON (de)serialization and backend error-body extraction.

use crate::system::session::storage;
use contracts::shared::api_error::error_message_from_body;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Get the base URL for API requests
///
/// `NOVA_API_URL` at build time wins. Otherwise the URL is derived from the
/// current window location, using port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    if let Some(url) = option_env!("NOVA_API_URL") {
        return url.trim_end_matches('/').to_string();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path starting with `/`.
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("No se pudo conectar con el servidor: {0}")]
    Network(String),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Respuesta inesperada del servidor: {0}")]
    Decode(String),
    #[error("No se pudo preparar la solicitud: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn check(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status,
        message: error_message_from_body(&body, status),
    })
}

async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
    let response = authorized(builder)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    check(response).await
}

async fn send_body<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<Response, ApiError> {
    let request = authorized(builder)
        .json(body)
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    check(response).await
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// GET `path` and decode the JSON body.
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    decode(send(Request::get(&api_url(path))).await?).await
}

/// GET `path` with `query` serialized by `serde_qs`.
pub async fn get_json_with_query<T, Q>(path: &str, query: &Q) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    Q: Serialize,
{
    let qs = serde_qs::to_string(query).map_err(|e| ApiError::Encode(e.to_string()))?;
    let url = if qs.is_empty() {
        api_url(path)
    } else {
        format!("{}?{}", api_url(path), qs)
    };
    decode(send(Request::get(&url)).await?).await
}

pub async fn post_json<B: Serialize>(path: &str, body: &B) -> Result<(), ApiError> {
    send_body(Request::post(&api_url(path)), body).await.map(|_| ())
}

pub async fn patch_json<B: Serialize>(path: &str, body: &B) -> Result<(), ApiError> {
    send_body(Request::patch(&api_url(path)), body).await.map(|_| ())
}

/// PATCH without a body; the action is encoded in the path.
pub async fn patch_empty(path: &str) -> Result<(), ApiError> {
    send(Request::patch(&api_url(path))).await.map(|_| ())
}

pub async fn delete(path: &str) -> Result<(), ApiError> {
    send(Request::delete(&api_url(path))).await.map(|_| ())
}
