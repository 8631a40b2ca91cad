//! Visitor-identity computation for read-count deduplication.
//!
//! The identity is a SHA-256 digest over the client's network address and
//! its User-Agent string. This is a best-effort duplicate-view heuristic —
//! trivially spoofable by varying either input — never a security control.

use std::{convert::Infallible, net::SocketAddr};

use axum::{
  extract::{ConnectInfo, FromRequestParts},
  http::{HeaderMap, header, request::Parts},
};
use sha2::{Digest, Sha256};

/// The client's socket address, when the server was started with
/// `into_make_service_with_connect_info` — absent under test harnesses.
pub struct ClientAddr(pub Option<String>);

impl<S> FromRequestParts<S> for ClientAddr
where
  S: Send + Sync,
{
  type Rejection = Infallible;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    let addr = parts
      .extensions
      .get::<ConnectInfo<SocketAddr>>()
      .map(|ConnectInfo(addr)| addr.ip().to_string());
    Ok(ClientAddr(addr))
  }
}

/// Compute the visitor identity for an (address, user-agent) pair.
pub fn visitor_identity(address: &str, user_agent: &str) -> String {
  let mut hasher = Sha256::new();
  hasher.update(address.as_bytes());
  hasher.update(b"|");
  hasher.update(user_agent.as_bytes());
  hex::encode(hasher.finalize())
}

/// Derive the visitor identity from request metadata.
///
/// The client address is taken from the first `X-Forwarded-For` entry when
/// present (the server is expected to sit behind a proxy in production),
/// falling back to the socket peer address.
pub fn visitor_identity_from_request(
  headers: &HeaderMap,
  peer_address: Option<&str>,
) -> String {
  let forwarded = headers
    .get("x-forwarded-for")
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.split(',').next())
    .map(str::trim)
    .filter(|v| !v.is_empty());

  let address = forwarded.or(peer_address).unwrap_or("");
  let user_agent = headers
    .get(header::USER_AGENT)
    .and_then(|v| v.to_str().ok())
    .unwrap_or("");

  visitor_identity(address, user_agent)
}
