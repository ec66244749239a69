use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, request::Parts},
};

use crate::AppState;

/// 客户端 IP：信任代理时依次取 X-Real-IP、X-Forwarded-For 首个地址，否则只用连接地址
#[derive(Debug, Clone, PartialEq)]
pub struct ClientIp(pub String);

pub fn resolve_client_ip(headers: &HeaderMap, peer: Option<SocketAddr>, trust_headers: bool) -> String {
    let peer_ip = peer.map(|addr| addr.ip().to_string());

    let forwarded = if trust_headers {
        headers
            .get("x-real-ip")
            .and_then(|h| h.to_str().ok())
            .filter(|ip| !ip.trim().is_empty())
            .or_else(|| {
                headers
                    .get("x-forwarded-for")
                    .and_then(|h| h.to_str().ok())
                    .and_then(|s| s.split(',').find(|ip| !ip.trim().is_empty()))
            })
    } else {
        None
    };

    forwarded
        .or(peer_ip.as_deref())
        .unwrap_or("unknown")
        .trim()
        .to_string()
}

impl FromRequestParts<AppState> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ci| ci.0);
        let trust_headers = state.config.trusts_forwarded_for(peer.map(|addr| addr.ip()));
        Ok(ClientIp(resolve_client_ip(&parts.headers, peer, trust_headers)))
    }
}
