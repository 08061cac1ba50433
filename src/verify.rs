//! Password reset code verification.
//!
//! The gateway owns none of the verification logic. [`VerifyResetCode`] is the
//! typed seam between the route layer and the collaborator that does: the
//! handler hands over the transport-level request and returns whatever comes
//! back, unchanged.

use anyhow::Context;
use axum::{
    async_trait,
    body::Body,
    http::{header::HeaderName, HeaderMap, Request},
    response::{IntoResponse, Response},
};
use reqwest::Url;

/// The external password reset code verification capability.
///
/// Implementations receive the incoming request exactly as the client sent it
/// and are responsible for all parsing, validation and error reporting.
#[async_trait]
pub trait VerifyResetCode: Send + Sync {
    async fn verify_reset_code(&self, req: Request<Body>) -> anyhow::Result<Response>;
}

/// [`VerifyResetCode`] backed by an HTTP endpoint.
///
/// Requests are relayed verbatim, modulo hop-by-hop headers. The upstream's
/// response is relayed back the same way, whatever its status code.
pub struct Upstream {
    client: reqwest::Client,
    url: Url,
}

impl Upstream {
    pub fn new(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl VerifyResetCode for Upstream {
    async fn verify_reset_code(&self, req: Request<Body>) -> anyhow::Result<Response> {
        let (parts, body) = req.into_parts();
        let body = hyper::body::to_bytes(body)
            .await
            .context("failed to read request body")?;

        let res = self
            .client
            .request(parts.method, self.url.clone())
            .headers(forwarded(&parts.headers, skip_request_header))
            .body(body)
            .send()
            .await
            .context("upstream request failed")?;

        let status = res.status();
        let headers = forwarded(res.headers(), skip_response_header);
        let body = res
            .bytes()
            .await
            .context("failed to read upstream response body")?;

        Ok((status, headers, body).into_response())
    }
}

fn forwarded(headers: &HeaderMap, skip: fn(&HeaderName) -> bool) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(headers.len());

    for (name, value) in headers {
        if !skip(name) {
            out.append(name.clone(), value.clone());
        }
    }

    out
}

/// Hop-by-hop headers (RFC 9110 §7.6.1) are meaningful for a single transport
/// connection only and must not be relayed.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}

fn skip_request_header(name: &HeaderName) -> bool {
    // reqwest derives host and content-length from the upstream url and body.
    is_hop_by_hop(name) || matches!(name.as_str(), "host" | "content-length")
}

fn skip_response_header(name: &HeaderName) -> bool {
    // content-length is recomputed once the body has been buffered.
    is_hop_by_hop(name) || name.as_str() == "content-length"
}

#[cfg(test)]
mod tests {
    use axum::http::header;

    use super::*;

    #[test]
    fn hop_by_hop_headers_are_dropped() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONNECTION, "keep-alive".parse().unwrap());
        headers.insert(header::TRANSFER_ENCODING, "chunked".parse().unwrap());
        headers.insert(header::HOST, "gateway.example.com".parse().unwrap());
        headers.insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
        headers.insert("x-request-id", "abc123".parse().unwrap());

        let out = forwarded(&headers, skip_request_header);

        assert_eq!(out.len(), 2);
        assert_eq!(out[header::CONTENT_TYPE], "application/json");
        assert_eq!(out["x-request-id"], "abc123");
    }

    #[test]
    fn repeated_headers_survive_forwarding() {
        let mut headers = HeaderMap::new();
        headers.append(header::SET_COOKIE, "a=1".parse().unwrap());
        headers.append(header::SET_COOKIE, "b=2".parse().unwrap());

        let out = forwarded(&headers, skip_response_header);

        assert_eq!(out.get_all(header::SET_COOKIE).iter().count(), 2);
    }
}
