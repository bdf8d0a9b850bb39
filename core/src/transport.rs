//! Executes `HttpRequest` values against the network.

use std::future::Future;
use std::sync::Arc;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Largest response body read before the exchange is abandoned.
pub const MAX_BODY_BYTES: u64 = 10 * 1024 * 1024;

/// Pluggable HTTP backend.
///
/// A transport only reports failures to exchange bytes. Non-success
/// statuses come back as ordinary responses for the client to interpret.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send {
        (**self).send(request)
    }
}

/// A [`Transport`] backed by a [`ureq`] agent.
///
/// ureq blocks, so each exchange runs on the tokio blocking pool and the
/// calling task stays free.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            // Statuses are interpreted by the client, not the agent.
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute(&agent, request))
            .await
            .map_err(|e| ApiError::TransportError(e.to_string()))?
    }
}

fn execute(agent: &ureq::Agent, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    let mut builder = ::http::Request::builder()
        .method(::http::Method::from(request.method))
        .uri(&request.url);
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let result = match request.body {
        Some(body) => {
            let req = builder
                .body(body.into_bytes())
                .map_err(|e| ApiError::TransportError(e.to_string()))?;
            agent.run(req)
        }
        None => {
            let req = builder
                .body(())
                .map_err(|e| ApiError::TransportError(e.to_string()))?;
            agent.run(req)
        }
    };
    let response = result.map_err(|e| ApiError::TransportError(e.to_string()))?;

    let (parts, mut body) = response.into_parts();
    let status = parts.status.as_u16();
    let body = match body.with_config().limit(MAX_BODY_BYTES).read_to_vec() {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) if parts.status.is_success() => return Err(ApiError::TransportError(e.to_string())),
        // A failure status is still reported even when its body is unreadable.
        Err(e) => {
            tracing::warn!(status, error = %e, "discarding unreadable error body");
            String::new()
        }
    };
    let headers = parts
        .headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}
