//! Blocking `Transport` backed by ureq.

use std::time::Duration;

use ureq::{Agent, RequestBuilder};

use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

/// Executes requests with a shared ureq `Agent`.
///
/// The agent is configured with `http_status_as_error(false)` so 4xx/5xx
/// responses come back as data and the decoder interprets them. Connection
/// pooling is whatever ureq provides.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
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

/// Apply headers and the per-call timeout to a request builder.
fn prepare<B>(
    mut builder: RequestBuilder<B>,
    request: &HttpRequest,
    timeout: Option<Duration>,
) -> RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder.config().timeout_global(timeout).build()
}

fn map_error(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Timeout(_) => ApiError::Timeout,
        other => ApiError::Transport(other.to_string()),
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest, timeout: Option<Duration>) -> Result<HttpResponse> {
        let url = request.url.as_str();
        let body = request.body.as_deref();

        let outcome = match (request.method, body) {
            (HttpMethod::Get, _) => prepare(self.agent.get(url), request, timeout).call(),
            (HttpMethod::Delete, None) => prepare(self.agent.delete(url), request, timeout).call(),
            (HttpMethod::Delete, Some(body)) => prepare(self.agent.delete(url), request, timeout)
                .force_send_body()
                .send(body.as_bytes()),
            (HttpMethod::Post, Some(body)) => {
                prepare(self.agent.post(url), request, timeout).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => prepare(self.agent.post(url), request, timeout).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                prepare(self.agent.put(url), request, timeout).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => prepare(self.agent.put(url), request, timeout).send_empty(),
        };

        let mut response = outcome.map_err(map_error)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        let body = response.body_mut().read_to_string().map_err(map_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
