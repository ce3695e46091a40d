use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::Client;

type Reply = Box<dyn Fn() -> Result<HttpResponse> + Send + Sync>;

/// Transport double that records every request and replays a canned reply.
pub(crate) struct RecordingTransport {
    reply: Reply,
    requests: Mutex<Vec<(HttpRequest, Option<Duration>)>>,
}

impl RecordingTransport {
    pub(crate) fn replying(status: u16, body: &str) -> Arc<Self> {
        let body = body.to_string();
        Arc::new(Self {
            reply: Box::new(move || {
                Ok(HttpResponse {
                    status,
                    headers: Vec::new(),
                    body: body.clone(),
                })
            }),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn failing(err: impl Fn() -> ApiError + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            reply: Box::new(move || Err(err())),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().map(|(req, _)| req.clone())
    }

    pub(crate) fn last_timeout(&self) -> Option<Duration> {
        self.requests.lock().unwrap().last().and_then(|(_, timeout)| *timeout)
    }
}

impl Transport for RecordingTransport {
    fn execute(&self, request: &HttpRequest, timeout: Option<Duration>) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push((request.clone(), timeout));
        (self.reply)()
    }
}

/// A client wired to `transport` with base URL `https://api.example.test`.
pub(crate) fn client(transport: &Arc<RecordingTransport>) -> Client {
    let config = ClientConfig::new("sk_test_123").with_base_url("https://api.example.test");
    Client::with_transport(config, transport.clone()).unwrap()
}
