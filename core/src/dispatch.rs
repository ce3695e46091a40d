//! The shared request/response pipeline used by every resource service.
//!
//! # Design
//! `Dispatcher` owns the immutable credential, base URL, default timeout,
//! and a `Transport`. A call runs encode → transport → decode with no state
//! retained between calls, so one dispatcher can serve any number of threads
//! without locking. Nothing is retried; every error is returned as is.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::{ClientConfig, SecretKey};
use crate::decode::{decode_response, ResponseShape};
use crate::encode::{encode_request, BodyEncoding};
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::pagination::{paginate_url, Page};
use crate::transport::UreqTransport;

/// Pass as the request argument of a call that sends no payload.
pub const NO_BODY: Option<&()> = None;

/// Method, path, payload encoding and response shape for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub path: String,
    pub encoding: BodyEncoding,
    pub shape: ResponseShape,
}

impl Endpoint {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            encoding: BodyEncoding::Json,
            shape: ResponseShape::Data,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Add `perPage`/`page` query parameters. Paginated replies are
    /// `{meta, data}` listings, so the whole body is decoded.
    pub fn paginate(mut self, page: Page) -> Self {
        self.path = paginate_url(&self.path, page.per_page, page.page);
        self.shape = ResponseShape::Envelope;
        self
    }

    /// Decode the whole body rather than the `data` object.
    pub fn envelope(mut self) -> Self {
        self.shape = ResponseShape::Envelope;
        self
    }

    /// Send the payload as query parameters instead of a JSON body.
    pub fn query_encoded(mut self) -> Self {
        self.encoding = BodyEncoding::Query;
        self
    }
}

/// Authenticated HTTP dispatcher shared by all resource services.
pub struct Dispatcher {
    base_url: Url,
    secret_key: SecretKey,
    user_agent: String,
    timeout: Duration,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.base_url.as_str())
            .field("secret_key", &self.secret_key)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Build a dispatcher that talks HTTP through ureq.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_transport(config, Arc::new(UreqTransport::new()))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        let base_url = config.parsed_base_url()?;
        let timeout = config.timeout();
        Ok(Self {
            base_url,
            secret_key: config.secret_key,
            user_agent: config.user_agent,
            timeout,
            transport,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path` (with or without a leading slash) under the base URL.
    ///
    /// Any path prefix on the base URL is kept.
    pub fn resolve(&self, path: &str) -> Result<String> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let joined = format!("{base}/{}", path.trim_start_matches('/'));
        Url::parse(&joined)
            .map(String::from)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid request path {path}: {e}")))
    }

    /// Build the full HTTP request for `endpoint` without sending it.
    pub fn build_request<Req>(&self, endpoint: &Endpoint, request: Option<&Req>) -> Result<HttpRequest>
    where
        Req: Serialize + ?Sized,
    {
        let encoded = encode_request(endpoint.method, &endpoint.path, request, endpoint.encoding)?;
        let url = self.resolve(&encoded.path)?;

        let mut headers = vec![
            (
                "authorization".to_string(),
                format!("Bearer {}", self.secret_key.expose()),
            ),
            ("accept".to_string(), "application/json".to_string()),
            ("user-agent".to_string(), self.user_agent.clone()),
        ];
        if encoded.body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }

        Ok(HttpRequest {
            method: endpoint.method,
            url,
            headers,
            body: encoded.body,
        })
    }

    /// Run one call with the configured timeout, decoding into `result`.
    ///
    /// `result` is only written when the call succeeds.
    pub fn call<Req, Res>(&self, endpoint: &Endpoint, request: Option<&Req>, result: &mut Res) -> Result<()>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let http_request = self.build_request(endpoint, request)?;
        let response = self.send(&http_request, self.timeout)?;
        decode_response(&response, endpoint.shape, result)
    }

    /// Like `call`, but abort with `ApiError::Timeout` once `deadline` passes.
    ///
    /// An already expired deadline fails without touching the network.
    pub fn call_with_deadline<Req, Res>(
        &self,
        endpoint: &Endpoint,
        request: Option<&Req>,
        result: &mut Res,
        deadline: Instant,
    ) -> Result<()>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            tracing::debug!(method = %endpoint.method, path = %endpoint.path, "deadline already expired");
            return Err(ApiError::Timeout);
        }
        let http_request = self.build_request(endpoint, request)?;
        let response = self.send(&http_request, remaining.min(self.timeout))?;
        decode_response(&response, endpoint.shape, result)
    }

    /// Call and return a freshly decoded value.
    pub fn fetch<Req, Res>(&self, endpoint: &Endpoint, request: Option<&Req>) -> Result<Res>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned + Default,
    {
        let mut result = Res::default();
        self.call(endpoint, request, &mut result)?;
        Ok(result)
    }

    fn send(&self, request: &HttpRequest, timeout: Duration) -> Result<HttpResponse> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let started = Instant::now();
        let response = self.transport.execute(request, Some(timeout)).map_err(|err| {
            tracing::warn!(method = %request.method, url = %request.url, error = %err, "request failed");
            err
        })?;
        tracing::debug!(
            status = response.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "received response"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::RecordingTransport;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Thing {
        id: u64,
        name: String,
    }

    fn dispatcher(transport: &Arc<RecordingTransport>) -> Dispatcher {
        let config = ClientConfig::new("sk_test_123").with_base_url("https://api.example.test");
        Dispatcher::with_transport(config, transport.clone()).unwrap()
    }

    #[test]
    fn get_populates_target_from_data() {
        let transport = RecordingTransport::replying(200, r#"{"data":{"id":42,"name":"X"}}"#);
        let mut thing = Thing::default();
        dispatcher(&transport)
            .call(&Endpoint::get("/thing/42"), NO_BODY, &mut thing)
            .unwrap();
        assert_eq!(thing.id, 42);
        assert_eq!(thing.name, "X");

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, HttpMethod::Get);
        assert_eq!(sent.url, "https://api.example.test/thing/42");
        assert_eq!(sent.header("authorization"), Some("Bearer sk_test_123"));
        assert!(sent.header("content-type").is_none());
        assert!(sent.body.is_none());
    }

    #[test]
    fn api_error_leaves_target_unmodified() {
        let transport = RecordingTransport::replying(401, r#"{"status":false,"message":"Invalid key"}"#);
        let mut thing = Thing {
            id: 1,
            name: "before".to_string(),
        };
        let err = dispatcher(&transport)
            .call(&Endpoint::get("/thing/1"), NO_BODY, &mut thing)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), Some(401));
        assert!(matches!(err, ApiError::Api { ref message, .. } if message == "Invalid key"));
        assert_eq!(thing.name, "before");
    }

    #[test]
    fn post_sets_json_content_type() {
        let transport = RecordingTransport::replying(200, r#"{"data":{"id":1,"name":"n"}}"#);
        let body = json!({"name": "n"});
        let _: Thing = dispatcher(&transport)
            .fetch(&Endpoint::post("product"), Some(&body))
            .unwrap();
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.url, "https://api.example.test/product");
        assert_eq!(sent.header("content-type"), Some("application/json"));
        assert_eq!(sent.body.as_deref(), Some(r#"{"name":"n"}"#));
    }

    #[test]
    fn paginated_endpoint_carries_query() {
        let transport = RecordingTransport::replying(200, r#"{"meta":{"total":0},"data":[]}"#);
        let list: crate::pagination::List<Thing> = dispatcher(&transport)
            .fetch(&Endpoint::get("/product").paginate(Page::new(25, 3)), NO_BODY)
            .unwrap();
        assert!(list.is_empty());
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.url, "https://api.example.test/product?perPage=25&page=3");
    }

    #[test]
    fn endpoint_shape_selects_decode_source() {
        assert_eq!(Endpoint::get("/thing").shape, ResponseShape::Data);
        assert_eq!(Endpoint::get("/thing").paginate(Page::default()).shape, ResponseShape::Envelope);

        let transport = RecordingTransport::replying(200, r#"{"status":true,"message":"done"}"#);
        let d = dispatcher(&transport);
        let ack: crate::types::Acknowledgement = d
            .fetch(&Endpoint::post("/thing/1/ping").envelope(), NO_BODY)
            .unwrap();
        assert_eq!(ack.message, "done");

        let err = d.fetch::<(), Thing>(&Endpoint::post("/thing/1/ping"), NO_BODY).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let transport = RecordingTransport::replying(200, "{}");
        let config = ClientConfig::new("sk").with_base_url("http://localhost:8080/paystack/");
        let dispatcher = Dispatcher::with_transport(config, transport).unwrap();
        assert_eq!(
            dispatcher.resolve("/split/1").unwrap(),
            "http://localhost:8080/paystack/split/1"
        );
    }

    #[test]
    fn expired_deadline_skips_network() {
        let transport = RecordingTransport::replying(200, r#"{"data":{"id":1,"name":"n"}}"#);
        let mut thing = Thing::default();
        let err = dispatcher(&transport)
            .call_with_deadline(&Endpoint::get("/thing/1"), NO_BODY, &mut thing, Instant::now())
            .unwrap_err();
        assert!(matches!(err, ApiError::Timeout));
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn deadline_bounds_transport_timeout() {
        let transport = RecordingTransport::replying(200, r#"{"data":{"id":1,"name":"n"}}"#);
        let mut thing = Thing::default();
        dispatcher(&transport)
            .call_with_deadline(
                &Endpoint::get("/thing/1"),
                NO_BODY,
                &mut thing,
                Instant::now() + Duration::from_secs(2),
            )
            .unwrap();
        let timeout = transport.last_timeout().unwrap();
        assert!(timeout <= Duration::from_secs(2));
    }

    #[test]
    fn transport_errors_pass_through() {
        let transport = RecordingTransport::failing(|| ApiError::Transport("connection refused".into()));
        let mut thing = Thing::default();
        let err = dispatcher(&transport)
            .call(&Endpoint::get("/thing/1"), NO_BODY, &mut thing)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn debug_does_not_leak_credential() {
        let transport = RecordingTransport::replying(200, "{}");
        let printed = format!("{:?}", dispatcher(&transport));
        assert!(!printed.contains("sk_test_123"));
    }
}
