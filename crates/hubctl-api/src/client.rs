// JupyterHub API HTTP client
//
// Wraps `reqwest::Client` with config-driven URL construction, the
// Authorization header, and status classification. Endpoint groups
// (users, groups, proxy, ...) are inherent methods under `endpoints/`.

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::config::{ClientConfig, ConfigError};
use crate::error::Error;
use crate::transport::TransportConfig;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// ── Request descriptor ───────────────────────────────────────────────

/// One outbound API call: method, relative path, content type and body.
///
/// The path is relative to the configured API URL and may carry a query
/// string. Built per call and consumed by [`HubClient::execute`].
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    content_type: String,
    body: Option<Vec<u8>>,
    redact_path: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            content_type: JSON_CONTENT_TYPE.to_owned(),
            body: None,
            redact_path: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `body` as the JSON payload.
    pub fn with_json<B: Serialize + ?Sized>(self, body: &B) -> Result<Self, Error> {
        let bytes = serde_json::to_vec(body).map_err(Error::Encode)?;
        Ok(self.with_content_type(JSON_CONTENT_TYPE).with_body(bytes))
    }

    /// Encode `pairs` as an `application/x-www-form-urlencoded` payload.
    pub fn with_form<'a, I>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        self.with_content_type(FORM_CONTENT_TYPE).with_body(encoded)
    }

    /// Keep the path out of logs (it embeds a secret).
    pub fn redacted(mut self) -> Self {
        self.redact_path = true;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    fn log_path(&self) -> &str {
        if self.redact_path { "<redacted>" } else { &self.path }
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the JupyterHub REST API.
///
/// Holds a resolved [`ClientConfig`] and a `reqwest::Client`. Every endpoint
/// method funnels through [`execute`](Self::execute): one authenticated
/// round trip, 2xx returns the raw body, anything else is an error.
#[derive(Debug, Clone)]
pub struct HubClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HubClient {
    /// Build with the default transport (system TLS roots, no timeout).
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Self::with_transport(config, &TransportConfig::default())
    }

    pub fn with_transport(config: ClientConfig, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, config })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(config: ClientConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ── Executor ─────────────────────────────────────────────────────

    /// Perform one authenticated round trip.
    ///
    /// Returns the response body verbatim on 2xx. Any other status is
    /// [`Error::UnexpectedStatus`]; the response is dropped unread, which
    /// releases the connection.
    pub async fn execute(&self, request: ApiRequest) -> Result<Bytes, Error> {
        let url = self.config.endpoint_url(&request.path)?;
        debug!(
            method = %request.method,
            path = request.log_path(),
            auth = %self.config.credentials().scheme(),
            "sending request"
        );

        let mut builder = self
            .http
            .request(request.method, url)
            .header(CONTENT_TYPE, request.content_type);
        builder = self.config.credentials().authorize(builder);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        trace!(status = status.as_u16(), "response received");

        if !status.is_success() {
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        Ok(resp.bytes().await?)
    }

    /// [`execute`](Self::execute), aborted when `cancel` fires first.
    ///
    /// Cancellation drops the in-flight request (and its connection) and
    /// returns [`Error::Cancelled`].
    pub async fn execute_cancellable(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<Bytes, Error> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("request cancelled by caller");
                Err(Error::Cancelled)
            }
            result = self.execute(request) => result,
        }
    }

    // ── Typed helpers for endpoint modules ───────────────────────────

    /// Execute and decode the JSON response.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, Error> {
        let body = self.execute(request).await?;
        decode(&body)
    }

    /// Execute, ignoring any response body.
    pub(crate) async fn fire(&self, request: ApiRequest) -> Result<(), Error> {
        self.execute(request).await.map(drop)
    }
}

// ── Path & body helpers ──────────────────────────────────────────────

/// Decode a JSON response body into `T`.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(|e| {
        let text = String::from_utf8_lossy(body).into_owned();
        let preview: String = text.chars().take(200).collect();
        Error::Decode {
            message: format!("{e} (body preview: {preview:?})"),
            body: text,
        }
    })
}

/// Percent-encode a caller-supplied value as a single path segment.
///
/// Empty, `.` and `..` are rejected: URL parsing would collapse them (even
/// percent-encoded) and retarget the request at a parent resource.
pub(crate) fn segment(raw: &str) -> Result<String, Error> {
    if matches!(raw, "" | "." | "..") {
        return Err(ConfigError::Validation {
            field: "path segment".into(),
            reason: format!("{raw:?} is not a usable name"),
        }
        .into());
    }
    // form encoding turns spaces into `+`; a literal `+` is already `%2B`.
    Ok(url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20"))
}

/// Append a query string to `path`, or return it untouched when empty.
pub(crate) fn with_query(path: &str, pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return path.to_owned();
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())))
        .finish();
    format!("{path}?{query}")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn request_defaults_to_json_without_body() {
        let req = ApiRequest::get("info");
        assert_eq!(*req.method(), Method::GET);
        assert_eq!(req.path(), "info");
        assert_eq!(req.content_type(), JSON_CONTENT_TYPE);
        assert!(req.body().is_none());
    }

    #[test]
    fn form_body_is_url_encoded() {
        let req = ApiRequest::post("oauth2/token").with_form([("code", "a b&c"), ("grant_type", "x")]);
        assert_eq!(req.content_type(), FORM_CONTENT_TYPE);
        assert_eq!(req.body().unwrap(), b"code=a+b%26c&grant_type=x");
    }

    #[test]
    fn redacted_request_hides_path_in_logs() {
        let req = ApiRequest::get("authorizations/token/abc").redacted();
        assert_eq!(req.log_path(), "<redacted>");
        assert_eq!(req.path(), "authorizations/token/abc");
    }

    #[test]
    fn segment_escapes_reserved_characters() {
        assert_eq!(segment("alice").unwrap(), "alice");
        assert_eq!(segment("a b/c").unwrap(), "a%20b%2Fc");
        assert_eq!(segment("x+y@z").unwrap(), "x%2By%40z");
        assert_eq!(segment("...").unwrap(), "...");
    }

    #[test]
    fn segment_rejects_dot_and_empty_names() {
        for raw in ["", ".", ".."] {
            match segment(raw) {
                Err(Error::Config(ConfigError::Validation { field, .. })) => {
                    assert_eq!(field, "path segment");
                }
                other => panic!("expected Validation for {raw:?}, got: {other:?}"),
            }
        }
    }

    #[test]
    fn query_is_appended_only_when_present() {
        assert_eq!(with_query("groups", &[]), "groups");
        assert_eq!(
            with_query("users", &[("state", "active".into()), ("limit", "10".into())]),
            "users?state=active&limit=10"
        );
    }

    #[test]
    fn decode_error_keeps_body() {
        let err = decode::<crate::models::VersionResponse>(b"<html>oops</html>").unwrap_err();
        match err {
            Error::Decode { message, body } => {
                assert_eq!(body, "<html>oops</html>");
                assert!(message.contains("body preview"));
            }
            other => panic!("expected Decode, got: {other:?}"),
        }
    }
}
