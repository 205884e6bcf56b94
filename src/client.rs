//! HTTP client and request dispatcher for the a11y-checker API.
//!
//! `A11yClient` wraps a `reqwest::Client` together with the immutable
//! credentials (optional API key, base URL). Every operation in
//! [`audits`](crate::audits) and [`history`](crate::history) funnels through
//! [`A11yClient::dispatch`], which:
//!
//! 1. Adds the API key as `key` (when configured) and the cache-bust token
//!    as `t`.
//! 2. Encodes the parameters either as a query string or as a form body.
//! 3. Sends the request and normalizes the outcome into an [`ApiResponse`].
//!
//! Failure handling is split on whether the service answered:
//! - 4xx/5xx responses are returned as `Ok(ApiResponse)` with the status and
//!   the best-effort-parsed body. Callers inspect `status`.
//! - Failures without any response (DNS, refused connection, timeout) are
//!   returned as `Err(A11yError::Transport)`.
//!
//! No retries are attempted; retry policy belongs to the caller.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use url::Url;

pub use reqwest::Method;

use crate::error::{A11yError, Result};
use crate::params::Params;
use crate::response::{self, ApiResponse, ResponseBody};

/// Public service origin used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://a11y-checker.wcag.dock.codes";

/// Environment variable read by [`ClientBuilder::from_env`] for the API key.
pub const API_KEY_ENV: &str = "A11Y_CHECKER_API_KEY";

/// Environment variable read by [`ClientBuilder::from_env`] for the base URL.
pub const BASE_URL_ENV: &str = "A11Y_CHECKER_BASE_URL";

/// Connect timeout. Covers TCP + TLS handshake only.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Overall request timeout. Synchronous scans render and audit the target
/// page before answering, which can take minutes.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Width of the cache-bust window in seconds.
const CACHE_BUST_WINDOW_SECS: u64 = 10;

/// Cache-bust token for the current time.
pub fn cache_bust_token() -> u64 {
    cache_bust_token_at(SystemTime::now())
}

/// Cache-bust token for `now`: Unix seconds divided by ten, rounded down.
///
/// Identical requests inside the same 10-second window carry the same token
/// and stay cacheable by intermediaries; the token rotates afterwards. It is
/// not a security token.
pub fn cache_bust_token_at(now: SystemTime) -> u64 {
    now.duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() / CACHE_BUST_WINDOW_SECS)
        .unwrap_or(0)
}

/// Authenticated client for the a11y-checker REST API.
///
/// Cheap to clone: the inner `reqwest::Client` is reference counted and the
/// credentials never change after construction, so one instance can serve
/// concurrent calls.
#[derive(Clone)]
pub struct A11yClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl fmt::Debug for A11yClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("A11yClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl A11yClient {
    /// Creates a client with the default timeouts.
    ///
    /// Empty strings are treated like `None`: no key is sent, and the public
    /// service origin is used. A key of `"0"` is likewise never sent.
    pub fn new(api_key: Option<&str>, base_url: Option<&str>) -> Result<Self> {
        let mut builder = ClientBuilder::new();
        if let Some(key) = api_key {
            builder = builder.api_key(key);
        }
        if let Some(url) = base_url {
            builder = builder.base_url(url);
        }
        builder.build()
    }

    /// Starts a [`ClientBuilder`].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Normalized base URL, always ending with exactly one `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns `true` if requests carry an API key.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Sends one request to `api/{endpoint}` and normalizes the response.
    ///
    /// `endpoint` may start with `/`; leading slashes are stripped. When
    /// `send_body` is `true` the filtered parameters travel as an
    /// `application/x-www-form-urlencoded` body and the URL has no query
    /// string; otherwise they travel as a query string and no body is sent.
    ///
    /// # Errors
    ///
    /// - `A11yError::Transport` — no HTTP response was received, or the
    ///   response body could not be read.
    /// - `A11yError::Encode` — the parameters could not be encoded.
    ///
    /// 4xx/5xx responses are **not** errors; they come back as `Ok` with the
    /// status and body preserved.
    pub async fn dispatch(
        &self,
        endpoint: &str,
        mut params: Params,
        method: Method,
        send_body: bool,
    ) -> Result<ApiResponse> {
        if let Some(key) = &self.api_key {
            params.insert("key", key.as_str());
        }
        params.insert("t", cache_bust_token());

        let endpoint = endpoint.trim_start_matches('/');
        let url = format!("{}api/{}", self.base_url, endpoint);

        let request = if send_body {
            tracing::debug!(%method, endpoint, "sending form request");
            self.http
                .request(method.clone(), &url)
                .form(&params.wire_pairs())
        } else {
            tracing::debug!(%method, endpoint, "sending query request");
            let query = params.to_query_string()?;
            self.http.request(method.clone(), format!("{url}?{query}"))
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    %method,
                    endpoint,
                    error = %e,
                    "request produced no response"
                );
                return Err(e.into());
            }
        };

        let status = response.status();
        let raw = response::decode_text(&response.bytes().await?);

        let body = if status.is_client_error() || status.is_server_error() {
            tracing::debug!(
                %method,
                endpoint,
                status = status.as_u16(),
                "service returned an error status"
            );
            ResponseBody::from_error(raw)
        } else {
            tracing::debug!(
                %method,
                endpoint,
                status = status.as_u16(),
                "request completed"
            );
            ResponseBody::from_success(&raw)
        };

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }

    /// `dispatch` with `GET` and query-string encoding.
    pub(crate) async fn get(&self, endpoint: &str, params: Params) -> Result<ApiResponse> {
        self.dispatch(endpoint, params, Method::GET, false).await
    }

    /// `dispatch` with `DELETE` and query-string encoding.
    pub(crate) async fn delete(&self, endpoint: &str, params: Params) -> Result<ApiResponse> {
        self.dispatch(endpoint, params, Method::DELETE, false).await
    }

    /// `dispatch` with `POST` and a form body.
    pub(crate) async fn post_form(&self, endpoint: &str, params: Params) -> Result<ApiResponse> {
        self.dispatch(endpoint, params, Method::POST, true).await
    }
}

/// Builder for [`A11yClient`].
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Creates a builder with the default origin and timeouts.
    pub fn new() -> Self {
        ClientBuilder {
            api_key: None,
            base_url: None,
            timeout: REQUEST_TIMEOUT,
            connect_timeout: CONNECT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Seeds a builder from `A11Y_CHECKER_API_KEY` and `A11Y_CHECKER_BASE_URL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Seeds a builder from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = ClientBuilder::new();
        builder.api_key = lookup(API_KEY_ENV);
        builder.base_url = lookup(BASE_URL_ENV);
        builder
    }

    /// Sets the API key sent as the `key` parameter.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the service origin.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the overall request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Overrides the `User-Agent` header.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `A11yError::InvalidBaseUrl` — the base URL does not parse.
    /// - `A11yError::Config` — the base URL cannot carry paths, or the user
    ///   agent is not a valid header value.
    /// - `A11yError::Transport` — the underlying HTTP client failed to
    ///   initialize (e.g. TLS backend).
    pub fn build(self) -> Result<A11yClient> {
        let base_url = normalize_base_url(self.base_url.as_deref())?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("a11y-checker/{}", env!("CARGO_PKG_VERSION")));
        let user_agent = HeaderValue::from_str(&user_agent).map_err(|_| A11yError::Config {
            message: format!("user agent {user_agent:?} is not a valid header value"),
        })?;

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .connect_timeout(self.connect_timeout)
            .timeout(self.timeout)
            .build()?;

        Ok(A11yClient {
            http,
            base_url,
            api_key: self.api_key.filter(|key| !key.is_empty() && key != "0"),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Trims trailing slashes and appends exactly one. Empty means default.
fn normalize_base_url(base_url: Option<&str>) -> Result<String> {
    let raw = base_url
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_BASE_URL);
    let parsed = Url::parse(raw)?;
    if parsed.cannot_be_a_base() {
        return Err(A11yError::Config {
            message: format!("base URL {raw:?} cannot carry an API path"),
        });
    }
    Ok(format!("{}/", raw.trim_end_matches('/')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_base_url_is_public_service() {
        let client = A11yClient::new(None, None).unwrap();
        assert_eq!(client.base_url(), "https://a11y-checker.wcag.dock.codes/");
        assert!(!client.has_api_key());
    }

    #[test]
    fn base_url_trailing_slashes_are_normalized() {
        let client = A11yClient::new(None, Some("http://localhost:8080///")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/");

        let client = A11yClient::new(None, Some("http://localhost:8080/prefix")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/prefix/");
    }

    #[test]
    fn empty_settings_fall_back_to_defaults() {
        let client = A11yClient::new(Some(""), Some("")).unwrap();
        assert_eq!(client.base_url(), "https://a11y-checker.wcag.dock.codes/");
        assert!(!client.has_api_key(), "an empty key must not be sent");
    }

    #[test]
    fn zero_api_key_counts_as_absent() {
        let client = A11yClient::builder().api_key("0").build().unwrap();
        assert!(!client.has_api_key());

        let client = A11yClient::builder().api_key("00").build().unwrap();
        assert!(client.has_api_key());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = A11yClient::new(None, Some("not a url")).unwrap_err();
        assert!(matches!(err, A11yError::InvalidBaseUrl(_)));

        let err = A11yClient::new(None, Some("mailto:someone@example.com")).unwrap_err();
        assert!(matches!(err, A11yError::Config { .. }));
    }

    #[test]
    fn invalid_user_agent_is_rejected() {
        let err = A11yClient::builder()
            .user_agent("bad\nagent")
            .build()
            .unwrap_err();
        assert!(matches!(err, A11yError::Config { .. }));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let client = A11yClient::new(Some("super-secret"), None).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("super-secret"), "key leaked: {debug}");
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn builder_reads_environment_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (API_KEY_ENV, "env-key"),
            (BASE_URL_ENV, "http://127.0.0.1:9000"),
        ]);
        let client = ClientBuilder::from_lookup(|name| vars.get(name).map(|v| v.to_string()))
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9000/");
        assert!(client.has_api_key());
    }

    #[test]
    fn builder_lookup_without_variables_uses_defaults() {
        let client = ClientBuilder::from_lookup(|_| None).build().unwrap();
        assert_eq!(client.base_url(), "https://a11y-checker.wcag.dock.codes/");
        assert!(!client.has_api_key());
    }

    #[test]
    fn cache_bust_token_is_unix_time_over_ten() {
        let at = UNIX_EPOCH + Duration::from_secs(1_700_000_007);
        assert_eq!(cache_bust_token_at(at), 170_000_000);
    }

    #[test]
    fn cache_bust_token_is_stable_within_window() {
        let start = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let end = UNIX_EPOCH + Duration::from_secs(1_700_000_009);
        let next = UNIX_EPOCH + Duration::from_secs(1_700_000_010);
        assert_eq!(cache_bust_token_at(start), cache_bust_token_at(end));
        assert_eq!(cache_bust_token_at(next), cache_bust_token_at(start) + 1);
    }

    #[test]
    fn client_is_send_sync_and_clone() {
        fn assert_traits<T: Send + Sync + Clone>() {}
        assert_traits::<A11yClient>();
    }
}
