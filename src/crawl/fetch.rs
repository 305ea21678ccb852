// src/crawl/fetch.rs
// =============================================================================
// Fetching page content over HTTP.
//
// The crawl engine only needs one thing from the network: "give me the
// content at this address, or tell me why you couldn't". That contract is the
// Fetcher trait. HttpFetcher is the real implementation on top of reqwest;
// tests plug in their own fetchers that never touch the network.
//
// Every request carries a fixed set of browser-like headers (Accept,
// Accept-Language, User-Agent) plus an optional Referer. Requests can be sent
// through an HTTP proxy, optionally with Basic proxy credentials.
//
// Failures are values, not errors: a 404, a refused connection or a timeout
// all become FetchOutcome::Failure with a readable message. Nothing is retried.
//
// Rust concepts:
// - Traits: Fetcher is the seam between the engine and the transport
// - BoxFuture: lets a trait method be async and still be object-safe
// =============================================================================

use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Proxy};
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "ru-RU,ru;q=0.8,en-US;q=0.6,en;q=0.4";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Ubuntu Chromium/51.0.2704.79 Chrome/51.0.2704.79 Safari/537.36";
pub const DEFAULT_REFERRER: &str = "https://www.google.ru/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// The result of one fetch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Content(String),
    Failure(String),
}

pub trait Fetcher {
    // Retrieves the content at an already-normalized address
    fn fetch<'a>(&'a self, address: &'a str) -> BoxFuture<'a, FetchOutcome>;
}

// Transport settings for HttpFetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    /// Sent as the Referer header; empty = no Referer header
    pub referrer: String,
    /// e.g. "http://1.2.3.4:5555" (a "tcp://" scheme is accepted too)
    pub proxy: Option<String>,
    pub proxy_login: Option<String>,
    pub proxy_password: Option<String>,
    pub timeout: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            referrer: DEFAULT_REFERRER.to_string(),
            proxy: None,
            proxy_login: None,
            proxy_password: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FetchSettings {
    // Builds the headers sent with every request
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE),
        );
        headers.insert(header::USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));

        if !self.referrer.is_empty() {
            // A referrer with characters that can't go in a header is dropped
            match HeaderValue::from_str(&self.referrer) {
                Ok(value) => {
                    headers.insert(header::REFERER, value);
                }
                Err(_) => tracing::warn!(referrer = %self.referrer, "ignoring invalid referrer"),
            }
        }

        headers
    }

    // Builds the proxy configuration, if one is set
    fn proxy(&self) -> Result<Option<Proxy>, ConfigError> {
        let has_login = self.proxy_login.as_deref().is_some_and(|l| !l.is_empty());
        let Some(raw) = self.proxy.as_deref().filter(|p| !p.is_empty()) else {
            // Credentials only make sense together with a proxy address
            if has_login {
                return Err(ConfigError::ProxyLoginWithoutProxy);
            }
            return Ok(None);
        };

        let address = proxy_url(raw)?;
        let mut proxy = Proxy::all(address.as_str()).map_err(|e| ConfigError::InvalidProxy {
            proxy: raw.to_string(),
            reason: e.to_string(),
        })?;

        if let Some(login) = self.proxy_login.as_deref().filter(|l| !l.is_empty()) {
            let password = self.proxy_password.as_deref().unwrap_or("");
            proxy = proxy.basic_auth(login, password);
        }

        Ok(Some(proxy))
    }
}

// Turns a configured proxy address into an http:// URL
//
// "tcp://host:port" (a common stream-proxy spelling) is treated as plain HTTP.
fn proxy_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidProxy {
        proxy: raw.to_string(),
        reason,
    };

    let rewritten = match raw.strip_prefix("tcp://") {
        Some(rest) => format!("http://{}", rest),
        None if raw.contains("://") => raw.to_string(),
        None => format!("http://{}", raw),
    };

    let url = Url::parse(&rewritten).map_err(|e| invalid(e.to_string()))?;
    if !url.has_host() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}

// Fetches pages with reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(settings: &FetchSettings) -> Result<Self, ConfigError> {
        let mut builder = Client::builder()
            .timeout(settings.timeout)
            .default_headers(settings.headers());

        builder = match settings.proxy()? {
            Some(proxy) => builder.proxy(proxy),
            // Only the configured proxy is used, never HTTP_PROXY & co.
            None => builder.no_proxy(),
        };

        Ok(Self {
            client: builder.build()?,
        })
    }

    async fn get(&self, address: &str) -> FetchOutcome {
        let response = match self.client.get(address).send().await {
            Ok(response) => response,
            Err(e) => return FetchOutcome::Failure(e.to_string()),
        };

        let status = response.status();
        if !status.is_success() {
            return FetchOutcome::Failure(format!("HTTP {}", status));
        }

        match response.text().await {
            Ok(body) => FetchOutcome::Content(body),
            Err(e) => FetchOutcome::Failure(e.to_string()),
        }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch<'a>(&'a self, address: &'a str) -> BoxFuture<'a, FetchOutcome> {
        self.get(address).boxed()
    }
}
