use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::endpoints;
use crate::error::{Error, Result};
use crate::models::{
    AssetMonitor, CheckOptions, CheckResponse, DomainMonitor, ErrorResponse, GetMonitorsResponse,
    MonitorKind, SearchOptions, SearchResponse, Source, UpdateAssetMonitorParams,
    UpdateDomainMonitorParams,
};

pub(crate) const USER_AGENT: &str = concat!("hackcheck-rs/", env!("CARGO_PKG_VERSION"));
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Asynchronous client for the current HackCheck API.
///
/// Owns one `reqwest::Client`; the connection pool is released when the
/// value is dropped. Every method performs exactly one HTTP round trip and
/// either returns the decoded response type or one [`Error`]; callers drive
/// pagination themselves via [`SearchOptions`] and the returned cursors.
#[derive(Debug, Clone)]
pub struct HackCheck {
    api_key: String,
    base_url: Url,
    http: reqwest::Client,
}

impl HackCheck {
    /// Create a client for the production API host.
    ///
    /// Fails if `api_key` is empty or the underlying HTTP client cannot be
    /// constructed.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::Config("api key must not be empty".into()));
        }
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            api_key,
            base_url: parse_base_url(endpoints::BASE_URL)?,
            http,
        })
    }

    /// Point the client at a different host, e.g. a test server.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    /// Search breach databases for records matching `options`.
    pub async fn search(&self, options: &SearchOptions) -> Result<SearchResponse> {
        let url = endpoints::search(&self.base_url, &self.api_key, options);
        self.request(Method::GET, url).await
    }

    /// Existence-only search: does any record match?
    pub async fn check(&self, options: &CheckOptions) -> Result<bool> {
        let url = endpoints::check(&self.base_url, &self.api_key, options);
        let response: CheckResponse = self.request(Method::GET, url).await?;
        Ok(response.found)
    }

    /// List every monitor on the account, asset and domain alike.
    pub async fn get_monitors(&self) -> Result<GetMonitorsResponse> {
        let url = endpoints::monitor_list(&self.base_url, &self.api_key);
        self.request(Method::GET, url).await
    }

    pub async fn get_asset_monitor(&self, monitor_id: &str) -> Result<AssetMonitor> {
        let url = endpoints::monitor(&self.base_url, &self.api_key, monitor_id);
        self.request(Method::GET, url).await
    }

    pub async fn get_domain_monitor(&self, monitor_id: &str) -> Result<DomainMonitor> {
        let url = endpoints::monitor(&self.base_url, &self.api_key, monitor_id);
        self.request(Method::GET, url).await
    }

    /// Breach sources that triggered an asset monitor.
    pub async fn get_asset_monitor_sources(&self, monitor_id: &str) -> Result<Vec<Source>> {
        let url =
            endpoints::monitor_sources(&self.base_url, &self.api_key, MonitorKind::Asset, monitor_id);
        self.request(Method::GET, url).await
    }

    /// Breach sources that triggered a domain monitor.
    pub async fn get_domain_monitor_sources(&self, monitor_id: &str) -> Result<Vec<Source>> {
        let url =
            endpoints::monitor_sources(&self.base_url, &self.api_key, MonitorKind::Domain, monitor_id);
        self.request(Method::GET, url).await
    }

    /// Flip an asset monitor between running and paused; returns the updated monitor.
    pub async fn toggle_pause_asset_monitor(&self, monitor_id: &str) -> Result<AssetMonitor> {
        let url =
            endpoints::monitor_pause(&self.base_url, &self.api_key, MonitorKind::Asset, monitor_id);
        self.request(Method::POST, url).await
    }

    /// Flip a domain monitor between running and paused; returns the updated monitor.
    pub async fn toggle_pause_domain_monitor(&self, monitor_id: &str) -> Result<DomainMonitor> {
        let url =
            endpoints::monitor_pause(&self.base_url, &self.api_key, MonitorKind::Domain, monitor_id);
        self.request(Method::POST, url).await
    }

    pub async fn update_asset_monitor(
        &self,
        monitor_id: &str,
        params: &UpdateAssetMonitorParams,
    ) -> Result<AssetMonitor> {
        let url =
            endpoints::monitor_update(&self.base_url, &self.api_key, MonitorKind::Asset, monitor_id);
        self.request_with_body(Method::PUT, url, params).await
    }

    pub async fn update_domain_monitor(
        &self,
        monitor_id: &str,
        params: &UpdateDomainMonitorParams,
    ) -> Result<DomainMonitor> {
        let url =
            endpoints::monitor_update(&self.base_url, &self.api_key, MonitorKind::Domain, monitor_id);
        self.request_with_body(Method::PUT, url, params).await
    }

    async fn request<T: DeserializeOwned>(&self, method: Method, url: Url) -> Result<T> {
        tracing::debug!(%method, %url, "hackcheck api request");
        let response = self.http.request(method, url).send().await?;
        decode_response(response).await
    }

    async fn request_with_body<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<T> {
        tracing::debug!(%method, %url, "hackcheck api request");
        let response = self.http.request(method, url).json(body).send().await?;
        decode_response(response).await
    }
}

async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.text().await?;
    tracing::debug!(status = %status, "hackcheck api response");
    interpret_status(status, &headers, &body)?;
    Ok(serde_json::from_str(&body)?)
}

/// Map a response status to the error taxonomy; `Ok(())` means the body
/// should be decoded as the operation's response type.
pub(crate) fn interpret_status(status: StatusCode, headers: &HeaderMap, body: &str) -> Result<()> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::UNAUTHORIZED => match serde_json::from_str::<ErrorResponse>(body) {
            Ok(e) if e.error == "Invalid API key." => Err(Error::InvalidApiKey),
            Ok(e) if e.error == "Unauthorized IP address." => Err(Error::UnauthorizedIpAddress),
            _ => Err(Error::Server),
        },
        StatusCode::TOO_MANY_REQUESTS => Err(Error::RateLimited {
            limit: header_count(headers, "X-HackCheck-Limit"),
            remaining: header_count(headers, "X-HackCheck-Remaining"),
        }),
        StatusCode::BAD_REQUEST => {
            let message = serde_json::from_str::<ErrorResponse>(body)
                .map(|e| e.error)
                .unwrap_or_default();
            Err(Error::BadRequest(message))
        }
        StatusCode::NOT_FOUND => Err(Error::EndpointNotFound),
        _ => Err(Error::Server),
    }
}

/// Read an integer response header, 0 when absent or malformed.
pub(crate) fn header_count(headers: &HeaderMap, name: &str) -> u32 {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}

pub(crate) fn parse_base_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| Error::Config(format!("invalid base url {raw:?}: {e}")))
}
