//! Blocking variant of the current-API client.
//!
//! Same surface and status handling as [`crate::HackCheck`], calling
//! convention aside. Not usable from inside an async runtime; use the
//! async client there.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::client::{interpret_status, parse_base_url, REQUEST_TIMEOUT, USER_AGENT};
use crate::endpoints;
use crate::error::{Error, Result};
use crate::models::{
    AssetMonitor, CheckOptions, CheckResponse, DomainMonitor, GetMonitorsResponse, MonitorKind,
    SearchOptions, SearchResponse, Source, UpdateAssetMonitorParams, UpdateDomainMonitorParams,
};

/// Synchronous client for the current HackCheck API.
#[derive(Debug, Clone)]
pub struct HackCheck {
    api_key: String,
    base_url: Url,
    http: reqwest::blocking::Client,
}

impl HackCheck {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::Config("api key must not be empty".into()));
        }
        let http = reqwest::blocking::Client::builder()
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
    pub fn search(&self, options: &SearchOptions) -> Result<SearchResponse> {
        let url = endpoints::search(&self.base_url, &self.api_key, options);
        self.request(Method::GET, url)
    }

    /// Existence-only search: does any record match?
    pub fn check(&self, options: &CheckOptions) -> Result<bool> {
        let url = endpoints::check(&self.base_url, &self.api_key, options);
        let response: CheckResponse = self.request(Method::GET, url)?;
        Ok(response.found)
    }

    pub fn get_monitors(&self) -> Result<GetMonitorsResponse> {
        let url = endpoints::monitor_list(&self.base_url, &self.api_key);
        self.request(Method::GET, url)
    }

    pub fn get_asset_monitor(&self, monitor_id: &str) -> Result<AssetMonitor> {
        let url = endpoints::monitor(&self.base_url, &self.api_key, monitor_id);
        self.request(Method::GET, url)
    }

    pub fn get_domain_monitor(&self, monitor_id: &str) -> Result<DomainMonitor> {
        let url = endpoints::monitor(&self.base_url, &self.api_key, monitor_id);
        self.request(Method::GET, url)
    }

    pub fn get_asset_monitor_sources(&self, monitor_id: &str) -> Result<Vec<Source>> {
        let url =
            endpoints::monitor_sources(&self.base_url, &self.api_key, MonitorKind::Asset, monitor_id);
        self.request(Method::GET, url)
    }

    pub fn get_domain_monitor_sources(&self, monitor_id: &str) -> Result<Vec<Source>> {
        let url =
            endpoints::monitor_sources(&self.base_url, &self.api_key, MonitorKind::Domain, monitor_id);
        self.request(Method::GET, url)
    }

    pub fn toggle_pause_asset_monitor(&self, monitor_id: &str) -> Result<AssetMonitor> {
        let url =
            endpoints::monitor_pause(&self.base_url, &self.api_key, MonitorKind::Asset, monitor_id);
        self.request(Method::POST, url)
    }

    pub fn toggle_pause_domain_monitor(&self, monitor_id: &str) -> Result<DomainMonitor> {
        let url =
            endpoints::monitor_pause(&self.base_url, &self.api_key, MonitorKind::Domain, monitor_id);
        self.request(Method::POST, url)
    }

    pub fn update_asset_monitor(
        &self,
        monitor_id: &str,
        params: &UpdateAssetMonitorParams,
    ) -> Result<AssetMonitor> {
        let url =
            endpoints::monitor_update(&self.base_url, &self.api_key, MonitorKind::Asset, monitor_id);
        self.request_with_body(Method::PUT, url, params)
    }

    pub fn update_domain_monitor(
        &self,
        monitor_id: &str,
        params: &UpdateDomainMonitorParams,
    ) -> Result<DomainMonitor> {
        let url =
            endpoints::monitor_update(&self.base_url, &self.api_key, MonitorKind::Domain, monitor_id);
        self.request_with_body(Method::PUT, url, params)
    }

    fn request<T: DeserializeOwned>(&self, method: Method, url: Url) -> Result<T> {
        tracing::debug!(%method, %url, "hackcheck api request");
        let response = self.http.request(method, url).send()?;
        decode_response(response)
    }

    fn request_with_body<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<T> {
        tracing::debug!(%method, %url, "hackcheck api request");
        let response = self.http.request(method, url).json(body).send()?;
        decode_response(response)
    }
}

fn decode_response<T: DeserializeOwned>(response: reqwest::blocking::Response) -> Result<T> {
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.text()?;
    tracing::debug!(status = %status, "hackcheck api response");
    interpret_status(status, &headers, &body)?;
    Ok(serde_json::from_str(&body)?)
}
