//! Clients for the legacy v3 lookup API.
//!
//! This generation predates the search/monitor endpoints: one GET per lookup
//! against `/v3/lookup/{key}/{field}/{query}`, every response wrapped in a
//! `success`/`message` envelope, and informational rate numbers carried in
//! the `hc-allowed-rate` / `hc-current-rate` headers. A 401 here cannot
//! distinguish a bad key from an unlinked IP address, so it always maps to
//! [`Error::InvalidApiKey`].

pub mod models;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use url::Url;

use crate::client::{header_count, parse_base_url, REQUEST_TIMEOUT, USER_AGENT};
use crate::endpoints::push_segments;
use crate::error::{Error, Result};

pub use models::{LookupField, LookupResult, RateSnapshot, Source};

use models::LookupResponse;

/// Production host for the legacy generation.
pub const BASE_URL: &str = "https://api.hackcheck.io/v3/lookup/";

fn lookup_url(base: &Url, api_key: &str, field: LookupField, query: &str) -> Url {
    let mut url = base.clone();
    push_segments(&mut url, &[api_key, field.as_str(), query]);
    url
}

/// Map a v3 response to results or an error.
fn parse_lookup(status: StatusCode, body: &str) -> Result<Vec<LookupResult>> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(Error::InvalidApiKey);
    }
    let envelope: LookupResponse = serde_json::from_str(body)?;
    if !envelope.success {
        return Err(Error::Api(envelope.message.unwrap_or_default()));
    }
    Ok(envelope.results)
}

fn rate_snapshot_from_headers(headers: &HeaderMap) -> RateSnapshot {
    RateSnapshot {
        allowed: header_count(headers, "hc-allowed-rate"),
        current: header_count(headers, "hc-current-rate"),
    }
}

/// Asynchronous client for the v3 lookup API.
///
/// Methods take `&mut self` because each call refreshes the rate snapshot
/// readable via [`HackCheck::rate_snapshot`].
#[derive(Debug)]
pub struct HackCheck {
    api_key: String,
    base_url: Url,
    http: reqwest::Client,
    rate: RateSnapshot,
}

impl HackCheck {
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
            base_url: parse_base_url(BASE_URL)?,
            http,
            rate: RateSnapshot::default(),
        })
    }

    /// Point the client at a different host, e.g. a test server.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    /// Rate numbers reported by the service on the most recent call.
    pub fn rate_snapshot(&self) -> RateSnapshot {
        self.rate
    }

    /// Look up breached records matching `query` on the given field.
    pub async fn lookup(&mut self, field: LookupField, query: &str) -> Result<Vec<LookupResult>> {
        let url = lookup_url(&self.base_url, &self.api_key, field, query);
        tracing::debug!(%url, "v3 lookup request");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        self.rate = rate_snapshot_from_headers(response.headers());
        let body = response.text().await?;
        parse_lookup(status, &body)
    }

    pub async fn lookup_email(&mut self, email: &str) -> Result<Vec<LookupResult>> {
        self.lookup(LookupField::Email, email).await
    }

    pub async fn lookup_username(&mut self, username: &str) -> Result<Vec<LookupResult>> {
        self.lookup(LookupField::Username, username).await
    }

    pub async fn lookup_name(&mut self, name: &str) -> Result<Vec<LookupResult>> {
        self.lookup(LookupField::Name, name).await
    }

    pub async fn lookup_ip(&mut self, ip: &str) -> Result<Vec<LookupResult>> {
        self.lookup(LookupField::Ip, ip).await
    }

    pub async fn lookup_password(&mut self, password: &str) -> Result<Vec<LookupResult>> {
        self.lookup(LookupField::Password, password).await
    }

    pub async fn lookup_phone(&mut self, phone: &str) -> Result<Vec<LookupResult>> {
        self.lookup(LookupField::Phone, phone).await
    }

    pub async fn lookup_domain(&mut self, domain: &str) -> Result<Vec<LookupResult>> {
        self.lookup(LookupField::Domain, domain).await
    }
}

pub mod blocking {
    //! Blocking variant of the v3 lookup client.

    use super::*;

    /// Synchronous client for the v3 lookup API.
    #[derive(Debug)]
    pub struct HackCheck {
        api_key: String,
        base_url: Url,
        http: reqwest::blocking::Client,
        rate: RateSnapshot,
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
                base_url: parse_base_url(BASE_URL)?,
                http,
                rate: RateSnapshot::default(),
            })
        }

        /// Point the client at a different host, e.g. a test server.
        pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
            self.base_url = parse_base_url(base_url)?;
            Ok(self)
        }

        /// Rate numbers reported by the service on the most recent call.
        pub fn rate_snapshot(&self) -> RateSnapshot {
            self.rate
        }

        /// Look up breached records matching `query` on the given field.
        pub fn lookup(&mut self, field: LookupField, query: &str) -> Result<Vec<LookupResult>> {
            let url = lookup_url(&self.base_url, &self.api_key, field, query);
            tracing::debug!(%url, "v3 lookup request");
            let response = self.http.get(url).send()?;
            let status = response.status();
            self.rate = rate_snapshot_from_headers(response.headers());
            let body = response.text()?;
            parse_lookup(status, &body)
        }

        pub fn lookup_email(&mut self, email: &str) -> Result<Vec<LookupResult>> {
            self.lookup(LookupField::Email, email)
        }

        pub fn lookup_username(&mut self, username: &str) -> Result<Vec<LookupResult>> {
            self.lookup(LookupField::Username, username)
        }

        pub fn lookup_name(&mut self, name: &str) -> Result<Vec<LookupResult>> {
            self.lookup(LookupField::Name, name)
        }

        pub fn lookup_ip(&mut self, ip: &str) -> Result<Vec<LookupResult>> {
            self.lookup(LookupField::Ip, ip)
        }

        pub fn lookup_password(&mut self, password: &str) -> Result<Vec<LookupResult>> {
            self.lookup(LookupField::Password, password)
        }

        pub fn lookup_phone(&mut self, phone: &str) -> Result<Vec<LookupResult>> {
            self.lookup(LookupField::Phone, phone)
        }

        pub fn lookup_domain(&mut self, domain: &str) -> Result<Vec<LookupResult>> {
            self.lookup(LookupField::Domain, domain)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn lookup_url_shape() {
        let base = Url::parse(BASE_URL).unwrap();
        let url = lookup_url(&base, "key123", LookupField::Email, "alice@example.com");
        assert_eq!(
            url.as_str(),
            "https://api.hackcheck.io/v3/lookup/key123/email/alice@example.com"
        );
    }

    #[test]
    fn unauthorized_is_always_invalid_api_key() {
        let err = parse_lookup(StatusCode::UNAUTHORIZED, "whatever").unwrap_err();
        assert!(matches!(err, Error::InvalidApiKey));
    }

    #[test]
    fn success_false_carries_server_message() {
        let body = r#"{"success": false, "message": "no results found"}"#;
        let err = parse_lookup(StatusCode::OK, body).unwrap_err();
        match err {
            Error::Api(message) => assert_eq!(message, "no results found"),
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn success_true_decodes_results() {
        let body = r#"{
            "success": true,
            "results": [
                {"email": "a@b.c", "source": {"name": "breachdb", "date": "2019-05-01"}},
                {"username": "ab"}
            ]
        }"#;
        let results = parse_lookup(StatusCode::OK, body).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].email.as_deref(), Some("a@b.c"));
        assert_eq!(
            results[0].source.as_ref().unwrap().name.as_deref(),
            Some("breachdb")
        );
        assert!(results[0].source.as_ref().unwrap().description.is_none());
        assert!(results[1].email.is_none());
        assert_eq!(results[1].username.as_deref(), Some("ab"));
    }

    #[test]
    fn rate_headers_parse_with_zero_default() {
        let mut headers = HeaderMap::new();
        headers.insert("hc-allowed-rate", HeaderValue::from_static("120"));
        let snapshot = rate_snapshot_from_headers(&headers);
        assert_eq!(
            snapshot,
            RateSnapshot {
                allowed: 120,
                current: 0
            }
        );
    }
}
