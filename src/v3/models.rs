use serde::{Deserialize, Serialize};

/// Attribute a v3 lookup matches against. The legacy generation uses shorter
/// wire names than the current API (`name`, `ip`, `phone`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupField {
    Email,
    Username,
    Name,
    Ip,
    Password,
    Phone,
    Domain,
}

impl LookupField {
    pub fn as_str(self) -> &'static str {
        match self {
            LookupField::Email => "email",
            LookupField::Username => "username",
            LookupField::Name => "name",
            LookupField::Ip => "ip",
            LookupField::Password => "password",
            LookupField::Phone => "phone",
            LookupField::Domain => "domain",
        }
    }
}

/// Provenance of a breached record; the legacy service may omit any field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A single matched record from the v3 lookup API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub source: Option<Source>,
}

/// Envelope every v3 response is wrapped in.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LookupResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub results: Vec<LookupResult>,
}

/// Informational rate numbers from the `hc-allowed-rate` / `hc-current-rate`
/// headers, refreshed after every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateSnapshot {
    pub allowed: u32,
    pub current: u32,
}
