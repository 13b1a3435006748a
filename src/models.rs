use serde::{Deserialize, Serialize};

/// Attribute a search query matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    Email,
    Username,
    FullName,
    Password,
    IpAddress,
    PhoneNumber,
    Domain,
    Hash,
}

impl SearchField {
    /// Wire name used in URL paths.
    pub fn as_str(self) -> &'static str {
        match self {
            SearchField::Email => "email",
            SearchField::Username => "username",
            SearchField::FullName => "full_name",
            SearchField::Password => "password",
            SearchField::IpAddress => "ip_address",
            SearchField::PhoneNumber => "phone_number",
            SearchField::Domain => "domain",
            SearchField::Hash => "hash",
        }
    }
}

/// Whether the named databases are the only ones searched, or excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchFilter {
    Use,
    Ignore,
}

impl SearchFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchFilter::Use => "use",
            SearchFilter::Ignore => "ignore",
        }
    }
}

/// Restrict a search to include or exclude specific breach databases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilterOptions {
    pub filter: SearchFilter,
    pub databases: Vec<String>,
}

/// An offset+limit pair; used both to request a page and as a response cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub offset: u32,
    pub limit: u32,
}

/// Parameters for a search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub field: SearchField,
    pub query: String,
    pub filter: Option<SearchFilterOptions>,
    pub pagination: Option<Pagination>,
}

impl SearchOptions {
    pub fn new(field: SearchField, query: impl Into<String>) -> Self {
        Self {
            field,
            query: query.into(),
            filter: None,
            pagination: None,
        }
    }

    pub fn with_filter(mut self, filter: SearchFilter, databases: Vec<String>) -> Self {
        self.filter = Some(SearchFilterOptions { filter, databases });
        self
    }

    pub fn with_pagination(mut self, offset: u32, limit: u32) -> Self {
        self.pagination = Some(Pagination { offset, limit });
        self
    }
}

/// Parameters for an existence-only check call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    pub field: SearchField,
    pub query: String,
}

impl CheckOptions {
    pub fn new(field: SearchField, query: impl Into<String>) -> Self {
        Self {
            field,
            query: query.into(),
        }
    }
}

/// Provenance of a breached record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    pub date: String,
}

/// A single matched credential record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub email: String,
    pub password: String,
    pub username: String,
    pub full_name: String,
    pub ip_address: String,
    pub phone_number: String,
    pub hash: String,
    pub source: Source,
}

/// Match count plus cursors for the surrounding pages, when the caller paginated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponsePagination {
    pub document_count: u32,
    pub next: Option<Pagination>,
    pub prev: Option<Pagination>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub databases: u32,
    pub results: Vec<SearchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<SearchResponsePagination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    pub found: bool,
}

/// Monitor lifecycle state, integer-coded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MonitorStatus {
    Running,
    Paused,
    Expired,
}

impl TryFrom<u8> for MonitorStatus {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(MonitorStatus::Running),
            1 => Ok(MonitorStatus::Paused),
            2 => Ok(MonitorStatus::Expired),
            other => Err(format!("unknown monitor status code {other}")),
        }
    }
}

impl From<MonitorStatus> for u8 {
    fn from(status: MonitorStatus) -> u8 {
        match status {
            MonitorStatus::Running => 0,
            MonitorStatus::Paused => 1,
            MonitorStatus::Expired => 2,
        }
    }
}

/// A server-side watch on a single asset (an email, username, etc.).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMonitor {
    pub id: String,
    pub status: MonitorStatus,
    pub asset: String,
    pub notification_email: String,
    pub expires_soon: bool,
    pub created_at: String,
    pub ends_at: String,
}

/// A server-side watch on every address under a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainMonitor {
    pub id: String,
    pub status: MonitorStatus,
    pub domain: String,
    pub notification_email: String,
    pub expires_soon: bool,
    pub created_at: String,
    pub ends_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetMonitorsResponse {
    pub asset_monitors: Vec<AssetMonitor>,
    pub domain_monitors: Vec<DomainMonitor>,
}

/// PUT body for updating an asset monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAssetMonitorParams {
    pub asset: String,
    pub notification_email: String,
}

/// PUT body for updating a domain monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDomainMonitorParams {
    pub domain: String,
    pub notification_email: String,
}

/// Body shape the service returns on 4xx.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Selects the asset or domain subtree of the monitor endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MonitorKind {
    Asset,
    Domain,
}

impl MonitorKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            MonitorKind::Asset => "asset",
            MonitorKind::Domain => "domain",
        }
    }
}
