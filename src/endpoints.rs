//! Pure URL builders for the HackCheck REST endpoints.
//!
//! Every builder takes the configured base URL plus typed parameters and
//! returns the fully-qualified URL for one endpoint. Path segments and query
//! values go through the `url` crate so reserved characters in queries and
//! ids are percent-encoded instead of spliced into the path.

use url::Url;

use crate::models::{CheckOptions, MonitorKind, SearchOptions};

/// Production API host.
pub const BASE_URL: &str = "https://api.hackcheck.io/";

/// Append percent-encoded path segments to `url`.
///
/// `path_segments_mut` only fails for cannot-be-a-base URLs, which an
/// http(s) base never is; such a URL is returned unchanged.
pub(crate) fn push_segments(url: &mut Url, segments: &[&str]) {
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
}

/// `search/{key}/{field}/{query}` plus a query string assembled only from
/// the options the caller supplied.
pub(crate) fn search(base: &Url, api_key: &str, options: &SearchOptions) -> Url {
    let mut url = base.clone();
    push_segments(
        &mut url,
        &["search", api_key, options.field.as_str(), &options.query],
    );

    if let Some(filter) = &options.filter {
        url.query_pairs_mut()
            .append_pair("filter", filter.filter.as_str())
            .append_pair("databases", &filter.databases.join(","));
    }

    if let Some(pagination) = &options.pagination {
        url.query_pairs_mut()
            .append_pair("offset", &pagination.offset.to_string())
            .append_pair("limit", &pagination.limit.to_string());
    }

    url
}

/// `search/check/{key}/{field}/{query}`.
pub(crate) fn check(base: &Url, api_key: &str, options: &CheckOptions) -> Url {
    let mut url = base.clone();
    push_segments(
        &mut url,
        &["search", "check", api_key, options.field.as_str(), &options.query],
    );
    url
}

/// `monitors/{key}/list`.
pub(crate) fn monitor_list(base: &Url, api_key: &str) -> Url {
    let mut url = base.clone();
    push_segments(&mut url, &["monitors", api_key, "list"]);
    url
}

/// `monitors/{key}/list/{id}`; one endpoint serves both monitor kinds.
pub(crate) fn monitor(base: &Url, api_key: &str, monitor_id: &str) -> Url {
    let mut url = base.clone();
    push_segments(&mut url, &["monitors", api_key, "list", monitor_id]);
    url
}

/// `monitors/{key}/sources/{kind}/{id}`.
pub(crate) fn monitor_sources(base: &Url, api_key: &str, kind: MonitorKind, monitor_id: &str) -> Url {
    let mut url = base.clone();
    push_segments(
        &mut url,
        &["monitors", api_key, "sources", kind.as_str(), monitor_id],
    );
    url
}

/// `monitors/{key}/update/{kind}/{id}`.
pub(crate) fn monitor_update(base: &Url, api_key: &str, kind: MonitorKind, monitor_id: &str) -> Url {
    let mut url = base.clone();
    push_segments(
        &mut url,
        &["monitors", api_key, "update", kind.as_str(), monitor_id],
    );
    url
}

/// `monitors/{key}/pause/{kind}/{id}`.
pub(crate) fn monitor_pause(base: &Url, api_key: &str, kind: MonitorKind, monitor_id: &str) -> Url {
    let mut url = base.clone();
    push_segments(
        &mut url,
        &["monitors", api_key, "pause", kind.as_str(), monitor_id],
    );
    url
}
