//! End-to-end tests over real HTTP against an in-process mock of both
//! HackCheck API generations.
//!
//! The router keys its behavior on the API key in the path: `goodkey`
//! returns canned fixtures while the other keys exercise the error paths.
//! Async clients run against a server spawned on the test runtime; the
//! blocking clients get a server on a dedicated runtime thread.

use std::net::SocketAddr;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use hackcheck::v3;
use hackcheck::{
    CheckOptions, Error, HackCheck, MonitorStatus, SearchField, SearchOptions,
    UpdateAssetMonitorParams,
};

fn asset_monitor_fixture() -> Value {
    json!({
        "id": "m-1",
        "status": 0,
        "asset": "alice@example.com",
        "notification_email": "alerts@example.com",
        "expires_soon": false,
        "created_at": "2024-01-01T00:00:00Z",
        "ends_at": "2025-01-01T00:00:00Z"
    })
}

fn domain_monitor_fixture() -> Value {
    json!({
        "id": "d-1",
        "status": 0,
        "domain": "example.com",
        "notification_email": "alerts@example.com",
        "expires_soon": true,
        "created_at": "2024-01-01T00:00:00Z",
        "ends_at": "2025-01-01T00:00:00Z"
    })
}

async fn search_handler(Path((key, _field, _query)): Path<(String, String, String)>) -> impl IntoResponse {
    match key.as_str() {
        "goodkey" => Json(json!({
            "databases": 7,
            "results": [{
                "email": "alice@example.com",
                "password": "hunter2",
                "username": "alice",
                "full_name": "Alice Example",
                "ip_address": "10.0.0.1",
                "phone_number": "555-0100",
                "hash": "deadbeef",
                "source": {"name": "breachdb", "date": "2020-06-01"}
            }],
            "pagination": {
                "document_count": 41,
                "next": {"offset": 20, "limit": 20},
                "prev": null
            }
        }))
        .into_response(),
        "badkey" => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid API key."})),
        )
            .into_response(),
        "badip" => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Unauthorized IP address."})),
        )
            .into_response(),
        "limited" => (
            StatusCode::TOO_MANY_REQUESTS,
            [("X-HackCheck-Limit", "100"), ("X-HackCheck-Remaining", "0")],
            Json(json!({"error": "Rate limit reached."})),
        )
            .into_response(),
        "badreq" => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid search field."})),
        )
            .into_response(),
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn check_handler(Path((_key, _field, query)): Path<(String, String, String)>) -> Json<Value> {
    Json(json!({"found": query == "leaked@example.com"}))
}

async fn monitor_list_handler(Path(_key): Path<String>) -> Json<Value> {
    Json(json!({
        "asset_monitors": [asset_monitor_fixture()],
        "domain_monitors": [domain_monitor_fixture()]
    }))
}

async fn monitor_handler(Path((_key, id)): Path<(String, String)>) -> Json<Value> {
    if id.starts_with('d') {
        Json(domain_monitor_fixture())
    } else {
        Json(asset_monitor_fixture())
    }
}

async fn asset_sources_handler(Path((_key, _id)): Path<(String, String)>) -> Json<Value> {
    Json(json!([
        {"name": "breachdb", "date": "2020-06-01"},
        {"name": "leakdb", "date": "2021-02-14"}
    ]))
}

async fn pause_asset_handler(Path((_key, _id)): Path<(String, String)>) -> Json<Value> {
    let mut monitor = asset_monitor_fixture();
    monitor["status"] = json!(1);
    Json(monitor)
}

async fn update_asset_handler(
    Path((_key, id)): Path<(String, String)>,
    Json(params): Json<Value>,
) -> Json<Value> {
    let mut monitor = asset_monitor_fixture();
    monitor["id"] = json!(id);
    monitor["asset"] = params["asset"].clone();
    monitor["notification_email"] = params["notification_email"].clone();
    Json(monitor)
}

async fn v3_lookup_handler(
    Path((key, _field, query)): Path<(String, String, String)>,
) -> impl IntoResponse {
    let rate_headers = [("hc-allowed-rate", "120"), ("hc-current-rate", "5")];
    if key != "goodkey" {
        return (StatusCode::UNAUTHORIZED, rate_headers, Json(json!({}))).into_response();
    }
    if query == "nobody@example.com" {
        return (
            rate_headers,
            Json(json!({"success": false, "message": "no results found"})),
        )
            .into_response();
    }
    (
        rate_headers,
        Json(json!({
            "success": true,
            "results": [{
                "email": "alice@example.com",
                "password": "hunter2",
                "source": {"name": "breachdb", "date": "2019-05-01"}
            }]
        })),
    )
        .into_response()
}

fn app() -> Router {
    Router::new()
        .route("/search/{key}/{field}/{query}", get(search_handler))
        .route("/search/check/{key}/{field}/{query}", get(check_handler))
        .route("/monitors/{key}/list", get(monitor_list_handler))
        .route("/monitors/{key}/list/{id}", get(monitor_handler))
        .route("/monitors/{key}/sources/asset/{id}", get(asset_sources_handler))
        .route("/monitors/{key}/pause/asset/{id}", post(pause_asset_handler))
        .route("/monitors/{key}/update/asset/{id}", put(update_asset_handler))
        .route("/v3/lookup/{key}/{field}/{query}", get(v3_lookup_handler))
}

/// Spawn the mock server on the current runtime; connections queue on the
/// bound listener, so no readiness dance is needed.
async fn spawn_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app()).await.unwrap();
    });
    addr
}

/// Spawn the mock server on its own runtime thread for the blocking clients.
fn spawn_server_thread() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            axum::serve(listener, app()).await.unwrap();
        });
    });

    addr
}

fn client(addr: SocketAddr, api_key: &str) -> HackCheck {
    HackCheck::new(api_key)
        .unwrap()
        .with_base_url(&format!("http://{addr}/"))
        .unwrap()
}

#[tokio::test]
async fn search_decodes_results_and_pagination() -> anyhow::Result<()> {
    let addr = spawn_server().await;
    let client = client(addr, "goodkey");

    let response = client
        .search(&SearchOptions::new(SearchField::Email, "alice@example.com"))
        .await?;

    assert_eq!(response.databases, 7);
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].source.name, "breachdb");
    let pagination = response.pagination.expect("pagination present in body");
    assert_eq!(pagination.document_count, 41);
    assert_eq!(pagination.next.map(|p| p.offset), Some(20));
    assert!(pagination.prev.is_none());
    assert!(response.error.is_none());
    Ok(())
}

#[tokio::test]
async fn search_maps_error_statuses() {
    let addr = spawn_server().await;
    let options = SearchOptions::new(SearchField::Email, "x@y.z");

    let err = client(addr, "badkey").search(&options).await.unwrap_err();
    assert!(matches!(err, Error::InvalidApiKey));

    let err = client(addr, "badip").search(&options).await.unwrap_err();
    assert!(matches!(err, Error::UnauthorizedIpAddress));

    let err = client(addr, "limited").search(&options).await.unwrap_err();
    assert!(matches!(
        err,
        Error::RateLimited {
            limit: 100,
            remaining: 0
        }
    ));

    let err = client(addr, "badreq").search(&options).await.unwrap_err();
    match err {
        Error::BadRequest(message) => assert_eq!(message, "Invalid search field."),
        other => panic!("expected BadRequest, got {other:?}"),
    }

    let err = client(addr, "other").search(&options).await.unwrap_err();
    assert!(matches!(err, Error::Server));
}

#[tokio::test]
async fn unrouted_endpoint_maps_to_endpoint_not_found() {
    let addr = spawn_server().await;
    // The mock only routes asset sources; the domain variant falls through
    // to the router's 404.
    let err = client(addr, "goodkey")
        .get_domain_monitor_sources("d-1")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::EndpointNotFound));
}

#[tokio::test]
async fn check_returns_match_existence() -> anyhow::Result<()> {
    let addr = spawn_server().await;
    let client = client(addr, "goodkey");

    let found = client
        .check(&CheckOptions::new(SearchField::Email, "leaked@example.com"))
        .await?;
    assert!(found);

    let found = client
        .check(&CheckOptions::new(SearchField::Email, "clean@example.com"))
        .await?;
    assert!(!found);
    Ok(())
}

#[tokio::test]
async fn monitor_operations_round_trip() -> anyhow::Result<()> {
    let addr = spawn_server().await;
    let client = client(addr, "goodkey");

    let monitors = client.get_monitors().await?;
    assert_eq!(monitors.asset_monitors.len(), 1);
    assert_eq!(monitors.domain_monitors.len(), 1);
    assert_eq!(monitors.asset_monitors[0].status, MonitorStatus::Running);
    assert!(monitors.domain_monitors[0].expires_soon);

    let monitor = client.get_asset_monitor("m-1").await?;
    assert_eq!(monitor.asset, "alice@example.com");

    let monitor = client.get_domain_monitor("d-1").await?;
    assert_eq!(monitor.domain, "example.com");

    let sources = client.get_asset_monitor_sources("m-1").await?;
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[1].name, "leakdb");

    let paused = client.toggle_pause_asset_monitor("m-1").await?;
    assert_eq!(paused.status, MonitorStatus::Paused);

    let params = UpdateAssetMonitorParams {
        asset: "bob@example.com".into(),
        notification_email: "bob-alerts@example.com".into(),
    };
    let updated = client.update_asset_monitor("m-1", &params).await?;
    assert_eq!(updated.asset, params.asset);
    assert_eq!(updated.notification_email, params.notification_email);
    Ok(())
}

#[tokio::test]
async fn v3_lookup_results_and_rate_snapshot() -> anyhow::Result<()> {
    let addr = spawn_server().await;
    let mut client = v3::HackCheck::new("goodkey")?
        .with_base_url(&format!("http://{addr}/v3/lookup/"))?;

    let results = client.lookup_email("alice@example.com").await?;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].email.as_deref(), Some("alice@example.com"));
    assert_eq!(
        client.rate_snapshot(),
        v3::RateSnapshot {
            allowed: 120,
            current: 5
        }
    );

    let err = client.lookup_email("nobody@example.com").await.unwrap_err();
    match err {
        Error::Api(message) => assert_eq!(message, "no results found"),
        other => panic!("expected Api, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn v3_unauthorized_is_invalid_api_key() -> anyhow::Result<()> {
    let addr = spawn_server().await;
    let mut client = v3::HackCheck::new("badkey")?
        .with_base_url(&format!("http://{addr}/v3/lookup/"))?;

    let err = client.lookup_username("alice").await.unwrap_err();
    assert!(matches!(err, Error::InvalidApiKey));
    Ok(())
}

#[test]
fn blocking_clients_mirror_async_behavior() -> anyhow::Result<()> {
    let addr = spawn_server_thread();

    let client = hackcheck::blocking::HackCheck::new("goodkey")?
        .with_base_url(&format!("http://{addr}/"))?;

    let response = client.search(&SearchOptions::new(SearchField::Username, "alice"))?;
    assert_eq!(response.results.len(), 1);

    let found = client.check(&CheckOptions::new(SearchField::Email, "leaked@example.com"))?;
    assert!(found);

    let err = hackcheck::blocking::HackCheck::new("limited")?
        .with_base_url(&format!("http://{addr}/"))?
        .search(&SearchOptions::new(SearchField::Email, "x@y.z"))
        .unwrap_err();
    assert!(matches!(err, Error::RateLimited { limit: 100, .. }));

    let mut v3_client = v3::blocking::HackCheck::new("goodkey")?
        .with_base_url(&format!("http://{addr}/v3/lookup/"))?;
    let results = v3_client.lookup_domain("example.com")?;
    assert_eq!(results.len(), 1);
    assert_eq!(v3_client.rate_snapshot().allowed, 120);

    Ok(())
}
