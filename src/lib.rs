//! Rust client for the HackCheck breach lookup API.
//!
//! Covers both API generations: the current search/monitor API and the
//! legacy v3 lookup API (see [`v3`]). Each generation comes in an async and
//! a blocking flavor with identical behavior.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use hackcheck::{HackCheck, SearchField, SearchOptions};
//!
//! #[tokio::main]
//! async fn main() -> hackcheck::Result<()> {
//!     let client = HackCheck::new("your-api-key")?;
//!
//!     let response = client
//!         .search(&SearchOptions::new(SearchField::Email, "alice@example.com"))
//!         .await?;
//!
//!     for result in &response.results {
//!         println!("{} leaked by {}", result.email, result.source.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Errors form a closed taxonomy ([`Error`]); match on the kind to drive
//! your own retry or backoff policy:
//!
//! ```rust,no_run
//! # use hackcheck::{Error, HackCheck, SearchField, SearchOptions};
//! # async fn demo(client: HackCheck) {
//! match client.search(&SearchOptions::new(SearchField::Domain, "example.com")).await {
//!     Ok(response) => println!("{} results", response.results.len()),
//!     Err(Error::RateLimited { remaining, .. }) => println!("slow down ({remaining} left)"),
//!     Err(other) => eprintln!("{other}"),
//! }
//! # }
//! ```

pub mod blocking;
mod client;
mod endpoints;
mod error;
mod models;
pub mod v3;

pub use client::HackCheck;
pub use endpoints::BASE_URL;
pub use error::{Error, Result};
pub use models::{
    AssetMonitor, CheckOptions, CheckResponse, DomainMonitor, ErrorResponse, GetMonitorsResponse,
    MonitorStatus, Pagination, SearchField, SearchFilter, SearchFilterOptions, SearchOptions,
    SearchResponse, SearchResponsePagination, SearchResult, Source, UpdateAssetMonitorParams,
    UpdateDomainMonitorParams,
};
