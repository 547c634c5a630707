//! Client library for the HighBond (Diligent) GRC platform REST API.
//!
//! HighBond exposes its Robots, Projects, Strategy and Results modules
//! through a JSON:API-style HTTP interface authenticated with a bearer
//! token. This crate wraps those endpoints behind [`HighbondClient`]:
//! each method formats a URL under `/v1/orgs/{org_id}`, attaches the
//! token, optionally serializes a JSON:API request body or query
//! parameters, issues one HTTP call and maps the status code to either
//! a parsed JSON body or an [`ApiError`].
//!
//! # Quick start
//!
//! ```no_run
//! use highbond_client::{Config, HighbondClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Reads HB_TOKEN / HB_ORGID / HB_SERVER (a .env file works too)
//!     let client = HighbondClient::new(Config::from_env()?)?;
//!
//!     let robots = client.get_robots().await?;
//!     println!("{robots:#}");
//!     Ok(())
//! }
//! ```
//!
//! # Response handling
//!
//! The platform returns free-form JSON:API documents whose attribute
//! sets vary per organization, so endpoint methods return
//! [`serde_json::Value`] rather than fixed structs. Request bodies are
//! typed: see [`models`] for the JSON:API payloads (robot tasks,
//! schedules, projects) and the [`models::Table`] type used by
//! [`HighbondClient::upload_records`].
//!
//! Retries, rate limiting and caching are intentionally out of scope;
//! every method performs exactly one HTTP call.

pub mod api;
pub mod config;
pub mod models;

pub use api::{ApiError, HighbondClient};
pub use config::{Config, Protocol, Server};
