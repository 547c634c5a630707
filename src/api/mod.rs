//! REST API client for the HighBond platform.
//!
//! [`HighbondClient`] holds the HTTP client and configuration; the
//! endpoint wrappers are grouped by platform module:
//!
//! - `robots` - agents, robots, tasks, values, schedules, jobs, script
//!   versions and related files
//! - `projects` - projects, objectives, entities and entity links
//! - `strategy` - strategic risks, segments and objectives
//! - `results` - result tables and record upload
//!
//! All endpoints authenticate with a bearer token and speak the
//! JSON:API media type (`application/vnd.api+json`).

pub mod client;
pub mod error;

mod projects;
mod results;
mod robots;
mod strategy;

pub use client::HighbondClient;
pub use error::ApiError;
pub use strategy::{FACTOR_FIELDS, SEGMENT_FIELDS, STRATEGY_RISK_FIELDS};
