//! Strategy module endpoints: strategic risks, their segments and the
//! strategy objectives.

use anyhow::{bail, Result};
use reqwest::Method;
use serde_json::Value;

use super::client::page_cursor;
use super::HighbondClient;

/// Default field allowlist for strategic risk reads.
pub const STRATEGY_RISK_FIELDS: &str = "title,description,status,score,residual_score,heat,residual_heat,strategy_custom_attributes,risk_manager_risk_id,created_at,updated_at";

/// Default field allowlist for risk segment reads.
pub const SEGMENT_FIELDS: &str = "name,score,strategy_factors,created_at,updated_at";

/// Default field allowlist for the factors embedded in a segment.
pub const FACTOR_FIELDS: &str = "id,treatment_value,treatment_weight,treatment_factors,severity_value";

impl HighbondClient {
    /// List the strategic risks of the organization.
    pub async fn get_strategy_risks(
        &self,
        fields: Option<&str>,
        page_size: u32,
        page_number: u32,
    ) -> Result<Value> {
        let params: Vec<(&str, String)> = vec![
            (
                "fields[strategy_risks]",
                fields.unwrap_or(STRATEGY_RISK_FIELDS).to_string(),
            ),
            ("page[size]", page_size.to_string()),
            ("page[number]", page_cursor(page_number)),
        ];

        self.request(Method::GET, &self.url("strategy_risks"), Some(&params), None)
            .await
    }

    /// List the strategy segments of the organization.
    pub async fn get_strategy_segments(&self, page_size: u32, page_number: u32) -> Result<Value> {
        let params: Vec<(&str, String)> = vec![
            ("page[size]", page_size.to_string()),
            ("page[number]", page_cursor(page_number)),
        ];

        self.request(
            Method::GET,
            &self.url("strategy_segments"),
            Some(&params),
            None,
        )
        .await
    }

    /// List the segments attached to one strategic risk.
    pub async fn get_strategy_risk_segments(
        &self,
        strategy_risk_id: &str,
        page_size: u32,
        page_number: u32,
    ) -> Result<Value> {
        let params: Vec<(&str, String)> = vec![
            ("page[size]", page_size.to_string()),
            ("page[number]", page_cursor(page_number)),
        ];

        self.request(
            Method::GET,
            &self.url(&format!(
                "strategy_risks/{strategy_risk_id}/strategy_segments"
            )),
            Some(&params),
            None,
        )
        .await
    }

    /// Fetch one segment of a strategic risk.
    ///
    /// An empty `factor_fields` drops the factor sideload entirely; an
    /// empty `segment_fields` is rejected because the endpoint returns
    /// nothing useful without it.
    pub async fn get_strategy_risk_segment(
        &self,
        strategy_risk_id: &str,
        segment_id: &str,
        segment_fields: Option<&str>,
        factor_fields: Option<&str>,
    ) -> Result<Value> {
        let segment_fields = segment_fields.unwrap_or(SEGMENT_FIELDS);
        if segment_fields.is_empty() {
            bail!("a segment field list is required");
        }

        let mut params: Vec<(&str, String)> =
            vec![("fields[strategy_segments]", segment_fields.to_string())];
        let factor_fields = factor_fields.unwrap_or(FACTOR_FIELDS);
        if !factor_fields.is_empty() {
            params.push(("fields[strategy_factors]", factor_fields.to_string()));
        }

        self.request(
            Method::GET,
            &self.url(&format!(
                "strategy_risks/{strategy_risk_id}/strategy_segments/{segment_id}"
            )),
            Some(&params),
            None,
        )
        .await
    }

    /// List the strategy objectives of the organization.
    pub async fn get_strategy_objectives(&self, page_size: u32, page_number: u32) -> Result<Value> {
        let params: Vec<(&str, String)> = vec![
            ("page[size]", page_size.to_string()),
            ("page[number]", page_cursor(page_number)),
        ];

        self.request(
            Method::GET,
            &self.url("strategy_objectives"),
            Some(&params),
            None,
        )
        .await
    }
}
