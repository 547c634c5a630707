//! Results module endpoints: result table records and record upload.

use anyhow::Result;
use reqwest::Method;
use serde_json::Value;

use crate::models::{FieldOverrides, Table};

use super::HighbondClient;

impl HighbondClient {
    /// Fetch the records of a result table.
    pub async fn get_records(&self, table_id: &str) -> Result<Value> {
        self.request(
            Method::GET,
            &self.url(&format!("tables/{table_id}/records")),
            None,
            None,
        )
        .await
    }

    /// Upload the rows of `table` to a result table.
    ///
    /// Column wire types come from `overrides` where given and are
    /// inferred from the data otherwise; see [`Table::field_types`].
    /// With `purge` the upload replaces the table content instead of
    /// appending to it.
    pub async fn upload_records(
        &self,
        table_id: &str,
        table: &Table,
        overrides: &FieldOverrides,
        purge: bool,
    ) -> Result<Value> {
        let body = table.to_upload_document(overrides, purge);

        self.request(
            Method::POST,
            &self.url(&format!("tables/{table_id}/upload")),
            None,
            Some(&body),
        )
        .await
    }
}
