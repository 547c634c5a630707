//! Projects module endpoints: projects, objectives, entities and the
//! project-entity links.

use anyhow::Result;
use reqwest::Method;
use serde_json::{json, Value};

use crate::models::{
    NewProject, ProjectQuery, ProjectUpdate, ENTITY_FIELDS, OBJECTIVE_FIELDS, PROJECT_FIELDS,
};

use super::client::page_cursor;
use super::HighbondClient;

impl HighbondClient {
    /// List the entities of the organization.
    ///
    /// This endpoint takes `page_size` flat while the page number is
    /// still the base64 cursor.
    pub async fn get_entities(
        &self,
        fields: Option<&str>,
        page_size: u32,
        page_number: u32,
    ) -> Result<Value> {
        let params: Vec<(&str, String)> = vec![
            ("fields[entities]", fields.unwrap_or(ENTITY_FIELDS).to_string()),
            ("page_size", page_size.to_string()),
            ("page[number]", page_cursor(page_number)),
        ];

        self.request(Method::GET, &self.url("entities"), Some(&params), None)
            .await
    }

    /// List projects, optionally filtered by name and status.
    pub async fn get_projects(&self, query: &ProjectQuery) -> Result<Value> {
        let mut params: Vec<(&str, String)> = vec![
            ("fields[projects]", query.fields.clone()),
            ("page[size]", query.page_size.to_string()),
            ("page[number]", page_cursor(query.page_number)),
        ];
        if let Some(ref name) = query.filter_name {
            params.push(("filter[name]", name.clone()));
        }
        if let Some(ref status) = query.filter_status {
            params.push(("filter[status]", status.clone()));
        }

        self.request(Method::GET, &self.url("projects"), Some(&params), None)
            .await
    }

    /// Fetch one project.
    pub async fn get_project(&self, project_id: &str, fields: Option<&str>) -> Result<Value> {
        let params = [(
            "fields[projects]",
            fields.unwrap_or(PROJECT_FIELDS).to_string(),
        )];

        self.request(
            Method::GET,
            &self.url(&format!("projects/{project_id}")),
            Some(&params),
            None,
        )
        .await
    }

    /// Create a project tied to a project type (methodology).
    pub async fn create_project(&self, project: &NewProject) -> Result<Value> {
        let params = [("fields[projects]", PROJECT_FIELDS.to_string())];

        self.request(
            Method::POST,
            &self.url("projects"),
            Some(&params),
            Some(&project.to_document()),
        )
        .await
    }

    /// Patch a project; only the fields set on `update` are touched.
    pub async fn update_project(&self, project_id: &str, update: &ProjectUpdate) -> Result<Value> {
        let params = [("fields[projects]", PROJECT_FIELDS.to_string())];

        self.request(
            Method::PATCH,
            &self.url(&format!("projects/{project_id}")),
            Some(&params),
            Some(&update.to_document(project_id)),
        )
        .await
    }

    /// Flag a project for deletion in 30 days, or delete it outright
    /// when `permanent` is set.
    pub async fn delete_project(&self, project_id: &str, permanent: bool) -> Result<Value> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if permanent {
            // sic: the platform spells the parameter "permament"
            params.push(("permament", "delete".to_string()));
        }

        self.request(
            Method::DELETE,
            &self.url(&format!("projects/{project_id}")),
            Some(&params),
            None,
        )
        .await
    }

    /// Link an entity to a project, covering its whole sub-hierarchy.
    pub async fn link_project_entity(&self, project_id: &str, entity_id: &str) -> Result<Value> {
        let body = json!({
            "data": { "id": entity_id, "type": "entities" }
        });

        self.request(
            Method::POST,
            &self.url(&format!("projects/{project_id}/entities")),
            None,
            Some(&body),
        )
        .await
    }

    /// Remove an entity link from a project.
    pub async fn unlink_project_entity(&self, project_id: &str, entity_id: &str) -> Result<Value> {
        self.request(
            Method::DELETE,
            &self.url(&format!("projects/{project_id}/entities/{entity_id}")),
            None,
            None,
        )
        .await
    }

    /// List the objectives of a project.
    pub async fn get_objectives(
        &self,
        project_id: &str,
        fields: Option<&str>,
        page_size: u32,
        page_number: u32,
    ) -> Result<Value> {
        let params: Vec<(&str, String)> = vec![
            (
                "fields[objectives]",
                fields.unwrap_or(OBJECTIVE_FIELDS).to_string(),
            ),
            ("page[size]", page_size.to_string()),
            ("page[number]", page_cursor(page_number)),
        ];

        self.request(
            Method::GET,
            &self.url(&format!("projects/{project_id}/objectives")),
            Some(&params),
            None,
        )
        .await
    }
}
