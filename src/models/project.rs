//! Request payloads and query types for the Projects module.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};

/// Default field allowlist for project reads; the API only returns the
/// fields named here.
pub const PROJECT_FIELDS: &str = "name,state,status,created_at,updated_at,description,background,budget,position,header_alert_enabled,header_alert_text,certification,control_performance,risk_assurance,management_response,max_sample_size,number_of_testing_rounds,opinion,opinion_description,purpose,scope,start_date,target_date,tag_list,project_type,entities,collaborators,risk_assurance_data,collaborator_groups,time_spent,progress,planned_start_date,actual_start_date,planned_end_date,actual_end_date,planned_milestone_date,actual_milestone_date";

/// Default field allowlist for objective reads.
pub const OBJECTIVE_FIELDS: &str = "title,description,reference,division_department,owner,executive_owner,created_at,updated_at,project,assigned_user,custom_attributes,position,risk_control_matrix_id,walkthrough_summary_id,testing_round_1_id,testing_round_2_id,testing_round_3_id,testing_round_4_id,entities,framework,framework_origin,risk_assurance_data,planned_start_date,actual_start_date,planned_end_date,actual_end_date,planned_milestone_date,actual_milestone_date";

/// Default field allowlist for entity reads.
pub const ENTITY_FIELDS: &str = "title,description,created_at,updated_at,parent,children_count,entity_category";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectState {
    Active,
    Archived,
}

/// Reference to a related JSON:API resource.
#[derive(Debug, Clone)]
pub struct ResourceRef {
    pub id: String,
    /// JSON:API resource type, e.g. `entities`.
    pub kind: String,
}

impl ResourceRef {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
        }
    }

    fn to_json(&self) -> Value {
        json!({ "id": self.id, "type": self.kind })
    }
}

/// Attributes for creating a project.
///
/// `status` is free-form (the platform defaults are draft, proposed,
/// active and completed); `budget` is in hours.
#[derive(Debug, Clone, Serialize)]
pub struct NewProject {
    pub name: String,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    #[serde(skip)]
    pub project_type_id: String,
    pub status: String,
    pub state: ProjectState,
    pub description: Option<String>,
    pub background: Option<String>,
    pub budget: Option<i64>,
    pub management_response: Option<String>,
    pub max_sample_size: i64,
    pub number_of_testing_rounds: i64,
    pub opinion: Option<String>,
    pub opinion_description: Option<String>,
    pub purpose: Option<String>,
    pub scope: Option<String>,
    pub tag_list: Vec<String>,
}

impl NewProject {
    pub fn new(
        name: impl Into<String>,
        start_date: NaiveDate,
        target_date: NaiveDate,
        project_type_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            start_date,
            target_date,
            project_type_id: project_type_id.into(),
            status: "active".to_string(),
            state: ProjectState::Active,
            description: None,
            background: None,
            budget: None,
            management_response: None,
            max_sample_size: 0,
            number_of_testing_rounds: 0,
            opinion: None,
            opinion_description: None,
            purpose: None,
            scope: None,
            tag_list: Vec::new(),
        }
    }

    pub(crate) fn to_document(&self) -> Value {
        json!({
            "data": {
                "type": "projects",
                "attributes": self,
                "relationships": {
                    "project_type": {
                        "data": { "id": self.project_type_id, "type": "project_types" }
                    }
                }
            }
        })
    }
}

/// Partial update for a project; only the fields that are set are sent.
///
/// Name and the two dates are always required by the PATCH endpoint.
/// `tag_list` replaces the current tags wholesale.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectUpdate {
    pub name: String,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    #[serde(skip)]
    pub project_type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_milestone_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_milestone_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_performance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_assurance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_sample_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opinion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opinion_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag_list: Vec<String>,
    /// Free-form custom attribute objects, passed through verbatim.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_attributes: Vec<Value>,
    #[serde(skip)]
    pub entities: Vec<ResourceRef>,
}

impl ProjectUpdate {
    pub fn new(name: impl Into<String>, start_date: NaiveDate, target_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start_date,
            target_date,
            project_type_id: None,
            planned_start_date: None,
            planned_end_date: None,
            actual_start_date: None,
            actual_end_date: None,
            planned_milestone_date: None,
            actual_milestone_date: None,
            certification: None,
            control_performance: None,
            risk_assurance: None,
            budget: None,
            status: None,
            description: None,
            background: None,
            management_response: None,
            max_sample_size: None,
            opinion: None,
            opinion_description: None,
            purpose: None,
            scope: None,
            tag_list: Vec::new(),
            custom_attributes: Vec::new(),
            entities: Vec::new(),
        }
    }

    pub(crate) fn to_document(&self, project_id: &str) -> Value {
        let mut doc = json!({
            "data": {
                "id": project_id,
                "type": "projects",
                "attributes": self
            }
        });

        let mut relationships = serde_json::Map::new();
        if let Some(ref type_id) = self.project_type_id {
            relationships.insert(
                "project_type".to_string(),
                json!({ "data": { "id": type_id, "type": "project_types" } }),
            );
        }
        if !self.entities.is_empty() {
            let refs: Vec<Value> = self.entities.iter().map(ResourceRef::to_json).collect();
            relationships.insert("entities".to_string(), json!({ "data": refs }));
        }
        if !relationships.is_empty() {
            doc["data"]["relationships"] = Value::Object(relationships);
        }

        doc
    }
}

/// Listing parameters for the project index endpoint.
#[derive(Debug, Clone)]
pub struct ProjectQuery {
    pub fields: String,
    /// Page size; the API accepts 25 through 100.
    pub page_size: u32,
    pub page_number: u32,
    pub filter_name: Option<String>,
    pub filter_status: Option<String>,
}

impl Default for ProjectQuery {
    fn default() -> Self {
        Self {
            fields: PROJECT_FIELDS.to_string(),
            page_size: 25,
            page_number: 1,
            filter_name: None,
            filter_status: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_project_document() {
        let mut project = NewProject::new(
            "Q1 controls review",
            date(2024, 1, 15),
            date(2024, 3, 31),
            "8842",
        );
        project.budget = Some(120);
        project.tag_list = vec!["sox".to_string()];

        let doc = project.to_document();
        let attributes = &doc["data"]["attributes"];

        assert_eq!(doc["data"]["type"], "projects");
        assert_eq!(attributes["name"], "Q1 controls review");
        assert_eq!(attributes["start_date"], "2024-01-15");
        assert_eq!(attributes["target_date"], "2024-03-31");
        assert_eq!(attributes["status"], "active");
        assert_eq!(attributes["state"], "active");
        assert_eq!(attributes["budget"], 120);
        assert_eq!(attributes["description"], Value::Null);
        assert_eq!(attributes["tag_list"], json!(["sox"]));
        // relationship carries the methodology, not an attribute
        assert!(attributes.get("project_type_id").is_none());
        assert_eq!(
            doc["data"]["relationships"]["project_type"]["data"],
            json!({ "id": "8842", "type": "project_types" })
        );
    }

    #[test]
    fn test_update_skips_unset_fields() {
        let update = ProjectUpdate::new("renamed", date(2024, 1, 1), date(2024, 6, 30));
        let doc = update.to_document("314");
        let attributes = doc["data"]["attributes"]
            .as_object()
            .expect("attributes should be an object");

        assert_eq!(doc["data"]["id"], "314");
        assert_eq!(attributes.len(), 3);
        assert!(attributes.contains_key("name"));
        assert!(attributes.contains_key("start_date"));
        assert!(attributes.contains_key("target_date"));
        assert!(doc["data"].get("relationships").is_none());
    }

    #[test]
    fn test_update_with_relationships() {
        let mut update = ProjectUpdate::new("p", date(2024, 1, 1), date(2024, 6, 30));
        update.project_type_id = Some("77".to_string());
        update.entities = vec![ResourceRef::new("5", "entities")];
        update.status = Some("completed".to_string());

        let doc = update.to_document("314");
        assert_eq!(doc["data"]["attributes"]["status"], "completed");
        assert_eq!(
            doc["data"]["relationships"]["project_type"]["data"]["id"],
            "77"
        );
        assert_eq!(
            doc["data"]["relationships"]["entities"]["data"],
            json!([{ "id": "5", "type": "entities" }])
        );
    }

    #[test]
    fn test_default_query() {
        let query = ProjectQuery::default();
        assert_eq!(query.page_size, 25);
        assert_eq!(query.page_number, 1);
        assert!(query.fields.contains("risk_assurance_data"));
        assert!(query.filter_name.is_none());
    }
}
