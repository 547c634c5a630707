//! Request payloads for the Robots module.

use serde::Serialize;
use serde_json::{json, Value};

/// Robot flavors supported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RobotCategory {
    Acl,
    Highbond,
    Workflow,
}

impl RobotCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RobotCategory::Acl => "acl",
            RobotCategory::Highbond => "highbond",
            RobotCategory::Workflow => "workflow",
        }
    }
}

/// Environment a task, job or file lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskEnvironment {
    Production,
    Development,
}

impl TaskEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskEnvironment::Production => "production",
            TaskEnvironment::Development => "development",
        }
    }
}

/// Sideload options accepted by the run-task endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunInclude {
    JobValues,
    ResultTables,
}

impl RunInclude {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunInclude::JobValues => "job_values",
            RunInclude::ResultTables => "result_tables",
        }
    }
}

/// Sideload options accepted by the job listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobInclude {
    Robot,
    Task,
    TriggeredBy,
}

impl JobInclude {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobInclude::Robot => "robot",
            JobInclude::Task => "task",
            JobInclude::TriggeredBy => "triggered_by",
        }
    }
}

/// Attributes for creating or replacing a robot task.
///
/// `app_version` only applies to production tasks; `public_key_name`
/// names the RSA key used to decrypt password values.
#[derive(Debug, Clone, Serialize)]
pub struct NewRobotTask {
    pub name: String,
    pub environment: TaskEnvironment,
    pub app_version: Option<i64>,
    pub email_notifications_enabled: bool,
    pub log_enabled: bool,
    pub public_key_name: Option<String>,
    pub share_encrypted: bool,
    pub analytic_names: Option<Vec<String>>,
}

impl NewRobotTask {
    pub fn new(name: impl Into<String>, environment: TaskEnvironment) -> Self {
        Self {
            name: name.into(),
            environment,
            app_version: None,
            email_notifications_enabled: false,
            log_enabled: false,
            public_key_name: None,
            share_encrypted: false,
            analytic_names: None,
        }
    }

    pub(crate) fn to_document(&self) -> Value {
        json!({
            "data": {
                "type": "robot_tasks",
                "attributes": self
            }
        })
    }
}

/// Parameter value types understood by the task values endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Character,
    Date,
    Datetime,
    File,
    Logical,
    Number,
    Table,
    Time,
}

/// One analytic parameter value.
///
/// Encrypted values are masked like passwords by the platform; when a
/// task holds any encrypted parameter, updates must send every value in
/// the same request.
#[derive(Debug, Clone)]
pub struct TaskValue {
    pub analytic_name: String,
    pub parameter_id: String,
    pub encrypted: bool,
    pub value: String,
    pub value_type: ValueType,
}

/// Build the JSON:API `values` document for a batch of parameter values.
pub(crate) fn values_document(values: &[TaskValue]) -> Value {
    let data: Vec<Value> = values
        .iter()
        .map(|value| {
            json!({
                "type": "values",
                "attributes": {
                    "analytic_name": value.analytic_name,
                    "parameter_id": value.parameter_id,
                    "encrypted": value.encrypted,
                    "data": {
                        "value": value.value,
                        "type": value.value_type
                    }
                }
            })
        })
        .collect();

    json!({ "data": data })
}

/// Metadata for uploading a new ACL script version.
#[derive(Debug, Clone)]
pub struct NewRobotApp {
    /// Code page id of the project encoding (e.g. 21 for Brazil).
    pub code_page: i32,
    /// Version comment shown in the app history.
    pub comment: String,
    pub is_unicode: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_document_shape() {
        let mut task = NewRobotTask::new("nightly load", TaskEnvironment::Production);
        task.app_version = Some(7);
        task.analytic_names = Some(vec!["extract".to_string(), "report".to_string()]);

        let doc = task.to_document();
        assert_eq!(doc["data"]["type"], "robot_tasks");

        let attributes = &doc["data"]["attributes"];
        assert_eq!(attributes["name"], "nightly load");
        assert_eq!(attributes["environment"], "production");
        assert_eq!(attributes["app_version"], 7);
        assert_eq!(attributes["email_notifications_enabled"], false);
        assert_eq!(attributes["analytic_names"][1], "report");
        assert_eq!(attributes["public_key_name"], Value::Null);
    }

    #[test]
    fn test_values_document_shape() {
        let values = vec![
            TaskValue {
                analytic_name: "extract".to_string(),
                parameter_id: "v_cutoff".to_string(),
                encrypted: false,
                value: "2024-01-31".to_string(),
                value_type: ValueType::Date,
            },
            TaskValue {
                analytic_name: "extract".to_string(),
                parameter_id: "v_password".to_string(),
                encrypted: true,
                value: "hunter2".to_string(),
                value_type: ValueType::Character,
            },
        ];

        let doc = values_document(&values);
        let data = doc["data"].as_array().expect("data should be an array");
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["type"], "values");
        assert_eq!(data[0]["attributes"]["data"]["type"], "date");
        assert_eq!(data[1]["attributes"]["encrypted"], true);
        assert_eq!(data[1]["attributes"]["data"]["value"], "hunter2");
    }

    #[test]
    fn test_include_wire_names() {
        assert_eq!(RunInclude::JobValues.as_str(), "job_values");
        assert_eq!(RunInclude::ResultTables.as_str(), "result_tables");
        assert_eq!(JobInclude::TriggeredBy.as_str(), "triggered_by");
    }
}
