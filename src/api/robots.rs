//! Robots module endpoints: agents, robots, tasks, parameter values,
//! schedules, jobs, script versions and related files.

use std::path::Path;

use anyhow::{bail, Context, Result};
use reqwest::{multipart, Method};
use serde_json::Value;

use crate::models::robot::values_document;
use crate::models::{
    JobInclude, NewRobotApp, NewRobotTask, RobotCategory, RunInclude, Schedule, TaskEnvironment,
    TaskValue,
};

use super::HighbondClient;

impl HighbondClient {
    /// Fetch the organization resource the client is scoped to.
    pub async fn get_organization(&self) -> Result<Value> {
        self.request(Method::GET, &self.org_url(), None, None).await
    }

    /// List the robot agents installed in the organization.
    pub async fn get_agents(&self) -> Result<Value> {
        self.request(Method::GET, &self.url("agents"), None, None)
            .await
    }

    // ===== Robots =====

    /// List all robots in the organization.
    pub async fn get_robots(&self) -> Result<Value> {
        self.request(Method::GET, &self.url("robots"), None, None)
            .await
    }

    /// Create a robot. The robot listing endpoint takes the attributes
    /// as query parameters rather than a body.
    pub async fn create_robot(
        &self,
        name: &str,
        description: Option<&str>,
        category: RobotCategory,
    ) -> Result<Value> {
        let mut params: Vec<(&str, String)> = vec![
            ("name", name.to_string()),
            ("category", category.as_str().to_string()),
        ];
        if let Some(description) = description {
            params.push(("description", description.to_string()));
        }

        self.request(Method::POST, &self.url("robots"), Some(&params), None)
            .await
    }

    /// Replace a robot's name, description and category.
    pub async fn update_robot(
        &self,
        robot_id: &str,
        name: &str,
        description: &str,
        category: RobotCategory,
    ) -> Result<Value> {
        let params: Vec<(&str, String)> = vec![
            ("id", robot_id.to_string()),
            ("name", name.to_string()),
            ("description", description.to_string()),
            ("category", category.as_str().to_string()),
        ];

        self.request(
            Method::PUT,
            &self.url(&format!("robots/{robot_id}")),
            Some(&params),
            None,
        )
        .await
    }

    /// Delete a robot and every task attached to it.
    pub async fn delete_robot(&self, robot_id: &str) -> Result<Value> {
        self.request(
            Method::DELETE,
            &self.url(&format!("robots/{robot_id}")),
            None,
            None,
        )
        .await
    }

    // ===== Robot tasks =====

    /// List the tasks of a robot in one environment.
    pub async fn get_robot_tasks(
        &self,
        robot_id: &str,
        environment: TaskEnvironment,
    ) -> Result<Value> {
        let params = [("env", environment.as_str().to_string())];
        self.request(
            Method::GET,
            &self.url(&format!("robots/{robot_id}/robot_tasks")),
            Some(&params),
            None,
        )
        .await
    }

    pub async fn create_robot_task(&self, robot_id: &str, task: &NewRobotTask) -> Result<Value> {
        self.request(
            Method::POST,
            &self.url(&format!("robots/{robot_id}/robot_tasks")),
            None,
            Some(&task.to_document()),
        )
        .await
    }

    pub async fn update_robot_task(&self, task_id: &str, task: &NewRobotTask) -> Result<Value> {
        self.request(
            Method::PUT,
            &self.url(&format!("robot_tasks/{task_id}")),
            None,
            Some(&task.to_document()),
        )
        .await
    }

    pub async fn delete_robot_task(&self, task_id: &str) -> Result<Value> {
        self.request(
            Method::DELETE,
            &self.url(&format!("robot_tasks/{task_id}")),
            None,
            None,
        )
        .await
    }

    /// Trigger an immediate run of a task. `include` controls whether
    /// job values and result tables are embedded in the response.
    pub async fn run_robot_task(&self, task_id: &str, include: &[RunInclude]) -> Result<Value> {
        let include_csv = include
            .iter()
            .map(RunInclude::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let params = [("include", include_csv)];

        self.request(
            Method::POST,
            &self.url(&format!("robot_tasks/{task_id}/run_now")),
            Some(&params),
            None,
        )
        .await
    }

    // ===== Task values =====

    /// List the analytic parameter values of a task.
    pub async fn get_task_values(&self, task_id: &str) -> Result<Value> {
        self.request(
            Method::GET,
            &self.url(&format!("robot_tasks/{task_id}/values")),
            None,
            None,
        )
        .await
    }

    /// Replace analytic parameter values.
    ///
    /// When the task holds any encrypted (password) parameter, the
    /// platform requires every value in a single batch; send the full
    /// set rather than updating one at a time.
    pub async fn update_task_values(&self, task_id: &str, values: &[TaskValue]) -> Result<Value> {
        if values.is_empty() {
            bail!("at least one task value is required");
        }

        self.request(
            Method::PUT,
            &self.url(&format!("robot_tasks/{task_id}/values")),
            None,
            Some(&values_document(values)),
        )
        .await
    }

    // ===== Schedules =====

    /// Fetch the schedule of a task.
    pub async fn get_schedule(&self, task_id: &str) -> Result<Value> {
        self.request(
            Method::GET,
            &self.url(&format!("robot_tasks/{task_id}/schedule")),
            None,
            None,
        )
        .await
    }

    /// Create a task schedule. The schedule is validated locally first.
    pub async fn create_schedule(&self, task_id: &str, schedule: &Schedule) -> Result<Value> {
        schedule.validate()?;
        self.request(
            Method::POST,
            &self.url(&format!("robot_tasks/{task_id}/schedule")),
            None,
            Some(&schedule.to_document()),
        )
        .await
    }

    /// Replace a task schedule. The schedule is validated locally first.
    pub async fn update_schedule(&self, task_id: &str, schedule: &Schedule) -> Result<Value> {
        schedule.validate()?;
        self.request(
            Method::PUT,
            &self.url(&format!("robot_tasks/{task_id}/schedule")),
            None,
            Some(&schedule.to_document()),
        )
        .await
    }

    pub async fn delete_schedule(&self, task_id: &str) -> Result<Value> {
        self.request(
            Method::DELETE,
            &self.url(&format!("robot_tasks/{task_id}/schedule")),
            None,
            None,
        )
        .await
    }

    // ===== Jobs =====

    /// List the job history of a robot. Pages are numbered from 1 and
    /// this endpoint takes plain decimal page numbers.
    pub async fn get_robot_jobs(
        &self,
        robot_id: &str,
        environment: TaskEnvironment,
        include: &[JobInclude],
        page_size: u32,
        page_number: u32,
    ) -> Result<Value> {
        let include_csv = include
            .iter()
            .map(JobInclude::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let params: Vec<(&str, String)> = vec![
            ("env", environment.as_str().to_string()),
            ("include", include_csv),
            ("page[size]", page_size.to_string()),
            ("page[number]", page_number.to_string()),
        ];

        self.request(
            Method::GET,
            &self.url(&format!("robots/{robot_id}/jobs")),
            Some(&params),
            None,
        )
        .await
    }

    /// Delete one job record.
    pub async fn delete_robot_job(&self, job_id: &str) -> Result<Value> {
        self.request(
            Method::DELETE,
            &self.url(&format!("robots/jobs/{job_id}")),
            None,
            None,
        )
        .await
    }

    // ===== Script versions (apps) =====

    /// List every uploaded script version of an ACL robot.
    pub async fn get_robot_apps(&self, robot_id: &str) -> Result<Value> {
        self.request(
            Method::GET,
            &self.url(&format!("robots/{robot_id}/robot_apps")),
            None,
            None,
        )
        .await
    }

    /// Fetch one script version of an ACL robot.
    pub async fn get_robot_app(&self, robot_id: &str, robot_app_id: &str) -> Result<Value> {
        self.request(
            Method::GET,
            &self.url(&format!("robots/{robot_id}/robot_apps/{robot_app_id}")),
            None,
            None,
        )
        .await
    }

    /// Upload an `.acl` project file as a new script version.
    pub async fn create_robot_app(
        &self,
        robot_id: &str,
        app: &NewRobotApp,
        file: &Path,
    ) -> Result<Value> {
        let form = multipart::Form::new()
            .text("code_page", app.code_page.to_string())
            .text("comment", app.comment.clone())
            .text("is_unicode", app.is_unicode.to_string())
            .part("file", self.file_part(file).await?);

        self.post_multipart(&self.url(&format!("robots/{robot_id}/robot_apps")), None, form)
            .await
    }

    /// Fetch one version of a scripted (Python/HCL) robot, optionally
    /// embedding its analytics.
    pub async fn get_robot_script_version(
        &self,
        robot_id: &str,
        version_id: &str,
        include_analytics: bool,
    ) -> Result<Value> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if include_analytics {
            params.push(("include", "analytics".to_string()));
        }

        self.request(
            Method::GET,
            &self.url(&format!("robots/{robot_id}/versions/{version_id}")),
            Some(&params),
            None,
        )
        .await
    }

    // ===== Related files =====

    /// List the related files of a robot in one environment.
    pub async fn get_robot_files(
        &self,
        robot_id: &str,
        environment: TaskEnvironment,
    ) -> Result<Value> {
        let params = [("env", environment.as_str().to_string())];
        self.request(
            Method::GET,
            &self.url(&format!("robots/{robot_id}/robot_files")),
            Some(&params),
            None,
        )
        .await
    }

    /// Upload a related file for a robot.
    pub async fn upload_robot_file(
        &self,
        robot_id: &str,
        environment: TaskEnvironment,
        file: &Path,
    ) -> Result<Value> {
        let params = [("env", environment.as_str().to_string())];
        let form = multipart::Form::new().part("file", self.file_part(file).await?);

        self.post_multipart(
            &self.url(&format!("robots/{robot_id}/robot_files")),
            Some(&params),
            form,
        )
        .await
    }

    pub async fn delete_robot_file(&self, file_id: &str) -> Result<Value> {
        self.request(
            Method::DELETE,
            &self.url(&format!("robot_files/{file_id}")),
            None,
            None,
        )
        .await
    }

    /// Download a related file, writing it to `out_path` and returning
    /// the content.
    pub async fn download_robot_file(&self, file_id: &str, out_path: &Path) -> Result<Vec<u8>> {
        let bytes = self
            .download(&self.url(&format!("robot_files/{file_id}/download")))
            .await?;

        tokio::fs::write(out_path, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", out_path.display()))?;

        Ok(bytes)
    }
}
