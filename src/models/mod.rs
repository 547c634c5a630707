//! Request payloads and data types for the HighBond API.
//!
//! Responses come back as free-form `serde_json::Value` documents;
//! this module types the request side:
//!
//! - `robot`: robot categories, task attributes, parameter values
//! - `schedule`: task schedules with frequency validation
//! - `project`: project create/update payloads and list queries
//! - `table`: in-memory tables and wire-type inference for record upload

pub mod project;
pub mod robot;
pub mod schedule;
pub mod table;

pub use project::{
    NewProject, ProjectQuery, ProjectState, ProjectUpdate, ResourceRef, ENTITY_FIELDS,
    OBJECTIVE_FIELDS, PROJECT_FIELDS,
};
pub use robot::{
    JobInclude, NewRobotApp, NewRobotTask, RobotCategory, RunInclude, TaskEnvironment, TaskValue,
    ValueType,
};
pub use schedule::{Frequency, InvalidSchedule, MonthlyDay, Schedule};
pub use table::{Cell, FieldOverrides, FieldType, Table, TableError};
