//! Activity log domain entity
//!
//! Append-only audit trail of API actions and failed calls.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::project::ProjectId;
use super::user::UserId;

entity_id!(
    /// Unique identifier for an activity log row
    ActivityLogId
);

/// Longest description stored with an activity
pub const MAX_DESCRIPTION_CHARS: usize = 255;

/// Kinds of recorded activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Signup,
    Login,
    GetProject,
    CreateProject,
    UpdateProject,
    DeleteProject,
    ListProject,
    GetProjectFinancials,
    AddProjectCost,
    GetTask,
    CreateTask,
    UpdateTask,
    DeleteTask,
    ListTasks,
    GetMaterial,
    CreateMaterial,
    UpdateMaterial,
    DeleteMaterial,
    ListMaterials,
    GetActivityLog,
    /// Any request that ended with a status of 400 or above
    ApiCallFail,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Signup => "SIGNUP",
            Action::Login => "LOGIN",
            Action::GetProject => "GET_PROJECT",
            Action::CreateProject => "CREATE_PROJECT",
            Action::UpdateProject => "UPDATE_PROJECT",
            Action::DeleteProject => "DELETE_PROJECT",
            Action::ListProject => "LIST_PROJECT",
            Action::GetProjectFinancials => "GET_PROJECT_FINANCIALS",
            Action::AddProjectCost => "ADD_PROJECT_COST",
            Action::GetTask => "GET_TASK",
            Action::CreateTask => "CREATE_TASK",
            Action::UpdateTask => "UPDATE_TASK",
            Action::DeleteTask => "DELETE_TASK",
            Action::ListTasks => "LIST_TASKS",
            Action::GetMaterial => "GET_MATERIAL",
            Action::CreateMaterial => "CREATE_MATERIAL",
            Action::UpdateMaterial => "UPDATE_MATERIAL",
            Action::DeleteMaterial => "DELETE_MATERIAL",
            Action::ListMaterials => "LIST_MATERIALS",
            Action::GetActivityLog => "GET_ACTIVITYLOG",
            Action::ApiCallFail => "API_CALL_FAIL",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored activity row
#[derive(Debug, Clone, Serialize)]
pub struct ActivityLog {
    pub id: ActivityLogId,
    pub user_id: Option<UserId>,
    pub project_id: Option<ProjectId>,
    pub status_code: i32,
    pub action_type: String,
    pub action_desc: String,
    pub details: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// An activity about to be recorded
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivityLog {
    pub user_id: Option<UserId>,
    pub project_id: Option<ProjectId>,
    pub status_code: i32,
    pub action_type: Action,
    pub action_desc: String,
    pub details: Option<String>,
}

impl NewActivityLog {
    /// Successful activity with the description truncated to the stored width
    pub fn new(action: Action, message: impl AsRef<str>) -> Self {
        Self {
            user_id: None,
            project_id: None,
            status_code: 200,
            action_type: action,
            action_desc: message
                .as_ref()
                .chars()
                .take(MAX_DESCRIPTION_CHARS)
                .collect(),
            details: None,
        }
    }

    pub fn user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn maybe_user(mut self, user_id: Option<UserId>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn code(mut self, status_code: u16) -> Self {
        self.status_code = i32::from(status_code);
        self
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
