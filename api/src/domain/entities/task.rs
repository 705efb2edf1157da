//! Task domain entity

use chrono::NaiveDate;
use serde::Serialize;

use super::project::ProjectId;
use super::status::Status;

entity_id!(
    /// Unique identifier for a task
    TaskId
);

/// A unit of work inside a project
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub name: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub status: Status,
}

impl Task {
    pub fn apply(&mut self, changes: &TaskChanges) {
        if let Some(project_id) = changes.project_id {
            self.project_id = project_id;
        }
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(due_date) = changes.due_date {
            self.due_date = due_date;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub id: Option<TaskId>,
    pub project_id: ProjectId,
    pub name: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub status: Status,
}

#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub project_id: Option<ProjectId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<Status>,
}

impl TaskChanges {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.project_id.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
    }
}
