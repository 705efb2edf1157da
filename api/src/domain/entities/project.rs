//! Project domain entity
//!
//! Represents a construction project owned by a user, with a schedule and a budget.

use chrono::NaiveDate;
use serde::Serialize;

use super::status::Status;
use super::user::UserId;

entity_id!(
    /// Unique identifier for a project
    ProjectId
);

/// A construction project
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: ProjectId,
    /// Owner of the project
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_budget: f64,
    pub status: Status,
}

impl Project {
    /// Apply a partial update in place
    pub fn apply(&mut self, changes: &ProjectChanges) {
        if let Some(user_id) = changes.user_id {
            self.user_id = user_id;
        }
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(start_date) = changes.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = changes.end_date {
            self.end_date = end_date;
        }
        if let Some(total_budget) = changes.total_budget {
            self.total_budget = total_budget;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
    }
}

/// Data needed to create a new project
#[derive(Debug, Clone)]
pub struct NewProject {
    pub id: Option<ProjectId>,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_budget: f64,
    pub status: Status,
}

/// Partial update of a project; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct ProjectChanges {
    pub user_id: Option<UserId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub total_budget: Option<f64>,
    pub status: Option<Status>,
}

impl ProjectChanges {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.total_budget.is_none()
            && self.status.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_project() -> Project {
        Project {
            id: ProjectId::new(),
            user_id: UserId::new(),
            name: "Warehouse".to_string(),
            description: "Steel frame warehouse".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            total_budget: 7107.63,
            status: Status::Pending,
        }
    }

    #[test]
    fn apply_changes_only_set_fields() {
        let mut project = make_project();
        let original = project.clone();

        project.apply(&ProjectChanges {
            name: Some("Warehouse B".to_string()),
            status: Some(Status::InProgress),
            ..Default::default()
        });

        assert_eq!(project.name, "Warehouse B");
        assert_eq!(project.status, Status::InProgress);
        assert_eq!(project.description, original.description);
        assert_eq!(project.user_id, original.user_id);
        assert_eq!(project.total_budget, original.total_budget);
    }

    #[test]
    fn apply_empty_changes_is_noop() {
        let mut project = make_project();
        let original = project.clone();
        project.apply(&ProjectChanges::default());
        assert_eq!(project.name, original.name);
        assert_eq!(project.end_date, original.end_date);
    }

    #[test]
    fn project_id_display() {
        let id = ProjectId(uuid::Uuid::nil());
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000000");
    }
}
