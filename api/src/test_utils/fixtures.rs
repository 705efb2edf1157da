//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::entities::{
    Material, MaterialId, Project, ProjectId, Status, Task, TaskId, User, UserId,
};

/// Shorthand for a calendar date
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Create a test user with a unique username and email
pub fn test_user() -> User {
    let suffix = &Uuid::new_v4().to_string()[..8];
    User {
        id: UserId::new(),
        username: Some(format!("user-{}", suffix)),
        name: "Test User".to_string(),
        email: format!("user-{}@example.com", suffix),
        is_active: true,
        created_at: Utc::now(),
    }
}

/// Create a test project owned by the given user
pub fn test_project(owner: UserId) -> Project {
    Project {
        id: ProjectId::new(),
        user_id: owner,
        name: "Warehouse".to_string(),
        description: "Steel frame warehouse".to_string(),
        start_date: date(2025, 1, 1),
        end_date: date(2025, 6, 30),
        total_budget: 7107.63,
        status: Status::Pending,
    }
}

/// Create a pending test task inside a project
pub fn test_task(project_id: ProjectId) -> Task {
    Task {
        id: TaskId::new(),
        project_id,
        name: "Pour foundation".to_string(),
        description: "Pour and cure the slab".to_string(),
        due_date: date(2025, 3, 1),
        status: Status::Pending,
    }
}

/// Create a test material inside a project
pub fn test_material(project_id: ProjectId) -> Material {
    Material {
        id: MaterialId::new(),
        project_id,
        name: "Cement".to_string(),
        qty_needed: 120,
        qty_acquired: 30,
        unit: "bags".to_string(),
    }
}
