//! Project service
//!
//! Project CRUD, per-owner listing and the budget-vs-actual financials.
//! Every successful operation is written to the activity log.

use std::sync::Arc;

use chrono::Utc;

use super::ActivityService;
use crate::domain::entities::{
    Action, CostEntry, FinancialSummary, NewActivityLog, NewCostEntry, NewProject, Page, Project,
    ProjectChanges, ProjectId, User, UserId,
};
use crate::domain::ports::{
    ActivityLogRepository, CostEntryRepository, ProjectRepository, UserRepository,
};
use crate::error::{AppError, DomainError};

/// Cost reported by a client; the date is always today
#[derive(Debug, Clone)]
pub struct CostInput {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub vendor_name: String,
}

/// Service for managing projects
pub struct ProjectService<PR, UR, CR, AL>
where
    PR: ProjectRepository,
    UR: UserRepository,
    CR: CostEntryRepository,
    AL: ActivityLogRepository,
{
    projects: Arc<PR>,
    users: Arc<UR>,
    costs: Arc<CR>,
    activity: Arc<ActivityService<AL>>,
}

impl<PR, UR, CR, AL> ProjectService<PR, UR, CR, AL>
where
    PR: ProjectRepository,
    UR: UserRepository,
    CR: CostEntryRepository,
    AL: ActivityLogRepository,
{
    pub fn new(
        projects: Arc<PR>,
        users: Arc<UR>,
        costs: Arc<CR>,
        activity: Arc<ActivityService<AL>>,
    ) -> Self {
        Self {
            projects,
            users,
            costs,
            activity,
        }
    }

    async fn find(&self, id: &ProjectId) -> Result<Project, AppError> {
        Ok(self
            .projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Project with id {} not found", id)))?)
    }

    async fn require_user(&self, id: &UserId) -> Result<(), AppError> {
        if self.users.find_by_id(id).await?.is_none() {
            return Err(DomainError::NotFound(format!("User with id {} not found", id)).into());
        }
        Ok(())
    }

    /// Get a project and its owner
    pub async fn get(&self, id: &ProjectId) -> Result<(Project, Option<User>), AppError> {
        let project = self.find(id).await?;
        let owner = self.users.find_by_id(&project.user_id).await?;

        self.activity
            .record(
                NewActivityLog::new(Action::GetProject, format!("Got project info for {}", id))
                    .project(*id),
            )
            .await;

        Ok((project, owner))
    }

    /// Create a project for an existing owner
    pub async fn create(&self, new_project: NewProject) -> Result<(Project, Option<User>), AppError> {
        if let Some(id) = new_project.id {
            if self.projects.find_by_id(&id).await?.is_some() {
                return Err(DomainError::AlreadyExists(format!(
                    "Project with id {} already exists",
                    id
                ))
                .into());
            }
        }
        self.require_user(&new_project.user_id).await?;

        let project = self.projects.create(&new_project).await?;
        let owner = self.users.find_by_id(&project.user_id).await?;

        self.activity
            .record(
                NewActivityLog::new(
                    Action::CreateProject,
                    format!("Created project with id of {}", project.id),
                )
                .project(project.id),
            )
            .await;

        Ok((project, owner))
    }

    /// Apply a partial update
    pub async fn update(
        &self,
        id: &ProjectId,
        changes: ProjectChanges,
    ) -> Result<(Project, Option<User>), AppError> {
        if let Some(user_id) = &changes.user_id {
            self.require_user(user_id).await?;
        }

        let project = self.projects.update(id, &changes).await?;
        let owner = self.users.find_by_id(&project.user_id).await?;

        self.activity
            .record(
                NewActivityLog::new(
                    Action::UpdateProject,
                    format!("Updated project with id {}", id),
                )
                .project(*id),
            )
            .await;

        Ok((project, owner))
    }

    /// Delete a project with its tasks, materials and costs
    pub async fn delete(&self, id: &ProjectId) -> Result<(), AppError> {
        self.projects.delete(id).await?;

        self.activity
            .record(
                NewActivityLog::new(
                    Action::DeleteProject,
                    format!("Deleted project with id {}", id),
                )
                .project(*id),
            )
            .await;

        Ok(())
    }

    /// Projects owned by a user, ordered by end date.
    ///
    /// An empty page is not an error, but is recorded with code 404.
    pub async fn list(&self, owner: &UserId, page: Page) -> Result<Vec<Project>, AppError> {
        let projects = if page.is_empty() {
            Vec::new()
        } else {
            self.projects.find_by_owner(owner, &page).await?
        };

        let mut entry = NewActivityLog::new(
            Action::ListProject,
            format!("Listed projects from user {}", owner),
        )
        .user(*owner);
        if projects.is_empty() {
            entry = entry.code(404);
        }
        self.activity.record(entry).await;

        Ok(projects)
    }

    /// Budget versus actual spending, over every recorded cost
    pub async fn financials(&self, id: &ProjectId) -> Result<FinancialSummary, AppError> {
        let project = self.find(id).await?;
        let costs = self.costs.find_by_project(id).await?;
        let summary = FinancialSummary::compute(&project, &costs);

        self.activity
            .record(
                NewActivityLog::new(
                    Action::GetProjectFinancials,
                    format!("Retrieved financials for project {}", id),
                )
                .project(*id),
            )
            .await;

        Ok(summary)
    }

    /// Record a cost against a project, dated today
    pub async fn add_cost(&self, id: &ProjectId, input: CostInput) -> Result<CostEntry, AppError> {
        self.find(id).await?;

        let cost = self
            .costs
            .create(&NewCostEntry {
                project_id: *id,
                description: input.description,
                amount: input.amount,
                category: input.category,
                vendor_name: input.vendor_name,
                date_incurred: Utc::now().date_naive(),
            })
            .await?;

        self.activity
            .record(
                NewActivityLog::new(
                    Action::AddProjectCost,
                    format!(
                        "Added cost ${} for {} to project {}",
                        cost.amount, cost.description, id
                    ),
                )
                .project(*id),
            )
            .await;

        Ok(cost)
    }
}
