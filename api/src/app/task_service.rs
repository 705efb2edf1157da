//! Task service

use std::sync::Arc;

use super::ActivityService;
use crate::domain::entities::{
    Action, NewActivityLog, NewTask, Page, ProjectId, Task, TaskChanges, TaskId,
};
use crate::domain::ports::{ActivityLogRepository, ProjectRepository, TaskRepository};
use crate::error::{AppError, DomainError};

/// Service for managing the tasks of a project
pub struct TaskService<TR, PR, AL>
where
    TR: TaskRepository,
    PR: ProjectRepository,
    AL: ActivityLogRepository,
{
    tasks: Arc<TR>,
    projects: Arc<PR>,
    activity: Arc<ActivityService<AL>>,
}

impl<TR, PR, AL> TaskService<TR, PR, AL>
where
    TR: TaskRepository,
    PR: ProjectRepository,
    AL: ActivityLogRepository,
{
    pub fn new(tasks: Arc<TR>, projects: Arc<PR>, activity: Arc<ActivityService<AL>>) -> Self {
        Self {
            tasks,
            projects,
            activity,
        }
    }

    async fn require_project(&self, id: &ProjectId) -> Result<(), AppError> {
        if self.projects.find_by_id(id).await?.is_none() {
            return Err(DomainError::NotFound(format!("Project with id {} not found", id)).into());
        }
        Ok(())
    }

    pub async fn get(&self, id: &TaskId) -> Result<Task, AppError> {
        let task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Task with id {} not found", id)))?;

        self.activity
            .record(
                NewActivityLog::new(Action::GetTask, format!("Got task with id {}", id))
                    .project(task.project_id),
            )
            .await;

        Ok(task)
    }

    pub async fn create(&self, new_task: NewTask) -> Result<Task, AppError> {
        if let Some(id) = new_task.id {
            if self.tasks.find_by_id(&id).await?.is_some() {
                return Err(DomainError::AlreadyExists(format!(
                    "Task with id {} already exists",
                    id
                ))
                .into());
            }
        }
        self.require_project(&new_task.project_id).await?;

        let task = self.tasks.create(&new_task).await?;

        self.activity
            .record(
                NewActivityLog::new(
                    Action::CreateTask,
                    format!("Created task with id {}", task.id),
                )
                .project(task.project_id),
            )
            .await;

        Ok(task)
    }

    pub async fn update(&self, id: &TaskId, changes: TaskChanges) -> Result<Task, AppError> {
        if let Some(project_id) = &changes.project_id {
            self.require_project(project_id).await?;
        }

        let task = self.tasks.update(id, &changes).await?;

        self.activity
            .record(
                NewActivityLog::new(Action::UpdateTask, format!("Updated task with id {}", id))
                    .project(task.project_id),
            )
            .await;

        Ok(task)
    }

    pub async fn delete(&self, id: &TaskId) -> Result<(), AppError> {
        self.tasks.delete(id).await?;

        self.activity
            .record(NewActivityLog::new(
                Action::DeleteTask,
                format!("Deleted task with id {}", id),
            ))
            .await;

        Ok(())
    }

    /// Tasks of a project ordered by name. An empty page is a 404.
    pub async fn list(&self, project_id: &ProjectId, page: Page) -> Result<Vec<Task>, AppError> {
        let tasks = if page.is_empty() {
            Vec::new()
        } else {
            self.tasks.find_by_project(project_id, &page).await?
        };

        let entry = NewActivityLog::new(
            Action::ListTasks,
            format!("Listed task from project {}", project_id),
        )
        .project(*project_id);

        if tasks.is_empty() {
            self.activity.record(entry.code(404)).await;
            return Err(DomainError::NotFound(format!(
                "Tasks with project id {} not found",
                project_id
            ))
            .into());
        }

        self.activity.record(entry).await;
        Ok(tasks)
    }
}
