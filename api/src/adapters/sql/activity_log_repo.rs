//! SQL adapter for ActivityLogRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::domain::entities::{ActivityLog, ActivityLogId, NewActivityLog, ProjectId, UserId};
use crate::domain::ports::ActivityLogRepository;
use crate::entity::activity_logs;
use crate::error::DomainError;

use super::db_error;

/// SeaORM implementation of ActivityLogRepository
pub struct SqlActivityLogRepository {
    db: DatabaseConnection,
}

impl SqlActivityLogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ActivityLogRepository for SqlActivityLogRepository {
    async fn find_by_id(&self, id: &ActivityLogId) -> Result<Option<ActivityLog>, DomainError> {
        let result = activity_logs::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, entry: &NewActivityLog) -> Result<ActivityLog, DomainError> {
        let model = activity_logs::ActiveModel {
            id: Set(ActivityLogId::new().0),
            user_id: Set(entry.user_id.map(|id| id.0)),
            project_id: Set(entry.project_id.map(|id| id.0)),
            status_code: Set(entry.status_code),
            action_type: Set(entry.action_type.to_string()),
            action_desc: Set(entry.action_desc.clone()),
            details: Set(entry.details.clone()),
            timestamp: Set(Utc::now().fixed_offset()),
        };

        let result = model.insert(&self.db).await.map_err(db_error)?;

        Ok(result.into())
    }
}

/// Convert SeaORM model to domain entity
impl From<activity_logs::Model> for ActivityLog {
    fn from(model: activity_logs::Model) -> Self {
        ActivityLog {
            id: ActivityLogId(model.id),
            user_id: model.user_id.map(UserId),
            project_id: model.project_id.map(ProjectId),
            status_code: model.status_code,
            action_type: model.action_type,
            action_desc: model.action_desc,
            details: model.details,
            timestamp: model.timestamp.with_timezone(&Utc),
        }
    }
}
