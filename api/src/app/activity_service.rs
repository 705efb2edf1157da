//! Activity service
//!
//! Appends rows to the activity log and serves them back by id.

use std::sync::Arc;

use crate::domain::entities::{Action, ActivityLog, ActivityLogId, NewActivityLog};
use crate::domain::ports::ActivityLogRepository;
use crate::error::{AppError, DomainError};

/// Service for the append-only activity log
pub struct ActivityService<AL>
where
    AL: ActivityLogRepository,
{
    logs: Arc<AL>,
}

impl<AL> ActivityService<AL>
where
    AL: ActivityLogRepository,
{
    pub fn new(logs: Arc<AL>) -> Self {
        Self { logs }
    }

    /// Append an activity row.
    ///
    /// Failures are logged and swallowed; recording never fails the request.
    pub async fn record(&self, entry: NewActivityLog) {
        if let Err(e) = self.logs.create(&entry).await {
            tracing::error!(
                error = %e,
                action = %entry.action_type,
                status_code = entry.status_code,
                "Failed to record activity"
            );
        }
    }

    /// Fetch one activity row
    pub async fn get(&self, id: &ActivityLogId) -> Result<ActivityLog, AppError> {
        let entry = self.logs.find_by_id(id).await?.ok_or_else(|| {
            DomainError::NotFound(format!("ActivityLog with id {} not found", id))
        })?;

        self.record(NewActivityLog::new(
            Action::GetActivityLog,
            format!("Got activity_log with id {}", id),
        ))
        .await;

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FailingActivityLogRepository, InMemoryActivityLogRepository};

    #[tokio::test]
    async fn get_records_a_read() {
        let logs = Arc::new(InMemoryActivityLogRepository::new());
        let service = ActivityService::new(logs.clone());

        let stored = logs
            .create(&NewActivityLog::new(Action::Login, "Logged in"))
            .await
            .unwrap();

        let fetched = service.get(&stored.id).await.unwrap();
        assert_eq!(fetched.action_type, "LOGIN");

        let actions = logs.actions();
        assert_eq!(actions, vec!["LOGIN", "GET_ACTIVITYLOG"]);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let logs = Arc::new(InMemoryActivityLogRepository::new());
        let service = ActivityService::new(logs.clone());

        let result = service.get(&ActivityLogId::new()).await;
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::NotFound(_)))
        ));
        assert!(logs.actions().is_empty());
    }

    #[tokio::test]
    async fn record_swallows_storage_errors() {
        let service = ActivityService::new(Arc::new(FailingActivityLogRepository));
        // Must not panic or propagate
        service
            .record(NewActivityLog::new(Action::Signup, "Created account"))
            .await;
    }
}
