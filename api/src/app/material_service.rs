//! Material service

use std::sync::Arc;

use super::ActivityService;
use crate::domain::entities::{
    Action, Material, MaterialChanges, MaterialId, NewActivityLog, NewMaterial, Page, ProjectId,
};
use crate::domain::ports::{ActivityLogRepository, MaterialRepository, ProjectRepository};
use crate::error::{AppError, DomainError};

/// Service for managing the materials a project needs
pub struct MaterialService<MR, PR, AL>
where
    MR: MaterialRepository,
    PR: ProjectRepository,
    AL: ActivityLogRepository,
{
    materials: Arc<MR>,
    projects: Arc<PR>,
    activity: Arc<ActivityService<AL>>,
}

impl<MR, PR, AL> MaterialService<MR, PR, AL>
where
    MR: MaterialRepository,
    PR: ProjectRepository,
    AL: ActivityLogRepository,
{
    pub fn new(
        materials: Arc<MR>,
        projects: Arc<PR>,
        activity: Arc<ActivityService<AL>>,
    ) -> Self {
        Self {
            materials,
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

    pub async fn get(&self, id: &MaterialId) -> Result<Material, AppError> {
        let material = self.materials.find_by_id(id).await?.ok_or_else(|| {
            DomainError::NotFound(format!("Material with id {} not found", id))
        })?;

        self.activity
            .record(
                NewActivityLog::new(Action::GetMaterial, format!("Got material with id {}", id))
                    .project(material.project_id),
            )
            .await;

        Ok(material)
    }

    pub async fn create(&self, new_material: NewMaterial) -> Result<Material, AppError> {
        if let Some(id) = new_material.id {
            if self.materials.find_by_id(&id).await?.is_some() {
                return Err(DomainError::AlreadyExists(format!(
                    "Material with id {} already exists",
                    id
                ))
                .into());
            }
        }
        self.require_project(&new_material.project_id).await?;

        let material = self.materials.create(&new_material).await?;

        self.activity
            .record(
                NewActivityLog::new(
                    Action::CreateMaterial,
                    format!("Created material with id {}", material.id),
                )
                .project(material.project_id),
            )
            .await;

        Ok(material)
    }

    pub async fn update(
        &self,
        id: &MaterialId,
        changes: MaterialChanges,
    ) -> Result<Material, AppError> {
        if let Some(project_id) = &changes.project_id {
            self.require_project(project_id).await?;
        }

        let material = self.materials.update(id, &changes).await?;

        self.activity
            .record(
                NewActivityLog::new(
                    Action::UpdateMaterial,
                    format!("Updated material with id {}", id),
                )
                .project(material.project_id),
            )
            .await;

        Ok(material)
    }

    pub async fn delete(&self, id: &MaterialId) -> Result<(), AppError> {
        self.materials.delete(id).await?;

        self.activity
            .record(NewActivityLog::new(
                Action::DeleteMaterial,
                format!("Deleted material with id {}", id),
            ))
            .await;

        Ok(())
    }

    /// Materials of a project ordered by name. An empty page is a 404.
    pub async fn list(
        &self,
        project_id: &ProjectId,
        page: Page,
    ) -> Result<Vec<Material>, AppError> {
        let materials = if page.is_empty() {
            Vec::new()
        } else {
            self.materials.find_by_project(project_id, &page).await?
        };

        let entry = NewActivityLog::new(
            Action::ListMaterials,
            format!("Listed materials from project {}", project_id),
        )
        .project(*project_id);

        if materials.is_empty() {
            self.activity.record(entry.code(404)).await;
            return Err(DomainError::NotFound(format!(
                "Materials with project id {} not found",
                project_id
            ))
            .into());
        }

        self.activity.record(entry).await;
        Ok(materials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        test_material, test_project, test_user, InMemoryActivityLogRepository,
        InMemoryMaterialRepository, InMemoryProjectRepository,
    };

    type TestService = MaterialService<
        InMemoryMaterialRepository,
        InMemoryProjectRepository,
        InMemoryActivityLogRepository,
    >;

    fn create_service(
        materials: InMemoryMaterialRepository,
        projects: InMemoryProjectRepository,
    ) -> (TestService, Arc<InMemoryActivityLogRepository>) {
        let logs = Arc::new(InMemoryActivityLogRepository::new());
        let service = MaterialService::new(
            Arc::new(materials),
            Arc::new(projects),
            Arc::new(ActivityService::new(logs.clone())),
        );
        (service, logs)
    }

    fn new_material(project_id: ProjectId, name: &str) -> NewMaterial {
        NewMaterial {
            id: None,
            project_id,
            name: name.to_string(),
            qty_needed: 40,
            qty_acquired: 0,
            unit: "bags".to_string(),
        }
    }

    #[tokio::test]
    async fn create_and_list() {
        let project = test_project(test_user().id);
        let (service, logs) = create_service(
            InMemoryMaterialRepository::new(),
            InMemoryProjectRepository::new().with_project(project.clone()),
        );

        service.create(new_material(project.id, "Mortar")).await.unwrap();
        service.create(new_material(project.id, "Cement")).await.unwrap();

        let listed = service.list(&project.id, Page::default()).await.unwrap();
        assert_eq!(listed[0].name, "Cement");
        assert_eq!(listed[1].name, "Mortar");
        assert_eq!(
            logs.actions(),
            vec!["CREATE_MATERIAL", "CREATE_MATERIAL", "LIST_MATERIALS"]
        );
    }

    #[tokio::test]
    async fn update_quantity() {
        let project = test_project(test_user().id);
        let material = test_material(project.id);
        let (service, _) = create_service(
            InMemoryMaterialRepository::new().with_material(material.clone()),
            InMemoryProjectRepository::new().with_project(project),
        );

        let updated = service
            .update(
                &material.id,
                MaterialChanges {
                    qty_acquired: Some(material.qty_needed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.qty_acquired, material.qty_needed);
        assert_eq!(updated.unit, material.unit);
    }

    #[tokio::test]
    async fn update_missing_material() {
        let (service, _) = create_service(
            InMemoryMaterialRepository::new(),
            InMemoryProjectRepository::new(),
        );

        let result = service
            .update(&MaterialId::new(), MaterialChanges::default())
            .await;
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn delete_unknown_material() {
        let (service, logs) = create_service(
            InMemoryMaterialRepository::new(),
            InMemoryProjectRepository::new(),
        );

        assert!(service.delete(&MaterialId::new()).await.is_err());
        assert!(logs.actions().is_empty());
    }

    #[tokio::test]
    async fn empty_page_is_not_found() {
        let project = test_project(test_user().id);
        let material = test_material(project.id);
        let (service, _) = create_service(
            InMemoryMaterialRepository::new().with_material(material),
            InMemoryProjectRepository::new().with_project(project.clone()),
        );

        let result = service.list(&project.id, Page::new(0, 0).unwrap()).await;
        assert!(result.is_err());
    }
}
