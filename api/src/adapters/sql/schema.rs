//! Schema initialisation
//!
//! Creates every table from the SeaORM entity definitions. Safe to run on
//! every startup.

use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Schema};

use crate::entity::{
    activity_logs, cost_entries, credentials, materials, projects, tasks, users,
};
use crate::error::DomainError;

/// Create all tables that do not exist yet, parents before children
pub async fn init_db(db: &DatabaseConnection) -> Result<(), DomainError> {
    create_table(db, users::Entity).await?;
    create_table(db, credentials::Entity).await?;
    create_table(db, projects::Entity).await?;
    create_table(db, tasks::Entity).await?;
    create_table(db, materials::Entity).await?;
    create_table(db, cost_entries::Entity).await?;
    create_table(db, activity_logs::Entity).await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(
    db: &DatabaseConnection,
    entity: E,
) -> Result<(), DomainError> {
    let table = entity.table_name().to_string();
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(backend.build(&statement))
        .await
        .map_err(|e| DomainError::Database(format!("creating {}: {}", table, e)))?;

    tracing::debug!(table = %table, "Table ready");
    Ok(())
}
