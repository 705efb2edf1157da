//! SeaORM table models
//!
//! One module per table. The schema is created from these definitions at
//! startup (see `adapters::sql::schema`).

pub mod activity_logs;
pub mod cost_entries;
pub mod credentials;
pub mod materials;
pub mod projects;
pub mod tasks;
pub mod users;
