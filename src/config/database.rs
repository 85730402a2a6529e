//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables
//! are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs without hand-written SQL.

use crate::entities::{
    Appointment, Category, ChecklistType, Client, Counter, Equipment, Inspection, Part,
    ServiceOrder,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Default local database used when no `DATABASE_URL` is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/oficina.sqlite?mode=rwc";

/// Establishes a connection to the given database URL. The caller resolves
/// the URL (environment, config file, default) via `config::app::load`.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables from the entity definitions.
///
/// Intended for bootstrapping a fresh database; running it against an
/// existing file surfaces "table already exists" errors from the backend.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    db.execute(builder.build(&schema.create_table_from_entity(Client)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Equipment)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Category)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Part)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(ServiceOrder)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Appointment)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(ChecklistType)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Inspection)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Counter)))
        .await?;

    Ok(())
}
