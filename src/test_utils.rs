//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        category, checklist_type, client, equipment,
        part::{self, NewPart},
        wizard::{InspectionKind, ServiceCategory, WizardState},
    },
    entities,
    entities::checklist_type::ChecklistGroup,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test client with only a name; contact fields stay empty.
pub async fn create_test_client(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::client::Model> {
    client::create_client(
        db,
        client::ClientInput {
            name: name.to_string(),
            ..Default::default()
        },
    )
    .await
}

/// Creates a test equipment owned by `client_id`.
pub async fn create_test_equipment(
    db: &DatabaseConnection,
    client_id: i64,
    name: &str,
) -> Result<entities::equipment::Model> {
    equipment::create_equipment(
        db,
        client_id,
        equipment::EquipmentInput {
            name: name.to_string(),
            ..Default::default()
        },
    )
    .await
}

/// Creates a top-level test category without a description.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::category::Model> {
    category::create_category(db, name.to_string(), None).await
}

/// Creates a test subcategory under `parent_id`.
pub async fn create_test_subcategory(
    db: &DatabaseConnection,
    name: &str,
    parent_id: i64,
) -> Result<entities::category::Model> {
    category::create_subcategory(db, name.to_string(), None, parent_id).await
}

/// Creates an untagged test part (no category) priced at 10.0.
pub async fn create_test_part(
    db: &DatabaseConnection,
    name: &str,
    code: &str,
) -> Result<entities::part::Model> {
    part::create_part(
        db,
        NewPart {
            name: name.to_string(),
            code: code.to_string(),
            price: 10.0,
            ..Default::default()
        },
    )
    .await
}

/// Creates a test part tagged with a category and optionally a subcategory.
pub async fn create_test_part_in(
    db: &DatabaseConnection,
    name: &str,
    code: &str,
    category_id: i64,
    subcategory_id: Option<i64>,
) -> Result<entities::part::Model> {
    part::create_part(
        db,
        NewPart {
            name: name.to_string(),
            code: code.to_string(),
            price: 10.0,
            category_id: Some(category_id),
            subcategory_id,
            ..Default::default()
        },
    )
    .await
}

/// Creates a checklist template with two fixed groups:
/// "Sistema hidráulico" (Vazamentos, Pressão) and "Elétrica" (Fiação).
pub async fn create_test_checklist_type(
    db: &DatabaseConnection,
    name: &str,
    category: ServiceCategory,
) -> Result<entities::checklist_type::Model> {
    checklist_type::create_checklist_type(
        db,
        name.to_string(),
        category,
        vec![
            ChecklistGroup {
                name: "Sistema hidráulico".to_string(),
                characteristics: vec!["Vazamentos".to_string(), "Pressão".to_string()],
            },
            ChecklistGroup {
                name: "Elétrica".to_string(),
                characteristics: vec!["Fiação".to_string()],
            },
        ],
    )
    .await
}

/// Seeds a client, an equipment and a maintenance checklist template, then
/// walks a wizard through the first five steps. The returned wizard sits on
/// the group-selection step with nothing ticked yet.
pub async fn setup_wizard_ready_for_groups(db: &DatabaseConnection) -> Result<WizardState> {
    let client = create_test_client(db, "Oficina Teste").await?;
    let machine = create_test_equipment(db, client.id, "Empilhadeira").await?;
    let template =
        create_test_checklist_type(db, "Checklist Padrão", ServiceCategory::Maintenance).await?;

    let mut wizard = WizardState::new();
    wizard.select_client(client.id);
    assert!(wizard.advance());
    wizard.select_equipment(machine.id);
    assert!(wizard.advance());
    wizard.select_category(ServiceCategory::Maintenance);
    assert!(wizard.advance());
    wizard.select_checklist_type(template.id, template.groups.0.clone());
    assert!(wizard.advance());
    wizard.select_kind(InspectionKind::Inspection);
    assert!(wizard.advance());

    Ok(wizard)
}
