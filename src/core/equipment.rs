//! Equipment registry business logic.
//!
//! Equipment always belongs to a client; step 2 of the inspection wizard
//! lists a client's equipment through [`get_equipment_for_client`].

use crate::{
    core::counter,
    entities::{Client, Equipment, equipment},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Editable equipment fields, shared by the add and edit forms.
#[derive(Debug, Clone, Default)]
pub struct EquipmentInput {
    /// Display name
    pub name: String,
    /// Manufacturer brand
    pub brand: Option<String>,
    /// Model designation
    pub model: Option<String>,
    /// Serial number
    pub serial_number: Option<String>,
}

/// Retrieves all equipment registered under a client, ordered by name.
pub async fn get_equipment_for_client(
    db: &DatabaseConnection,
    client_id: i64,
) -> Result<Vec<equipment::Model>> {
    Equipment::find()
        .filter(equipment::Column::ClientId.eq(client_id))
        .order_by_asc(equipment::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a piece of equipment by its unique ID.
pub async fn get_equipment_by_id(
    db: &DatabaseConnection,
    equipment_id: i64,
) -> Result<Option<equipment::Model>> {
    Equipment::find_by_id(equipment_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Registers equipment under an existing client.
///
/// # Errors
/// Returns [`Error::ClientNotFound`] if the client does not exist and
/// [`Error::Validation`] if the name is empty.
pub async fn create_equipment(
    db: &DatabaseConnection,
    client_id: i64,
    input: EquipmentInput,
) -> Result<equipment::Model> {
    if input.name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Informe o nome do equipamento.".to_string(),
        });
    }

    Client::find_by_id(client_id)
        .one(db)
        .await?
        .ok_or(Error::ClientNotFound { id: client_id })?;

    let id = counter::next_number(db, counter::EQUIPMENT).await?;

    let active = equipment::ActiveModel {
        id: Set(id),
        client_id: Set(client_id),
        name: Set(input.name.trim().to_string()),
        brand: Set(input.brand),
        model: Set(input.model),
        serial_number: Set(input.serial_number),
        created_at: Set(chrono::Utc::now()),
    };

    let result = active.insert(db).await?;
    info!(
        "Registered equipment '{}' (id {}) for client {}",
        result.name, result.id, client_id
    );
    Ok(result)
}

/// Replaces a piece of equipment's editable fields.
///
/// # Errors
/// Returns [`Error::EquipmentNotFound`] if the equipment does not exist and
/// [`Error::Validation`] if the name is empty.
pub async fn update_equipment(
    db: &DatabaseConnection,
    equipment_id: i64,
    input: EquipmentInput,
) -> Result<equipment::Model> {
    if input.name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Informe o nome do equipamento.".to_string(),
        });
    }

    let existing = Equipment::find_by_id(equipment_id)
        .one(db)
        .await?
        .ok_or(Error::EquipmentNotFound { id: equipment_id })?;

    let mut active: equipment::ActiveModel = existing.into();
    active.name = Set(input.name.trim().to_string());
    active.brand = Set(input.brand);
    active.model = Set(input.model);
    active.serial_number = Set(input.serial_number);

    active.update(db).await.map_err(Into::into)
}

/// Deletes a piece of equipment.
///
/// # Errors
/// Returns [`Error::EquipmentNotFound`] if the equipment does not exist.
pub async fn delete_equipment(db: &DatabaseConnection, equipment_id: i64) -> Result<()> {
    let result = Equipment::delete_by_id(equipment_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::EquipmentNotFound { id: equipment_id });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_equipment_requires_existing_client() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_equipment(
            &db,
            42,
            EquipmentInput {
                name: "Empilhadeira".to_string(),
                ..EquipmentInput::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::ClientNotFound { id: 42 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_equipment_listed_per_client() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_client(&db, "Alice").await?;
        let bob = create_test_client(&db, "Bob").await?;

        create_test_equipment(&db, alice.id, "Torno CNC").await?;
        create_test_equipment(&db, alice.id, "Compressor").await?;
        create_test_equipment(&db, bob.id, "Gerador").await?;

        let for_alice = get_equipment_for_client(&db, alice.id).await?;
        assert_eq!(for_alice.len(), 2);
        assert_eq!(for_alice[0].name, "Compressor");

        let for_bob = get_equipment_for_client(&db, bob.id).await?;
        assert_eq!(for_bob.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_delete_equipment() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Alice").await?;
        let machine = create_test_equipment(&db, client.id, "Prensa").await?;

        let updated = update_equipment(
            &db,
            machine.id,
            EquipmentInput {
                name: "Prensa Hidráulica".to_string(),
                brand: Some("Hidratec".to_string()),
                ..EquipmentInput::default()
            },
        )
        .await?;
        assert_eq!(updated.name, "Prensa Hidráulica");
        assert_eq!(updated.brand.as_deref(), Some("Hidratec"));

        delete_equipment(&db, machine.id).await?;
        assert!(get_equipment_by_id(&db, machine.id).await?.is_none());

        Ok(())
    }
}
