//! Service order business logic.
//!
//! Orders are numbered by the shared counter so the printed order number
//! matches the row id. [`get_orders_with_clients`] feeds the listing screen
//! and the CSV export, which both show the client name next to each order.

use crate::{
    core::counter,
    entities::{Client, Equipment, ServiceOrder, client, service_order},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Editable service order fields.
#[derive(Debug, Clone, Default)]
pub struct ServiceOrderInput {
    /// Equipment being serviced, if any
    pub equipment_id: Option<i64>,
    /// Free-text description of the requested work
    pub description: Option<String>,
    /// Total value in BRL
    pub total: f64,
}

/// Retrieves all service orders, newest first.
pub async fn get_all_orders(db: &DatabaseConnection) -> Result<Vec<service_order::Model>> {
    ServiceOrder::find()
        .order_by_desc(service_order::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all service orders together with their clients, newest first.
pub async fn get_orders_with_clients(
    db: &DatabaseConnection,
) -> Result<Vec<(service_order::Model, Option<client::Model>)>> {
    ServiceOrder::find()
        .find_also_related(Client)
        .order_by_desc(service_order::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a service order by its number.
pub async fn get_order_by_id(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Option<service_order::Model>> {
    ServiceOrder::find_by_id(order_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Opens a new service order for a client with status `"open"`.
///
/// # Errors
/// Returns [`Error::ClientNotFound`] / [`Error::EquipmentNotFound`] for
/// missing references and [`Error::Validation`] for a negative or non-finite
/// total.
pub async fn create_order(
    db: &DatabaseConnection,
    client_id: i64,
    input: ServiceOrderInput,
) -> Result<service_order::Model> {
    validate_total(input.total)?;

    Client::find_by_id(client_id)
        .one(db)
        .await?
        .ok_or(Error::ClientNotFound { id: client_id })?;

    if let Some(equipment_id) = input.equipment_id {
        Equipment::find_by_id(equipment_id)
            .one(db)
            .await?
            .ok_or(Error::EquipmentNotFound { id: equipment_id })?;
    }

    let id = counter::next_number(db, counter::SERVICE_ORDERS).await?;

    let active = service_order::ActiveModel {
        id: Set(id),
        client_id: Set(client_id),
        equipment_id: Set(input.equipment_id),
        description: Set(input.description),
        status: Set("open".to_string()),
        total: Set(input.total),
        created_at: Set(chrono::Utc::now()),
    };

    let result = active.insert(db).await?;
    info!("Opened service order {} for client {}", result.id, client_id);
    Ok(result)
}

/// Updates an order's status (`"open"`, `"in_progress"`, `"done"`, `"canceled"`).
///
/// # Errors
/// Returns [`Error::ServiceOrderNotFound`] if the order does not exist and
/// [`Error::Validation`] for an unknown status.
pub async fn update_order_status(
    db: &DatabaseConnection,
    order_id: i64,
    status: &str,
) -> Result<service_order::Model> {
    if !matches!(status, "open" | "in_progress" | "done" | "canceled") {
        return Err(Error::Validation {
            message: "Status de ordem de serviço inválido.".to_string(),
        });
    }

    let existing = ServiceOrder::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::ServiceOrderNotFound { id: order_id })?;

    let mut active: service_order::ActiveModel = existing.into();
    active.status = Set(status.to_string());
    active.update(db).await.map_err(Into::into)
}

/// Replaces an order's editable fields, keeping its status.
///
/// # Errors
/// Same as [`create_order`], plus [`Error::ServiceOrderNotFound`].
pub async fn update_order(
    db: &DatabaseConnection,
    order_id: i64,
    input: ServiceOrderInput,
) -> Result<service_order::Model> {
    validate_total(input.total)?;

    let existing = ServiceOrder::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::ServiceOrderNotFound { id: order_id })?;

    if let Some(equipment_id) = input.equipment_id {
        Equipment::find_by_id(equipment_id)
            .one(db)
            .await?
            .ok_or(Error::EquipmentNotFound { id: equipment_id })?;
    }

    let mut active: service_order::ActiveModel = existing.into();
    active.equipment_id = Set(input.equipment_id);
    active.description = Set(input.description);
    active.total = Set(input.total);
    active.update(db).await.map_err(Into::into)
}

/// Deletes a service order.
///
/// # Errors
/// Returns [`Error::ServiceOrderNotFound`] if the order does not exist.
pub async fn delete_order(db: &DatabaseConnection, order_id: i64) -> Result<()> {
    let result = ServiceOrder::delete_by_id(order_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::ServiceOrderNotFound { id: order_id });
    }
    Ok(())
}

fn validate_total(total: f64) -> Result<()> {
    if total < 0.0 || !total.is_finite() {
        return Err(Error::Validation {
            message: "O valor total deve ser positivo.".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_order_numbering_and_status_flow() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Alice").await?;

        let first = create_order(
            &db,
            client.id,
            ServiceOrderInput {
                description: Some("Troca de óleo".to_string()),
                total: 150.0,
                ..ServiceOrderInput::default()
            },
        )
        .await?;
        let second = create_order(&db, client.id, ServiceOrderInput::default()).await?;
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.status, "open");

        let updated = update_order_status(&db, first.id, "done").await?;
        assert_eq!(updated.status, "done");

        let bad = update_order_status(&db, first.id, "archived").await;
        assert!(matches!(bad, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_order_references_are_checked() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Alice").await?;

        let no_client = create_order(&db, 99, ServiceOrderInput::default()).await;
        assert!(matches!(no_client, Err(Error::ClientNotFound { id: 99 })));

        let no_equipment = create_order(
            &db,
            client.id,
            ServiceOrderInput {
                equipment_id: Some(77),
                ..ServiceOrderInput::default()
            },
        )
        .await;
        assert!(matches!(
            no_equipment,
            Err(Error::EquipmentNotFound { id: 77 })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_orders_joined_with_clients() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Transportes Silva").await?;
        create_order(&db, client.id, ServiceOrderInput::default()).await?;

        let rows = get_orders_with_clients(&db).await?;
        assert_eq!(rows.len(), 1);
        let (order, joined_client) = &rows[0];
        assert_eq!(order.client_id, client.id);
        assert_eq!(joined_client.as_ref().unwrap().name, "Transportes Silva");

        Ok(())
    }
}
