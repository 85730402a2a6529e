//! Client registry business logic.

use crate::{
    core::counter,
    entities::{Client, client},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Editable client fields, shared by the add and edit forms.
#[derive(Debug, Clone, Default)]
pub struct ClientInput {
    /// Full name or company name
    pub name: String,
    /// Contact e-mail
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// CPF or CNPJ
    pub document: Option<String>,
    /// Street address
    pub address: Option<String>,
}

/// Retrieves all clients ordered alphabetically by name.
pub async fn get_all_clients(db: &DatabaseConnection) -> Result<Vec<client::Model>> {
    Client::find()
        .order_by_asc(client::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a client by its unique ID.
pub async fn get_client_by_id(
    db: &DatabaseConnection,
    client_id: i64,
) -> Result<Option<client::Model>> {
    Client::find_by_id(client_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new client.
///
/// # Errors
/// Returns [`Error::Validation`] if the name is empty.
pub async fn create_client(db: &DatabaseConnection, input: ClientInput) -> Result<client::Model> {
    if input.name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Informe o nome do cliente.".to_string(),
        });
    }

    let id = counter::next_number(db, counter::CLIENTS).await?;

    let active = client::ActiveModel {
        id: Set(id),
        name: Set(input.name.trim().to_string()),
        email: Set(input.email),
        phone: Set(input.phone),
        document: Set(input.document),
        address: Set(input.address),
        created_at: Set(chrono::Utc::now()),
    };

    let result = active.insert(db).await?;
    info!("Registered client '{}' (id {})", result.name, result.id);
    Ok(result)
}

/// Replaces a client's editable fields.
///
/// # Errors
/// Returns [`Error::ClientNotFound`] if the client does not exist and
/// [`Error::Validation`] if the name is empty.
pub async fn update_client(
    db: &DatabaseConnection,
    client_id: i64,
    input: ClientInput,
) -> Result<client::Model> {
    if input.name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Informe o nome do cliente.".to_string(),
        });
    }

    let existing = Client::find_by_id(client_id)
        .one(db)
        .await?
        .ok_or(Error::ClientNotFound { id: client_id })?;

    let mut active: client::ActiveModel = existing.into();
    active.name = Set(input.name.trim().to_string());
    active.email = Set(input.email);
    active.phone = Set(input.phone);
    active.document = Set(input.document);
    active.address = Set(input.address);

    active.update(db).await.map_err(Into::into)
}

/// Deletes a client.
///
/// # Errors
/// Returns [`Error::ClientNotFound`] if the client does not exist.
pub async fn delete_client(db: &DatabaseConnection, client_id: i64) -> Result<()> {
    let result = Client::delete_by_id(client_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::ClientNotFound { id: client_id });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_client_crud() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_client(
            &db,
            ClientInput {
                name: "Transportes Silva".to_string(),
                email: Some("contato@tsilva.com.br".to_string()),
                phone: Some("(11) 99999-0000".to_string()),
                ..ClientInput::default()
            },
        )
        .await?;
        assert_eq!(created.id, 1);

        let updated = update_client(
            &db,
            created.id,
            ClientInput {
                name: "Transportes Silva Ltda".to_string(),
                ..ClientInput::default()
            },
        )
        .await?;
        assert_eq!(updated.name, "Transportes Silva Ltda");
        assert!(updated.email.is_none());

        delete_client(&db, created.id).await?;
        assert!(get_client_by_id(&db, created.id).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_client_requires_name() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_client(&db, ClientInput::default()).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_clients_ordered_by_name() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_client(&db, "Zeca Autopeças").await?;
        create_test_client(&db, "Auto Center Brasil").await?;

        let clients = get_all_clients(&db).await?;
        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].name, "Auto Center Brasil");
        Ok(())
    }
}
