//! Equipment entity - Machines registered under a client.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Equipment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "equipment")]
pub struct Model {
    /// Unique identifier, issued by the shared counter
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Owning client id
    pub client_id: i64,
    /// Display name (e.g. "Empilhadeira 2.5t")
    pub name: String,
    /// Manufacturer brand
    pub brand: Option<String>,
    /// Model designation
    pub model: Option<String>,
    /// Serial number
    pub serial_number: Option<String>,
    /// When the equipment was registered
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Equipment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each piece of equipment belongs to one client
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
