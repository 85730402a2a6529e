//! Service order entity - A repair/maintenance job opened for a client.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Service order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_orders")]
pub struct Model {
    /// Order number, issued by the shared counter
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Client the order was opened for
    pub client_id: i64,
    /// Equipment being serviced, if any
    pub equipment_id: Option<i64>,
    /// Free-text description of the requested work
    pub description: Option<String>,
    /// Order status: `"open"`, `"in_progress"`, `"done"` or `"canceled"`
    pub status: String,
    /// Total value in BRL
    pub total: f64,
    /// When the order was opened
    pub created_at: DateTimeUtc,
}

/// Defines relationships between ServiceOrder and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to one client
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
    /// Each order may reference one piece of equipment
    #[sea_orm(
        belongs_to = "super::equipment::Entity",
        from = "Column::EquipmentId",
        to = "super::equipment::Column::Id"
    )]
    Equipment,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::equipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Equipment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
