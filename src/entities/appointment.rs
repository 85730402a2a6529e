//! Appointment entity - Scheduled visits booked through the storefront.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Appointment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "appointments")]
pub struct Model {
    /// Unique identifier, issued by the shared counter
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Client the appointment belongs to
    pub client_id: i64,
    /// Requested service (free text)
    pub service: String,
    /// When the visit is scheduled for
    pub scheduled_for: DateTimeUtc,
    /// Appointment status: `"scheduled"`, `"confirmed"`, `"done"` or `"canceled"`
    pub status: String,
    /// When the appointment was booked
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Appointment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each appointment belongs to one client
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
