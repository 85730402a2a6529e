//! Client entity - The customer registry.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Client database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    /// Unique identifier, issued by the shared counter
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
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
    /// When the client was registered
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Client and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One client owns many pieces of equipment
    #[sea_orm(has_many = "super::equipment::Entity")]
    Equipment,
    /// One client has many service orders
    #[sea_orm(has_many = "super::service_order::Entity")]
    ServiceOrders,
    /// One client has many appointments
    #[sea_orm(has_many = "super::appointment::Entity")]
    Appointments,
}

impl Related<super::equipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Equipment.def()
    }
}

impl Related<super::service_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceOrders.def()
    }
}

impl Related<super::appointment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appointments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
