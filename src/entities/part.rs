//! Part entity - A catalog item with price and optional category tags.
//!
//! `category_name` and `subcategory_name` are denormalized copies of the
//! referenced category names so listings render without a join. They are ""
//! whenever the matching id is unset, and `core::category` rewrites them when
//! categories are renamed or deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Part database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parts")]
pub struct Model {
    /// Unique identifier, issued by the shared counter
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Internal part code shown on orders and exports
    pub code: String,
    /// Unit price in BRL
    pub price: f64,
    /// Optional free-text description
    pub description: Option<String>,
    /// Referenced top-level category id, if tagged
    pub category_id: Option<i64>,
    /// Denormalized category name ("" when untagged)
    pub category_name: String,
    /// Referenced subcategory id, if tagged
    pub subcategory_id: Option<i64>,
    /// Denormalized subcategory name ("" when untagged)
    pub subcategory_name: String,
    /// Optional base64-encoded product image
    pub image: Option<String>,
    /// When the part was created
    pub created_at: DateTimeUtc,
    /// When the part was last modified
    pub last_update: DateTimeUtc,
}

/// Defines relationships between Part and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each tagged part references one top-level category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
