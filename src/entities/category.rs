//! Category entity - Two-level tagging hierarchy for parts.
//!
//! A row with `parent_id == None` is a top-level category; a row pointing at
//! another category's id is a subcategory. No deeper nesting is modeled.
//! Parts carry denormalized copies of these names, kept consistent by
//! `core::category`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier, issued by the shared counter
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Display name, copied onto referencing parts
    pub name: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// Parent category id; None for top-level categories
    pub parent_id: Option<i64>,
}

impl Model {
    /// Whether this row is a top-level category (as opposed to a subcategory).
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Subcategories reference their parent category
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id"
    )]
    Parent,
}

impl ActiveModelBehavior for ActiveModel {}
