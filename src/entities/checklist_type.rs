//! Checklist type entity - Templates for inspections.
//!
//! A checklist type belongs to a service category and carries a list of named
//! groups, each with its characteristic strings. The inspection wizard derives
//! an inspection's `selected_groups` from this template by user selection.

use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// One named group of characteristics inside a checklist template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ChecklistGroup {
    /// Group label (e.g. "Sistema hidráulico")
    pub name: String,
    /// The characteristics an inspector may tick for this group
    pub characteristics: Vec<String>,
}

/// JSON-backed list of template groups.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ChecklistGroups(pub Vec<ChecklistGroup>);

/// Checklist type database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "checklist_types")]
pub struct Model {
    /// Unique identifier, issued by the shared counter
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Template label shown at step 4 of the wizard
    pub name: String,
    /// Service category tag this template applies to (see `core::wizard::ServiceCategory`)
    pub category: String,
    /// Template groups, stored as JSON
    pub groups: ChecklistGroups,
}

/// Defines relationships between ChecklistType and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One template backs many inspections
    #[sea_orm(has_many = "super::inspection::Entity")]
    Inspections,
}

impl Related<super::inspection::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inspections.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
