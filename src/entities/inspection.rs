//! Inspection entity - Records which checklist groups/characteristics were
//! selected for a client's equipment.
//!
//! `selected_groups` is a JSON snapshot of the chosen template groups together
//! with the characteristics the inspector ticked; it is assembled once by the
//! wizard and validated against the referenced checklist type on submit.

use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// A template group the inspector selected, with their ticked characteristics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct SelectedGroup {
    /// Group label, matching a group in the checklist type
    pub name: String,
    /// Full characteristic list copied from the template group
    pub characteristics: Vec<String>,
    /// Subset of `characteristics` the inspector ticked
    pub selected_characteristics: Vec<String>,
}

/// JSON-backed list of selected groups.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct SelectedGroups(pub Vec<SelectedGroup>);

/// Inspection database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inspections")]
pub struct Model {
    /// Unique identifier, issued by the shared counter
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Client the inspection was performed for
    pub client_id: i64,
    /// Equipment that was inspected
    pub equipment_id: i64,
    /// Checklist template the selection was derived from
    pub checklist_type_id: i64,
    /// `"inspection"` or `"training"` (see `core::wizard::InspectionKind`)
    pub inspection_type: String,
    /// Groups and characteristics the inspector selected, stored as JSON
    pub selected_groups: SelectedGroups,
    /// Inspection status: `"pending"`, `"done"` or `"canceled"`
    pub status: String,
    /// When the inspection was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Inspection and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each inspection belongs to one client
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
    /// Each inspection targets one piece of equipment
    #[sea_orm(
        belongs_to = "super::equipment::Entity",
        from = "Column::EquipmentId",
        to = "super::equipment::Column::Id"
    )]
    Equipment,
    /// Each inspection is derived from one checklist type
    #[sea_orm(
        belongs_to = "super::checklist_type::Entity",
        from = "Column::ChecklistTypeId",
        to = "super::checklist_type::Column::Id"
    )]
    ChecklistType,
}

impl Related<super::checklist_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChecklistType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
