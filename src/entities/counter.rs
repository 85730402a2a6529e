//! Counter entity - Shared per-collection number sequences.
//!
//! One row per collection key ("parts", "inspections", ...). See
//! `core::counter` for the (deliberately untransactional) increment scheme.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Counter database model - one numeric sequence per collection
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "counters")]
pub struct Model {
    /// Collection key this counter numbers (e.g. `"parts"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Last number handed out; the next id is `value + 1`
    pub value: i64,
}

/// `Counter` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
