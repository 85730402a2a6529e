//! Shared numbering sequences for registry ids and order numbers.
//!
//! Each collection ("parts", "inspections", ...) has one counter row; ids are
//! handed out sequentially from 1. The increment is a plain read-then-write,
//! NOT wrapped in a transaction: this mirrors the legacy numbering scheme the
//! rest of the system grew around, where two concurrent creations can observe
//! the same value and collide. Single-operator sessions (the actual usage
//! pattern) always see a gapless sequence.

use crate::{
    entities::{Counter, counter},
    errors::Result,
};
use sea_orm::{ConnectionTrait, Set, prelude::*};
use tracing::{debug, instrument};

/// Counter key for client ids.
pub const CLIENTS: &str = "clients";
/// Counter key for equipment ids.
pub const EQUIPMENT: &str = "equipment";
/// Counter key for category ids.
pub const CATEGORIES: &str = "categories";
/// Counter key for part ids.
pub const PARTS: &str = "parts";
/// Counter key for service order numbers.
pub const SERVICE_ORDERS: &str = "service_orders";
/// Counter key for appointment ids.
pub const APPOINTMENTS: &str = "appointments";
/// Counter key for checklist type ids.
pub const CHECKLIST_TYPES: &str = "checklist_types";
/// Counter key for inspection ids.
pub const INSPECTIONS: &str = "inspections";

/// Reads the current value for `key` (0 when the counter does not exist yet),
/// writes `value + 1` back, and returns `value + 1` as the new id.
#[instrument(skip(db))]
pub async fn next_number<C>(db: &C, key: &str) -> Result<i64>
where
    C: ConnectionTrait,
{
    let current = Counter::find_by_id(key.to_string()).one(db).await?;

    let next = match current {
        Some(row) => {
            let next = row.value + 1;
            let mut active: counter::ActiveModel = row.into();
            active.value = Set(next);
            active.update(db).await?;
            next
        }
        None => {
            let active = counter::ActiveModel {
                key: Set(key.to_string()),
                value: Set(1),
            };
            active.insert(db).await?;
            1
        }
    };

    debug!("Issued number {} for '{}'", next, key);
    Ok(next)
}

/// Reads the current value for `key` without incrementing (0 when absent).
pub async fn current_value<C>(db: &C, key: &str) -> Result<i64>
where
    C: ConnectionTrait,
{
    Ok(Counter::find_by_id(key.to_string())
        .one(db)
        .await?
        .map_or(0, |row| row.value))
}
