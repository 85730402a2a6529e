//! Checklist type (template) business logic.
//!
//! Step 4 of the inspection wizard lists templates filtered by the service
//! category chosen at step 3, via [`get_checklist_types_for_category`].

use crate::{
    core::counter,
    core::wizard::ServiceCategory,
    entities::checklist_type::{ChecklistGroup, ChecklistGroups},
    entities::{ChecklistType, checklist_type},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Retrieves all checklist types ordered by name.
pub async fn get_all_checklist_types(
    db: &DatabaseConnection,
) -> Result<Vec<checklist_type::Model>> {
    ChecklistType::find()
        .order_by_asc(checklist_type::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the checklist types belonging to a service category, ordered by
/// name.
pub async fn get_checklist_types_for_category(
    db: &DatabaseConnection,
    category: ServiceCategory,
) -> Result<Vec<checklist_type::Model>> {
    ChecklistType::find()
        .filter(checklist_type::Column::Category.eq(category.as_str()))
        .order_by_asc(checklist_type::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a checklist type by its unique ID.
pub async fn get_checklist_type_by_id(
    db: &DatabaseConnection,
    checklist_type_id: i64,
) -> Result<Option<checklist_type::Model>> {
    ChecklistType::find_by_id(checklist_type_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a checklist template.
///
/// # Errors
/// Returns [`Error::Validation`] if the name is empty, no groups are given,
/// or any group has an empty name or no characteristics.
pub async fn create_checklist_type(
    db: &DatabaseConnection,
    name: String,
    category: ServiceCategory,
    groups: Vec<ChecklistGroup>,
) -> Result<checklist_type::Model> {
    validate_template(&name, &groups)?;

    let id = counter::next_number(db, counter::CHECKLIST_TYPES).await?;

    let active = checklist_type::ActiveModel {
        id: Set(id),
        name: Set(name.trim().to_string()),
        category: Set(category.as_str().to_string()),
        groups: Set(ChecklistGroups(groups)),
    };

    let result = active.insert(db).await?;
    info!(
        "Created checklist type '{}' (id {}) in {}",
        result.name,
        result.id,
        result.category
    );
    Ok(result)
}

/// Replaces a template's name and groups.
///
/// # Errors
/// Same validation as [`create_checklist_type`], plus
/// [`Error::ChecklistTypeNotFound`].
pub async fn update_checklist_type(
    db: &DatabaseConnection,
    checklist_type_id: i64,
    name: String,
    groups: Vec<ChecklistGroup>,
) -> Result<checklist_type::Model> {
    validate_template(&name, &groups)?;

    let existing = ChecklistType::find_by_id(checklist_type_id)
        .one(db)
        .await?
        .ok_or(Error::ChecklistTypeNotFound {
            id: checklist_type_id,
        })?;

    let mut active: checklist_type::ActiveModel = existing.into();
    active.name = Set(name.trim().to_string());
    active.groups = Set(ChecklistGroups(groups));
    active.update(db).await.map_err(Into::into)
}

/// Deletes a checklist template.
///
/// # Errors
/// Returns [`Error::ChecklistTypeNotFound`] if the template does not exist.
pub async fn delete_checklist_type(
    db: &DatabaseConnection,
    checklist_type_id: i64,
) -> Result<()> {
    let result = ChecklistType::delete_by_id(checklist_type_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::ChecklistTypeNotFound {
            id: checklist_type_id,
        });
    }
    Ok(())
}

fn validate_template(name: &str, groups: &[ChecklistGroup]) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Informe o nome do tipo de checklist.".to_string(),
        });
    }
    if groups.is_empty() {
        return Err(Error::Validation {
            message: "O checklist deve ter ao menos um grupo.".to_string(),
        });
    }
    for group in groups {
        if group.name.trim().is_empty() {
            return Err(Error::Validation {
                message: "Todo grupo do checklist precisa de um nome.".to_string(),
            });
        }
        if group.characteristics.is_empty() {
            return Err(Error::Validation {
                message: format!(
                    "O grupo '{}' precisa de ao menos uma característica.",
                    group.name
                ),
            });
        }
    }
    Ok(())
}
