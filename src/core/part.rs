//! Part catalog business logic.
//!
//! Create/update resolve the denormalized `category_name`/`subcategory_name`
//! copies from the category registry and enforce that a subcategory tag
//! always sits under the part's top-level tag. Keeping those copies fresh
//! afterwards is `core::category`'s job.

use crate::{
    core::counter,
    entities::{Category, Part, part},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Input for creating a part. Category tags are optional; names are resolved
/// from the registry, never supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct NewPart {
    /// Display name
    pub name: String,
    /// Internal part code
    pub code: String,
    /// Unit price in BRL
    pub price: f64,
    /// Optional free-text description
    pub description: Option<String>,
    /// Top-level category tag
    pub category_id: Option<i64>,
    /// Subcategory tag; requires `category_id` to be its parent
    pub subcategory_id: Option<i64>,
    /// Optional base64-encoded image
    pub image: Option<String>,
}

/// Retrieves all parts ordered alphabetically by name.
pub async fn get_all_parts(db: &DatabaseConnection) -> Result<Vec<part::Model>> {
    Part::find()
        .order_by_asc(part::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the parts tagged with a top-level category, ordered by name.
pub async fn get_parts_by_category(
    db: &DatabaseConnection,
    category_id: i64,
) -> Result<Vec<part::Model>> {
    Part::find()
        .filter(part::Column::CategoryId.eq(category_id))
        .order_by_asc(part::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a part by its unique ID.
pub async fn get_part_by_id(db: &DatabaseConnection, part_id: i64) -> Result<Option<part::Model>> {
    Part::find_by_id(part_id).one(db).await.map_err(Into::into)
}

/// Finds a part by its internal code.
pub async fn get_part_by_code(
    db: &DatabaseConnection,
    code: &str,
) -> Result<Option<part::Model>> {
    Part::find()
        .filter(part::Column::Code.eq(code))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new part, resolving and storing the denormalized category names.
///
/// # Errors
/// Returns [`Error::Validation`] if the name or code is empty, the price is
/// negative or not finite, or the subcategory does not belong to the given
/// category; [`Error::CategoryNotFound`] if a referenced category is missing.
#[instrument(skip(db, new_part))]
pub async fn create_part(db: &DatabaseConnection, new_part: NewPart) -> Result<part::Model> {
    validate_part_fields(&new_part.name, &new_part.code, new_part.price)?;

    let (category_id, category_name, subcategory_id, subcategory_name) =
        resolve_category_refs(db, new_part.category_id, new_part.subcategory_id).await?;

    let id = counter::next_number(db, counter::PARTS).await?;
    let now = chrono::Utc::now();

    let active = part::ActiveModel {
        id: Set(id),
        name: Set(new_part.name.trim().to_string()),
        code: Set(new_part.code.trim().to_string()),
        price: Set(new_part.price),
        description: Set(new_part.description),
        category_id: Set(category_id),
        category_name: Set(category_name),
        subcategory_id: Set(subcategory_id),
        subcategory_name: Set(subcategory_name),
        image: Set(new_part.image),
        created_at: Set(now),
        last_update: Set(now),
    };

    let result = active.insert(db).await?;
    info!("Created part '{}' (id {})", result.name, result.id);
    Ok(result)
}

/// Replaces a part's editable fields, re-resolving the denormalized category
/// names, and refreshes `last_update`.
///
/// # Errors
/// Same validation as [`create_part`], plus [`Error::PartNotFound`].
#[instrument(skip(db, update))]
pub async fn update_part(
    db: &DatabaseConnection,
    part_id: i64,
    update: NewPart,
) -> Result<part::Model> {
    validate_part_fields(&update.name, &update.code, update.price)?;

    let existing = Part::find_by_id(part_id)
        .one(db)
        .await?
        .ok_or(Error::PartNotFound { id: part_id })?;

    let (category_id, category_name, subcategory_id, subcategory_name) =
        resolve_category_refs(db, update.category_id, update.subcategory_id).await?;

    let mut active: part::ActiveModel = existing.into();
    active.name = Set(update.name.trim().to_string());
    active.code = Set(update.code.trim().to_string());
    active.price = Set(update.price);
    active.description = Set(update.description);
    active.category_id = Set(category_id);
    active.category_name = Set(category_name);
    active.subcategory_id = Set(subcategory_id);
    active.subcategory_name = Set(subcategory_name);
    active.image = Set(update.image);
    active.last_update = Set(chrono::Utc::now());

    active.update(db).await.map_err(Into::into)
}

/// Deletes a part.
///
/// # Errors
/// Returns [`Error::PartNotFound`] if the part does not exist.
pub async fn delete_part(db: &DatabaseConnection, part_id: i64) -> Result<()> {
    let result = Part::delete_by_id(part_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::PartNotFound { id: part_id });
    }
    Ok(())
}

fn validate_part_fields(name: &str, code: &str, price: f64) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Informe o nome da peça.".to_string(),
        });
    }
    if code.trim().is_empty() {
        return Err(Error::Validation {
            message: "Informe o código da peça.".to_string(),
        });
    }
    if price < 0.0 || !price.is_finite() {
        return Err(Error::Validation {
            message: "O preço deve ser um valor positivo.".to_string(),
        });
    }
    Ok(())
}

/// Resolves the denormalized names for a category/subcategory pair and
/// enforces the two-level hierarchy: a subcategory tag requires its parent to
/// be the part's top-level tag.
pub(crate) async fn resolve_category_refs<C>(
    db: &C,
    category_id: Option<i64>,
    subcategory_id: Option<i64>,
) -> Result<(Option<i64>, String, Option<i64>, String)>
where
    C: ConnectionTrait,
{
    let (category_id, category_name) = match category_id {
        Some(id) => {
            let category = Category::find_by_id(id)
                .one(db)
                .await?
                .ok_or(Error::CategoryNotFound { id })?;
            if !category.is_top_level() {
                return Err(Error::Validation {
                    message: "A categoria da peça deve ser uma categoria principal.".to_string(),
                });
            }
            (Some(id), category.name)
        }
        None => (None, String::new()),
    };

    let (subcategory_id, subcategory_name) = match subcategory_id {
        Some(id) => {
            let subcategory = Category::find_by_id(id)
                .one(db)
                .await?
                .ok_or(Error::CategoryNotFound { id })?;
            if subcategory.parent_id != category_id || category_id.is_none() {
                return Err(Error::Validation {
                    message: "A subcategoria não pertence à categoria selecionada.".to_string(),
                });
            }
            (Some(id), subcategory.name)
        }
        None => (None, String::new()),
    };

    Ok((category_id, category_name, subcategory_id, subcategory_name))
}
