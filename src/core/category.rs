//! Category business logic and referential-integrity maintenance.
//!
//! Parts carry denormalized copies of their category and subcategory names so
//! list screens render without a join. The price of that denormalization is
//! paid here: renaming a category rewrites the matching name on every
//! referencing part, and deleting one clears the references (cascading through
//! subcategories for a top-level delete). Each rename/delete runs inside a
//! single database transaction so a failure never leaves parts pointing at a
//! renamed or missing category.

use crate::{
    core::counter,
    entities::{Category, Part, category, part},
    errors::{Error, Result},
};
use sea_orm::sea_query::Expr;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Retrieves all categories, top-level and subcategories alike, ordered by name.
pub async fn get_all_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves only top-level categories, ordered by name.
pub async fn get_top_level_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .filter(category::Column::ParentId.is_null())
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the subcategories of a top-level category, ordered by name.
pub async fn get_subcategories(
    db: &DatabaseConnection,
    parent_id: i64,
) -> Result<Vec<category::Model>> {
    Category::find()
        .filter(category::Column::ParentId.eq(parent_id))
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a category by its unique ID.
pub async fn get_category_by_id(
    db: &DatabaseConnection,
    category_id: i64,
) -> Result<Option<category::Model>> {
    Category::find_by_id(category_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new top-level category.
///
/// # Errors
/// Returns [`Error::Validation`] if the name is empty or whitespace-only.
pub async fn create_category(
    db: &DatabaseConnection,
    name: String,
    description: Option<String>,
) -> Result<category::Model> {
    insert_category(db, name, description, None).await
}

/// Creates a subcategory under an existing top-level category.
///
/// # Errors
/// Returns [`Error::CategoryNotFound`] if the parent does not exist and
/// [`Error::Validation`] if it is itself a subcategory (only two levels are
/// modeled).
pub async fn create_subcategory(
    db: &DatabaseConnection,
    name: String,
    description: Option<String>,
    parent_id: i64,
) -> Result<category::Model> {
    let parent = Category::find_by_id(parent_id)
        .one(db)
        .await?
        .ok_or(Error::CategoryNotFound { id: parent_id })?;

    if !parent.is_top_level() {
        return Err(Error::Validation {
            message: "Uma subcategoria deve pertencer a uma categoria principal.".to_string(),
        });
    }

    insert_category(db, name, description, Some(parent_id)).await
}

async fn insert_category(
    db: &DatabaseConnection,
    name: String,
    description: Option<String>,
    parent_id: Option<i64>,
) -> Result<category::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Informe o nome da categoria.".to_string(),
        });
    }

    let id = counter::next_number(db, counter::CATEGORIES).await?;

    let active = category::ActiveModel {
        id: Set(id),
        name: Set(name.trim().to_string()),
        description: Set(description),
        parent_id: Set(parent_id),
    };

    let result = active.insert(db).await?;
    info!(
        "Created {} '{}' (id {})",
        if result.is_top_level() { "category" } else { "subcategory" },
        result.name,
        result.id
    );
    Ok(result)
}

/// Renames a category and propagates the new name to the denormalized
/// `category_name`/`subcategory_name` field on every referencing part.
///
/// The category update and all part updates commit as one transaction: either
/// every copy of the name changes or none does.
///
/// # Errors
/// Returns [`Error::Validation`] for an empty name and
/// [`Error::CategoryNotFound`] if the category does not exist.
#[instrument(skip(db, new_name))]
pub async fn rename_category(
    db: &DatabaseConnection,
    category_id: i64,
    new_name: String,
) -> Result<category::Model> {
    let new_name = new_name.trim().to_string();
    if new_name.is_empty() {
        return Err(Error::Validation {
            message: "Informe o nome da categoria.".to_string(),
        });
    }

    let txn = db.begin().await?;

    let existing = Category::find_by_id(category_id)
        .one(&txn)
        .await?
        .ok_or(Error::CategoryNotFound { id: category_id })?;
    let is_top_level = existing.is_top_level();

    let mut active: category::ActiveModel = existing.into();
    active.name = Set(new_name.clone());
    let renamed = active.update(&txn).await?;

    // A top-level rename touches category_name; a subcategory rename touches
    // subcategory_name. A part never references the same id in both fields.
    let updated = if is_top_level {
        Part::update_many()
            .col_expr(part::Column::CategoryName, Expr::value(new_name.clone()))
            .filter(part::Column::CategoryId.eq(category_id))
            .exec(&txn)
            .await?
    } else {
        Part::update_many()
            .col_expr(part::Column::SubcategoryName, Expr::value(new_name.clone()))
            .filter(part::Column::SubcategoryId.eq(category_id))
            .exec(&txn)
            .await?
    };

    txn.commit().await?;
    info!(
        "Renamed category {} to '{}', rewrote {} part(s)",
        category_id, new_name, updated.rows_affected
    );
    Ok(renamed)
}

/// Deletes a category, cascading through its references.
///
/// Top-level case: every part referencing the category loses all four
/// category fields (a part cannot keep a subcategory once its parent is
/// gone), every part referencing one of its subcategories loses the
/// subcategory fields, the subcategories are deleted, then the category
/// itself. Subcategory case: only the subcategory fields are cleared on
/// referencing parts before the row is deleted.
///
/// All field-clears and deletes for one call commit as a single transaction;
/// a failure aborts the whole deletion rather than leaving orphaned
/// references.
///
/// # Errors
/// Returns [`Error::CategoryNotFound`] if the category does not exist.
#[instrument(skip(db))]
pub async fn delete_category(db: &DatabaseConnection, category_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let existing = Category::find_by_id(category_id)
        .one(&txn)
        .await?
        .ok_or(Error::CategoryNotFound { id: category_id })?;

    if existing.is_top_level() {
        // Parts tagged with this category drop every category field, including
        // the subcategory ones (their subcategory, if any, is a child of this
        // category and goes away below).
        Part::update_many()
            .col_expr(part::Column::CategoryId, Expr::value(Option::<i64>::None))
            .col_expr(part::Column::CategoryName, Expr::value(String::new()))
            .col_expr(part::Column::SubcategoryId, Expr::value(Option::<i64>::None))
            .col_expr(part::Column::SubcategoryName, Expr::value(String::new()))
            .filter(part::Column::CategoryId.eq(category_id))
            .exec(&txn)
            .await?;

        let subcategories = Category::find()
            .filter(category::Column::ParentId.eq(category_id))
            .all(&txn)
            .await?;

        for sub in subcategories {
            clear_subcategory_refs(&txn, sub.id).await?;
            Category::delete_by_id(sub.id).exec(&txn).await?;
        }
    } else {
        clear_subcategory_refs(&txn, category_id).await?;
    }

    Category::delete_by_id(category_id).exec(&txn).await?;

    txn.commit().await?;
    info!("Deleted category {} ('{}')", category_id, existing.name);
    Ok(())
}

/// Clears only the subcategory reference and denormalized name on parts
/// pointing at `subcategory_id`. The parts keep their top-level tag.
async fn clear_subcategory_refs<C>(db: &C, subcategory_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    Part::update_many()
        .col_expr(part::Column::SubcategoryId, Expr::value(Option::<i64>::None))
        .col_expr(part::Column::SubcategoryName, Expr::value(String::new()))
        .filter(part::Column::SubcategoryId.eq(subcategory_id))
        .exec(db)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::part::{NewPart, create_part, get_part_by_id};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_category_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_category(&db, "   ".to_string(), None).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_subcategory_requires_top_level_parent() -> Result<()> {
        let db = setup_test_db().await?;
        let parent = create_test_category(&db, "Motores").await?;
        let sub = create_test_subcategory(&db, "Pistões", parent.id).await?;

        // A subcategory cannot itself be a parent
        let nested = create_subcategory(&db, "Anéis".to_string(), None, sub.id).await;
        assert!(matches!(nested, Err(Error::Validation { .. })));

        // Parent must exist
        let orphan = create_subcategory(&db, "Anéis".to_string(), None, 999).await;
        assert!(matches!(orphan, Err(Error::CategoryNotFound { id: 999 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_rename_top_level_propagates_to_parts() -> Result<()> {
        let db = setup_test_db().await?;
        let cat = create_test_category(&db, "Hidráulica").await?;

        let p1 = create_test_part_in(&db, "Mangueira", "MG1", cat.id, None).await?;
        let p2 = create_test_part_in(&db, "Bomba", "BB1", cat.id, None).await?;
        let untagged = create_test_part(&db, "Parafuso", "PF1").await?;

        rename_category(&db, cat.id, "Sistema Hidráulico".to_string()).await?;

        for id in [p1.id, p2.id] {
            let part = get_part_by_id(&db, id).await?.unwrap();
            assert_eq!(part.category_name, "Sistema Hidráulico");
            assert_eq!(part.category_id, Some(cat.id));
        }
        let part = get_part_by_id(&db, untagged.id).await?.unwrap();
        assert_eq!(part.category_name, "");

        Ok(())
    }

    #[tokio::test]
    async fn test_rename_subcategory_propagates_to_parts() -> Result<()> {
        let db = setup_test_db().await?;
        let cat = create_test_category(&db, "Filtros").await?;
        let sub = create_test_subcategory(&db, "Filtros de Ar", cat.id).await?;

        let p = create_test_part_in(&db, "Filtro K&N", "FK1", cat.id, Some(sub.id)).await?;

        rename_category(&db, sub.id, "Filtros de Ar Esportivos".to_string()).await?;

        let part = get_part_by_id(&db, p.id).await?.unwrap();
        assert_eq!(part.subcategory_name, "Filtros de Ar Esportivos");
        // The top-level copy is untouched
        assert_eq!(part.category_name, "Filtros");

        Ok(())
    }

    #[tokio::test]
    async fn test_rename_empty_name_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let cat = create_test_category(&db, "Elétrica").await?;

        let result = rename_category(&db, cat.id, "  ".to_string()).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let unchanged = get_category_by_id(&db, cat.id).await?.unwrap();
        assert_eq!(unchanged.name, "Elétrica");
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_top_level_cascades() -> Result<()> {
        let db = setup_test_db().await?;
        let cat = create_test_category(&db, "Transmissão").await?;
        let s1 = create_test_subcategory(&db, "Embreagens", cat.id).await?;
        let s2 = create_test_subcategory(&db, "Câmbios", cat.id).await?;
        let other = create_test_category(&db, "Freios").await?;

        // Parts referencing the category directly and via each subcategory
        let direct = create_test_part_in(&db, "Cardan", "CD1", cat.id, None).await?;
        let via_s1 = create_test_part_in(&db, "Platô", "PL1", cat.id, Some(s1.id)).await?;
        let via_s2 = create_test_part_in(&db, "Sincronizador", "SC1", cat.id, Some(s2.id)).await?;
        let unrelated = create_test_part_in(&db, "Pastilha", "PS1", other.id, None).await?;

        delete_category(&db, cat.id).await?;

        // The category and both subcategories are gone
        assert!(get_category_by_id(&db, cat.id).await?.is_none());
        assert!(get_category_by_id(&db, s1.id).await?.is_none());
        assert!(get_category_by_id(&db, s2.id).await?.is_none());

        // Every part that referenced the tree lost all four category fields
        for id in [direct.id, via_s1.id, via_s2.id] {
            let part = get_part_by_id(&db, id).await?.unwrap();
            assert!(part.category_id.is_none());
            assert_eq!(part.category_name, "");
            assert!(part.subcategory_id.is_none());
            assert_eq!(part.subcategory_name, "");
        }

        // Parts in other categories are untouched
        let part = get_part_by_id(&db, unrelated.id).await?.unwrap();
        assert_eq!(part.category_id, Some(other.id));
        assert_eq!(part.category_name, "Freios");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_subcategory_does_not_cascade_to_siblings() -> Result<()> {
        let db = setup_test_db().await?;
        let cat = create_test_category(&db, "Suspensão").await?;
        let s1 = create_test_subcategory(&db, "Amortecedores", cat.id).await?;
        let s2 = create_test_subcategory(&db, "Molas", cat.id).await?;

        let via_s1 = create_test_part_in(&db, "Amortecedor D", "AD1", cat.id, Some(s1.id)).await?;
        let via_s2 = create_test_part_in(&db, "Mola T", "MT1", cat.id, Some(s2.id)).await?;
        let direct = create_test_part_in(&db, "Bandeja", "BJ1", cat.id, None).await?;

        delete_category(&db, s1.id).await?;

        assert!(get_category_by_id(&db, s1.id).await?.is_none());
        assert!(get_category_by_id(&db, s2.id).await?.is_some());
        assert!(get_category_by_id(&db, cat.id).await?.is_some());

        // Only the subcategory fields of parts pointing at s1 are cleared
        let part = get_part_by_id(&db, via_s1.id).await?.unwrap();
        assert!(part.subcategory_id.is_none());
        assert_eq!(part.subcategory_name, "");
        assert_eq!(part.category_id, Some(cat.id));
        assert_eq!(part.category_name, "Suspensão");

        // Sibling and direct references are untouched
        let part = get_part_by_id(&db, via_s2.id).await?.unwrap();
        assert_eq!(part.subcategory_id, Some(s2.id));
        assert_eq!(part.subcategory_name, "Molas");
        let part = get_part_by_id(&db, direct.id).await?.unwrap();
        assert_eq!(part.category_id, Some(cat.id));

        Ok(())
    }

    #[tokio::test]
    async fn test_full_category_part_lifecycle() -> Result<()> {
        let db = setup_test_db().await?;

        let filtros = create_category(&db, "Filtros".to_string(), None).await?;
        let oleo =
            create_subcategory(&db, "Filtros de Óleo".to_string(), None, filtros.id).await?;

        let part = create_part(
            &db,
            NewPart {
                name: "Filtro X".to_string(),
                code: "FX1".to_string(),
                price: 10.0,
                description: None,
                category_id: Some(filtros.id),
                subcategory_id: Some(oleo.id),
                image: None,
            },
        )
        .await?;
        assert_eq!(part.category_name, "Filtros");
        assert_eq!(part.subcategory_name, "Filtros de Óleo");

        rename_category(&db, oleo.id, "Filtros de Óleo Premium".to_string()).await?;
        let part = get_part_by_id(&db, part.id).await?.unwrap();
        assert_eq!(part.subcategory_name, "Filtros de Óleo Premium");

        delete_category(&db, filtros.id).await?;
        let part = get_part_by_id(&db, part.id).await?.unwrap();
        assert!(part.category_id.is_none());
        assert_eq!(part.category_name, "");
        assert!(part.subcategory_id.is_none());
        assert_eq!(part.subcategory_name, "");
        assert!(get_category_by_id(&db, oleo.id).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_listing_accessors() -> Result<()> {
        let db = setup_test_db().await?;
        let cat = create_test_category(&db, "Motor").await?;
        create_test_subcategory(&db, "Velas", cat.id).await?;
        create_test_subcategory(&db, "Correias", cat.id).await?;
        create_test_category(&db, "Arrefecimento").await?;

        let all = get_all_categories(&db).await?;
        assert_eq!(all.len(), 4);

        let top = get_top_level_categories(&db).await?;
        assert_eq!(top.len(), 2);
        // Ordered by name
        assert_eq!(top[0].name, "Arrefecimento");

        let subs = get_subcategories(&db, cat.id).await?;
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].name, "Correias");

        Ok(())
    }
}
