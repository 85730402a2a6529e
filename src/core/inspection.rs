//! Inspection business logic: the wizard's submit and edit flows.
//!
//! The wizard (`core::wizard`) collects selections in memory; nothing touches
//! the database until [`create_inspection`]. Submit re-validates the selected
//! groups against the checklist template as stored, so an inspection can
//! never reference a group or characteristic its template does not define,
//! even if the caller bypassed the state machine. On failure the caller keeps
//! its `WizardState` untouched and the operator retries without re-entering
//! earlier steps.

use crate::{
    core::counter,
    core::wizard::{InspectionKind, ServiceCategory, WizardError, WizardState, WizardStep},
    entities::checklist_type::ChecklistGroup,
    entities::inspection::{SelectedGroup, SelectedGroups},
    entities::{ChecklistType, Client, Equipment, Inspection, inspection},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Retrieves all inspections, newest first.
pub async fn get_all_inspections(db: &DatabaseConnection) -> Result<Vec<inspection::Model>> {
    Inspection::find()
        .order_by_desc(inspection::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an inspection by its unique ID.
pub async fn get_inspection_by_id(
    db: &DatabaseConnection,
    inspection_id: i64,
) -> Result<Option<inspection::Model>> {
    Inspection::find_by_id(inspection_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Submits a completed wizard: validates the selections, issues the next
/// inspection number, and writes one inspection row with status `"pending"`.
///
/// # Errors
/// Returns [`Error::Validation`] when a step's selection is missing, no group
/// is selected, or a selected group/characteristic is not in the checklist
/// template; `*NotFound` errors when a referenced row is gone.
#[instrument(skip(db, wizard))]
pub async fn create_inspection(
    db: &DatabaseConnection,
    wizard: &WizardState,
) -> Result<inspection::Model> {
    let (client_id, equipment_id, checklist_type_id, kind, selected_groups) =
        validated_selections(db, wizard).await?;

    let id = counter::next_number(db, counter::INSPECTIONS).await?;

    let active = inspection::ActiveModel {
        id: Set(id),
        client_id: Set(client_id),
        equipment_id: Set(equipment_id),
        checklist_type_id: Set(checklist_type_id),
        inspection_type: Set(kind.as_str().to_string()),
        selected_groups: Set(SelectedGroups(selected_groups)),
        status: Set("pending".to_string()),
        created_at: Set(chrono::Utc::now()),
    };

    let result = active.insert(db).await?;
    info!(
        "Created {} {} for client {}",
        result.inspection_type, result.id, result.client_id
    );
    Ok(result)
}

/// Re-submits an edit wizard over an existing inspection, replacing its
/// selections. Status and creation date are kept.
///
/// # Errors
/// Same as [`create_inspection`], plus [`Error::InspectionNotFound`].
#[instrument(skip(db, wizard))]
pub async fn update_inspection(
    db: &DatabaseConnection,
    inspection_id: i64,
    wizard: &WizardState,
) -> Result<inspection::Model> {
    let (client_id, equipment_id, checklist_type_id, kind, selected_groups) =
        validated_selections(db, wizard).await?;

    let existing = Inspection::find_by_id(inspection_id)
        .one(db)
        .await?
        .ok_or(Error::InspectionNotFound { id: inspection_id })?;

    let mut active: inspection::ActiveModel = existing.into();
    active.client_id = Set(client_id);
    active.equipment_id = Set(equipment_id);
    active.checklist_type_id = Set(checklist_type_id);
    active.inspection_type = Set(kind.as_str().to_string());
    active.selected_groups = Set(SelectedGroups(selected_groups));

    active.update(db).await.map_err(Into::into)
}

/// Marks an inspection `"pending"`, `"done"` or `"canceled"`.
///
/// # Errors
/// Returns [`Error::InspectionNotFound`] if the inspection does not exist and
/// [`Error::Validation`] for an unknown status.
pub async fn update_inspection_status(
    db: &DatabaseConnection,
    inspection_id: i64,
    status: &str,
) -> Result<inspection::Model> {
    if !matches!(status, "pending" | "done" | "canceled") {
        return Err(Error::Validation {
            message: "Status de inspeção inválido.".to_string(),
        });
    }

    let existing = Inspection::find_by_id(inspection_id)
        .one(db)
        .await?
        .ok_or(Error::InspectionNotFound { id: inspection_id })?;

    let mut active: inspection::ActiveModel = existing.into();
    active.status = Set(status.to_string());
    active.update(db).await.map_err(Into::into)
}

/// Deletes an inspection.
///
/// # Errors
/// Returns [`Error::InspectionNotFound`] if the inspection does not exist.
pub async fn delete_inspection(db: &DatabaseConnection, inspection_id: i64) -> Result<()> {
    let result = Inspection::delete_by_id(inspection_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::InspectionNotFound { id: inspection_id });
    }
    Ok(())
}

/// Builds an edit wizard pre-populated from a stored inspection, positioned
/// at the final step so the operator can retreat through the same sequence.
///
/// # Errors
/// Returns [`Error::ChecklistTypeNotFound`] if the inspection's template was
/// deleted and [`Error::Validation`] if its category or type string no longer
/// parses.
pub async fn wizard_for_edit(
    db: &DatabaseConnection,
    stored: &inspection::Model,
) -> Result<WizardState> {
    let template = ChecklistType::find_by_id(stored.checklist_type_id)
        .one(db)
        .await?
        .ok_or(Error::ChecklistTypeNotFound {
            id: stored.checklist_type_id,
        })?;

    let category = ServiceCategory::parse(&template.category).ok_or_else(|| Error::Validation {
        message: "Categoria do checklist desconhecida.".to_string(),
    })?;
    let kind =
        InspectionKind::parse(&stored.inspection_type).ok_or_else(|| Error::Validation {
            message: "Tipo de inspeção desconhecido.".to_string(),
        })?;

    let mut wizard = WizardState::new();
    wizard.select_client(stored.client_id);
    wizard.select_equipment(stored.equipment_id);
    wizard.select_category(category);
    wizard.select_checklist_type(template.id, template.groups.0.clone());
    wizard.select_kind(kind);
    wizard.selections.selected_groups = stored.selected_groups.0.clone();
    wizard.step = WizardStep::SelectGroups;

    Ok(wizard)
}

/// Unpacks and fully validates a wizard's selections: every step present,
/// at least one group, referenced rows still existing, and the selection
/// consistent with the stored template.
async fn validated_selections(
    db: &DatabaseConnection,
    wizard: &WizardState,
) -> Result<(i64, i64, i64, InspectionKind, Vec<SelectedGroup>)> {
    let selections = &wizard.selections;

    let client_id = selections.client_id.ok_or(WizardError::ClientRequired)?;
    let equipment_id = selections
        .equipment_id
        .ok_or(WizardError::EquipmentRequired)?;
    selections.category.ok_or(WizardError::CategoryRequired)?;
    let checklist_type_id = selections
        .checklist_type_id
        .ok_or(WizardError::ChecklistTypeRequired)?;
    let kind = selections.kind.ok_or(WizardError::InspectionTypeRequired)?;

    if selections.selected_groups.is_empty() {
        return Err(WizardError::GroupsRequired.into());
    }

    Client::find_by_id(client_id)
        .one(db)
        .await?
        .ok_or(Error::ClientNotFound { id: client_id })?;
    Equipment::find_by_id(equipment_id)
        .one(db)
        .await?
        .ok_or(Error::EquipmentNotFound { id: equipment_id })?;
    let template = ChecklistType::find_by_id(checklist_type_id)
        .one(db)
        .await?
        .ok_or(Error::ChecklistTypeNotFound {
            id: checklist_type_id,
        })?;

    validate_against_template(&selections.selected_groups, &template.groups.0)?;

    Ok((
        client_id,
        equipment_id,
        checklist_type_id,
        kind,
        selections.selected_groups.clone(),
    ))
}

/// Checks that every selected group exists in the template and every ticked
/// characteristic exists in its template group.
fn validate_against_template(
    selected: &[SelectedGroup],
    template: &[ChecklistGroup],
) -> Result<()> {
    for group in selected {
        let template_group = template
            .iter()
            .find(|g| g.name == group.name)
            .ok_or_else(|| WizardError::UnknownGroup {
                name: group.name.clone(),
            })?;

        for characteristic in &group.selected_characteristics {
            if !template_group
                .characteristics
                .iter()
                .any(|c| c == characteristic)
            {
                return Err(WizardError::UnknownCharacteristic {
                    group: group.name.clone(),
                    characteristic: characteristic.clone(),
                }
                .into());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_submit_with_no_groups_writes_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let mut wizard = setup_wizard_ready_for_groups(&db).await?;

        // No group toggled
        let result = create_inspection(&db, &wizard).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        assert!(get_all_inspections(&db).await?.is_empty());

        // The wizard itself also refuses
        assert!(wizard.validate_submit().is_err());

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_writes_one_inspection() -> Result<()> {
        let db = setup_test_db().await?;
        let mut wizard = setup_wizard_ready_for_groups(&db).await?;

        wizard.toggle_group("Sistema hidráulico").unwrap();
        wizard
            .toggle_characteristic("Sistema hidráulico", "Vazamentos")
            .unwrap();

        let inspection = create_inspection(&db, &wizard).await?;
        assert_eq!(inspection.id, 1);
        assert_eq!(inspection.status, "pending");
        assert_eq!(inspection.inspection_type, "inspection");
        assert_eq!(inspection.selected_groups.0.len(), 1);
        assert_eq!(
            inspection.selected_groups.0[0].selected_characteristics,
            vec!["Vazamentos".to_string()]
        );

        // Submitting does not consume the wizard; numbers keep counting up
        let second = create_inspection(&db, &wizard).await?;
        assert_eq!(second.id, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_rejects_selection_outside_template() -> Result<()> {
        let db = setup_test_db().await?;
        let mut wizard = setup_wizard_ready_for_groups(&db).await?;

        wizard.toggle_group("Elétrica").unwrap();
        // Inject a characteristic the template does not define, bypassing the
        // toggle guard
        wizard.selections.selected_groups[0]
            .selected_characteristics
            .push("Pintura".to_string());

        let result = create_inspection(&db, &wizard).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        assert!(get_all_inspections(&db).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_edit_wizard_prepopulates_and_updates() -> Result<()> {
        let db = setup_test_db().await?;
        let mut wizard = setup_wizard_ready_for_groups(&db).await?;
        wizard.toggle_group("Sistema hidráulico").unwrap();
        let stored = create_inspection(&db, &wizard).await?;

        let mut edit = wizard_for_edit(&db, &stored).await?;
        assert_eq!(edit.step, WizardStep::SelectGroups);
        assert_eq!(edit.selections.client_id, Some(stored.client_id));
        assert_eq!(
            edit.selections.category,
            Some(ServiceCategory::Maintenance)
        );
        assert_eq!(edit.selections.selected_groups.len(), 1);

        // Swap the selection and change the type
        edit.toggle_group("Sistema hidráulico").unwrap();
        edit.toggle_group("Elétrica").unwrap();
        edit.select_kind(InspectionKind::Training);

        let updated = update_inspection(&db, stored.id, &edit).await?;
        assert_eq!(updated.id, stored.id);
        assert_eq!(updated.inspection_type, "training");
        assert_eq!(updated.selected_groups.0[0].name, "Elétrica");
        assert_eq!(updated.created_at, stored.created_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_status_flow_and_delete() -> Result<()> {
        let db = setup_test_db().await?;
        let mut wizard = setup_wizard_ready_for_groups(&db).await?;
        wizard.toggle_group("Elétrica").unwrap();
        let stored = create_inspection(&db, &wizard).await?;

        let done = update_inspection_status(&db, stored.id, "done").await?;
        assert_eq!(done.status, "done");

        let bad = update_inspection_status(&db, stored.id, "archived").await;
        assert!(matches!(bad, Err(Error::Validation { .. })));

        delete_inspection(&db, stored.id).await?;
        assert!(get_inspection_by_id(&db, stored.id).await?.is_none());

        Ok(())
    }
}
