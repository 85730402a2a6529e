//! Inspection wizard state machine.
//!
//! The add/edit inspection flow is a fixed six-step linear sequence:
//! client → equipment → category → checklist type → inspection type → groups.
//! This module models it as a plain struct with deterministic transition
//! functions so the flow is unit-testable without a UI harness. The
//! presentation layer owns fetching (equipment per client on entering step 2,
//! checklist types per category on entering step 4) and the final submit
//! (`core::inspection::create_inspection`); everything the user can get wrong
//! is validated here, including the group/characteristic toggles the original
//! screens only guarded by hiding buttons.

use crate::entities::checklist_type::ChecklistGroup;
use crate::entities::inspection::SelectedGroup;
use crate::errors::Error;
use thiserror::Error;

/// Service category tags a checklist type can belong to. Fixed set; step 3 of
/// the wizard picks one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceCategory {
    Maintenance,
    OperationalTraining,
    Receiving,
    Programming,
    Installation,
}

impl ServiceCategory {
    /// Every category, in the order the selection screen lists them.
    pub const ALL: [ServiceCategory; 5] = [
        ServiceCategory::Maintenance,
        ServiceCategory::OperationalTraining,
        ServiceCategory::Receiving,
        ServiceCategory::Programming,
        ServiceCategory::Installation,
    ];

    /// Stable string form stored on checklist types.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceCategory::Maintenance => "maintenance",
            ServiceCategory::OperationalTraining => "operational_training",
            ServiceCategory::Receiving => "receiving",
            ServiceCategory::Programming => "programming",
            ServiceCategory::Installation => "installation",
        }
    }

    /// Parses the stored string form; `None` for anything outside the set.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// Whether the wizard produces an inspection record or a training record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectionKind {
    Inspection,
    Training,
}

impl InspectionKind {
    /// Stable string form stored on inspections.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InspectionKind::Inspection => "inspection",
            InspectionKind::Training => "training",
        }
    }

    /// Parses the stored string form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "inspection" => Some(InspectionKind::Inspection),
            "training" => Some(InspectionKind::Training),
            _ => None,
        }
    }
}

/// The six wizard steps, strictly linear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    SelectClient,
    SelectEquipment,
    SelectCategory,
    SelectChecklistType,
    SelectInspectionType,
    SelectGroups,
}

impl WizardStep {
    /// 1-based step number shown in the progress header.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            WizardStep::SelectClient => 1,
            WizardStep::SelectEquipment => 2,
            WizardStep::SelectCategory => 3,
            WizardStep::SelectChecklistType => 4,
            WizardStep::SelectInspectionType => 5,
            WizardStep::SelectGroups => 6,
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            WizardStep::SelectClient => Some(WizardStep::SelectEquipment),
            WizardStep::SelectEquipment => Some(WizardStep::SelectCategory),
            WizardStep::SelectCategory => Some(WizardStep::SelectChecklistType),
            WizardStep::SelectChecklistType => Some(WizardStep::SelectInspectionType),
            WizardStep::SelectInspectionType => Some(WizardStep::SelectGroups),
            WizardStep::SelectGroups => None,
        }
    }

    fn prev(self) -> Option<Self> {
        match self {
            WizardStep::SelectClient => None,
            WizardStep::SelectEquipment => Some(WizardStep::SelectClient),
            WizardStep::SelectCategory => Some(WizardStep::SelectEquipment),
            WizardStep::SelectChecklistType => Some(WizardStep::SelectCategory),
            WizardStep::SelectInspectionType => Some(WizardStep::SelectChecklistType),
            WizardStep::SelectGroups => Some(WizardStep::SelectInspectionType),
        }
    }
}

/// Inline validation messages, in the operator's language.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Selecione um cliente para continuar.")]
    ClientRequired,
    #[error("Selecione um equipamento para continuar.")]
    EquipmentRequired,
    #[error("Selecione uma categoria para continuar.")]
    CategoryRequired,
    #[error("Selecione um tipo de checklist para continuar.")]
    ChecklistTypeRequired,
    #[error("Selecione o tipo de inspeção para continuar.")]
    InspectionTypeRequired,
    #[error("Selecione ao menos um grupo do checklist.")]
    GroupsRequired,
    #[error("Conclua as etapas do assistente antes de enviar.")]
    NotOnFinalStep,
    #[error("O grupo '{name}' não existe no checklist selecionado.")]
    UnknownGroup { name: String },
    #[error("O grupo '{name}' não está selecionado.")]
    GroupNotSelected { name: String },
    #[error("A característica '{characteristic}' não existe no grupo '{group}'.")]
    UnknownCharacteristic { group: String, characteristic: String },
}

impl From<WizardError> for Error {
    fn from(value: WizardError) -> Self {
        Error::Validation {
            message: value.to_string(),
        }
    }
}

/// Everything the wizard has collected so far. All state is transient,
/// in-memory until the final submit; nothing is persisted between steps.
#[derive(Debug, Clone, Default)]
pub struct WizardSelections {
    /// Step 1: chosen client
    pub client_id: Option<i64>,
    /// Step 2: chosen equipment
    pub equipment_id: Option<i64>,
    /// Step 3: chosen service category
    pub category: Option<ServiceCategory>,
    /// Step 4: chosen checklist type
    pub checklist_type_id: Option<i64>,
    /// Template groups of the chosen checklist type, cached for toggling
    pub checklist_groups: Vec<ChecklistGroup>,
    /// Step 5: inspection or training
    pub kind: Option<InspectionKind>,
    /// Step 6: groups the inspector selected
    pub selected_groups: Vec<SelectedGroup>,
}

/// The wizard controller: current step, collected selections, and the
/// validation message for the last rejected transition.
#[derive(Debug, Clone)]
pub struct WizardState {
    /// Step currently shown
    pub step: WizardStep,
    /// Selections collected so far
    pub selections: WizardSelections,
    /// Message for the last rejected `advance`/submit, cleared on success
    pub validation_error: Option<WizardError>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    /// A fresh wizard at step 1 with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        WizardState {
            step: WizardStep::SelectClient,
            selections: WizardSelections::default(),
            validation_error: None,
        }
    }

    /// Records the chosen client. Picking a different client drops the
    /// equipment selection, whose candidate list depends on the client.
    pub fn select_client(&mut self, client_id: i64) {
        if self.selections.client_id != Some(client_id) {
            self.selections.equipment_id = None;
        }
        self.selections.client_id = Some(client_id);
    }

    /// Records the chosen equipment.
    pub fn select_equipment(&mut self, equipment_id: i64) {
        self.selections.equipment_id = Some(equipment_id);
    }

    /// Records the chosen category. Picking a different category drops the
    /// checklist type (step 4's candidates depend on step 3) and any group
    /// selection derived from it.
    pub fn select_category(&mut self, category: ServiceCategory) {
        if self.selections.category != Some(category) {
            self.selections.checklist_type_id = None;
            self.selections.checklist_groups.clear();
            self.selections.selected_groups.clear();
        }
        self.selections.category = Some(category);
    }

    /// Records the chosen checklist type together with its template groups.
    /// Switching templates drops the group selection.
    pub fn select_checklist_type(&mut self, checklist_type_id: i64, groups: Vec<ChecklistGroup>) {
        if self.selections.checklist_type_id != Some(checklist_type_id) {
            self.selections.selected_groups.clear();
        }
        self.selections.checklist_type_id = Some(checklist_type_id);
        self.selections.checklist_groups = groups;
    }

    /// Records whether this is an inspection or a training.
    pub fn select_kind(&mut self, kind: InspectionKind) {
        self.selections.kind = Some(kind);
    }

    /// Moves to the next step if the current one has its required selection,
    /// returning whether the wizard moved. On a missing selection it stays
    /// put, records the validation message, and returns `false`; it never
    /// silently advances. At the final step there is nowhere to go, so it
    /// returns `false` (submission goes through [`Self::validate_submit`]).
    pub fn advance(&mut self) -> bool {
        let missing = match self.step {
            WizardStep::SelectClient if self.selections.client_id.is_none() => {
                Some(WizardError::ClientRequired)
            }
            WizardStep::SelectEquipment if self.selections.equipment_id.is_none() => {
                Some(WizardError::EquipmentRequired)
            }
            WizardStep::SelectCategory if self.selections.category.is_none() => {
                Some(WizardError::CategoryRequired)
            }
            WizardStep::SelectChecklistType if self.selections.checklist_type_id.is_none() => {
                Some(WizardError::ChecklistTypeRequired)
            }
            WizardStep::SelectInspectionType if self.selections.kind.is_none() => {
                Some(WizardError::InspectionTypeRequired)
            }
            _ => None,
        };

        if let Some(error) = missing {
            self.validation_error = Some(error);
            return false;
        }

        self.validation_error = None;
        match self.step.next() {
            Some(next) => {
                self.step = next;
                true
            }
            None => false,
        }
    }

    /// Moves back one step (no-op at step 1). Retreating from step 3 clears
    /// the category and checklist-type selections: step 4's candidate list
    /// depends on the category and would otherwise go stale.
    pub fn retreat(&mut self) {
        if self.step == WizardStep::SelectCategory {
            self.selections.category = None;
            self.selections.checklist_type_id = None;
            self.selections.checklist_groups.clear();
            self.selections.selected_groups.clear();
        }
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        self.validation_error = None;
    }

    /// Selects or deselects a template group. Selecting copies the group with
    /// an empty tick list; deselecting removes it entirely.
    ///
    /// # Errors
    /// [`WizardError::UnknownGroup`] if the chosen checklist type has no group
    /// by that name.
    pub fn toggle_group(&mut self, name: &str) -> Result<(), WizardError> {
        if let Some(position) = self
            .selections
            .selected_groups
            .iter()
            .position(|g| g.name == name)
        {
            self.selections.selected_groups.remove(position);
            return Ok(());
        }

        let template = self
            .selections
            .checklist_groups
            .iter()
            .find(|g| g.name == name)
            .ok_or_else(|| WizardError::UnknownGroup {
                name: name.to_string(),
            })?;

        self.selections.selected_groups.push(SelectedGroup {
            name: template.name.clone(),
            characteristics: template.characteristics.clone(),
            selected_characteristics: Vec::new(),
        });
        Ok(())
    }

    /// Ticks or unticks a characteristic inside a selected group. The group
    /// must already be selected and the characteristic must exist in its
    /// template; the original screens only guaranteed this by construction of
    /// the UI, here it is enforced.
    ///
    /// # Errors
    /// [`WizardError::GroupNotSelected`] or
    /// [`WizardError::UnknownCharacteristic`].
    pub fn toggle_characteristic(
        &mut self,
        group_name: &str,
        characteristic: &str,
    ) -> Result<(), WizardError> {
        let group = self
            .selections
            .selected_groups
            .iter_mut()
            .find(|g| g.name == group_name)
            .ok_or_else(|| WizardError::GroupNotSelected {
                name: group_name.to_string(),
            })?;

        if !group.characteristics.iter().any(|c| c == characteristic) {
            return Err(WizardError::UnknownCharacteristic {
                group: group_name.to_string(),
                characteristic: characteristic.to_string(),
            });
        }

        if let Some(position) = group
            .selected_characteristics
            .iter()
            .position(|c| c == characteristic)
        {
            group.selected_characteristics.remove(position);
        } else {
            group
                .selected_characteristics
                .push(characteristic.to_string());
        }
        Ok(())
    }

    /// Checks the submit precondition: the wizard is on the final step and at
    /// least one group is selected. The two failures are distinct so callers
    /// cannot mistake an out-of-place submit for an empty selection. Records
    /// the message on failure, like `advance`.
    pub fn validate_submit(&mut self) -> Result<(), WizardError> {
        let failed = if self.step != WizardStep::SelectGroups {
            Some(WizardError::NotOnFinalStep)
        } else if self.selections.selected_groups.is_empty() {
            Some(WizardError::GroupsRequired)
        } else {
            None
        };

        if let Some(error) = failed {
            self.validation_error = Some(error.clone());
            return Err(error);
        }
        self.validation_error = None;
        Ok(())
    }
}
