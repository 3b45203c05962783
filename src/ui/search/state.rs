use crate::ui::mvi::UiState;

/// Maximum characters accepted per field.
pub const MAX_FIELD_LEN: usize = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    PatientId,
    After,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFormState {
    pub patient_id: String,
    pub after: String,
    pub focused: FormField,
}

impl UiState for SearchFormState {}

impl SearchFormState {
    pub fn focused_value(&self) -> &str {
        match self.focused {
            FormField::PatientId => &self.patient_id,
            FormField::After => &self.after,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.patient_id.trim().is_empty() && !self.after.trim().is_empty()
    }
}
