use crate::ui::mvi::Reducer;
use crate::ui::search::intent::SearchFormIntent;
use crate::ui::search::state::{FormField, SearchFormState, MAX_FIELD_LEN};

pub struct SearchFormReducer;

impl Reducer for SearchFormReducer {
    type State = SearchFormState;
    type Intent = SearchFormIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SearchFormIntent::Prefill { patient_id, after } => SearchFormState {
                patient_id,
                after,
                focused: state.focused,
            },
            SearchFormIntent::Insert(ch) => {
                if ch.is_control() {
                    return state;
                }
                let mut state = state;
                let field = focused_field_mut(&mut state);
                if field.chars().count() < MAX_FIELD_LEN {
                    field.push(ch);
                }
                state
            }
            SearchFormIntent::Backspace => {
                let mut state = state;
                focused_field_mut(&mut state).pop();
                state
            }
            SearchFormIntent::ClearField => {
                let mut state = state;
                focused_field_mut(&mut state).clear();
                state
            }
            // Two fields: next and previous both toggle.
            SearchFormIntent::FocusNext | SearchFormIntent::FocusPrev => SearchFormState {
                focused: match state.focused {
                    FormField::PatientId => FormField::After,
                    FormField::After => FormField::PatientId,
                },
                ..state
            },
        }
    }
}

fn focused_field_mut(state: &mut SearchFormState) -> &mut String {
    match state.focused {
        FormField::PatientId => &mut state.patient_id,
        FormField::After => &mut state.after,
    }
}
