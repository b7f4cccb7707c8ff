use crate::form::SubmissionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Form,
    Table,
}

/// Focusable rows of the form pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSlot {
    TypeSelector,
    Field(usize),
    SubmitButton,
}

/// Focus position in both panes. Table rows are counted across all tables.
#[derive(Debug, Clone, Default)]
pub(crate) struct FocusState {
    pub(crate) pane: Pane,
    form_index: usize,
    table_row: usize,
}

impl FocusState {
    /// The form only shows fields and the button once a type with fields is chosen.
    fn slot_count(field_count: usize) -> usize {
        if field_count == 0 { 1 } else { field_count + 2 }
    }

    pub(crate) fn form_slot(&self, field_count: usize) -> FormSlot {
        let index = self.form_index.min(Self::slot_count(field_count) - 1);
        match index {
            0 => FormSlot::TypeSelector,
            i if i <= field_count => FormSlot::Field(i - 1),
            _ => FormSlot::SubmitButton,
        }
    }

    pub(crate) fn table_row(&self) -> usize {
        self.table_row
    }

    pub(crate) fn step(&mut self, delta: i32, field_count: usize, row_count: usize) {
        match self.pane {
            Pane::Form => {
                self.form_index = wrap(self.form_index, delta, Self::slot_count(field_count));
            }
            Pane::Table => self.table_row = wrap(self.table_row, delta, row_count),
        }
    }

    pub(crate) fn focus_field(&mut self, index: usize) {
        self.pane = Pane::Form;
        self.form_index = index + 1;
    }

    pub(crate) fn focus_selector(&mut self) {
        self.pane = Pane::Form;
        self.form_index = 0;
    }

    /// Keeps both positions inside the current bounds.
    pub(crate) fn clamp(&mut self, field_count: usize, row_count: usize) {
        self.form_index = self.form_index.min(Self::slot_count(field_count) - 1);
        if row_count == 0 {
            self.table_row = 0;
            self.pane = Pane::Form;
        } else {
            self.table_row = self.table_row.min(row_count - 1);
        }
    }
}

fn wrap(current: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as i64;
    (((current as i64 + delta as i64) % len + len) % len) as usize
}

/// `(form type, index)` for every visible table row, in display order.
pub(crate) fn table_rows(store: &SubmissionStore) -> Vec<(String, usize)> {
    store
        .non_empty()
        .flat_map(|(form_type, records)| {
            (0..records.len()).map(move |index| (form_type.to_string(), index))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_is_the_only_slot_without_fields() {
        let mut focus = FocusState::default();
        focus.step(1, 0, 0);
        assert_eq!(focus.form_slot(0), FormSlot::TypeSelector);
    }

    #[test]
    fn form_focus_wraps_through_fields_and_button() {
        let mut focus = FocusState::default();
        let slots: Vec<_> = (0..5)
            .map(|_| {
                focus.step(1, 3, 0);
                focus.form_slot(3)
            })
            .collect();
        assert_eq!(
            slots,
            [
                FormSlot::Field(0),
                FormSlot::Field(1),
                FormSlot::Field(2),
                FormSlot::SubmitButton,
                FormSlot::TypeSelector,
            ]
        );
        focus.step(-1, 3, 0);
        assert_eq!(focus.form_slot(3), FormSlot::SubmitButton);
    }

    #[test]
    fn clamp_returns_to_form_when_tables_empty() {
        let mut focus = FocusState {
            pane: Pane::Table,
            form_index: 0,
            table_row: 4,
        };
        focus.clamp(3, 2);
        assert_eq!(focus.table_row(), 1);
        focus.clamp(3, 0);
        assert_eq!(focus.pane, Pane::Form);
    }
}
