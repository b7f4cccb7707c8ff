use tracing::{debug, info, warn};

use crate::domain::FormCatalog;

use super::{
    actions::FormCommand,
    error::FormError,
    notice::Notice,
    state::{Draft, EditCursor, FormState, Selection},
};

/// Applies one [`FormCommand`] at a time to a [`FormState`].
pub struct FormEngine<'a> {
    state: &'a mut FormState,
    catalog: &'a FormCatalog,
}

impl<'a> FormEngine<'a> {
    pub fn new(state: &'a mut FormState, catalog: &'a FormCatalog) -> Self {
        Self { state, catalog }
    }

    /// Returns the notice to show when the command changed the store.
    /// A failed command leaves the state exactly as it was.
    pub fn dispatch(&mut self, command: FormCommand) -> Result<Option<Notice>, FormError> {
        match command {
            FormCommand::SelectType(form_type) => {
                self.select(form_type);
                Ok(None)
            }
            FormCommand::SetField { name, value } => {
                self.set_field(name, value);
                Ok(None)
            }
            FormCommand::Submit => self.submit(),
            FormCommand::EditRecord { form_type, index } => {
                self.begin_edit(form_type, index)?;
                Ok(None)
            }
            FormCommand::DeleteRecord { form_type, index } => {
                self.delete(&form_type, index).map(Some)
            }
        }
    }

    fn select(&mut self, form_type: Option<String>) {
        debug!(form_type = form_type.as_deref().unwrap_or(""), "form type selected");
        self.state.selection = Selection::load(self.catalog, form_type);
        self.state.draft.clear();
        self.state.cursor = EditCursor::Idle;
    }

    fn set_field(&mut self, name: String, value: String) {
        if self.state.selection.field(&name).is_none() {
            debug!(field = %name, "ignoring value for a field outside the current form");
            return;
        }
        self.state.draft.set(name, value);
    }

    fn submit(&mut self) -> Result<Option<Notice>, FormError> {
        let missing = self.state.missing_required();
        if !missing.is_empty() {
            let form_type = self
                .state
                .selection
                .form_type()
                .unwrap_or_default()
                .to_string();
            warn!(
                form_type = %form_type,
                missing = missing.len(),
                "submission refused: required fields are empty"
            );
            return Err(FormError::MissingRequired {
                form_type,
                fields: missing,
            });
        }

        let record = self.state.draft.to_record(self.state.selection.fields());
        if let Some((form_type, index)) = self.state.cursor.target() {
            let form_type = form_type.to_string();
            self.state.store.replace(&form_type, index, record)?;
            self.state.cursor = EditCursor::Idle;
            self.state.draft.clear();
            info!(form_type = %form_type, index, "entry updated");
            return Ok(Some(Notice::Saved));
        }

        let notice = match self.state.selection.form_type() {
            Some(form_type) => {
                let index = self.state.store.append(form_type, record);
                info!(form_type, index, "entry submitted");
                Some(Notice::Submitted)
            }
            None => None,
        };
        self.state.draft.clear();
        Ok(notice)
    }

    fn begin_edit(&mut self, form_type: String, index: usize) -> Result<(), FormError> {
        let Some(record) = self.state.store.get(&form_type, index) else {
            return Err(FormError::RecordNotFound { form_type, index });
        };
        let draft = Draft::from_record(record);
        debug!(form_type = %form_type, index, "editing entry");
        self.state.selection = Selection::load(self.catalog, Some(form_type.clone()));
        self.state.draft = draft;
        self.state.cursor = EditCursor::Editing { form_type, index };
        Ok(())
    }

    fn delete(&mut self, form_type: &str, index: usize) -> Result<Notice, FormError> {
        self.state.store.remove(form_type, index)?;
        self.realign_cursor(form_type, index);
        info!(form_type, index, "entry deleted");
        Ok(Notice::Deleted)
    }

    /// Keeps an open edit pointed at the same record after a removal from its list.
    fn realign_cursor(&mut self, form_type: &str, removed: usize) {
        let EditCursor::Editing {
            form_type: editing,
            index,
        } = &mut self.state.cursor
        else {
            return;
        };
        if editing.as_str() != form_type {
            return;
        }
        if removed < *index {
            *index -= 1;
        } else if removed == *index {
            debug!(form_type, removed, "entry under edit was deleted; draft kept as new entry");
            self.state.cursor = EditCursor::Idle;
        }
    }
}
