/// One user event, applied through [`FormEngine::dispatch`](super::FormEngine::dispatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    /// `None` is the "-- Select --" placeholder.
    SelectType(Option<String>),
    SetField {
        name: String,
        value: String,
    },
    Submit,
    EditRecord {
        form_type: String,
        index: usize,
    },
    DeleteRecord {
        form_type: String,
        index: usize,
    },
}

impl FormCommand {
    pub fn select(form_type: impl Into<String>) -> Self {
        FormCommand::SelectType(Some(form_type.into()))
    }

    pub fn set_field(name: impl Into<String>, value: impl Into<String>) -> Self {
        FormCommand::SetField {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn edit(form_type: impl Into<String>, index: usize) -> Self {
        FormCommand::EditRecord {
            form_type: form_type.into(),
            index,
        }
    }

    pub fn delete(form_type: impl Into<String>, index: usize) -> Self {
        FormCommand::DeleteRecord {
            form_type: form_type.into(),
            index,
        }
    }
}
