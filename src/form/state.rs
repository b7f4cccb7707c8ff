use crate::domain::{FieldDescriptor, FormCatalog};

use super::{
    error::MissingField,
    store::{Record, SubmissionStore},
};

/// The chosen form type and the field list the catalog holds for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    form_type: Option<String>,
    fields: Vec<FieldDescriptor>,
}

impl Selection {
    /// Unknown types select with an empty field list.
    pub fn load(catalog: &FormCatalog, form_type: Option<String>) -> Self {
        let fields = form_type
            .as_deref()
            .and_then(|name| catalog.fields(name))
            .map(<[FieldDescriptor]>::to_vec)
            .unwrap_or_default();
        Self { form_type, fields }
    }

    pub fn form_type(&self) -> Option<&str> {
        self.form_type.as_deref()
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// In-progress values for the visible fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    values: Record,
}

impl Draft {
    pub fn from_record(record: &Record) -> Self {
        Self {
            values: record.clone(),
        }
    }

    /// Absent keys read as the empty string.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &Record {
        &self.values
    }

    /// Keys follow catalog order; keys the user never touched stay absent.
    pub fn to_record(&self, fields: &[FieldDescriptor]) -> Record {
        let mut record = Record::with_capacity(self.values.len());
        for field in fields {
            if let Some(value) = self.values.get(&field.name) {
                record.insert(field.name.clone(), value.clone());
            }
        }
        for (name, value) in &self.values {
            if !record.contains_key(name) {
                record.insert(name.clone(), value.clone());
            }
        }
        record
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditCursor {
    #[default]
    Idle,
    Editing {
        form_type: String,
        index: usize,
    },
}

impl EditCursor {
    pub fn is_editing(&self) -> bool {
        matches!(self, EditCursor::Editing { .. })
    }

    pub fn target(&self) -> Option<(&str, usize)> {
        match self {
            EditCursor::Idle => None,
            EditCursor::Editing { form_type, index } => Some((form_type.as_str(), *index)),
        }
    }
}

/// Everything the widget owns. Only [`FormEngine`](super::FormEngine) mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub(super) selection: Selection,
    pub(super) draft: Draft,
    pub(super) store: SubmissionStore,
    pub(super) cursor: EditCursor,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn store(&self) -> &SubmissionStore {
        &self.store
    }

    pub fn cursor(&self) -> &EditCursor {
        &self.cursor
    }

    pub fn into_store(self) -> SubmissionStore {
        self.store
    }

    pub fn submit_label(&self) -> &'static str {
        if self.cursor.is_editing() {
            "Save Changes"
        } else {
            "Submit"
        }
    }

    /// Required visible fields whose draft value is absent or empty, in catalog order.
    pub fn missing_required(&self) -> Vec<MissingField> {
        self.selection
            .fields()
            .iter()
            .filter(|field| field.required && self.draft.get(&field.name).is_empty())
            .map(|field| MissingField {
                name: field.name.clone(),
                label: field.label.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldKind;

    #[test]
    fn selection_of_unknown_type_has_no_fields() {
        let catalog = FormCatalog::builtin();
        let selection = Selection::load(&catalog, Some("Shipping".into()));
        assert_eq!(selection.form_type(), Some("Shipping"));
        assert!(selection.fields().is_empty());
    }

    #[test]
    fn draft_record_follows_field_order() {
        let fields = vec![
            FieldDescriptor::new("first", FieldKind::Text, "First"),
            FieldDescriptor::new("second", FieldKind::Text, "Second"),
            FieldDescriptor::new("third", FieldKind::Text, "Third"),
        ];
        let mut draft = Draft::default();
        draft.set("third", "3");
        draft.set("first", "1");
        let record = draft.to_record(&fields);
        let keys: Vec<_> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, ["first", "third"]);
    }

    #[test]
    fn whitespace_satisfies_required() {
        let catalog = FormCatalog::builtin();
        let mut state = FormState {
            selection: Selection::load(&catalog, Some("User Information".into())),
            ..FormState::default()
        };
        state.draft.set("firstName", " ");
        state.draft.set("lastName", "");
        let missing: Vec<_> = state
            .missing_required()
            .into_iter()
            .map(|field| field.name)
            .collect();
        assert_eq!(missing, ["lastName"]);
    }
}
