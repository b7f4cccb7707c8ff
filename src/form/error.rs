use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingField {
    pub name: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("please fill in the required fields: {}", labels(.fields))]
    MissingRequired {
        form_type: String,
        fields: Vec<MissingField>,
    },
    #[error("no {form_type} entry at position {}", .index + 1)]
    RecordNotFound { form_type: String, index: usize },
}

impl FormError {
    pub fn missing_fields(&self) -> &[MissingField] {
        match self {
            FormError::MissingRequired { fields, .. } => fields,
            FormError::RecordNotFound { .. } => &[],
        }
    }
}

fn labels(fields: &[MissingField]) -> String {
    fields
        .iter()
        .map(|field| field.label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
