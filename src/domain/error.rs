use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog document does not match the catalog schema:\n  {}", .0.join("\n  "))]
    Schema(Vec<String>),
    #[error("failed to read catalog document: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("form type '{0}' is declared more than once")]
    DuplicateForm(String),
    #[error("form type '{form}' declares field '{field}' more than once")]
    DuplicateField { form: String, field: String },
    #[error("form type '{0}' has no fields")]
    EmptyForm(String),
    #[error("form type name cannot be empty")]
    UnnamedForm,
    #[error("dropdown field '{field}' of '{form}' needs at least one option")]
    MissingOptions { form: String, field: String },
    #[error("field '{field}' of '{form}' is not a dropdown and cannot declare options")]
    UnexpectedOptions { form: String, field: String },
}
