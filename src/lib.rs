#![deny(rust_2018_idioms)]

mod app;
mod domain;
pub mod form;
pub mod io;
mod presentation;

pub use app::{DynamicForm, UiOptions};
pub use domain::{
    CatalogDocument, CatalogError, FieldDescriptor, FieldDocument, FieldKind, FormCatalog,
    FormDocument, catalog_schema, parse_catalog, parse_catalog_document,
};
pub use form::{
    Draft, EditCursor, FormCommand, FormEngine, FormError, FormState, MissingField, Notice,
    Record, Selection, SubmissionStore,
};
pub use io::{
    DocumentFormat,
    input::{catalog_from_path, catalog_from_str, parse_document_str},
    output::{OutputDestination, OutputOptions, emit},
};

pub mod prelude {
    pub use super::{DynamicForm, FormCatalog, OutputOptions, SubmissionStore, UiOptions};
}
