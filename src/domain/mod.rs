mod error;
mod parser;
mod schema;

pub use error::CatalogError;
pub use parser::{
    CatalogDocument, FieldDocument, FormDocument, catalog_schema, parse_catalog,
    parse_catalog_document,
};
pub use schema::{FieldDescriptor, FieldKind, FormCatalog};
