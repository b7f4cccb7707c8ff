use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde_json::Value;

use super::DocumentFormat;
use crate::domain::{FormCatalog, parse_catalog};

/// Parse structured data in any supported format into a `serde_json::Value`.
pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(contents).with_context(|| "failed to parse JSON document")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(contents).with_context(|| "failed to parse YAML document")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => toml::from_str::<toml::Table>(contents)
            .with_context(|| "failed to parse TOML document")
            .and_then(|value| {
                serde_json::to_value(value).context("failed to convert TOML to JSON")
            }),
    }
}

/// Build a form catalog from a document in the given format.
pub fn catalog_from_str(contents: &str, format: DocumentFormat) -> Result<FormCatalog> {
    let value = parse_document_str(contents, format)?;
    parse_catalog(&value).context("invalid form catalog")
}

/// Read a catalog file, picking the format from its extension (JSON when unknown).
pub fn catalog_from_path(path: impl AsRef<Path>) -> Result<FormCatalog> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file {}", path.display()))?;
    let format = format_from_path(path).unwrap_or_default();
    catalog_from_str(&contents, format)
        .with_context(|| format!("failed to load catalog from {}", path.display()))
}

/// Format implied by a file extension, if this build supports it.
pub fn format_from_path(path: &Path) -> Option<DocumentFormat> {
    let ext = path.extension()?.to_string_lossy().to_ascii_lowercase();
    match ext.as_str() {
        "json" => Some(DocumentFormat::Json),
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => Some(DocumentFormat::Yaml),
        #[cfg(feature = "toml")]
        "toml" => Some(DocumentFormat::Toml),
        _ => None,
    }
}
