use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use super::DocumentFormat;

/// Destination for serialized output values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDestination {
    Stdout,
    File(PathBuf),
}

impl OutputDestination {
    pub fn file(path: impl AsRef<Path>) -> Self {
        OutputDestination::File(path.as_ref().to_path_buf())
    }
}

/// Controls how the submitted entries are exported when the UI closes.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: DocumentFormat,
    pub pretty: bool,
    pub destinations: Vec<OutputDestination>,
}

impl OutputOptions {
    pub fn new(format: DocumentFormat) -> Self {
        Self {
            format,
            pretty: true,
            destinations: vec![OutputDestination::Stdout],
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_destinations(mut self, destinations: Vec<OutputDestination>) -> Self {
        self.destinations = destinations;
        self
    }

    pub fn add_destination(mut self, destination: OutputDestination) -> Self {
        self.destinations.push(destination);
        self
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self::new(DocumentFormat::Json)
    }
}

/// Serialize `value` once and write it to every configured destination.
pub fn emit<T: Serialize>(value: &T, options: &OutputOptions) -> Result<()> {
    if options.destinations.is_empty() {
        return Ok(());
    }
    let mut payload = serialize_value(value, options)?;
    if !payload.ends_with('\n') {
        payload.push('\n');
    }
    for destination in &options.destinations {
        match destination {
            OutputDestination::Stdout => write_stdout(&payload)?,
            OutputDestination::File(path) => write_file(path, &payload)?,
        }
    }
    Ok(())
}

/// Text form of `value` in the configured format.
pub fn serialize_value<T: Serialize>(value: &T, options: &OutputOptions) -> Result<String> {
    let text = match (options.format, options.pretty) {
        (DocumentFormat::Json, true) => serde_json::to_string_pretty(value)?,
        (DocumentFormat::Json, false) => serde_json::to_string(value)?,
        #[cfg(feature = "yaml")]
        (DocumentFormat::Yaml, _) => serde_yaml::to_string(value)?,
        #[cfg(feature = "toml")]
        (DocumentFormat::Toml, true) => toml::to_string_pretty(value)?,
        #[cfg(feature = "toml")]
        (DocumentFormat::Toml, false) => toml::to_string(value)?,
    };
    Ok(text)
}

fn write_stdout(payload: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(payload.as_bytes())
        .and_then(|_| stdout.flush())
        .context("failed to write entries to stdout")
}

fn write_file(path: &Path, payload: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(path, payload).with_context(|| format!("failed to write file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Record, SubmissionStore};
    use std::fs;

    fn sample_store() -> SubmissionStore {
        let mut store = SubmissionStore::new();
        let record: Record = [("firstName", "Ada"), ("lastName", "Lovelace")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        store.append("User Information", record);
        store
    }

    #[test]
    fn nothing_written_without_destinations() {
        let options = OutputOptions::default().with_destinations(Vec::new());
        emit(&sample_store(), &options).expect("noop");
    }

    #[test]
    fn added_destinations_follow_stdout() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("entries.json");
        let options = OutputOptions::default()
            .with_pretty(false)
            .add_destination(OutputDestination::file(&path));
        assert_eq!(
            options.destinations,
            [OutputDestination::Stdout, OutputDestination::file(&path)]
        );
        emit(&sample_store(), &options).expect("emit");
        let contents = fs::read_to_string(&path).expect("read back");
        assert_eq!(
            contents,
            "{\"User Information\":[{\"firstName\":\"Ada\",\"lastName\":\"Lovelace\"}]}\n"
        );
    }

    #[test]
    fn compact_json_keeps_field_order() {
        let options = OutputOptions::default().with_pretty(false);
        let payload = serialize_value(&sample_store(), &options).expect("serialize");
        assert_eq!(
            payload,
            r#"{"User Information":[{"firstName":"Ada","lastName":"Lovelace"}]}"#
        );
    }

    #[test]
    fn file_destination_creates_missing_directories() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("exports").join("entries.json");
        let options =
            OutputOptions::default().with_destinations(vec![OutputDestination::file(&path)]);
        emit(&sample_store(), &options).expect("emit");
        let contents = fs::read_to_string(&path).expect("read back");
        assert!(contents.contains("\"Lovelace\""));
        assert!(contents.ends_with("}\n"));
    }
}
