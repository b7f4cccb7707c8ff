#![doc = include_str!("../../docs/cli_usage.md")]

use std::fmt::Write as FmtWrite;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use serde_json::Value;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use dynaform::{
    DocumentFormat, DynamicForm, FormCatalog, OutputDestination, OutputOptions, catalog_schema,
    parse_catalog, parse_document_str,
};

#[derive(Debug, Parser)]
#[command(
    name = "dynaform",
    version,
    about = "Fill in typed forms in the terminal and manage the submitted entries"
)]
struct Cli {
    /// Catalog spec: file path, inline payload, or "-" for stdin (built-in catalog when absent)
    #[arg(short = 'c', long = "catalog", value_name = "SPEC")]
    catalog: Option<String>,

    /// Title shown at the top of the UI
    #[arg(long = "title", value_name = "TEXT")]
    title: Option<String>,

    /// Output destinations ("-" writes to stdout). Accepts multiple values per flag use.
    #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append)]
    outputs: Vec<String>,

    /// Emit compact JSON/TOML rather than pretty formatting
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// Overwrite output files even if they already exist
    #[arg(short = 'f', long = "force", short_alias = 'y', alias = "yes")]
    force: bool,

    /// Write diagnostics to this file; nothing is logged otherwise
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "dynaform=trace"
    #[arg(long = "log-level", value_name = "FILTER", default_value = "info")]
    log_level: String,

    /// Print the JSON Schema for catalog documents and exit
    #[arg(long = "print-catalog-schema")]
    print_catalog_schema: bool,

    /// Print the effective catalog as JSON and exit
    #[arg(long = "print-catalog")]
    print_catalog: bool,
}

#[derive(Debug)]
enum InputSource {
    File(PathBuf),
    Stdin,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if cli.print_catalog_schema {
        println!("{}", serde_json::to_string_pretty(&catalog_schema())?);
        return Ok(());
    }

    let mut diagnostics = DiagnosticCollector::default();

    let catalog_spec = cli.catalog.as_deref();
    let catalog_hint = resolve_format_hint(catalog_spec, &mut diagnostics);
    let catalog = load_catalog(
        catalog_spec,
        catalog_hint.hint.format,
        catalog_hint.blocked,
        &mut diagnostics,
    );

    if cli.print_catalog {
        diagnostics.into_result()?;
        let catalog = catalog.unwrap_or_else(FormCatalog::builtin);
        println!("{}", serde_json::to_string_pretty(&catalog.to_document())?);
        return Ok(());
    }

    let (output_settings, output_paths) =
        build_output_options(&cli, catalog_hint.hint.extension_value(), &mut diagnostics);
    ensure_output_paths_available(&output_paths, cli.force, &mut diagnostics);

    diagnostics.into_result()?;

    let _log_guard = match cli.log_file.as_deref() {
        Some(path) => Some(setup_file_logging(path, &cli.log_level)?),
        None => None,
    };

    let mut form = DynamicForm::new(catalog.unwrap_or_else(FormCatalog::builtin));
    if let Some(title) = cli.title.as_ref() {
        form = form.with_title(title.clone());
    }
    if let Some(options) = output_settings {
        form = form.with_output(options);
    }

    let store = form.run().map_err(Report::msg)?;
    if cli.outputs.is_empty() {
        eprintln!("{} entries submitted (pass -o to export them)", store.total());
    }

    Ok(())
}

/// Routes `tracing` output to `path`; the terminal belongs to the UI.
fn setup_file_logging(path: &Path, filter: &str) -> Result<WorkerGuard> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_new(filter)
        .wrap_err_with(|| format!("invalid --log-level filter '{filter}'"))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    Ok(guard)
}

#[derive(Debug, Clone, Copy)]
struct FormatHint {
    format: DocumentFormat,
    from_extension: bool,
}

impl Default for FormatHint {
    fn default() -> Self {
        Self {
            format: DocumentFormat::default(),
            from_extension: false,
        }
    }
}

impl FormatHint {
    fn extension_value(&self) -> Option<DocumentFormat> {
        self.from_extension.then_some(self.format)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct FormatResolution {
    hint: FormatHint,
    blocked: bool,
}

fn resolve_format_hint(
    spec: Option<&str>,
    diagnostics: &mut DiagnosticCollector,
) -> FormatResolution {
    let Some(path) = spec.filter(|spec| *spec != "-") else {
        return FormatResolution::default();
    };
    match probe_format_from_extension(Path::new(path)) {
        ExtensionFormat::Known(format) => FormatResolution {
            hint: FormatHint {
                format,
                from_extension: true,
            },
            blocked: false,
        },
        ExtensionFormat::UnsupportedFeature {
            format_name,
            feature_flag,
        } => {
            diagnostics.push_input(format!(
                "catalog '{path}' requires {format_name} support, but this build lacks the '{feature_flag}' feature"
            ));
            FormatResolution {
                hint: FormatHint::default(),
                blocked: true,
            }
        }
        ExtensionFormat::Unknown => FormatResolution::default(),
    }
}

fn load_catalog(
    spec: Option<&str>,
    format: DocumentFormat,
    skip: bool,
    diagnostics: &mut DiagnosticCollector,
) -> Option<FormCatalog> {
    if skip {
        return None;
    }
    let raw = spec?;
    let value = match load_value(raw, format) {
        Ok(value) => value,
        Err(err) => {
            diagnostics.push_input(err.to_string());
            return None;
        }
    };
    match parse_catalog(&value) {
        Ok(catalog) => Some(catalog),
        Err(err) => {
            diagnostics.push_input(err.to_string());
            None
        }
    }
}

fn load_value(spec: &str, format: DocumentFormat) -> Result<Value> {
    if spec == "-" {
        let contents = read_from_source(&InputSource::Stdin)?;
        return parse_contents(&contents, format, "catalog");
    }

    let path = PathBuf::from(spec);
    if !path.exists() {
        return parse_contents(spec, format, "inline catalog");
    }
    let contents = read_from_source(&InputSource::File(path.clone()))
        .wrap_err_with(|| format!("failed to load catalog from {}", path.display()))?;
    parse_contents(&contents, format, "catalog")
}

fn read_from_source(source: &InputSource) -> Result<String> {
    match source {
        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .wrap_err("failed to read from stdin")?;
            Ok(buffer)
        }
        InputSource::File(path) => fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read file {}", path.display())),
    }
}

/// Tries `format` first, then every other compiled-in format.
fn parse_contents(contents: &str, format: DocumentFormat, label: &str) -> Result<Value> {
    match parse_document_str(contents, format) {
        Ok(value) => Ok(value),
        Err(primary) => {
            for candidate in DocumentFormat::available_formats() {
                if candidate == format {
                    continue;
                }
                if let Ok(value) = parse_document_str(contents, candidate) {
                    return Ok(value);
                }
            }
            Err(eyre!(
                "failed to parse {label}: tried {} (first error: {primary})",
                format_list()
            ))
        }
    }
}

fn format_list() -> String {
    DocumentFormat::available_formats()
        .into_iter()
        .map(|fmt| fmt.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Default)]
struct DiagnosticCollector {
    messages: Vec<String>,
}

impl DiagnosticCollector {
    fn push_input(&mut self, message: impl Into<String>) {
        self.messages
            .push(format!("input (catalog): {}", message.into()));
    }

    fn push_output(&mut self, message: impl Into<String>) {
        self.messages.push(format!("output: {}", message.into()));
    }

    fn len(&self) -> usize {
        self.messages.len()
    }

    fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let mut body = String::from("encountered input/output issues:\n");
        for (idx, msg) in self.messages.iter().enumerate() {
            let _ = writeln!(body, "  {}. {}", idx + 1, msg);
        }
        Err(eyre!(body))
    }
}

fn build_output_options(
    cli: &Cli,
    catalog_hint: Option<DocumentFormat>,
    diagnostics: &mut DiagnosticCollector,
) -> (Option<OutputOptions>, Vec<PathBuf>) {
    let mut destinations = Vec::new();
    for raw in &cli.outputs {
        if raw.trim().is_empty() {
            diagnostics.push_output("output destination cannot be empty");
            continue;
        }
        if raw == "-" {
            destinations.push(OutputDestination::Stdout);
        } else {
            destinations.push(OutputDestination::file(raw));
        }
    }

    if destinations.is_empty() {
        return (None, Vec::new());
    }

    let file_paths: Vec<PathBuf> = destinations
        .iter()
        .filter_map(|dest| match dest {
            OutputDestination::File(path) => Some(path.clone()),
            OutputDestination::Stdout => None,
        })
        .collect();

    let start = diagnostics.len();
    let format = if file_paths.is_empty() {
        catalog_hint.unwrap_or_default()
    } else {
        infer_format_from_files(&file_paths, diagnostics).unwrap_or_default()
    };

    if diagnostics.len() > start {
        return (None, file_paths);
    }

    (
        Some(
            OutputOptions::new(format)
                .with_pretty(!cli.no_pretty)
                .with_destinations(destinations),
        ),
        file_paths,
    )
}

fn infer_format_from_files(
    file_paths: &[PathBuf],
    diagnostics: &mut DiagnosticCollector,
) -> Option<DocumentFormat> {
    let mut detected: Option<DocumentFormat> = None;
    for path in file_paths {
        match probe_format_from_extension(path) {
            ExtensionFormat::Known(format) => match detected {
                Some(existing) if existing != format => diagnostics.push_output(format!(
                    "output file {} uses {format} but other destinations use {existing}; align extensions",
                    path.display()
                )),
                Some(_) => {}
                None => detected = Some(format),
            },
            ExtensionFormat::UnsupportedFeature {
                format_name,
                feature_flag,
            } => diagnostics.push_output(format!(
                "output file {} requires {format_name} support, but this build was compiled without the '{feature_flag}' feature",
                path.display()
            )),
            ExtensionFormat::Unknown => diagnostics.push_output(format!(
                "cannot infer format from output file {}; use .json/.yaml/.toml",
                path.display()
            )),
        }
    }
    detected
}

fn probe_format_from_extension(path: &Path) -> ExtensionFormat {
    let Some(ext) = path.extension() else {
        return ExtensionFormat::Unknown;
    };
    let normalized = ext.to_string_lossy().to_ascii_lowercase();
    match normalized.as_str() {
        "json" => ExtensionFormat::Known(DocumentFormat::Json),
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => ExtensionFormat::Known(DocumentFormat::Yaml),
        #[cfg(not(feature = "yaml"))]
        "yaml" | "yml" => ExtensionFormat::UnsupportedFeature {
            format_name: "yaml",
            feature_flag: "yaml",
        },
        #[cfg(feature = "toml")]
        "toml" => ExtensionFormat::Known(DocumentFormat::Toml),
        #[cfg(not(feature = "toml"))]
        "toml" => ExtensionFormat::UnsupportedFeature {
            format_name: "toml",
            feature_flag: "toml",
        },
        _ => ExtensionFormat::Unknown,
    }
}

#[derive(Debug)]
enum ExtensionFormat {
    Known(DocumentFormat),
    #[allow(dead_code)]
    UnsupportedFeature {
        format_name: &'static str,
        feature_flag: &'static str,
    },
    Unknown,
}

fn ensure_output_paths_available(
    paths: &[PathBuf],
    force: bool,
    diagnostics: &mut DiagnosticCollector,
) {
    if force {
        return;
    }
    for path in paths {
        if path.exists() {
            diagnostics.push_output(format!(
                "file {} already exists (pass --force to overwrite)",
                path.display()
            ));
        }
    }
}
