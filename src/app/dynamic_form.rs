use anyhow::{Result, bail};
use tracing::info;

use crate::{
    domain::FormCatalog,
    form::SubmissionStore,
    io::output::{OutputOptions, emit},
};

use super::{options::UiOptions, runtime::App};

const DEFAULT_TITLE: &str = "Dynamic Form";

/// Interactive form widget over a [`FormCatalog`].
///
/// ```no_run
/// use dynaform::{DynamicForm, FormCatalog};
///
/// let store = DynamicForm::new(FormCatalog::builtin())
///     .with_title("Registration")
///     .run()?;
/// println!("{} entries", store.total());
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct DynamicForm {
    catalog: FormCatalog,
    title: Option<String>,
    options: UiOptions,
    output: Option<OutputOptions>,
}

impl DynamicForm {
    pub fn new(catalog: FormCatalog) -> Self {
        Self {
            catalog,
            title: None,
            options: UiOptions::default(),
            output: None,
        }
    }

    /// Widget over the embedded User/Address/Payment catalog.
    pub fn builtin() -> Self {
        Self::new(FormCatalog::builtin())
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    /// Export the submitted entries once the UI closes.
    pub fn with_output(mut self, output: OutputOptions) -> Self {
        self.output = Some(output);
        self
    }

    /// Runs the terminal UI until the user quits and returns what was submitted.
    pub fn run(self) -> Result<SubmissionStore> {
        let DynamicForm {
            catalog,
            title,
            options,
            output,
        } = self;

        if catalog.is_empty() {
            bail!("form catalog has no form types");
        }
        info!(forms = catalog.len(), "starting form session");

        let title = title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let mut app = App::new(catalog, options, title);
        app.run()?;
        let store = app.into_store();
        info!(entries = store.total(), "form session closed");

        if let Some(output) = output {
            emit(&store, &output)?;
        }
        Ok(store)
    }
}
