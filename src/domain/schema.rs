use std::{fmt, sync::LazyLock};

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::parser::{CatalogDocument, FieldDocument, FormDocument, parse_catalog_document};

macro_rules! catalog_source {
    () => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/catalog/default.catalog.json"
        ))
    };
}

/// Maximum length of a `YYYY-MM-DD` date entry.
const DATE_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Password,
    Dropdown,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Password => "password",
            FieldKind::Dropdown => "dropdown",
        }
    }

    /// Whether the value is picked from a fixed option list instead of typed.
    pub fn is_choice(&self) -> bool {
        matches!(self, FieldKind::Dropdown)
    }

    /// Whether `ch` may be typed into an input of this kind holding `current`.
    pub fn accepts(&self, ch: char, current: &str) -> bool {
        if ch.is_control() {
            return false;
        }
        match self {
            FieldKind::Text | FieldKind::Password => true,
            FieldKind::Number => ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | 'e' | 'E'),
            FieldKind::Date => {
                (ch.is_ascii_digit() || ch == '-') && current.chars().count() < DATE_LEN
            }
            FieldKind::Dropdown => false,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub label: String,
    pub required: bool,
    /// Ordered choices, non-empty only for [`FieldKind::Dropdown`].
    pub options: Vec<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            label: label.into(),
            required: false,
            options: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn display_label(&self) -> String {
        if self.required {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        }
    }
}

static BUILTIN: LazyLock<FormCatalog> = LazyLock::new(|| {
    let document: CatalogDocument =
        serde_json::from_str(catalog_source!()).expect("invalid catalog/default.catalog.json");
    parse_catalog_document(document).expect("invalid catalog/default.catalog.json")
});

/// Ordered, immutable mapping from form type name to its field list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormCatalog {
    forms: IndexMap<String, Vec<FieldDescriptor>>,
}

impl FormCatalog {
    /// The three form types shipped with the widget.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    pub(crate) fn from_ordered(forms: IndexMap<String, Vec<FieldDescriptor>>) -> Self {
        Self { forms }
    }

    pub fn fields(&self, form_type: &str) -> Option<&[FieldDescriptor]> {
        self.forms.get(form_type).map(Vec::as_slice)
    }

    pub fn contains(&self, form_type: &str) -> bool {
        self.forms.contains_key(form_type)
    }

    pub fn form_names(&self) -> impl Iterator<Item = &str> {
        self.forms.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FieldDescriptor])> {
        self.forms
            .iter()
            .map(|(name, fields)| (name.as_str(), fields.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    pub fn to_document(&self) -> CatalogDocument {
        let forms = self
            .iter()
            .map(|(name, fields)| FormDocument {
                name: name.to_string(),
                fields: fields
                    .iter()
                    .map(|field| FieldDocument {
                        name: field.name.clone(),
                        kind: field.kind,
                        label: field.label.clone(),
                        required: field.required,
                        options: field.kind.is_choice().then(|| field.options.clone()),
                    })
                    .collect(),
            })
            .collect();
        CatalogDocument { forms }
    }
}
