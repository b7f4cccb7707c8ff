use std::{collections::HashSet, sync::LazyLock};

use indexmap::IndexMap;
use jsonschema::{Validator, validator_for};
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    error::CatalogError,
    schema::{FieldDescriptor, FieldKind, FormCatalog},
};

/// On-disk shape of a form catalog. `forms` and `fields` are arrays because
/// their order drives both the form layout and the table columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    pub forms: Vec<FormDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FormDocument {
    /// Form type name shown in the type selector.
    pub name: String,
    pub fields: Vec<FieldDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FieldDocument {
    /// Key under which the value is stored in each record.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    /// Choices for `dropdown` fields, in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

static CATALOG_VALIDATOR: LazyLock<Validator> = LazyLock::new(|| {
    validator_for(&catalog_schema()).expect("generated catalog schema must compile")
});

/// JSON Schema describing [`CatalogDocument`].
pub fn catalog_schema() -> Value {
    serde_json::to_value(schema_for!(CatalogDocument))
        .expect("generated catalog schema is serializable")
}

/// Validate a raw document against the catalog schema, then build the catalog.
pub fn parse_catalog(value: &Value) -> Result<FormCatalog, CatalogError> {
    let issues: Vec<String> = CATALOG_VALIDATOR
        .iter_errors(value)
        .map(|error| {
            let pointer = error.instance_path.to_string();
            let location = if pointer.is_empty() {
                "<root>".to_string()
            } else {
                pointer
            };
            format!("{location}: {error}")
        })
        .collect();
    if !issues.is_empty() {
        return Err(CatalogError::Schema(issues));
    }
    let document: CatalogDocument = serde_json::from_value(value.clone())?;
    parse_catalog_document(document)
}

pub fn parse_catalog_document(document: CatalogDocument) -> Result<FormCatalog, CatalogError> {
    let mut forms = IndexMap::with_capacity(document.forms.len());
    for form in document.forms {
        if form.name.trim().is_empty() {
            return Err(CatalogError::UnnamedForm);
        }
        if forms.contains_key(&form.name) {
            return Err(CatalogError::DuplicateForm(form.name));
        }
        if form.fields.is_empty() {
            return Err(CatalogError::EmptyForm(form.name));
        }
        let fields = build_fields(&form.name, form.fields)?;
        forms.insert(form.name, fields);
    }
    Ok(FormCatalog::from_ordered(forms))
}

fn build_fields(
    form: &str,
    documents: Vec<FieldDocument>,
) -> Result<Vec<FieldDescriptor>, CatalogError> {
    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(documents.len());
    for doc in documents {
        if !seen.insert(doc.name.clone()) {
            return Err(CatalogError::DuplicateField {
                form: form.to_string(),
                field: doc.name,
            });
        }
        let options = match (doc.kind, doc.options) {
            (FieldKind::Dropdown, Some(options)) if !options.is_empty() => options,
            (FieldKind::Dropdown, _) => {
                return Err(CatalogError::MissingOptions {
                    form: form.to_string(),
                    field: doc.name,
                });
            }
            (_, Some(_)) => {
                return Err(CatalogError::UnexpectedOptions {
                    form: form.to_string(),
                    field: doc.name,
                });
            }
            (_, None) => Vec::new(),
        };
        fields.push(FieldDescriptor {
            name: doc.name,
            kind: doc.kind,
            label: doc.label,
            required: doc.required,
            options,
        });
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_forms_in_document_order() {
        let doc = json!({
            "forms": [
                {"name": "Zeta", "fields": [{"name": "a", "type": "text", "label": "A"}]},
                {"name": "Alpha", "fields": [
                    {"name": "pick", "type": "dropdown", "label": "Pick",
                     "options": ["z", "a", "m"], "required": true},
                    {"name": "when", "type": "date", "label": "When"}
                ]}
            ]
        });
        let catalog = parse_catalog(&doc).expect("valid catalog");
        assert_eq!(catalog.form_names().collect::<Vec<_>>(), ["Zeta", "Alpha"]);
        let alpha = catalog.fields("Alpha").expect("alpha");
        assert_eq!(alpha[0].options, ["z", "a", "m"]);
        assert!(alpha[0].required);
        assert!(!alpha[1].required, "required defaults to false");
    }

    #[test]
    fn unknown_field_type_fails_schema_check() {
        let doc = json!({
            "forms": [{"name": "F", "fields": [{"name": "a", "type": "checkbox", "label": "A"}]}]
        });
        let err = parse_catalog(&doc).expect_err("checkbox is not a field kind");
        assert!(matches!(err, CatalogError::Schema(_)));
    }

    #[test]
    fn missing_label_fails_schema_check() {
        let doc = json!({"forms": [{"name": "F", "fields": [{"name": "a", "type": "text"}]}]});
        let err = parse_catalog(&doc).expect_err("label is required");
        let CatalogError::Schema(issues) = err else {
            panic!("expected schema error, got {err:?}");
        };
        assert!(issues.iter().any(|issue| issue.contains("label")));
    }

    #[test]
    fn duplicate_field_names_are_rejected() {
        let doc = json!({
            "forms": [{"name": "F", "fields": [
                {"name": "a", "type": "text", "label": "A"},
                {"name": "a", "type": "number", "label": "Again"}
            ]}]
        });
        let err = parse_catalog(&doc).expect_err("duplicate field");
        assert!(matches!(err, CatalogError::DuplicateField { ref field, .. } if field == "a"));
    }

    #[test]
    fn duplicate_form_names_are_rejected() {
        let doc = json!({
            "forms": [
                {"name": "F", "fields": [{"name": "a", "type": "text", "label": "A"}]},
                {"name": "F", "fields": [{"name": "b", "type": "text", "label": "B"}]}
            ]
        });
        assert!(matches!(
            parse_catalog(&doc),
            Err(CatalogError::DuplicateForm(name)) if name == "F"
        ));
    }

    #[test]
    fn dropdown_requires_options() {
        let doc = json!({
            "forms": [{"name": "F", "fields": [{"name": "s", "type": "dropdown", "label": "S"}]}]
        });
        assert!(matches!(
            parse_catalog(&doc),
            Err(CatalogError::MissingOptions { .. })
        ));
    }

    #[test]
    fn options_on_text_field_are_rejected() {
        let doc = json!({
            "forms": [{"name": "F", "fields": [
                {"name": "s", "type": "text", "label": "S", "options": ["x"]}
            ]}]
        });
        assert!(matches!(
            parse_catalog(&doc),
            Err(CatalogError::UnexpectedOptions { .. })
        ));
    }

    #[test]
    fn document_round_trips_through_catalog() {
        let catalog = FormCatalog::builtin();
        let value = serde_json::to_value(catalog.to_document()).expect("serialize");
        let reparsed = parse_catalog(&value).expect("reparse");
        assert_eq!(reparsed, catalog);
    }
}
