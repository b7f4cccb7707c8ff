use std::fs;

use dynaform::{
    CatalogError, DocumentFormat, FieldKind, FormCatalog, FormCommand, FormEngine, FormState,
    OutputDestination, OutputOptions, catalog_from_path, catalog_from_str, emit, parse_catalog,
};
use serde_json::json;

#[test]
fn builtin_catalog_matches_documented_forms() {
    let catalog = FormCatalog::builtin();
    assert_eq!(
        catalog.form_names().collect::<Vec<_>>(),
        ["User Information", "Address Information", "Payment Information"]
    );
    let address = catalog.fields("Address Information").expect("address");
    let state = &address[2];
    assert_eq!(state.kind, FieldKind::Dropdown);
    assert_eq!(state.options, ["California", "Texas", "New York"]);
    assert!(!address[3].required, "zip code is optional");

    let payment = catalog.fields("Payment Information").expect("payment");
    let kinds: Vec<_> = payment.iter().map(|field| field.kind).collect();
    assert_eq!(
        kinds,
        [
            FieldKind::Text,
            FieldKind::Date,
            FieldKind::Password,
            FieldKind::Text
        ]
    );
    assert!(payment.iter().all(|field| field.required));
}

#[test]
fn loads_catalog_file_in_declared_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("forms.json");
    fs::write(
        &path,
        json!({
            "forms": [
                {"name": "Zeta", "fields": [{"name": "z", "type": "text", "label": "Z"}]},
                {"name": "Alpha", "fields": [
                    {"name": "b", "type": "number", "label": "B"},
                    {"name": "a", "type": "text", "label": "A", "required": true}
                ]}
            ]
        })
        .to_string(),
    )
    .expect("write catalog");

    let catalog = catalog_from_path(&path).expect("load");
    assert_eq!(catalog.form_names().collect::<Vec<_>>(), ["Zeta", "Alpha"]);
    let names: Vec<_> = catalog
        .fields("Alpha")
        .expect("alpha")
        .iter()
        .map(|field| field.name.as_str())
        .collect();
    assert_eq!(names, ["b", "a"]);
}

#[test]
fn invalid_catalog_text_names_the_problem() {
    let err = catalog_from_str(
        r#"{"forms": [{"name": "F", "fields": [{"name": "s", "type": "dropdown", "label": "S"}]}]}"#,
        DocumentFormat::Json,
    )
    .expect_err("dropdown without options");
    let message = format!("{err:#}");
    assert!(message.contains("invalid form catalog"));
    assert!(message.contains("'s'"));
}

#[test]
fn unknown_keys_fail_the_schema_check() {
    let err = parse_catalog(&json!({"forms": [], "theme": "dark"})).expect_err("theme");
    assert!(matches!(err, CatalogError::Schema(_)));
}

#[test]
fn exported_entries_keep_catalog_field_order() {
    let catalog = FormCatalog::builtin();
    let mut state = FormState::new();
    let mut engine = FormEngine::new(&mut state, &catalog);
    engine
        .dispatch(FormCommand::select("User Information"))
        .expect("select");
    engine
        .dispatch(FormCommand::set_field("lastName", "Lovelace"))
        .expect("last");
    engine
        .dispatch(FormCommand::set_field("firstName", "Ada"))
        .expect("first");
    engine.dispatch(FormCommand::Submit).expect("submit");

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("entries.json");
    let options = OutputOptions::new(DocumentFormat::Json)
        .with_pretty(false)
        .with_destinations(vec![OutputDestination::file(&path)]);
    emit(state.store(), &options).expect("emit");

    let written = fs::read_to_string(&path).expect("read back");
    assert_eq!(
        written.trim_end(),
        r#"{"User Information":[{"firstName":"Ada","lastName":"Lovelace"}]}"#
    );
}
