use dynaform::{
    EditCursor, FormCatalog, FormCommand, FormEngine, FormError, FormState, Notice, Record,
};

const USER: &str = "User Information";
const ADDRESS: &str = "Address Information";

fn dispatch(
    state: &mut FormState,
    catalog: &FormCatalog,
    command: FormCommand,
) -> Result<Option<Notice>, FormError> {
    FormEngine::new(state, catalog).dispatch(command)
}

fn fill(state: &mut FormState, catalog: &FormCatalog, values: &[(&str, &str)]) {
    for (name, value) in values {
        dispatch(state, catalog, FormCommand::set_field(*name, *value)).expect("set field");
    }
}

fn record(pairs: &[(&str, &str)]) -> Record {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[test]
fn create_edit_delete_scenario() {
    let catalog = FormCatalog::builtin();
    let mut state = FormState::new();

    dispatch(&mut state, &catalog, FormCommand::select(USER)).expect("select");
    fill(
        &mut state,
        &catalog,
        &[("firstName", "Ada"), ("lastName", "Lovelace")],
    );
    let notice = dispatch(&mut state, &catalog, FormCommand::Submit).expect("submit");
    assert_eq!(notice, Some(Notice::Submitted));
    assert_eq!(
        state.store().records(USER),
        [record(&[("firstName", "Ada"), ("lastName", "Lovelace")])]
    );

    dispatch(&mut state, &catalog, FormCommand::edit(USER, 0)).expect("edit");
    assert_eq!(state.draft().get("lastName"), "Lovelace");
    fill(&mut state, &catalog, &[("lastName", "Byron")]);
    let notice = dispatch(&mut state, &catalog, FormCommand::Submit).expect("save");
    assert_eq!(notice, Some(Notice::Saved));
    assert_eq!(state.store().records(USER)[0]["lastName"], "Byron");
    assert_eq!(state.cursor(), &EditCursor::Idle);
    assert_eq!(state.selection().form_type(), Some(USER));

    let notice = dispatch(&mut state, &catalog, FormCommand::delete(USER, 0)).expect("delete");
    assert_eq!(notice, Some(Notice::Deleted));
    assert!(state.store().records(USER).is_empty());
    assert_eq!(state.store().non_empty().count(), 0);
}

#[test]
fn submissions_only_touch_their_own_type() {
    let catalog = FormCatalog::builtin();
    let mut state = FormState::new();

    dispatch(&mut state, &catalog, FormCommand::select(ADDRESS)).expect("select");
    fill(
        &mut state,
        &catalog,
        &[("street", "1 Main St"), ("city", "Austin"), ("state", "Texas")],
    );
    dispatch(&mut state, &catalog, FormCommand::Submit).expect("submit address");

    dispatch(&mut state, &catalog, FormCommand::select(USER)).expect("select");
    assert!(state.draft().is_empty(), "switching types clears the draft");
    fill(&mut state, &catalog, &[("firstName", "A"), ("lastName", "B")]);
    dispatch(&mut state, &catalog, FormCommand::Submit).expect("submit user");

    let types: Vec<_> = state.store().non_empty().map(|(name, _)| name).collect();
    assert_eq!(types, [ADDRESS, USER]);
    assert_eq!(
        state.store().records(ADDRESS),
        [record(&[
            ("street", "1 Main St"),
            ("city", "Austin"),
            ("state", "Texas")
        ])]
    );
}

#[test]
fn refused_submission_reports_labels_in_catalog_order() {
    let catalog = FormCatalog::builtin();
    let mut state = FormState::new();
    dispatch(&mut state, &catalog, FormCommand::select("Payment Information")).expect("select");
    fill(&mut state, &catalog, &[("cvv", "123")]);

    let err = dispatch(&mut state, &catalog, FormCommand::Submit).expect_err("refused");
    let labels: Vec<_> = err
        .missing_fields()
        .iter()
        .map(|field| field.label.as_str())
        .collect();
    assert_eq!(labels, ["Card Number", "Expiry Date", "Cardholder Name"]);
    assert!(err.to_string().contains("Card Number, Expiry Date, Cardholder Name"));
    assert!(state.store().is_empty());
    assert_eq!(state.draft().get("cvv"), "123");
}

#[test]
fn stale_positions_are_rejected() {
    let catalog = FormCatalog::builtin();
    let mut state = FormState::new();
    let before = state.clone();

    let err = dispatch(&mut state, &catalog, FormCommand::delete(USER, 0)).expect_err("empty");
    assert_eq!(
        err,
        FormError::RecordNotFound {
            form_type: USER.to_string(),
            index: 0
        }
    );
    assert_eq!(err.to_string(), "no User Information entry at position 1");
    assert_eq!(state, before);
}
