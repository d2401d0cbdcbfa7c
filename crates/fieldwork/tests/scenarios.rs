//! End-to-end editing scenarios.
//!
//! Run with `RUST_LOG=fieldwork=debug` to see commit and focus logs.

use std::sync::Arc;

use fieldwork::prelude::*;
use fieldwork::time::{minutes_to_display_string, minutes_to_timestamp, timestamp_to_minutes};
use fieldwork::validation::ValidationErrorKind;
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn type_text<S: FieldStrategy>(field: &mut FieldController<S>, text: &str) -> Vec<String> {
    text.chars()
        .map(|c| field.handle_keystroke(c).to_string())
        .collect()
}

// =============================================================================
// Field scenarios
// =============================================================================

#[test]
fn test_out_of_range_commit_stays_invalid() {
    init_tracing();
    let mut field = FieldController::new(IntegerRangeStrategy::new(0, 150));
    let commits = Arc::new(Mutex::new(Vec::new()));
    let commits_clone = commits.clone();
    field
        .committed
        .connect(move |value| commits_clone.lock().push(*value));

    field.focus_gained();
    assert_eq!(type_text(&mut field, "200"), vec!["2", "20", "200"]);

    let outcome = field.commit();
    assert!(matches!(outcome.result, ValidationResult::TooHigh(_)));
    assert_eq!(outcome.result.kind(), Some(ValidationErrorKind::RangeViolation));
    let message = outcome.result.message().unwrap();
    assert!(message.contains("200"));
    assert!(message.contains("150"));

    assert_eq!(field.phase(), FieldPhase::Invalid);
    assert_eq!(field.committed_value(), None);
    assert_eq!(field.text(), "200");
    assert!(commits.lock().is_empty());
}

#[test]
fn test_empty_commit_is_valid_for_every_strategy() {
    init_tracing();
    let mut fields: Vec<Box<dyn EditableField>> = vec![
        Box::new(FieldController::new(IntegerRangeStrategy::new(0, 10))),
        Box::new(FieldController::new(FloatingPointRangeStrategy::with_default_precision(
            1.0, 2.0,
        ))),
        Box::new(FieldController::new(
            CharacterSetStrategy::new(CharacterSet::letters()).with_max_length(1),
        )),
        Box::new(FieldController::new(TimeStrategy::new())),
    ];

    for field in &mut fields {
        field.focus_gained();
        assert_eq!(field.commit(), ValidationResult::Valid);
        assert_eq!(field.committed_display(), None);
        assert_eq!(field.phase(), FieldPhase::Empty);
    }
}

#[test]
fn test_edit_then_recommit() {
    init_tracing();
    let mut field = FieldController::new(IntegerRangeStrategy::new(0, 100));
    type_text(&mut field, "-5");
    assert!(matches!(field.focus_lost().result, ValidationResult::TooLow(_)));
    assert_eq!(field.pending_alert(), Some("-5 is below minimum value of 0"));

    field.resolve_error(ErrorResolution::Edit);
    type_text(&mut field, "55");
    let outcome = field.commit();
    assert_eq!(outcome.value, Some(55));
    assert_eq!(field.state().last_error, None);
}

#[test]
fn test_float_field_reformats_on_commit() {
    init_tracing();
    let mut field =
        FieldController::new(FloatingPointRangeStrategy::with_default_precision(0.0, 100.0));
    type_text(&mut field, "3.14159");
    let outcome = field.commit();
    assert_eq!(outcome.value, Some(3.14));
    assert_eq!(field.text(), "3.14");

    field.set_external_value(Some(42.0));
    assert_eq!(field.text(), "42");
}

#[test]
fn test_time_field_typing() {
    init_tracing();
    let mut field = FieldController::new(TimeStrategy::new());
    assert_eq!(
        type_text(&mut field, "1a34x5"),
        vec!["1", "1", "13", "13:4", "13:4", "13:45"]
    );
    let outcome = field.commit();
    let time = outcome.value.unwrap();
    assert_eq!(time, ClockTime::new(13, 45));
    assert_eq!(time.total_minutes(), Some(825));
}

// =============================================================================
// Focus chain scenarios
// =============================================================================

#[test]
fn test_three_field_chain_advances_then_dismisses() {
    init_tracing();
    let mut form = Form::new();
    for (id, next) in [("a", Some("b")), ("b", Some("c")), ("c", None)] {
        form.add_field(id, FieldController::new(IntegerRangeStrategy::new(0, 9)), next)
            .unwrap();
    }

    let ended = Arc::new(Mutex::new(false));
    let ended_clone = ended.clone();
    form.chain()
        .editing_ended
        .connect(move |_| *ended_clone.lock() = true);

    form.focus(&"a").unwrap();
    form.type_char('1').unwrap();
    assert!(form.submit().unwrap().is_valid());
    assert_eq!(form.active(), Some(&"b"));

    // empty commit still advances
    assert!(form.submit().unwrap().is_valid());
    assert_eq!(form.active(), Some(&"c"));
    assert_eq!(form.chain().return_key(&"c"), ReturnKey::Done);

    form.type_char('3').unwrap();
    assert!(form.submit().unwrap().is_valid());
    assert_eq!(form.active(), None);
    assert!(*ended.lock());
}

#[test]
fn test_invalid_commit_never_advances() {
    init_tracing();
    let mut form = Form::new();
    let inline = FieldConfig::default().with_error_policy(ErrorPolicy::Inline);
    form.add_field(
        "a",
        FieldController::with_config(IntegerRangeStrategy::new(0, 9), inline),
        Some("b"),
    )
    .unwrap();
    form.add_field("b", FieldController::new(TimeStrategy::new()), None)
        .unwrap();

    form.focus(&"a").unwrap();
    form.paste("42").unwrap();
    assert!(!form.submit().unwrap().is_valid());
    assert_eq!(form.active(), Some(&"a"));
    assert_eq!(
        form.field(&"a").unwrap().inline_error(),
        Some("42 is above maximum value of 9")
    );
}

#[test]
fn test_looped_chain_returns_to_first() {
    init_tracing();
    let mut chain = FocusChain::from_sequence(["first", "second"], true).unwrap();
    chain.activate("second");
    assert_eq!(chain.advance(&"second"), Some("first"));
    assert_eq!(chain.active(), Some(&"first"));
}

// =============================================================================
// Time conversion
// =============================================================================

#[test]
fn test_time_round_trip_and_display() {
    for minutes in 0..1440 {
        assert_eq!(timestamp_to_minutes(&minutes_to_timestamp(minutes)), minutes);
    }
    assert_eq!(minutes_to_display_string(0), "00:00");
    assert_eq!(minutes_to_display_string(1439), "23:59");
    assert_eq!(minutes_to_display_string(1440), "00:00");
    assert_eq!(minutes_to_display_string(65), "01:05");
    assert_eq!(minutes_to_display_string(-30), "");
}
