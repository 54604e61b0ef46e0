//! Transition machine integration tests
//!
//! Drives `FormState` through complete submit cycles with the outcome
//! normalisation in between, the same way a host event loop would.
//!
//! Test Categories:
//! - Category 1: Reference scenarios
//! - Category 2: Re-entry across attempts
//! - Category 3: Field name dispatch

use login_form_core::{
	AttemptId, Effect, ErrorKey, ErrorMap, Field, FieldValues, FormEvent, FormState, Messages,
	SubmissionState, SubmitError, Validator, outcome_event,
};
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn validator() -> Validator {
	Validator::new()
}

fn typed(email: &str, password: &str) -> FormState {
	FormState::new()
		.on_field_change(Field::Email, email)
		.on_field_change(Field::Password, password)
}

fn start(state: FormState, validator: &Validator) -> (FormState, AttemptId, FieldValues) {
	let transition = state.on_submit_requested(validator);
	match transition.effect {
		Some(Effect::Submit { attempt, values }) => (transition.state, attempt, values),
		None => panic!("expected the form to submit"),
	}
}

// ============================================================================
// Category 1: Reference scenarios
// ============================================================================

#[rstest]
fn test_scenario_a_invalid_input(validator: Validator) {
	// Arrange
	let state = typed("not-an-email", "");

	// Act
	let transition = state.on_submit_requested(&validator);

	// Assert
	assert!(transition.effect.is_none());
	assert_eq!(
		serde_json::to_value(transition.state.errors()).unwrap(),
		json!({
			"email": "Please enter a valid email",
			"password": "Please fill this field",
		})
	);
	assert_eq!(transition.state.submission(), SubmissionState::Idle);
}

#[rstest]
fn test_scenario_b_clean_input_submits_once(validator: Validator) {
	let (state, attempt, values) = start(typed("bruce@wayne.com", "secret"), &validator);

	assert_eq!(values, FieldValues::with("bruce@wayne.com", "secret"));
	assert_eq!(state.submission(), SubmissionState::Submitting { attempt });
	assert!(state.errors().is_empty());

	// Further requests while in flight produce no second call.
	let again = state.on_submit_requested(&validator);
	assert!(again.effect.is_none());
}

#[rstest]
fn test_scenario_c_remote_field_error(validator: Validator) {
	let (state, attempt, _) = start(typed("bruce@wayne.com", "secret"), &validator);
	let result = Err(SubmitError::from_payload(json!({"email": "already taken"})));

	let event = outcome_event(attempt, result, &Messages::default());
	let state = state.apply(event, &validator).state;

	assert_eq!(
		serde_json::to_value(state.errors()).unwrap(),
		json!({"email": "already taken"})
	);
	assert_eq!(state.submission(), SubmissionState::Idle);
}

#[rstest]
fn test_scenario_d_unstructured_failure(validator: Validator) {
	let (state, attempt, _) = start(typed("bruce@wayne.com", "secret"), &validator);
	let result = Err(SubmitError::unstructured("socket hang up"));

	let event = outcome_event(attempt, result, &Messages::default());
	let state = state.apply(event, &validator).state;

	assert_eq!(
		state.errors(),
		&ErrorMap::global_message("An unexpected error occurred")
	);
	assert!(!state.is_loading());
}

// ============================================================================
// Category 2: Re-entry across attempts
// ============================================================================

#[rstest]
fn test_machine_is_reenterable(validator: Validator) {
	let messages = Messages::default();

	// First attempt rejected remotely.
	let (state, first, _) = start(typed("bruce@wayne.com", "wrong"), &validator);
	let state = state
		.apply(
			outcome_event(
				first,
				Err(SubmitError::rejected([(ErrorKey::Global, "Invalid credentials")])),
				&messages,
			),
			&validator,
		)
		.state;
	assert_eq!(state.errors().global(), Some("Invalid credentials"));

	// Editing keeps the stale message until the next submit.
	let state = state.on_field_change(Field::Password, "right");
	assert_eq!(state.errors().global(), Some("Invalid credentials"));

	// Second attempt succeeds and clears everything.
	let (state, second, values) = start(state, &validator);
	assert!(state.errors().is_empty());
	assert_eq!(values.password(), "right");

	let state = state
		.apply(outcome_event(second, Ok(()), &messages), &validator)
		.state;
	assert!(state.errors().is_empty());
	assert!(!state.is_loading());
	assert!(second > first);
}

#[rstest]
fn test_local_failure_after_remote_failure_replaces_map(validator: Validator) {
	let messages = Messages::default();
	let (state, attempt, _) = start(typed("bruce@wayne.com", "secret"), &validator);
	let state = state
		.apply(
			outcome_event(attempt, Err(SubmitError::TimedOut), &messages),
			&validator,
		)
		.state;
	assert_eq!(state.errors().global(), Some("Request timed out"));

	let state = state
		.on_field_change(Field::Email, "broken")
		.on_submit_requested(&validator)
		.state;

	assert_eq!(state.errors().global(), None);
	assert!(state.errors().has_error(Field::Email));
}

// ============================================================================
// Category 3: Field name dispatch
// ============================================================================

#[rstest]
#[case("email", "bruce@wayne.com")]
#[case("password", "secret")]
fn test_field_changed_by_name(validator: Validator, #[case] name: &str, #[case] value: &str) {
	let event = FormEvent::field_changed_by_name(name, value).unwrap();

	let state = FormState::new().apply(event, &validator).state;

	assert_eq!(state.values().get(name.parse().unwrap()), value);
}
