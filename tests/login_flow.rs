//! End-to-end login flow through the facade crate
//!
//! Test Categories:
//! - Category 1: Reference scenarios through the controller
//! - Category 2: Configured session

use login_form::prelude::*;
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Backend that knows one account and rejects a taken address.
fn backend(
	calls: Arc<AtomicUsize>,
) -> FnSubmitter<impl Fn(FieldValues) -> std::future::Ready<SubmitResult> + Send + Sync> {
	FnSubmitter::new(move |values: FieldValues| {
		calls.fetch_add(1, Ordering::SeqCst);
		let result = match (values.email(), values.password()) {
			("bruce@wayne.com", "secret") => Ok(()),
			("taken@wayne.com", _) => Err(SubmitError::from_payload(json!({
				"errors": {"email": ["already taken"]}
			}))),
			_ => Err(SubmitError::unstructured("503 Service Unavailable")),
		};
		std::future::ready(result)
	})
}

// ============================================================================
// Category 1: Reference scenarios through the controller
// ============================================================================

#[rstest]
#[case::invalid_input("not-an-email", "", 0, json!({
	"email": "Please enter a valid email",
	"password": "Please fill this field",
}))]
#[case::accepted("bruce@wayne.com", "secret", 1, json!({}))]
#[case::remote_field_error("taken@wayne.com", "secret", 1, json!({"email": "already taken"}))]
#[case::unstructured_failure("alfred@wayne.com", "secret", 1, json!({
	"global": "An unexpected error occurred",
}))]
#[tokio::test]
async fn test_scenarios(
	#[case] email: &str,
	#[case] password: &str,
	#[case] expected_calls: usize,
	#[case] expected_errors: serde_json::Value,
) {
	// Arrange
	let calls = Arc::new(AtomicUsize::new(0));
	let submitter = backend(Arc::clone(&calls));
	let mut controller = SubmissionController::new();

	// Act
	controller.on_field_change(Field::Email, email);
	controller.on_field_change(Field::Password, password);
	controller.submit(&submitter).await;

	// Assert
	assert_eq!(calls.load(Ordering::SeqCst), expected_calls);
	assert_eq!(serde_json::to_value(controller.state().errors()).unwrap(), expected_errors);
	assert!(!controller.is_loading());
}

// ============================================================================
// Category 2: Configured session
// ============================================================================

#[rstest]
#[tokio::test]
async fn test_session_with_configured_messages() {
	// Arrange
	let settings = FormSettings::from_toml_str(
		r#"
		[form.messages]
		unexpected_error = "Login is unavailable right now"
		"#,
	)
	.unwrap();
	let calls = Arc::new(AtomicUsize::new(0));
	let submitter: Arc<dyn Submitter> = Arc::new(backend(Arc::clone(&calls)));
	let (mut handle, task) = FormSession::spawn(SubmissionController::from_settings(&settings), submitter);

	// Act
	handle.field_changed(Field::Email, "alfred@wayne.com").unwrap();
	handle.field_changed(Field::Password, "secret").unwrap();
	handle.submit().unwrap();
	let snapshot = handle
		.wait_for(|snapshot| !snapshot.errors.is_empty())
		.await
		.unwrap();
	handle.shutdown().unwrap();
	let state = task.await.unwrap();

	// Assert
	assert_eq!(snapshot.errors.global(), Some("Login is unavailable right now"));
	assert!(!snapshot.loading);
	assert_eq!(state.snapshot(), snapshot);
	assert_eq!(calls.load(Ordering::SeqCst), 1);
}
