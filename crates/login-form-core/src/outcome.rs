//! Submit collaborator outcomes and their normalisation into the error map.
//!
//! The collaborator reports failure in one of three shapes, modelled as a
//! tagged union instead of an arbitrary payload:
//!
//! | Variant | Meaning | Resulting error map |
//! |---------|---------|---------------------|
//! | [`SubmitError::Rejected`] | structured per-field / global errors | the payload itself |
//! | [`SubmitError::Unstructured`] | transport failure, malformed body | `{global: unexpected_error}` |
//! | [`SubmitError::TimedOut`] | no answer before the deadline | `{global: timed_out}` |
//!
//! Normalisation never fails and never panics; whatever the collaborator
//! returns ends up as an [`ErrorMap`].

use crate::errors::{ErrorKey, ErrorMap};
use crate::messages::Messages;
use crate::state::{AttemptId, FormEvent};
use serde_json::Value;

/// Failure reported by the submit collaborator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
	#[error("Submission rejected with {} error(s)", .0.len())]
	Rejected(ErrorMap),
	#[error("Submission failed: {0}")]
	Unstructured(String),
	#[error("Submission timed out")]
	TimedOut,
}

pub type SubmitResult = Result<(), SubmitError>;

impl SubmitError {
	/// Structured rejection from `(key, message)` pairs.
	///
	/// # Examples
	///
	/// ```
	/// use login_form_core::{Field, SubmitError};
	///
	/// let err = SubmitError::rejected([(Field::Email, "already taken")]);
	/// assert!(matches!(err, SubmitError::Rejected(ref errors) if errors.len() == 1));
	/// ```
	pub fn rejected<K, V>(errors: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<ErrorKey>,
		V: Into<String>,
	{
		SubmitError::Rejected(errors.into_iter().collect())
	}

	pub fn unstructured(message: impl Into<String>) -> Self {
		SubmitError::Unstructured(message.into())
	}

	/// Decode a collaborator's JSON error body.
	///
	/// Accepts `{"errors": {...}}` or a bare object whose values are strings
	/// (or arrays of strings, joined with `", "`). Keys other than `email`,
	/// `password` and `global` are folded into `global` when the payload has
	/// no `global` message of its own. Anything that yields no message at all
	/// is [`Unstructured`](SubmitError::Unstructured).
	///
	/// # Examples
	///
	/// ```
	/// use login_form_core::{ErrorKey, Field, SubmitError};
	/// use serde_json::json;
	///
	/// let err = SubmitError::from_payload(json!({"errors": {"email": "already taken"}}));
	/// let SubmitError::Rejected(errors) = err else { panic!() };
	/// assert_eq!(errors.field(Field::Email), Some("already taken"));
	///
	/// let err = SubmitError::from_payload(json!("502 Bad Gateway"));
	/// assert!(matches!(err, SubmitError::Unstructured(_)));
	/// ```
	pub fn from_payload(payload: Value) -> Self {
		let object = match &payload {
			Value::Object(map) => match map.get("errors") {
				Some(Value::Object(inner)) => inner,
				_ => map,
			},
			_ => return SubmitError::Unstructured(payload.to_string()),
		};

		let mut errors = ErrorMap::new();
		let mut unknown = Vec::new();

		for (key, value) in object {
			let Some(message) = message_text(value) else {
				tracing::warn!(key = %key, "skipping non-text error message in submit payload");
				continue;
			};
			match key.parse::<ErrorKey>() {
				Ok(error_key) => errors.insert(error_key, message),
				Err(_) => unknown.push((key.as_str(), message)),
			}
		}

		if !unknown.is_empty() {
			if errors.global().is_none() {
				let folded = unknown
					.iter()
					.map(|(_, message)| message.as_str())
					.collect::<Vec<_>>()
					.join(", ");
				errors.insert(ErrorKey::Global, folded);
			} else {
				let keys: Vec<&str> = unknown.iter().map(|(key, _)| *key).collect();
				tracing::warn!(?keys, "dropping messages for unknown error keys");
			}
		}

		if errors.is_empty() {
			SubmitError::Unstructured(payload.to_string())
		} else {
			SubmitError::Rejected(errors)
		}
	}

	/// Normalise into the error map shown to the user.
	///
	/// An empty structured rejection carries nothing to show, so it is
	/// treated like an unstructured failure.
	pub fn into_errors(self, messages: &Messages) -> ErrorMap {
		match self {
			SubmitError::Rejected(errors) if !errors.is_empty() => {
				tracing::warn!(fields = errors.len(), "submission rejected by collaborator");
				errors
			}
			SubmitError::Rejected(_) => {
				tracing::error!("submission rejected with an empty error payload");
				ErrorMap::global_message(&messages.unexpected_error)
			}
			SubmitError::Unstructured(detail) => {
				tracing::error!(%detail, "submission failed without a structured payload");
				ErrorMap::global_message(&messages.unexpected_error)
			}
			SubmitError::TimedOut => {
				tracing::warn!("submission timed out");
				ErrorMap::global_message(&messages.timed_out)
			}
		}
	}
}

impl From<ErrorMap> for SubmitError {
	fn from(errors: ErrorMap) -> Self {
		SubmitError::Rejected(errors)
	}
}

impl From<serde_json::Error> for SubmitError {
	fn from(err: serde_json::Error) -> Self {
		SubmitError::Unstructured(err.to_string())
	}
}

/// Turn a collaborator result for `attempt` into the event that ends it.
pub fn outcome_event(attempt: AttemptId, result: SubmitResult, messages: &Messages) -> FormEvent {
	match result {
		Ok(()) => FormEvent::SubmitResolved { attempt },
		Err(err) => FormEvent::SubmitRejected {
			attempt,
			errors: err.into_errors(messages),
		},
	}
}

fn message_text(value: &Value) -> Option<String> {
	match value {
		Value::String(text) if !text.is_empty() => Some(text.clone()),
		Value::Array(items) => {
			let parts: Vec<&str> = items
				.iter()
				.filter_map(Value::as_str)
				.filter(|text| !text.is_empty())
				.collect();
			(!parts.is_empty()).then(|| parts.join(", "))
		}
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::field::Field;
	use crate::messages::{TIMED_OUT, UNEXPECTED_ERROR};
	use rstest::rstest;
	use serde_json::json;

	fn rejected(payload: Value) -> ErrorMap {
		match SubmitError::from_payload(payload) {
			SubmitError::Rejected(errors) => errors,
			other => panic!("expected a structured rejection, got {other:?}"),
		}
	}

	#[rstest]
	fn test_payload_bare_object() {
		let errors = rejected(json!({"email": "already taken", "global": "try later"}));

		assert_eq!(errors.field(Field::Email), Some("already taken"));
		assert_eq!(errors.global(), Some("try later"));
	}

	#[rstest]
	fn test_payload_wrapped_in_errors_key() {
		let errors = rejected(json!({"errors": {"password": ["too short", "too common"]}}));

		assert_eq!(errors.field(Field::Password), Some("too short, too common"));
	}

	#[rstest]
	fn test_unknown_keys_fold_into_global() {
		let errors = rejected(json!({"username": "locked", "email": "unknown account"}));

		assert_eq!(errors.global(), Some("locked"));
		assert_eq!(errors.field(Field::Email), Some("unknown account"));
	}

	#[rstest]
	fn test_unknown_keys_dropped_when_global_present() {
		let errors = rejected(json!({"username": "locked", "global": "denied"}));

		assert_eq!(errors.len(), 1);
		assert_eq!(errors.global(), Some("denied"));
	}

	#[rstest]
	#[case(json!(null))]
	#[case(json!("Internal Server Error"))]
	#[case(json!(500))]
	#[case(json!({}))]
	#[case(json!({"email": 42}))]
	#[case(json!({"errors": {"email": ""}}))]
	fn test_unusable_payloads_are_unstructured(#[case] payload: Value) {
		assert!(matches!(
			SubmitError::from_payload(payload),
			SubmitError::Unstructured(_)
		));
	}

	#[rstest]
	fn test_scenario_c_rejection_is_surfaced_verbatim() {
		let err = SubmitError::rejected([(Field::Email, "already taken")]);

		let errors = err.into_errors(&Messages::default());

		let expected: ErrorMap = [(Field::Email, "already taken")].into_iter().collect();
		assert_eq!(errors, expected);
	}

	#[rstest]
	#[case(SubmitError::unstructured("connection reset"), UNEXPECTED_ERROR)]
	#[case(SubmitError::Rejected(ErrorMap::new()), UNEXPECTED_ERROR)]
	#[case(SubmitError::TimedOut, TIMED_OUT)]
	fn test_fallback_to_global_message(#[case] err: SubmitError, #[case] expected: &str) {
		let errors = err.into_errors(&Messages::default());

		assert_eq!(errors, ErrorMap::global_message(expected));
	}

	#[rstest]
	fn test_outcome_event() {
		let attempt = crate::FormState::new()
			.on_field_change(Field::Email, "bruce@wayne.com")
			.on_field_change(Field::Password, "secret")
			.on_submit_requested(&crate::Validator::new())
			.state
			.current_attempt()
			.unwrap();
		let messages = Messages::default();

		assert_eq!(
			outcome_event(attempt, Ok(()), &messages),
			FormEvent::SubmitResolved { attempt }
		);
		assert_eq!(
			outcome_event(attempt, Err(SubmitError::TimedOut), &messages),
			FormEvent::SubmitRejected {
				attempt,
				errors: ErrorMap::global_message(TIMED_OUT),
			}
		);
	}
}
