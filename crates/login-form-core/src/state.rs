//! Login form transition machine.
//!
//! [`FormState`] is an immutable value. Every transition consumes the old
//! state and returns a new one, so the whole machine can be unit tested
//! without a rendering harness or an async runtime.
//!
//! ## Transition graph
//!
//! ```text
//!                     FieldChanged (values only)
//!                        ┌──────┐
//!                        ▼      │
//!   SubmitRequested  ┌────────┐ │   SubmitRequested (clean)
//!   (invalid) ──────▶│  Idle  │─┴───────────────────────────┐
//!                    └────────┘                              ▼
//!                        ▲                           ┌──────────────┐
//!                        │  SubmitResolved           │  Submitting  │◀─ FieldChanged
//!                        └───────────────────────────│  (attempt n) │◀─ SubmitRequested (ignored)
//!                           SubmitRejected(errors)   └──────────────┘
//!                           SubmitCancelled
//! ```
//!
//! A clean submit request yields [`Effect::Submit`]; executing it is the
//! caller's job (see the `login-form-submit` crate). Outcomes are tagged with
//! the [`AttemptId`] they belong to and outcomes for any other attempt are
//! ignored, so the submitting flag is cleared exactly once per attempt.

use crate::errors::{ErrorMap, FormResult};
use crate::field::{Field, FieldValues};
use crate::validators::Validator;
use serde::Serialize;
use std::fmt;

/// Identifies one submission attempt within a form mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AttemptId(u64);

impl AttemptId {
	pub fn get(self) -> u64 {
		self.0
	}
}

impl fmt::Display for AttemptId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
	#[default]
	Idle,
	Submitting {
		attempt: AttemptId,
	},
}

impl SubmissionState {
	pub fn is_submitting(self) -> bool {
		matches!(self, SubmissionState::Submitting { .. })
	}
}

/// Inputs to the machine.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
	FieldChanged { field: Field, value: String },
	SubmitRequested,
	SubmitResolved { attempt: AttemptId },
	SubmitRejected { attempt: AttemptId, errors: ErrorMap },
	/// The host abandoned `attempt` (e.g. the form was unmounted).
	SubmitCancelled { attempt: AttemptId },
}

impl FormEvent {
	pub fn field_changed(field: Field, value: impl Into<String>) -> Self {
		FormEvent::FieldChanged {
			field,
			value: value.into(),
		}
	}

	/// Build a field change from an input's `name` attribute.
	///
	/// # Examples
	///
	/// ```
	/// use login_form_core::{Field, FormEvent};
	///
	/// let event = FormEvent::field_changed_by_name("email", "bruce@wayne.com").unwrap();
	/// assert_eq!(event, FormEvent::field_changed(Field::Email, "bruce@wayne.com"));
	///
	/// assert!(FormEvent::field_changed_by_name("remember_me", "on").is_err());
	/// ```
	pub fn field_changed_by_name(name: &str, value: impl Into<String>) -> FormResult<Self> {
		Ok(Self::field_changed(name.parse()?, value))
	}
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
	/// Call the external submit collaborator with `values`.
	Submit {
		attempt: AttemptId,
		values: FieldValues,
	},
}

/// Result of applying an event: the next state and an optional effect.
#[derive(Debug, Clone)]
#[must_use = "a transition may carry a submit effect that has to be executed"]
pub struct Transition {
	pub state: FormState,
	pub effect: Option<Effect>,
}

impl Transition {
	fn to(state: FormState) -> Self {
		Self {
			state,
			effect: None,
		}
	}
}

/// Read model for rendering.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FormSnapshot {
	pub values: FieldValues,
	pub errors: ErrorMap,
	pub loading: bool,
}

/// Field values, error map and submission state of one mounted form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormState {
	values: FieldValues,
	errors: ErrorMap,
	submission: SubmissionState,
	attempts: u64,
}

impl FormState {
	/// Empty values, no errors, idle.
	pub fn new() -> Self {
		Self::default()
	}

	/// Start with host-provided values, e.g. a remembered email.
	pub fn with_values(values: FieldValues) -> Self {
		Self {
			values,
			..Self::default()
		}
	}

	pub fn values(&self) -> &FieldValues {
		&self.values
	}

	pub fn errors(&self) -> &ErrorMap {
		&self.errors
	}

	pub fn submission(&self) -> SubmissionState {
		self.submission
	}

	pub fn is_loading(&self) -> bool {
		self.submission.is_submitting()
	}

	/// The attempt currently in flight, if any.
	pub fn current_attempt(&self) -> Option<AttemptId> {
		match self.submission {
			SubmissionState::Submitting { attempt } => Some(attempt),
			SubmissionState::Idle => None,
		}
	}

	pub fn snapshot(&self) -> FormSnapshot {
		FormSnapshot {
			values: self.values.clone(),
			errors: self.errors.clone(),
			loading: self.is_loading(),
		}
	}

	/// Apply any event.
	pub fn apply(self, event: FormEvent, validator: &Validator) -> Transition {
		match event {
			FormEvent::FieldChanged { field, value } => {
				Transition::to(self.on_field_change(field, value))
			}
			FormEvent::SubmitRequested => self.on_submit_requested(validator),
			FormEvent::SubmitResolved { attempt } => Transition::to(self.on_submit_resolved(attempt)),
			FormEvent::SubmitRejected { attempt, errors } => {
				Transition::to(self.on_submit_rejected(attempt, errors))
			}
			FormEvent::SubmitCancelled { attempt } => {
				Transition::to(self.on_submit_cancelled(attempt))
			}
		}
	}

	/// Replace one field's value. Errors are deliberately left as they are
	/// until the next submit attempt.
	pub fn on_field_change(mut self, field: Field, value: impl Into<String>) -> Self {
		tracing::debug!(%field, "field changed");
		self.values.set(field, value);
		self
	}

	/// Validate and, if clean, enter `Submitting` with a submit effect.
	///
	/// A request while already submitting is ignored.
	///
	/// # Examples
	///
	/// ```
	/// use login_form_core::{Effect, FieldValues, FormState, Validator};
	///
	/// let validator = Validator::new();
	///
	/// let invalid = FormState::new().on_submit_requested(&validator);
	/// assert!(invalid.effect.is_none());
	/// assert!(!invalid.state.errors().is_empty());
	///
	/// let state = FormState::with_values(FieldValues::with("bruce@wayne.com", "secret"));
	/// let clean = state.on_submit_requested(&validator);
	/// assert!(clean.state.is_loading());
	/// assert!(matches!(clean.effect, Some(Effect::Submit { .. })));
	/// ```
	pub fn on_submit_requested(mut self, validator: &Validator) -> Transition {
		if let SubmissionState::Submitting { attempt } = self.submission {
			tracing::warn!(%attempt, "submit requested while a submission is in flight; ignoring");
			return Transition::to(self);
		}

		let errors = validator.validate(&self.values);
		if !errors.is_empty() {
			tracing::debug!(fields = errors.len(), "local validation failed");
			self.errors = errors;
			return Transition::to(self);
		}

		self.attempts += 1;
		let attempt = AttemptId(self.attempts);
		self.errors = ErrorMap::new();
		self.submission = SubmissionState::Submitting { attempt };
		tracing::debug!(%attempt, "local validation passed; submitting");

		let effect = Effect::Submit {
			attempt,
			values: self.values.clone(),
		};
		Transition {
			state: self,
			effect: Some(effect),
		}
	}

	/// The collaborator accepted `attempt`.
	pub fn on_submit_resolved(mut self, attempt: AttemptId) -> Self {
		if !self.owns(attempt) {
			return self;
		}
		self.submission = SubmissionState::Idle;
		self.errors = ErrorMap::new();
		self
	}

	/// The collaborator rejected `attempt` with `errors`.
	pub fn on_submit_rejected(mut self, attempt: AttemptId, errors: ErrorMap) -> Self {
		if !self.owns(attempt) {
			return self;
		}
		self.submission = SubmissionState::Idle;
		self.errors = errors;
		self
	}

	/// `attempt` was abandoned before it produced an outcome. Errors are left
	/// untouched.
	pub fn on_submit_cancelled(mut self, attempt: AttemptId) -> Self {
		if !self.owns(attempt) {
			return self;
		}
		tracing::debug!(%attempt, "submission cancelled");
		self.submission = SubmissionState::Idle;
		self
	}

	fn owns(&self, attempt: AttemptId) -> bool {
		let current = self.current_attempt();
		if current != Some(attempt) {
			tracing::warn!(%attempt, ?current, "ignoring outcome for a submission that is not in flight");
			return false;
		}
		true
	}
}
