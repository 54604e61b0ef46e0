//! Submission controller
//!
//! Owns one [`FormState`] and turns its submit effects into calls on a
//! [`Submitter`], bounded by a timeout. Every call ends in exactly one
//! outcome event, so the loading flag is always cleared.

use crate::submitter::Submitter;
#[cfg(feature = "conf")]
use login_form_conf::FormSettings;
use login_form_core::{
	AttemptId, Effect, Field, FieldValues, FormEvent, FormSnapshot, FormState, Messages,
	SubmitError, Validator, outcome_event,
};
use std::time::Duration;

pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

/// A submit call the controller has committed to but not yet made.
///
/// The form is already `Submitting` when this exists. Run it to completion
/// and feed the returned event back through [`SubmissionController::apply`].
#[derive(Debug)]
#[must_use = "the form stays in the submitting state until this submission is run"]
pub struct PendingSubmission {
	attempt: AttemptId,
	values: FieldValues,
	timeout: Duration,
	messages: Messages,
}

impl PendingSubmission {
	pub fn attempt(&self) -> AttemptId {
		self.attempt
	}

	pub fn values(&self) -> &FieldValues {
		&self.values
	}

	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	/// Call `submitter` once and map its result to the outcome event.
	///
	/// If the deadline passes first, the call future is dropped and the
	/// attempt ends as [`SubmitError::TimedOut`].
	pub async fn run<S>(self, submitter: &S) -> FormEvent
	where
		S: Submitter + ?Sized,
	{
		let attempt = self.attempt;
		tracing::info!(%attempt, timeout_ms = self.timeout.as_millis() as u64, "submitting login form");

		let result = match tokio::time::timeout(self.timeout, submitter.submit(self.values)).await {
			Ok(result) => result,
			Err(_) => Err(SubmitError::TimedOut),
		};
		if result.is_ok() {
			tracing::info!(%attempt, "login form submitted");
		}

		outcome_event(attempt, result, &self.messages)
	}
}

/// Drives one mounted login form.
///
/// # Examples
///
/// ```
/// use login_form_core::{Field, FieldValues};
/// use login_form_submit::{FnSubmitter, SubmissionController};
///
/// # tokio_test::block_on(async {
/// let submitter = FnSubmitter::new(|_values: FieldValues| async { Ok(()) });
/// let mut controller = SubmissionController::new();
///
/// controller.on_field_change(Field::Email, "bruce@wayne.com");
/// controller.on_field_change(Field::Password, "secret");
///
/// assert!(controller.submit(&submitter).await.is_some());
/// assert!(!controller.is_loading());
/// assert!(controller.state().errors().is_empty());
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct SubmissionController {
	state: FormState,
	validator: Validator,
	messages: Messages,
	timeout: Duration,
}

impl SubmissionController {
	pub fn new() -> Self {
		Self::with_messages(Messages::default())
	}

	/// Controller whose validator and failure messages use `messages`.
	pub fn with_messages(messages: Messages) -> Self {
		Self {
			state: FormState::new(),
			validator: Validator::with_messages(&messages),
			messages,
			timeout: DEFAULT_SUBMIT_TIMEOUT,
		}
	}

	#[cfg(feature = "conf")]
	pub fn from_settings(settings: &FormSettings) -> Self {
		Self::with_messages(settings.messages.clone()).with_timeout(settings.submit_timeout())
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	/// Start from prefilled values, e.g. a remembered email.
	pub fn with_values(mut self, values: FieldValues) -> Self {
		self.state = FormState::with_values(values);
		self
	}

	pub fn state(&self) -> &FormState {
		&self.state
	}

	pub fn into_state(self) -> FormState {
		self.state
	}

	pub fn snapshot(&self) -> FormSnapshot {
		self.state.snapshot()
	}

	pub fn is_loading(&self) -> bool {
		self.state.is_loading()
	}

	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	pub fn messages(&self) -> &Messages {
		&self.messages
	}

	pub fn on_field_change(&mut self, field: Field, value: impl Into<String>) {
		self.replace(|state, _| state.on_field_change(field, value));
	}

	/// Validate the current values and commit to a submit call.
	///
	/// Returns `None` when validation failed (the errors are now in the
	/// state) or a submission is already in flight.
	pub fn request_submit(&mut self) -> Option<PendingSubmission> {
		self.apply(FormEvent::SubmitRequested)
	}

	/// Apply any event, returning the submission it starts, if any.
	pub fn apply(&mut self, event: FormEvent) -> Option<PendingSubmission> {
		let transition = std::mem::take(&mut self.state).apply(event, &self.validator);
		self.state = transition.state;
		transition.effect.map(|effect| self.pending(effect))
	}

	/// Request a submit and, if one starts, run it against `submitter` and
	/// apply its outcome.
	///
	/// Returns the attempt that was made, or `None` if nothing was sent.
	pub async fn submit<S>(&mut self, submitter: &S) -> Option<AttemptId>
	where
		S: Submitter + ?Sized,
	{
		let pending = self.request_submit()?;
		let attempt = pending.attempt();
		let outcome = pending.run(submitter).await;
		self.replace(|state, validator| state.apply(outcome, validator).state);
		Some(attempt)
	}

	fn pending(&self, effect: Effect) -> PendingSubmission {
		match effect {
			Effect::Submit { attempt, values } => PendingSubmission {
				attempt,
				values,
				timeout: self.timeout,
				messages: self.messages.clone(),
			},
		}
	}

	fn replace(&mut self, f: impl FnOnce(FormState, &Validator) -> FormState) {
		let state = std::mem::take(&mut self.state);
		self.state = f(state, &self.validator);
	}
}

impl Default for SubmissionController {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(feature = "conf")]
impl From<&FormSettings> for SubmissionController {
	fn from(settings: &FormSettings) -> Self {
		Self::from_settings(settings)
	}
}
