//! Form session event loop
//!
//! A [`FormSession`] owns a [`SubmissionController`] on a tokio task. The UI
//! talks to it through a cloneable [`FormHandle`]: field changes and submit
//! requests go in over a channel, [`FormSnapshot`]s come out over a watch
//! channel after every applied event.
//!
//! Submissions run on their own task so field changes keep being applied
//! while a call is in flight. Dropping every handle, or calling
//! [`FormHandle::shutdown`], stops the loop and aborts any outstanding call.

use crate::controller::{PendingSubmission, SubmissionController};
use crate::submitter::Submitter;
use futures::future::OptionFuture;
use login_form_core::{
	AttemptId, Field, FormEvent, FormSnapshot, FormState, SubmitError, outcome_event,
};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
	#[error("Form session has shut down")]
	Closed,
}

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug)]
enum Command {
	FieldChanged { field: Field, value: String },
	Submit,
	Shutdown,
}

/// UI-side handle to a running [`FormSession`].
#[derive(Debug, Clone)]
pub struct FormHandle {
	commands: mpsc::UnboundedSender<Command>,
	snapshots: watch::Receiver<FormSnapshot>,
}

impl FormHandle {
	pub fn field_changed(&self, field: Field, value: impl Into<String>) -> SessionResult<()> {
		self.send(Command::FieldChanged {
			field,
			value: value.into(),
		})
	}

	/// Forward an input's `name`/`value` pair. Unknown names are ignored.
	pub fn field_changed_by_name(&self, name: &str, value: impl Into<String>) -> SessionResult<()> {
		match name.parse::<Field>() {
			Ok(field) => self.field_changed(field, value),
			Err(e) => {
				tracing::debug!(error = %e, "ignoring change for unknown input");
				Ok(())
			}
		}
	}

	pub fn submit(&self) -> SessionResult<()> {
		self.send(Command::Submit)
	}

	pub fn shutdown(&self) -> SessionResult<()> {
		self.send(Command::Shutdown)
	}

	/// Latest published read model.
	pub fn snapshot(&self) -> FormSnapshot {
		self.snapshots.borrow().clone()
	}

	/// Wait for the next published snapshot.
	pub async fn changed(&mut self) -> SessionResult<FormSnapshot> {
		self.snapshots
			.changed()
			.await
			.map_err(|_| SessionError::Closed)?;
		Ok(self.snapshots.borrow_and_update().clone())
	}

	/// Wait until a published snapshot satisfies `predicate`.
	pub async fn wait_for(
		&mut self,
		mut predicate: impl FnMut(&FormSnapshot) -> bool,
	) -> SessionResult<FormSnapshot> {
		let snapshot = self
			.snapshots
			.wait_for(|snapshot| predicate(snapshot))
			.await
			.map_err(|_| SessionError::Closed)?;
		Ok(snapshot.clone())
	}

	pub fn subscribe(&self) -> watch::Receiver<FormSnapshot> {
		self.snapshots.clone()
	}

	fn send(&self, command: Command) -> SessionResult<()> {
		self.commands.send(command).map_err(|_| SessionError::Closed)
	}
}

/// Event loop serialising UI events and submit outcomes for one form.
pub struct FormSession {
	controller: SubmissionController,
	submitter: Arc<dyn Submitter>,
	commands: mpsc::UnboundedReceiver<Command>,
	snapshots: watch::Sender<FormSnapshot>,
	in_flight: Option<(AttemptId, JoinHandle<FormEvent>)>,
}

impl FormSession {
	pub fn new(controller: SubmissionController, submitter: Arc<dyn Submitter>) -> (Self, FormHandle) {
		let (command_tx, command_rx) = mpsc::unbounded_channel();
		let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());

		let session = Self {
			controller,
			submitter,
			commands: command_rx,
			snapshots: snapshot_tx,
			in_flight: None,
		};
		let handle = FormHandle {
			commands: command_tx,
			snapshots: snapshot_rx,
		};
		(session, handle)
	}

	/// Start the session on the current tokio runtime.
	///
	/// The join handle yields the final form state once the loop stops.
	///
	/// # Examples
	///
	/// ```
	/// use login_form_core::{Field, FieldValues, SubmitError};
	/// use login_form_submit::{FnSubmitter, FormSession, SubmissionController};
	/// use std::sync::Arc;
	///
	/// # tokio_test::block_on(async {
	/// let submitter = Arc::new(FnSubmitter::new(|_values: FieldValues| async {
	/// 	Err(SubmitError::rejected([(Field::Email, "already taken")]))
	/// }));
	/// let (mut handle, task) = FormSession::spawn(SubmissionController::new(), submitter);
	///
	/// handle.field_changed(Field::Email, "bruce@wayne.com").unwrap();
	/// handle.field_changed(Field::Password, "secret").unwrap();
	/// handle.submit().unwrap();
	///
	/// let done = handle.wait_for(|s| !s.errors.is_empty()).await.unwrap();
	/// assert_eq!(done.errors.field(Field::Email), Some("already taken"));
	/// assert!(!done.loading);
	///
	/// handle.shutdown().unwrap();
	/// let state = task.await.unwrap();
	/// assert_eq!(state.values().email(), "bruce@wayne.com");
	/// # });
	/// ```
	pub fn spawn(
		controller: SubmissionController,
		submitter: Arc<dyn Submitter>,
	) -> (FormHandle, JoinHandle<FormState>) {
		let (session, handle) = Self::new(controller, submitter);
		(handle, tokio::spawn(session.run()))
	}

	/// Process commands and outcomes until shut down.
	///
	/// A submission still in flight at shutdown is aborted and its attempt
	/// settled as cancelled, so the returned state is never `Submitting`.
	pub async fn run(mut self) -> FormState {
		loop {
			tokio::select! {
				command = self.commands.recv() => match command {
					Some(Command::FieldChanged { field, value }) => {
						self.controller.on_field_change(field, value);
					}
					Some(Command::Submit) => {
						if let Some(pending) = self.controller.request_submit() {
							self.start(pending);
						}
					}
					Some(Command::Shutdown) | None => break,
				},
				Some(joined) = OptionFuture::from(self.in_flight.as_mut().map(|(_, task)| task)) => {
					let Some((attempt, _)) = self.in_flight.take() else {
						continue;
					};
					let outcome = joined.unwrap_or_else(|e| {
						tracing::error!(%attempt, error = %e, "submission task did not complete");
						outcome_event(
							attempt,
							Err(SubmitError::unstructured(e.to_string())),
							self.controller.messages(),
						)
					});
					self.settle(outcome);
				}
			}
			self.publish();
		}

		if let Some((attempt, task)) = self.in_flight.take() {
			tracing::debug!(%attempt, "aborting in-flight submission on shutdown");
			task.abort();
			self.settle(FormEvent::SubmitCancelled { attempt });
			self.publish();
		}
		tracing::debug!("form session stopped");
		self.controller.into_state()
	}

	fn start(&mut self, pending: PendingSubmission) {
		let attempt = pending.attempt();
		let submitter = Arc::clone(&self.submitter);
		let task = tokio::spawn(async move { pending.run(submitter.as_ref()).await });
		self.in_flight = Some((attempt, task));
	}

	fn settle(&mut self, outcome: FormEvent) {
		if self.controller.apply(outcome).is_some() {
			tracing::error!("submit outcome unexpectedly started another submission");
		}
	}

	fn publish(&self) {
		let snapshot = self.controller.snapshot();
		self.snapshots.send_if_modified(|current| {
			if *current == snapshot {
				return false;
			}
			*current = snapshot;
			true
		});
	}
}
