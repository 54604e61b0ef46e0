//! The submit collaborator seam.

use async_trait::async_trait;
use login_form_core::{FieldValues, SubmitResult};
use std::future::Future;

/// Host-supplied call that delivers validated values to the backend.
///
/// Implementations report failure through [`SubmitError`](login_form_core::SubmitError):
/// structured per-field errors as `Rejected`, anything else as `Unstructured`.
/// Timeouts are imposed by the caller and need not be handled here.
#[async_trait]
pub trait Submitter: Send + Sync {
	async fn submit(&self, values: FieldValues) -> SubmitResult;
}

/// [`Submitter`] backed by an async closure.
///
/// # Examples
///
/// ```
/// use login_form_core::{FieldValues, SubmitError};
/// use login_form_submit::{FnSubmitter, Submitter};
///
/// let submitter = FnSubmitter::new(|values: FieldValues| async move {
/// 	if values.email() == "taken@example.com" {
/// 		return Err(SubmitError::rejected([(login_form_core::Field::Email, "already taken")]));
/// 	}
/// 	Ok(())
/// });
///
/// # tokio_test::block_on(async {
/// let result = submitter.submit(FieldValues::with("bruce@wayne.com", "secret")).await;
/// assert!(result.is_ok());
/// # });
/// ```
pub struct FnSubmitter<F> {
	f: F,
}

impl<F> FnSubmitter<F> {
	pub fn new<Fut>(f: F) -> Self
	where
		F: Fn(FieldValues) -> Fut + Send + Sync,
		Fut: Future<Output = SubmitResult> + Send + 'static,
	{
		Self { f }
	}
}

#[async_trait]
impl<F, Fut> Submitter for FnSubmitter<F>
where
	F: Fn(FieldValues) -> Fut + Send + Sync,
	Fut: Future<Output = SubmitResult> + Send + 'static,
{
	async fn submit(&self, values: FieldValues) -> SubmitResult {
		(self.f)(values).await
	}
}
