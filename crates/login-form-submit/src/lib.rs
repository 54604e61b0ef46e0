//! # login-form-submit
//!
//! Asynchronous submission lifecycle for the login form.
//!
//! - [`Submitter`]: the host-supplied collaborator that delivers values
//! - [`SubmissionController`]: validates, starts at most one submission at a
//!   time, applies a timeout and folds the outcome back into the form state
//! - [`FormSession`]: a tokio event loop around the controller, publishing
//!   [`FormSnapshot`](login_form_core::FormSnapshot)s over a watch channel
//!
//! ## Feature Flags
//!
//! - `conf` - build a [`SubmissionController`] from
//!   `login_form_conf::FormSettings` (`from_settings`, `From<&FormSettings>`)
//!
//! ## Outcomes
//!
//! | Submitter result | Form errors afterwards |
//! |------------------|------------------------|
//! | `Ok(())` | none |
//! | `Err(Rejected(map))` | `map` |
//! | `Err(Unstructured(_))` | `global`: unexpected error message |
//! | no answer before the timeout | `global`: timeout message |

pub mod controller;
pub mod session;
pub mod submitter;

pub use controller::{DEFAULT_SUBMIT_TIMEOUT, PendingSubmission, SubmissionController};
pub use session::{FormHandle, FormSession, SessionError, SessionResult};
pub use submitter::{FnSubmitter, Submitter};
