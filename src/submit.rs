//! Asynchronous submission: the collaborator seam, controller and session loop.
//!
//! # Examples
//!
//! ```rust,no_run
//! use login_form::submit::{FnSubmitter, FormSession, SubmissionController};
//! ```

#[cfg(feature = "submit")]
pub use login_form_submit::*;
