//! # login-form
//!
//! Headless core of an email/password login form: local validation,
//! a submission lifecycle with at most one call in flight, and
//! reconciliation of server-side errors into a single error map.
//!
//! Rendering is left to the host. The crate exposes the field values, the
//! error map and a `loading` flag, and consumes field changes and submit
//! requests.
//!
//! ## Feature Flags
//!
//! ### Presets
//!
//! - `minimal` - Validators and the pure transition machine
//! - `standard` - `minimal` plus the async submission controller
//! - `full` (default) - Everything, including settings loading
//!
//! ### Fine-grained Control
//!
//! - `core` - [`login_form_core`]
//! - `conf` - [`login_form_conf`]; with `submit` also enables
//!   `SubmissionController::from_settings`
//! - `submit` - [`login_form_submit`]
//!
//! ## Quick Example
//!
//! ```rust
//! use login_form::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let settings = FormSettings::default();
//! let mut controller = SubmissionController::from_settings(&settings);
//! let submitter = FnSubmitter::new(|values: FieldValues| async move {
//! 	if values.email() == "bruce@wayne.com" {
//! 		Err(SubmitError::rejected([(Field::Email, "already taken")]))
//! 	} else {
//! 		Ok(())
//! 	}
//! });
//!
//! controller.on_field_change(Field::Email, "bruce@wayne.com");
//! controller.on_field_change(Field::Password, "secret");
//! controller.submit(&submitter).await;
//!
//! assert_eq!(controller.state().errors().field(Field::Email), Some("already taken"));
//! assert!(!controller.is_loading());
//! # });
//! ```
//!
//! ## Error Map
//!
//! | Source | Keys | Example |
//! |--------|------|---------|
//! | local validation | `email`, `password` | `{email: "Please enter a valid email"}` |
//! | server rejection | `email`, `password`, `global` | `{email: "already taken"}` |
//! | transport failure | `global` | `{global: "An unexpected error occurred"}` |
//! | timeout | `global` | `{global: "Request timed out"}` |

#[cfg(feature = "conf")]
pub mod conf;
#[cfg(feature = "core")]
pub mod core;
#[cfg(feature = "submit")]
pub mod submit;

// Re-export member crates so users depend on the facade only
#[cfg(feature = "conf")]
pub use login_form_conf;
#[cfg(feature = "core")]
pub use login_form_core;
#[cfg(feature = "submit")]
pub use login_form_submit;

// Frequently used types at the crate root
#[cfg(feature = "core")]
pub use login_form_core::{
	ErrorKey, ErrorMap, Field, FieldValues, FormEvent, FormSnapshot, FormState, Messages,
	SubmitError, SubmitResult, Validator,
};

#[cfg(feature = "conf")]
pub use login_form_conf::{FormSettings, SettingsError};

#[cfg(feature = "submit")]
pub use login_form_submit::{
	FnSubmitter, FormHandle, FormSession, SessionError, SubmissionController, Submitter,
};

/// Everything a host needs to wire up a login form.
pub mod prelude {
	#[cfg(feature = "core")]
	pub use crate::{
		ErrorKey, ErrorMap, Field, FieldValues, FormEvent, FormSnapshot, FormState, Messages,
		SubmitError, SubmitResult, Validator,
	};

	#[cfg(feature = "conf")]
	pub use crate::{FormSettings, SettingsError};

	#[cfg(feature = "submit")]
	pub use crate::{
		FnSubmitter, FormHandle, FormSession, SessionError, SubmissionController, Submitter,
	};
}
