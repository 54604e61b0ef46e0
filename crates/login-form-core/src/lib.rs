//! Login form core
//!
//! Data model, local validation and the pure transition machine of a
//! client-side login form. Nothing in this crate performs I/O: submitting is
//! expressed as an [`Effect`] that the host (or `login-form-submit`) executes,
//! and its outcome comes back as a [`FormEvent`].
//!
//! ## Modules
//!
//! - [`field`]: the `email` / `password` fields and their values
//! - [`errors`]: the error map shared by local and remote validation
//! - [`validators`]: pure field and form validators
//! - [`state`]: `FormState` and its transitions
//! - [`outcome`]: normalisation of submit collaborator failures
//! - [`messages`]: user-facing message strings
//!
//! ## Example
//!
//! ```
//! use login_form_core::{Effect, Field, FormState, SubmitError, Validator, outcome_event, Messages};
//!
//! let validator = Validator::new();
//! let state = FormState::new()
//!     .on_field_change(Field::Email, "bruce@wayne.com")
//!     .on_field_change(Field::Password, "secret");
//!
//! let transition = state.on_submit_requested(&validator);
//! let Some(Effect::Submit { attempt, values }) = transition.effect else {
//!     unreachable!("values are valid");
//! };
//! assert_eq!(values.email(), "bruce@wayne.com");
//!
//! // The collaborator answered with a field error.
//! let result = Err(SubmitError::rejected([(Field::Email, "already taken")]));
//! let event = outcome_event(attempt, result, &Messages::default());
//! let state = transition.state.apply(event, &validator).state;
//!
//! assert!(!state.is_loading());
//! assert_eq!(state.errors().field(Field::Email), Some("already taken"));
//! ```

pub mod errors;
pub mod field;
pub mod messages;
pub mod outcome;
pub mod state;
pub mod validators;

pub use errors::{ErrorKey, ErrorMap, FormError, FormResult, GLOBAL_KEY};
pub use field::{Field, FieldValues};
pub use messages::Messages;
pub use outcome::{SubmitError, SubmitResult, outcome_event};
pub use state::{
	AttemptId, Effect, FormEvent, FormSnapshot, FormState, SubmissionState, Transition,
};
pub use validators::{EmailValidator, FieldValidator, RequiredValidator, Validator, is_email, validate};
