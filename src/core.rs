//! Field values, validation and the login form transition machine.
//!
//! # Examples
//!
//! ```rust
//! use login_form::core::{FieldValues, validate};
//!
//! let errors = validate(&FieldValues::with("bruce@wayne.com", "secret"));
//! assert!(errors.is_empty());
//! ```

#[cfg(feature = "core")]
pub use login_form_core::*;
