//! Login form fields and their values.
//!
//! The form has exactly two inputs, `email` and `password`. [`FieldValues`]
//! always holds both; a freshly mounted form starts with empty strings.

use crate::errors::{FormError, FormResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named input of the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
	Email,
	Password,
}

impl Field {
	/// All fields in render order.
	pub const ALL: [Field; 2] = [Field::Email, Field::Password];

	/// The input's `name` attribute.
	///
	/// # Examples
	///
	/// ```
	/// use login_form_core::Field;
	///
	/// assert_eq!(Field::Email.name(), "email");
	/// assert_eq!(Field::Password.name(), "password");
	/// ```
	pub fn name(self) -> &'static str {
		match self {
			Field::Email => "email",
			Field::Password => "password",
		}
	}
}

impl fmt::Display for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Field {
	type Err = FormError;

	/// Resolve a field from the input's `name` attribute.
	///
	/// # Examples
	///
	/// ```
	/// use login_form_core::Field;
	///
	/// assert_eq!("email".parse::<Field>().unwrap(), Field::Email);
	/// assert!("username".parse::<Field>().is_err());
	/// ```
	fn from_str(s: &str) -> FormResult<Self> {
		match s {
			"email" => Ok(Field::Email),
			"password" => Ok(Field::Password),
			other => Err(FormError::UnknownField(other.to_string())),
		}
	}
}

/// Current values of every form field.
///
/// Serializes as `{"email": "...", "password": "..."}`, which is the shape
/// handed to the submit collaborator.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValues {
	#[serde(default)]
	email: String,
	#[serde(default)]
	password: String,
}

impl FieldValues {
	/// Both fields empty.
	pub fn new() -> Self {
		Self::default()
	}

	/// Build values with both fields set.
	///
	/// # Examples
	///
	/// ```
	/// use login_form_core::{Field, FieldValues};
	///
	/// let values = FieldValues::with("bruce@wayne.com", "secret");
	/// assert_eq!(values.get(Field::Email), "bruce@wayne.com");
	/// ```
	pub fn with(email: impl Into<String>, password: impl Into<String>) -> Self {
		Self {
			email: email.into(),
			password: password.into(),
		}
	}

	pub fn get(&self, field: Field) -> &str {
		match field {
			Field::Email => &self.email,
			Field::Password => &self.password,
		}
	}

	/// Replace a single field's value, leaving the other untouched.
	pub fn set(&mut self, field: Field, value: impl Into<String>) {
		let slot = match field {
			Field::Email => &mut self.email,
			Field::Password => &mut self.password,
		};
		*slot = value.into();
	}

	/// Consuming variant of [`set`](Self::set).
	pub fn with_field(mut self, field: Field, value: impl Into<String>) -> Self {
		self.set(field, value);
		self
	}

	pub fn email(&self) -> &str {
		&self.email
	}

	pub fn password(&self) -> &str {
		&self.password
	}
}

// The password never reaches logs through `{:?}`.
impl fmt::Debug for FieldValues {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FieldValues")
			.field("email", &self.email)
			.field("password", &"[redacted]")
			.finish()
	}
}
