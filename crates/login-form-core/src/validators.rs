//! Local validation of the login form.
//!
//! Validation is pure: it reads [`FieldValues`] and returns an [`ErrorMap`],
//! with no I/O and no dependency on a rendering context. An empty map is the
//! only signal the state machine uses to decide whether to submit.
//!
//! ## Rules
//!
//! | Field | Fails when | Message |
//! |-------|------------|---------|
//! | `email` | not a syntactically valid address | "Please enter a valid email" |
//! | `password` | empty | "Please fill this field" |

use crate::errors::ErrorMap;
use crate::field::{Field, FieldValues};
use crate::messages::Messages;
use once_cell::sync::Lazy;
use regex::Regex;

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;

// One DNS label: alphanumerics (or non-ASCII letters) with inner hyphens, at most 63 chars.
static DOMAIN_LABEL: Lazy<Option<Regex>> = Lazy::new(|| {
	Regex::new(r"^[a-zA-Z0-9\x{00A1}-\x{FFFF}](?:[a-zA-Z0-9\x{00A1}-\x{FFFF}-]{0,61}[a-zA-Z0-9\x{00A1}-\x{FFFF}])?$")
		.ok()
});

static TOP_LEVEL_LABEL: Lazy<Option<Regex>> =
	Lazy::new(|| Regex::new(r"^(?:[a-zA-Z\x{00A1}-\x{FFFF}]{2,}|xn--[a-zA-Z0-9-]{2,})$").ok());

/// Validates a single field value.
pub trait FieldValidator: Send + Sync {
	/// `Ok(())` if the value passes, `Err(message)` otherwise.
	fn validate(&self, value: &str) -> Result<(), String>;
}

/// Email syntax check.
///
/// Accepts `local@domain` where the local part is a dot-separated run of
/// atoms or a quoted string, either of which may contain non-ASCII
/// characters, and the domain is a fully-qualified name with an alphabetic
/// top-level label. IP literals are rejected.
#[derive(Debug, Clone)]
pub struct EmailValidator {
	message: String,
}

impl EmailValidator {
	/// # Examples
	///
	/// ```
	/// use login_form_core::validators::{EmailValidator, FieldValidator};
	///
	/// let validator = EmailValidator::new();
	/// assert!(validator.validate("bruce@wayne.com").is_ok());
	/// assert!(validator.validate("user.name+tag@example.co.uk").is_ok());
	/// assert!(validator.validate("not-an-email").is_err());
	/// assert!(validator.validate("user@localhost").is_err());
	/// ```
	pub fn new() -> Self {
		Self::with_message(crate::messages::INVALID_EMAIL)
	}

	pub fn with_message(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}

	pub fn message(&self) -> &str {
		&self.message
	}

	fn validate_local_part(local: &str) -> bool {
		if local.is_empty() || local.len() > MAX_LOCAL_LEN {
			return false;
		}

		if local.len() >= 2 && local.starts_with('"') && local.ends_with('"') {
			return Self::validate_quoted_string(&local[1..local.len() - 1]);
		}

		!local.starts_with('.')
			&& !local.ends_with('.')
			&& !local.contains("..")
			&& local.chars().all(Self::is_atext_or_dot)
	}

	fn is_atext_or_dot(ch: char) -> bool {
		ch == '.'
			|| ch.is_ascii_alphanumeric()
			|| "!#$%&'*+-/=?^_`{|}~".contains(ch)
			|| Self::is_extended_char(ch)
	}

	// Non-ASCII ranges allowed anywhere in the local part.
	fn is_extended_char(ch: char) -> bool {
		matches!(
			ch,
			'\u{00A0}'..='\u{D7FF}' | '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFEF}'
		)
	}

	fn validate_quoted_string(inner: &str) -> bool {
		let mut escaped = false;

		for ch in inner.chars() {
			if escaped {
				// Any ASCII except NUL and line feed may be escaped.
				if !(Self::is_extended_char(ch) || (ch.is_ascii() && ch != '\0' && ch != '\n')) {
					return false;
				}
				escaped = false;
			} else if ch == '\\' {
				escaped = true;
			} else if !(Self::is_extended_char(ch) || (ch.is_ascii() && ch != '\0' && ch != '"')) {
				return false;
			}
		}

		!escaped
	}

	fn validate_domain_part(domain: &str) -> bool {
		let (Some(label_pattern), Some(tld_pattern)) =
			((*DOMAIN_LABEL).as_ref(), (*TOP_LEVEL_LABEL).as_ref())
		else {
			tracing::error!("email domain patterns failed to compile");
			return false;
		};

		// Reject full-width forms, which the label pattern's broad range would let through.
		if domain.chars().any(|ch| ch.is_whitespace() || ('\u{FF01}'..='\u{FF5E}').contains(&ch)) {
			return false;
		}

		let labels: Vec<&str> = domain.split('.').collect();
		if labels.len() < 2 {
			return false;
		}

		let Some(tld) = labels.last() else {
			return false;
		};

		tld_pattern.is_match(tld) && labels.iter().all(|label| label_pattern.is_match(label))
	}
}

impl Default for EmailValidator {
	fn default() -> Self {
		Self::new()
	}
}

impl FieldValidator for EmailValidator {
	fn validate(&self, value: &str) -> Result<(), String> {
		if value.len() > MAX_EMAIL_LEN {
			return Err(self.message.clone());
		}

		let Some((local, domain)) = value.rsplit_once('@') else {
			return Err(self.message.clone());
		};

		if Self::validate_local_part(local) && Self::validate_domain_part(domain) {
			Ok(())
		} else {
			Err(self.message.clone())
		}
	}
}

/// Fails on the empty string only; whitespace is a legitimate password.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
	message: String,
}

impl RequiredValidator {
	pub fn new() -> Self {
		Self::with_message(crate::messages::REQUIRED)
	}

	pub fn with_message(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}

	pub fn message(&self) -> &str {
		&self.message
	}
}

impl Default for RequiredValidator {
	fn default() -> Self {
		Self::new()
	}
}

impl FieldValidator for RequiredValidator {
	fn validate(&self, value: &str) -> Result<(), String> {
		if value.is_empty() {
			Err(self.message.clone())
		} else {
			Ok(())
		}
	}
}

/// Whole-form validator: one rule per field.
#[derive(Debug, Clone, Default)]
pub struct Validator {
	email: EmailValidator,
	password: RequiredValidator,
}

impl Validator {
	pub fn new() -> Self {
		Self::default()
	}

	/// Validator using configured message strings.
	pub fn with_messages(messages: &Messages) -> Self {
		Self {
			email: EmailValidator::with_message(&messages.invalid_email),
			password: RequiredValidator::with_message(&messages.required),
		}
	}

	/// Validate every field, collecting one message per failing field.
	///
	/// # Examples
	///
	/// ```
	/// use login_form_core::{Field, FieldValues, Validator};
	///
	/// let validator = Validator::new();
	///
	/// let errors = validator.validate(&FieldValues::with("not-an-email", ""));
	/// assert_eq!(errors.field(Field::Email), Some("Please enter a valid email"));
	/// assert_eq!(errors.field(Field::Password), Some("Please fill this field"));
	///
	/// assert!(validator.validate(&FieldValues::with("bruce@wayne.com", "secret")).is_empty());
	/// ```
	pub fn validate(&self, values: &FieldValues) -> ErrorMap {
		let mut errors = ErrorMap::new();

		for field in Field::ALL {
			let rule: &dyn FieldValidator = match field {
				Field::Email => &self.email,
				Field::Password => &self.password,
			};
			if let Err(message) = rule.validate(values.get(field)) {
				errors.insert(field, message);
			}
		}

		errors
	}
}

/// Validate with the default messages.
pub fn validate(values: &FieldValues) -> ErrorMap {
	Validator::new().validate(values)
}

/// Whether `value` passes the email syntax check.
pub fn is_email(value: &str) -> bool {
	EmailValidator::new().validate(value).is_ok()
}
