//! Login form settings.
//!
//! Sources are layered, later ones overriding earlier ones:
//!
//! 1. built-in defaults
//! 2. a TOML document (top level or a `[form]` table)
//! 3. environment variables prefixed with `LOGIN_FORM_`
//!
//! | Setting | TOML key | Environment variable | Default |
//! |---------|----------|----------------------|---------|
//! | submit timeout | `submit_timeout_ms` | `LOGIN_FORM_SUBMIT_TIMEOUT_MS` | `30000` |
//! | invalid email message | `messages.invalid_email` | `LOGIN_FORM_MESSAGE_INVALID_EMAIL` | "Please enter a valid email" |
//! | required message | `messages.required` | `LOGIN_FORM_MESSAGE_REQUIRED` | "Please fill this field" |
//! | unexpected error message | `messages.unexpected_error` | `LOGIN_FORM_MESSAGE_UNEXPECTED_ERROR` | "An unexpected error occurred" |
//! | timeout message | `messages.timed_out` | `LOGIN_FORM_MESSAGE_TIMED_OUT` | "Request timed out" |
//!
//! ## Example
//!
//! ```
//! use login_form_conf::FormSettings;
//! use std::time::Duration;
//!
//! let settings = FormSettings::from_toml_str(r#"
//!     [form]
//!     submit_timeout_ms = 5000
//!
//!     [form.messages]
//!     required = "Required"
//! "#).unwrap();
//!
//! assert_eq!(settings.submit_timeout(), Duration::from_secs(5));
//! assert_eq!(settings.messages.required, "Required");
//! assert_eq!(settings.messages.invalid_email, "Please enter a valid email");
//! ```

use crate::env::Env;
use login_form_core::{Messages, Validator};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SUBMIT_TIMEOUT_MS: u64 = 30_000;

/// Table name used when the settings live inside a larger TOML document.
pub const TOML_TABLE: &str = "form";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Failed to read settings file {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("Invalid TOML settings: {0}")]
	Toml(#[from] toml::de::Error),
	#[error("Invalid value for environment variable {key}: {message}")]
	InvalidEnv { key: String, message: String },
	#[error("Invalid setting {field}: {message}")]
	Invalid { field: &'static str, message: String },
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Settings consumed by the validator and the submission controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
	/// Deadline for one submit call, in milliseconds.
	pub submit_timeout_ms: u64,
	pub messages: Messages,
}

impl Default for FormSettings {
	fn default() -> Self {
		Self {
			submit_timeout_ms: DEFAULT_SUBMIT_TIMEOUT_MS,
			messages: Messages::default(),
		}
	}
}

impl FormSettings {
	pub fn submit_timeout(&self) -> Duration {
		Duration::from_millis(self.submit_timeout_ms)
	}

	/// Validator using the configured messages.
	pub fn validator(&self) -> Validator {
		Validator::with_messages(&self.messages)
	}

	/// Parse a TOML document, reading the `[form]` table when present.
	pub fn from_toml_str(source: &str) -> SettingsResult<Self> {
		let mut table: toml::Table = toml::from_str(source)?;
		let section = match table.remove(TOML_TABLE) {
			Some(toml::Value::Table(section)) => section,
			Some(_) => {
				return Err(SettingsError::Invalid {
					field: TOML_TABLE,
					message: "expected a table".to_string(),
				});
			}
			None => table,
		};

		let settings: Self = toml::Value::Table(section).try_into()?;
		settings.validate()?;
		Ok(settings)
	}

	pub fn from_toml_file(path: impl AsRef<Path>) -> SettingsResult<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		tracing::debug!(path = %path.display(), "loading login form settings");
		Self::from_toml_str(&source)
	}

	/// Override fields with whatever `env` defines.
	pub fn apply_env(mut self, env: &Env) -> SettingsResult<Self> {
		if let Some(timeout) = env.u64("SUBMIT_TIMEOUT_MS")? {
			self.submit_timeout_ms = timeout;
		}

		let messages = [
			("MESSAGE_INVALID_EMAIL", &mut self.messages.invalid_email),
			("MESSAGE_REQUIRED", &mut self.messages.required),
			("MESSAGE_UNEXPECTED_ERROR", &mut self.messages.unexpected_error),
			("MESSAGE_TIMED_OUT", &mut self.messages.timed_out),
		];
		for (key, slot) in messages {
			if let Some(value) = env.str(key) {
				*slot = value;
			}
		}

		self.validate()?;
		Ok(self)
	}

	/// Defaults, then `path` if given, then the process environment.
	pub fn load(path: Option<&Path>) -> SettingsResult<Self> {
		let settings = match path {
			Some(path) => Self::from_toml_file(path)?,
			None => Self::default(),
		};
		settings.apply_env(&Env::new())
	}

	pub fn validate(&self) -> SettingsResult<()> {
		if self.submit_timeout_ms == 0 {
			return Err(SettingsError::Invalid {
				field: "submit_timeout_ms",
				message: "must be greater than zero".to_string(),
			});
		}

		let messages = [
			("messages.invalid_email", &self.messages.invalid_email),
			("messages.required", &self.messages.required),
			("messages.unexpected_error", &self.messages.unexpected_error),
			("messages.timed_out", &self.messages.timed_out),
		];
		for (field, message) in messages {
			if message.trim().is_empty() {
				return Err(SettingsError::Invalid {
					field,
					message: "must not be blank".to_string(),
				});
			}
		}

		Ok(())
	}
}
