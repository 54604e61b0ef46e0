//! Environment variable lookup with prefix support.

use crate::settings::{SettingsError, SettingsResult};
use std::collections::HashMap;

/// Default prefix for every login form variable.
pub const DEFAULT_PREFIX: &str = "LOGIN_FORM_";

/// Prefixed environment reader.
///
/// Reads the process environment unless built with [`Env::from_vars`],
/// which is how hosts without a process environment (and tests) feed it.
#[derive(Debug, Clone)]
pub struct Env {
	prefix: String,
	vars: Option<HashMap<String, String>>,
}

impl Env {
	pub fn new() -> Self {
		Self {
			prefix: DEFAULT_PREFIX.to_string(),
			vars: None,
		}
	}

	/// Read from a fixed set of variables instead of the process environment.
	///
	/// # Examples
	///
	/// ```
	/// use login_form_conf::Env;
	///
	/// let env = Env::from_vars([("LOGIN_FORM_SUBMIT_TIMEOUT_MS", "5000")]);
	/// assert_eq!(env.u64("SUBMIT_TIMEOUT_MS").unwrap(), Some(5000));
	/// assert_eq!(env.str("MESSAGE_REQUIRED"), None);
	/// ```
	pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			prefix: DEFAULT_PREFIX.to_string(),
			vars: Some(
				vars.into_iter()
					.map(|(key, value)| (key.into(), value.into()))
					.collect(),
			),
		}
	}

	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	fn key_name(&self, key: &str) -> String {
		format!("{}{}", self.prefix, key)
	}

	/// Raw value of `<prefix><key>`, if set.
	pub fn str(&self, key: &str) -> Option<String> {
		let full_key = self.key_name(key);
		match &self.vars {
			Some(vars) => vars.get(&full_key).cloned(),
			None => std::env::var(&full_key).ok(),
		}
	}

	/// Unsigned integer value of `<prefix><key>`, if set.
	pub fn u64(&self, key: &str) -> SettingsResult<Option<u64>> {
		let Some(raw) = self.str(key) else {
			return Ok(None);
		};
		raw.trim()
			.parse::<u64>()
			.map(Some)
			.map_err(|e| SettingsError::InvalidEnv {
				key: self.key_name(key),
				message: e.to_string(),
			})
	}
}

impl Default for Env {
	fn default() -> Self {
		Self::new()
	}
}
