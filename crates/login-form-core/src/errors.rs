//! Error map shared by local and remote validation, plus crate errors.
//!
//! An [`ErrorMap`] maps a field (or the reserved `global` key) to a
//! human-readable message. A missing key means the field is currently valid.
//! Local validator output and server-reported errors both end up here, so a
//! presentation layer only needs a single error rendering path.

use crate::field::Field;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Reserved key for messages that are not tied to a single field.
pub const GLOBAL_KEY: &str = "global";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
	#[error("Unknown field: {0}")]
	UnknownField(String),
	#[error("Unknown error key: {0}")]
	UnknownErrorKey(String),
}

pub type FormResult<T> = Result<T, FormError>;

/// Key of an [`ErrorMap`] entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ErrorKey {
	Field(Field),
	Global,
}

impl ErrorKey {
	pub fn as_str(self) -> &'static str {
		match self {
			ErrorKey::Field(field) => field.name(),
			ErrorKey::Global => GLOBAL_KEY,
		}
	}
}

impl From<Field> for ErrorKey {
	fn from(field: Field) -> Self {
		ErrorKey::Field(field)
	}
}

impl fmt::Display for ErrorKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ErrorKey {
	type Err = FormError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s == GLOBAL_KEY {
			return Ok(ErrorKey::Global);
		}
		s.parse::<Field>()
			.map(ErrorKey::Field)
			.map_err(|_| FormError::UnknownErrorKey(s.to_string()))
	}
}

impl TryFrom<String> for ErrorKey {
	type Error = FormError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<ErrorKey> for String {
	fn from(key: ErrorKey) -> Self {
		key.as_str().to_string()
	}
}

/// Per-field (or global) error messages.
///
/// Replaced wholesale on every validation or submission cycle; it is never
/// merged with a previous map.
///
/// # Examples
///
/// ```
/// use login_form_core::{ErrorKey, ErrorMap, Field};
///
/// let mut errors = ErrorMap::new();
/// assert!(errors.is_empty());
///
/// errors.insert(Field::Email, "already taken");
/// assert_eq!(errors.field(Field::Email), Some("already taken"));
/// assert!(!errors.has_error(Field::Password));
/// assert_eq!(errors.get(ErrorKey::Global), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<ErrorKey, String>);

impl ErrorMap {
	pub fn new() -> Self {
		Self::default()
	}

	/// A map holding a single `global` message.
	pub fn global_message(message: impl Into<String>) -> Self {
		let mut errors = Self::new();
		errors.insert(ErrorKey::Global, message);
		errors
	}

	pub fn insert(&mut self, key: impl Into<ErrorKey>, message: impl Into<String>) {
		self.0.insert(key.into(), message.into());
	}

	pub fn get(&self, key: impl Into<ErrorKey>) -> Option<&str> {
		self.0.get(&key.into()).map(String::as_str)
	}

	pub fn field(&self, field: Field) -> Option<&str> {
		self.get(field)
	}

	pub fn global(&self) -> Option<&str> {
		self.get(ErrorKey::Global)
	}

	pub fn has_error(&self, key: impl Into<ErrorKey>) -> bool {
		self.0.contains_key(&key.into())
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = (ErrorKey, &str)> {
		self.0.iter().map(|(key, message)| (*key, message.as_str()))
	}
}

impl<K: Into<ErrorKey>, V: Into<String>> FromIterator<(K, V)> for ErrorMap {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(key, message)| (key.into(), message.into()))
				.collect(),
		)
	}
}

impl IntoIterator for ErrorMap {
	type Item = (ErrorKey, String);
	type IntoIter = std::collections::btree_map::IntoIter<ErrorKey, String>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}
