//! User-facing message strings.

use serde::{Deserialize, Serialize};

pub const INVALID_EMAIL: &str = "Please enter a valid email";
pub const REQUIRED: &str = "Please fill this field";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";
pub const TIMED_OUT: &str = "Request timed out";

/// Messages written into the [`ErrorMap`](crate::ErrorMap).
///
/// Every field falls back to its English default when absent from a
/// configuration source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
	/// Email field failed the syntax check.
	pub invalid_email: String,
	/// Password field is empty.
	pub required: String,
	/// Submission failed without a usable error payload.
	pub unexpected_error: String,
	/// Submission did not complete before the deadline.
	pub timed_out: String,
}

impl Default for Messages {
	fn default() -> Self {
		Self {
			invalid_email: INVALID_EMAIL.to_string(),
			required: REQUIRED.to_string(),
			unexpected_error: UNEXPECTED_ERROR.to_string(),
			timed_out: TIMED_OUT.to_string(),
		}
	}
}
