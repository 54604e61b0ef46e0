//! Settings loading integration tests
//!
//! Test Categories:
//! - Category 1: TOML files
//! - Category 2: Process environment layering

use login_form_conf::{FormSettings, SettingsError};
use rstest::rstest;
use serial_test::serial;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

const ENV_KEYS: [&str; 2] = [
	"LOGIN_FORM_SUBMIT_TIMEOUT_MS",
	"LOGIN_FORM_MESSAGE_REQUIRED",
];

fn clear_env() {
	for key in ENV_KEYS {
		// SAFETY: tests touching the process environment are serialized.
		unsafe { std::env::remove_var(key) };
	}
}

fn settings_file(contents: &str) -> NamedTempFile {
	let mut file = NamedTempFile::new().unwrap();
	file.write_all(contents.as_bytes()).unwrap();
	file
}

// ============================================================================
// Category 1: TOML files
// ============================================================================

#[rstest]
#[serial(login_form_env)]
fn test_load_from_file() {
	// Arrange
	clear_env();
	let file = settings_file(
		r#"
		[app]
		name = "dashboard"

		[form]
		submit_timeout_ms = 8000

		[form.messages]
		timed_out = "The server took too long"
		"#,
	);

	// Act
	let settings = FormSettings::load(Some(file.path())).unwrap();

	// Assert
	assert_eq!(settings.submit_timeout(), Duration::from_secs(8));
	assert_eq!(settings.messages.timed_out, "The server took too long");
	assert_eq!(settings.messages.required, "Please fill this field");
}

#[rstest]
fn test_missing_file_reports_path() {
	let err = FormSettings::from_toml_file("/nonexistent/login-form.toml").unwrap_err();

	assert!(matches!(err, SettingsError::Io { .. }));
	assert!(err.to_string().contains("/nonexistent/login-form.toml"));
}

// ============================================================================
// Category 2: Process environment layering
// ============================================================================

#[rstest]
#[serial(login_form_env)]
fn test_environment_overrides_file() {
	// Arrange
	clear_env();
	let file = settings_file("[form]\nsubmit_timeout_ms = 8000\n");
	// SAFETY: serialized with every other test touching these variables.
	unsafe {
		std::env::set_var("LOGIN_FORM_SUBMIT_TIMEOUT_MS", "1200");
		std::env::set_var("LOGIN_FORM_MESSAGE_REQUIRED", "Required");
	}

	// Act
	let settings = FormSettings::load(Some(file.path()));
	clear_env();

	// Assert
	let settings = settings.unwrap();
	assert_eq!(settings.submit_timeout_ms, 1200);
	assert_eq!(settings.messages.required, "Required");
}

#[rstest]
#[serial(login_form_env)]
fn test_defaults_without_sources() {
	clear_env();

	let settings = FormSettings::load(None).unwrap();

	assert_eq!(settings, FormSettings::default());
}

#[rstest]
#[serial(login_form_env)]
fn test_malformed_environment_value() {
	clear_env();
	// SAFETY: serialized with every other test touching these variables.
	unsafe { std::env::set_var("LOGIN_FORM_SUBMIT_TIMEOUT_MS", "soon") };

	let result = FormSettings::load(None);
	clear_env();

	assert!(matches!(result, Err(SettingsError::InvalidEnv { .. })));
}
