//! Configuration for the login form
//!
//! Loads [`FormSettings`] (submit timeout and user-facing messages) from
//! built-in defaults, TOML, and `LOGIN_FORM_`-prefixed environment variables.
//!
//! - [`settings`]: the settings struct, loaders and validation
//! - [`env`]: prefixed environment lookup

pub mod env;
pub mod settings;

pub use env::{DEFAULT_PREFIX, Env};
pub use settings::{
	DEFAULT_SUBMIT_TIMEOUT_MS, FormSettings, SettingsError, SettingsResult, TOML_TABLE,
};
