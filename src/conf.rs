//! Settings loading.
//!
//! # Examples
//!
//! ```rust
//! use login_form::conf::FormSettings;
//!
//! let settings = FormSettings::from_toml_str("submit_timeout_ms = 10000").unwrap();
//! assert_eq!(settings.submit_timeout().as_secs(), 10);
//! ```

#[cfg(feature = "conf")]
pub use login_form_conf::*;
