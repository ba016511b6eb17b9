//! Geocoder configuration.
//!
//! Defaults are embedded at compile time from `geocoder.toml` and can be
//! overridden per deployment through environment variables:
//!
//! | Variable | Field |
//! |---|---|
//! | `NOMINATIM_SEARCH_URL` | [`GeocoderConfig::search_url`] |
//! | `NOMINATIM_REVERSE_URL` | [`GeocoderConfig::reverse_url`] |
//! | `GEOCODER_USER_AGENT` | [`GeocoderConfig::user_agent`] |
//! | `GEOCODER_ACCEPT_LANGUAGE` | [`GeocoderConfig::accept_language`] |

use serde::Deserialize;
use thiserror::Error;

const EMBEDDED_TOML: &str = include_str!("../geocoder.toml");

/// Errors loading geocoder configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("Invalid geocoder config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A required field was empty.
    #[error("Geocoder config field '{field}' must not be empty")]
    Empty {
        /// Name of the empty field.
        field: &'static str,
    },
}

/// Endpoints and fixed request headers for the geocoding service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeocoderConfig {
    /// Forward search endpoint (free-text query to place).
    pub search_url: String,
    /// Reverse endpoint (coordinates to place).
    pub reverse_url: String,
    /// Value of the `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Value of the `Accept-Language` header sent with every request.
    pub accept_language: String,
    /// Optional per-request timeout. `None` leaves timeouts to the HTTP
    /// client defaults.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl GeocoderConfig {
    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the TOML is malformed or a required
    /// field is empty.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the configuration compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the embedded TOML is invalid.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_toml(EMBEDDED_TOML)
    }

    /// Returns the embedded configuration with environment overrides
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the embedded TOML is invalid or an
    /// override sets a field to the empty string.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::embedded()?.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up by environment variable name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Empty`] if an override leaves a field empty.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let fields: [(&str, &mut String); 4] = [
            ("NOMINATIM_SEARCH_URL", &mut self.search_url),
            ("NOMINATIM_REVERSE_URL", &mut self.reverse_url),
            ("GEOCODER_USER_AGENT", &mut self.user_agent),
            ("GEOCODER_ACCEPT_LANGUAGE", &mut self.accept_language),
        ];

        for (key, field) in fields {
            if let Some(value) = lookup(key) {
                log::debug!("Geocoder config override from {key}");
                *field = value;
            }
        }

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("search_url", &self.search_url),
            ("reverse_url", &self.reverse_url),
            ("user_agent", &self.user_agent),
            ("accept_language", &self.accept_language),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty { field });
            }
        }
        Ok(())
    }

    /// Builds a configuration pointing both endpoints at `base_url`, using
    /// the embedded identification headers. Intended for self-hosted
    /// instances and tests.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the embedded TOML is invalid.
    pub fn for_base_url(base_url: &str) -> Result<Self, ConfigError> {
        let base = base_url.trim_end_matches('/');
        Ok(Self {
            search_url: format!("{base}/search"),
            reverse_url: format!("{base}/reverse"),
            ..Self::embedded()?
        })
    }
}
