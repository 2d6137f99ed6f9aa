//! # Region Configuration
//!
//! Two integer settings, read once at startup:
//!
//! | Key | Host label | Default |
//! |---|---|---|
//! | `underpassRegionId` | `Underpass Region ID` | 252 |
//! | `blockedRegionId` | `Not Passable Region ID` | 253 |
//!
//! Both sources resolve a setting the same way: the key wins when it holds a
//! value, a missing or blank key falls through to the host label, and a
//! missing or blank label falls back to the default. Integers may be given as
//! numbers or as strings. Anything else stops initialization.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::path::Path;

use serde::Deserialize;

use crate::constants::{
    BLOCKED_KEY, BLOCKED_LABEL, DEFAULT_BLOCKED_REGION_ID, DEFAULT_UNDERPASS_REGION_ID,
    UNDERPASS_KEY, UNDERPASS_LABEL,
};
use crate::error::{ConfigError, ConfigResult};
use crate::region::RegionId;

/// The two repurposed region ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionConfig {
    /// Region that becomes passable and drawn in front.
    pub underpass_region_id: RegionId,
    /// Region that becomes impassable and drawn in front.
    pub blocked_region_id: RegionId,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self::new(
            RegionId(DEFAULT_UNDERPASS_REGION_ID),
            RegionId(DEFAULT_BLOCKED_REGION_ID),
        )
    }
}

/// A setting as it appears in a settings document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSetting {
    Integer(i64),
    Text(String),
    Other(toml::Value),
}

impl RawSetting {
    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

/// Settings document shape. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct RawRegionConfig {
    #[serde(rename = "underpassRegionId", default)]
    underpass: Option<RawSetting>,
    #[serde(rename = "Underpass Region ID", default)]
    underpass_label: Option<RawSetting>,
    #[serde(rename = "blockedRegionId", default)]
    blocked: Option<RawSetting>,
    #[serde(rename = "Not Passable Region ID", default)]
    blocked_label: Option<RawSetting>,
}

impl RegionConfig {
    /// Creates a configuration from explicit ids.
    #[inline]
    #[must_use]
    pub const fn new(underpass_region_id: RegionId, blocked_region_id: RegionId) -> Self {
        Self {
            underpass_region_id,
            blocked_region_id,
        }
    }

    /// Reads the host's string parameters.
    ///
    /// Both the camel-case keys and the host labels are recognized; a blank
    /// key falls through to the label.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if a present, non-empty value is not an integer.
    pub fn from_parameters<S: BuildHasher>(params: &HashMap<String, String, S>) -> ConfigResult<Self> {
        let lookup = |key: &str, label: &str| {
            params
                .get(key)
                .filter(|value| !value.trim().is_empty())
                .or_else(|| params.get(label))
                .map(String::as_str)
        };

        let underpass = parse_text(
            UNDERPASS_KEY,
            lookup(UNDERPASS_KEY, UNDERPASS_LABEL),
            DEFAULT_UNDERPASS_REGION_ID,
        )?;
        let blocked = parse_text(
            BLOCKED_KEY,
            lookup(BLOCKED_KEY, BLOCKED_LABEL),
            DEFAULT_BLOCKED_REGION_ID,
        )?;

        Ok(Self::new(underpass, blocked).loaded())
    }

    /// Parses a TOML settings document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] for malformed documents and
    /// [`ConfigError::Parse`] for non-integer ids.
    pub fn from_toml_str(document: &str) -> ConfigResult<Self> {
        let raw: RawRegionConfig = toml::from_str(document).map_err(|e| {
            tracing::error!("region settings are not valid TOML: {}", e);
            ConfigError::from(e)
        })?;

        let pick = |key: Option<RawSetting>, label| key.filter(|s| !s.is_blank()).or(label);

        let underpass = resolve(
            UNDERPASS_KEY,
            pick(raw.underpass, raw.underpass_label),
            DEFAULT_UNDERPASS_REGION_ID,
        )?;
        let blocked = resolve(
            BLOCKED_KEY,
            pick(raw.blocked, raw.blocked_label),
            DEFAULT_BLOCKED_REGION_ID,
        )?;

        Ok(Self::new(underpass, blocked).loaded())
    }

    /// Reads and parses a TOML settings file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`RegionConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path).map_err(|e| {
            tracing::error!("cannot read region settings {}: {}", path.display(), e);
            ConfigError::from(e)
        })?;
        Self::from_toml_str(&document)
    }

    fn loaded(self) -> Self {
        if self.underpass_region_id == self.blocked_region_id {
            tracing::warn!(
                "underpass and blocked region ids are both {}; cells resolve as underpass",
                self.underpass_region_id.raw()
            );
        }
        tracing::info!(
            "region settings loaded: underpass={}, blocked={}",
            self.underpass_region_id.raw(),
            self.blocked_region_id.raw()
        );
        self
    }
}

fn resolve(key: &'static str, raw: Option<RawSetting>, default: i32) -> ConfigResult<RegionId> {
    match raw {
        None => Ok(RegionId(default)),
        Some(RawSetting::Integer(value)) => i32::try_from(value)
            .map(RegionId)
            .map_err(|_| parse_error(key, value.to_string())),
        Some(RawSetting::Text(text)) => parse_text(key, Some(&text), default),
        Some(RawSetting::Other(value)) => Err(parse_error(key, value.to_string())),
    }
}

fn parse_text(key: &'static str, text: Option<&str>, default: i32) -> ConfigResult<RegionId> {
    let trimmed = text.map_or("", str::trim);
    if trimmed.is_empty() {
        return Ok(RegionId(default));
    }
    trimmed
        .parse::<i32>()
        .map(RegionId)
        .map_err(|_| parse_error(key, trimmed.to_owned()))
}

fn parse_error(key: &'static str, value: String) -> ConfigError {
    tracing::error!("invalid region setting {} = {:?}", key, value);
    ConfigError::Parse { key, value }
}
