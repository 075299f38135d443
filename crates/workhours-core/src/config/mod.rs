use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};
use serde::Deserialize;

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_EXPANSION_LIMIT, ENV_PREFIX};
use crate::error::{CoreError, CoreResult};


/// Largest UTC offset any real timezone uses, in hours.
const MAX_UTC_OFFSET_HOURS: f64 = 14.0;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub recurrence: RecurrenceDefaults,
    #[serde(default)]
    pub presets: Vec<PresetSettings>,
    #[serde(default)]
    pub date_rules: Vec<DateRuleSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Defaults applied to a freshly created recurrence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RecurrenceDefaults {
    pub timezone: String,
    pub utc_offset_hours: f64,
    pub expansion_limit: u16,
}

/// A raw preset bundle as it appears in the `[[presets]]` table.
///
/// Values are not range-checked here; the recurrence model validates them
/// when the preset is applied.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PresetSettings {
    pub name: String,
    pub period: String,
    pub interval: i64,
    pub count: i64,
}

/// A raw holiday-style date rule from the `[[date_rules]]` table.
///
/// `kind` is `"nth_weekday"` (uses `week`, `weekday` and an optional `month`)
/// or `"lunar"` (uses `month`, `day` and `leap`). Which fields are required
/// is checked by the recurrence model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DateRuleSettings {
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub month: Option<i64>,
    #[serde(default)]
    pub week: Option<i64>,
    #[serde(default)]
    pub weekday: Option<i64>,
    #[serde(default)]
    pub day: Option<i64>,
    #[serde(default)]
    pub leap: bool,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, an optional `workhours.toml` and
    /// `WORKHOURS_*` environment variables into a `Settings`.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building, deserializing or validating the
    /// configuration fails.
    pub fn load() -> Result<Self> {
        let settings = with_defaults()?
            // TOML file
            .add_source(config::File::with_name(CONFIG_FILE_NAME).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks values the deserializer cannot constrain on its own.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` describing the first bad value.
    pub fn validate(&self) -> CoreResult<()> {
        if self.logging.level.trim().is_empty() {
            return Err(CoreError::InvalidConfiguration(
                "logging.level must not be empty".to_string(),
            ));
        }

        let offset = self.recurrence.utc_offset_hours;
        if !offset.is_finite() || offset.abs() > MAX_UTC_OFFSET_HOURS {
            return Err(CoreError::InvalidConfiguration(format!(
                "recurrence.utc_offset_hours out of range: {offset}"
            )));
        }

        if self.recurrence.expansion_limit == 0 {
            return Err(CoreError::InvalidConfiguration(
                "recurrence.expansion_limit must be positive".to_string(),
            ));
        }

        if let Some(preset) = self.presets.iter().find(|p| p.name.trim().is_empty()) {
            return Err(CoreError::InvalidConfiguration(format!(
                "preset with period '{}' has an empty name",
                preset.period
            )));
        }

        if let Some(rule) = self.date_rules.iter().find(|r| r.name.trim().is_empty()) {
            return Err(CoreError::InvalidConfiguration(format!(
                "date rule of kind '{}' has an empty name",
                rule.kind
            )));
        }

        tracing::debug!(
            presets = self.presets.len(),
            date_rules = self.date_rules.len(),
            "Settings validated"
        );
        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables, `.env` and `workhours.toml`.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}

/// ## Summary
/// Parses settings from an in-memory TOML document, on top of the same
/// defaults `Settings::load` uses.
///
/// ## Errors
/// Returns `CoreError::ParseError` if the document is malformed, or
/// `CoreError::InvalidConfiguration` if a value is out of range.
pub fn parse_settings(toml: &str) -> CoreResult<Settings> {
    let settings = with_defaults()
        .and_then(|builder| {
            builder
                .add_source(config::File::from_str(toml, config::FileFormat::Toml))
                .build()
        })
        .and_then(|config| config.try_deserialize::<Settings>())
        .map_err(|e| CoreError::ParseError(e.to_string()))?;

    settings.validate()?;
    Ok(settings)
}

fn with_defaults() -> std::result::Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("logging.level", "info")?
        .set_default("recurrence.timezone", "UTC")?
        .set_default("recurrence.utc_offset_hours", 0.0)?
        .set_default(
            "recurrence.expansion_limit",
            i64::from(DEFAULT_EXPANSION_LIMIT),
        )
}
