//! Bootstrap settings.
//! Uses injected `AppPaths` so binaries control where the settings file lives.

use serde::{Deserialize, Serialize};
use std::fs;

use crate::error::SettingsError;
use crate::level::Level;
use crate::platform::AppPaths;

pub const ENV_LEVEL: &str = "COLORLOG_LEVEL";
pub const ENV_FULL_COLOR: &str = "COLORLOG_FULL_COLOR";
pub const ENV_INCLUDE_FUNCTION: &str = "COLORLOG_INCLUDE_FUNCTION";

/// Knobs accepted by [`setup_logging`](crate::setup::setup_logging).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Minimum severity the target logger emits.
    pub level: Level,
    /// Color the whole record instead of just the timestamp and level.
    pub full_color: bool,
    /// Add `[file:line -> function]` to each record.
    pub include_function: bool,
    /// Logger to configure; the root logger when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logger_name: Option<String>,
    /// Name of the logger implementation. Only `Logger` exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logger_type: Option<String>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            full_color: false,
            include_function: false,
            logger_name: None,
            logger_type: None,
        }
    }
}

// The settings file may hold other tables; only `[logging]` is ours.
#[derive(Deserialize, Default)]
struct SettingsFile {
    #[serde(default)]
    logging: LogSettings,
}

impl LogSettings {
    /// Load from the provided paths, then apply environment overrides. A
    /// missing file yields the defaults.
    pub fn load_with(paths: &dyn AppPaths) -> Result<Self, SettingsError> {
        let path = paths.config_path();

        let mut settings = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|source| SettingsError::Read {
                path: path.clone(),
                source,
            })?;
            Self::from_toml_str(&content)
                .map_err(|source| SettingsError::Parse { path: path.clone(), source })?
        } else {
            Self::default()
        };

        settings.apply_env(|var| std::env::var(var).ok())?;
        Ok(settings)
    }

    /// Parse the `[logging]` table of a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let file: SettingsFile = toml::from_str(content)?;
        Ok(file.logging)
    }

    /// Override fields from variables found by `lookup`.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), SettingsError> {
        if let Some(value) = lookup(ENV_LEVEL) {
            self.level = value.parse().map_err(|_| SettingsError::Env {
                var: ENV_LEVEL.to_string(),
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(ENV_FULL_COLOR) {
            self.full_color = parse_flag(ENV_FULL_COLOR, &value)?;
        }
        if let Some(value) = lookup(ENV_INCLUDE_FUNCTION) {
            self.include_function = parse_flag(ENV_INCLUDE_FUNCTION, &value)?;
        }
        Ok(())
    }
}

fn parse_flag(var: &str, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(SettingsError::Env {
            var: var.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::*;

    struct FixedPath(PathBuf);

    impl AppPaths for FixedPath {
        fn config_path(&self) -> PathBuf {
            self.0.clone()
        }
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn parses_logging_table_and_ignores_the_rest() {
        let settings = LogSettings::from_toml_str(
            r#"
            [service]
            port = 8080

            [logging]
            level = "debug"
            full_color = true
            logger_name = "app"
            "#,
        )
        .unwrap();

        assert_eq!(settings.level, Level::DEBUG);
        assert!(settings.full_color);
        assert!(!settings.include_function);
        assert_eq!(settings.logger_name.as_deref(), Some("app"));
    }

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(LogSettings::from_toml_str("").unwrap(), LogSettings::default());
    }

    #[test]
    fn rejects_unknown_level_names() {
        assert!(LogSettings::from_toml_str("[logging]\nlevel = \"loud\"").is_err());
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut settings = LogSettings::default();
        settings
            .apply_env(env(&[
                (ENV_LEVEL, "warning"),
                (ENV_INCLUDE_FUNCTION, "yes"),
            ]))
            .unwrap();
        assert_eq!(settings.level, Level::WARNING);
        assert!(settings.include_function);
        assert!(!settings.full_color);
    }

    #[test]
    fn invalid_flag_names_the_variable() {
        let mut settings = LogSettings::default();
        let err = settings
            .apply_env(env(&[(ENV_FULL_COLOR, "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_FULL_COLOR));
    }

    #[test]
    fn missing_file_yields_defaults_and_bad_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = FixedPath(dir.path().join("absent.toml"));
        let loaded = LogSettings::load_with(&missing).unwrap();
        assert_eq!(loaded.logger_name, None);

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "[logging\n").unwrap();
        let err = LogSettings::load_with(&FixedPath(broken)).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }
}
