//! Build-time configuration for connection fields.

use serde::{Deserialize, Serialize};
use std::{fs::File, path::Path, str::FromStr};
use strum::{AsRefStr, EnumString};
use thiserror::Error;

/// Error type returned by configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Error parsing env variables from config")]
    EnvVarParseError(#[from] std::env::VarError),
    #[error("Invalid value {1:?} for env variable {0}")]
    EnvVarValueError(String, String),
    #[error("Error processing file: {0:?}")]
    ConfigFileError(#[from] std::io::Error),
    #[error("Error processing YAML file: {0:?}")]
    SerdeYamlError(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Environment variables overriding file configuration.
#[derive(Debug, EnumString, AsRefStr)]
pub enum EnvVar {
    #[strum(serialize = "CONNECTION_MALFORMED_CURSOR")]
    MalformedCursor,
    #[strum(serialize = "CONNECTION_MAX_PAGE_SIZE")]
    MaxPageSize,
}

pub trait Env {
    fn inject_opt_env_vars(&mut self) -> ConfigResult<()>;
}

/// What to do with a `before`/`after` argument that does not decode.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MalformedCursorPolicy {
    /// Fail the request.
    #[default]
    Reject,
    /// Log a warning and paginate as if the bound were absent.
    Ignore,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Name of the root query type. May be an env var reference such as
    /// `${QUERY_TYPE_NAME}`.
    pub query_type_name: String,
    pub malformed_cursor: MalformedCursorPolicy,
    /// Largest `first`/`last` a request may ask for. Also used as `first`
    /// when a request supplies neither.
    pub max_page_size: Option<u64>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            query_type_name: "Query".to_string(),
            malformed_cursor: MalformedCursorPolicy::default(),
            max_page_size: None,
        }
    }
}

impl ConnectionConfig {
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let file = File::open(path)?;
        let config = serde_yaml::from_reader(file)?;
        Ok(config)
    }
}

/// Reads an optional override. An unset variable is not an error.
fn opt_env_var(var: EnvVar) -> ConfigResult<Option<String>> {
    match std::env::var(var.as_ref()) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Determine whether a given value is an environment variable reference.
fn is_opt_env_var(k: &str) -> bool {
    k.starts_with('$') || (k.starts_with("${") && k.ends_with('}'))
}

fn trim_opt_env_key(key: &str) -> &str {
    // Ambiguous key: $FOO, non-ambiguous key: ${FOO}
    key.strip_prefix("${")
        .and_then(|key| key.strip_suffix('}'))
        .or_else(|| key.strip_prefix('$'))
        .unwrap_or(key)
}

impl Env for ConnectionConfig {
    fn inject_opt_env_vars(&mut self) -> ConfigResult<()> {
        if is_opt_env_var(&self.query_type_name) {
            self.query_type_name = std::env::var(trim_opt_env_key(&self.query_type_name))?;
        }

        if let Some(policy) = opt_env_var(EnvVar::MalformedCursor)? {
            self.malformed_cursor = MalformedCursorPolicy::from_str(&policy).map_err(|_| {
                ConfigError::EnvVarValueError(
                    EnvVar::MalformedCursor.as_ref().to_string(),
                    policy.clone(),
                )
            })?;
        }

        if let Some(size) = opt_env_var(EnvVar::MaxPageSize)? {
            self.max_page_size = Some(size.parse().map_err(|_| {
                ConfigError::EnvVarValueError(
                    EnvVar::MaxPageSize.as_ref().to_string(),
                    size.clone(),
                )
            })?);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_connection_config_defaults() {
        let config = ConnectionConfig::default();
        assert_eq!(config.query_type_name, "Query");
        assert_eq!(config.malformed_cursor, MalformedCursorPolicy::Reject);
        assert_eq!(config.max_page_size, None);
    }

    #[test]
    fn test_connection_config_from_file_fills_missing_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
    ## Connection configuration
    #
    malformed_cursor: ignore
    max_page_size: 50
"#
        )
        .unwrap();

        let config = ConnectionConfig::from_file(file.path()).unwrap();
        assert_eq!(config.query_type_name, "Query");
        assert_eq!(config.malformed_cursor, MalformedCursorPolicy::Ignore);
        assert_eq!(config.max_page_size, Some(50));
    }

    #[test]
    fn test_connection_config_from_file_rejects_unknown_policy() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "malformed_cursor: retry").unwrap();

        assert_matches!(
            ConnectionConfig::from_file(file.path()),
            Err(ConfigError::SerdeYamlError(_))
        );
    }

    #[test]
    fn test_trim_opt_env_key() {
        assert_eq!(trim_opt_env_key("${QUERY_TYPE}"), "QUERY_TYPE");
        assert_eq!(trim_opt_env_key("$QUERY_TYPE"), "QUERY_TYPE");
        assert_eq!(trim_opt_env_key("${"), "{");
        assert_eq!(trim_opt_env_key("$"), "");
    }

    #[test]
    fn test_connection_config_rejects_unterminated_env_reference() {
        let mut config = ConnectionConfig {
            query_type_name: "${".to_string(),
            ..Default::default()
        };
        assert_matches!(
            config.inject_opt_env_vars(),
            Err(ConfigError::EnvVarParseError(_))
        );
        assert_eq!(config.query_type_name, "${");
    }

    #[test]
    fn test_connection_config_injects_env_vars() {
        std::env::set_var("CONNECTION_TEST_QUERY_TYPE_NAME", "Root");
        std::env::set_var(EnvVar::MalformedCursor.as_ref(), "ignore");
        std::env::set_var(EnvVar::MaxPageSize.as_ref(), "25");

        let mut config = ConnectionConfig {
            query_type_name: "${CONNECTION_TEST_QUERY_TYPE_NAME}".to_string(),
            ..Default::default()
        };
        let injected = config.inject_opt_env_vars();

        std::env::set_var(EnvVar::MaxPageSize.as_ref(), "many");
        let mut invalid = ConnectionConfig::default();
        let invalid = invalid.inject_opt_env_vars();

        std::env::remove_var(EnvVar::MalformedCursor.as_ref());
        std::env::remove_var(EnvVar::MaxPageSize.as_ref());

        injected.unwrap();
        assert_eq!(config.query_type_name, "Root");
        assert_eq!(config.malformed_cursor, MalformedCursorPolicy::Ignore);
        assert_eq!(config.max_page_size, Some(25));
        assert_matches!(invalid, Err(ConfigError::EnvVarValueError(var, value)) if var == "CONNECTION_MAX_PAGE_SIZE" && value == "many");
    }
}
