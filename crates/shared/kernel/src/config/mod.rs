use crate::domain::constants::{DEFAULT_CONFIG_FILE, ENV_PREFIX};
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loading error.
#[atlas_derive::atlas_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from a file overlaid with environment variables.
///
/// 1. **Base file**: `path` (extension optional, e.g. `server` resolves `server.toml`).
///    Defaults to `server` in the working directory.
/// 2. **Environment overrides**: variables prefixed with `ATLAS__`, nested with `__`
///    (`ATLAS__CATALOG__DATA_FILE` maps to `catalog.data_file`).
///
/// # Errors
/// * The file cannot be found or parsed.
/// * The merged values do not deserialize into `T`.
///
/// # Example
/// ```rust,no_run
/// use atlas_kernel::config::load_config;
/// use atlas_kernel::domain::config::ApiConfig;
///
/// let cfg: ApiConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let path = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    load_with_environment(&path, environment())
}

/// Values are parsed into numbers and booleans where possible; the flattened config root
/// skips the crate's string conversion.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .convert_case(config::Case::Snake)
        .try_parsing(true)
}

fn load_with_environment<T>(path: &Path, environment: Environment) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    debug!(path = %path.display(), "Loading configuration");

    Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(environment)
        .build()
        .context(format!("Failed to read {}", path.display()))?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::ApiConfig;
    use std::fs;

    #[test]
    fn loads_toml_file_over_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = dir.path().join("atlas.toml");
        fs::write(
            &file,
            "[server]\nport = 8088\n\n[catalog]\ndata_file = \"fixtures/destinations.csv\"\n",
        )
        .expect("write config");

        let cfg: ApiConfig = load_config(Some(&file)).expect("config should load");

        assert_eq!(cfg.server.port, 8088);
        assert_eq!(cfg.catalog.data_file, PathBuf::from("fixtures/destinations.csv"));
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn environment_overrides_typed_values() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = dir.path().join("atlas.toml");
        fs::write(&file, "[server]\nport = 8088\n\n[logging]\njson = false\n").expect("write config");

        let vars: config::Map<String, String> = [
            ("ATLAS__SERVER__PORT", "8080"),
            ("ATLAS__LOGGING__JSON", "true"),
            ("ATLAS__CATALOG__PATTERN_CACHE_CAPACITY", "64"),
            ("ATLAS__CATALOG__DATA_FILE", "x.csv"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .collect();

        let cfg: ApiConfig = load_with_environment(&file, environment().source(Some(vars)))
            .expect("overrides should deserialize");

        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.logging.json);
        assert_eq!(cfg.catalog.pattern_cache_capacity, 64);
        assert_eq!(cfg.catalog.data_file, PathBuf::from("x.csv"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result: Result<ApiConfig, _> = load_config(Some(dir.path().join("absent.toml")));

        let err = result.expect_err("missing file must fail");
        assert!(matches!(err, ConfigError::Config { context: Some(_), .. }));
    }
}
