use config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Base name of the configuration file looked up when no path is given (`ampa.toml`).
pub const DEFAULT_CONFIG_FILE: &str = "ampa";
/// Prefix of environment overrides, e.g. `AMPA__LIMITS__FEATURED_CAP=5`.
pub const ENV_PREFIX: &str = "AMPA";

#[ampa_derive::ampa_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads layered configuration: a TOML file, then `AMPA__`-prefixed environment variables.
///
/// Nested keys are separated by double underscores (`AMPA__STORAGE__DATA_DIR` maps to
/// `storage.data_dir`). An explicit `path` must exist; without one, `ampa.toml` in the working
/// directory is read when present and every section otherwise falls back to its defaults.
///
/// # Errors
/// Returns [`ConfigError::Config`] when an explicit file is missing, a source cannot be
/// parsed, or the merged values do not deserialize into `T`.
///
/// # Example
/// ```rust
/// use ampa_domain::config::AmpaConfig;
/// use ampa_kernel::config::load_config;
///
/// let cfg: AmpaConfig = load_config(None).unwrap();
/// assert_eq!(cfg.limits.featured_cap, 4);
/// ```
pub fn load_config<T>(path: Option<&Path>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_with_env(path, None)
}

/// `env` replaces the process environment when given.
fn load_with_env<T>(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = match path {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration");
            File::from(path).required(true)
        },
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}
