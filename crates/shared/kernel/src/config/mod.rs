use config::{Config, Environment, File, FileFormat};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Prefix of environment overrides, e.g. `ORC__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "ORC";
/// Environment variable naming the config file when no path is passed explicitly.
pub const CONFIG_PATH_ENV: &str = "ORC_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "server.toml";

#[orc_derive::orc_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Resolves the config file path: explicit argument, then `ORC_CONFIG`, then `server.toml`.
#[must_use]
pub fn config_path(path: Option<impl AsRef<Path>>) -> PathBuf {
    path.map(|p| p.as_ref().to_path_buf())
        .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Loads layered configuration.
///
/// 1. **File**: TOML at [`config_path`]. Optional, so a bare checkout runs on defaults.
/// 2. **Environment**: variables prefixed with `ORC__`, nested with `__`
///    (`ORC__STORAGE__DATA_DIR` maps to `storage.data_dir`).
///
/// Missing keys fall back to the target type's serde defaults.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is malformed or a value does not
/// match the structure of `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let path = config_path(path);

    Config::builder()
        .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context(format!("Failed to build config from {}", path.display()))?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}
