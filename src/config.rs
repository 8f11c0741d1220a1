//! Application settings.
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. `appsettings.json` in the content root
//! 3. `appsettings.{Environment}.json`
//! 4. `APP_`-prefixed environment variables, `__` between nesting levels
//!    (`APP_SERVER__PORT=9000`)
//!
//! Both files are optional. The environment name comes from `APP_ENVIRONMENT`.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const ENVIRONMENT_VAR: &str = "APP_ENVIRONMENT";
const ENV_PREFIX: &str = "APP_";
const ENV_SEPARATOR: &str = "__";

/// Hosting environment name, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment(String);

impl Environment {
    pub const DEVELOPMENT: &'static str = "Development";
    pub const PRODUCTION: &'static str = "Production";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn from_env() -> Self {
        match std::env::var(ENVIRONMENT_VAR) {
            Ok(name) if !name.trim().is_empty() => Self::new(name.trim()),
            _ => Self::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_development(&self) -> bool {
        self.0.eq_ignore_ascii_case(Self::DEVELOPMENT)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(Self::PRODUCTION)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(skip)]
    pub environment: Environment,
    pub app_name: String,
    pub server: ServerSettings,
    /// Directory served for static files.
    pub web_root: PathBuf,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Worker threads; actix picks one per core when unset.
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `env_logger` filter used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            app_name: "FieldName".to_string(),
            server: ServerSettings::default(),
            web_root: PathBuf::from("wwwroot"),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: None,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Invalid(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => write!(f, "Cannot read {}: {source}", path.display()),
            ConfigError::Parse { path, source } => write!(f, "Invalid JSON in {}: {source}", path.display()),
            ConfigError::Invalid(e) => write!(f, "Invalid settings: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Invalid(e) => Some(e),
        }
    }
}

impl Settings {
    /// Load from `content_root` and the process environment.
    pub fn load(content_root: &Path) -> Result<Self, ConfigError> {
        Self::load_from(content_root, Environment::from_env(), std::env::vars())
    }

    pub fn load_from(
        content_root: &Path,
        environment: Environment,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, ConfigError> {
        let mut merged = serde_json::to_value(Settings::default()).map_err(ConfigError::Invalid)?;

        merge_file(&mut merged, &content_root.join("appsettings.json"))?;
        merge_file(&mut merged, &content_root.join(format!("appsettings.{}.json", environment.name())))?;
        apply_env_overrides(&mut merged, vars);

        let mut settings: Settings = serde_json::from_value(merged).map_err(ConfigError::Invalid)?;
        settings.environment = environment;
        Ok(settings)
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}

fn merge_file(target: &mut Value, path: &Path) -> Result<(), ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(source) => return Err(ConfigError::Io { path: path.to_path_buf(), source }),
    };
    let overlay: Value = serde_json::from_str(&text)
        .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
    merge(target, overlay);
    log::debug!("Loaded settings from {}", path.display());
    Ok(())
}

/// Deep merge: objects merge key by key, anything else replaces.
fn merge(target: &mut Value, overlay: Value) {
    match (target, overlay) {
        (Value::Object(target), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match target.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, overlay) => *target = overlay,
    }
}

fn apply_env_overrides(target: &mut Value, vars: impl IntoIterator<Item = (String, String)>) {
    for (name, raw) in vars {
        if name == ENVIRONMENT_VAR {
            continue;
        }
        let Some(path) = name.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let segments: Vec<String> = path
            .split(ENV_SEPARATOR)
            .map(str::to_ascii_lowercase)
            .collect();
        if segments.iter().any(String::is_empty) {
            continue;
        }
        set_path(target, &segments, &raw);
    }
}

fn set_path(target: &mut Value, segments: &[String], raw: &str) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut node = target;
    for segment in parents {
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        let Value::Object(map) = node else { return };
        node = map.entry(segment.clone()).or_insert_with(|| Value::Object(Map::new()));
    }

    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Value::Object(map) = node {
        let value = coerce(map.get(last), raw);
        map.insert(last.clone(), value);
    }
}

/// Environment values are strings; keep numbers, booleans and nulls typed
/// where the existing setting is.
fn coerce(existing: Option<&Value>, raw: &str) -> Value {
    match existing {
        Some(Value::Number(_) | Value::Bool(_) | Value::Null) => {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
        }
        _ => Value::String(raw.to_string()),
    }
}
