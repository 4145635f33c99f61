use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use zeroize::Zeroizing;

pub static CONF: Lazy<Config> = Lazy::new(|| Config::from_env().expect("Failed to load config"));

const DB_USERNAME_VAR: &str = "JOURNAL_DB_USERNAME";
const DB_PASSWORD_VAR: &str = "JOURNAL_DB_PASSWORD";
const DB_HOSTNAME_VAR: &str = "JOURNAL_DB_HOSTNAME";
const DB_PORT_VAR: &str = "JOURNAL_DB_PORT";
const DB_NAME_VAR: &str = "JOURNAL_DB_NAME";
const DB_MAX_CONNECTIONS_VAR: &str = "JOURNAL_DB_MAX_CONNECTIONS";
const DB_IDLE_TIMEOUT_SECS_VAR: &str = "JOURNAL_DB_IDLE_TIMEOUT_SECS";
const RUN_MIGRATIONS_VAR: &str = "JOURNAL_RUN_MIGRATIONS";

const ACTIX_WORKER_COUNT_VAR: &str = "JOURNAL_ACTIX_WORKER_COUNT";

const LOG_LEVEL_VAR: &str = "JOURNAL_LOG_LEVEL";
const LOG_DIR_VAR: &str = "JOURNAL_LOG_DIR";

pub struct DbConfig {
    pub username: String,
    pub password: Zeroizing<String>,
    pub hostname: String,
    pub port: u16,
    pub name: String,
    pub max_connections: u32,
    pub idle_timeout: Duration,
    pub run_migrations: bool,
}

impl DbConfig {
    pub fn database_uri(&self) -> Zeroizing<String> {
        Zeroizing::new(format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, *self.password, self.hostname, self.port, self.name,
        ))
    }
}

pub struct Config {
    /// `None` when no database host is configured, in which case entries are kept in memory
    pub db: Option<DbConfig>,

    pub actix_worker_count: usize,

    pub log_level: String,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        let db = if std::env::var(DB_HOSTNAME_VAR).is_ok() {
            Some(DbConfig {
                username: env_var(DB_USERNAME_VAR)?,
                password: Zeroizing::new(env_var(DB_PASSWORD_VAR)?),
                hostname: env_var(DB_HOSTNAME_VAR)?,
                port: env_var_or(DB_PORT_VAR, 5432),
                name: env_var(DB_NAME_VAR)?,
                max_connections: env_var_or(DB_MAX_CONNECTIONS_VAR, 48),
                idle_timeout: Duration::from_secs(env_var_or(DB_IDLE_TIMEOUT_SECS_VAR, 30)),
                run_migrations: env_var_or(RUN_MIGRATIONS_VAR, true),
            })
        } else {
            None
        };

        Ok(Config {
            db,
            actix_worker_count: env_var_or(ACTIX_WORKER_COUNT_VAR, num_cpus::get()),
            log_level: env_var_or(LOG_LEVEL_VAR, String::from("info")),
            log_dir: env_var_or(LOG_DIR_VAR, String::from("./logs")),
        })
    }
}

fn env_var<T: FromStr>(key: &'static str) -> Result<T, ConfigError> {
    let var = std::env::var(key).map_err(|_| ConfigError::missing(key))?;
    let var: T = var.parse().map_err(|_| ConfigError::invalid(key))?;
    Ok(var)
}

fn env_var_or<T: FromStr>(key: &'static str, default: T) -> T {
    let Ok(var) = std::env::var(key) else {
        return default;
    };

    var.parse().unwrap_or(default)
}

#[derive(Clone, Copy, Debug)]
pub enum ConfigError {
    MissingVar(&'static str),
    InvalidVar(&'static str),
}

impl ConfigError {
    fn missing(var_name: &'static str) -> Self {
        Self::MissingVar(var_name)
    }

    fn invalid(var_name: &'static str) -> Self {
        Self::InvalidVar(var_name)
    }
}

impl std::error::Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVar(key) => write!(f, "Missing environment variable '{}'", key),
            Self::InvalidVar(key) => write!(f, "Environment variable '{}' is invalid", key),
        }
    }
}
