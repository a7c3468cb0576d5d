//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use chrono_tz::Tz;

/// Default number of days an unmatched case is checked for.
const DEFAULT_QUEUE_TTL_DAYS: u32 = 10;

/// Default court time zone.
const DEFAULT_COURT_TZ: Tz = chrono_tz::America::Anchorage;

/// Deployment environment, from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
    Test,
}

impl Environment {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Courtbot web server configuration.
#[derive(Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Secret used to encrypt phone numbers.
    pub phone_encryption_key: String,
    /// Secret used to sign session cookies.
    pub cookie_secret: String,
    /// Public court information site linked from replies.
    pub court_public_url: String,
    /// Days to keep checking for an unmatched case.
    pub queue_ttl_days: u32,
    /// Time zone hearing times and "today" are reckoned in.
    pub court_tz: Tz,
    /// Deployment environment.
    pub environment: Environment,
    /// Directory holding the SMS test page (not served in production).
    pub static_dir: PathBuf,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("database_url", &self.database_url)
            .field("court_public_url", &self.court_public_url)
            .field("queue_ttl_days", &self.queue_ttl_days)
            .field("court_tz", &self.court_tz)
            .field("environment", &self.environment)
            .field("static_dir", &self.static_dir)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `COURTBOT_ADDR` | Server bind address | `127.0.0.1:5000` |
    /// | `DATABASE_URL` | SQLite database URL | `sqlite:courtbot.db?mode=rwc` |
    /// | `PHONE_ENCRYPTION_KEY` | Phone number encryption secret | (required) |
    /// | `COOKIE_SECRET` | Session signing secret | (required) |
    /// | `COURT_PUBLIC_URL` | Public court information URL | (required) |
    /// | `QUEUE_TTL_DAYS` | Days to keep checking unmatched cases | `10` |
    /// | `COURT_TZ` | IANA time zone of the court | `America/Anchorage` |
    /// | `APP_ENV` | `production`, `development` or `test` | `development` |
    /// | `STATIC_DIR` | SMS test page directory | `public` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("COURTBOT_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:5000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:courtbot.db?mode=rwc".to_string());

        let phone_encryption_key =
            required("PHONE_ENCRYPTION_KEY").ok_or(ConfigError::MissingPhoneEncryptionKey)?;

        let cookie_secret = required("COOKIE_SECRET").ok_or(ConfigError::MissingCookieSecret)?;

        let court_public_url =
            required("COURT_PUBLIC_URL").ok_or(ConfigError::MissingCourtPublicUrl)?;

        let queue_ttl_days = match env::var("QUEUE_TTL_DAYS") {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidQueueTtl(value))?,
            Err(_) => DEFAULT_QUEUE_TTL_DAYS,
        };

        let court_tz = match env::var("COURT_TZ") {
            Ok(value) => parse_court_tz(&value)?,
            Err(_) => DEFAULT_COURT_TZ,
        };

        let environment = match env::var("APP_ENV") {
            Ok(value) => Environment::parse(&value)?,
            Err(_) => Environment::Development,
        };

        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public"));

        Ok(Self {
            addr,
            database_url,
            phone_encryption_key,
            cookie_secret,
            court_public_url,
            queue_ttl_days,
            court_tz,
            environment,
            static_dir,
        })
    }
}

fn parse_court_tz(value: &str) -> Result<Tz, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidCourtTz(value.to_string()))
}

fn required(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid COURTBOT_ADDR format")]
    InvalidAddr,

    #[error("PHONE_ENCRYPTION_KEY environment variable is required")]
    MissingPhoneEncryptionKey,

    #[error("COOKIE_SECRET environment variable is required")]
    MissingCookieSecret,

    #[error("COURT_PUBLIC_URL environment variable is required")]
    MissingCourtPublicUrl,

    #[error("Invalid QUEUE_TTL_DAYS: {0}")]
    InvalidQueueTtl(String),

    #[error("Invalid COURT_TZ: {0}")]
    InvalidCourtTz(String),

    #[error("Invalid APP_ENV: {0}")]
    InvalidEnvironment(String),
}
