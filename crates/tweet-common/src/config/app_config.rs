//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub password: PasswordPolicy,
    pub admin: Option<AdminSeedConfig>,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" | "dev" => Ok(Self::Development),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Password rules applied at registration
///
/// Defaults: at least three characters, no character classes required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct PasswordPolicy {
    #[serde(default = "default_password_min_length")]
    pub min_length: usize,
    #[serde(default)]
    pub require_digit: bool,
    #[serde(default)]
    pub require_uppercase: bool,
    #[serde(default)]
    pub require_lowercase: bool,
    #[serde(default)]
    pub require_non_alphanumeric: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: default_password_min_length(),
            require_digit: false,
            require_uppercase: false,
            require_lowercase: false,
            require_non_alphanumeric: false,
        }
    }
}

/// Administrator account created at startup when no admin exists
#[derive(Debug, Clone, Deserialize)]
pub struct AdminSeedConfig {
    #[serde(default = "default_admin_username")]
    pub username: String,
    pub email: String,
    pub password: String,
}

// Default value functions
fn default_app_name() -> String {
    "tweet-server".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_migrations_dir() -> String {
    "./migrations".to_string()
}

fn default_true() -> bool {
    true
}

fn default_access_token_expiry() -> i64 {
    900 // 15 minutes
}

fn default_refresh_token_expiry() -> i64 {
    604_800 // 7 days
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_password_min_length() -> usize {
    3
}

fn default_admin_username() -> String {
    "admin".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Returns an error if required keys are missing or malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        Ok(Self {
            app: AppSettings {
                name: vars.string_or("APP_NAME", default_app_name),
                env: vars.parse_or("APP_ENV", Environment::default)?,
            },
            api: ServerConfig {
                host: vars.string_or("API_HOST", default_host),
                port: vars.parse_required("API_PORT")?,
            },
            database: DatabaseConfig {
                url: vars.required("DATABASE_URL")?,
                max_connections: vars.parse_or("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: vars.parse_or("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
                migrations_dir: vars.string_or("DATABASE_MIGRATIONS_DIR", default_migrations_dir),
                run_migrations: vars.parse_or("DATABASE_RUN_MIGRATIONS", default_true)?,
            },
            jwt: JwtConfig {
                secret: vars.required("JWT_SECRET")?,
                access_token_expiry: vars
                    .parse_or("JWT_ACCESS_TOKEN_EXPIRY", default_access_token_expiry)?,
                refresh_token_expiry: vars
                    .parse_or("JWT_REFRESH_TOKEN_EXPIRY", default_refresh_token_expiry)?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: vars
                    .parse_or("RATE_LIMIT_REQUESTS_PER_SECOND", default_requests_per_second)?,
                burst: vars.parse_or("RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: vars
                    .get("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            password: PasswordPolicy {
                min_length: vars.parse_or("PASSWORD_MIN_LENGTH", default_password_min_length)?,
                require_digit: vars.parse_or("PASSWORD_REQUIRE_DIGIT", bool::default)?,
                require_uppercase: vars.parse_or("PASSWORD_REQUIRE_UPPERCASE", bool::default)?,
                require_lowercase: vars.parse_or("PASSWORD_REQUIRE_LOWERCASE", bool::default)?,
                require_non_alphanumeric: vars
                    .parse_or("PASSWORD_REQUIRE_NON_ALPHANUMERIC", bool::default)?,
            },
            admin: match (vars.get("ADMIN_EMAIL"), vars.get("ADMIN_PASSWORD")) {
                (Some(email), Some(password)) => Some(AdminSeedConfig {
                    username: vars.string_or("ADMIN_USERNAME", default_admin_username),
                    email,
                    password,
                }),
                (None, None) => None,
                (Some(_), None) => return Err(ConfigError::MissingVar("ADMIN_PASSWORD")),
                (None, Some(_)) => return Err(ConfigError::MissingVar("ADMIN_EMAIL")),
            },
        })
    }
}

/// Thin wrapper over a key lookup with typed accessors
struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn string_or(&self, key: &str, default: fn() -> String) -> String {
        self.get(key).unwrap_or_else(default)
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::MissingVar(key))
    }

    fn parse_required<T: FromStr>(&self, key: &'static str) -> Result<T, ConfigError> {
        let raw = self.required(key)?;
        raw.trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw))
    }

    fn parse_or<T: FromStr>(&self, key: &'static str, default: fn() -> T) -> Result<T, ConfigError> {
        match self.get(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key, raw)),
            None => Ok(default()),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
