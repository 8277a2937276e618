//! Configuration module
//!
//! Settings are assembled from environment variables (seeded from a `.env`
//! file when one exists). Parsing goes through a lookup function so the whole
//! assembly can be exercised against a plain map in tests.
//!
//! Empty values are treated as unset.

use std::path::PathBuf;
use std::str::FromStr;

use tracing::Level;

use crate::constants::DEVELOPMENT_SECRET_KEY;
use crate::storage_types::StorageBackend;

const SERVER_PORT: u16 = 8000;
const CONN_MAX_AGE_SECS: u64 = 60;
const EMAIL_TIMEOUT_SECS: u64 = 5;
const TASK_TIME_LIMIT_SECS: u64 = 5 * 60;
const TASK_SOFT_TIME_LIMIT_SECS: u64 = 60;
const RESULT_BACKEND_MAX_RETRIES: u32 = 10;
const UPLOAD_MAX_SIZE_MB: usize = 10;
const JWT_ACCESS_TOKEN_LIFETIME_MINUTES: i64 = 60;
const REDIS_URL: &str = "redis://redis:6379/0";

const DEFAULT_ALLOWED_HOSTS: &[&str] = &[
    "localhost",
    "0.0.0.0",
    "127.0.0.1",
    "coach-trusted-backend.onrender.com",
    "coach-trusted.onrender.com",
];

const DEFAULT_CORS_ALLOWED_ORIGINS: &[&str] = &[
    "https://coachtrustedstaging.vercel.app",
    "https://coachtrusted-client.vercel.app",
    "http://localhost:3000",
    "http://localhost:3001",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:3001",
    "https://www.coachtrusted.com",
    "https://dev.coachtrusted.com",
];

/// Application settings.
#[derive(Clone, Debug)]
pub struct Settings {
    pub debug: bool,
    /// Test mode swaps email delivery for an in-memory outbox and points
    /// `MEDIA_URL` at a fake media host.
    pub test_mode: bool,
    pub environment: String,
    pub server_port: u16,
    pub secret_key: String,
    pub allowed_hosts: Vec<String>,
    pub csrf_trusted_origins: Vec<String>,
    pub cors_allowed_origins: Vec<String>,
    /// Admin site mount point, without leading slash (e.g. `admin/`).
    pub admin_url: String,
    pub admins: Vec<String>,
    pub jwt_access_token_lifetime_minutes: i64,
    pub upload_max_size_bytes: usize,
    pub database: Option<DatabaseSettings>,
    pub cache: CacheSettings,
    pub storage: StorageSettings,
    pub email: EmailSettings,
    pub error_tracking: ErrorTrackingSettings,
    pub broker: BrokerSettings,
    pub security: SecuritySettings,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub name: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub conn_max_age_secs: u64,
}

impl DatabaseSettings {
    /// PostgreSQL connection URL. The hosting provider requires TLS.
    pub fn connection_url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}?sslmode=require",
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            self.host,
            self.port,
            urlencoding::encode(&self.name)
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheBackend {
    Redis { url: String },
    LocalMemory,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheSettings {
    pub backend: CacheBackend,
    /// Cache failures degrade to misses instead of failing the request.
    pub ignore_exceptions: bool,
}

#[derive(Clone, Debug)]
pub struct S3Settings {
    pub bucket: String,
    pub endpoint_url: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
}

#[derive(Clone, Debug)]
pub struct StorageSettings {
    pub media_root: PathBuf,
    pub media_url: String,
    /// Present only when bucket, endpoint and both credentials are configured.
    pub s3: Option<S3Settings>,
}

impl StorageSettings {
    pub fn backend(&self) -> StorageBackend {
        if self.s3.is_some() {
            StorageBackend::S3
        } else {
            StorageBackend::Local
        }
    }

    /// URL path local media is served under, when `MEDIA_URL` is a path
    /// rather than an absolute URL.
    pub fn media_mount_path(&self) -> Option<&str> {
        if self.media_url.starts_with('/') {
            Some(self.media_url.as_str())
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmailBackendKind {
    Smtp,
    Memory,
}

#[derive(Clone, Debug)]
pub struct EmailSettings {
    pub backend: EmailBackendKind,
    pub host: String,
    pub port: u16,
    pub use_tls: bool,
    pub username: Option<String>,
    pub password: Option<String>,
    pub default_from: String,
    pub server_email: String,
    pub subject_prefix: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct ErrorTrackingSettings {
    pub dsn: Option<String>,
    pub environment: String,
    pub traces_sample_rate: f64,
    /// Minimum level forwarded as breadcrumbs.
    pub log_level: Level,
}

impl ErrorTrackingSettings {
    pub fn enabled(&self) -> bool {
        self.dsn.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct BrokerSettings {
    pub url: String,
    pub result_backend: String,
    pub use_ssl: bool,
    pub timezone: String,
    pub accept_content: Vec<String>,
    pub task_serializer: String,
    pub result_serializer: String,
    pub task_time_limit_secs: u64,
    pub task_soft_time_limit_secs: u64,
    pub result_backend_max_retries: u32,
    pub eager_propagates: bool,
}

#[derive(Clone, Debug)]
pub struct SecuritySettings {
    pub ssl_redirect: bool,
    pub hsts_seconds: u64,
    pub hsts_include_subdomains: bool,
    pub hsts_preload: bool,
    pub content_type_nosniff: bool,
    pub x_frame_options: String,
    /// Header (and value) a proxy sets when the original request was HTTPS.
    pub proxy_ssl_header: (String, String),
}

impl SecuritySettings {
    /// `Strict-Transport-Security` value, or `None` when HSTS is off.
    pub fn hsts_header(&self) -> Option<String> {
        if self.hsts_seconds == 0 {
            return None;
        }
        let mut value = format!("max-age={}", self.hsts_seconds);
        if self.hsts_include_subdomains {
            value.push_str("; includeSubDomains");
        }
        if self.hsts_preload {
            value.push_str("; preload");
        }
        Some(value)
    }
}

/// Typed reads over a key lookup.
struct EnvReader<F> {
    lookup: F,
}

impl<F> EnvReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn opt(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn string(&self, key: &str, default: &str) -> String {
        self.opt(key).unwrap_or_else(|| default.to_string())
    }

    fn bool(&self, key: &str, default: bool) -> bool {
        self.opt(key).map(|v| parse_bool(&v)).unwrap_or(default)
    }

    fn parse<T>(&self, key: &str, default: T) -> Result<T, anyhow::Error>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.opt(key) {
            Some(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("{} has an invalid value {:?}: {}", key, raw, e)),
            None => Ok(default),
        }
    }

    fn list(&self, key: &str, default: &[&str]) -> Vec<String> {
        match self.opt(key) {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => default.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Truthy spellings accepted for boolean variables; anything else is false.
fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.to_lowercase().as_str(),
        "true" | "on" | "ok" | "y" | "yes" | "1"
    )
}

/// Accepts level names (`info`) or numeric logging levels (`20`).
fn parse_log_level(raw: &str) -> Result<Level, anyhow::Error> {
    match raw.to_lowercase().as_str() {
        "10" | "debug" => Ok(Level::DEBUG),
        "20" | "info" => Ok(Level::INFO),
        "30" | "warn" | "warning" => Ok(Level::WARN),
        "40" | "50" | "error" | "critical" => Ok(Level::ERROR),
        "0" | "5" | "trace" => Ok(Level::TRACE),
        other => Err(anyhow::anyhow!(
            "DJANGO_SENTRY_LOG_LEVEL has an invalid value {:?}",
            other
        )),
    }
}

impl Settings {
    /// Load settings from the process environment (and `.env`), then validate.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        let read_dot_env = std::env::var("DJANGO_READ_DOT_ENV_FILE")
            .map(|v| parse_bool(&v))
            .unwrap_or(false);
        if read_dot_env {
            dotenvy::from_path(".env")
                .map_err(|e| anyhow::anyhow!("Failed to read .env file: {}", e))?;
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build and validate settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = EnvReader { lookup };

        let debug = env.bool("DJANGO_DEBUG", false);
        let test_mode = env.bool("DJANGO_TEST", false);
        let environment = env
            .opt("ENVIRONMENT")
            .or_else(|| env.opt("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let database = match env.opt("POSTGRES_DB") {
            Some(name) => Some(DatabaseSettings {
                name,
                user: env.string("POSTGRES_USER", "postgres"),
                password: env.string("POSTGRES_PASSWORD", ""),
                host: env.string("POSTGRES_HOST", "127.0.0.1"),
                port: env.parse("POSTGRES_PORT", 5432)?,
                conn_max_age_secs: env.parse("CONN_MAX_AGE", CONN_MAX_AGE_SECS)?,
            }),
            None => None,
        };

        let redis_url = env.string("REDIS_URL", REDIS_URL);

        let cache = if debug {
            CacheSettings {
                backend: CacheBackend::LocalMemory,
                ignore_exceptions: false,
            }
        } else {
            CacheSettings {
                backend: CacheBackend::Redis {
                    url: redis_url.clone(),
                },
                ignore_exceptions: true,
            }
        };

        let s3 = match (
            env.opt("AWS_STORAGE_BUCKET_NAME"),
            env.opt("AWS_S3_ENDPOINT_URL"),
            env.opt("AWS_S3_ACCESS_KEY_ID"),
            env.opt("AWS_S3_SECRET_ACCESS_KEY"),
        ) {
            (Some(bucket), Some(endpoint_url), Some(access_key_id), Some(secret_access_key)) => {
                Some(S3Settings {
                    bucket,
                    endpoint_url,
                    access_key_id,
                    secret_access_key,
                    region: env.string("AWS_S3_REGION_NAME", "us-east-1"),
                })
            }
            _ => None,
        };

        let default_media_url = if test_mode {
            "http://media.testserver/"
        } else {
            "/media/"
        };
        let storage = StorageSettings {
            media_root: PathBuf::from(env.string("MEDIA_ROOT", "media")),
            media_url: env.string("MEDIA_URL", default_media_url),
            s3,
        };

        let default_from = env.string(
            "DJANGO_DEFAULT_FROM_EMAIL",
            "Coach Trusted <noreply@example.com>",
        );
        let email = EmailSettings {
            backend: if test_mode {
                EmailBackendKind::Memory
            } else {
                EmailBackendKind::Smtp
            },
            host: env.string("DJANGO_EMAIL_HOST", "smtp.mailersend.net"),
            port: env.parse("DJANGO_EMAIL_PORT", 2525)?,
            use_tls: env.bool("DJANGO_EMAIL_USE_TLS", true),
            username: env.opt("DJANGO_EMAIL_HOST_USER"),
            password: env.opt("DJANGO_EMAIL_HOST_PASSWORD"),
            server_email: env.string("DJANGO_SERVER_EMAIL", &default_from),
            default_from,
            subject_prefix: lookup_raw(&env, "DJANGO_EMAIL_SUBJECT_PREFIX")
                .unwrap_or_else(|| "[Coach Trusted] ".to_string()),
            timeout_secs: EMAIL_TIMEOUT_SECS,
        };

        let error_tracking = ErrorTrackingSettings {
            dsn: env.opt("SENTRY_DSN"),
            environment: env.string("SENTRY_ENVIRONMENT", "production"),
            traces_sample_rate: env.parse("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
            log_level: match env.opt("DJANGO_SENTRY_LOG_LEVEL") {
                Some(raw) => parse_log_level(&raw)?,
                None => Level::INFO,
            },
        };

        let broker = BrokerSettings {
            use_ssl: redis_url.starts_with("rediss://"),
            result_backend: redis_url.clone(),
            url: redis_url,
            timezone: "UTC".to_string(),
            accept_content: vec!["json".to_string()],
            task_serializer: "json".to_string(),
            result_serializer: "json".to_string(),
            task_time_limit_secs: TASK_TIME_LIMIT_SECS,
            task_soft_time_limit_secs: TASK_SOFT_TIME_LIMIT_SECS,
            result_backend_max_retries: RESULT_BACKEND_MAX_RETRIES,
            eager_propagates: debug,
        };

        let security = SecuritySettings {
            ssl_redirect: env.bool("DJANGO_SECURE_SSL_REDIRECT", true),
            hsts_seconds: env.parse("DJANGO_SECURE_HSTS_SECONDS", 0)?,
            hsts_include_subdomains: env.bool("DJANGO_SECURE_HSTS_INCLUDE_SUBDOMAINS", true),
            hsts_preload: env.bool("DJANGO_SECURE_HSTS_PRELOAD", true),
            content_type_nosniff: env.bool("DJANGO_SECURE_CONTENT_TYPE_NOSNIFF", true),
            x_frame_options: "DENY".to_string(),
            proxy_ssl_header: ("x-forwarded-proto".to_string(), "https".to_string()),
        };

        let upload_max_size_mb: usize = env.parse("UPLOAD_MAX_SIZE_MB", UPLOAD_MAX_SIZE_MB)?;
        let upload_max_size_bytes = upload_max_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "UPLOAD_MAX_SIZE_MB is too large: {}",
                    upload_max_size_mb
                )
            })?;

        let settings = Settings {
            debug,
            test_mode,
            environment,
            server_port: env.parse("PORT", SERVER_PORT)?,
            secret_key: env.string("DJANGO_SECRET_KEY", DEVELOPMENT_SECRET_KEY),
            allowed_hosts: env.list("DJANGO_ALLOWED_HOSTS", DEFAULT_ALLOWED_HOSTS),
            csrf_trusted_origins: env.list(
                "DJANGO_CSRF_TRUSTED_ORIGINS",
                &["https://coach-trusted.unklab.id"],
            ),
            cors_allowed_origins: env.list("CORS_ALLOWED_ORIGINS", DEFAULT_CORS_ALLOWED_ORIGINS),
            admin_url: normalize_admin_url(&env.string("DJANGO_ADMIN_URL", "admin/")),
            admins: env.list("DJANGO_ADMINS", &[]),
            jwt_access_token_lifetime_minutes: env.parse(
                "JWT_ACCESS_TOKEN_LIFETIME_MINUTES",
                JWT_ACCESS_TOKEN_LIFETIME_MINUTES,
            )?,
            upload_max_size_bytes,
            database,
            cache,
            storage,
            email,
            error_tracking,
            broker,
            security,
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Admin mount point as an absolute path prefix, e.g. `/admin/`.
    pub fn admin_prefix(&self) -> String {
        format!("/{}", self.admin_url)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() {
            if self.secret_key == DEVELOPMENT_SECRET_KEY {
                return Err(anyhow::anyhow!(
                    "DJANGO_SECRET_KEY must be set in production"
                ));
            }
            if self.cors_allowed_origins.iter().any(|o| o == "*") {
                return Err(anyhow::anyhow!(
                    "CORS_ALLOWED_ORIGINS cannot be '*' in production. Please specify explicit origins."
                ));
            }
        }

        if !self.storage.media_url.ends_with('/') {
            return Err(anyhow::anyhow!("MEDIA_URL must end with a slash"));
        }

        if self.upload_max_size_bytes == 0 {
            return Err(anyhow::anyhow!("UPLOAD_MAX_SIZE_MB cannot be 0"));
        }

        if self.jwt_access_token_lifetime_minutes <= 0 {
            return Err(anyhow::anyhow!(
                "JWT_ACCESS_TOKEN_LIFETIME_MINUTES must be positive"
            ));
        }

        let rate = self.error_tracking.traces_sample_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(anyhow::anyhow!(
                "SENTRY_TRACES_SAMPLE_RATE must be between 0.0 and 1.0, got {}",
                rate
            ));
        }

        Ok(())
    }
}

/// Subject prefixes keep their trailing space, so they bypass trimming.
fn lookup_raw<F>(env: &EnvReader<F>, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    (env.lookup)(key).filter(|v| !v.trim().is_empty())
}

fn normalize_admin_url(raw: &str) -> String {
    let trimmed = raw.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}/", trimmed)
    }
}
