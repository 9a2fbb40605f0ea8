use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub sheet: SheetConfig,
    pub session: SessionConfig,
    pub store: StoreConfig,
    pub portal: PortalConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

/// Remote spreadsheet-script endpoint
#[derive(Debug, Clone)]
pub struct SheetConfig {
    pub script_url: String,
    pub timeout: Duration,
}

/// Role passwords and session token signing
#[derive(Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl: Duration,
    pub admin_password: String,
    pub mart_owner_password: String,
    /// Used only when the remote store has no management password yet
    pub management_password_fallback: Option<String>,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("ttl", &self.ttl)
            .field(
                "management_password_fallback",
                &self.management_password_fallback.as_ref().map(|_| "***"),
            )
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStoreKind {
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostsBackend {
    Sheet,
    Documents,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub document_store: DocumentStoreKind,
    pub management_posts: PostsBackend,
    /// Present only when `document_store` is Postgres
    pub database: Option<DatabaseConfig>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub villa_data_path: Option<PathBuf>,
    pub ad_expiry_hours: i64,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            sheet: SheetConfig::from_env()?,
            session: SessionConfig::from_env()?,
            store: StoreConfig::from_env()?,
            portal: PortalConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

fn required(name: &str) -> Result<String, String> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("{} environment variable is required", name))
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T, String> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| format!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 1024 * 1024; // 1MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size =
            parse_or("MAX_REQUEST_BODY_SIZE", Self::DEFAULT_MAX_REQUEST_BODY_SIZE)?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl SheetConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn from_env() -> Result<Self, String> {
        let script_url = required("SHEET_SCRIPT_URL")?;
        let timeout_secs = parse_or("SHEET_TIMEOUT_SECS", Self::DEFAULT_TIMEOUT_SECS)?;

        Ok(Self {
            script_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl SessionConfig {
    const DEFAULT_TTL_SECS: u64 = 12 * 60 * 60; // 12 hours

    pub fn from_env() -> Result<Self, String> {
        let secret = required("SESSION_SECRET")?;
        let ttl_secs = parse_or("SESSION_TTL_SECS", Self::DEFAULT_TTL_SECS)?;
        let admin_password = required("ADMIN_PASSWORD")?;
        let mart_owner_password = required("MART_OWNER_PASSWORD")?;
        let management_password_fallback =
            env::var("MANAGEMENT_PASSWORD").ok().filter(|s| !s.is_empty());

        Ok(Self {
            secret,
            ttl: Duration::from_secs(ttl_secs),
            admin_password,
            mart_owner_password,
            management_password_fallback,
        })
    }
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, String> {
        let document_store = match env::var("DOCUMENT_STORE")
            .unwrap_or_else(|_| "memory".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => DocumentStoreKind::Memory,
            "postgres" => DocumentStoreKind::Postgres,
            other => return Err(format!("Unknown DOCUMENT_STORE: {}", other)),
        };

        let management_posts = match env::var("MANAGEMENT_POSTS_BACKEND")
            .unwrap_or_else(|_| "sheet".to_string())
            .to_lowercase()
            .as_str()
        {
            "sheet" => PostsBackend::Sheet,
            "documents" => PostsBackend::Documents,
            other => return Err(format!("Unknown MANAGEMENT_POSTS_BACKEND: {}", other)),
        };

        let database = match document_store {
            DocumentStoreKind::Postgres => Some(DatabaseConfig::from_env()?),
            DocumentStoreKind::Memory => None,
        };

        Ok(Self {
            document_store,
            management_posts,
            database,
        })
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set when DOCUMENT_STORE=postgres".to_string())?;

        Ok(Self {
            url,
            max_connections: parse_or("DB_MAX_CONNECTIONS", Self::DEFAULT_MAX_CONNECTIONS)?,
            min_connections: parse_or("DB_MIN_CONNECTIONS", Self::DEFAULT_MIN_CONNECTIONS)?,
            acquire_timeout_secs: parse_or(
                "DB_ACQUIRE_TIMEOUT_SECS",
                Self::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?,
            idle_timeout_secs: parse_or("DB_IDLE_TIMEOUT_SECS", Self::DEFAULT_IDLE_TIMEOUT_SECS)?,
            max_lifetime_secs: parse_or("DB_MAX_LIFETIME_SECS", Self::DEFAULT_MAX_LIFETIME_SECS)?,
        })
    }
}

impl PortalConfig {
    const DEFAULT_AD_EXPIRY_HOURS: i64 = 24;
    const MAX_AD_EXPIRY_HOURS: i64 = 24 * 366;

    pub fn from_env() -> Result<Self, String> {
        let villa_data_path = env::var("VILLA_DATA_PATH")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let ad_expiry_hours = Self::check_ad_expiry_hours(parse_or(
            "AD_EXPIRY_HOURS",
            Self::DEFAULT_AD_EXPIRY_HOURS,
        )?)?;

        Ok(Self {
            villa_data_path,
            ad_expiry_hours,
        })
    }

    fn check_ad_expiry_hours(hours: i64) -> Result<i64, String> {
        if !(1..=Self::MAX_AD_EXPIRY_HOURS).contains(&hours) {
            return Err(format!(
                "AD_EXPIRY_HOURS must be between 1 and {}",
                Self::MAX_AD_EXPIRY_HOURS
            ));
        }
        Ok(hours)
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Villa Portal API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for the community portal".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
