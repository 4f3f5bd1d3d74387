use crate::error::{BadEnvVarSnafu, ParseDatabaseUrlSnafu, ParsePortSnafu, RegistryResult};
use dotenvy::var;
use secrecy::{ExposeSecret, SecretString};
use snafu::ResultExt;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::{str::FromStr, sync::Arc};

/// Browser origins allowed to call the API.
pub const ALLOWED_ORIGINS: [&str; 2] = [
    "https://student-app-dun.vercel.app",
    "http://localhost:4200",
];

const DEFAULT_SERVER_IP: &str = "127.0.0.1:3000";

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    db_config: Arc<DbConfig>,
    is_production: bool,
    server_ip: String,
}

impl RuntimeConfiguration {
    pub fn new() -> RegistryResult<Self> {
        Ok(Self {
            db_config: Arc::new(DbConfig::new()?),
            is_production: var("APP_ENV").is_ok_and(|env| env == "production"),
            server_ip: var("REGISTRY_SERVER_IP").unwrap_or_else(|_| DEFAULT_SERVER_IP.to_string()),
        })
    }

    pub const fn is_production(&self) -> bool {
        self.is_production
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }

    /// Production databases are reached over TLS without verifying the certificate.
    pub fn connect_options(&self) -> RegistryResult<PgConnectOptions> {
        let options = self.db_config.connect_options()?;
        Ok(if self.is_production {
            options.ssl_mode(PgSslMode::Require)
        } else {
            options
        })
    }
}

#[derive(Debug)]
pub enum DbConfig {
    ConnectionString(SecretString),
    Parts {
        user: String,
        password: SecretString,
        host: String,
        port: u16,
        database: String,
    },
}

impl DbConfig {
    pub fn new() -> RegistryResult<Self> {
        if let Ok(url) = var("DATABASE_URL") {
            return Ok(Self::ConnectionString(SecretString::from(url)));
        }

        let get_env_var = |name| var(name).context(BadEnvVarSnafu { name });

        Ok(Self::Parts {
            user: get_env_var("PGUSER")?,
            password: SecretString::from(get_env_var("PGPASSWORD")?),
            host: get_env_var("PGHOST")?,
            port: get_env_var("PGPORT")?.parse().context(ParsePortSnafu)?,
            database: get_env_var("PGDATABASE")?,
        })
    }

    pub fn connect_options(&self) -> RegistryResult<PgConnectOptions> {
        match self {
            Self::ConnectionString(url) => {
                PgConnectOptions::from_str(url.expose_secret()).context(ParseDatabaseUrlSnafu)
            }
            Self::Parts {
                user,
                password,
                host,
                port,
                database,
            } => Ok(PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(user)
                .password(password.expose_secret())
                .database(database)),
        }
    }
}
