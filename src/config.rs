use std::fmt;

use anyhow::Context;
use sqlx::postgres::PgConnectOptions;

#[derive(Clone)]
pub struct DatabaseConfig {
    /// `DATABASE_URL`; overrides the individual parts when set.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub name: String,
    pub connect_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Parts go to the driver as-is, so credentials never need URL escaping.
    pub fn connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        if let Some(url) = &self.url {
            return url
                .parse::<PgConnectOptions>()
                .context("DATABASE_URL is not a valid connection string");
        }
        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.name);
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        Ok(options)
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("name", &self.name)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (the process env in production).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("DB_PORT") {
            Some(v) => v
                .parse::<u16>()
                .with_context(|| format!("DB_PORT is not a valid port: {v:?}"))?,
            None => 5432,
        };
        let connect_timeout_secs = match lookup("DB_CONNECT_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .with_context(|| format!("DB_CONNECT_TIMEOUT_SECS is not a number of seconds: {v:?}"))?,
            None => 5,
        };

        Ok(Self {
            database: DatabaseConfig {
                url: lookup("DATABASE_URL"),
                host: lookup("DB_HOST").unwrap_or_else(|| "localhost".into()),
                port,
                user: lookup("DB_USER").unwrap_or_else(|| "postgres".into()),
                password: lookup("DB_PASSWORD").filter(|p| !p.is_empty()),
                name: lookup("DB_NAME").unwrap_or_else(|| "health_db".into()),
                connect_timeout_secs,
            },
        })
    }
}
