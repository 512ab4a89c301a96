use std::env;
use anyhow::Context;
use crate::workflow::AccountSettings;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_LEVEL: &str = "info,sqlx=warn";
const DEFAULT_RESET_PASSWORD: &str = "changeme123";

/// Runtime settings, read from the process environment after `.env` is loaded.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    /// Credential applied by the admin password reset.
    pub reset_password: String,
    pub bcrypt_cost: u32,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let port = match env::var("APP_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("APP_PORT is not a valid port: {}", value))?,
            Err(_) => DEFAULT_PORT,
        };

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(value) => value
                .parse::<u32>()
                .with_context(|| format!("BCRYPT_COST is not a number: {}", value))?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            host: env::var("APP_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
            reset_password: env::var("RESET_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_RESET_PASSWORD.to_string()),
            bcrypt_cost,
        })
    }

    pub fn account(&self) -> AccountSettings {
        AccountSettings {
            reset_password: self.reset_password.clone(),
            hash_cost: self.bcrypt_cost,
        }
    }

    pub fn address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
