use anyhow::{Context, Result};
use lenslocked_auth::AuthConfig;
use lenslocked_notifications::SmtpConfig;
use serde::Deserialize;

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "lenslocked.toml";

/// Everything the CLI reads from `lenslocked.toml` and `LENSLOCKED__*`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub smtp: SmtpConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Falls back to `DATABASE_URL`.
    pub url: Option<String>,
}

impl DatabaseConfig {
    pub fn resolve_url(&self) -> Result<String> {
        self.url
            .clone()
            .filter(|url| !url.is_empty())
            .or_else(|| std::env::var("DATABASE_URL").ok())
            .context("database URL not set (use LENSLOCKED__DATABASE__URL or DATABASE_URL)")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

pub mod loader {
    use super::{AppConfig, DEFAULT_CONFIG_PATH};
    use anyhow::{Context, Result};
    use config::builder::DefaultState;
    use config::{Config, ConfigBuilder, Environment, File};
    use std::path::PathBuf;

    pub fn load_config(path: Option<&str>) -> Result<AppConfig> {
        let mut builder = Config::builder();
        match path {
            Some(p) => {
                let pathbuf = PathBuf::from(p);
                anyhow::ensure!(pathbuf.exists(), "config file not found: {p}");
                builder = builder.add_source(File::from(pathbuf));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    builder = builder.add_source(File::from(default_path));
                }
            }
        }
        // Environment variable overrides, e.g., LENSLOCKED__AUTH__PASSWORD_RESET__DURATION=30m
        builder = builder.add_source(
            Environment::with_prefix("LENSLOCKED")
                .try_parsing(true)
                .separator("__"),
        );
        finish(builder)
    }

    pub(crate) fn finish(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig> {
        let merged: AppConfig = builder
            .build()
            .context("config build error")?
            .try_deserialize()
            .context("config deserialize error")?;
        merged.auth.validate()?;
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};
    use std::time::Duration;

    fn from_toml(toml: &str) -> Result<AppConfig> {
        loader::finish(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = from_toml("").unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.smtp.port, 587);
        assert_eq!(config.auth.password_reset.duration, Duration::from_secs(3600));
        assert!(config.database.url.is_none());
    }

    #[test]
    fn test_sections_are_read() {
        let config = from_toml(
            r#"
            [database]
            url = "postgres://localhost/lenslocked"

            [auth.password_reset]
            duration = "15m"
            reset_url = "https://www.lenslocked.com/reset-pw"

            [smtp]
            host = "sandbox.smtp.mailtrap.io"
            port = 2525
            "#,
        )
        .unwrap();
        assert_eq!(
            config.database.resolve_url().unwrap(),
            "postgres://localhost/lenslocked"
        );
        assert_eq!(config.auth.password_reset.duration, Duration::from_secs(900));
        assert_eq!(config.smtp.host, "sandbox.smtp.mailtrap.io");
        assert_eq!(config.smtp.port, 2525);
    }

    #[test]
    fn test_invalid_auth_config_is_rejected() {
        let err = from_toml(
            r#"
            [auth.password_reset]
            duration = "0s"
            "#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("password_reset.duration"));
    }

    #[test]
    fn test_missing_explicit_file() {
        assert!(loader::load_config(Some("/nonexistent/lenslocked.toml")).is_err());
    }
}
