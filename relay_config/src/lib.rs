use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{builder::DefaultState, ConfigBuilder, File, FileFormat};
use relay_models::email_address::EmailMailbox;
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of additional config files, applied in order on top
/// of the defaults.
pub const CONFIG_PATHS_ENV: &str = "RELAY_CONFIG";

/// Overrides `email.api_key`.
pub const API_KEY_ENV: &str = "RESEND_API_KEY";

/// Load the configuration from the default config file, the files listed in
/// `RELAY_CONFIG` and the `RESEND_API_KEY` environment variable.
pub fn load() -> anyhow::Result<Config> {
    let mut paths = vec![PathBuf::from(DEFAULT_CONFIG_PATH)];
    if let Ok(extra) = std::env::var(CONFIG_PATHS_ENV) {
        paths.extend(extra.split(':').filter(|x| !x.is_empty()).map(PathBuf::from));
    }

    load_with_api_key(&paths, &[], std::env::var(API_KEY_ENV).ok())
}

pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    load_with_override(paths, &[])
}

/// Load the configuration from the given files. Each override is a toml
/// snippet (e.g. `email.api_key = "re_test"`) applied after the files.
pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    load_with_api_key(paths, overrides, None)
}

/// Like [`load_with_override`], but a non-empty `api_key` takes precedence
/// over `email.api_key` from the files. An empty key counts as unset.
fn load_with_api_key(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
    api_key: Option<String>,
) -> anyhow::Result<Config> {
    builder(paths, overrides)?
        .set_override_option("email.api_key", api_key.filter(|x| !x.is_empty()))?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

fn builder(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<ConfigBuilder<DefaultState>> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    Ok(overrides.iter().fold(builder, |builder, &snippet| {
        builder.add_source(File::from_str(snippet, FileFormat::Toml))
    }))
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub sentry: Option<SentryConfig>,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct EmailConfig {
    pub api_url: Url,
    pub api_key: Option<String>,
    pub from: EmailMailbox,
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("from", &self.from)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub recipient: EmailMailbox,
}

#[derive(Debug, Deserialize)]
pub struct SentryConfig {
    pub dsn: Url,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_default_config() {
        let config = load_paths(&[Path::new(DEFAULT_CONFIG_PATH)]).unwrap();
        assert_eq!(config.email.api_key, None);
        assert!(config.sentry.is_none());
    }

    #[test]
    fn override_api_key() {
        let config = load_with_override(
            &[Path::new(DEFAULT_CONFIG_PATH)],
            &["email.api_key = \"re_test\""],
        )
        .unwrap();
        assert_eq!(config.email.api_key.as_deref(), Some("re_test"));
    }

    #[test]
    fn api_key_from_env_takes_precedence() {
        let config = load_with_api_key(
            &[Path::new(DEFAULT_CONFIG_PATH)],
            &["email.api_key = \"re_file\""],
            Some("re_env".into()),
        )
        .unwrap();
        assert_eq!(config.email.api_key.as_deref(), Some("re_env"));
    }

    #[test]
    fn empty_api_key_from_env_is_unset() {
        let config =
            load_with_api_key(&[Path::new(DEFAULT_CONFIG_PATH)], &[], Some(String::new())).unwrap();
        assert_eq!(config.email.api_key, None);

        let config = load_with_api_key(
            &[Path::new(DEFAULT_CONFIG_PATH)],
            &["email.api_key = \"re_file\""],
            Some(String::new()),
        )
        .unwrap();
        assert_eq!(config.email.api_key.as_deref(), Some("re_file"));
    }

    #[test]
    fn missing_api_key_from_env_keeps_file_value() {
        let config = load_with_api_key(
            &[Path::new(DEFAULT_CONFIG_PATH)],
            &["email.api_key = \"re_file\""],
            None,
        )
        .unwrap();
        assert_eq!(config.email.api_key.as_deref(), Some("re_file"));
    }

    #[test]
    fn api_key_is_redacted() {
        let config = load_with_override(
            &[Path::new(DEFAULT_CONFIG_PATH)],
            &["email.api_key = \"re_secret\""],
        )
        .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("re_secret"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn invalid_recipient() {
        load_with_override(
            &[Path::new(DEFAULT_CONFIG_PATH)],
            &["contact.recipient = \"not an email\""],
        )
        .unwrap_err();
    }
}
