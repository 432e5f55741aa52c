//! Loading [`SigningConfig`] for the command-line host.
//!
//! Values come from an optional TOML file and are then overridden by
//! environment variables:
//!
//! - `HPP_MERCHANT_ID`
//! - `HPP_ACCOUNT`
//! - `HPP_SECRET`
//! - `HPP_ENDPOINT_URL`
//! - `HPP_RESPONSE_URL`
//! - `HPP_SCHEME` (`sha1` or `md5`)
//! - `HPP_AUTO_SETTLE` (`true`/`false`, `1`/`0`)
//!
//! The library types never read files or the environment themselves.

use crate::domain::merchant::{DEFAULT_ENDPOINT_URL, SigningConfig};
use crate::domain::scheme::SignatureScheme;
use crate::domain::secret::Secret;
use crate::error::{HppError, Result};
use serde::Deserialize;
use std::path::Path;

pub const ENV_MERCHANT_ID: &str = "HPP_MERCHANT_ID";
pub const ENV_ACCOUNT: &str = "HPP_ACCOUNT";
pub const ENV_SECRET: &str = "HPP_SECRET";
pub const ENV_ENDPOINT_URL: &str = "HPP_ENDPOINT_URL";
pub const ENV_RESPONSE_URL: &str = "HPP_RESPONSE_URL";
pub const ENV_SCHEME: &str = "HPP_SCHEME";
pub const ENV_AUTO_SETTLE: &str = "HPP_AUTO_SETTLE";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    merchant_id: Option<String>,
    account: Option<String>,
    secret: Option<Secret>,
    endpoint_url: Option<String>,
    response_url: Option<String>,
    scheme: Option<SignatureScheme>,
    auto_settle: Option<bool>,
}

/// Loads the configuration from `path` (if any) and the process environment.
pub fn load(path: Option<&Path>) -> Result<SigningConfig> {
    let contents = path.map(std::fs::read_to_string).transpose()?;
    from_sources(contents.as_deref(), |key| std::env::var(key).ok())
}

/// Builds the configuration from TOML text and an environment lookup.
///
/// # Arguments
///
/// * `toml` - Contents of the configuration file, if one was given.
/// * `env` - Returns the value of an environment variable.
pub fn from_sources<F>(toml: Option<&str>, env: F) -> Result<SigningConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut file: ConfigFile = match toml {
        Some(contents) => toml::from_str(contents)?,
        None => ConfigFile::default(),
    };

    if let Some(value) = env(ENV_MERCHANT_ID) {
        file.merchant_id = Some(value);
    }
    if let Some(value) = env(ENV_ACCOUNT) {
        file.account = Some(value);
    }
    if let Some(value) = env(ENV_SECRET) {
        file.secret = Some(Secret::from(value));
    }
    if let Some(value) = env(ENV_ENDPOINT_URL) {
        file.endpoint_url = Some(value);
    }
    if let Some(value) = env(ENV_RESPONSE_URL) {
        file.response_url = Some(value);
    }
    if let Some(value) = env(ENV_SCHEME) {
        file.scheme = Some(value.parse()?);
    }
    if let Some(value) = env(ENV_AUTO_SETTLE) {
        file.auto_settle = Some(parse_bool(ENV_AUTO_SETTLE, &value)?);
    }

    let mut config = SigningConfig::new(
        file.merchant_id.unwrap_or_default(),
        file.secret.unwrap_or_default(),
    )
    .with_endpoint_url(
        file.endpoint_url
            .unwrap_or_else(|| DEFAULT_ENDPOINT_URL.to_string()),
    )
    .with_scheme(file.scheme.unwrap_or_default())
    .with_auto_settle(file.auto_settle.unwrap_or(true));

    if let Some(account) = file.account {
        config = config.with_account(account);
    }
    if let Some(url) = file.response_url {
        config = config.with_response_url(url);
    }
    Ok(config)
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(HppError::Config(format!(
            "{key} must be true or false, got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const FILE: &str = r#"
merchant_id = "1234abcd"
account = "asdf1234"
secret = "zbcd4321"
response_url = "http://localhost/handle"
"#;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_loads_toml_file() {
        let config = from_sources(Some(FILE), no_env).unwrap();
        assert_eq!(config.merchant_id(), "1234abcd");
        assert_eq!(config.account(), Some("asdf1234"));
        assert_eq!(config.secret().expose(), "zbcd4321");
        assert_eq!(config.endpoint_url(), DEFAULT_ENDPOINT_URL);
        assert_eq!(config.response_url(), Some("http://localhost/handle"));
        assert_eq!(config.scheme(), SignatureScheme::Sha1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_file() {
        let env = HashMap::from([
            (ENV_SECRET, "from-env"),
            (ENV_SCHEME, "md5"),
            (ENV_AUTO_SETTLE, "0"),
        ]);
        let config =
            from_sources(Some(FILE), |key| env.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.secret().expose(), "from-env");
        assert_eq!(config.merchant_id(), "1234abcd");
        assert_eq!(config.scheme(), SignatureScheme::Md5);
        assert!(!config.auto_settle());
    }

    #[test]
    fn test_env_only_without_file() {
        let env = HashMap::from([
            (ENV_MERCHANT_ID, "m"),
            (ENV_ACCOUNT, "a"),
            (ENV_SECRET, "s"),
        ]);
        let config = from_sources(None, |key| env.get(key).map(|v| v.to_string())).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_values_fail_validation_not_loading() {
        let config = from_sources(None, no_env).unwrap();
        assert!(matches!(config.validate(), Err(HppError::Config(_))));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result = from_sources(Some("merchant = \"x\""), no_env);
        assert!(matches!(result, Err(HppError::Toml(_))));
    }

    #[test]
    fn test_invalid_env_values() {
        let result = from_sources(None, |key| {
            (key == ENV_AUTO_SETTLE).then(|| "maybe".to_string())
        });
        assert!(matches!(result, Err(HppError::Config(_))));

        let result = from_sources(None, |key| (key == ENV_SCHEME).then(|| "sha256".to_string()));
        assert!(matches!(result, Err(HppError::Config(_))));
    }
}
