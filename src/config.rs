//! Configuration management for the library follower.
//!
//! Two kinds of configuration exist:
//! 1. The Spotify application credentials (client id and secret), read from
//!    `~/.spot/config.yaml` (`clientId` / `clientSecret`). Installations that
//!    only have a `.env` style file at `~/.spot/.env` keep working, and process
//!    environment variables take precedence over both files.
//! 2. Runtime settings such as the callback address or the Spotify endpoints,
//!    read from environment variables and falling back to built-in defaults.
//!
//! Credentials are required for every command that talks to Spotify. When they
//! are missing or malformed the command stops before any network traffic.

use std::{env, path::Path, path::PathBuf, time::Duration};

use serde::Deserialize;
use thiserror::Error;

pub const CLIENT_ID_KEY: &str = "SPOTIFY_CLIENT_ID";
pub const CLIENT_SECRET_KEY: &str = "SPOTIFY_CLIENT_SECRET";
pub const CLIENT_ID_FIELD: &str = "clientId";
pub const CLIENT_SECRET_FIELD: &str = "clientSecret";

pub const CONFIG_DIR: &str = ".spot";
pub const CONFIG_FILE: &str = "config.yaml";
pub const DOTENV_FILE: &str = ".env";

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:1024";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:1024/callback";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_FOLLOW_DELAY_MS: u64 = 500;

/// Permissions requested during authorization: read profile, read follows,
/// modify follows.
pub const SCOPES: [&str; 3] = ["user-read-private", "user-follow-read", "user-follow-modify"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot determine the home directory")]
    NoHomeDir,
    #[error("cannot read {}: {}", .0.display(), .1)]
    Read(PathBuf, std::io::Error),
    #[error("malformed config file: {0}")]
    Yaml(#[from] serde_yml::Error),
    #[error("malformed credential file: {0}")]
    Parse(#[from] dotenvy::Error),
    #[error("{0} is missing or empty")]
    Missing(&'static str),
}

/// Spotify application credentials.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

/// On-disk shape of `~/.spot/config.yaml`.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(rename = "clientId", default)]
    client_id: Option<String>,
    #[serde(rename = "clientSecret", default)]
    client_secret: Option<String>,
}

/// Everything the authorization flow needs to talk to the accounts service.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub credentials: Credentials,
    pub authorize_url: String,
    pub token_url: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
}

impl OAuthConfig {
    pub fn from_env(credentials: Credentials) -> Self {
        OAuthConfig {
            credentials,
            authorize_url: spotify_auth_url(),
            token_url: spotify_token_url(),
            redirect_uri: spotify_redirect_uri(),
            scopes: SCOPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Returns the location of the credential file, `~/.spot/config.yaml`.
pub fn credentials_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Loads the credentials from `~/.spot`, letting environment variables
/// override the file values.
///
/// # Errors
///
/// Fails if the home directory cannot be resolved, the file cannot be read
/// or parsed, or one of the two keys ends up missing or empty.
pub async fn load_credentials() -> Result<Credentials, ConfigError> {
    let env_id = non_empty_env(CLIENT_ID_KEY);
    let env_secret = non_empty_env(CLIENT_SECRET_KEY);

    if let (Some(client_id), Some(client_secret)) = (env_id.clone(), env_secret.clone()) {
        return Ok(Credentials {
            client_id,
            client_secret,
        });
    }

    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    let mut credentials = load_credentials_in(&home).await?;
    if let Some(id) = env_id {
        credentials.client_id = id;
    }
    if let Some(secret) = env_secret {
        credentials.client_secret = secret;
    }
    Ok(credentials)
}

/// Loads the credentials stored below `home`.
///
/// `.spot/config.yaml` is used when present. Otherwise `.spot/.env` is tried,
/// and when neither exists the error names the YAML file.
pub async fn load_credentials_in(home: &Path) -> Result<Credentials, ConfigError> {
    let dir = home.join(CONFIG_DIR);
    let yaml = dir.join(CONFIG_FILE);
    let dotenv = dir.join(DOTENV_FILE);

    if async_fs::metadata(&yaml).await.is_err() && async_fs::metadata(&dotenv).await.is_ok() {
        return load_dotenv_credentials(&dotenv).await;
    }
    load_credentials_from(&yaml).await
}

/// Reads the credential pair from a YAML file with `clientId` and
/// `clientSecret` keys.
pub async fn load_credentials_from(path: &Path) -> Result<Credentials, ConfigError> {
    let content = async_fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;

    let file: ConfigFile = if content.trim().is_empty() {
        ConfigFile::default()
    } else {
        serde_yml::from_str(&content)?
    };

    credentials(
        (file.client_id, CLIENT_ID_FIELD),
        (file.client_secret, CLIENT_SECRET_FIELD),
    )
}

/// Reads the credential pair from a dotenv formatted file.
pub async fn load_dotenv_credentials(path: &Path) -> Result<Credentials, ConfigError> {
    let content = async_fs::read(path)
        .await
        .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;

    let mut client_id = None;
    let mut client_secret = None;
    for item in dotenvy::from_read_iter(content.as_slice()) {
        let (key, value) = item?;
        match key.as_str() {
            CLIENT_ID_KEY => client_id = Some(value),
            CLIENT_SECRET_KEY => client_secret = Some(value),
            _ => {}
        }
    }

    credentials(
        (client_id, CLIENT_ID_KEY),
        (client_secret, CLIENT_SECRET_KEY),
    )
}

fn credentials(
    (client_id, id_key): (Option<String>, &'static str),
    (client_secret, secret_key): (Option<String>, &'static str),
) -> Result<Credentials, ConfigError> {
    let client_id = client_id
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(id_key))?;
    let client_secret = client_secret
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(secret_key))?;

    Ok(Credentials {
        client_id,
        client_secret,
    })
}

/// Address the local callback server binds to. Must match the host and port
/// of the redirect URI.
pub fn server_addr() -> String {
    env_or("SPOT_SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Redirect URI registered for the Spotify application.
pub fn spotify_redirect_uri() -> String {
    env_or("SPOT_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

pub fn spotify_auth_url() -> String {
    env_or("SPOT_AUTH_URL", DEFAULT_AUTH_URL)
}

pub fn spotify_token_url() -> String {
    env_or("SPOT_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Base URL of the Web API, e.g. `https://api.spotify.com/v1`.
pub fn spotify_api_url() -> String {
    env_or("SPOT_API_URL", DEFAULT_API_URL)
}

/// Pause between two follow requests.
pub fn follow_delay() -> Duration {
    let millis = env::var("SPOT_FOLLOW_DELAY_MS")
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_FOLLOW_DELAY_MS);
    Duration::from_millis(millis)
}

fn env_or(key: &str, default: &str) -> String {
    non_empty_env(key).unwrap_or_else(|| default.to_string())
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
