//! Access token resolution
//!
//!     Tokens are looked up in order:
//!
//!     1. the token environment variable (`QUIP_TOKEN` unless configured otherwise), if non-empty
//!     2. the quip-cli login file (`~/.quiprc`), which looks like
//!        `{"sites": {"quip.com": {"accessToken": "..."}}}`. The preferred site wins; otherwise
//!        the first site listed in the file is used.

use indexmap::IndexMap;
use learnmap_config::QuipConfig;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const LOGIN_MESSAGE: &str = "You don't seem to be logged in. Set QUIP_TOKEN to an access token or try installing quip-cli and running quip-cli login.";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("{}", LOGIN_MESSAGE)]
    NotLoggedIn,

    #[error("malformed login file {}: {reason}", .path.display())]
    MalformedConfig { path: PathBuf, reason: String },
}

#[derive(Debug, Deserialize)]
struct LoginFile {
    sites: IndexMap<String, SiteLogin>,
}

#[derive(Debug, Deserialize)]
struct SiteLogin {
    #[serde(rename = "accessToken")]
    access_token: Option<String>,
}

/// Resolve a token using the process environment and the user's home directory.
pub fn resolve_token(config: &QuipConfig) -> Result<String, CredentialError> {
    let from_env = std::env::var(&config.token_env).ok();
    let rc_path = dirs::home_dir().map(|home| home.join(&config.rc_file));
    resolve_token_from(from_env, rc_path.as_deref(), &config.preferred_site)
}

/// Resolution with its inputs made explicit.
pub fn resolve_token_from(
    from_env: Option<String>,
    rc_path: Option<&Path>,
    preferred_site: &str,
) -> Result<String, CredentialError> {
    if let Some(token) = from_env.filter(|token| !token.is_empty()) {
        debug!("using access token from the environment");
        return Ok(token);
    }

    let Some(rc_path) = rc_path else {
        return Err(CredentialError::NotLoggedIn);
    };
    let contents = match std::fs::read_to_string(rc_path) {
        Ok(contents) => contents,
        Err(err) => {
            debug!("cannot read {}: {}", rc_path.display(), err);
            return Err(CredentialError::NotLoggedIn);
        }
    };
    token_from_login_file(&contents, preferred_site).map_err(|err| match err {
        LoginFileError::Malformed(reason) => CredentialError::MalformedConfig {
            path: rc_path.to_path_buf(),
            reason,
        },
        LoginFileError::NoToken => CredentialError::NotLoggedIn,
    })
}

#[derive(Debug, PartialEq, Eq)]
enum LoginFileError {
    Malformed(String),
    NoToken,
}

fn token_from_login_file(contents: &str, preferred_site: &str) -> Result<String, LoginFileError> {
    let login: LoginFile =
        serde_json::from_str(contents).map_err(|e| LoginFileError::Malformed(e.to_string()))?;

    let site = login
        .sites
        .get_key_value(preferred_site)
        .or_else(|| login.sites.first());
    let Some((name, site)) = site else {
        return Err(LoginFileError::NoToken);
    };

    debug!("using access token for site {}", name);
    site.access_token
        .clone()
        .filter(|token| !token.is_empty())
        .ok_or(LoginFileError::NoToken)
}
