//! Runtime configuration
//!
//! Values come from the process environment, after an optional `.env` file in the working
//! directory has been loaded. Environment variables always win over the file.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::model::{FAVORITES_FILE, SessionOptions};

pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8898/login";
pub const TOKEN_CACHE_FILE: &str = ".cache/token.json";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub client_id: String,
    pub redirect_uri: String,
    /// Playlist to load at startup; without one the app opens the playlist picker
    pub playlist_id: Option<String>,
    pub device_name: Option<String>,
    pub stop_at_queue_end: bool,
    pub lyrics_enabled: bool,
    pub token_cache_path: PathBuf,
    pub favorites_path: PathBuf,
}

impl AppConfig {
    /// Load `.env` (if present) and read the environment.
    ///
    /// `playlist_arg` (first CLI argument) takes precedence over `SPOTIFY_PLAYLIST_ID`.
    pub fn from_env(playlist_arg: Option<String>) -> Result<Self> {
        match dotenv::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e).context("Failed to parse .env file"),
        }
        Self::from_lookup(playlist_arg, |key| env::var(key).ok())
    }

    pub fn from_lookup<F>(playlist_arg: Option<String>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let client_id = non_empty("SPOTIFY_CLIENT_ID").context("SPOTIFY_CLIENT_ID must be set")?;
        let playlist_id = playlist_arg
            .filter(|v| !v.trim().is_empty())
            .or_else(|| non_empty("SPOTIFY_PLAYLIST_ID"));

        Ok(Self {
            client_id,
            redirect_uri: non_empty("SPOTIFY_REDIRECT_URI").unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
            playlist_id,
            device_name: non_empty("SPOTIFY_DEVICE_NAME"),
            stop_at_queue_end: parse_flag(non_empty("NOWPLAYING_STOP_AT_QUEUE_END"), false)
                .context("NOWPLAYING_STOP_AT_QUEUE_END must be a boolean")?,
            lyrics_enabled: parse_flag(non_empty("NOWPLAYING_LYRICS"), true)
                .context("NOWPLAYING_LYRICS must be a boolean")?,
            token_cache_path: PathBuf::from(TOKEN_CACHE_FILE),
            favorites_path: PathBuf::from(FAVORITES_FILE),
        })
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            stop_at_queue_end: self.stop_at_queue_end,
            shuffle_seed: None,
        }
    }
}

fn parse_flag(value: Option<String>, default: bool) -> Result<bool> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow::anyhow!("invalid boolean '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_fill_optional_values() {
        let config = AppConfig::from_lookup(
            None,
            lookup(&[("SPOTIFY_CLIENT_ID", "abc"), ("SPOTIFY_PLAYLIST_ID", "pl1")]),
        )
        .unwrap();
        assert_eq!(config.redirect_uri, DEFAULT_REDIRECT_URI);
        assert_eq!(config.playlist_id.as_deref(), Some("pl1"));
        assert!(config.device_name.is_none());
        assert!(!config.stop_at_queue_end);
        assert!(config.lyrics_enabled);
    }

    #[test]
    fn argument_overrides_env_playlist() {
        let config = AppConfig::from_lookup(
            Some("from-arg".to_string()),
            lookup(&[("SPOTIFY_CLIENT_ID", "abc"), ("SPOTIFY_PLAYLIST_ID", "pl1")]),
        )
        .unwrap();
        assert_eq!(config.playlist_id.as_deref(), Some("from-arg"));
    }

    #[test]
    fn playlist_is_optional() {
        let config = AppConfig::from_lookup(
            Some("  ".to_string()),
            lookup(&[("SPOTIFY_CLIENT_ID", "abc"), ("SPOTIFY_PLAYLIST_ID", "")]),
        )
        .unwrap();
        assert!(config.playlist_id.is_none());
    }

    #[test]
    fn missing_client_id_is_an_error() {
        let err = AppConfig::from_lookup(Some("pl".to_string()), lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("SPOTIFY_CLIENT_ID"));
    }

    #[test]
    fn flags_parse_and_reject_garbage() {
        let config = AppConfig::from_lookup(
            Some("pl".to_string()),
            lookup(&[
                ("SPOTIFY_CLIENT_ID", "abc"),
                ("NOWPLAYING_STOP_AT_QUEUE_END", "Yes"),
                ("NOWPLAYING_LYRICS", "off"),
            ]),
        )
        .unwrap();
        assert!(config.stop_at_queue_end);
        assert!(!config.lyrics_enabled);
        assert!(config.session_options().stop_at_queue_end);

        let err = AppConfig::from_lookup(
            Some("pl".to_string()),
            lookup(&[("SPOTIFY_CLIENT_ID", "abc"), ("NOWPLAYING_LYRICS", "maybe")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("NOWPLAYING_LYRICS"));
    }
}
