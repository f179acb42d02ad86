use std::path::Path;

use anyhow::{Context, Result};
use rspotify::{AuthCodePkceSpotify, Config, Credentials, OAuth, prelude::*, scopes};

use crate::config::AppConfig;

/// Authorize against the Spotify Web API with the PKCE flow.
///
/// A cached token is reused (and refreshed when expired). Otherwise the authorize URL is
/// opened in the browser and the user pastes back the redirect URL.
pub async fn authorize(config: &AppConfig) -> Result<AuthCodePkceSpotify> {
    ensure_parent_dir(&config.token_cache_path)?;

    let creds = Credentials::new_pkce(&config.client_id);
    let oauth = OAuth {
        redirect_uri: config.redirect_uri.clone(),
        scopes: scopes!(
            "user-read-playback-state",
            "user-modify-playback-state",
            "playlist-read-private",
            "playlist-read-collaborative"
        ),
        ..Default::default()
    };
    let rspotify_config = Config {
        token_cached: true,
        token_refreshing: true,
        cache_path: config.token_cache_path.clone(),
        ..Default::default()
    };

    let mut spotify = AuthCodePkceSpotify::with_config(creds, oauth, rspotify_config);
    let url = spotify
        .get_authorize_url(None)
        .context("Failed to build authorize URL")?;

    tracing::info!(cache = %config.token_cache_path.display(), "Starting PKCE authorization");
    spotify
        .prompt_for_token(&url)
        .await
        .context("Spotify authorization failed")?;
    tracing::info!("Spotify authorization completed");

    Ok(spotify)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    Ok(())
}
