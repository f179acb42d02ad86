//! Lyrics lookup against the public LRCLIB API

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::{SessionError, SessionResult};
use super::collaborators::LyricsSource;
use super::types::Track;

const LRCLIB_BASE_URL: &str = "https://lrclib.net";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LrclibRecord {
    #[serde(default)]
    instrumental: bool,
    plain_lyrics: Option<String>,
}

impl LrclibRecord {
    fn into_text(self) -> Option<String> {
        if self.instrumental {
            return Some("♪ Instrumental ♪".to_string());
        }
        self.plain_lyrics.filter(|text| !text.trim().is_empty())
    }
}

#[derive(Clone)]
pub struct LrclibClient {
    http: reqwest::Client,
    base_url: String,
}

impl LrclibClient {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_base_url(LRCLIB_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl LyricsSource for LrclibClient {
    async fn fetch_lyrics(&self, track: &Track) -> SessionResult<String> {
        let url = format!("{}/api/get", self.base_url);
        let duration_secs = (track.duration_ms / 1000).to_string();
        tracing::debug!(track = %track.title, artist = %track.artist, "API: lrclib get");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("track_name", track.title.as_str()),
                ("artist_name", track.artist.as_str()),
                ("album_name", track.album.as_str()),
                ("duration", duration_secs.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SessionError::Transport(e.into()))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(SessionError::NotFound(format!("lyrics for {}", track.id)));
            }
            status if !status.is_success() => {
                return Err(SessionError::Transport(anyhow::anyhow!("lrclib answered {}", status)));
            }
            _ => {}
        }

        let record: LrclibRecord = response
            .json()
            .await
            .map_err(|e| SessionError::Transport(e.into()))?;

        record
            .into_text()
            .ok_or_else(|| SessionError::NotFound(format!("lyrics for {}", track.id)))
    }
}
