//! Spotify Web API client: remote transport and playlist track source

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use futures::TryStreamExt;
use rspotify::{
    AuthCodePkceSpotify,
    model::{PlayableId, PlayableItem, PlaylistId, TrackId},
    prelude::*,
};

use crate::error::{SessionError, SessionResult};
use super::collaborators::{RemoteTransport, TrackSource};
use super::types::{PlaylistItem, Queue, Track};

/// Cap on how many library playlists the picker offers
pub const PLAYLIST_LIMIT: usize = 50;

/// Spotify API client bound to one authorized user
#[derive(Clone)]
pub struct SpotifyClient {
    client: Arc<AuthCodePkceSpotify>,
    preferred_device: Option<String>,
}

impl SpotifyClient {
    pub fn new(client: AuthCodePkceSpotify, preferred_device: Option<String>) -> Self {
        Self {
            client: Arc::new(client),
            preferred_device,
        }
    }

    async fn get_device_id(&self) -> Option<String> {
        let devices = match self.client.device().await {
            Ok(devices) => devices,
            Err(e) => {
                tracing::debug!(error = %e, "Failed to get devices list");
                return None;
            }
        };

        // The user's preferred device wins, then whatever is active
        if let Some(name) = &self.preferred_device {
            if let Some(device) = devices.iter().find(|d| &d.name == name) {
                tracing::debug!(device_name = %device.name, device_id = ?device.id, "Using preferred device");
                return device.id.clone();
            }
        }

        if let Some(device) = devices.iter().find(|d| d.is_active) {
            tracing::debug!(device_name = %device.name, device_id = ?device.id, "Found active device");
            return device.id.clone();
        }

        tracing::debug!(available_devices = devices.len(), "No active or preferred device found");
        devices.into_iter().next().and_then(|d| d.id)
    }

    async fn resume(&self, uri: &str) -> Result<()> {
        let device_id = self.get_device_id().await;
        tracing::debug!(uri, device_id = ?device_id, "API: resume_playback");
        self.client.resume_playback(device_id.as_deref(), None).await?;
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        let device_id = self.get_device_id().await;
        tracing::debug!(device_id = ?device_id, "API: pause_playback");
        self.client.pause_playback(device_id.as_deref()).await?;
        Ok(())
    }

    fn track_from_item(item: PlayableItem) -> Option<Track> {
        let PlayableItem::Track(track) = item else {
            return None;
        };
        // local files carry no id and cannot be started remotely
        let track_id = track.id.as_ref()?.id().to_string();

        Some(Track {
            uri: format!("spotify:track:{}", track_id),
            id: track_id,
            title: track.name,
            artist: track.artists.first().map(|a| a.name.clone()).unwrap_or_default(),
            album: track.album.name,
            duration_ms: track.duration.num_milliseconds().max(0) as u32,
            artwork_url: track.album.images.first().map(|image| image.url.clone()),
        })
    }

    fn classify_error(playlist_id: &str, error: impl Into<anyhow::Error>) -> SessionError {
        let error = error.into();
        if error.to_string().contains("404") {
            SessionError::NotFound(format!("playlist {playlist_id}"))
        } else {
            SessionError::Transport(error)
        }
    }
}

#[async_trait]
impl RemoteTransport for SpotifyClient {
    async fn set_playback(&self, uri: &str, playing: bool) -> Result<()> {
        if playing {
            self.resume(uri).await
        } else {
            self.pause().await
        }
    }

    async fn start(&self, uri: &str, position_ms: u32) -> Result<()> {
        let device_id = self.get_device_id().await;
        tracing::debug!(uri, position_ms, device_id = ?device_id, "API: start_uris_playback");
        // Extract track ID from URI (format: spotify:track:ID)
        let track_id = uri.split(':').next_back().unwrap_or(uri);
        self.client
            .start_uris_playback(
                [PlayableId::Track(TrackId::from_id(track_id)?)],
                device_id.as_deref(),
                None,
                Some(chrono::Duration::milliseconds(i64::from(position_ms))),
            )
            .await?;
        Ok(())
    }

    async fn seek(&self, position_ms: u32) -> Result<()> {
        let device_id = self.get_device_id().await;
        tracing::debug!(position_ms, device_id = ?device_id, "API: seek_track");
        self.client
            .seek_track(chrono::Duration::milliseconds(i64::from(position_ms)), device_id.as_deref())
            .await?;
        Ok(())
    }
}

#[async_trait]
impl TrackSource for SpotifyClient {
    async fn fetch_queue(&self, playlist_id: &str) -> SessionResult<Queue> {
        let id = PlaylistId::from_id_or_uri(playlist_id)
            .map_err(|_| SessionError::NotFound(format!("playlist {playlist_id}")))?;

        tracing::debug!(playlist_id, "API: playlist_items");
        let items: Vec<_> = self
            .client
            .playlist_items(id, None, None)
            .try_collect()
            .await
            .map_err(|e| Self::classify_error(playlist_id, e))?;

        let total_items = items.len();
        let tracks: Vec<Track> = items
            .into_iter()
            .filter_map(|item| item.track.and_then(Self::track_from_item))
            .collect();

        tracing::info!(playlist_id, total_items, playable = tracks.len(), "Playlist tracks fetched");
        Ok(Queue::new(tracks))
    }

    async fn list_playlists(&self) -> SessionResult<Vec<PlaylistItem>> {
        tracing::debug!("API: current_user_playlists");
        let all_playlists: Vec<_> = self
            .client
            .current_user_playlists()
            .try_collect()
            .await
            .map_err(|e| SessionError::Transport(e.into()))?;

        let playlists: Vec<PlaylistItem> = all_playlists
            .into_iter()
            .take(PLAYLIST_LIMIT)
            .map(|playlist| PlaylistItem {
                id: playlist.id.id().to_string(),
                name: playlist.name,
            })
            .collect();

        tracing::info!(count = playlists.len(), "User playlists fetched");
        Ok(playlists)
    }
}
