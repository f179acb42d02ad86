//! Contracts for the external services the playback session talks to
//!
//! The production implementations live next to this module (`SpotifyClient`,
//! `JsonFavoritesStore`, `LrclibClient`); tests substitute in-memory fakes.

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;

use crate::error::SessionResult;
use super::types::{PlaylistItem, Queue, Track};

/// The service actually producing audio. Its internals are not under our control.
#[async_trait]
pub trait RemoteTransport: Send + Sync {
    /// Resume (`playing == true`) or pause the item the remote already has loaded
    async fn set_playback(&self, uri: &str, playing: bool) -> Result<()>;

    /// Replace whatever the remote is playing with `uri`, starting at `position_ms`
    async fn start(&self, uri: &str, position_ms: u32) -> Result<()>;

    /// Move the remote playhead within the current item
    async fn seek(&self, position_ms: u32) -> Result<()>;
}

/// Provides the ordered track list for a playlist.
///
/// Fails with `SessionError::NotFound` or `SessionError::Transport`.
#[async_trait]
pub trait TrackSource: Send + Sync {
    async fn fetch_queue(&self, playlist_id: &str) -> SessionResult<Queue>;

    /// Playlists in the user's library, in library order
    async fn list_playlists(&self) -> SessionResult<Vec<PlaylistItem>>;
}

/// Persisted set of favorite track ids; last write wins
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    async fn get(&self) -> Result<HashSet<String>>;

    async fn set(&self, ids: &HashSet<String>) -> Result<()>;
}

/// Lyrics lookup; `SessionError::NotFound` when the upstream has none
#[async_trait]
pub trait LyricsSource: Send + Sync {
    async fn fetch_lyrics(&self, track: &Track) -> SessionResult<String>;
}
