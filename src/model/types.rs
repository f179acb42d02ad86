//! Core type definitions for the playback session

use std::ops::Index;
use std::sync::Arc;

/// A playable track as returned by a [`TrackSource`](super::TrackSource)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration_ms: u32,
    pub artwork_url: Option<String>,
    pub uri: String,
}

/// Ordered, shared track list for one session.
///
/// Cloning a `Queue` only bumps a reference count; tracks are never copied once fetched.
#[derive(Clone, Debug)]
pub struct Queue {
    tracks: Arc<[Track]>,
}

impl Queue {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks: tracks.into() }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }
}

impl Index<usize> for Queue {
    type Output = Track;

    fn index(&self, index: usize) -> &Track {
        &self.tracks[index]
    }
}

/// A playlist the user can pick from their library
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistItem {
    pub id: String,
    pub name: String,
}

/// Repeat mode state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RepeatMode {
    #[default]
    Off,
    Track,
    Context,
}

impl RepeatMode {
    /// `Off → Track → Context → Off`
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::Track,
            RepeatMode::Track => RepeatMode::Context,
            RepeatMode::Context => RepeatMode::Off,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RepeatMode::Off => "Off",
            RepeatMode::Track => "One",
            RepeatMode::Context => "All",
        }
    }
}

/// Coarse session state as seen by the view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Paused,
    Playing,
}

/// Identifies the track an async request was issued for.
///
/// `generation` changes on every load and every track change, so a response carrying an
/// old ticket belongs to a track the session has already left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackTicket {
    pub generation: u64,
    pub index: usize,
}

#[cfg(test)]
pub(crate) fn test_track(id: &str, duration_ms: u32) -> Track {
    Track {
        id: id.to_string(),
        title: format!("Title {id}"),
        artist: format!("Artist {id}"),
        album: "Album".to_string(),
        duration_ms,
        artwork_url: None,
        uri: format!("spotify:track:{id}"),
    }
}
