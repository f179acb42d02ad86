//! Playback state owned by the session and the snapshot handed to the view

use std::collections::HashSet;

use super::clock::PROGRESS_QUANTUM_MS;
use super::types::{Queue, RepeatMode, SessionStatus, Track};

/// Mutable core of a loaded session
#[derive(Clone, Debug)]
pub struct PlaybackState {
    pub queue: Queue,
    pub current_index: usize,
    pub is_playing: bool,
    pub progress_ms: u32,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    pub favorite_ids: HashSet<String>,
}

impl PlaybackState {
    /// Fresh state on the first track, paused at zero. `queue` must be non-empty.
    pub fn new(queue: Queue, shuffle: bool, repeat: RepeatMode) -> Self {
        debug_assert!(!queue.is_empty());
        Self {
            queue,
            current_index: 0,
            is_playing: false,
            progress_ms: 0,
            shuffle,
            repeat,
            favorite_ids: HashSet::new(),
        }
    }

    pub fn current_track(&self) -> &Track {
        &self.queue[self.current_index]
    }

    pub fn duration_ms(&self) -> u32 {
        self.current_track().duration_ms
    }

    /// Advance local progress by one quantum.
    ///
    /// Returns `true` when the track end was reached; progress is then left clamped at
    /// the duration for the caller to resolve.
    pub fn advance_progress(&mut self) -> bool {
        let duration = self.duration_ms();
        let next = self.progress_ms.saturating_add(PROGRESS_QUANTUM_MS);
        if next >= duration {
            self.progress_ms = duration;
            true
        } else {
            self.progress_ms = next;
            false
        }
    }

    /// Move to `index` with progress reset. `index` must be in range.
    pub fn jump_to(&mut self, index: usize) {
        debug_assert!(index < self.queue.len());
        self.current_index = index;
        self.progress_ms = 0;
    }

    pub fn is_current_favorite(&self) -> bool {
        self.favorite_ids.contains(&self.current_track().id)
    }
}

/// Lyrics for the current track as last reported by the lyrics source
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LyricsState {
    #[default]
    Unavailable,
    Loading,
    Loaded(String),
    NotFound,
    Failed(String),
}

/// Complete playback information for rendering the UI
#[derive(Clone, Debug)]
pub struct PlaybackInfo {
    pub track: Option<Track>,
    pub current_index: usize,
    pub queue_len: usize,
    pub progress_ms: u32,
    pub duration_ms: u32,
    pub status: SessionStatus,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    pub is_favorite: bool,
    pub lyrics: LyricsState,
}

impl PlaybackInfo {
    pub fn is_playing(&self) -> bool {
        self.status == SessionStatus::Playing
    }

    /// Progress as a ratio in `[0, 1]` for gauges
    pub fn progress_ratio(&self) -> f64 {
        if self.duration_ms > 0 {
            (self.progress_ms as f64 / self.duration_ms as f64).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            track: None,
            current_index: 0,
            queue_len: 0,
            progress_ms: 0,
            duration_ms: 0,
            status: SessionStatus::Idle,
            shuffle: false,
            repeat: RepeatMode::Off,
            is_favorite: false,
            lyrics: LyricsState::Unavailable,
        }
    }
}
