//! Presentation state that is not part of the playback session

use std::time::{Duration, Instant};

use super::types::PlaylistItem;

/// How long an error notification stays up before it clears itself
pub const ERROR_DISPLAY_TIME: Duration = Duration::from_secs(5);

#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    /// Highlighted row in the queue list
    pub queue_selected: usize,
    pub show_help_popup: bool,
    pub show_playlist_picker: bool,
    pub playlists: Vec<PlaylistItem>,
    pub playlist_selected: usize,
}

impl UiState {
    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
        self.error_timestamp = Some(Instant::now());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
        self.error_timestamp = None;
    }

    pub fn has_error(&self) -> bool {
        self.error_message.is_some()
    }

    pub fn auto_clear_old_errors(&mut self) {
        self.clear_errors_older_than(ERROR_DISPLAY_TIME);
    }

    fn clear_errors_older_than(&mut self, max_age: Duration) {
        if let Some(timestamp) = self.error_timestamp {
            if timestamp.elapsed() > max_age {
                self.clear_error();
            }
        }
    }

    pub fn queue_move_up(&mut self) {
        self.queue_selected = self.queue_selected.saturating_sub(1);
    }

    pub fn queue_move_down(&mut self, queue_len: usize) {
        if self.queue_selected + 1 < queue_len {
            self.queue_selected += 1;
        }
    }

    /// Open the picker with the highlight on `current_id` when it is listed
    pub fn show_playlist_picker(&mut self, playlists: Vec<PlaylistItem>, current_id: Option<&str>) {
        self.playlist_selected = current_id
            .and_then(|id| playlists.iter().position(|p| p.id == id))
            .unwrap_or(0);
        self.playlists = playlists;
        self.show_playlist_picker = true;
    }

    pub fn hide_playlist_picker(&mut self) {
        self.show_playlist_picker = false;
    }

    pub fn playlist_picker_move_up(&mut self) {
        self.playlist_selected = self.playlist_selected.saturating_sub(1);
    }

    pub fn playlist_picker_move_down(&mut self) {
        if self.playlist_selected + 1 < self.playlists.len() {
            self.playlist_selected += 1;
        }
    }

    pub fn selected_playlist(&self) -> Option<&PlaylistItem> {
        self.playlists.get(self.playlist_selected)
    }

    /// Put the highlight on the track that is now current
    pub fn follow_current(&mut self, current_index: usize) {
        self.queue_selected = current_index;
    }
}
