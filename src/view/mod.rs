//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Now-playing header
//! - `queue`: Queue list
//! - `lyrics`: Lyrics pane
//! - `progress`: Progress bar rendering
//! - `overlays`: Modal overlays (error, playlist picker, help)

mod utils;
mod layout;
mod queue;
mod lyrics;
mod progress;
mod overlays;

use std::collections::HashSet;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{PlaybackInfo, PlaybackState, UiState};

pub struct AppView;

impl AppView {
    pub fn render(
        frame: &mut Frame,
        playback: &PlaybackInfo,
        state: Option<&PlaybackState>,
        ui_state: &UiState,
        playlist_id: Option<&str>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Track header
                Constraint::Min(0),    // Queue + lyrics
                Constraint::Length(3), // Progress bar with playback info
            ])
            .split(frame.area());

        layout::render_track_header(frame, chunks[0], playback);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(60), // Queue
                Constraint::Percentage(40), // Lyrics
            ])
            .split(chunks[1]);

        let empty = HashSet::new();
        let (tracks, favorite_ids, current_index) = match state {
            Some(state) => (
                state.queue.iter().as_slice(),
                &state.favorite_ids,
                Some(state.current_index),
            ),
            None => (&[][..], &empty, None),
        };
        queue::render_queue(frame, main_chunks[0], tracks, favorite_ids, current_index, ui_state.queue_selected);

        lyrics::render_lyrics(frame, main_chunks[1], &playback.lyrics);

        progress::render_progress_bar(frame, chunks[2], playback);

        if ui_state.show_playlist_picker {
            overlays::render_playlist_picker(frame, ui_state, playlist_id);
        }

        // Error notification overlay (if there's an error)
        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }

        // Help popup overlay (if open)
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
