//! Playback control methods

use super::PlayerController;

/// Step used by the left/right seek keys, as a fraction of the track
pub(crate) const SEEK_STEP: f64 = 0.1;

impl PlayerController {
    pub async fn toggle_playback(&mut self) {
        match self.session.toggle_playback().await {
            Ok(playing) => tracing::debug!(playing, "Toggle handled"),
            Err(e) => self.report("Toggle playback", e),
        }
    }

    pub async fn next_track(&mut self) {
        match self.session.next().await {
            Ok(_) => self.after_track_change(),
            Err(e) => self.report("Next track", e),
        }
    }

    pub async fn previous_track(&mut self) {
        match self.session.previous().await {
            Ok(_) => self.after_track_change(),
            Err(e) => self.report("Previous track", e),
        }
    }

    /// Play the row highlighted in the queue list
    pub async fn play_selected(&mut self) {
        let index = self.ui.queue_selected;
        match self.session.select_track(index).await {
            Ok(()) => self.after_track_change(),
            Err(e) => self.report("Select track", e),
        }
    }

    pub async fn seek_to(&mut self, fraction: f64) {
        if let Err(e) = self.session.seek(fraction).await {
            self.report("Seek", e);
        }
    }

    /// Seek by `delta` (a signed fraction of the track) from the current position
    pub async fn seek_relative(&mut self, delta: f64) {
        let ratio = self.session.playback_info().progress_ratio();
        self.seek_to(ratio + delta).await;
    }

    pub fn toggle_shuffle(&mut self) {
        let enabled = !self.session.state().is_some_and(|s| s.shuffle);
        if let Err(e) = self.session.set_shuffle(enabled) {
            self.report("Toggle shuffle", e);
        }
    }

    pub fn cycle_repeat(&mut self) {
        if let Err(e) = self.session.cycle_repeat() {
            self.report("Cycle repeat", e);
        }
    }

    pub async fn toggle_favorite(&mut self) {
        let Some(track_id) = self.session.current_track().map(|t| t.id.clone()) else {
            return;
        };
        let store = self.favorites.clone();
        if let Err(e) = self.session.toggle_favorite(store.as_ref(), &track_id).await {
            self.report("Toggle favorite", e);
        }
    }
}
