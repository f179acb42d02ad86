//! Playlist loading and the library picker

use crate::model::SessionStatus;

use super::PlayerController;

impl PlayerController {
    /// Fetch `playlist_id` and make it the queue.
    ///
    /// The id is remembered even if the fetch fails, so [`Self::reload_playlist`] retries it.
    pub async fn load_playlist(&mut self, playlist_id: &str) {
        self.playlist_id = Some(playlist_id.to_string());

        // the remote would keep playing the old queue under a paused session
        if self.session.status() == SessionStatus::Playing {
            if let Err(e) = self.session.toggle_playback().await {
                self.report("Pause before loading", e);
                return;
            }
        }

        let source = self.track_source.clone();
        match self.session.load_playlist(source.as_ref(), playlist_id).await {
            Ok(()) => {
                if let Err(e) = self.session.refresh_favorites(self.favorites.as_ref()).await {
                    tracing::warn!(error = %e, "Could not read favorites");
                }
                self.after_track_change();
            }
            Err(e) => self.report("Load playlist", e),
        }
    }

    /// Fetch the last requested playlist again, or open the picker if there is none
    pub async fn reload_playlist(&mut self) {
        match self.playlist_id.clone() {
            Some(playlist_id) => {
                tracing::info!(playlist_id = %playlist_id, "Reloading playlist");
                self.load_playlist(&playlist_id).await;
            }
            None => self.open_playlist_picker().await,
        }
    }

    pub async fn open_playlist_picker(&mut self) {
        match self.track_source.list_playlists().await {
            Ok(playlists) if playlists.is_empty() => {
                self.ui.set_error("No playlists in your library.".to_string());
            }
            Ok(playlists) => {
                tracing::debug!(count = playlists.len(), "Opening playlist picker");
                self.ui.show_playlist_picker(playlists, self.playlist_id.as_deref());
            }
            Err(e) => self.report("List playlists", e),
        }
    }

    /// Load the playlist highlighted in the picker and close it
    pub async fn load_selected_playlist(&mut self) {
        let Some(playlist) = self.ui.selected_playlist().cloned() else {
            return;
        };
        self.ui.hide_playlist_picker();
        tracing::info!(playlist_id = %playlist.id, name = %playlist.name, "Playlist picked");
        self.load_playlist(&playlist.id).await;
    }
}
