//! Controller module - Application logic and event handling
//!
//! The controller owns the playback session and the UI state. It is driven by a single
//! event loop and applies one input at a time: key events, clock ticks and lyrics
//! responses. It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `library`: Playlist loading, reloading and the playlist picker
//! - `playback`: Session transitions with user-facing error reporting

mod input;
mod library;
mod playback;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::{SessionError, SessionResult};
use crate::model::{
    ClockTick, FavoritesStore, LyricsSource, PlaybackInfo, PlaybackSession, TickOutcome,
    TrackSource, TrackTicket, UiState,
};

/// A finished lyrics fetch, tagged with the track it was requested for
#[derive(Debug)]
pub struct LyricsResponse {
    pub ticket: TrackTicket,
    pub result: SessionResult<String>,
}

pub type LyricsResponses = mpsc::UnboundedReceiver<LyricsResponse>;

pub struct PlayerController {
    pub(crate) session: PlaybackSession,
    track_source: Arc<dyn TrackSource>,
    /// Last playlist requested, loaded or not
    playlist_id: Option<String>,
    pub(crate) favorites: Arc<dyn FavoritesStore>,
    lyrics_source: Option<Arc<dyn LyricsSource>>,
    lyrics_tx: mpsc::UnboundedSender<LyricsResponse>,
    pub(crate) ui: UiState,
    should_quit: bool,
}

impl PlayerController {
    /// Wrap a session. The returned receiver yields lyrics responses, which the event loop
    /// feeds back through [`Self::on_lyrics`].
    pub fn new(
        session: PlaybackSession,
        track_source: Arc<dyn TrackSource>,
        favorites: Arc<dyn FavoritesStore>,
        lyrics_source: Option<Arc<dyn LyricsSource>>,
    ) -> (Self, LyricsResponses) {
        let (lyrics_tx, lyrics_rx) = mpsc::unbounded_channel();
        let controller = Self {
            session,
            track_source,
            playlist_id: None,
            favorites,
            lyrics_source,
            lyrics_tx,
            ui: UiState::default(),
            should_quit: false,
        };
        (controller, lyrics_rx)
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn ui_state(&self) -> &UiState {
        &self.ui
    }

    pub fn playback_info(&self) -> PlaybackInfo {
        self.session.playback_info()
    }

    pub fn playlist_id(&self) -> Option<&str> {
        self.playlist_id.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub(crate) fn set_should_quit(&mut self) {
        self.should_quit = true;
    }

    /// Housekeeping between redraws
    pub fn on_redraw(&mut self) {
        self.ui.auto_clear_old_errors();
    }

    pub async fn on_clock_tick(&mut self, tick: ClockTick) {
        match self.session.on_clock_tick(tick).await {
            Ok(TickOutcome::Advanced(_)) | Ok(TickOutcome::QueueEnded) => self.after_track_change(),
            Ok(_) => {}
            Err(e) => self.report("Automatic advance", e),
        }
    }

    /// Start a background lyrics fetch for the current track, if a source is configured
    pub fn request_lyrics(&mut self) {
        let Some(source) = self.lyrics_source.clone() else {
            return;
        };
        let Some((ticket, track)) = self.session.begin_lyrics() else {
            return;
        };

        tracing::debug!(?ticket, track = %track.title, "Requesting lyrics");
        let tx = self.lyrics_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_lyrics(&track).await;
            // receiver is gone once the app is shutting down
            let _ = tx.send(LyricsResponse { ticket, result });
        });
    }

    pub fn on_lyrics(&mut self, response: LyricsResponse) {
        if let Err(e) = &response.result {
            tracing::debug!(error = %e, "Lyrics lookup failed");
        }
        self.session.apply_lyrics(response.ticket, response.result);
    }

    pub fn shutdown(&mut self) {
        self.session.shutdown();
    }

    pub(crate) fn after_track_change(&mut self) {
        if let Some(state) = self.session.state() {
            self.ui.follow_current(state.current_index);
        }
        self.request_lyrics();
    }

    /// Log a failed transition and surface it in the error overlay
    pub(crate) fn report(&mut self, operation: &str, error: SessionError) {
        tracing::error!(operation, kind = error.kind(), error = %error, "Operation failed");
        self.ui.set_error(Self::format_error(&error));
    }

    pub(crate) fn format_error(error: &SessionError) -> String {
        match error {
            SessionError::Transport(e) => Self::format_transport_error(e),
            SessionError::NotFound(what) => format!("Not found: {}", what),
            SessionError::NotLoaded | SessionError::EmptyQueue => {
                "Nothing to play. Press L to pick a playlist with tracks.".to_string()
            }
            SessionError::IndexOutOfRange { .. } => "That track is not in the queue.".to_string(),
            SessionError::Favorites(e) => format!("Could not save favorites: {}", e),
        }
    }

    fn format_transport_error(error: &anyhow::Error) -> String {
        let error_str = error.to_string();

        // Handle common Spotify API errors
        if error_str.contains("404") {
            "No active device found. Start playing on Spotify and try again.".to_string()
        } else if error_str.contains("403") {
            "Action forbidden. Check your Spotify Premium status.".to_string()
        } else if error_str.contains("401") {
            "Authentication expired. Please restart the app.".to_string()
        } else if error_str.contains("429") {
            "Rate limited. Please wait a moment.".to_string()
        } else {
            format!("Error: {}", error_str)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use anyhow::Result;
    use async_trait::async_trait;

    use crate::model::{
        LyricsState, MemoryFavoritesStore, PlaylistItem, Queue, RemoteTransport, SessionOptions, Track,
    };

    struct NullTransport;

    #[async_trait]
    impl RemoteTransport for NullTransport {
        async fn set_playback(&self, _uri: &str, _playing: bool) -> Result<()> {
            Ok(())
        }

        async fn start(&self, _uri: &str, _position_ms: u32) -> Result<()> {
            Ok(())
        }

        async fn seek(&self, _position_ms: u32) -> Result<()> {
            Ok(())
        }
    }

    struct EmptyLibrary;

    #[async_trait]
    impl TrackSource for EmptyLibrary {
        async fn fetch_queue(&self, playlist_id: &str) -> SessionResult<Queue> {
            Err(SessionError::NotFound(format!("playlist {playlist_id}")))
        }

        async fn list_playlists(&self) -> SessionResult<Vec<PlaylistItem>> {
            Ok(Vec::new())
        }
    }

    struct EchoLyrics;

    #[async_trait]
    impl LyricsSource for EchoLyrics {
        async fn fetch_lyrics(&self, track: &Track) -> SessionResult<String> {
            Ok(format!("words for {}", track.id))
        }
    }

    fn track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            title: id.to_string(),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            duration_ms: 30_000,
            artwork_url: None,
            uri: format!("spotify:track:{id}"),
        }
    }

    fn controller_with_lyrics() -> (PlayerController, LyricsResponses) {
        let (mut session, _ticks) = PlaybackSession::new(Arc::new(NullTransport), SessionOptions::default());
        session.load(Queue::new(vec![track("a"), track("b")])).unwrap();
        PlayerController::new(
            session,
            Arc::new(EmptyLibrary),
            Arc::new(MemoryFavoritesStore::new()),
            Some(Arc::new(EchoLyrics)),
        )
    }

    #[tokio::test]
    async fn lyrics_arrive_for_the_current_track() {
        let (mut controller, mut responses) = controller_with_lyrics();
        controller.request_lyrics();
        assert_eq!(controller.playback_info().lyrics, LyricsState::Loading);

        let response = responses.recv().await.unwrap();
        controller.on_lyrics(response);
        assert_eq!(controller.playback_info().lyrics, LyricsState::Loaded("words for a".to_string()));
    }

    #[tokio::test]
    async fn lyrics_for_a_skipped_track_are_ignored() {
        let (mut controller, mut responses) = controller_with_lyrics();
        controller.request_lyrics();
        controller.next_track().await;

        let first = responses.recv().await.unwrap();
        let second = responses.recv().await.unwrap();
        let (stale, fresh) = if first.ticket.index == 0 { (first, second) } else { (second, first) };

        controller.on_lyrics(stale);
        assert_eq!(controller.playback_info().lyrics, LyricsState::Loading);
        controller.on_lyrics(fresh);
        assert_eq!(controller.playback_info().lyrics, LyricsState::Loaded("words for b".to_string()));
    }

    #[test]
    fn transport_errors_get_friendly_messages() {
        let msg = PlayerController::format_error(&SessionError::Transport(anyhow::anyhow!("http status: 404")));
        assert!(msg.starts_with("No active device"));

        let msg = PlayerController::format_error(&SessionError::Transport(anyhow::anyhow!("status 429")));
        assert_eq!(msg, "Rate limited. Please wait a moment.");

        let msg = PlayerController::format_error(&SessionError::Transport(anyhow::anyhow!("connection reset")));
        assert_eq!(msg, "Error: connection reset");
    }

    #[test]
    fn contract_errors_are_explained() {
        let msg = PlayerController::format_error(&SessionError::IndexOutOfRange { index: 9, len: 3 });
        assert_eq!(msg, "That track is not in the queue.");
        assert!(PlayerController::format_error(&SessionError::NotLoaded).contains("pick a playlist"));
    }

    #[tokio::test]
    async fn empty_library_is_reported_instead_of_an_empty_picker() {
        let (mut controller, _responses) = controller_with_lyrics();
        controller.open_playlist_picker().await;
        assert!(!controller.ui_state().show_playlist_picker);
        assert_eq!(
            controller.ui_state().error_message.as_deref(),
            Some("No playlists in your library.")
        );
    }

    #[tokio::test]
    async fn missing_playlist_keeps_the_loaded_queue() {
        let (mut controller, _responses) = controller_with_lyrics();
        controller.load_playlist("gone").await;
        assert_eq!(controller.playlist_id(), Some("gone"));
        assert_eq!(controller.playback_info().queue_len, 2);
        assert_eq!(controller.ui_state().error_message.as_deref(), Some("Not found: playlist gone"));
    }
}
