//! Key event handling

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::PlayerController;
use super::playback::SEEK_STEP;

impl PlayerController {
    pub async fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Handle error message first (blocks all other interactions)
        if self.ui.has_error() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.ui.clear_error();
            }
            return;
        }

        // Handle help popup
        if self.ui.show_help_popup {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                self.ui.show_help_popup = false;
            }
            return;
        }

        // Playlist picker modal
        if self.ui.show_playlist_picker {
            match key.code {
                KeyCode::Up => self.ui.playlist_picker_move_up(),
                KeyCode::Down => self.ui.playlist_picker_move_down(),
                KeyCode::Enter => self.load_selected_playlist().await,
                KeyCode::Esc | KeyCode::Char('l') | KeyCode::Char('L') => self.ui.hide_playlist_picker(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.set_should_quit(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.set_should_quit(),
            // Play/Pause toggle
            KeyCode::Char(' ') => self.toggle_playback().await,
            KeyCode::Char('n') | KeyCode::Char('N') => self.next_track().await,
            KeyCode::Char('p') | KeyCode::Char('P') => self.previous_track().await,
            KeyCode::Left => self.seek_relative(-SEEK_STEP).await,
            KeyCode::Right => self.seek_relative(SEEK_STEP).await,
            // 0-9 jump to that tenth of the track
            KeyCode::Char(c @ '0'..='9') => {
                let tenths = c.to_digit(10).unwrap_or(0);
                self.seek_to(f64::from(tenths) / 10.0).await;
            }
            KeyCode::Char('s') | KeyCode::Char('S') => self.toggle_shuffle(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.cycle_repeat(),
            KeyCode::Char('f') | KeyCode::Char('F') => self.toggle_favorite().await,
            KeyCode::Up => self.ui.queue_move_up(),
            KeyCode::Down => {
                let len = self.session.queue().map_or(0, |q| q.len());
                self.ui.queue_move_down(len);
            }
            KeyCode::Enter => self.play_selected().await,
            KeyCode::Char('l') | KeyCode::Char('L') => self.open_playlist_picker().await,
            KeyCode::Char('u') | KeyCode::Char('U') => self.reload_playlist().await,
            KeyCode::Char('h') | KeyCode::Char('H') => self.ui.show_help_popup = true,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::Result;
    use async_trait::async_trait;
    use crossterm::event::{KeyEvent, KeyEventKind, KeyEventState};

    use super::*;
    use crate::error::{SessionError, SessionResult};
    use crate::model::{
        MemoryFavoritesStore, PlaybackSession, PlaylistItem, Queue, RemoteTransport, SessionOptions,
        SessionStatus, Track, TrackSource,
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

    struct FailingTransport;

    #[async_trait]
    impl RemoteTransport for FailingTransport {
        async fn set_playback(&self, _uri: &str, _playing: bool) -> Result<()> {
            Err(anyhow::anyhow!("http status: 429"))
        }

        async fn start(&self, _uri: &str, _position_ms: u32) -> Result<()> {
            Err(anyhow::anyhow!("http status: 429"))
        }

        async fn seek(&self, _position_ms: u32) -> Result<()> {
            Err(anyhow::anyhow!("http status: 429"))
        }
    }

    /// Two-playlist library whose track fetches fail `failures` times before answering
    struct FlakyLibrary {
        failures_left: AtomicUsize,
    }

    impl FlakyLibrary {
        fn new(failures: usize) -> Self {
            Self {
                failures_left: AtomicUsize::new(failures),
            }
        }
    }

    #[async_trait]
    impl TrackSource for FlakyLibrary {
        async fn fetch_queue(&self, playlist_id: &str) -> SessionResult<Queue> {
            if self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(SessionError::Transport(anyhow::anyhow!("connection reset")));
            }
            match playlist_id {
                "mix" => Ok(Queue::new(vec![track("a"), track("b"), track("c")])),
                "chill" => Ok(Queue::new(vec![track("x"), track("y")])),
                other => Err(SessionError::NotFound(format!("playlist {other}"))),
            }
        }

        async fn list_playlists(&self) -> SessionResult<Vec<PlaylistItem>> {
            Ok(vec![
                PlaylistItem {
                    id: "mix".to_string(),
                    name: "Daily Mix".to_string(),
                },
                PlaylistItem {
                    id: "chill".to_string(),
                    name: "Chill".to_string(),
                },
            ])
        }
    }

    fn track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            title: format!("Song {id}"),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            duration_ms: 100_000,
            artwork_url: None,
            uri: format!("spotify:track:{id}"),
        }
    }

    fn idle_controller(transport: Arc<dyn RemoteTransport>, library: FlakyLibrary) -> PlayerController {
        let (session, _ticks) = PlaybackSession::new(transport, SessionOptions::default());
        let (controller, _lyrics) = PlayerController::new(
            session,
            Arc::new(library),
            Arc::new(MemoryFavoritesStore::new()),
            None,
        );
        controller
    }

    fn controller(transport: Arc<dyn RemoteTransport>) -> PlayerController {
        let mut controller = idle_controller(transport, FlakyLibrary::new(0));
        controller
            .session
            .load(Queue::new(vec![track("a"), track("b"), track("c")]))
            .unwrap();
        controller
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[tokio::test]
    async fn keys_drive_the_session() {
        let mut c = controller(Arc::new(NullTransport));

        c.handle_key_event(press(KeyCode::Char(' '))).await;
        assert_eq!(c.session().status(), SessionStatus::Playing);

        c.handle_key_event(press(KeyCode::Char('n'))).await;
        assert_eq!(c.playback_info().current_index, 1);
        assert_eq!(c.ui_state().queue_selected, 1);

        c.handle_key_event(press(KeyCode::Char('5'))).await;
        assert_eq!(c.playback_info().progress_ms, 50_000);

        c.handle_key_event(press(KeyCode::Right)).await;
        assert!((59_999..=60_000).contains(&c.playback_info().progress_ms));

        c.handle_key_event(press(KeyCode::Char('f'))).await;
        assert!(c.playback_info().is_favorite);

        c.handle_key_event(press(KeyCode::Char('q'))).await;
        assert!(c.should_quit());
        c.shutdown();
    }

    #[tokio::test]
    async fn queue_selection_plays_the_highlighted_row() {
        let mut c = controller(Arc::new(NullTransport));
        c.handle_key_event(press(KeyCode::Down)).await;
        c.handle_key_event(press(KeyCode::Down)).await;
        c.handle_key_event(press(KeyCode::Down)).await;
        c.handle_key_event(press(KeyCode::Enter)).await;
        assert_eq!(c.playback_info().current_index, 2);
    }

    #[tokio::test]
    async fn errors_block_input_until_dismissed() {
        let mut c = controller(Arc::new(FailingTransport));

        c.handle_key_event(press(KeyCode::Char(' '))).await;
        assert_eq!(c.session().status(), SessionStatus::Paused);
        assert_eq!(
            c.ui_state().error_message.as_deref(),
            Some("Rate limited. Please wait a moment.")
        );

        c.handle_key_event(press(KeyCode::Char('q'))).await;
        assert!(!c.should_quit());

        c.handle_key_event(press(KeyCode::Esc)).await;
        assert!(!c.ui_state().has_error());
    }

    #[tokio::test]
    async fn reload_key_retries_a_failed_startup_load() {
        let mut c = idle_controller(Arc::new(NullTransport), FlakyLibrary::new(1));
        c.load_playlist("mix").await;
        assert_eq!(c.session().status(), SessionStatus::Idle);
        assert!(c.ui_state().has_error());

        c.handle_key_event(press(KeyCode::Esc)).await;
        c.handle_key_event(press(KeyCode::Char('u'))).await;
        assert_eq!(c.session().status(), SessionStatus::Paused);
        assert_eq!(c.playback_info().queue_len, 3);
        assert!(!c.ui_state().has_error());
    }

    #[tokio::test]
    async fn reload_without_a_playlist_opens_the_picker() {
        let mut c = idle_controller(Arc::new(NullTransport), FlakyLibrary::new(0));
        c.handle_key_event(press(KeyCode::Char('u'))).await;
        assert!(c.ui_state().show_playlist_picker);
        assert_eq!(c.ui_state().playlists.len(), 2);
    }

    #[tokio::test]
    async fn picker_loads_the_highlighted_playlist() {
        let mut c = controller(Arc::new(NullTransport));
        c.handle_key_event(press(KeyCode::Char(' '))).await;
        assert_eq!(c.session().status(), SessionStatus::Playing);

        c.handle_key_event(press(KeyCode::Char('l'))).await;
        assert!(c.ui_state().show_playlist_picker);

        // picker owns the arrows and Enter while open
        c.handle_key_event(press(KeyCode::Down)).await;
        assert_eq!(c.ui_state().queue_selected, 0);
        c.handle_key_event(press(KeyCode::Enter)).await;

        assert!(!c.ui_state().show_playlist_picker);
        assert_eq!(c.playlist_id(), Some("chill"));
        assert_eq!(c.session().status(), SessionStatus::Paused);
        assert_eq!(c.playback_info().track.unwrap().id, "x");
        assert_eq!(c.playback_info().queue_len, 2);
    }

    #[tokio::test]
    async fn escape_closes_the_picker_without_loading() {
        let mut c = controller(Arc::new(NullTransport));
        c.handle_key_event(press(KeyCode::Char('l'))).await;
        c.handle_key_event(press(KeyCode::Esc)).await;
        assert!(!c.ui_state().show_playlist_picker);
        assert_eq!(c.playlist_id(), None);
        assert_eq!(c.playback_info().queue_len, 3);
    }

    #[tokio::test]
    async fn key_release_is_ignored() {
        let mut c = controller(Arc::new(NullTransport));
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        c.handle_key_event(key).await;
        assert!(!c.should_quit());
    }
}
