//! Playback session state machine
//!
//! `PlaybackSession` is the single authority for which track is current, whether it is
//! nominally playing, and how far playback has progressed. It is owned by one event loop
//! and mutated only through the transitions below; every remote call is awaited inline,
//! so there is never more than one transition in flight.
//!
//! States: `Idle` until a queue is loaded, then `Paused` or `Playing`. The progress clock
//! runs exactly while the session is `Playing`.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::{SessionError, SessionResult};
use crate::{log_api_request, log_api_result};
use super::clock::{ClockTick, ClockTicks, ProgressClock};
use super::collaborators::{FavoritesStore, RemoteTransport, TrackSource};
use super::favorites;
use super::order::{self, Step, TrackEnd};
use super::playback::{LyricsState, PlaybackInfo, PlaybackState};
use super::types::{Queue, RepeatMode, SessionStatus, Track, TrackTicket};

#[derive(Clone, Debug, Default)]
pub struct SessionOptions {
    /// With repeat off, stop after the last track instead of wrapping to the first
    pub stop_at_queue_end: bool,
    /// Fixed seed for the shuffle RNG
    pub shuffle_seed: Option<u64>,
}

/// Result of one clock quantum
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session idle or paused; nothing moved
    Ignored,
    /// Tick came from a clock run that has since been stopped or restarted
    Stale,
    /// Progress advanced within the current track
    Progressed(u32),
    /// Track ended under repeat-one and restarted
    Looped,
    /// Track ended and the session moved to this index
    Advanced(usize),
    /// Track ended on the last entry with stop-at-end enabled
    QueueEnded,
}

pub struct PlaybackSession {
    transport: Arc<dyn RemoteTransport>,
    state: Option<PlaybackState>,
    clock: ProgressClock,
    generation: u64,
    /// Generation the remote was last started for. Playing resumes only while it matches.
    started_generation: Option<u64>,
    lyrics: LyricsState,
    options: SessionOptions,
    rng: StdRng,
}

impl PlaybackSession {
    /// Create an idle session. The returned receiver yields the clock's ticks and must be
    /// drained by the loop that owns the session, feeding each into [`Self::on_clock_tick`].
    pub fn new(transport: Arc<dyn RemoteTransport>, options: SessionOptions) -> (Self, ClockTicks) {
        let (clock, ticks) = ProgressClock::new();
        (Self::with_clock(transport, options, clock), ticks)
    }

    pub fn with_clock(transport: Arc<dyn RemoteTransport>, options: SessionOptions, clock: ProgressClock) -> Self {
        let rng = match options.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            transport,
            state: None,
            clock,
            generation: 0,
            started_generation: None,
            lyrics: LyricsState::Unavailable,
            options,
            rng,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn status(&self) -> SessionStatus {
        match &self.state {
            None => SessionStatus::Idle,
            Some(state) if state.is_playing => SessionStatus::Playing,
            Some(_) => SessionStatus::Paused,
        }
    }

    pub fn state(&self) -> Option<&PlaybackState> {
        self.state.as_ref()
    }

    pub fn queue(&self) -> Option<&Queue> {
        self.state.as_ref().map(|s| &s.queue)
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.state.as_ref().map(|s| s.current_track())
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn lyrics(&self) -> &LyricsState {
        &self.lyrics
    }

    /// Identity of the current track for guarding async responses
    pub fn ticket(&self) -> Option<TrackTicket> {
        self.state.as_ref().map(|s| TrackTicket {
            generation: self.generation,
            index: s.current_index,
        })
    }

    pub fn is_current(&self, ticket: TrackTicket) -> bool {
        self.ticket() == Some(ticket)
    }

    pub fn playback_info(&self) -> PlaybackInfo {
        let Some(state) = &self.state else {
            return PlaybackInfo::default();
        };
        PlaybackInfo {
            track: Some(state.current_track().clone()),
            current_index: state.current_index,
            queue_len: state.queue.len(),
            progress_ms: state.progress_ms,
            duration_ms: state.duration_ms(),
            status: self.status(),
            shuffle: state.shuffle,
            repeat: state.repeat,
            is_favorite: state.is_current_favorite(),
            lyrics: self.lyrics.clone(),
        }
    }

    fn state_ref(&self) -> SessionResult<&PlaybackState> {
        self.state.as_ref().ok_or(SessionError::NotLoaded)
    }

    fn state_mut(&mut self) -> SessionResult<&mut PlaybackState> {
        self.state.as_mut().ok_or(SessionError::NotLoaded)
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Start over on the first track of `queue`, paused at zero.
    ///
    /// Shuffle and repeat carry over from a previous load.
    pub fn load(&mut self, queue: Queue) -> SessionResult<()> {
        if queue.is_empty() {
            tracing::warn!("Refusing to load an empty queue");
            return Err(SessionError::EmptyQueue);
        }

        self.clock.stop();
        let (shuffle, repeat) = self
            .state
            .as_ref()
            .map(|s| (s.shuffle, s.repeat))
            .unwrap_or_default();

        tracing::info!(tracks = queue.len(), shuffle, ?repeat, "Queue loaded");
        self.state = Some(PlaybackState::new(queue, shuffle, repeat));
        self.track_changed();
        Ok(())
    }

    /// Fetch a playlist and load it. On failure the session keeps its previous state.
    pub async fn load_playlist(&mut self, source: &dyn TrackSource, playlist_id: &str) -> SessionResult<()> {
        tracing::debug!(playlist_id, "Fetching playlist queue");
        let queue = source.fetch_queue(playlist_id).await.inspect_err(|e| {
            tracing::error!(playlist_id, error = %e, "Failed to fetch playlist queue");
        })?;
        self.load(queue)
    }

    // ========================================================================
    // Transport transitions
    // ========================================================================

    /// Play if paused, pause if playing. Returns the new playing flag.
    ///
    /// The flag only flips once the transport has accepted the command. Playing resumes
    /// the remote only if it was started for the current track; after a load or a paused
    /// track change the track is started at the local position instead.
    pub async fn toggle_playback(&mut self) -> SessionResult<bool> {
        let state = self.state_ref()?;
        let target = !state.is_playing;
        let uri = state.current_track().uri.as_str();
        let restart = target && self.started_generation != Some(self.generation);

        if restart {
            let position_ms = state.progress_ms;
            log_api_request!("start", uri = %uri, position_ms);
            let result = self.transport.start(uri, position_ms).await;
            log_api_result!("start", result);
            result?;
            self.started_generation = Some(self.generation);
        } else {
            log_api_request!("set_playback", uri = %uri, playing = target);
            let result = self.transport.set_playback(uri, target).await;
            log_api_result!("set_playback", result);
            result?;
        }

        self.state_mut()?.is_playing = target;
        if target {
            self.clock.start();
        } else {
            self.clock.stop();
        }
        tracing::info!(action = if target { "resumed" } else { "paused" }, "Playback toggled");
        Ok(target)
    }

    pub async fn next(&mut self) -> SessionResult<usize> {
        self.step(Step::Forward).await
    }

    pub async fn previous(&mut self) -> SessionResult<usize> {
        self.step(Step::Backward).await
    }

    async fn step(&mut self, step: Step) -> SessionResult<usize> {
        let state = self.state.as_ref().ok_or(SessionError::NotLoaded)?;
        let target = order::step_index(state.current_index, state.queue.len(), step, state.shuffle, &mut self.rng);
        tracing::debug!(?step, from = state.current_index, to = target, "Stepping through queue");
        self.change_track(target).await?;
        Ok(target)
    }

    /// Jump straight to a queue position (queue view selection)
    pub async fn select_track(&mut self, index: usize) -> SessionResult<()> {
        let len = self.state_ref()?.queue.len();
        if index >= len {
            return Err(SessionError::IndexOutOfRange { index, len });
        }
        self.change_track(index).await
    }

    /// Move to `index`, keeping the playing/paused sub-state.
    ///
    /// While playing, the new URI is started on the transport first; nothing changes
    /// locally if that fails.
    async fn change_track(&mut self, index: usize) -> SessionResult<()> {
        let state = self.state_ref()?;
        let playing = state.is_playing;

        if playing {
            let uri = state.queue[index].uri.as_str();
            log_api_request!("start", uri = %uri, position_ms = 0u32, index);
            let result = self.transport.start(uri, 0).await;
            log_api_result!("start", result);
            result?;
        }

        self.state_mut()?.jump_to(index);
        self.track_changed();
        if playing {
            self.started_generation = Some(self.generation);
            // fresh epoch so ticks queued for the previous track are dropped
            self.clock.start();
        }

        if let Some(track) = self.current_track() {
            tracing::info!(index, track = %track.title, artist = %track.artist, playing, "Track changed");
        }
        Ok(())
    }

    /// Seek to `fraction` of the current track. Returns the position sent to the transport.
    pub async fn seek(&mut self, fraction: f64) -> SessionResult<u32> {
        let state = self.state_ref()?;
        let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
        let position_ms = (fraction * state.duration_ms() as f64).floor() as u32;

        log_api_request!("seek", position_ms);
        let result = self.transport.seek(position_ms).await;
        log_api_result!("seek", result);
        result?;

        self.state_mut()?.progress_ms = position_ms;
        Ok(position_ms)
    }

    // ========================================================================
    // Local policy
    // ========================================================================

    pub fn set_shuffle(&mut self, enabled: bool) -> SessionResult<()> {
        self.state_mut()?.shuffle = enabled;
        tracing::debug!(enabled, "Shuffle set");
        Ok(())
    }

    pub fn cycle_repeat(&mut self) -> SessionResult<RepeatMode> {
        let state = self.state_mut()?;
        state.repeat = state.repeat.cycle();
        tracing::debug!(repeat = ?state.repeat, "Repeat cycled");
        Ok(state.repeat)
    }

    // ========================================================================
    // Progress clock
    // ========================================================================

    /// Entry point for ticks read from the clock channel
    pub async fn on_clock_tick(&mut self, tick: ClockTick) -> SessionResult<TickOutcome> {
        if !self.clock.accepts(tick) {
            tracing::trace!(tick_epoch = tick.epoch, clock_epoch = self.clock.epoch(), "Discarding stale tick");
            return Ok(TickOutcome::Stale);
        }
        self.tick().await
    }

    /// Advance progress by one quantum and resolve the end of the track.
    ///
    /// Repeat-one starts the same track again on the transport. If that restart or the
    /// automatic advance cannot reach the transport, the session pauses locally with
    /// progress clamped at the duration rather than retrying on the next tick.
    pub async fn tick(&mut self) -> SessionResult<TickOutcome> {
        let Some(state) = self.state.as_mut() else {
            return Ok(TickOutcome::Ignored);
        };
        if !state.is_playing {
            return Ok(TickOutcome::Ignored);
        }
        if !state.advance_progress() {
            return Ok(TickOutcome::Progressed(state.progress_ms));
        }

        let end = order::on_track_end(
            state.current_index,
            state.queue.len(),
            state.repeat,
            state.shuffle,
            self.options.stop_at_queue_end,
            &mut self.rng,
        );
        tracing::debug!(index = state.current_index, ?end, "Reached end of track");

        match end {
            TrackEnd::Loop => {
                let uri = state.current_track().uri.clone();
                log_api_request!("start", uri = %uri, position_ms = 0u32);
                let result = self.transport.start(&uri, 0).await;
                log_api_result!("start", result);
                match result {
                    Ok(()) => {
                        if let Some(state) = self.state.as_mut() {
                            state.progress_ms = 0;
                        }
                        Ok(TickOutcome::Looped)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Repeat restart failed, pausing locally");
                        self.pause_locally();
                        Err(e.into())
                    }
                }
            }
            TrackEnd::Stop => {
                state.jump_to(0);
                state.is_playing = false;
                self.clock.stop();
                self.track_changed();
                tracing::info!("Reached end of queue, playback stopped");
                Ok(TickOutcome::QueueEnded)
            }
            TrackEnd::Advance(index) => match self.change_track(index).await {
                Ok(()) => Ok(TickOutcome::Advanced(index)),
                Err(e) => {
                    tracing::warn!(error = %e, "Automatic advance failed, pausing locally");
                    self.pause_locally();
                    Err(e)
                }
            },
        }
    }

    // ========================================================================
    // Favorites & lyrics
    // ========================================================================

    /// Reload the favorite set from the store
    pub async fn refresh_favorites(&mut self, store: &dyn FavoritesStore) -> SessionResult<()> {
        let ids = store.get().await.map_err(SessionError::Favorites)?;
        self.state_mut()?.favorite_ids = ids;
        Ok(())
    }

    /// Flip `track_id` in the store and mirror the result locally.
    /// Returns whether the track is a favorite afterwards.
    pub async fn toggle_favorite(&mut self, store: &dyn FavoritesStore, track_id: &str) -> SessionResult<bool> {
        self.state_ref()?;
        let now_favorite = favorites::toggle_favorite(store, track_id)
            .await
            .map_err(SessionError::Favorites)?;

        let state = self.state_mut()?;
        if now_favorite {
            state.favorite_ids.insert(track_id.to_string());
        } else {
            state.favorite_ids.remove(track_id);
        }
        Ok(now_favorite)
    }

    /// Mark lyrics as loading and hand out what a fetch needs
    pub fn begin_lyrics(&mut self) -> Option<(TrackTicket, Track)> {
        let ticket = self.ticket()?;
        let track = self.current_track()?.clone();
        self.lyrics = LyricsState::Loading;
        Some((ticket, track))
    }

    /// Apply a lyrics response. Returns `false` if it was for a track we have left.
    pub fn apply_lyrics(&mut self, ticket: TrackTicket, result: SessionResult<String>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(?ticket, current = ?self.ticket(), "Discarding stale lyrics response");
            return false;
        }
        self.lyrics = match result {
            Ok(text) => LyricsState::Loaded(text),
            Err(SessionError::NotFound(_)) => LyricsState::NotFound,
            Err(e) => LyricsState::Failed(e.to_string()),
        };
        true
    }

    // ========================================================================
    // Teardown
    // ========================================================================

    /// Stop the clock. Dropping the session does the same.
    pub fn shutdown(&mut self) {
        self.clock.stop();
        if let Some(state) = self.state.as_mut() {
            state.is_playing = false;
        }
        tracing::debug!("Playback session shut down");
    }

    fn pause_locally(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.is_playing = false;
        }
        self.clock.stop();
    }

    fn track_changed(&mut self) {
        self.generation += 1;
        self.lyrics = LyricsState::Unavailable;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use anyhow::Result;
    use async_trait::async_trait;

    use crate::model::MemoryFavoritesStore;
    use crate::model::types::test_track;

    #[derive(Default)]
    struct RecordingTransport {
        calls: Mutex<Vec<String>>,
        fail_next: AtomicBool,
    }

    impl RecordingTransport {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn outcome(&self, call: String) -> Result<()> {
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(anyhow::anyhow!("HTTP 503 for {call}"));
            }
            self.calls.lock().unwrap().push(call);
            Ok(())
        }
    }

    #[async_trait]
    impl RemoteTransport for RecordingTransport {
        async fn set_playback(&self, uri: &str, playing: bool) -> Result<()> {
            self.outcome(format!("{} {uri}", if playing { "play" } else { "pause" }))
        }

        async fn start(&self, uri: &str, position_ms: u32) -> Result<()> {
            self.outcome(format!("start {uri} {position_ms}"))
        }

        async fn seek(&self, position_ms: u32) -> Result<()> {
            self.outcome(format!("seek {position_ms}"))
        }
    }

    fn session_with(durations: &[u32]) -> (PlaybackSession, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::default());
        let (mut session, _ticks) = PlaybackSession::new(transport.clone(), SessionOptions::default());
        let tracks = durations
            .iter()
            .enumerate()
            .map(|(i, d)| test_track(&format!("t{i}"), *d))
            .collect::<Vec<_>>();
        session.load(Queue::new(tracks)).unwrap();
        (session, transport)
    }

    #[tokio::test]
    async fn idle_session_rejects_navigation() {
        let (mut session, _ticks) =
            PlaybackSession::new(Arc::new(RecordingTransport::default()), SessionOptions::default());
        assert_eq!(session.status(), SessionStatus::Idle);
        assert!(matches!(session.next().await, Err(SessionError::NotLoaded)));
        assert!(matches!(session.toggle_playback().await, Err(SessionError::NotLoaded)));
        assert!(matches!(session.seek(0.5).await, Err(SessionError::NotLoaded)));
        assert_eq!(session.tick().await.unwrap(), TickOutcome::Ignored);
    }

    #[tokio::test]
    async fn empty_queue_keeps_previous_state() {
        let (mut session, _) = session_with(&[1000, 2000]);
        session.next().await.unwrap();
        assert!(matches!(session.load(Queue::new(vec![])), Err(SessionError::EmptyQueue)));
        assert_eq!(session.state().unwrap().current_index, 1);
    }

    #[tokio::test]
    async fn toggle_drives_transport_and_clock() {
        let (mut session, transport) = session_with(&[5000]);

        assert!(session.toggle_playback().await.unwrap());
        assert_eq!(session.status(), SessionStatus::Playing);
        assert!(session.is_clock_running());

        assert!(!session.toggle_playback().await.unwrap());
        assert_eq!(session.status(), SessionStatus::Paused);
        assert!(!session.is_clock_running());

        assert_eq!(transport.calls(), vec!["start spotify:track:t0 0", "pause spotify:track:t0"]);
    }

    #[tokio::test]
    async fn second_play_resumes_the_started_track() {
        let (mut session, transport) = session_with(&[5000]);
        session.toggle_playback().await.unwrap();
        session.tick().await.unwrap();
        session.toggle_playback().await.unwrap();
        session.toggle_playback().await.unwrap();

        assert_eq!(
            transport.calls(),
            vec!["start spotify:track:t0 0", "pause spotify:track:t0", "play spotify:track:t0"]
        );
        assert_eq!(session.state().unwrap().progress_ms, 1000);
    }

    #[tokio::test]
    async fn first_play_starts_from_a_paused_seek() {
        let (mut session, transport) = session_with(&[60_000]);
        session.seek(0.5).await.unwrap();
        session.toggle_playback().await.unwrap();
        assert_eq!(transport.calls(), vec!["seek 30000", "start spotify:track:t0 30000"]);
    }

    #[tokio::test]
    async fn failed_start_keeps_the_next_play_a_restart() {
        let (mut session, transport) = session_with(&[5000]);
        transport.fail_next.store(true, Ordering::SeqCst);
        assert!(session.toggle_playback().await.is_err());
        assert_eq!(session.status(), SessionStatus::Paused);

        session.toggle_playback().await.unwrap();
        assert_eq!(transport.calls(), vec!["start spotify:track:t0 0"]);
    }

    #[tokio::test]
    async fn paused_navigation_stays_local() {
        let (mut session, transport) = session_with(&[1000, 1000, 1000]);
        session.next().await.unwrap();
        session.select_track(0).await.unwrap();
        assert!(transport.calls().is_empty());
        assert!(!session.is_clock_running());
    }

    #[tokio::test]
    async fn playing_navigation_continues_on_new_track() {
        let (mut session, transport) = session_with(&[1000, 1000, 1000]);
        session.toggle_playback().await.unwrap();
        session.previous().await.unwrap();
        assert_eq!(session.state().unwrap().current_index, 2);
        assert_eq!(transport.calls().last().unwrap(), "start spotify:track:t2 0");
        assert!(session.is_clock_running());
    }

    #[tokio::test]
    async fn failed_track_change_rolls_back() {
        let (mut session, transport) = session_with(&[5000, 5000, 5000]);
        session.toggle_playback().await.unwrap();
        session.tick().await.unwrap();
        let ticket = session.ticket();

        transport.fail_next.store(true, Ordering::SeqCst);
        let err = session.next().await.unwrap_err();
        assert!(err.is_recoverable());

        let state = session.state().unwrap();
        assert_eq!(state.current_index, 0);
        assert_eq!(state.progress_ms, 1000);
        assert!(state.is_playing);
        assert_eq!(session.ticket(), ticket);
    }

    #[tokio::test]
    async fn select_track_checks_bounds() {
        let (mut session, _) = session_with(&[1000, 1000]);
        let err = session.select_track(2).await.unwrap_err();
        assert!(matches!(err, SessionError::IndexOutOfRange { index: 2, len: 2 }));
    }

    #[tokio::test]
    async fn seek_clamps_fraction() {
        let (mut session, transport) = session_with(&[60_000]);
        assert_eq!(session.seek(1.7).await.unwrap(), 60_000);
        assert_eq!(session.seek(-3.0).await.unwrap(), 0);
        assert_eq!(session.seek(f64::NAN).await.unwrap(), 0);
        assert_eq!(session.seek(0.333).await.unwrap(), 19_980);
        assert_eq!(session.state().unwrap().progress_ms, 19_980);
        assert_eq!(transport.calls().len(), 4);
    }

    #[tokio::test]
    async fn stale_clock_tick_is_discarded_after_pause() {
        let (mut session, _) = session_with(&[10_000]);
        session.toggle_playback().await.unwrap();
        let tick = ClockTick { epoch: 1 };
        assert_eq!(session.on_clock_tick(tick).await.unwrap(), TickOutcome::Progressed(1000));

        session.toggle_playback().await.unwrap();
        assert_eq!(session.on_clock_tick(tick).await.unwrap(), TickOutcome::Stale);
        assert_eq!(session.state().unwrap().progress_ms, 1000);
    }

    #[tokio::test]
    async fn stop_at_queue_end_rewinds_and_pauses() {
        let transport = Arc::new(RecordingTransport::default());
        let options = SessionOptions {
            stop_at_queue_end: true,
            ..SessionOptions::default()
        };
        let (mut session, _ticks) = PlaybackSession::new(transport, options);
        session
            .load(Queue::new(vec![test_track("a", 1000), test_track("b", 1000)]))
            .unwrap();
        session.toggle_playback().await.unwrap();

        assert_eq!(session.tick().await.unwrap(), TickOutcome::Advanced(1));
        assert_eq!(session.tick().await.unwrap(), TickOutcome::QueueEnded);
        assert_eq!(session.status(), SessionStatus::Paused);
        assert_eq!(session.state().unwrap().current_index, 0);
        assert!(!session.is_clock_running());
    }

    #[tokio::test]
    async fn failed_auto_advance_pauses_locally() {
        let (mut session, transport) = session_with(&[1000, 1000]);
        session.toggle_playback().await.unwrap();
        transport.fail_next.store(true, Ordering::SeqCst);

        assert!(session.tick().await.is_err());
        let state = session.state().unwrap();
        assert_eq!(state.current_index, 0);
        assert_eq!(state.progress_ms, 1000);
        assert!(!state.is_playing);
        assert!(!session.is_clock_running());
        assert_eq!(session.tick().await.unwrap(), TickOutcome::Ignored);
    }

    #[tokio::test]
    async fn shuffle_and_repeat_survive_reload() {
        let (mut session, _) = session_with(&[1000]);
        session.set_shuffle(true).unwrap();
        session.cycle_repeat().unwrap();
        session.load(Queue::new(vec![test_track("x", 1000)])).unwrap();
        let state = session.state().unwrap();
        assert!(state.shuffle);
        assert_eq!(state.repeat, RepeatMode::Track);
    }

    #[tokio::test]
    async fn favorites_follow_the_store() {
        let (mut session, _) = session_with(&[1000, 1000]);
        let store = MemoryFavoritesStore::new();

        assert!(session.toggle_favorite(&store, "t0").await.unwrap());
        assert!(session.playback_info().is_favorite);

        session.next().await.unwrap();
        assert!(!session.playback_info().is_favorite);

        session.refresh_favorites(&store).await.unwrap();
        assert!(session.state().unwrap().favorite_ids.contains("t0"));
    }

    #[tokio::test]
    async fn lyrics_for_a_left_track_are_dropped() {
        let (mut session, _) = session_with(&[1000, 1000]);
        let (ticket, track) = session.begin_lyrics().unwrap();
        assert_eq!(track.id, "t0");
        assert_eq!(session.lyrics(), &LyricsState::Loading);

        session.next().await.unwrap();
        assert!(!session.apply_lyrics(ticket, Ok("la la".to_string())));
        assert_eq!(session.lyrics(), &LyricsState::Unavailable);

        let (ticket, _) = session.begin_lyrics().unwrap();
        assert!(session.apply_lyrics(ticket, Err(SessionError::NotFound("t1".to_string()))));
        assert_eq!(session.lyrics(), &LyricsState::NotFound);
    }

    #[tokio::test]
    async fn shutdown_stops_the_clock() {
        let (mut session, _) = session_with(&[1000]);
        session.toggle_playback().await.unwrap();
        session.shutdown();
        assert!(!session.is_clock_running());
        assert_eq!(session.status(), SessionStatus::Paused);
    }
}
