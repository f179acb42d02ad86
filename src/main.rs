use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};

use spotify_nowplaying::auth;
use spotify_nowplaying::config::AppConfig;
use spotify_nowplaying::controller::{LyricsResponses, PlayerController};
use spotify_nowplaying::logging;
use spotify_nowplaying::model::{
    ClockTicks, FavoritesStore, JsonFavoritesStore, LrclibClient, LyricsSource, PlaybackSession, SpotifyClient,
};
use spotify_nowplaying::view::AppView;

/// Upper bound between redraws when nothing else happens
const REDRAW_INTERVAL: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== spotify-nowplaying starting ===");

    let config = AppConfig::from_env(std::env::args().nth(1))?;

    // Step 1: Authorize (may prompt in the terminal, so before raw mode)
    let spotify = auth::authorize(&config).await?;
    let client = Arc::new(SpotifyClient::new(spotify, config.device_name.clone()));

    // Step 2: Collaborators
    let favorites: Arc<dyn FavoritesStore> = Arc::new(JsonFavoritesStore::new(config.favorites_path.clone()));
    let lyrics_source: Option<Arc<dyn LyricsSource>> = if config.lyrics_enabled {
        match LrclibClient::new() {
            Ok(lrclib) => Some(Arc::new(lrclib)),
            Err(e) => {
                tracing::warn!(error = %e, "Lyrics client unavailable, continuing without lyrics");
                None
            }
        }
    } else {
        None
    };

    // Step 3: Session and initial queue
    let (session, mut ticks) = PlaybackSession::new(client.clone(), config.session_options());
    let (mut controller, mut lyrics) = PlayerController::new(session, client.clone(), favorites, lyrics_source);
    match &config.playlist_id {
        Some(playlist_id) => controller.load_playlist(playlist_id).await,
        None => controller.open_playlist_picker().await,
    }

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut controller, &mut ticks, &mut lyrics).await;

    controller.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("spotify-nowplaying shutting down");
    res
}

/// The single event loop: every session transition happens here, one at a time
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut PlayerController,
    ticks: &mut ClockTicks,
    lyrics: &mut LyricsResponses,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut redraw = tokio::time::interval(REDRAW_INTERVAL);

    loop {
        controller.on_redraw();

        let playback = controller.playback_info();
        terminal.draw(|f| {
            AppView::render(
                f,
                &playback,
                controller.session().state(),
                controller.ui_state(),
                controller.playlist_id(),
            );
        })?;

        if controller.should_quit() {
            break;
        }

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => controller.handle_key_event(key).await,
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(tick) = ticks.recv() => controller.on_clock_tick(tick).await,
            Some(response) = lyrics.recv() => controller.on_lyrics(response),
            _ = redraw.tick() => {}
        }
    }

    Ok(())
}
