//! Model module - playback session and its collaborators
//!
//! - `types`: Track, Queue, repeat mode and session identity types
//! - `playback`: Mutable playback state and the view snapshot
//! - `order`: Next/previous/end-of-track ordering policy
//! - `clock`: The local progress clock
//! - `session`: The playback session state machine
//! - `collaborators`: Traits for the remote transport, track source, favorites and lyrics
//! - `favorites`: Favorites stores and the toggle
//! - `lyrics`: LRCLIB lyrics client
//! - `spotify_client`: Spotify API client (transport + track source)
//! - `ui`: Error notification and queue selection state

mod types;
mod playback;
mod order;
mod clock;
mod session;
mod collaborators;
mod favorites;
mod lyrics;
mod spotify_client;
mod ui;

pub use types::{PlaylistItem, Queue, RepeatMode, SessionStatus, Track, TrackTicket};

pub use playback::{LyricsState, PlaybackInfo, PlaybackState};

pub use clock::{ClockTick, ClockTicks, ProgressClock, PROGRESS_QUANTUM_MS};

pub use session::{PlaybackSession, SessionOptions, TickOutcome};

pub use collaborators::{FavoritesStore, LyricsSource, RemoteTransport, TrackSource};

pub use favorites::{toggle_favorite, JsonFavoritesStore, MemoryFavoritesStore, FAVORITES_FILE};

pub use lyrics::LrclibClient;

pub use spotify_client::SpotifyClient;

pub use ui::{UiState, ERROR_DISPLAY_TIME};
