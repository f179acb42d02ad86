//! Error types for the playback session and its collaborators

use thiserror::Error;

/// Errors surfaced by [`PlaybackSession`](crate::model::PlaybackSession) transitions.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A queue with zero tracks was handed to `load`
    #[error("Queue is empty")]
    EmptyQueue,

    /// `select_track` was given a position outside the queue
    #[error("Index {index} out of range for queue of {len} tracks")]
    IndexOutOfRange { index: usize, len: usize },

    /// A navigation transition was attempted before a queue was loaded
    #[error("No queue loaded")]
    NotLoaded,

    /// The remote call failed or answered with a non-success status
    #[error("Transport error: {0}")]
    Transport(#[from] anyhow::Error),

    /// The requested track list or lyrics do not exist upstream
    #[error("Not found: {0}")]
    NotFound(String),

    /// Reading or writing the favorites store failed
    #[error("Favorites store error: {0}")]
    Favorites(#[source] anyhow::Error),
}

impl SessionError {
    /// Transport and store failures leave the session usable and may be retried by the user.
    /// The rest are contract violations by the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SessionError::Transport(_) | SessionError::NotFound(_) | SessionError::Favorites(_)
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SessionError::EmptyQueue => "empty_queue",
            SessionError::IndexOutOfRange { .. } => "index_out_of_range",
            SessionError::NotLoaded => "not_loaded",
            SessionError::Transport(_) => "transport",
            SessionError::NotFound(_) => "not_found",
            SessionError::Favorites(_) => "favorites",
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
