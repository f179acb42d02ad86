//! Track ordering policy for next/previous and end-of-track handling

use rand::Rng;

use super::types::RepeatMode;

/// Direction of a navigation transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Forward,
    Backward,
}

/// Pick the index a `next`/`previous` transition lands on.
///
/// Shuffle draws uniformly from the whole queue and may land on `current` again.
/// Without shuffle the queue is circular.
pub fn step_index<R: Rng + ?Sized>(current: usize, len: usize, step: Step, shuffle: bool, rng: &mut R) -> usize {
    debug_assert!(len > 0);
    if shuffle {
        return rng.gen_range(0..len);
    }
    match step {
        Step::Forward => (current + 1) % len,
        Step::Backward => (current + len - 1) % len,
    }
}

/// What happens when the progress clock reaches the end of the current track
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackEnd {
    /// Restart the same track from zero
    Loop,
    /// Move on to this index
    Advance(usize),
    /// The queue is exhausted; rewind to the first track and stop
    Stop,
}

pub fn on_track_end<R: Rng + ?Sized>(
    current: usize,
    len: usize,
    repeat: RepeatMode,
    shuffle: bool,
    stop_at_queue_end: bool,
    rng: &mut R,
) -> TrackEnd {
    match repeat {
        RepeatMode::Track => TrackEnd::Loop,
        RepeatMode::Off if stop_at_queue_end && !shuffle && current + 1 == len => TrackEnd::Stop,
        RepeatMode::Off | RepeatMode::Context => {
            TrackEnd::Advance(step_index(current, len, Step::Forward, shuffle, rng))
        }
    }
}
