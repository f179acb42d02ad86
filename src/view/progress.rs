//! Progress bar rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::model::{PlaybackInfo, SessionStatus};
use super::utils::format_duration;

pub fn render_progress_bar(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
    let status_text = match (&playback.track, playback.status) {
        (None, _) | (_, SessionStatus::Idle) => " No track loaded".to_string(),
        (Some(track), SessionStatus::Playing) => {
            format!(" ▶ {} | {} ({})", track.title, track.artist, track.album)
        }
        (Some(track), SessionStatus::Paused) => {
            format!("⏸  {} | {} ({})", track.title, track.artist, track.album)
        }
    };

    let shuffle_text = if playback.shuffle { "Shuffle: On" } else { "Shuffle: Off" };
    let repeat_text = format!("Repeat: {}", playback.repeat.label());
    let position_text = if playback.queue_len > 0 {
        format!("{}/{}", playback.current_index + 1, playback.queue_len)
    } else {
        "-".to_string()
    };

    let time_str = format!(
        "{} / {}",
        format_duration(playback.progress_ms),
        format_duration(playback.duration_ms)
    );

    let title = format!("{} ", status_text);
    let controls_info = format!(" {} | {} | Track {} ", shuffle_text, repeat_text, position_text);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(Line::from(controls_info).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(playback.progress_ratio())
        .label(time_str);

    frame.render_widget(gauge, area);
}
