//! Layout rendering (now-playing header)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::PlaybackInfo;

pub fn render_track_header(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Title, artist, album
            Constraint::Length(14), // Favorite marker
        ])
        .split(area);

    let line = match &playback.track {
        Some(track) => Line::from(vec![
            Span::styled(track.title.clone(), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw("  -  "),
            Span::styled(track.artist.clone(), Style::default().fg(Color::White)),
            Span::styled(format!(" ({})", track.album), Style::default().fg(Color::DarkGray)),
        ]),
        None => Line::from(Span::styled("No track loaded", Style::default().fg(Color::DarkGray))),
    };

    let now_playing = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" 🎵 Now Playing ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(now_playing, chunks[0]);

    let (favorite_text, favorite_style) = if playback.is_favorite {
        ("💚 Liked", Style::default().fg(Color::Green))
    } else {
        ("   -", Style::default().fg(Color::DarkGray))
    };
    let favorite = Paragraph::new(favorite_text)
        .style(favorite_style)
        .block(Block::default().borders(Borders::ALL).title(" F "));
    frame.render_widget(favorite, chunks[1]);
}
