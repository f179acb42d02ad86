//! Lyrics pane

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::LyricsState;

pub fn render_lyrics(frame: &mut Frame, area: Rect, lyrics: &LyricsState) {
    let (text, style) = lyrics_text(lyrics);

    let pane = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Lyrics ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(pane, area);
}

fn lyrics_text(lyrics: &LyricsState) -> (String, Style) {
    let dim = Style::default().fg(Color::DarkGray);
    match lyrics {
        LyricsState::Unavailable => ("No lyrics".to_string(), dim),
        LyricsState::Loading => ("Loading lyrics...".to_string(), dim),
        LyricsState::Loaded(text) => (text.clone(), Style::default().fg(Color::White)),
        LyricsState::NotFound => ("No lyrics found for this track".to_string(), dim),
        LyricsState::Failed(reason) => (format!("Lyrics unavailable: {}", reason), Style::default().fg(Color::Red)),
    }
}
