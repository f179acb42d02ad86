//! Overlay rendering (error notification, playlist picker, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::model::UiState;

const KEYBINDINGS: &[(&str, &str)] = &[
    ("", "── Playback ──"),
    ("Space", "Play / Pause"),
    ("N", "Next track"),
    ("P", "Previous track"),
    ("← / →", "Seek -10% / +10%"),
    ("0 - 9", "Seek to 0% .. 90%"),
    ("S", "Toggle shuffle"),
    ("R", "Cycle repeat (off → one → all)"),
    ("", ""),
    ("", "── Queue ──"),
    ("↑ / ↓", "Move selection"),
    ("Enter", "Play selected track"),
    ("F", "Favorite / Unfavorite track"),
    ("", ""),
    ("", "── Library ──"),
    ("L", "Pick a playlist"),
    ("U", "Reload playlist"),
    ("", ""),
    ("", "── General ──"),
    ("H", "Toggle this help"),
    ("Q", "Quit"),
];

/// Rect of `width` x `height` centered in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Rows needed for `text` wrapped at `inner_width` columns
fn wrapped_line_count(text: &str, inner_width: u16) -> u16 {
    let inner_width = usize::from(inner_width.max(1));
    text.lines()
        .map(|line| line.chars().count().div_ceil(inner_width).max(1))
        .sum::<usize>()
        .min(usize::from(u16::MAX)) as u16
}

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    let Some(error_msg) = &ui_state.error_message else {
        return;
    };
    let area = frame.area();

    let popup_width = 52.min(area.width.saturating_sub(4));
    // borders + one column of slack on each side
    let line_count = wrapped_line_count(error_msg, popup_width.saturating_sub(4));
    let popup_area = centered(area, popup_width, (line_count + 2).min(area.height.saturating_sub(4)));

    frame.render_widget(Clear, popup_area);

    let error_widget = Paragraph::new(error_msg.as_str())
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error (Esc to dismiss) ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(error_widget, popup_area);
}

pub fn render_playlist_picker(frame: &mut Frame, ui_state: &UiState, current_id: Option<&str>) {
    let area = frame.area();

    let max_name_len = ui_state
        .playlists
        .iter()
        .map(|p| p.name.chars().count() + 4)
        .max()
        .unwrap_or(30);

    let popup_width = (max_name_len as u16 + 6).clamp(38, 60);
    let popup_height = (ui_state.playlists.len() as u16 + 2)
        .max(6)
        .min(area.height.saturating_sub(4));
    let popup_area = centered(area, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let items: Vec<ListItem> = ui_state
        .playlists
        .iter()
        .enumerate()
        .map(|(i, playlist)| {
            let is_selected = i == ui_state.playlist_selected;
            let is_loaded = current_id == Some(playlist.id.as_str());

            let loaded_indicator = if is_loaded { " ●" } else { "" };
            let text = format!("♫ {}{}", playlist.name, loaded_indicator);

            let style = if is_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else if is_loaded {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(text).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Select Playlist (↑↓ Enter Esc) ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );

    let mut list_state = ListState::default();
    list_state.select(Some(ui_state.playlist_selected));

    frame.render_stateful_widget(list, popup_area, &mut list_state);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();
    let popup_area = centered(
        area,
        62,
        (KEYBINDINGS.len() as u16 + 2).min(area.height.saturating_sub(4)),
    );

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = KEYBINDINGS
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or spacer
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
