//! Queue list rendering

use std::collections::HashSet;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, ListItem, Padding},
    Frame,
};

use crate::model::Track;
use super::utils::{calculate_num_width, format_duration, render_scrollable_list, truncate_string};

pub fn render_queue(
    frame: &mut Frame,
    area: Rect,
    tracks: &[Track],
    favorite_ids: &HashSet<String>,
    current_index: Option<usize>,
    selected_index: usize,
) {
    let content_width = area.width.saturating_sub(4) as usize;
    let mut list_items = render_queue_items(tracks, favorite_ids, current_index, selected_index, content_width);

    if tracks.is_empty() {
        list_items.push(
            ListItem::new("       Queue is empty")
                .style(Style::default().fg(Color::DarkGray))
        );
    }

    let queue_block = Block::default()
        .borders(Borders::ALL)
        .title(" Queue (↑↓ Enter) ")
        .padding(Padding::horizontal(1));

    // +1 for the header row
    render_scrollable_list(frame, area, list_items, selected_index + 1, queue_block);
}

fn render_queue_items(
    tracks: &[Track],
    favorite_ids: &HashSet<String>,
    current_index: Option<usize>,
    selected_index: usize,
    content_width: usize,
) -> Vec<ListItem<'static>> {
    let num_width = calculate_num_width(tracks.len());
    let liked_width = 2;
    let duration_width = 8;
    let fixed_width = 1 + num_width + 3 + liked_width + 3 + 3 + 3 + duration_width;
    let remaining_width = content_width.saturating_sub(fixed_width);
    let title_width = (remaining_width * 55) / 100;
    let artist_width = remaining_width.saturating_sub(title_width);

    let mut items: Vec<ListItem<'static>> = vec![
        ListItem::new(format!(
            " {:<num_width$}   {}   {:<title_width$}   {:<artist_width$}   {}",
            "#", "  ", "Title", "Artist", "Duration",
            num_width = num_width,
            title_width = title_width,
            artist_width = artist_width
        ))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    ];

    let track_items = tracks.iter().enumerate().map(|(i, track)| {
        let is_current = current_index == Some(i);
        let style = if i == selected_index {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else if is_current {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let liked_indicator = if favorite_ids.contains(&track.id) { "💚" } else { "  " };
        let playing_indicator = if is_current { "▶" } else { " " };
        let track_num = format!("{}{:<num_width$}", playing_indicator, i + 1, num_width = num_width);

        let title_str = truncate_string(&track.title, title_width);
        let artist_str = truncate_string(&track.artist, artist_width);
        let duration = format_duration(track.duration_ms);

        ListItem::new(format!("{}   {}   {}   {}   {}", track_num, liked_indicator, title_str, artist_str, duration))
            .style(style)
    });

    items.extend(track_items);
    items
}
