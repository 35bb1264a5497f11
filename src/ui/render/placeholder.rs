use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

/// Render a route that has no content yet.
///
pub fn placeholder(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let title = state.route().title().to_string();
    let text = vec![
        Line::from(""),
        Line::styled(format!("{} is coming soon", title), styling::muted_text_style(theme)),
    ];
    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(styling::normal_block_border_style(theme)),
    );
    frame.render_widget(paragraph, size);
}

/// Render the fallback for unknown paths.
///
pub fn not_found(frame: &mut Frame, size: Rect, state: &State, path: &str) {
    let theme = state.theme();
    let text = vec![
        Line::from(""),
        Line::styled(format!("No page at {}", path), styling::error_text_style(theme)),
        Line::from(""),
        Line::styled(
            "Press : to go to another path, Tab to use the menu",
            styling::muted_text_style(theme),
        ),
    ];
    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Not Found")
            .border_style(styling::normal_block_border_style(theme)),
    );
    frame.render_widget(paragraph, size);
}
