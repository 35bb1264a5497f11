use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{layout::Alignment, text::Line, widgets::Paragraph};

/// Braille frames cycled by the tick handler.
///
pub const FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Returns the spinner glyph for the current tick.
///
pub fn frame(state: &State) -> &'static str {
    FRAMES[state.spinner_index() % FRAMES.len()]
}

/// Return a paragraph showing the spinner centered in an area of the given
/// height.
///
pub fn widget(state: &State, height: u16, label: &str) -> Paragraph<'static> {
    let mut lines: Vec<Line> = (0..height.saturating_sub(2) / 2).map(|_| Line::from("")).collect();
    lines.push(Line::from(format!("{} {}", frame(state), label)));
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(styling::normal_text_style(state.theme()))
}
