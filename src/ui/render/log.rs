use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, List, ListItem},
};

/// Render log widget with the newest entries that fit.
///
pub fn log(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let block = Block::default()
        .title("Log (F2: hide)")
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));

    let items: Vec<ListItem> = state
        .log_lines(size.height.saturating_sub(2) as usize)
        .into_iter()
        .map(ListItem::new)
        .collect();

    let list = List::new(items)
        .style(styling::muted_text_style(theme))
        .block(block);
    frame.render_widget(list, size);
}
