use super::Frame;
use crate::state::{Focus, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, List, ListItem, ListState},
};

const BLOCK_TITLE: &str = "Menu";

/// Render the sidebar with the routes the operator may open.
///
pub fn sidebar(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));

    let list_item_style;
    if state.current_focus() == Focus::Menu {
        list_item_style = styling::active_list_item_style(theme);
        block = block
            .border_style(styling::active_block_border_style(theme))
            .title(Span::styled(BLOCK_TITLE, styling::active_block_title_style()));
    } else {
        list_item_style = styling::current_list_item_style(theme);
        block = block.title(BLOCK_TITLE);
    }

    let routes = state.sidebar_routes();
    let items: Vec<ListItem> = routes
        .iter()
        .map(|route| {
            let marker = if route == state.route() { "● " } else { "  " };
            ListItem::new(format!("{}{}", marker, route.title()))
        })
        .collect();

    let list = List::new(items)
        .style(styling::normal_text_style(theme))
        .highlight_style(list_item_style)
        .block(block);

    let mut list_state = ListState::default();
    if !routes.is_empty() {
        list_state.select(Some(state.menu_index()));
    }
    frame.render_stateful_widget(list, size, &mut list_state);
}
