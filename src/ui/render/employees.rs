use super::Frame;
use crate::screen::Screen;
use crate::state::State;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Row, Table},
};

/// Render the read-only employee directory built from the user list.
///
pub fn employees(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Employees")
        .border_style(styling::normal_block_border_style(theme));

    let users = state.users().list().records();
    if users.is_empty() && state.users().is_loading() {
        frame.render_widget(
            spinner::widget(state, size.height, "Loading employees...").block(block),
            size,
        );
        return;
    }

    let mut users: Vec<_> = users.iter().collect();
    users.sort_by(|a, b| a.full_name.to_lowercase().cmp(&b.full_name.to_lowercase()));
    let rows = users.into_iter().map(|user| {
        Row::new(vec![
            user.full_name.clone(),
            user.email.clone(),
            user.status.label().to_string(),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(35),
            Constraint::Percentage(45),
            Constraint::Percentage(20),
        ],
    )
    .header(Row::new(vec!["Name", "Email", "Status"]).style(styling::header_style(theme)))
    .style(styling::normal_text_style(theme))
    .block(block);
    frame.render_widget(table, size);
}
