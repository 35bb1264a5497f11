use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

/// Render the dashboard: who is signed in and how many records each
/// collection holds.
///
pub fn dashboard(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Dashboard")
        .border_style(styling::normal_block_border_style(theme));
    let inner = block.inner(size);
    frame.render_widget(block, size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .margin(1)
        .split(inner);

    let mut summary = vec![];
    if let Some(current) = state.auth().current() {
        let roles = current
            .roles()
            .iter()
            .map(|role| role.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let modules = current
            .modules()
            .iter()
            .map(|module| module.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        summary.push(Line::from(vec![
            Span::styled("Signed in as ", styling::muted_text_style(theme)),
            Span::styled(current.display_name.clone(), styling::active_list_item_style(theme)),
        ]));
        summary.push(Line::from(vec![
            Span::styled("Roles: ", styling::muted_text_style(theme)),
            Span::styled(roles, styling::normal_text_style(theme)),
        ]));
        summary.push(Line::from(vec![
            Span::styled("Modules: ", styling::muted_text_style(theme)),
            Span::styled(modules, styling::normal_text_style(theme)),
        ]));
    }
    frame.render_widget(Paragraph::new(summary), chunks[0]);

    let rows = state
        .record_counts()
        .into_iter()
        .filter(|(kind, _)| state.auth().can_access(&crate::router::Route::Entity(*kind)))
        .map(|(kind, count)| {
            let screen = state.screen(kind);
            let count = if screen.is_loading() && count == 0 {
                "...".to_string()
            } else {
                count.to_string()
            };
            Row::new(vec![Cell::from(kind.plural()), Cell::from(count)])
        });
    let table = Table::new(rows, [Constraint::Length(16), Constraint::Length(10)])
        .header(Row::new(vec!["Collection", "Records"]).style(styling::header_style(theme)))
        .style(styling::normal_text_style(theme));
    frame.render_widget(table, chunks[1]);
}
