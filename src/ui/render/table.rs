use super::Frame;
use crate::entity::EntityKind;
use crate::state::{Focus, InputMode, State};
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};

/// Render the entity table with its search line and paging summary.
///
pub fn table(frame: &mut Frame, size: Rect, state: &State, kind: EntityKind) {
    let theme = state.theme();
    let screen = state.screen(kind);

    let mut title = format!("{} ({})", kind.plural(), screen.total_records());
    if screen.operation_loading() || (screen.is_loading() && screen.total_records() > 0) {
        title = format!("{} {}", title, spinner::frame(state));
    }
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));
    if state.current_focus() == Focus::View {
        block = block
            .border_style(styling::active_block_border_style(theme))
            .title(Span::styled(title, styling::active_block_title_style()));
    } else {
        block = block.title(title);
    }

    if screen.is_loading() && screen.total_records() == 0 {
        let label = format!("Loading {}...", kind.plural().to_lowercase());
        frame.render_widget(spinner::widget(state, size.height, &label).block(block), size);
        return;
    }

    if let (Some(error), 0) = (screen.error(), screen.total_records()) {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(error.to_owned(), styling::error_text_style(theme))),
            Line::from(""),
            Line::from(Span::styled("Press r to retry", styling::muted_text_style(theme))),
        ];
        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, size);
        return;
    }

    let inner = block.inner(size);
    frame.render_widget(block, size);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(status_line(state, kind), chunks[0]);

    let rows = screen.rows();
    if rows.is_empty() {
        let message = if screen.search_term().is_empty() {
            format!("No {} found", kind.plural().to_lowercase())
        } else {
            format!("No results for \"{}\"", screen.search_term())
        };
        let empty = Paragraph::new(message)
            .style(styling::muted_text_style(theme))
            .alignment(Alignment::Center);
        frame.render_widget(empty, chunks[1]);
    } else {
        let sort = screen.sort();
        let header = Row::new(screen.columns().iter().map(|column| {
            let arrow = match &sort {
                Some(sort) if sort.field == column.field => sort.direction.arrow(),
                _ => "",
            };
            Cell::from(format!("{}{}", column.title, arrow))
        }))
        .style(styling::header_style(theme));
        let widths: Vec<Constraint> = screen
            .columns()
            .iter()
            .map(|column| Constraint::Min(column.width))
            .collect();
        let body = rows.into_iter().map(|cells| Row::new(cells.into_iter().map(Cell::from)));
        let table = Table::new(body, widths)
            .header(header)
            .style(styling::normal_text_style(theme))
            .highlight_style(styling::selected_row_style(theme))
            .column_spacing(2);
        let mut table_state = TableState::default();
        table_state.select(Some(screen.selected_index()));
        frame.render_stateful_widget(table, chunks[1], &mut table_state);
    }

    let paging = format!(
        "Page {} of {} | {} shown of {} | 1-{}: sort",
        screen.current_page(),
        screen.total_pages().max(1),
        screen.filtered_count(),
        screen.total_records(),
        screen.columns().len(),
    );
    frame.render_widget(
        Paragraph::new(paging).style(styling::muted_text_style(theme)),
        chunks[2],
    );
}

/// Returns the line above the table: the notice, the error, or the search term.
///
fn status_line<'a>(state: &'a State, kind: EntityKind) -> Paragraph<'a> {
    let theme = state.theme();
    let screen = state.screen(kind);
    if let Some(notice) = screen.notice() {
        return Paragraph::new(format!("{} (Esc: dismiss)", notice.message))
            .style(styling::notice_style(theme, notice.level));
    }
    if let Some(error) = screen.error() {
        return Paragraph::new(error.to_owned()).style(styling::error_text_style(theme));
    }
    let term = screen.search_term();
    if state.input_mode() == InputMode::Search {
        Paragraph::new(format!("/{}▏", term)).style(styling::active_list_item_style(theme))
    } else if !term.is_empty() {
        Paragraph::new(format!("/{}", term)).style(styling::normal_text_style(theme))
    } else {
        Paragraph::new("/: search").style(styling::muted_text_style(theme))
    }
}
