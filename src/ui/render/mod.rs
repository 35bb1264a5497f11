mod dashboard;
mod employees;
mod footer;
mod log;
mod login;
mod modal;
mod placeholder;
mod sidebar;
mod table;

use self::log::log;
use super::Frame;
use crate::router::Route;
use crate::state::State;
use crate::ui::widgets::styling;
use footer::footer;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
};
use sidebar::sidebar;

const SIDEBAR_WIDTH: u16 = 24;
const LOG_HEIGHT: u16 = 8;

/// Render the whole console according to state.
///
pub fn render(frame: &mut Frame, state: &mut State) {
    let size = frame.size();
    state.set_terminal_size(size);

    let mut constraints = vec![Constraint::Min(0)];
    if state.is_log_visible() {
        constraints.push(Constraint::Length(LOG_HEIGHT));
    }
    constraints.push(Constraint::Length(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    if *state.route() == Route::Login {
        login::login(frame, rows[0], state);
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(rows[0]);
        sidebar(frame, columns[0], state);
        view(frame, columns[1], state);
    }

    if state.is_log_visible() {
        log(frame, rows[1], state);
    }
    footer(frame, rows[rows.len() - 1], state);

    if let Some(kind) = state.route().entity_kind() {
        modal::entity_modal(frame, size, state, kind);
    }
    if state.access_editor().is_some() {
        modal::access_editor(frame, size, state);
    }
}

/// Render the routed view with the banner above it when one is set.
///
fn view(frame: &mut Frame, size: Rect, state: &State) {
    let area = match state.banner() {
        Some(notice) => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(0)])
                .split(size);
            let banner = Paragraph::new(format!(" {}", notice.message))
                .style(styling::notice_style(state.theme(), notice.level));
            frame.render_widget(banner, rows[0]);
            rows[1]
        }
        None => size,
    };

    match state.route() {
        Route::Dashboard => dashboard::dashboard(frame, area, state),
        Route::Employees => employees::employees(frame, area, state),
        Route::Entity(kind) => table::table(frame, area, state, *kind),
        Route::Departments | Route::Settings => placeholder::placeholder(frame, area, state),
        Route::NotFound(path) => placeholder::not_found(frame, area, state, path),
        Route::Login => (),
    }
}

/// Return a rect centered in the given one, sized by percentages.
///
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
