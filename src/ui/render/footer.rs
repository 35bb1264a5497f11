use super::Frame;
use crate::auth::Action;
use crate::state::{Focus, InputMode, State};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Returns the hotkey shown for an action on entity tables.
///
fn action_hotkey(action: Action) -> &'static str {
    match action {
        Action::View => "v: view",
        Action::Create => "a: add",
        Action::Edit => "e: edit",
        Action::Delete => "d: delete",
        Action::ManageAccess => "R: access",
    }
}

/// Build the mode label and control hints for the current input mode.
/// Table actions list only what the operator is permitted to do.
///
pub fn controls(state: &State) -> (&'static str, String) {
    match state.input_mode() {
        InputMode::Token => ("LOGIN:", " Enter: sign in, Esc: quit".to_string()),
        InputMode::Search => ("SEARCH:", " Enter: keep filter, Esc: clear".to_string()),
        InputMode::Goto => (
            "GOTO:",
            format!(" :{}▏ Enter: go, Esc: cancel", state.goto_input()),
        ),
        InputMode::Form => ("FORM:", " Tab: next field, Enter: save, Esc: cancel".to_string()),
        InputMode::Access => (
            "ACCESS:",
            " Tab: section, Space: toggle, Enter: apply, Esc: close".to_string(),
        ),
        InputMode::Normal => {
            let mut parts: Vec<String> = vec![];
            if state.current_focus() == Focus::Menu {
                parts.push("j/k: navigate".to_string());
                parts.push("Enter: open".to_string());
            } else if state.route().entity_kind().is_some() {
                parts.push("j/k: rows".to_string());
                parts.push("h/l: pages".to_string());
                parts.extend(
                    state
                        .available_actions()
                        .into_iter()
                        .map(|action| action_hotkey(action).to_string()),
                );
                parts.push("/: search".to_string());
                parts.push("r: refresh".to_string());
            }
            parts.push("Tab: menu".to_string());
            parts.push(":: goto".to_string());
            parts.push("L: logout".to_string());
            parts.push("F2: log".to_string());
            parts.push("q: quit".to_string());
            ("NORMAL:", format!(" {}", parts.join(", ")))
        }
    }
}

/// Render footer widget according to state.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let (label, controls_text) = controls(state);
    let label_bg = match state.input_mode() {
        InputMode::Search | InputMode::Goto => theme.footer_search,
        InputMode::Form => theme.footer_form,
        InputMode::Access => theme.footer_access,
        InputMode::Token | InputMode::Normal => {
            let deleting = state
                .active_screen()
                .map(|screen| {
                    matches!(
                        screen.modal_view(),
                        crate::screen::ModalView::DeleteConfirm { .. }
                    )
                })
                .unwrap_or(false);
            if deleting {
                theme.footer_delete
            } else {
                theme.footer_normal
            }
        }
    };

    let controls_content = Line::from(vec![
        Span::styled(
            label,
            Style::default()
                .fg(theme.text.to_color())
                .bg(label_bg.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(controls_text, Style::default().fg(theme.warning.to_color())),
    ]);
    let controls_widget = Paragraph::new(controls_content).alignment(Alignment::Left);

    let right_content = Line::from(vec![Span::styled(
        format!(" {}", env!("CARGO_PKG_VERSION")),
        Style::default().fg(theme.secondary.to_color()),
    )]);
    let right_content_width = right_content.width();
    let right_widget = Paragraph::new(right_content).alignment(Alignment::Right);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(right_content_width.try_into().unwrap_or(0)),
        ])
        .split(size);

    frame.render_widget(controls_widget, columns[0]);
    frame.render_widget(right_widget, columns[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::logger::LogBuffer;
    use std::sync::mpsc::channel;

    fn state_with_roles(roles: &[&str]) -> State {
        let (net_tx, net_rx) = channel();
        let (save_tx, save_rx) = channel();
        std::mem::forget(net_rx);
        std::mem::forget(save_rx);
        let mut config = Config::new();
        config.access_token = Some("abc".to_string());
        config.session_roles = roles.iter().map(|r| r.to_string()).collect();
        let mut state = State::new(net_tx, save_tx, &config, LogBuffer::new(10));
        state.start();
        state
    }

    #[test]
    fn hides_actions_without_permission() {
        let mut state = state_with_roles(&["hr_manager"]);
        state.navigate("/countries");
        let (label, text) = controls(&state);
        assert_eq!(label, "NORMAL:");
        assert!(text.contains("a: add"));
        assert!(text.contains("e: edit"));
        assert!(!text.contains("d: delete"));
    }

    #[test]
    fn access_hotkey_only_on_users() {
        let mut state = state_with_roles(&["super_admin"]);
        state.navigate("/users");
        assert!(controls(&state).1.contains("R: access"));
        state.navigate("/roles");
        assert!(!controls(&state).1.contains("R: access"));
    }

    #[test]
    fn goto_shows_typed_path() {
        let mut state = state_with_roles(&["admin"]);
        state.start_goto();
        state.add_goto_char('x');
        assert_eq!(state.goto_input(), "/x");
        let (label, text) = controls(&state);
        assert_eq!(label, "GOTO:");
        assert!(text.contains(":/x"));
    }
}
