use crate::auth::Action;
use crate::entity::FieldKind;
use crate::screen::ModalView;
use crate::state::{Focus, InputMode, State};
use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            match event::poll(tick_rate) {
                Ok(true) => {
                    if let Ok(CrosstermEvent::Key(key)) = event::read() {
                        if tx_clone.send(Event::Input(key)).is_err() {
                            break;
                        }
                    }
                }
                Ok(false) => (),
                Err(e) => {
                    error!("Terminal event poll failed: {}", e);
                    break;
                }
            }
            if tx_clone.send(Event::Tick).is_err() {
                break;
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(key) => Ok(handle_key(key, state)),
            Event::Tick => {
                state.advance_spinner_index();
                Ok(true)
            }
        }
    }
}

/// Apply one key press to the state. Returns false if exit was requested.
///
pub fn handle_key(key: KeyEvent, state: &mut State) -> bool {
    if key.kind != KeyEventKind::Press {
        return true;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        debug!("Processing exit terminal event '{:?}'...", key);
        return false;
    }
    if key.code == KeyCode::F(2) {
        state.toggle_log();
        return true;
    }
    match state.input_mode() {
        InputMode::Token => token_key(key, state),
        InputMode::Search => {
            search_key(key, state);
            true
        }
        InputMode::Goto => {
            goto_key(key, state);
            true
        }
        InputMode::Form => {
            form_key(key, state);
            true
        }
        InputMode::Access => {
            access_key(key, state);
            true
        }
        InputMode::Normal => normal_key(key, state),
    }
}

fn token_key(key: KeyEvent, state: &mut State) -> bool {
    match key.code {
        KeyCode::Esc => return false,
        KeyCode::Enter => {
            state.submit_token();
        }
        KeyCode::Backspace => {
            state.backspace_token();
        }
        KeyCode::Char(c) => {
            state.add_token_char(c);
        }
        _ => (),
    }
    true
}

fn search_key(key: KeyEvent, state: &mut State) {
    match key.code {
        KeyCode::Esc => {
            state.cancel_search();
        }
        KeyCode::Enter => {
            state.finish_search();
        }
        KeyCode::Backspace => {
            state.backspace_search();
        }
        KeyCode::Char(c) => {
            state.add_search_char(c);
        }
        _ => (),
    }
}

fn goto_key(key: KeyEvent, state: &mut State) {
    match key.code {
        KeyCode::Esc => {
            state.cancel_goto();
        }
        KeyCode::Enter => {
            state.submit_goto();
        }
        KeyCode::Backspace => {
            state.backspace_goto();
        }
        KeyCode::Char(c) => {
            state.add_goto_char(c);
        }
        _ => (),
    }
}

fn form_key(key: KeyEvent, state: &mut State) {
    match key.code {
        KeyCode::Esc => {
            state.close_dialog();
        }
        KeyCode::Enter => {
            state.submit_form();
        }
        _ => {
            if let Some(form) = state.active_screen_mut().and_then(|screen| screen.form_mut()) {
                let on_toggle = form
                    .focused_field()
                    .map_or(false, |field| field.kind == FieldKind::Toggle);
                match key.code {
                    KeyCode::Tab | KeyCode::Down => form.focus_next(),
                    KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
                    KeyCode::Backspace => form.backspace(),
                    KeyCode::Char(' ') if on_toggle => form.toggle(),
                    KeyCode::Left | KeyCode::Right if on_toggle => form.toggle(),
                    KeyCode::Char(c) => form.insert_char(c),
                    _ => (),
                }
            }
        }
    }
}

fn access_key(key: KeyEvent, state: &mut State) {
    match key.code {
        KeyCode::Esc => {
            state.close_access_editor();
        }
        KeyCode::Enter => {
            state.apply_access();
        }
        _ => {
            if let Some(editor) = state.access_editor_mut() {
                match key.code {
                    KeyCode::Char('j') | KeyCode::Down => editor.move_down(),
                    KeyCode::Char('k') | KeyCode::Up => editor.move_up(),
                    KeyCode::Char(' ') => editor.toggle(),
                    KeyCode::Tab => editor.next_section(),
                    _ => (),
                }
            }
        }
    }
}

fn normal_key(key: KeyEvent, state: &mut State) -> bool {
    let modal = state
        .active_screen()
        .map(|screen| screen.modal_view())
        .unwrap_or(ModalView::None);
    match modal {
        ModalView::DeleteConfirm { .. } => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    state.confirm_delete();
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    state.close_dialog();
                }
                _ => (),
            }
            return true;
        }
        ModalView::View { .. } => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('v')) {
                state.close_dialog();
            }
            return true;
        }
        ModalView::Form { .. } | ModalView::None => (),
    }

    match key.code {
        KeyCode::Char('q') => {
            debug!("Processing exit terminal event '{:?}'...", key);
            return false;
        }
        KeyCode::Tab => {
            state.toggle_focus();
        }
        KeyCode::Char('L') => {
            state.logout();
        }
        KeyCode::Char(':') => {
            state.start_goto();
        }
        KeyCode::Esc => {
            state.dismiss_notices();
        }
        _ => match state.current_focus() {
            Focus::Menu => menu_key(key, state),
            Focus::View => view_key(key, state),
        },
    }
    true
}

fn menu_key(key: KeyEvent, state: &mut State) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.next_menu_item();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.previous_menu_item();
        }
        KeyCode::Char('l') | KeyCode::Enter | KeyCode::Right => {
            state.select_menu_item();
        }
        _ => (),
    }
}

fn view_key(key: KeyEvent, state: &mut State) {
    let kind = match state.route().entity_kind() {
        Some(kind) => kind,
        None => return,
    };
    match key.code {
        KeyCode::Char('a') => {
            state.open_dialog(Action::Create);
        }
        KeyCode::Char('e') => {
            state.open_dialog(Action::Edit);
        }
        KeyCode::Char('d') => {
            state.open_dialog(Action::Delete);
        }
        KeyCode::Char('v') | KeyCode::Enter => {
            state.open_dialog(Action::View);
        }
        KeyCode::Char('R') => {
            state.open_dialog(Action::ManageAccess);
        }
        KeyCode::Char('r') => {
            state.refresh(kind);
        }
        KeyCode::Char('/') => {
            state.start_search();
        }
        _ => {
            let screen = state.screen_mut(kind);
            match key.code {
                KeyCode::Char('j') | KeyCode::Down => screen.select_next(),
                KeyCode::Char('k') | KeyCode::Up => screen.select_previous(),
                KeyCode::Char('l') | KeyCode::Right => screen.next_page(),
                KeyCode::Char('h') | KeyCode::Left => screen.previous_page(),
                KeyCode::Char(c @ '1'..='9') => {
                    if let Some(index) = c.to_digit(10) {
                        screen.sort_by_column(index as usize - 1);
                    }
                }
                _ => (),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::entity::{EntityKind, Status, User};
    use crate::logger::LogBuffer;
    use crate::router::Route;
    use std::sync::mpsc::channel;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn signed_in(roles: &[&str]) -> State {
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

    fn with_users(state: &mut State, count: usize) {
        let users = (0..count)
            .map(|i| User {
                id: i.to_string(),
                username: format!("user{:02}", i),
                full_name: format!("User {}", i),
                email: format!("user{}@example.com", i),
                roles: vec!["employee".to_string()],
                status: Status::Active,
                created_at: None,
                updated_at: None,
            })
            .collect();
        let generation = state.screen_mut(EntityKind::User).begin_fetch();
        state.users_mut().finish_fetch(generation, Ok(users));
    }

    #[test]
    fn test_ctrl_c_exits() {
        let mut state = signed_in(&["admin"]);
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(!handle_key(key, &mut state));
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut state = signed_in(&["admin"]);
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert!(handle_key(key, &mut state));
    }

    #[test]
    fn test_menu_navigation() {
        let mut state = signed_in(&["admin"]);
        assert!(handle_key(press(KeyCode::Tab), &mut state));
        assert_eq!(state.current_focus(), Focus::Menu);
        handle_key(press(KeyCode::Char('j')), &mut state);
        handle_key(press(KeyCode::Enter), &mut state);
        assert_eq!(state.route(), &Route::Employees);
        assert_eq!(state.current_focus(), Focus::View);
    }

    #[test]
    fn test_paging_and_search_keys() {
        let mut state = signed_in(&["admin"]);
        state.navigate("/users");
        with_users(&mut state, 25);
        handle_key(press(KeyCode::Char('l')), &mut state);
        handle_key(press(KeyCode::Char('l')), &mut state);
        handle_key(press(KeyCode::Char('l')), &mut state);
        assert_eq!(state.screen(EntityKind::User).current_page(), 3);

        handle_key(press(KeyCode::Char('/')), &mut state);
        assert_eq!(state.input_mode(), InputMode::Search);
        for c in "user07".chars() {
            handle_key(press(KeyCode::Char(c)), &mut state);
        }
        assert_eq!(state.screen(EntityKind::User).filtered_count(), 1);
        handle_key(press(KeyCode::Esc), &mut state);
        assert_eq!(state.screen(EntityKind::User).filtered_count(), 25);
        assert_eq!(state.input_mode(), InputMode::Normal);
    }

    #[test]
    fn test_delete_dialog_keys() {
        let mut state = signed_in(&["admin"]);
        state.navigate("/users");
        with_users(&mut state, 2);
        handle_key(press(KeyCode::Char('d')), &mut state);
        assert!(matches!(
            state.screen(EntityKind::User).modal_view(),
            ModalView::DeleteConfirm { .. }
        ));
        assert!(handle_key(press(KeyCode::Char('q')), &mut state));
        handle_key(press(KeyCode::Char('n')), &mut state);
        assert_eq!(state.screen(EntityKind::User).modal_view(), ModalView::None);
    }

    #[test]
    fn test_form_typing_and_escape() {
        let mut state = signed_in(&["admin"]);
        state.navigate("/users");
        handle_key(press(KeyCode::Char('a')), &mut state);
        assert_eq!(state.input_mode(), InputMode::Form);
        handle_key(press(KeyCode::Char('q')), &mut state);
        let typed = state
            .screen(EntityKind::User)
            .form()
            .map(|form| form.values().get("username").to_owned());
        assert_eq!(typed.as_deref(), Some("q"));
        handle_key(press(KeyCode::Esc), &mut state);
        assert_eq!(state.input_mode(), InputMode::Normal);
        assert!(state.screen(EntityKind::User).form().is_none());
    }

    #[test]
    fn test_goto_keys() {
        let mut state = signed_in(&["admin"]);
        handle_key(press(KeyCode::Char(':')), &mut state);
        for c in "cities".chars() {
            handle_key(press(KeyCode::Char(c)), &mut state);
        }
        handle_key(press(KeyCode::Enter), &mut state);
        assert_eq!(state.route(), &Route::Entity(EntityKind::City));
    }
}
