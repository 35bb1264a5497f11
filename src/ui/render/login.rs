use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub const BANNER: &str = "
  _                                                      _
 | |__   _ __  _ __ ___   ___        ___  ___  _ __  ___ ___ | | ___
 | '_ \\ | '__|| '_ ` _ \\ / __|_____ / __|/ _ \\| '_ \\/ __/ _ \\| |/ _ \\
 | | | || |   | | | | | |\\__ \\_____| (__| (_) | | | \\__ \\ (_) | |  __/
 |_| |_||_|   |_| |_| |_||___/      \\___|\\___/|_| |_|___/\\___/|_|\\___|
";

pub const INSTRUCTIONS: &str = "
Sign in to the HR management gateway.

Paste the bearer token issued for your account below and press Enter.
The token is stored in your config file until you log out.
";

/// Render the login screen with the masked token prompt.
///
pub fn login(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .title("HRMS Console - Sign In")
        .border_style(styling::active_block_border_style(theme));
    frame.render_widget(block, size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .margin(1)
        .split(size);

    let banner = Paragraph::new(Text::from(BANNER))
        .style(styling::banner_style(theme))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let instructions = Paragraph::new(INSTRUCTIONS)
        .style(styling::normal_text_style(theme))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(instructions, chunks[1]);

    let token_input = state.token_input();
    let input_text = if token_input.is_empty() {
        "Enter token here...".to_string()
    } else {
        "*".repeat(token_input.chars().count().min(50))
    };
    let error = state.login_error();
    let input_block = Block::default()
        .borders(Borders::ALL)
        .title(if error.is_some() {
            "Access Token (Enter to resubmit, Backspace to edit)"
        } else {
            "Access Token (Enter to submit, Esc to quit)"
        })
        .border_style(Style::default().fg(if error.is_some() {
            theme.error.to_color()
        } else {
            theme.warning.to_color()
        }));
    let input_style = if token_input.is_empty() {
        styling::muted_text_style(theme)
    } else {
        styling::normal_text_style(theme)
    };
    frame.render_widget(
        Paragraph::new(input_text).block(input_block).style(input_style),
        chunks[2],
    );

    let mut messages = vec![];
    if let Some(error) = error {
        messages.push(Line::styled(
            format!("ERROR: {}", error),
            styling::error_text_style(theme),
        ));
    }
    if let Some(notice) = state.banner() {
        messages.push(Line::styled(
            notice.message.clone(),
            styling::notice_style(theme, notice.level),
        ));
    }
    frame.render_widget(
        Paragraph::new(messages).alignment(Alignment::Center),
        chunks[3],
    );
}
