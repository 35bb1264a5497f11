use super::{centered_rect, Frame};
use crate::auth::AccessKind;
use crate::entity::{EntityKind, FieldKind};
use crate::screen::{FormState, ModalView};
use crate::state::State;
use crate::ui::theme::Theme;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Render the dialog open on the entity screen, if any, on top of the table.
///
pub fn entity_modal(frame: &mut Frame, size: Rect, state: &State, kind: EntityKind) {
    let screen = state.screen(kind);
    match screen.modal_view() {
        ModalView::None => (),
        ModalView::Form { title } => {
            if let Some(form) = screen.form() {
                let saving = screen.operation_loading();
                form_dialog(frame, size, state, &title, form, saving);
            }
        }
        ModalView::DeleteConfirm { label } => {
            delete_confirmation(frame, size, state, kind, &label, screen.operation_loading())
        }
        ModalView::View { details } => view_dialog(frame, size, state.theme(), kind, &details),
    }
}

fn dialog_block<'a>(title: String, border: Style) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, styling::active_block_title_style()))
        .border_style(border)
}

fn form_dialog(
    frame: &mut Frame,
    size: Rect,
    state: &State,
    title: &str,
    form: &FormState,
    saving: bool,
) {
    let theme = state.theme();
    let popup_area = centered_rect(60, 70, size);
    frame.render_widget(Clear, popup_area);

    let mut text = vec![Line::from("")];
    for (index, field) in form.fields().iter().enumerate() {
        let focused = index == form.focus();
        let label_style = if focused {
            styling::active_list_item_style(theme)
        } else {
            styling::normal_text_style(theme)
        };
        let required = if field.required { " *" } else { "" };
        text.push(Line::from(Span::styled(
            format!("{}{}", field.label, required),
            label_style,
        )));

        let value = form.values().get(field.key);
        let shown = match field.kind {
            FieldKind::Toggle => format!("  ◀ {} ▶", value),
            FieldKind::Text | FieldKind::List if focused => format!("  {}▏", value),
            FieldKind::Text | FieldKind::List => format!("  {}", value),
        };
        text.push(Line::from(Span::styled(shown, styling::normal_text_style(theme))));

        if let Some(error) = form.errors().get(field.key) {
            text.push(Line::from(Span::styled(
                format!("  {}", error),
                styling::error_text_style(theme),
            )));
        }
        text.push(Line::from(""));
    }

    let hint = if saving {
        format!("{} Saving...", spinner::frame(state))
    } else {
        "Tab: next field, Space: toggle status, Enter: save, Esc: cancel".to_string()
    };
    text.push(Line::from(Span::styled(hint, styling::muted_text_style(theme))));

    let paragraph = Paragraph::new(text)
        .block(dialog_block(
            title.to_string(),
            styling::active_block_border_style(theme),
        ))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup_area);
}

fn delete_confirmation(
    frame: &mut Frame,
    size: Rect,
    state: &State,
    kind: EntityKind,
    label: &str,
    deleting: bool,
) {
    let theme = state.theme();
    let popup_area = centered_rect(60, 25, size);
    frame.render_widget(Clear, popup_area);

    let display_name = if label.chars().count() > 45 {
        format!("{}...", label.chars().take(45).collect::<String>())
    } else {
        label.to_string()
    };

    let hint = if deleting {
        format!("{} Deleting...", spinner::frame(state))
    } else {
        "y: confirm, n: cancel".to_string()
    };
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Delete {}: \"{}\"?", kind.singular().to_lowercase(), display_name),
            Style::default()
                .fg(theme.text.to_color())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "This action cannot be undone.",
            Style::default()
                .fg(theme.warning.to_color())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(hint, styling::muted_text_style(theme))),
    ];

    let paragraph = Paragraph::new(text)
        .block(dialog_block(
            "Confirm Delete".to_string(),
            Style::default()
                .fg(theme.error.to_color())
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}

fn view_dialog(
    frame: &mut Frame,
    size: Rect,
    theme: &Theme,
    kind: EntityKind,
    details: &[(&'static str, String)],
) {
    let popup_area = centered_rect(60, 60, size);
    frame.render_widget(Clear, popup_area);

    let width = details.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let mut text = vec![Line::from("")];
    for (label, value) in details {
        text.push(Line::from(vec![
            Span::styled(
                format!("{:>width$}: ", label, width = width),
                styling::header_style(theme),
            ),
            Span::styled(value.clone(), styling::normal_text_style(theme)),
        ]));
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "Esc: close",
        styling::muted_text_style(theme),
    )));

    let paragraph = Paragraph::new(text)
        .block(dialog_block(
            format!("{} Details", kind.singular()),
            styling::active_block_border_style(theme),
        ))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup_area);
}

/// Render the roles, permissions and modules editor for one user.
///
pub fn access_editor(frame: &mut Frame, size: Rect, state: &State) {
    let editor = match state.access_editor() {
        Some(editor) => editor,
        None => return,
    };
    let theme = state.theme();
    let popup_area = centered_rect(50, 70, size);
    frame.render_widget(Clear, popup_area);

    let tabs: Vec<Span> = [AccessKind::Roles, AccessKind::Permissions, AccessKind::Modules]
        .into_iter()
        .flat_map(|section| {
            let name = match section {
                AccessKind::Roles => "Roles",
                AccessKind::Permissions => "Permissions",
                AccessKind::Modules => "Modules",
            };
            let style = if section == editor.section() {
                styling::active_list_item_style(theme).add_modifier(Modifier::UNDERLINED)
            } else {
                styling::muted_text_style(theme)
            };
            [Span::styled(name, style), Span::raw("  ")]
        })
        .collect();

    let mut text = vec![Line::from(""), Line::from(tabs), Line::from("")];
    for (index, (label, checked)) in editor.options().into_iter().enumerate() {
        let mark = if checked { "[x]" } else { "[ ]" };
        let style = if index == editor.cursor() {
            styling::selected_row_style(theme)
        } else {
            styling::normal_text_style(theme)
        };
        text.push(Line::from(Span::styled(format!(" {} {}", mark, label), style)));
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        format!("Applying requires {}", editor.required_permission()),
        styling::muted_text_style(theme),
    )));
    text.push(Line::from(Span::styled(
        "Tab: section, Space: toggle, Enter: apply, Esc: close",
        styling::muted_text_style(theme),
    )));

    let paragraph = Paragraph::new(text).block(dialog_block(
        format!("Access for {}", editor.display_name),
        styling::active_block_border_style(theme),
    ));
    frame.render_widget(paragraph, popup_area);
}
