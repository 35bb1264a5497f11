use crate::screen::NoticeLevel;
use crate::ui::theme::Theme;
use ratatui::style::{Modifier, Style};

/// Return the border style for active blocks.
///
pub fn active_block_border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.border_active.to_color())
}

/// Return the border style for normal blocks.
///
pub fn normal_block_border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.border_normal.to_color())
}

/// Return the title style for active blocks.
///
pub fn active_block_title_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Return the style for current list items.
///
pub fn current_list_item_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.text.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for active list items.
///
pub fn active_list_item_style(theme: &Theme) -> Style {
    current_list_item_style(theme).fg(theme.primary.to_color())
}

/// Return the style for the highlighted table row.
///
pub fn selected_row_style(theme: &Theme) -> Style {
    Style::default()
        .bg(theme.highlight_bg.to_color())
        .fg(theme.highlight_fg.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for table headers.
///
pub fn header_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.secondary.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for normal text.
///
pub fn normal_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.text.to_color())
}

/// Return the style for hints and placeholders.
///
pub fn muted_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.text_muted.to_color())
}

/// Return the style for the banner.
///
pub fn banner_style(theme: &Theme) -> Style {
    Style::default().fg(theme.banner.to_color())
}

/// Return the style for a notice of the given level.
///
pub fn notice_style(theme: &Theme, level: NoticeLevel) -> Style {
    let color = match level {
        NoticeLevel::Success => theme.success,
        NoticeLevel::Warning => theme.warning,
        NoticeLevel::Error => theme.error,
    };
    Style::default()
        .fg(color.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for validation messages.
///
pub fn error_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.error.to_color())
}
