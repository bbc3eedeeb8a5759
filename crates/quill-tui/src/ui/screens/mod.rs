//! Per-screen rendering.

pub mod login;
pub mod password;
pub mod profile;
pub mod register;
pub mod reset;

use ratatui::text::{Line, Span};

use super::styles;

/// Visible width of text input fields
const FIELD_WIDTH: usize = 24;

/// One labelled input line for a dialog form. Long values scroll so the
/// end of the input stays visible.
pub(crate) fn input_line(label: &str, value: &str, focused: bool, mask: bool) -> Line<'static> {
    let visible: String = if mask {
        "*".repeat(value.chars().count().min(FIELD_WIDTH))
    } else {
        let chars: Vec<char> = value.chars().collect();
        let start = chars.len().saturating_sub(FIELD_WIDTH);
        chars[start..].iter().collect()
    };
    let display = format!("{:<width$}", visible, width = FIELD_WIDTH);
    let cursor = if focused { "▌" } else { " " };
    let style = if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };

    Line::from(vec![
        Span::styled(format!("  {:>13}: [", label), styles::muted_style()),
        Span::styled(format!("{display}{cursor}"), style),
        Span::styled("]", styles::muted_style()),
    ])
}

/// A submit button line.
pub(crate) fn button_line(label: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let text = if focused {
        format!(" ▶ {label} ◀ ")
    } else {
        format!("   {label}   ")
    };

    Line::from(vec![
        Span::raw("            ["),
        Span::styled(text, style),
        Span::raw("]"),
    ])
}

/// An error or notice line under a form.
pub(crate) fn message_line(message: &str, error: bool) -> Line<'static> {
    let style = if error {
        styles::error_style()
    } else {
        styles::success_style()
    };
    Line::from(Span::styled(format!("  {message}"), style))
}
