use ratatui::{
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, PasswordField};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

use super::{button_line, input_line, message_line};

/// Overlay form for changing the password while signed in.
pub fn render_change_overlay(frame: &mut Frame, app: &App) {
    let form = &app.password_form;
    let height = if form.error.is_some() { 11 } else { 9 };
    let area = centered_rect_fixed(48, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];
    lines.push(input_line(
        "Current",
        &form.current,
        form.focus == PasswordField::Current,
        true,
    ));
    lines.push(input_line(
        "New password",
        &form.new_password,
        form.focus == PasswordField::New,
        true,
    ));
    lines.push(input_line(
        "Confirm",
        &form.confirm,
        form.focus == PasswordField::Confirm,
        true,
    ));
    lines.push(Line::from(""));
    lines.push(button_line("Change", form.focus == PasswordField::Submit));

    if let Some(ref error) = form.error {
        lines.push(Line::from(""));
        lines.push(message_line(error, true));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Change password ")
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
