use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, RegisterField};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

use super::{button_line, input_line, message_line};

pub fn render(frame: &mut Frame, app: &App, _area: Rect) {
    let height = if app.register.error.is_some() { 15 } else { 13 };
    let area = centered_rect_fixed(48, height, frame.area());
    frame.render_widget(Clear, area);

    let form = &app.register;
    let mut lines = vec![Line::from("")];
    lines.push(input_line(
        "Username",
        &form.username,
        form.focus == RegisterField::Username,
        false,
    ));
    lines.push(input_line(
        "Email",
        &form.email,
        form.focus == RegisterField::Email,
        false,
    ));
    lines.push(input_line(
        "First name",
        &form.first_name,
        form.focus == RegisterField::FirstName,
        false,
    ));
    lines.push(input_line(
        "Last name",
        &form.last_name,
        form.focus == RegisterField::LastName,
        false,
    ));
    lines.push(input_line(
        "Password",
        &form.password,
        form.focus == RegisterField::Password,
        true,
    ));
    lines.push(input_line(
        "Confirm",
        &form.confirm,
        form.focus == RegisterField::Confirm,
        true,
    ));
    lines.push(Line::from(""));
    lines.push(button_line(
        "Create account",
        form.focus == RegisterField::Submit,
    ));

    if let Some(ref error) = form.error {
        lines.push(Line::from(""));
        lines.push(message_line(error, true));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Create account ")
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
