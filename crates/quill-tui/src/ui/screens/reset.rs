use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, ResetConfirmField, ResetRequestField};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

use super::{button_line, input_line, message_line};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    match app.state {
        AppState::ResetRequest => render_request(frame, app, area),
        _ => render_confirm(frame, app, area),
    }
}

fn render_request(frame: &mut Frame, app: &App, _area: Rect) {
    let form = &app.reset_request;
    let extra = usize::from(form.error.is_some()) + usize::from(form.notice.is_some());
    let area = centered_rect_fixed(52, (10 + 2 * extra) as u16, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Enter your account email and we'll send a",
            styles::muted_style(),
        )),
        Line::from(Span::styled(
            "  link to reset your password.",
            styles::muted_style(),
        )),
        Line::from(""),
    ];
    lines.push(input_line(
        "Email",
        &form.email,
        form.focus == ResetRequestField::Email,
        false,
    ));
    lines.push(Line::from(""));
    lines.push(button_line(
        "Send reset email",
        form.focus == ResetRequestField::Submit,
    ));

    if let Some(ref notice) = form.notice {
        lines.push(Line::from(""));
        lines.push(message_line(notice, false));
    }
    if let Some(ref error) = form.error {
        lines.push(Line::from(""));
        lines.push(message_line(error, true));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Forgot password ")
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_confirm(frame: &mut Frame, app: &App, _area: Rect) {
    let form = &app.reset_confirm;
    let height = if form.error.is_some() { 13 } else { 11 };
    let area = centered_rect_fixed(52, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Paste the token from the reset email.",
            styles::muted_style(),
        )),
        Line::from(""),
    ];
    lines.push(input_line(
        "Reset token",
        &form.token,
        form.focus == ResetConfirmField::Token,
        false,
    ));
    lines.push(input_line(
        "New password",
        &form.new_password,
        form.focus == ResetConfirmField::New,
        true,
    ));
    lines.push(input_line(
        "Confirm",
        &form.confirm,
        form.focus == ResetConfirmField::Confirm,
        true,
    ));
    lines.push(Line::from(""));
    lines.push(button_line(
        "Reset password",
        form.focus == ResetConfirmField::Submit,
    ));

    if let Some(ref error) = form.error {
        lines.push(Line::from(""));
        lines.push(message_line(error, true));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Reset password ")
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
