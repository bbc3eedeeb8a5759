use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, LoginField};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

use super::{button_line, input_line, message_line};

pub fn render(frame: &mut Frame, app: &App, _area: Rect) {
    let height = if app.login.error.is_some() { 14 } else { 12 };
    let area = centered_rect_fixed(48, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            "       ╔═╗ ╦ ╦ ╦ ╦  ╦  ",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            "       ║ ║ ║ ║ ║ ║  ║  ",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            "       ╚═╩╗╚═╝ ╩ ╩═╝╩═╝",
            styles::title_style(),
        )),
        Line::from(""),
    ];

    lines.push(input_line(
        "Username",
        &app.login.username,
        app.login.focus == LoginField::Username,
        false,
    ));
    lines.push(input_line(
        "Password",
        &app.login.password,
        app.login.focus == LoginField::Password,
        true,
    ));
    lines.push(Line::from(""));
    lines.push(button_line("Sign in", app.login.focus == LoginField::Submit));

    if let Some(ref error) = app.login.error {
        lines.push(Line::from(""));
        lines.push(message_line(error, true));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Sign in ")
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
