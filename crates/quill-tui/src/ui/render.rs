use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState};

use super::screens;
use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_content(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    // Overlays
    match app.state {
        AppState::EditingProfile => screens::profile::render_edit_overlay(frame, app),
        AppState::ChangingPassword => screens::password::render_change_overlay(frame, app),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        _ => {}
    }
}

fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.state {
        AppState::Checking => render_checking(frame, area),
        AppState::Login => screens::login::render(frame, app, area),
        AppState::Register => screens::register::render(frame, app, area),
        AppState::ResetRequest | AppState::ResetConfirm => screens::reset::render(frame, app, area),
        AppState::Home
        | AppState::EditingProfile
        | AppState::ChangingPassword
        | AppState::ConfirmingQuit => screens::profile::render(frame, app, area),
        AppState::Quitting => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Quill";
    let account = match &app.session.user {
        Some(user) => format!("{} ", user.username),
        None => "not signed in ".to_string(),
    };

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(title.len() + account.len() + 1),
        )),
        Span::styled(account, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_checking(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled("Checking session...", styles::muted_style())),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let text = if app.busy() {
        " Working... press Esc to cancel".to_string()
    } else if let Some(ref message) = app.status_message {
        format!(" {}", message)
    } else {
        format!(" {}", key_hints(app.state))
    };

    frame.render_widget(
        Paragraph::new(Line::from(Span::raw(text))).style(styles::status_bar_style()),
        area,
    );
}

fn key_hints(state: AppState) -> &'static str {
    match state {
        AppState::Login => {
            "[Tab] Next field  [Enter] Sign in  [F2] Register  [F3] Forgot password  [Esc] Quit"
        }
        AppState::Register => "[Tab] Next field  [Enter] Create account  [Esc] Back",
        AppState::ResetRequest => "[Enter] Send reset email  [F2] I have a token  [Esc] Back",
        AppState::ResetConfirm => "[Tab] Next field  [Enter] Reset password  [Esc] Back",
        AppState::Home => {
            "[e] Edit profile  [p] Change password  [r] Refresh  [l] Sign out  [q] Quit"
        }
        AppState::EditingProfile => "[Tab] Next field  [Enter] Save  [Esc] Cancel",
        AppState::ChangingPassword => "[Tab] Next field  [Enter] Change  [Esc] Cancel",
        AppState::Checking | AppState::ConfirmingQuit | AppState::Quitting => "",
    }
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(34, 5, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::raw("     Quit quill? [y/n]")),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Fixed-size rect centered in `area`, clamped to fit
pub(crate) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}
