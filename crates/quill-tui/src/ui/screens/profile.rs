use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, ProfileField};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;
use crate::utils::format;

use super::{button_line, input_line, message_line};

/// The signed-in home view: account and profile details.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Profile ")
        .border_style(styles::border_style(true));

    let Some(ref user) = app.session.user else {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "  Signed out",
                styles::muted_style(),
            )))
            .block(block),
            area,
        );
        return;
    };
    let profile = app.session.profile.clone().unwrap_or_default();

    let mut lines = vec![Line::from("")];
    lines.push(detail_line("Username", &user.username));
    lines.push(detail_line("Name", &user.full_name()));
    lines.push(detail_line("Email", &user.email));
    lines.push(detail_line(
        "Member since",
        &format::optional_datetime(user.date_joined.as_ref()),
    ));
    lines.push(detail_line(
        "Verified",
        if profile.is_verified { "yes" } else { "no" },
    ));
    lines.push(Line::from(""));
    lines.push(detail_line(
        "Bio",
        if profile.bio.is_empty() {
            "(none)"
        } else {
            profile.bio.as_str()
        },
    ));
    lines.push(detail_line(
        "Phone",
        if profile.phone_number.is_empty() {
            "(none)"
        } else {
            profile.phone_number.as_str()
        },
    ));
    lines.push(detail_line(
        "Birthday",
        &format::optional_date(profile.date_of_birth.as_ref()),
    ));
    if let Some(ref avatar) = profile.avatar {
        lines.push(detail_line("Avatar", avatar));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn detail_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:>13}: ", label), styles::muted_style()),
        Span::styled(value.to_string(), styles::list_item_style()),
    ])
}

/// Overlay form for editing bio, phone, and date of birth.
pub fn render_edit_overlay(frame: &mut Frame, app: &App) {
    let form = &app.profile_form;
    let height = if form.error.is_some() { 11 } else { 9 };
    let area = centered_rect_fixed(48, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];
    lines.push(input_line(
        "Bio",
        &form.bio,
        form.focus == ProfileField::Bio,
        false,
    ));
    lines.push(input_line(
        "Phone",
        &form.phone,
        form.focus == ProfileField::Phone,
        false,
    ));
    lines.push(input_line(
        "Birthday",
        &form.date_of_birth,
        form.focus == ProfileField::DateOfBirth,
        false,
    ));
    lines.push(Line::from(""));
    lines.push(button_line("Save", form.focus == ProfileField::Submit));

    if let Some(ref error) = form.error {
        lines.push(Line::from(""));
        lines.push(message_line(error, true));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Edit profile ")
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
