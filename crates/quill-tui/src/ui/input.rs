//! Keyboard input handling for the TUI.
//!
//! Translates key events into form edits, focus moves, and submissions.
//! While an operation is in flight only Esc is accepted, which aborts the
//! background task so a late response can never race the form state.

use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{
    can_add_bio_char, can_add_field_char, can_add_password_char, App, AppState, LoginField,
    PasswordField, ProfileField, RegisterField, ResetConfirmField, ResetRequestField,
};

/// Handle a key event. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    if app.busy() {
        if key.code == KeyCode::Esc && app.state != AppState::Checking {
            app.cancel_pending();
        }
        return false;
    }

    // Any keypress dismisses the previous status line
    app.status_message = None;

    match app.state {
        AppState::Checking => false,
        AppState::Login => handle_login_input(app, key),
        AppState::Register => {
            handle_register_input(app, key);
            false
        }
        AppState::ResetRequest => {
            handle_reset_request_input(app, key);
            false
        }
        AppState::ResetConfirm => {
            handle_reset_confirm_input(app, key);
            false
        }
        AppState::Home => {
            handle_home_input(app, key);
            false
        }
        AppState::EditingProfile => {
            handle_profile_input(app, key);
            false
        }
        AppState::ChangingPassword => {
            handle_password_input(app, key);
            false
        }
        AppState::ConfirmingQuit => handle_quit_confirm_input(app, key),
        AppState::Quitting => true,
    }
}

fn handle_login_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            // Quit from the login screen
            app.state = AppState::Quitting;
            return true;
        }
        KeyCode::F(2) => {
            app.register.error = None;
            app.state = AppState::Register;
        }
        KeyCode::F(3) => {
            app.reset_request.error = None;
            app.state = AppState::ResetRequest;
        }
        KeyCode::Down | KeyCode::Tab => app.login.focus = app.login.focus.next(),
        KeyCode::Up | KeyCode::BackTab => app.login.focus = app.login.focus.prev(),
        KeyCode::Enter => match app.login.focus {
            LoginField::Username => app.login.focus = LoginField::Password,
            LoginField::Password => app.login.focus = LoginField::Submit,
            LoginField::Submit => app.submit_login(),
        },
        KeyCode::Backspace => match app.login.focus {
            LoginField::Username => {
                app.login.username.pop();
            }
            LoginField::Password => {
                app.login.password.pop();
            }
            LoginField::Submit => {}
        },
        KeyCode::Char(c) => match app.login.focus {
            LoginField::Username => {
                if can_add_field_char(app.login.username.len(), c) {
                    app.login.username.push(c);
                }
            }
            LoginField::Password => {
                if can_add_password_char(app.login.password.len(), c) {
                    app.login.password.push(c);
                }
            }
            LoginField::Submit => {}
        },
        _ => {}
    }
    false
}

/// The focused register input, with whether it is masked.
fn register_active_field(app: &mut App) -> Option<(&mut String, bool)> {
    let form = &mut app.register;
    match form.focus {
        RegisterField::Username => Some((&mut form.username, false)),
        RegisterField::Email => Some((&mut form.email, false)),
        RegisterField::FirstName => Some((&mut form.first_name, false)),
        RegisterField::LastName => Some((&mut form.last_name, false)),
        RegisterField::Password => Some((&mut form.password, true)),
        RegisterField::Confirm => Some((&mut form.confirm, true)),
        RegisterField::Submit => None,
    }
}

fn handle_register_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.state = AppState::Login,
        KeyCode::Down | KeyCode::Tab => app.register.focus = app.register.focus.next(),
        KeyCode::Up | KeyCode::BackTab => app.register.focus = app.register.focus.prev(),
        KeyCode::Enter => {
            if app.register.focus == RegisterField::Submit {
                app.submit_register();
            } else {
                app.register.focus = app.register.focus.next();
            }
        }
        KeyCode::Backspace => {
            if let Some((field, _)) = register_active_field(app) {
                field.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some((field, masked)) = register_active_field(app) {
                let accepted = if masked {
                    can_add_password_char(field.len(), c)
                } else {
                    can_add_field_char(field.len(), c)
                };
                if accepted {
                    field.push(c);
                }
            }
        }
        _ => {}
    }
}

fn handle_reset_request_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.state = AppState::Login,
        KeyCode::F(2) => {
            app.reset_confirm.error = None;
            app.state = AppState::ResetConfirm;
        }
        KeyCode::Down | KeyCode::Tab | KeyCode::Up | KeyCode::BackTab => {
            app.reset_request.focus = app.reset_request.focus.next();
        }
        KeyCode::Enter => match app.reset_request.focus {
            ResetRequestField::Email => app.reset_request.focus = ResetRequestField::Submit,
            ResetRequestField::Submit => app.submit_reset_request(),
        },
        KeyCode::Backspace => {
            if app.reset_request.focus == ResetRequestField::Email {
                app.reset_request.email.pop();
            }
        }
        KeyCode::Char(c) => {
            if app.reset_request.focus == ResetRequestField::Email
                && can_add_field_char(app.reset_request.email.len(), c)
            {
                app.reset_request.email.push(c);
            }
        }
        _ => {}
    }
}

/// The focused reset-confirm input, with whether it is masked.
fn reset_confirm_active_field(app: &mut App) -> Option<(&mut String, bool)> {
    let form = &mut app.reset_confirm;
    match form.focus {
        ResetConfirmField::Token => Some((&mut form.token, false)),
        ResetConfirmField::New => Some((&mut form.new_password, true)),
        ResetConfirmField::Confirm => Some((&mut form.confirm, true)),
        ResetConfirmField::Submit => None,
    }
}

fn handle_reset_confirm_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.state = AppState::ResetRequest,
        KeyCode::Down | KeyCode::Tab => app.reset_confirm.focus = app.reset_confirm.focus.next(),
        KeyCode::Up | KeyCode::BackTab => app.reset_confirm.focus = app.reset_confirm.focus.prev(),
        KeyCode::Enter => {
            if app.reset_confirm.focus == ResetConfirmField::Submit {
                app.submit_reset_confirm();
            } else {
                app.reset_confirm.focus = app.reset_confirm.focus.next();
            }
        }
        KeyCode::Backspace => {
            if let Some((field, _)) = reset_confirm_active_field(app) {
                field.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some((field, masked)) = reset_confirm_active_field(app) {
                let accepted = if masked {
                    can_add_password_char(field.len(), c)
                } else {
                    can_add_field_char(field.len(), c)
                };
                if accepted {
                    field.push(c);
                }
            }
        }
        _ => {}
    }
}

fn handle_home_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('e') => app.open_profile_editor(),
        KeyCode::Char('p') => app.open_password_editor(),
        KeyCode::Char('r') => app.refresh_profile(),
        KeyCode::Char('l') => app.submit_logout(),
        KeyCode::Char('q') | KeyCode::Esc => app.state = AppState::ConfirmingQuit,
        _ => {}
    }
}

fn handle_profile_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.state = AppState::Home,
        KeyCode::Down | KeyCode::Tab => app.profile_form.focus = app.profile_form.focus.next(),
        KeyCode::Up | KeyCode::BackTab => app.profile_form.focus = app.profile_form.focus.prev(),
        KeyCode::Enter => {
            if app.profile_form.focus == ProfileField::Submit {
                app.submit_profile();
            } else {
                app.profile_form.focus = app.profile_form.focus.next();
            }
        }
        KeyCode::Backspace => match app.profile_form.focus {
            ProfileField::Bio => {
                app.profile_form.bio.pop();
            }
            ProfileField::Phone => {
                app.profile_form.phone.pop();
            }
            ProfileField::DateOfBirth => {
                app.profile_form.date_of_birth.pop();
            }
            ProfileField::Submit => {}
        },
        KeyCode::Char(c) => match app.profile_form.focus {
            ProfileField::Bio => {
                if can_add_bio_char(app.profile_form.bio.len(), c) {
                    app.profile_form.bio.push(c);
                }
            }
            ProfileField::Phone => {
                if can_add_field_char(app.profile_form.phone.len(), c) {
                    app.profile_form.phone.push(c);
                }
            }
            ProfileField::DateOfBirth => {
                if can_add_field_char(app.profile_form.date_of_birth.len(), c) {
                    app.profile_form.date_of_birth.push(c);
                }
            }
            ProfileField::Submit => {}
        },
        _ => {}
    }
}

/// The focused password-change input; every field is masked.
fn password_active_field(app: &mut App) -> Option<&mut String> {
    let form = &mut app.password_form;
    match form.focus {
        PasswordField::Current => Some(&mut form.current),
        PasswordField::New => Some(&mut form.new_password),
        PasswordField::Confirm => Some(&mut form.confirm),
        PasswordField::Submit => None,
    }
}

fn handle_password_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.state = AppState::Home,
        KeyCode::Down | KeyCode::Tab => app.password_form.focus = app.password_form.focus.next(),
        KeyCode::Up | KeyCode::BackTab => app.password_form.focus = app.password_form.focus.prev(),
        KeyCode::Enter => {
            if app.password_form.focus == PasswordField::Submit {
                app.submit_password_change();
            } else {
                app.password_form.focus = app.password_form.focus.next();
            }
        }
        KeyCode::Backspace => {
            if let Some(field) = password_active_field(app) {
                field.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(field) = password_active_field(app) {
                if can_add_password_char(field.len(), c) {
                    field.push(c);
                }
            }
        }
        _ => {}
    }
}

fn handle_quit_confirm_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            app.state = AppState::Quitting;
            true
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.state = AppState::Home;
            false
        }
        _ => false,
    }
}
