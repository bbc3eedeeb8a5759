//! Application state for the quill TUI.
//!
//! Holds the auth context, the route-guard state machine, and the input
//! state for every form. Network operations run as background tasks that
//! are aborted on cancel; their outcomes arrive on an mpsc channel and are
//! applied between frames.

use chrono::NaiveDate;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

use quill_core::auth::{AuthContext, AuthOutcome, CredentialStore, SessionSnapshot};
use quill_core::config::Config;
use quill_core::models::{Profile, ProfileUpdate, RegisterRequest};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the operation result channel.
/// Operations run one at a time, so a small buffer is plenty.
const CHANNEL_BUFFER_SIZE: usize = 8;

/// Maximum length for username, email, and similar single-line inputs.
/// Matches the server's 150-char username cap.
const MAX_FIELD_LENGTH: usize = 150;

/// Maximum length for password inputs.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for the bio field; the server caps bios at 500 chars.
const MAX_BIO_LENGTH: usize = 500;

// ============================================================================
// Route guard
// ============================================================================

/// Route guard decision derived from session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Checking,
    Authenticated,
    Unauthenticated,
}

/// Decide where the session state allows the user to be.
pub fn resolve_gate(snapshot: &SessionSnapshot) -> Gate {
    if snapshot.loading {
        Gate::Checking
    } else if snapshot.authenticated {
        Gate::Authenticated
    } else {
        Gate::Unauthenticated
    }
}

// ============================================================================
// UI state types
// ============================================================================

/// Overall application state / current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Checking,
    Login,
    Register,
    ResetRequest,
    ResetConfirm,
    Home,
    EditingProfile,
    ChangingPassword,
    ConfirmingQuit,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
    Submit,
}

impl LoginField {
    pub fn next(self) -> Self {
        match self {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Submit,
            LoginField::Submit => LoginField::Username,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            LoginField::Username => LoginField::Submit,
            LoginField::Password => LoginField::Username,
            LoginField::Submit => LoginField::Password,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterField {
    #[default]
    Username,
    Email,
    FirstName,
    LastName,
    Password,
    Confirm,
    Submit,
}

impl RegisterField {
    pub fn next(self) -> Self {
        match self {
            RegisterField::Username => RegisterField::Email,
            RegisterField::Email => RegisterField::FirstName,
            RegisterField::FirstName => RegisterField::LastName,
            RegisterField::LastName => RegisterField::Password,
            RegisterField::Password => RegisterField::Confirm,
            RegisterField::Confirm => RegisterField::Submit,
            RegisterField::Submit => RegisterField::Username,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            RegisterField::Username => RegisterField::Submit,
            RegisterField::Email => RegisterField::Username,
            RegisterField::FirstName => RegisterField::Email,
            RegisterField::LastName => RegisterField::FirstName,
            RegisterField::Password => RegisterField::LastName,
            RegisterField::Confirm => RegisterField::Password,
            RegisterField::Submit => RegisterField::Confirm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileField {
    #[default]
    Bio,
    Phone,
    DateOfBirth,
    Submit,
}

impl ProfileField {
    pub fn next(self) -> Self {
        match self {
            ProfileField::Bio => ProfileField::Phone,
            ProfileField::Phone => ProfileField::DateOfBirth,
            ProfileField::DateOfBirth => ProfileField::Submit,
            ProfileField::Submit => ProfileField::Bio,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ProfileField::Bio => ProfileField::Submit,
            ProfileField::Phone => ProfileField::Bio,
            ProfileField::DateOfBirth => ProfileField::Phone,
            ProfileField::Submit => ProfileField::DateOfBirth,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordField {
    #[default]
    Current,
    New,
    Confirm,
    Submit,
}

impl PasswordField {
    pub fn next(self) -> Self {
        match self {
            PasswordField::Current => PasswordField::New,
            PasswordField::New => PasswordField::Confirm,
            PasswordField::Confirm => PasswordField::Submit,
            PasswordField::Submit => PasswordField::Current,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            PasswordField::Current => PasswordField::Submit,
            PasswordField::New => PasswordField::Current,
            PasswordField::Confirm => PasswordField::New,
            PasswordField::Submit => PasswordField::Confirm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetRequestField {
    #[default]
    Email,
    Submit,
}

impl ResetRequestField {
    pub fn next(self) -> Self {
        match self {
            ResetRequestField::Email => ResetRequestField::Submit,
            ResetRequestField::Submit => ResetRequestField::Email,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetConfirmField {
    #[default]
    Token,
    New,
    Confirm,
    Submit,
}

impl ResetConfirmField {
    pub fn next(self) -> Self {
        match self {
            ResetConfirmField::Token => ResetConfirmField::New,
            ResetConfirmField::New => ResetConfirmField::Confirm,
            ResetConfirmField::Confirm => ResetConfirmField::Submit,
            ResetConfirmField::Submit => ResetConfirmField::Token,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ResetConfirmField::Token => ResetConfirmField::Submit,
            ResetConfirmField::New => ResetConfirmField::Token,
            ResetConfirmField::Confirm => ResetConfirmField::New,
            ResetConfirmField::Submit => ResetConfirmField::Confirm,
        }
    }
}

// ============================================================================
// Form state
// ============================================================================

#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub confirm: String,
    pub focus: RegisterField,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct ProfileForm {
    pub bio: String,
    pub phone: String,
    /// Free-text date input, validated as YYYY-MM-DD on submit
    pub date_of_birth: String,
    pub focus: ProfileField,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct PasswordForm {
    pub current: String,
    pub new_password: String,
    pub confirm: String,
    pub focus: PasswordField,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct ResetRequestForm {
    pub email: String,
    pub focus: ResetRequestField,
    pub error: Option<String>,
    /// Confirmation shown after the server accepted the request
    pub notice: Option<String>,
}

#[derive(Debug, Default)]
pub struct ResetConfirmForm {
    pub token: String,
    pub new_password: String,
    pub confirm: String,
    pub focus: ResetConfirmField,
    pub error: Option<String>,
}

/// Build the partial update for the profile editor: only fields that
/// differ from the cached profile are sent. A blank date keeps the current
/// value.
pub fn build_profile_update(form: &ProfileForm, current: &Profile) -> Result<ProfileUpdate, String> {
    let mut update = ProfileUpdate::default();

    if form.bio != current.bio {
        update.bio = Some(form.bio.clone());
    }
    if form.phone != current.phone_number {
        update.phone_number = Some(form.phone.clone());
    }

    let dob_input = form.date_of_birth.trim();
    if !dob_input.is_empty() {
        match NaiveDate::parse_from_str(dob_input, "%Y-%m-%d") {
            Ok(date) => {
                if current.date_of_birth != Some(date) {
                    update.date_of_birth = Some(date);
                }
            }
            Err(_) => return Err("Date of birth must be YYYY-MM-DD".to_string()),
        }
    }

    Ok(update)
}

// ============================================================================
// Background operation results
// ============================================================================

/// Results from background auth operations, applied between frames.
#[derive(Debug)]
pub enum AuthEvent {
    /// The one-per-process startup session check finished
    SessionChecked,
    LoginFinished {
        username: String,
        outcome: AuthOutcome,
    },
    RegisterFinished(AuthOutcome),
    LogoutFinished(AuthOutcome),
    ProfileRefreshed(AuthOutcome),
    ProfileSaved(AuthOutcome),
    PasswordChanged(AuthOutcome),
    ResetRequested(AuthOutcome),
    ResetConfirmed(AuthOutcome),
}

// ============================================================================
// Main application struct
// ============================================================================

pub struct App {
    pub config: Config,
    pub auth: AuthContext,

    pub state: AppState,
    /// Session state as of the start of this frame
    pub session: SessionSnapshot,

    pub login: LoginForm,
    pub register: RegisterForm,
    pub profile_form: ProfileForm,
    pub password_form: PasswordForm,
    pub reset_request: ResetRequestForm,
    pub reset_confirm: ResetConfirmForm,

    pub status_message: Option<String>,

    events_rx: mpsc::Receiver<AuthEvent>,
    events_tx: mpsc::Sender<AuthEvent>,
    /// The in-flight operation, if any. Aborting it guarantees a late
    /// response can no longer touch app state.
    pending: Option<JoinHandle<()>>,
    submitting: bool,
}

impl App {
    pub fn new(config: Config, auth: AuthContext) -> Self {
        let (events_tx, events_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        // Prefill credentials from env vars, then the config and keychain
        let username = std::env::var("QUILL_USERNAME")
            .ok()
            .or_else(|| config.last_username.clone())
            .unwrap_or_default();
        let password = std::env::var("QUILL_PASSWORD")
            .ok()
            .or_else(|| {
                if username.is_empty() {
                    None
                } else {
                    CredentialStore::load(&username)
                }
            })
            .unwrap_or_default();

        let login = LoginForm {
            focus: if username.is_empty() {
                LoginField::Username
            } else {
                LoginField::Password
            },
            username,
            password,
            error: None,
        };

        Self {
            config,
            auth,
            state: AppState::Checking,
            session: SessionSnapshot::default(),
            login,
            register: RegisterForm::default(),
            profile_form: ProfileForm::default(),
            password_form: PasswordForm::default(),
            reset_request: ResetRequestForm::default(),
            reset_confirm: ResetConfirmForm::default(),
            status_message: None,
            events_rx,
            events_tx,
            pending: None,
            submitting: false,
        }
    }

    /// True when an operation is in flight.
    pub fn busy(&self) -> bool {
        self.submitting
    }

    /// Refresh the cached snapshot used for rendering.
    pub async fn sync_session(&mut self) {
        self.session = self.auth.snapshot().await;
    }

    /// Kick off the one-per-process session restoration check.
    pub fn start_session_check(&mut self) {
        let ctx = self.auth.clone();
        let tx = self.events_tx.clone();
        self.submitting = true;
        self.pending = Some(tokio::spawn(async move {
            ctx.initialize().await;
            let _ = tx.send(AuthEvent::SessionChecked).await;
        }));
    }

    fn spawn_op<F>(&mut self, fut: F)
    where
        F: std::future::Future<Output = AuthEvent> + Send + 'static,
    {
        if self.submitting {
            return;
        }
        self.submitting = true;
        let tx = self.events_tx.clone();
        self.pending = Some(tokio::spawn(async move {
            let event = fut.await;
            let _ = tx.send(event).await;
        }));
    }

    /// Abort the in-flight operation so a late response cannot touch the
    /// session after the user navigated away.
    pub fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.submitting = false;
        self.status_message = Some("Cancelled".to_string());
    }

    // =========================================================================
    // Form submissions
    // =========================================================================

    pub fn submit_login(&mut self) {
        let username = self.login.username.trim().to_string();
        let password = self.login.password.clone();
        if username.is_empty() || password.is_empty() {
            self.login.error = Some("Username and password are required".to_string());
            return;
        }
        self.login.error = None;

        let ctx = self.auth.clone();
        self.spawn_op(async move {
            let outcome = ctx.login(&username, &password).await;
            if outcome.success {
                CredentialStore::save(&username, &password);
            }
            AuthEvent::LoginFinished { username, outcome }
        });
    }

    pub fn submit_register(&mut self) {
        if self.register.username.trim().is_empty()
            || self.register.email.trim().is_empty()
            || self.register.password.is_empty()
        {
            self.register.error = Some("Username, email, and password are required".to_string());
            return;
        }
        if self.register.password != self.register.confirm {
            self.register.error = Some("Passwords do not match".to_string());
            return;
        }
        self.register.error = None;

        let request = RegisterRequest {
            username: self.register.username.trim().to_string(),
            email: self.register.email.trim().to_string(),
            first_name: self.register.first_name.trim().to_string(),
            last_name: self.register.last_name.trim().to_string(),
            password: self.register.password.clone(),
            password_confirm: self.register.confirm.clone(),
        };
        let ctx = self.auth.clone();
        self.spawn_op(async move { AuthEvent::RegisterFinished(ctx.register(&request).await) });
    }

    pub fn submit_logout(&mut self) {
        let ctx = self.auth.clone();
        self.spawn_op(async move { AuthEvent::LogoutFinished(ctx.logout().await) });
    }

    pub fn refresh_profile(&mut self) {
        let ctx = self.auth.clone();
        self.spawn_op(async move { AuthEvent::ProfileRefreshed(ctx.fetch_profile().await) });
    }

    /// Open the profile editor seeded from the cached profile.
    pub fn open_profile_editor(&mut self) {
        let profile = self.session.profile.clone().unwrap_or_default();
        self.profile_form = ProfileForm {
            bio: profile.bio,
            phone: profile.phone_number,
            date_of_birth: profile
                .date_of_birth
                .map(|d| d.to_string())
                .unwrap_or_default(),
            focus: ProfileField::Bio,
            error: None,
        };
        self.state = AppState::EditingProfile;
    }

    pub fn submit_profile(&mut self) {
        let current = self.session.profile.clone().unwrap_or_default();
        match build_profile_update(&self.profile_form, &current) {
            Ok(update) => {
                self.profile_form.error = None;
                let ctx = self.auth.clone();
                self.spawn_op(
                    async move { AuthEvent::ProfileSaved(ctx.update_profile(&update).await) },
                );
            }
            Err(message) => self.profile_form.error = Some(message),
        }
    }

    pub fn open_password_editor(&mut self) {
        self.password_form = PasswordForm::default();
        self.state = AppState::ChangingPassword;
    }

    pub fn submit_password_change(&mut self) {
        if self.password_form.new_password != self.password_form.confirm {
            self.password_form.error = Some("New passwords do not match".to_string());
            return;
        }
        self.password_form.error = None;

        let old_password = self.password_form.current.clone();
        let new_password = self.password_form.new_password.clone();
        let confirm = self.password_form.confirm.clone();
        let ctx = self.auth.clone();
        self.spawn_op(async move {
            AuthEvent::PasswordChanged(ctx.change_password(&old_password, &new_password, &confirm).await)
        });
    }

    pub fn submit_reset_request(&mut self) {
        let email = self.reset_request.email.trim().to_string();
        if email.is_empty() {
            self.reset_request.error = Some("Email address is required".to_string());
            return;
        }
        self.reset_request.error = None;

        let ctx = self.auth.clone();
        self.spawn_op(
            async move { AuthEvent::ResetRequested(ctx.request_password_reset(&email).await) },
        );
    }

    pub fn submit_reset_confirm(&mut self) {
        if self.reset_confirm.new_password != self.reset_confirm.confirm {
            self.reset_confirm.error = Some("Passwords do not match".to_string());
            return;
        }
        self.reset_confirm.error = None;

        let token = self.reset_confirm.token.trim().to_string();
        let new_password = self.reset_confirm.new_password.clone();
        let confirm = self.reset_confirm.confirm.clone();
        let ctx = self.auth.clone();
        self.spawn_op(async move {
            AuthEvent::ResetConfirmed(ctx.confirm_password_reset(&token, &new_password, &confirm).await)
        });
    }

    // =========================================================================
    // Event application
    // =========================================================================

    /// Apply results from finished operations without blocking the loop.
    pub async fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            // Refresh the snapshot first so routing sees the new state
            self.session = self.auth.snapshot().await;
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: AuthEvent) {
        self.submitting = false;
        self.pending = None;

        match event {
            AuthEvent::SessionChecked => match resolve_gate(&self.session) {
                Gate::Authenticated => {
                    let name = self
                        .session
                        .user
                        .as_ref()
                        .map(|u| u.username.clone())
                        .unwrap_or_default();
                    self.status_message = Some(format!("Welcome back, {name}"));
                    self.state = AppState::Home;
                }
                _ => self.state = AppState::Login,
            },
            AuthEvent::LoginFinished { username, outcome } => {
                if outcome.success {
                    self.config.last_username = Some(username);
                    if let Err(e) = self.config.save() {
                        warn!(error = %e, "Failed to save config");
                    }
                    self.login.password.clear();
                    self.login.error = None;
                    self.status_message = Some(outcome.message);
                    self.state = AppState::Home;
                } else {
                    self.login.error = Some(outcome.message);
                }
            }
            AuthEvent::RegisterFinished(outcome) => {
                if outcome.success {
                    self.register = RegisterForm::default();
                    self.status_message = Some(outcome.message);
                    self.state = AppState::Home;
                } else {
                    self.register.error = Some(outcome.message);
                }
            }
            AuthEvent::LogoutFinished(outcome) => {
                self.status_message = Some(outcome.message);
                self.login.password.clear();
                self.login.error = None;
                self.state = AppState::Login;
            }
            AuthEvent::ProfileRefreshed(outcome) => {
                self.status_message = Some(outcome.message);
            }
            AuthEvent::ProfileSaved(outcome) => {
                if outcome.success {
                    self.status_message = Some(outcome.message);
                    self.state = AppState::Home;
                } else {
                    self.profile_form.error = Some(outcome.message);
                }
            }
            AuthEvent::PasswordChanged(outcome) => {
                if outcome.success {
                    self.password_form = PasswordForm::default();
                    self.status_message = Some(outcome.message);
                    self.state = AppState::Home;
                } else {
                    self.password_form.error = Some(outcome.message);
                }
            }
            AuthEvent::ResetRequested(outcome) => {
                if outcome.success {
                    self.reset_request.notice = Some(outcome.message);
                    self.reset_request.error = None;
                } else {
                    self.reset_request.error = Some(outcome.message);
                }
            }
            AuthEvent::ResetConfirmed(outcome) => {
                if outcome.success {
                    self.reset_confirm = ResetConfirmForm::default();
                    self.status_message = Some(outcome.message);
                    self.state = AppState::Login;
                } else {
                    self.reset_confirm.error = Some(outcome.message);
                }
            }
        }
    }
}

// ============================================================================
// Input validation helpers (used by input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a single-line field character should be accepted
pub fn can_add_field_char(current_len: usize, c: char) -> bool {
    current_len < MAX_FIELD_LENGTH && is_valid_input_char(c)
}

/// Check if a password character should be accepted
pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

/// Check if a bio character should be accepted
pub fn can_add_bio_char(current_len: usize, c: char) -> bool {
    current_len < MAX_BIO_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(loading: bool, authenticated: bool) -> SessionSnapshot {
        SessionSnapshot {
            loading,
            authenticated,
            ..Default::default()
        }
    }

    // -------------------------------------------------------------------------
    // Route guard tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_gate_checking_while_loading() {
        assert_eq!(resolve_gate(&snapshot(true, false)), Gate::Checking);
        // Loading wins even if a user is already present
        assert_eq!(resolve_gate(&snapshot(true, true)), Gate::Checking);
    }

    #[test]
    fn test_gate_after_loading() {
        assert_eq!(resolve_gate(&snapshot(false, true)), Gate::Authenticated);
        assert_eq!(resolve_gate(&snapshot(false, false)), Gate::Unauthenticated);
    }

    // -------------------------------------------------------------------------
    // Field cycling tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_login_field_cycle() {
        assert_eq!(LoginField::Username.next(), LoginField::Password);
        assert_eq!(LoginField::Password.next(), LoginField::Submit);
        assert_eq!(LoginField::Submit.next(), LoginField::Username); // Wraps around
        assert_eq!(LoginField::Username.prev(), LoginField::Submit);
    }

    #[test]
    fn test_register_field_cycle_covers_all_fields() {
        let mut field = RegisterField::Username;
        let mut seen = 0;
        loop {
            seen += 1;
            field = field.next();
            if field == RegisterField::Username {
                break;
            }
        }
        assert_eq!(seen, 7);
        assert_eq!(RegisterField::Username.prev(), RegisterField::Submit);
    }

    #[test]
    fn test_password_field_cycle() {
        assert_eq!(PasswordField::Current.next(), PasswordField::New);
        assert_eq!(PasswordField::Submit.next(), PasswordField::Current);
        assert_eq!(PasswordField::Current.prev(), PasswordField::Submit);
    }

    // -------------------------------------------------------------------------
    // Input validation tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_can_add_field_char() {
        assert!(can_add_field_char(0, 'a'));
        assert!(can_add_field_char(149, 'z'));
        assert!(!can_add_field_char(150, 'a'));
        // Control characters rejected
        assert!(!can_add_field_char(0, '\x00'));
        assert!(!can_add_field_char(0, '\n'));
    }

    #[test]
    fn test_can_add_password_char() {
        assert!(can_add_password_char(127, '!'));
        assert!(!can_add_password_char(128, 'a'));
        assert!(!can_add_password_char(0, '\r'));
    }

    #[test]
    fn test_can_add_bio_char() {
        assert!(can_add_bio_char(499, '.'));
        assert!(!can_add_bio_char(500, '.'));
    }

    // -------------------------------------------------------------------------
    // Profile diff tests
    // -------------------------------------------------------------------------

    fn current_profile() -> Profile {
        Profile {
            bio: "old bio".to_string(),
            phone_number: "555-0100".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 4),
            ..Default::default()
        }
    }

    fn form_matching(profile: &Profile) -> ProfileForm {
        ProfileForm {
            bio: profile.bio.clone(),
            phone: profile.phone_number.clone(),
            date_of_birth: profile
                .date_of_birth
                .map(|d| d.to_string())
                .unwrap_or_default(),
            ..Default::default()
        }
    }

    #[test]
    fn test_profile_diff_unchanged_is_empty() {
        let current = current_profile();
        let form = form_matching(&current);
        let update = build_profile_update(&form, &current).expect("diff");
        assert!(update.is_empty());
    }

    #[test]
    fn test_profile_diff_only_changed_fields() {
        let current = current_profile();
        let mut form = form_matching(&current);
        form.bio = "new bio".to_string();

        let update = build_profile_update(&form, &current).expect("diff");
        assert_eq!(update.bio.as_deref(), Some("new bio"));
        assert!(update.phone_number.is_none());
        assert!(update.date_of_birth.is_none());
    }

    #[test]
    fn test_profile_diff_blank_date_keeps_current() {
        let current = current_profile();
        let mut form = form_matching(&current);
        form.date_of_birth = String::new();

        let update = build_profile_update(&form, &current).expect("diff");
        assert!(update.date_of_birth.is_none());
    }

    #[test]
    fn test_profile_diff_new_date() {
        let current = current_profile();
        let mut form = form_matching(&current);
        form.date_of_birth = "2001-12-24".to_string();

        let update = build_profile_update(&form, &current).expect("diff");
        assert_eq!(
            update.date_of_birth,
            NaiveDate::from_ymd_opt(2001, 12, 24)
        );
    }

    #[test]
    fn test_profile_diff_rejects_bad_date() {
        let current = current_profile();
        let mut form = form_matching(&current);
        form.date_of_birth = "24/12/2001".to_string();

        let err = build_profile_update(&form, &current).expect_err("bad date");
        assert!(err.contains("YYYY-MM-DD"));
    }
}
