use keyring::Entry;
use tracing::debug;

/// Keychain service name for remembered passwords
const SERVICE_NAME: &str = "quill-tui";

/// Optional "remember me" storage backed by the OS keychain.
///
/// Failures are logged and swallowed: a missing keychain backend must
/// never block signing in.
pub struct CredentialStore;

impl CredentialStore {
    /// Remember the password for a username.
    pub fn save(username: &str, password: &str) {
        match Entry::new(SERVICE_NAME, username) {
            Ok(entry) => {
                if let Err(e) = entry.set_password(password) {
                    debug!(error = %e, "Could not store password in keychain");
                }
            }
            Err(e) => debug!(error = %e, "Could not open keychain entry"),
        }
    }

    /// Look up a remembered password.
    pub fn load(username: &str) -> Option<String> {
        let entry = Entry::new(SERVICE_NAME, username).ok()?;
        entry.get_password().ok()
    }
}
