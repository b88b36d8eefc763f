//! Pass-through credentials.

use std::fmt;
use zeroize::Zeroizing;

/// Username and password handed straight to a provider engine.
///
/// The password is zeroized when dropped and never appears in debug output;
/// nothing in this core stores it.
#[derive(Clone)]
pub struct Credentials {
    /// Account username.
    pub username: String,
    /// Account password, zeroized on drop.
    pub password: Zeroizing<String>,
}

impl Credentials {
    /// Wrap a username/password pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("sam@example.com", "hunter2");
        let debug = format!("{creds:?}");
        assert!(debug.contains("sam@example.com"));
        assert!(!debug.contains("hunter2"));
    }
}
