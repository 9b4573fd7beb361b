//! How an identity is established.

use crate::domain::error::{MarqueeError, Result};
use crate::domain::UserIdentity;

/// Turns credentials into an identity.
pub trait Authenticator {
    /// Authenticates an existing account.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Auth`] when the credentials are rejected.
    fn log_in(&self, email: &str, password: &str) -> Result<UserIdentity>;

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Auth`] when the registration is rejected.
    fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<UserIdentity>;
}

/// Client-side authenticator that accepts any credentials.
///
/// There is no account service. The identity id is the current Unix time in
/// milliseconds, and a login without a name uses the email's local part.
/// Only an empty email is rejected, since it leaves nothing to show as a name.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalAuthenticator;

impl LocalAuthenticator {
    fn fabricate(name: &str, email: &str) -> Result<UserIdentity> {
        let email = email.trim();
        if email.is_empty() {
            return Err(MarqueeError::Auth("email is required".to_string()));
        }
        let name = match name.trim() {
            "" => local_part(email),
            given => given,
        };
        let id = chrono::Utc::now().timestamp_millis();
        tracing::debug!(user_id = id, user = %name, "fabricated local identity");
        Ok(UserIdentity::new(id, name, email))
    }
}

impl Authenticator for LocalAuthenticator {
    fn log_in(&self, email: &str, _password: &str) -> Result<UserIdentity> {
        Self::fabricate("", email)
    }

    fn sign_up(&self, name: &str, email: &str, _password: &str) -> Result<UserIdentity> {
        Self::fabricate(name, email)
    }
}

/// Everything before the first `@`.
fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_names_user_after_email_local_part() {
        let identity = LocalAuthenticator.log_in("grace@navy.mil", "hunter2").unwrap();
        assert_eq!(identity.name, "grace");
        assert_eq!(identity.email, "grace@navy.mil");
        assert!(identity.favorites.is_empty());
        assert!(identity.id > 0);
    }

    #[test]
    fn sign_up_keeps_given_name() {
        let identity = LocalAuthenticator
            .sign_up("Grace Hopper", "grace@navy.mil", "")
            .unwrap();
        assert_eq!(identity.name, "Grace Hopper");
    }

    #[test]
    fn empty_email_is_rejected() {
        assert!(matches!(
            LocalAuthenticator.log_in("  ", "pw"),
            Err(MarqueeError::Auth(_))
        ));
    }
}
