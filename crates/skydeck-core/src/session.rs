use serde::{Deserialize, Serialize};

use skydeck_auth::{AuthError, UserRegistry};

/// Current dashboard session context: who is logged in and which city
/// they are looking at.
///
/// Owned by the presentation layer and passed into core functions; the
/// core itself keeps no ambient login or city state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: Option<String>,
    pub selected_city: String,
}

impl Session {
    pub fn new(selected_city: impl Into<String>) -> Self {
        Self {
            username: None,
            selected_city: selected_city.into(),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.username.is_some()
    }

    /// Authenticate against the registry and bind the user to this session.
    pub fn login(
        &mut self,
        registry: &UserRegistry,
        username: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        if !registry.verify(username, password) {
            return Err(AuthError::InvalidCredentials);
        }
        tracing::info!("user {username} logged in");
        self.username = Some(username.to_string());
        Ok(())
    }

    pub fn logout(&mut self) {
        if let Some(username) = self.username.take() {
            tracing::info!("user {username} logged out");
        }
    }

    pub fn select_city(&mut self, name: impl Into<String>) {
        self.selected_city = name.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skydeck_auth::UserEntry;

    fn registry() -> UserRegistry {
        let password_hash = bcrypt::hash("hunter2", 4).unwrap();
        UserRegistry::from_entries(vec![UserEntry {
            username: "alice".to_string(),
            password_hash,
        }])
    }

    #[test]
    fn login_binds_the_user() {
        let mut session = Session::new("Cambridge, UK");
        assert!(!session.is_logged_in());

        session.login(&registry(), "alice", "hunter2").unwrap();
        assert!(session.is_logged_in());
        assert_eq!(session.username.as_deref(), Some("alice"));
    }

    #[test]
    fn failed_login_leaves_the_session_untouched() {
        let mut session = Session::new("Cambridge, UK");
        let err = session.login(&registry(), "alice", "wrong").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(!session.is_logged_in());
    }

    #[test]
    fn logout_clears_the_user_and_is_idempotent() {
        let mut session = Session::new("Cambridge, UK");
        session.login(&registry(), "alice", "hunter2").unwrap();

        session.logout();
        assert!(!session.is_logged_in());
        session.logout();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn city_selection_travels_with_the_session() {
        let mut session = Session::new("Cambridge, UK");
        session.select_city("Sydney, Australia");
        assert_eq!(session.selected_city, "Sydney, Australia");
    }
}
