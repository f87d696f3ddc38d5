use crate::user::User;

/// Authentication state of the running client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    token: Option<String>,
    user: Option<User>,
    is_loading: bool,
    error: Option<String>,
}

impl AuthState {
    /// State at startup, before the stored token has been checked.
    pub fn with_token(token: Option<String>) -> Self {
        Self {
            token,
            is_loading: true,
            ..Self::default()
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    /// Records a successful login.
    pub fn sign_in(&mut self, token: impl Into<String>, user: User) {
        self.token = Some(token.into());
        self.user = Some(user);
        self.error = None;
        self.is_loading = false;
    }

    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Drops token and user.
    pub fn sign_out(&mut self) {
        self.token = None;
        self.user = None;
        self.is_loading = false;
    }
}
