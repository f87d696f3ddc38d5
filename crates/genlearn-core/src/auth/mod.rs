//! Authentication domain: credentials, token persistence and navigation.
//!
//! The HTTP wrapper reacts to a `401` by clearing the [`TokenStore`] and
//! sending the presentation layer to [`Route::Login`] through the injected
//! [`Navigator`].

use crate::error::{GenlearnError, Result};
use crate::user::User;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let username = username.into().trim().to_string();
        let password = password.into();
        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(GenlearnError::validation(format!(
                "Username must be at least {} characters",
                MIN_USERNAME_LEN
            )));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(GenlearnError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(Self { username, password })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Screens the client can be sent to from outside the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Route {
    Login,
    Dashboard,
    Learn,
    History,
    Settings,
}

/// Presentation-layer navigation hook.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Persistence for the bearer token.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;

    fn save(&self, token: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    async fn current_user(&self) -> Result<User>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_validation() {
        assert!(Credentials::new("ab", "password1").is_err());
        assert!(Credentials::new("asha", "short").is_err());
        let creds = Credentials::new("  asha ", "password1").unwrap();
        assert_eq!(creds.username, "asha");
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("asha", "hunter2hunter2").unwrap();
        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_route_display() {
        assert_eq!(Route::Login.to_string(), "login");
    }
}
