//! Login, session restore and logout.

use genlearn_core::auth::{AuthGateway, Credentials, TokenStore};
use genlearn_core::store::AuthState;
use genlearn_core::user::User;
use genlearn_core::{GenlearnError, Result};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Keeps [`AuthState`] and the persisted token in step.
///
/// The HTTP client clears the token store on its own when any call comes back
/// 401. [`is_authenticated`](Self::is_authenticated) and
/// [`load_user`](Self::load_user) pick that up and sign the state out.
pub struct AuthService {
    gateway: Arc<dyn AuthGateway>,
    tokens: Arc<dyn TokenStore>,
    state: Arc<RwLock<AuthState>>,
}

impl AuthService {
    /// Seeds the state from whatever token was persisted last time.
    pub fn new(gateway: Arc<dyn AuthGateway>, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let state = AuthState::with_token(tokens.load()?);
        Ok(Self {
            gateway,
            tokens,
            state: Arc::new(RwLock::new(state)),
        })
    }

    pub fn state(&self) -> Arc<RwLock<AuthState>> {
        self.state.clone()
    }

    /// Signs the state out when the stored token was cleared behind its back.
    async fn sync_with_store(&self) -> Result<()> {
        let stored = self.tokens.load()?;
        let mut state = self.state.write().await;
        if state.token().is_some() && stored.is_none() {
            debug!("Stored token was cleared; signing out");
            state.sign_out();
        }
        Ok(())
    }

    pub async fn is_authenticated(&self) -> Result<bool> {
        self.sync_with_store().await?;
        Ok(self.state.read().await.is_authenticated())
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let credentials = Credentials::new(username, password)?;
        self.state.write().await.set_loading(true);

        let response = match self.gateway.login(&credentials).await {
            Ok(response) => response,
            Err(e) => {
                let mut state = self.state.write().await;
                state.set_error(e.to_string());
                state.set_loading(false);
                return Err(e);
            }
        };

        self.tokens.save(&response.access_token)?;
        info!(user = %response.user.username, "Logged in");
        self.state
            .write()
            .await
            .sign_in(response.access_token, response.user.clone());
        Ok(response.user)
    }

    /// Resolves the signed-in user.
    ///
    /// Without a token this only marks loading as finished and yields `None`.
    /// A user already loaded is returned as is. When `/auth/me` fails the
    /// token and user are dropped.
    pub async fn load_user(&self) -> Result<Option<User>> {
        self.sync_with_store().await?;
        {
            let mut state = self.state.write().await;
            if state.token().is_none() {
                state.set_loading(false);
                return Ok(None);
            }
            if let Some(user) = state.user() {
                let user = user.clone();
                state.set_loading(false);
                return Ok(Some(user));
            }
        }

        match self.gateway.current_user().await {
            Ok(user) => {
                debug!(user = %user.username, "Restored signed-in user");
                let mut state = self.state.write().await;
                state.set_user(user.clone());
                state.set_loading(false);
                Ok(Some(user))
            }
            Err(e) => {
                warn!(error = %e, "Stored token rejected; signing out");
                if let Err(clear_err) = self.tokens.clear() {
                    warn!(error = %clear_err, "Failed to clear stored token");
                }
                let mut state = self.state.write().await;
                state.sign_out();
                state.set_error(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn logout(&self) -> Result<()> {
        self.tokens.clear()?;
        self.state.write().await.sign_out();
        info!("Logged out");
        Ok(())
    }

    /// The signed-in user, or `Unauthorized` when nobody is logged in.
    pub async fn require_user(&self) -> Result<User> {
        self.load_user().await?.ok_or_else(|| GenlearnError::Unauthorized {
            message: "Not logged in".into(),
        })
    }
}
