use anyhow::{Context, Result};
use colored::Colorize;
use genlearn_application::{AuthService, SettingsService};
use genlearn_core::auth::{Navigator, Route};
use genlearn_core::store::SettingsStore;
use genlearn_core::user::User;
use genlearn_infrastructure::{
    ClientConfig, FileTokenStore, GenlearnPaths, TomlSettingsRepository,
};
use genlearn_interaction::ApiClient;
use std::path::PathBuf;
use std::sync::Arc;

/// Terminal stand-in for screen navigation. Only the login redirect has a
/// visible effect: the user is told to log in again.
struct CliNavigator;

impl Navigator for CliNavigator {
    fn navigate(&self, route: Route) {
        if route == Route::Login {
            eprintln!(
                "{}",
                "Your session has expired. Run `genlearn login <username>` to sign in again."
                    .yellow()
            );
        }
    }
}

/// Everything a command needs, built once per invocation.
pub struct AppContext {
    pub config: ClientConfig,
    pub paths: GenlearnPaths,
    pub api: Arc<ApiClient>,
    tokens: Arc<FileTokenStore>,
}

impl AppContext {
    pub fn load(home: Option<PathBuf>, api_url: Option<String>) -> Result<Self> {
        let paths = match home {
            Some(root) => GenlearnPaths::with_root(root),
            None => GenlearnPaths::platform()?,
        };
        let mut config = ClientConfig::load(&paths.config_file())
            .with_context(|| format!("Failed to load {}", paths.config_file().display()))?;
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            config.api_base_url = url;
            config.validate()?;
        }

        let tokens = Arc::new(FileTokenStore::new(paths.auth_file()));
        let api = ApiClient::new(
            config.base_url(),
            &config.api_key,
            config.request_timeout(),
            tokens.clone(),
            Arc::new(CliNavigator),
        )?;

        Ok(Self {
            config,
            paths,
            api: Arc::new(api),
            tokens,
        })
    }

    pub fn auth(&self) -> Result<AuthService> {
        Ok(AuthService::new(self.api.clone(), self.tokens.clone())?)
    }

    pub fn settings(&self) -> Result<SettingsService> {
        let repository = Arc::new(TomlSettingsRepository::new(self.paths.settings_file()));
        let store = SettingsStore::rehydrate(repository)?;
        Ok(SettingsService::new(store, self.api.clone()))
    }

    /// The signed-in user; fails with a hint when nobody is logged in.
    pub async fn require_user(&self) -> Result<User> {
        self.auth()?
            .require_user()
            .await
            .context("This command needs a signed-in user. Run `genlearn login <username>` first")
    }
}
