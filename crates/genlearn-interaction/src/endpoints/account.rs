//! `/auth/*`, `/users/*`, `/sessions` and teach-back history endpoints.

use crate::client::ApiClient;
use crate::decode::{SESSIONS_KEY, decode_list};
use async_trait::async_trait;
use genlearn_core::Result;
use genlearn_core::auth::{AuthGateway, Credentials, LoginResponse};
use genlearn_core::history::{
    HistoryEntry, HistoryGateway, Page, SessionRecord, TeachingSessionRecord,
};
use genlearn_core::user::{ProfileUpdate, User, UserGateway, UserSettings};

fn page_query(page: Page) -> [(&'static str, String); 2] {
    [
        ("limit", page.limit.to_string()),
        ("offset", page.offset.to_string()),
    ]
}

#[async_trait]
impl AuthGateway for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        self.post("/auth/login", credentials).await
    }

    async fn current_user(&self) -> Result<User> {
        self.get("/auth/me", &[]).await
    }
}

#[async_trait]
impl UserGateway for ApiClient {
    async fn profile(&self) -> Result<User> {
        self.get("/users/profile", &[]).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        self.put("/users/profile", update).await
    }

    async fn update_settings(&self, settings: &UserSettings) -> Result<UserSettings> {
        self.put("/users/settings", settings).await
    }
}

#[async_trait]
impl HistoryGateway for ApiClient {
    async fn learning_history(&self, page: Page) -> Result<Vec<HistoryEntry>> {
        let path = "/users/history";
        let value = self.get_value(path, &page_query(page)).await?;
        decode_list(path, value, &[])
    }

    async fn sessions(&self, page: Page) -> Result<Vec<SessionRecord>> {
        let path = "/sessions";
        let value = self.get_value(path, &page_query(page)).await?;
        decode_list(path, value, &[SESSIONS_KEY])
    }

    async fn teaching_sessions(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<TeachingSessionRecord>> {
        let path = format!("/feynman/sessions/user/{user_id}");
        let value = self
            .get_value(&path, &[("limit", limit.to_string())])
            .await?;
        decode_list(&path, value, &[SESSIONS_KEY])
    }
}
