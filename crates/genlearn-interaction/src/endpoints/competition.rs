//! `/tournaments/*`, `/teams/*` and `/admin/*` endpoints.

use crate::client::ApiClient;
use crate::decode::{decode_field, decode_list};
use async_trait::async_trait;
use genlearn_core::Result;
use genlearn_core::social::{
    AdminGateway, CompetitionGateway, JoinReceipt, LeaderboardEntry, LeaderboardScope, Team,
    TeamDraft, Tournament, TournamentDraft,
};
use genlearn_core::user::User;
use serde::Serialize;

#[derive(Serialize)]
struct JoinTournament<'a> {
    team_id: Option<&'a str>,
}

#[async_trait]
impl CompetitionGateway for ApiClient {
    async fn tournaments(&self) -> Result<Vec<Tournament>> {
        let path = "/tournaments/list";
        let value = self.get_value(path, &[]).await?;
        decode_list(path, value, &[])
    }

    async fn join_tournament(
        &self,
        tournament_id: &str,
        team_id: Option<&str>,
    ) -> Result<JoinReceipt> {
        self.post(
            &format!("/tournaments/{tournament_id}/join"),
            &JoinTournament { team_id },
        )
        .await
    }

    async fn leaderboard(
        &self,
        scope: &LeaderboardScope,
        limit: u32,
    ) -> Result<Vec<LeaderboardEntry>> {
        let path = "/tournaments/leaderboard";
        let mut query = vec![
            ("scope", scope.kind().to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(id) = scope.tournament_id() {
            query.push(("tournament_id", id.to_string()));
        }
        let value = self.get_value(path, &query).await?;
        decode_list(path, value, &[])
    }

    async fn teams(&self) -> Result<Vec<Team>> {
        let path = "/teams/list";
        let value = self.get_value(path, &[]).await?;
        decode_list(path, value, &[])
    }

    async fn team(&self, team_id: &str) -> Result<Team> {
        self.get(&format!("/teams/{team_id}"), &[]).await
    }

    async fn create_team(&self, draft: &TeamDraft) -> Result<Team> {
        draft.validate()?;
        self.post("/teams/create", draft).await
    }

    async fn join_team(&self, team_id: &str) -> Result<JoinReceipt> {
        self.post(&format!("/teams/{team_id}/join"), &serde_json::json!({}))
            .await
    }
}

#[async_trait]
impl AdminGateway for ApiClient {
    async fn users(&self) -> Result<Vec<User>> {
        let path = "/admin/users";
        let value = self.get_value(path, &[]).await?;
        decode_list(path, value, &[])
    }

    async fn create_tournament(&self, draft: &TournamentDraft) -> Result<Tournament> {
        draft.validate()?;
        let path = "/admin/tournaments/create";
        let value: serde_json::Value = self.post(path, draft).await?;
        decode_field(path, value, "tournament")
    }
}
