use super::model::{
    JoinReceipt, LeaderboardEntry, LeaderboardScope, Team, TeamDraft, Tournament, TournamentDraft,
};
use crate::error::Result;
use crate::user::User;
use async_trait::async_trait;

/// Tournament, team and leaderboard endpoints.
#[async_trait]
pub trait CompetitionGateway: Send + Sync {
    async fn tournaments(&self) -> Result<Vec<Tournament>>;

    async fn join_tournament(
        &self,
        tournament_id: &str,
        team_id: Option<&str>,
    ) -> Result<JoinReceipt>;

    async fn leaderboard(
        &self,
        scope: &LeaderboardScope,
        limit: u32,
    ) -> Result<Vec<LeaderboardEntry>>;

    async fn teams(&self) -> Result<Vec<Team>>;

    async fn team(&self, team_id: &str) -> Result<Team>;

    async fn create_team(&self, draft: &TeamDraft) -> Result<Team>;

    async fn join_team(&self, team_id: &str) -> Result<JoinReceipt>;
}

/// Admin-only endpoints. The backend rejects non-admin callers.
#[async_trait]
pub trait AdminGateway: Send + Sync {
    async fn users(&self) -> Result<Vec<User>>;

    async fn create_tournament(&self, draft: &TournamentDraft) -> Result<Tournament>;
}
