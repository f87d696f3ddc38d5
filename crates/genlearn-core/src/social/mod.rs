//! Competition domain module: tournaments, teams, leaderboards and admin.

mod gateway;
mod model;

pub use gateway::{AdminGateway, CompetitionGateway};
pub use model::{
    EntryType, JoinReceipt, LeaderboardEntry, LeaderboardKind, LeaderboardScope, Team, TeamDraft,
    Tournament, TournamentDraft, TournamentStatus,
};
