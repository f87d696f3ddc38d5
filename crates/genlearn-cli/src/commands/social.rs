use crate::context::AppContext;
use crate::render;
use anyhow::{Result, bail};
use colored::Colorize;
use genlearn_core::social::{
    AdminGateway, CompetitionGateway, LeaderboardScope, TeamDraft, TournamentDraft,
};

pub async fn tournaments(ctx: &AppContext) -> Result<()> {
    let tournaments = ctx.api.tournaments().await?;
    render::heading("Tournaments");
    if tournaments.is_empty() {
        render::info("No tournaments right now.");
    }
    for t in &tournaments {
        let status = if t.is_full() {
            "full".bright_black()
        } else if t.status.is_joinable() {
            t.status.to_string().green()
        } else {
            t.status.to_string().bright_black()
        };
        println!(
            "  {}  {}  [{}]  {}/{} players  level {}",
            t.tournament_id.bright_black(),
            t.name.bold(),
            status,
            t.current_participants,
            t.max_participants,
            t.difficulty_level
        );
        println!("      {} · {} → {}", t.topic, t.start_datetime, t.end_datetime);
        if let Some(prize) = &t.prize_1st {
            println!("      1st prize: {}", prize);
        }
    }
    Ok(())
}

pub async fn join_tournament(
    ctx: &AppContext,
    tournament_id: &str,
    team_id: Option<&str>,
) -> Result<()> {
    ctx.require_user().await?;
    let receipt = ctx.api.join_tournament(tournament_id, team_id).await?;
    render::success(&receipt.message);
    Ok(())
}

pub async fn leaderboard(ctx: &AppContext, tournament: Option<String>, limit: u32) -> Result<()> {
    let scope = match tournament {
        Some(id) => LeaderboardScope::Tournament(id),
        None => LeaderboardScope::Global,
    };
    let entries = ctx.api.leaderboard(&scope, limit).await?;
    render::heading(&format!("Leaderboard ({})", scope.kind()));
    for entry in &entries {
        let rank = format!("#{:<3}", entry.rank);
        let rank = match entry.rank {
            1 => rank.bright_yellow().bold(),
            2 | 3 => rank.bright_white().bold(),
            _ => rank.normal(),
        };
        println!("  {} {:<28} {:>6}", rank, entry.display_name, entry.score);
    }
    Ok(())
}

pub async fn teams(ctx: &AppContext) -> Result<()> {
    let teams = ctx.api.teams().await?;
    render::heading("Teams");
    if teams.is_empty() {
        render::info("No teams yet. Create one with `genlearn teams create <name>`.");
    }
    for team in &teams {
        let lock = if team.is_private { " (private)" } else { "" };
        println!(
            "  {}  {}{}  {}/{} members  {} pts",
            team.team_id.bright_black(),
            team.team_name.bold(),
            lock,
            team.current_members,
            team.max_members,
            team.total_score
        );
    }
    Ok(())
}

pub async fn show_team(ctx: &AppContext, team_id: &str) -> Result<()> {
    let team = ctx.api.team(team_id).await?;
    render::heading(&team.team_name);
    println!("  id        {}", team.team_id.bright_black());
    println!("  members   {}/{}", team.current_members, team.max_members);
    println!("  score     {}", team.total_score);
    println!("  private   {}", if team.is_private { "yes" } else { "no" });
    if let Some(description) = &team.description {
        println!("  {}", description);
    }
    Ok(())
}

pub async fn create_team(
    ctx: &AppContext,
    name: String,
    description: Option<String>,
    max_members: u32,
    private: bool,
) -> Result<()> {
    ctx.require_user().await?;
    let draft = TeamDraft {
        description,
        max_members,
        is_private: private,
        ..TeamDraft::new(name)
    };
    let team = ctx.api.create_team(&draft).await?;
    render::success(&format!("Created team {} ({}).", team.team_name, team.team_id));
    Ok(())
}

pub async fn join_team(ctx: &AppContext, team_id: &str) -> Result<()> {
    ctx.require_user().await?;
    let receipt = ctx.api.join_team(team_id).await?;
    render::success(&receipt.message);
    Ok(())
}

pub async fn admin_users(ctx: &AppContext) -> Result<()> {
    let user = ctx.require_user().await?;
    if !user.is_admin() {
        bail!("Only administrators can list users");
    }
    let users = ctx.api.users().await?;
    render::heading(&format!("Users ({})", users.len()));
    for u in &users {
        println!(
            "  {}  {:<20} {:<24} level {:<3} {} XP  {}",
            u.user_id.bright_black(),
            u.username,
            u.display_name,
            u.computed_level(),
            u.xp_points,
            u.role
        );
    }
    Ok(())
}

pub async fn create_tournament(ctx: &AppContext, draft: TournamentDraft) -> Result<()> {
    let user = ctx.require_user().await?;
    if !user.is_admin() {
        bail!("Only administrators can create tournaments");
    }
    let tournament = ctx.api.create_tournament(&draft).await?;
    render::success(&format!(
        "Created tournament {} ({}), {} to {}.",
        tournament.name,
        tournament.tournament_id,
        tournament.start_datetime,
        tournament.end_datetime
    ));
    Ok(())
}
