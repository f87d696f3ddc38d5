use anyhow::Result;
use clap::{Parser, Subcommand};
use genlearn_core::feynman::{AnalogyQuery, Vote};
use genlearn_core::media::AvatarStyle;
use genlearn_core::session::VisualStyle;
use genlearn_core::social::{EntryType, TournamentDraft};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod context;
mod prompt;
mod render;

use context::AppContext;

#[derive(Parser)]
#[command(name = "genlearn")]
#[command(about = "GenLearn - AI-generated story lessons, quizzes and games", long_about = None)]
#[command(version)]
struct Cli {
    /// Backend base URL including the /api prefix
    #[arg(long, global = true, env = "GENLEARN_API_URL")]
    api_url: Option<String>,

    /// Configuration directory (defaults to the platform config dir)
    #[arg(long, global = true, env = "GENLEARN_HOME")]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the access token
    Login {
        username: String,
        /// Prompted for when omitted
        #[arg(long, env = "GENLEARN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored access token
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show or edit your profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Play an interactive story session
    Learn {
        topic: String,
        #[arg(short, long, default_value_t = 3)]
        difficulty: u8,
        #[arg(short, long, default_value_t = 15)]
        minutes: u32,
        #[arg(long, default_value = "cartoon")]
        style: VisualStyle,
        #[arg(long)]
        story_style: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
        #[arg(long = "character")]
        characters: Vec<String>,
        #[arg(long, conflicts_with = "tournament")]
        team: Option<String>,
        #[arg(long)]
        tournament: Option<String>,
    },
    /// Learning history, past sessions and teach-back sessions
    History {
        #[arg(short, long, default_value_t = 20)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Standalone quizzes for a session
    Quiz {
        #[command(subcommand)]
        action: QuizAction,
    },
    Tournaments {
        #[command(subcommand)]
        action: TournamentAction,
    },
    Teams {
        #[command(subcommand)]
        action: TeamAction,
    },
    Avatars {
        #[command(subcommand)]
        action: AvatarAction,
    },
    Characters {
        #[command(subcommand)]
        action: CharacterAction,
    },
    /// Chat with the learning assistant
    Chat {
        /// Single message; starts a conversation when omitted
        message: Option<String>,
    },
    /// Argue a position against the AI
    Debate {
        /// Picked from the topic list when omitted
        #[arg(long)]
        topic: Option<String>,
        /// YES or NO
        #[arg(long, default_value = "YES")]
        position: String,
    },
    /// Interview a historical figure
    Interview {
        /// Picked from the figure list when omitted
        #[arg(long)]
        figure: Option<String>,
    },
    /// Explain a topic to an AI student
    Teach {
        topic: String,
        #[arg(long, default_value = "curious_child")]
        persona: String,
    },
    /// Layered teach-back sessions, knowledge gaps and community analogies
    Feynman {
        #[command(subcommand)]
        action: FeynmanAction,
    },
    /// Synthesize speech to an audio file
    Speak {
        text: String,
        #[arg(short, long, default_value = "speech.mp3")]
        output: PathBuf,
    },
    /// Transcribe an audio file
    Transcribe {
        file: PathBuf,
        #[arg(long)]
        language: Option<String>,
    },
    /// Video generation status for a session cycle
    Video {
        session_id: String,
        #[arg(default_value_t = 1)]
        cycle: u32,
        /// Keep polling until the video is ready or has failed
        #[arg(short, long)]
        watch: bool,
    },
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    Show,
    Update {
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Subcommand)]
enum FeynmanAction {
    /// Teach a topic, one layer after another
    Teach {
        topic: String,
        #[arg(long)]
        subject: Option<String>,
        #[arg(short, long, default_value_t = 5)]
        difficulty: u8,
        /// 1 Ritty, 2 compression, 3 why spiral, 4 analogy, 5 lecture hall
        #[arg(short, long, default_value_t = 1)]
        layer: u8,
    },
    /// Knowledge gaps found while teaching
    Gaps {
        /// Mark a gap as resolved instead of listing
        #[arg(long)]
        resolve: Option<String>,
    },
    /// Browse the community analogy library
    Analogies {
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        featured: bool,
        #[arg(short, long, default_value_t = 20)]
        limit: u32,
    },
    /// Upvote or downvote an analogy
    Vote { analogy_id: String, vote: Vote },
}

#[derive(Subcommand)]
enum SettingsAction {
    Show,
    /// Keys: language, voice, full_vocal_mode, notifications, sound, auto_play_videos, theme
    Set { key: String, value: String },
    Reset,
}

#[derive(Subcommand)]
enum QuizAction {
    Mcq { session_id: String },
    Descriptive { session_id: String },
}

#[derive(Subcommand)]
enum TournamentAction {
    List,
    Join {
        tournament_id: String,
        #[arg(long)]
        team: Option<String>,
    },
    Leaderboard {
        /// Global leaderboard when omitted
        #[arg(long)]
        tournament: Option<String>,
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },
}

#[derive(Subcommand)]
enum TeamAction {
    List,
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value_t = 5)]
        max_members: u32,
        #[arg(long)]
        private: bool,
    },
    Join { team_id: String },
    Show { team_id: String },
}

#[derive(Subcommand)]
enum AvatarAction {
    List,
    Generate {
        name: String,
        prompt: String,
        #[arg(long, default_value = "cartoon")]
        style: AvatarStyle,
    },
    /// Turn a photo into an avatar
    Upload {
        name: String,
        file: PathBuf,
        #[arg(long, default_value = "cartoon")]
        style: AvatarStyle,
        #[arg(long, default_value = "")]
        prompt: String,
    },
    /// Make an avatar the active one
    Use { avatar_id: String },
    Delete { avatar_id: String },
}

#[derive(Subcommand)]
enum CharacterAction {
    List,
    Generate {
        name: String,
        prompt: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "cartoon")]
        style: AvatarStyle,
    },
    /// Turn a photo into a story character
    Upload {
        name: String,
        file: PathBuf,
        #[arg(long)]
        description: String,
        #[arg(long, default_value = "cartoon")]
        style: AvatarStyle,
        #[arg(long, default_value = "")]
        prompt: String,
    },
    Delete { character_id: String },
}

#[derive(Subcommand)]
enum AdminAction {
    /// List every registered user
    Users,
    Tournaments {
        #[command(subcommand)]
        action: AdminTournamentAction,
    },
}

#[derive(Subcommand)]
enum AdminTournamentAction {
    Create {
        name: String,
        topic: String,
        /// e.g. 2026-11-01T18:00:00
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(short, long, default_value_t = 5)]
        difficulty: u8,
        #[arg(long, default_value_t = 30)]
        duration: u32,
        #[arg(long, default_value_t = 100)]
        max_participants: u32,
        #[arg(long, default_value_t = 1)]
        team_min: u32,
        #[arg(long, default_value_t = 5)]
        team_max: u32,
        #[arg(long)]
        invite_only: bool,
        #[arg(long)]
        description: Option<String>,
    },
}

/// `RUST_LOG` wins; otherwise the configured level (`GENLEARN_LOG`) applies to
/// the genlearn crates.
fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("genlearn={},warn", default_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let ctx = AppContext::load(cli.home, cli.api_url)?;
    init_tracing(&ctx.config.log_level);

    match cli.command {
        Commands::Login { username, password } => {
            commands::account::login(&ctx, &username, password).await?
        }
        Commands::Logout => commands::account::logout(&ctx).await?,
        Commands::Whoami => commands::account::whoami(&ctx).await?,
        Commands::Profile { action } => match action {
            ProfileAction::Show => commands::account::profile_show(&ctx).await?,
            ProfileAction::Update {
                display_name,
                email,
            } => {
                let update = genlearn_core::user::ProfileUpdate {
                    display_name,
                    email,
                    ..Default::default()
                };
                commands::account::profile_update(&ctx, update).await?
            }
        },
        Commands::Learn {
            topic,
            difficulty,
            minutes,
            style,
            story_style,
            avatar,
            characters,
            team,
            tournament,
        } => {
            let mut config = genlearn_core::session::SessionConfig::new(topic, difficulty, minutes)
                .with_visual_style(style);
            if let Some(story_style) = story_style {
                config = config.with_story_style(story_style);
            }
            if let Some(avatar) = avatar {
                config = config.with_avatar(avatar);
            }
            if !characters.is_empty() {
                config = config.with_characters(characters);
            }
            if let Some(team) = team {
                config = config.for_team(team);
            }
            if let Some(tournament) = tournament {
                config = config.for_tournament(tournament);
            }
            commands::learn::run(&ctx, config).await?
        }
        Commands::History { limit, offset } => {
            commands::account::history(&ctx, limit, offset).await?
        }
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::account::settings_show(&ctx).await?,
            SettingsAction::Set { key, value } => {
                commands::account::settings_set(&ctx, &key, &value).await?
            }
            SettingsAction::Reset => commands::account::settings_reset(&ctx).await?,
        },
        Commands::Quiz { action } => match action {
            QuizAction::Mcq { session_id } => commands::quiz::mcq(&ctx, &session_id).await?,
            QuizAction::Descriptive { session_id } => {
                commands::quiz::descriptive(&ctx, &session_id).await?
            }
        },
        Commands::Tournaments { action } => match action {
            TournamentAction::List => commands::social::tournaments(&ctx).await?,
            TournamentAction::Join {
                tournament_id,
                team,
            } => commands::social::join_tournament(&ctx, &tournament_id, team.as_deref()).await?,
            TournamentAction::Leaderboard { tournament, limit } => {
                commands::social::leaderboard(&ctx, tournament, limit).await?
            }
        },
        Commands::Teams { action } => match action {
            TeamAction::List => commands::social::teams(&ctx).await?,
            TeamAction::Create {
                name,
                description,
                max_members,
                private,
            } => {
                commands::social::create_team(&ctx, name, description, max_members, private)
                    .await?
            }
            TeamAction::Join { team_id } => commands::social::join_team(&ctx, &team_id).await?,
            TeamAction::Show { team_id } => commands::social::show_team(&ctx, &team_id).await?,
        },
        Commands::Avatars { action } => match action {
            AvatarAction::List => commands::media::avatars(&ctx).await?,
            AvatarAction::Generate {
                name,
                prompt,
                style,
            } => commands::media::generate_avatar(&ctx, &name, &prompt, style).await?,
            AvatarAction::Upload {
                name,
                file,
                style,
                prompt,
            } => {
                let options = commands::media::PhotoOptions {
                    style,
                    prompt,
                    description: String::new(),
                };
                commands::media::upload_avatar(&ctx, &name, &file, options).await?
            }
            AvatarAction::Use { avatar_id } => {
                commands::media::use_avatar(&ctx, &avatar_id).await?
            }
            AvatarAction::Delete { avatar_id } => {
                commands::media::delete_avatar(&ctx, &avatar_id).await?
            }
        },
        Commands::Characters { action } => match action {
            CharacterAction::List => commands::media::characters(&ctx).await?,
            CharacterAction::Generate {
                name,
                prompt,
                description,
                style,
            } => {
                commands::media::generate_character(&ctx, name, prompt, description, style)
                    .await?
            }
            CharacterAction::Upload {
                name,
                file,
                description,
                style,
                prompt,
            } => {
                let options = commands::media::PhotoOptions {
                    style,
                    prompt,
                    description,
                };
                commands::media::upload_character(&ctx, &name, &file, options).await?
            }
            CharacterAction::Delete { character_id } => {
                commands::media::delete_character(&ctx, &character_id).await?
            }
        },
        Commands::Chat { message } => commands::features::chat(&ctx, message).await?,
        Commands::Debate { topic, position } => {
            commands::features::debate(&ctx, topic, &position).await?
        }
        Commands::Interview { figure } => commands::features::interview(&ctx, figure).await?,
        Commands::Teach { topic, persona } => {
            commands::features::teach(&ctx, &topic, &persona).await?
        }
        Commands::Feynman { action } => match action {
            FeynmanAction::Teach {
                topic,
                subject,
                difficulty,
                layer,
            } => commands::feynman::teach(&ctx, topic, subject, difficulty, layer).await?,
            FeynmanAction::Gaps { resolve } => commands::feynman::gaps(&ctx, resolve).await?,
            FeynmanAction::Analogies {
                topic,
                subject,
                featured,
                limit,
            } => {
                let query = AnalogyQuery {
                    topic,
                    subject,
                    featured_only: featured,
                    limit,
                };
                commands::feynman::analogies(&ctx, query).await?
            }
            FeynmanAction::Vote { analogy_id, vote } => {
                commands::feynman::vote(&ctx, &analogy_id, vote).await?
            }
        },
        Commands::Speak { text, output } => commands::media::speak(&ctx, &text, &output).await?,
        Commands::Transcribe { file, language } => {
            commands::media::transcribe(&ctx, &file, language).await?
        }
        Commands::Video {
            session_id,
            cycle,
            watch,
        } => commands::media::video(&ctx, &session_id, cycle, watch).await?,
        Commands::Admin { action } => match action {
            AdminAction::Users => commands::social::admin_users(&ctx).await?,
            AdminAction::Tournaments {
                action:
                    AdminTournamentAction::Create {
                        name,
                        topic,
                        start,
                        end,
                        difficulty,
                        duration,
                        max_participants,
                        team_min,
                        team_max,
                        invite_only,
                        description,
                    },
            } => {
                let draft = TournamentDraft {
                    name,
                    topic,
                    difficulty_level: difficulty,
                    start_datetime: start,
                    end_datetime: end,
                    duration_minutes: duration,
                    max_participants,
                    team_size_min: team_min,
                    team_size_max: team_max,
                    entry_type: if invite_only {
                        EntryType::InviteOnly
                    } else {
                        EntryType::Free
                    },
                    description,
                };
                commands::social::create_tournament(&ctx, draft).await?
            }
        },
    }

    Ok(())
}
