use anyhow::Result;
use clap::{Parser, Subcommand};
use confsched_infrastructure::ConfigService;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "confsched")]
#[command(about = "confsched - conference schedule with favorites and feedback", long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the session dataset and replace the local copy
    Refresh,
    /// Print the schedule grouped by day, with facet summaries
    Contents {
        /// Only print this day (0-based)
        #[arg(long)]
        day: Option<i64>,
    },
    /// Toggle the favorite flag of a session
    Favorite {
        session_id: String,
    },
    /// Manage session feedback
    Feedback {
        #[command(subcommand)]
        action: FeedbackAction,
    },
}

#[derive(Subcommand)]
enum FeedbackAction {
    /// Show the stored feedback for a session
    Show { session_id: String },
    /// Update the stored feedback for a session
    Save {
        session_id: String,
        #[command(flatten)]
        ratings: commands::feedback::RatingArgs,
    },
    /// Send the stored feedback to the feedback form
    Submit { session_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = match &cli.config {
        Some(path) => ConfigService::with_path(path.clone()),
        None => ConfigService::new()?,
    };
    let config = config_service.get_config().await?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let ctx = commands::AppContext::build(&config).await?;

    match cli.command {
        Commands::Refresh => commands::refresh::run(&ctx).await?,
        Commands::Contents { day } => commands::contents::run(&ctx, day).await?,
        Commands::Favorite { session_id } => commands::favorite::run(&ctx, &session_id).await?,
        Commands::Feedback { action } => match action {
            FeedbackAction::Show { session_id } => {
                commands::feedback::show(&ctx, &session_id).await?
            }
            FeedbackAction::Save {
                session_id,
                ratings,
            } => commands::feedback::save(&ctx, &session_id, ratings).await?,
            FeedbackAction::Submit { session_id } => {
                commands::feedback::submit(&ctx, &session_id).await?
            }
        },
    }

    Ok(())
}
