use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use track_sync_models::MediaType;
use track_sync_settings::PathManager;

mod commands;
mod context;
mod hooks;
mod logging;
mod store;

#[derive(Parser)]
#[command(name = "tracksync")]
#[command(about = "Sync your local watched history with a Trakt account")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Write logs to the application log directory instead of stderr
    #[arg(long, global = true)]
    log_to_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with a device code and run an initial sync
    #[command(
        long_about = "Request a device code from the tracker, display it for out-of-band approval, then poll until the account is linked. A successful sign-in runs a full watched sync."
    )]
    Auth,

    /// Pull the remote watched history into the local database
    #[command(
        long_about = "Replace the local watched database with the remote watched history. The startup activity gate is bypassed: a manual sync always runs."
    )]
    Sync {
        /// Also force the host watchlist refresh
        #[arg(long, action = ArgAction::SetTrue)]
        force_watchlist: bool,
    },

    /// Look up saved playback progress for a media item
    Playback {
        /// IMDB id for movies, TVDB id for episodes
        id: String,

        /// Kind of media the id refers to
        #[arg(long, value_enum, default_value = "movie")]
        kind: MediaKind,
    },

    /// Show session and sync state
    Status,

    /// Sign out and clear the stored session
    Disconnect,

    /// Store tracker API credentials
    #[command(
        long_about = "Store the tracker API client id and secret used for device-code sign-in. Create an API application at https://trakt.tv/oauth/applications to obtain them."
    )]
    Config {
        #[arg(long)]
        client_id: Option<String>,

        #[arg(long)]
        client_secret: Option<String>,

        /// Show the stored configuration instead of changing it
        #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["client_id", "client_secret"])]
        show: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MediaKind {
    Movie,
    Episode,
}

impl From<MediaKind> for MediaType {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Movie => MediaType::Movie,
            MediaKind::Episode => MediaType::Episode,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = PathManager::default();
    let log_file = cli.log_to_file.then(|| paths.log_file());
    logging::init_logging(cli.verbose, cli.quiet, log_file)?;

    match cli.command {
        Commands::Auth => commands::auth::run(&paths).await,
        Commands::Sync { force_watchlist } => commands::sync::run(&paths, force_watchlist).await,
        Commands::Playback { id, kind } => {
            commands::playback::run(&paths, kind.into(), &id).await
        }
        Commands::Status => commands::status::run(&paths),
        Commands::Disconnect => commands::disconnect::run(&paths),
        Commands::Config {
            client_id,
            client_secret,
            show,
        } => commands::config::run(&paths, client_id, client_secret, show),
    }
}
