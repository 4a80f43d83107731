mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::act::Act;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "review",
    about = "Proposal review board: rate and rank proposals",
    version,
    propagate_version = true
)]
struct Cli {
    /// Board root (default: auto-detect from .review/)
    #[arg(long, global = true, env = "REVIEW_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Reviewer identity recorded on ratings and comments
    #[arg(long, short = 'u', global = true, env = "REVIEW_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a review board in the current directory
    Init {
        /// Board name (default: directory name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Show all proposals grouped by subcategory, best rated first
    Board,

    /// Show ratings and comments for one proposal
    Show { id: String },

    /// Rate a proposal
    Rate { id: String, score: f64 },

    /// Withdraw your rating of a proposal
    Retract { id: String },

    /// Comment on a proposal
    Comment { id: String, text: String },

    /// Remove your latest comment, if it is still the last one on the proposal
    Uncomment { id: String },

    /// Serve the board over HTTP
    Serve {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "3141")]
        port: u16,

        /// Open the board in a browser
        #[arg(long)]
        open: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let user = cli.user.as_deref();

    let result = match cli.command {
        Commands::Init { name } => cmd::init::run(&root, name.as_deref()),
        Commands::Board => cmd::board::run(&root, user, cli.json),
        Commands::Show { id } => cmd::show::run(&root, &id, user, cli.json),
        Commands::Rate { id, score } => cmd::act::run(&root, &id, user, Act::Rate(score), cli.json),
        Commands::Retract { id } => cmd::act::run(&root, &id, user, Act::Retract, cli.json),
        Commands::Comment { id, text } => {
            cmd::act::run(&root, &id, user, Act::Comment(text), cli.json)
        }
        Commands::Uncomment { id } => cmd::act::run(&root, &id, user, Act::Uncomment, cli.json),
        Commands::Serve { port, open } => cmd::serve::run(&root, port, open),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
