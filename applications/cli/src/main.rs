use clap::Parser;
use songbox_cli::{execute, open_player, Command, Settings};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "songbox")]
#[command(about = "Manage a personal song library and play queue", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "SONGBOX_CONFIG")]
    config: Option<PathBuf>,

    /// State file location (overrides the configuration)
    #[arg(long)]
    state: Option<PathBuf>,

    /// Read saved state but do not write changes
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(path) = cli.state {
        settings.storage.state_path = path;
    }
    settings.validate()?;

    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(state = %settings.storage.state_path.display(), "Opening library");

    let mut player = open_player(&settings, cli.dry_run)?;
    let report = execute(&mut player, cli.command)?;

    for notice in &report.notices {
        if notice.is_error() {
            eprintln!("! {}", notice);
        } else {
            eprintln!("{}", notice);
        }
    }
    for line in &report.lines {
        println!("{}", line);
    }

    Ok(())
}
