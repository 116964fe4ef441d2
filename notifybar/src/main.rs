//! notifybar CLI.

use clap::{Parser, Subcommand};
use tokio::io::BufReader;

use notifybar_lib::commands;
use notifybar_lib::ingest::NotificationService;
use notifybar_lib::listener;

#[derive(Parser)]
#[command(name = "notifybar")]
#[command(about = "Desktop notifications for single-line status bars")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging to stderr
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Queue notifications read as JSON lines from stdin
    Listen,
    /// Print the line for the current notification
    Render,
    /// Toggle mute and print the bell icon for the new state
    MuteToggle,
    /// Drop the current notification
    Skip,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    notifybar_lib::init_tracing(cli.debug);

    let (config, store) = notifybar_lib::init_foundation()?;

    match cli.command {
        Commands::Listen => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(async {
                let service = NotificationService::new(&store, &config);
                let info = service.server_information();
                tracing::info!(
                    name = info.name,
                    version = info.version,
                    capabilities = ?service.capabilities(),
                    "Listening for notifications on stdin"
                );
                let stdin = BufReader::new(tokio::io::stdin());
                listener::run(&service, stdin, tokio::io::stdout(), commands::local_now).await
            })?;
        }
        Commands::Render => {
            println!("{}", commands::render(&store, &config, commands::local_now())?);
        }
        Commands::MuteToggle => {
            println!("{}", commands::mute_toggle(&store)?);
        }
        Commands::Skip => commands::skip(&store)?,
    }
    Ok(())
}
