use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Scaffold a headless WordPress CMS from the wedo starter template", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new headless WordPress project (default)
    New,

    /// Check that the external tools the scaffold needs are installed
    Doctor {
        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Running with no subcommand starts the scaffold flow, matching how
    // the tool is usually invoked.
    match cli.command.unwrap_or(Commands::New) {
        Commands::New => {
            let exit_code = commands::new::execute()?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Commands::Doctor { json } => {
            let exit_code = commands::doctor::execute(json)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
