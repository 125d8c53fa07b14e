//! Command implementations

mod analyze;
mod init;
mod session;
mod settings;
mod show;
mod status;
mod theme;
mod upload;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    match &cli.command {
        Commands::Init(args) => init::execute(args, &output),
        Commands::Upload(args) => upload::execute(args, &output, &cli).await,
        Commands::Analyze(args) => analyze::execute(args, &output, &cli).await,
        Commands::Show(args) => show::execute(args, &output, &cli),
        Commands::Settings(args) => settings::execute(args, &output, &cli),
        Commands::Theme(args) => theme::execute(args, &output, &cli),
        Commands::Status(args) => status::execute(args, &output, &cli),
        Commands::Session(args) => session::execute(args, &output, &cli).await,
    }
}
