pub mod export;
pub mod init;
pub mod list;
pub mod migrations;
pub mod seed;
pub mod serve;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Start the dashboard and JSON API")]
    Serve(serve::ServeArgs),
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "List atendimentos in the terminal")]
    List(list::ListArgs),
    #[command(about = "Insert demonstration data")]
    Seed,
    #[command(about = "Export atendimentos to CSV, JSON or Excel")]
    Export(export::ExportArgs),
    #[command(about = "Apply or inspect database migrations")]
    Migrate(migrations::MigrateArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Serve(args) => serve::cmd(args).await,
            Commands::Init(args) => init::cmd(args),
            Commands::List(args) => list::cmd(args),
            Commands::Seed => seed::cmd(),
            Commands::Export(args) => export::cmd(args),
            Commands::Migrate(args) => migrations::cmd(args),
        }
    }
}
