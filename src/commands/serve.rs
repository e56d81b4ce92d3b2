//! Server startup command.
//!
//! Resolves the effective binding (CLI flags beat `ATENDE_ADDR`/
//! `ATENDE_PORT`, which beat the config file) and runs the dashboard until
//! interrupted. Migrations are applied while the state is being built, so a
//! fresh install serves a ready database on first run.

use crate::libs::config::Config;
use crate::web::server;
use anyhow::Result;
use clap::Args;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides config and environment)
    #[arg(long)]
    addr: Option<String>,

    /// Port to listen on (overrides config and environment)
    #[arg(short, long)]
    port: Option<u16>,
}

pub async fn cmd(args: ServeArgs) -> Result<()> {
    init_tracing();

    let config = Config::read()?;
    let (mut addr, mut port) = config.bind_addr();
    if let Some(flag_addr) = args.addr {
        addr = flag_addr;
    }
    if let Some(flag_port) = args.port {
        port = flag_port;
    }

    server::run(&addr, port).await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("atende=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
