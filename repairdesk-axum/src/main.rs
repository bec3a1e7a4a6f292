//! repairdesk server: the REST API over in-memory storage.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use repairdesk_axum::{AppState, router};
use repairdesk_query::logging;
use repairdesk_shop::{RepairShop, ShopConfig};

/// repairdesk server - repair shop management API
#[derive(Parser, Debug)]
#[command(name = "repairdesk-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (defaults to ./repairdesk.toml if present)
    #[arg(short, long, env = "REPAIRDESK_CONFIG")]
    config: Option<PathBuf>,

    /// Host address to bind to (overrides the config file)
    #[arg(long, env = "REPAIRDESK_HOST")]
    host: Option<String>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "REPAIRDESK_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = ShopConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;

    // Environment variables take precedence over the file when set.
    logging::init();
    logging::init_with(&config.logging.level, &config.logging.format);

    let shop = RepairShop::in_memory(config.search.clone());
    let app = router(AppState::new(shop));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(address = %addr, "repairdesk server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
