use clap::Parser;
use homeops_core::GatewayConfig;
use homeops_server::GatewayServer;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "homeops-server", version, about = "HomeOps gateway server")]
struct Cli {
    /// Listen address, overriding HOMEOPS_LISTEN.
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = GatewayConfig::from_env()?;
    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
    }

    // RUST_LOG wins over the configured level when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    GatewayServer::new(config)?.run().await
}
