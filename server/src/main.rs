use clap::Parser;
use tokio::net::TcpListener;

use agua_server::config::{init_logging, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let config = ServerConfig::parse();
    init_logging(&config);

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    agua_server::run(listener).await
}
