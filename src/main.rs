use anyhow::Result;
use rmcp::{ServiceExt, transport::stdio};
use rootvine::Server;
use tracing_subscriber::{self, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Logging to stderr only (stdout is reserved for the MCP protocol).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("RootVine MCP server starting on stdio");

    let service = Server::new().serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}
