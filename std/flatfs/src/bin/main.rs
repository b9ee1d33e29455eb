//! Binary entry point for the wmcp-flatfs MCP server.

use clap::Parser;
use rmcp::ServiceExt;
use wmcp_flatfs::{FlatfsServer, Root};

/// Walrus MCP Flat Filesystem Server: serves flat file tools from one directory.
#[derive(Parser)]
#[command(name = "wmcp-flatfs", version, about)]
struct Cli {
    /// Root directory the server is confined to.
    root: std::path::PathBuf,
}

#[tokio::main]
async fn main() {
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }
    let cli = Cli::parse();
    let root = match Root::open(&cli.root) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(root = %root.path().display(), "serving flat filesystem");

    let server = FlatfsServer::new(root);
    let transport = rmcp::transport::stdio();
    let service = match server.serve(transport).await {
        Ok(service) => service,
        Err(e) => {
            eprintln!("Error: failed to start server: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = service.waiting().await {
        eprintln!("Error: server error: {e}");
        std::process::exit(1);
    }
}
