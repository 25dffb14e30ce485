use anyhow::Result;
use clap::Parser;
use server::build_app;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "server")]
#[command(about = "Serve boolean TF-IDF search over a directory of text files")]
struct Args {
    /// Directory of text files indexed at startup
    #[arg(long, default_value = "./corpus")]
    corpus: PathBuf,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Token required in X-ADMIN-TOKEN to add documents; uploads are refused when unset
    #[arg(long, env = "ADMIN_TOKEN", hide_env_values = true)]
    admin_token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    if args.admin_token.is_none() {
        tracing::warn!("no admin token configured, POST /documents is disabled");
    }
    let app = build_app(&args.corpus, args.admin_token)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, corpus = %args.corpus.display(), "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
