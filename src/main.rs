use clap::Parser;
use tracing_subscriber::EnvFilter;
use ucimate::cli::Cli;

#[tokio::main]
async fn main() {
    // stdout belongs to the game, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = ucimate::cli::run(cli).await {
        tracing::debug!("{:?}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
