use clap::Parser;
use clipstash::bootstrap::{self, tracing::init_tracing_subscriber};
use clipstash::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let config = bootstrap::resolve_config(args.config.as_deref())?;

    if let Err(err) = init_tracing_subscriber(&config.log_dir) {
        eprintln!("Failed to initialize tracing: {err:#}");
    }

    cli::execute(args.command, &config).await
}
