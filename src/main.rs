use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use shopsearch::cli::Cli;
use shopsearch::{Container, ContainerConfig, Router};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ContainerConfig {
        mock_embeddings: cli.mock_embeddings,
        memory_storage: cli.memory_storage,
        rule_based_negation: cli.rule_based_negation,
        mongo_uri: cli.mongo_uri.clone().or_else(|| std::env::var("ATLAS_URI").ok()),
        ..ContainerConfig::default()
    };

    let container = Container::new(config).await?;
    let router = Router::new(&container);

    let output = router.route(cli.command).await?;
    println!("{output}");

    Ok(())
}
