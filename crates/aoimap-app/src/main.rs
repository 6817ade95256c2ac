//! aoimap - interactive Area-of-Interest definition shell
//!
//! Composition root: configuration, storage, geocoder, renderer, and the
//! event-loop controller behind the interactive shell.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::sync::mpsc;

use aoimap_app::app::Controller;
use aoimap_app::cli::Cli;
use aoimap_app::output::OutputWriter;
use aoimap_app::renderer::TraceRenderer;
use aoimap_app::shell;
use aoimap_core::config::{CliConfigOverrides, LayeredConfig};
use aoimap_core::geocode::NominatimClient;
use aoimap_core::ports::{Geocoder, KeyValueStore};
use aoimap_store::{FileStore, MemoryStore};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let out = OutputWriter::new(cli.json);

    let mut config = LayeredConfig::with_defaults();
    if let Some(path) = &cli.config {
        config = config.load_from_file(path)?;
    }
    let mut config = config.load_from_env();
    config.update_from_cli(CliConfigOverrides {
        geocoder_url: cli.geocoder_url,
        search_limit: cli.search_limit,
        state_path: cli.state_path,
    });

    let store: Arc<dyn KeyValueStore> = if cli.ephemeral {
        tracing::info!("using in-memory session store");
        Arc::new(MemoryStore::new())
    } else {
        let path = config.state_path.value.clone();
        tracing::info!(path = %path.display(), "using file session store");
        Arc::new(FileStore::open(path)?)
    };

    let geocoder: Arc<dyn Geocoder> = Arc::new(NominatimClient::new(
        config.geocoder_url.value.clone(),
        config.search_limit.value,
    ));
    let renderer = Box::new(TraceRenderer::new(config.home.value));

    let (tx, rx) = mpsc::unbounded_channel();
    let controller = Controller::new(geocoder, store, renderer, tx);

    shell::run(controller, rx, &out).await
}
