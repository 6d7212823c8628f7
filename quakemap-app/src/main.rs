use anyhow::Context;
use clap::Parser;
use quakemap::{
    data::loader::{DataLoader, HttpFeatureSource},
    MapSession, SessionConfig,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "quakemap-app",
    version,
    about = "Fetch the weekly earthquake feed and plate boundaries, then print the composed map as JSON"
)]
struct Cli {
    #[arg(long, help = "JSON session config; missing keys keep their defaults")]
    config: Option<PathBuf>,
    #[arg(long, help = "Write the map snapshot here instead of stdout")]
    output: Option<PathBuf>,
    #[arg(long, help = "Per-request timeout in seconds (overrides the config)")]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quakemap::init_logging();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SessionConfig::from_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(secs) = cli.timeout_secs {
        config.request_timeout_ms = Some(secs.saturating_mul(1000));
    }

    let source = HttpFeatureSource::from_config(&config);
    let loader = DataLoader::from_config(source, &config);
    let mut session = MapSession::new(config).context("composing the map")?;

    let report = loader.run(&mut session).await;
    if report.all_loaded() {
        log::info!("both datasets loaded");
    } else {
        log::info!(
            "{} of 2 datasets failed, see warnings above",
            report.failures().len()
        );
    }

    let json = session
        .snapshot()
        .to_json_pretty()
        .context("serializing the map snapshot")?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("writing snapshot to {}", path.display()))?;
            log::info!("snapshot written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
