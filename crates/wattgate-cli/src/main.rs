//! WattGate CLI - Command-line interface for the telemetry admission gate

use std::sync::Arc;

use clap::Parser;

use wattgate_classifier::IsolationForestClassifier;
use wattgate_core::http::status_code;
use wattgate_core::{GateConfig, Reading, StubForwarder, ValidationPipeline};
use wattgate_replay::ReplayGuard;

#[derive(Parser)]
#[command(name = "wattgate")]
#[command(about = "WattGate - Admission gate for DePIN energy telemetry")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Validate that a model file loads as a usable classifier
    CheckModel {
        /// Path to the isolation forest model file
        #[arg(short, long)]
        model: String,
    },
    /// Run sample readings through an in-process pipeline
    Simulate {
        /// Optional model file; defaults to the threshold strategy
        #[arg(short, long)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt::init();

    match cli.command {
        Some(Commands::CheckModel { model }) => {
            let classifier = IsolationForestClassifier::load(&model)?;
            println!("Model OK: threshold={}", classifier.threshold());
        }
        Some(Commands::Simulate { model }) => {
            let mut config = GateConfig::default();
            if let Some(path) = model {
                config = config.with_model_path(path);
            }
            simulate(config).await?;
        }
        None => {
            println!("WattGate v0.1.0 - Use --help for commands");
        }
    }

    Ok(())
}

/// Drives the documented sample traffic through a freshly built pipeline
/// with a stub settlement layer, printing each outcome and status code.
async fn simulate(config: GateConfig) -> anyhow::Result<()> {
    let forwarder = Arc::new(StubForwarder::accepting());
    let pipeline = ValidationPipeline::from_config(
        config,
        Arc::new(ReplayGuard::new()),
        Arc::clone(&forwarder) as Arc<dyn wattgate_core::Forwarder>,
    )?;

    let readings = [
        Reading::new("A", 1000, 250.0),
        Reading::new("A", 1000, 250.0),    // duplicate
        Reading::new("A", 1001, -5.0),     // anomalous
        Reading::new("A", 1002, 10_000.0), // above plausible max
        Reading::new("B", 2000, 300.0),
    ];

    for reading in &readings {
        let outcome = pipeline.submit(reading).await;
        println!(
            "{} @ {} ({} Wh) -> {} [{}]",
            reading.node_id(),
            reading.timestamp(),
            reading.energy_wh(),
            outcome,
            status_code(&outcome)
        );
    }

    println!(
        "Committed fingerprints: {}, settlement calls: {}",
        pipeline.guard().committed_count(),
        forwarder.calls()
    );
    Ok(())
}
