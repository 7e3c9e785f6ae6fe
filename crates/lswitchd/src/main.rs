//! lswitchd - L2 learning-switch controller daemon
//!
//! Entry point: loads and validates the topology configuration, then
//! stands up the controller core. The OpenFlow control channel is wired
//! in by the embedding transport; this binary exposes the daemon's event
//! dispatch as the integration seam.

use async_trait::async_trait;
use clap::Parser;
use lswitch_common::{Command, CommandSink, ControllerResult, RecordingSink};
use lswitchd::{ControllerDaemon, TopologyConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// VLAN-aware L2 learning-switch controller
#[derive(Parser, Debug)]
#[command(name = "lswitchd")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the topology configuration file
    #[arg(short = 'c', long, default_value = "topology.yaml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,

    /// Validate the configuration and exit
    #[arg(long)]
    check_config: bool,

    /// Record commands instead of delivering them (debugging)
    #[arg(short = 'r', long)]
    record: bool,
}

/// Initializes tracing/logging subsystem
fn init_logging(level: &str) {
    let level: Level = level.parse().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Logs each command at info level. Stands in for the switch transport
/// until a control channel is attached.
struct LoggingSink;

#[async_trait]
impl CommandSink for LoggingSink {
    async fn send(&self, command: Command) -> ControllerResult<()> {
        info!("Command for switch {}: {:?}", command.switch_id(), command);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    info!("--- Starting lswitchd ---");

    let config = match TopologyConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Cannot start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.check_config {
        info!("Configuration OK ({} switch(es))", config.switches.len());
        return ExitCode::SUCCESS;
    }

    let sink: Arc<dyn CommandSink> = if args.record {
        Arc::new(RecordingSink::new())
    } else {
        Arc::new(LoggingSink)
    };

    let mut daemon = ControllerDaemon::new(Arc::new(config), sink);

    // The control-channel transport delivers events here via
    // ControllerDaemon::dispatch. Without one attached there is nothing
    // to drive, so initialize, report, and exit cleanly.
    info!("lswitchd initialization complete, awaiting control-channel integration");
    daemon.shutdown().await;

    ExitCode::SUCCESS
}
