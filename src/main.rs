//! gpu-device-attrs: print allocator device descriptors for discovered GPUs.
//!
//! Reads the JSON fact records written by discovery and prints the devices
//! (and optionally the partition-shared attributes) as JSON on stdout.
//! Logs go to stderr.

use std::collections::BTreeMap;

use clap::Parser;
use serde::Serialize;
use tracing::info;

use gpu_device_attrs::config::{Cli, Config};
use gpu_device_attrs::facts::load_facts;
use gpu_device_attrs::gpu::device::devices_for;
use gpu_device_attrs::{Attributes, Device};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Output {
    devices: Vec<Device>,

    #[serde(skip_serializing_if = "Option::is_none")]
    partition_attributes: Option<BTreeMap<String, Attributes>>,
}

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments.
    let cli = Cli::parse();

    // Initialize tracing/logging.
    let filter = if cli.verbose {
        "gpu_device_attrs=debug"
    } else {
        "gpu_device_attrs=info"
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with_target(true)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!("gpu-device-attrs v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration.
    let config = Config::load(&cli.config)?.with_cli(&cli);

    info!(
        facts = %config.facts.path.display(),
        partitions = config.output.partitions,
        "Configuration loaded"
    );

    let gpus = load_facts(&config.facts.path)?;

    let partition_attributes = config.output.partitions.then(|| {
        gpus.iter()
            .map(|gpu| (gpu.canonical_name(), gpu.part_dev_attributes()))
            .collect()
    });

    let output = Output {
        devices: devices_for(&gpus),
        partition_attributes,
    };

    info!(devices = output.devices.len(), "Device descriptors assembled");

    let json = if config.output.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{json}");

    Ok(())
}
