//! hivecraft - deterministic beehive loot simulator
//!
//! Destroys one or more hives of a chosen type and prints what they drop.

mod config;

use anyhow::{bail, Result};
use config::SimConfig;
use hivecraft_core::enchantment::fortune_level;
use hivecraft_core::{block_hash, scoped_rng, Enchantment, EnchantmentType, SimTick};
use hivecraft_hives::block::harvest;
use hivecraft_hives::{
    load_drop_tables_lenient, load_drop_tables_strict, HiveRegistry, HiveState, HiveVariant,
};
use hivecraft_testkit::LootTally;
use std::{env, path::PathBuf};
use tracing::info;

const USAGE: &str = "usage: hivecraft --hive <name> [--fortune N] [--seed S] [--trials T] \
[--drops PATH] [--config PATH] [--tally-out PATH]";

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting hivecraft v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    let config = match &cli.config_path {
        Some(path) => SimConfig::load_from_path(path),
        None => SimConfig::load(),
    };

    let Some(hive) = cli.hive.as_deref() else {
        bail!(USAGE);
    };
    let Some(variant) = HiveVariant::parse(hive) else {
        bail!("unknown hive '{hive}'");
    };
    let Some(state) = HiveState::new(variant) else {
        info!("{variant} hives have no drop table");
        println!("[]");
        return Ok(());
    };

    let registry = HiveRegistry::new();
    let drops_path = cli.drops_path.clone().unwrap_or_else(|| config.drop_tables.clone());
    if config.strict_drop_tables {
        load_drop_tables_strict(&registry, &drops_path)?;
    } else {
        let count = load_drop_tables_lenient(&registry, &drops_path);
        info!("Installed {count} hive drop tables from {}", drops_path.display());
    }

    let fortune = cli.fortune.unwrap_or(config.fortune);
    let luck = fortune_level(&[Enchantment::new(EnchantmentType::Fortune, fortune)]);
    let world_seed = cli.world_seed.unwrap_or(config.world_seed);
    let trials = cli.trials.unwrap_or(config.trials).max(1);
    let position = block_hash(0, 64, 0);

    warn_ignored_options(&cli, trials);

    if trials == 1 {
        let mut rng = scoped_rng(world_seed, position, SimTick::ZERO);
        let loot = harvest(&state, luck, &registry, &mut rng);
        println!("{}", serde_json::to_string_pretty(&loot)?);
        return Ok(());
    }

    let mut tally = LootTally::new(variant.to_string(), luck);
    let mut tick = SimTick::ZERO;
    for _ in 0..trials {
        let mut rng = scoped_rng(world_seed, position, tick);
        tally.record(&harvest(&state, luck, &registry, &mut rng));
        tick = tick.advance(1);
    }
    println!("{}", serde_json::to_string_pretty(&tally)?);
    if let Some(path) = &cli.tally_out {
        tally.write_json(path)?;
    }

    Ok(())
}

/// Log options that have no effect for this run; returns whether any did.
fn warn_ignored_options(cli: &CliOptions, trials: u64) -> bool {
    if trials == 1 && cli.tally_out.is_some() {
        tracing::warn!("--tally-out has no effect without --trials greater than 1");
        return true;
    }
    false
}

#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    hive: Option<String>,
    fortune: Option<u8>,
    world_seed: Option<u64>,
    trials: Option<u64>,
    drops_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    tally_out: Option<PathBuf>,
}

impl CliOptions {
    fn parse<I>(mut args: I) -> Self
    where
        I: Iterator<Item = String>,
    {
        let mut options = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--hive" => {
                    if let Some(name) = args.next() {
                        options.hive = Some(name);
                    } else {
                        tracing::error!("--hive requires a hive name");
                    }
                }
                "--fortune" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u8>() {
                            Ok(value) => options.fortune = Some(value),
                            Err(err) => tracing::error!(
                                %err,
                                value = %raw,
                                "--fortune must be an integer between 0 and 255"
                            ),
                        }
                    } else {
                        tracing::error!("--fortune requires a value");
                    }
                }
                "--seed" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => options.world_seed = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--seed must be an integer")
                            }
                        }
                    } else {
                        tracing::error!("--seed requires a value");
                    }
                }
                "--trials" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => options.trials = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--trials must be an integer")
                            }
                        }
                    } else {
                        tracing::error!("--trials requires a value");
                    }
                }
                "--drops" => {
                    if let Some(path) = args.next() {
                        options.drops_path = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--drops requires a path");
                    }
                }
                "--config" => {
                    if let Some(path) = args.next() {
                        options.config_path = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--config requires a path");
                    }
                }
                "--tally-out" => {
                    if let Some(path) = args.next() {
                        options.tally_out = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--tally-out requires a path");
                    }
                }
                other => {
                    tracing::warn!(argument = other, "Ignoring unknown argument");
                }
            }
        }
        options
    }
}
