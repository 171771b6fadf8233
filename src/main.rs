mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use milldustry_core::{BlockPos, Direction, Facing, ItemStack, ItemType, SimTick};
use milldustry_testkit::JsonlSink;
use milldustry_world::{
    read_document_file, write_document_file, ChangeSink, Container, MillBlockEntity,
    MillSnapshot, NullSink, SidedContainer, SlotRole, FUEL_SLOT, INPUT_SLOT,
};
use tracing::info;

use crate::config::MillConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect and exercise the mill block entity", long_about = None)]
struct Args {
    /// Configuration file (defaults to config/mill.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the configured facing
    #[arg(long)]
    facing: Option<Facing>,
    /// Write every change notification to this JSONL file
    #[arg(long)]
    events: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print which slots each side exposes and what it may do with them
    Access,
    /// Run a scripted interaction, save it, reload it and compare
    Demo,
    /// Print a saved block entity document
    Show {
        /// Path to a `.mbe` file
        path: PathBuf,
    },
    /// Write the effective configuration (after overrides) as TOML
    WriteConfig {
        /// Destination (defaults to the --config path, then config/mill.toml)
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => MillConfig::load_from_path(path),
        None => MillConfig::load(),
    };

    // RUST_LOG wins over the configured filter.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.log_filter))
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting milldustry v{}", env!("CARGO_PKG_VERSION"));

    let facing = args.facing.unwrap_or(config.facing);
    match args.command {
        Command::Access => print_access_table(&config, facing),
        Command::Demo => run_demo(&config, facing, args.events.as_deref()),
        Command::Show { path } => show(&path),
        Command::WriteConfig { path } => {
            let path = path
                .or(args.config)
                .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_PATH));
            write_config(config, facing, &path)?;
            println!("wrote {}", path.display());
            Ok(())
        }
    }
}

fn write_config(config: MillConfig, facing: Facing, path: &Path) -> Result<()> {
    let effective = MillConfig { facing, ..config };
    effective
        .save_to_path(path)
        .with_context(|| format!("failed to write config {}", path.display()))
}

fn print_access_table(config: &MillConfig, facing: Facing) -> Result<()> {
    let mill = MillBlockEntity::detached(BlockPos::new(0, 0, 0), facing, Arc::new(config.fuel_table()));
    let coal = ItemStack::new(ItemType::Coal, 1);
    let wheat = ItemStack::new(ItemType::Wheat, 1);

    println!("mill facing {facing}");
    for side in Direction::ALL {
        let slots = mill.available_slots(side);
        let role = slots
            .first()
            .and_then(|&slot| SlotRole::of(slot))
            .map(|role| format!("{role:?}").to_lowercase())
            .unwrap_or_else(|| "none".to_string());
        let insert = slots
            .iter()
            .any(|&slot| mill.can_insert(slot, &coal, side) || mill.can_insert(slot, &wheat, side));
        let extract = slots.iter().any(|&slot| mill.can_extract(slot, &wheat, side));
        println!(
            "  {:<5} slots {:<22} role {:<6} insert {:<5} extract {}",
            side.as_str(),
            format!("{slots:?}"),
            role,
            insert,
            extract
        );
    }
    Ok(())
}

fn run_demo(config: &MillConfig, facing: Facing, events: Option<&Path>) -> Result<()> {
    let sink: Box<dyn ChangeSink + Send> = match events {
        Some(path) => Box::new(
            JsonlSink::create(path)
                .with_context(|| format!("failed to create event log {}", path.display()))?,
        ),
        None => Box::new(NullSink),
    };

    let pos = BlockPos::new(0, 64, 0);
    let fuel = Arc::new(config.fuel_table());
    let mut mill = MillBlockEntity::new(pos, facing, fuel.clone(), sink);

    mill.set(FUEL_SLOT, Some(ItemStack::new(ItemType::Coal, 16)))?;
    mill.set(INPUT_SLOT, Some(ItemStack::new(ItemType::Wheat, 32)))?;
    mill.set(2, Some(ItemStack::new(ItemType::Flour, 3)))?;
    let mut hand = ItemStack::new(ItemType::Stone, 5);
    mill.interact(&mut hand);
    mill.tick(SimTick::ZERO.advance(1));

    let document = mill.to_document();
    write_document_file(&config.save_path, &document)?;
    info!(path = %config.save_path.display(), "saved demo mill");

    let mut restored = MillBlockEntity::detached(pos, facing, fuel);
    restored.load_document(&read_document_file(&config.save_path)?);
    if restored.snapshot() != mill.snapshot() {
        anyhow::bail!("reloaded mill differs from the saved one");
    }

    println!("{}", serde_json::to_string_pretty(&document)?);
    println!(
        "round trip ok: {} -> {}",
        pos,
        config.save_path.display()
    );
    Ok(())
}

fn show(path: &Path) -> Result<()> {
    let document = read_document_file(path)?;
    let snapshot = MillSnapshot::from_document(&document);
    println!("{}", serde_json::to_string_pretty(&document)?);
    println!(
        "{} occupied slots, millstone: {}",
        snapshot.slots.occupied().count(),
        snapshot
            .millstone
            .as_ref()
            .map(|stack| stack.item_type.key())
            .unwrap_or_else(|| "none".to_string())
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn write_config_subcommand_parses() {
        let args = Args::try_parse_from([
            "milldustry",
            "--facing",
            "east",
            "write-config",
            "out/mill.toml",
        ])
        .unwrap();
        assert_eq!(args.facing, Some(Facing::East));
        match args.command {
            Command::WriteConfig { path } => {
                assert_eq!(path, Some(PathBuf::from("out/mill.toml")))
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn written_config_applies_facing_override() {
        let path = std::env::temp_dir().join(format!(
            "milldustry_write_config_{}.toml",
            std::process::id()
        ));
        let config = MillConfig {
            extra_fuels: vec!["wheat".to_string()],
            ..MillConfig::default()
        };
        write_config(config, Facing::South, &path).unwrap();

        let reloaded = MillConfig::load_from_path(&path);
        assert_eq!(reloaded.facing, Facing::South);
        assert_eq!(reloaded.extra_fuels, vec!["wheat".to_string()]);
        std::fs::remove_file(&path).ok();
    }
}
