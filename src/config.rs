use anyhow::Result;
use milldustry_core::{Facing, ItemType};
use milldustry_world::FuelTable;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/mill.toml";

/// Burn time given to fuels listed in `extra_fuels`.
const EXTRA_FUEL_BURN_TICKS: u32 = 200;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MillConfig {
    /// Orientation of the demo mill.
    pub facing: Facing,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Item ids burned as fuel on top of the built-in table.
    pub extra_fuels: Vec<String>,
    /// Where `demo` writes the saved block entity.
    pub save_path: PathBuf,
}

impl Default for MillConfig {
    fn default() -> Self {
        Self {
            facing: Facing::North,
            log_filter: "warn".to_string(),
            extra_fuels: Vec::new(),
            save_path: PathBuf::from("target/mill_demo.mbe"),
        }
    }
}

impl MillConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<MillConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    MillConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                MillConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    /// Default fuel table plus every recognised `extra_fuels` entry.
    pub fn fuel_table(&self) -> FuelTable {
        let mut table = FuelTable::default();
        for id in &self.extra_fuels {
            match ItemType::from_key(id) {
                Ok(item) if table.burn_ticks(item).is_none() => {
                    table = table.with_fuel(item, EXTRA_FUEL_BURN_TICKS);
                }
                Ok(_) => {}
                Err(err) => warn!("Ignoring extra fuel: {err}"),
            }
        }
        table
    }
}
