use anyhow::{Context, Result};
use std::path::Path;

use idcvae_kernel::representative::RepresentativeTable;
use idcvae_kernel::{Engine, KernelConfig};

/// Reads a config file if given, otherwise the defaults.
pub fn load_config(path: Option<&Path>) -> Result<KernelConfig> {
    match path {
        Some(p) => KernelConfig::from_path(p)
            .with_context(|| format!("Failed to read config {}", p.display())),
        None => Ok(KernelConfig::default()),
    }
}

/// An engine with its model loaded and, optionally, a representative table.
pub struct Workbench {
    pub engine: Engine,
}

impl Workbench {
    pub fn open(model_path: &Path, config_path: Option<&Path>) -> Result<Self> {
        let config = load_config(config_path)?;
        let mut engine = Engine::new(config).context("Invalid kernel config")?;
        let location = model_path.to_string_lossy();
        engine
            .load_model(&location)
            .with_context(|| format!("Failed to load model {}", model_path.display()))?;
        Ok(Self { engine })
    }

    pub fn with_table(self, table_path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(table_path)
            .with_context(|| format!("Failed to read table {}", table_path.display()))?;
        let table: RepresentativeTable =
            serde_json::from_str(&raw).context("Failed to parse representative table JSON")?;
        self.engine
            .set_representatives(table)
            .context("Representative table does not fit the model")?;
        Ok(self)
    }
}
