use anyhow::{Context, Result};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::path::Path;

use idcvae_kernel::model::DenseModel;
use idcvae_kernel::representative::RepresentativeTable;

/// Prints a summary of a model file and/or a representative table file.
pub fn run(model: Option<&Path>, table_path: Option<&Path>) -> Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["File", "Status", "Details"]);

    if let Some(path) = model {
        match DenseModel::load(path) {
            Ok(m) => {
                let s = m.shape();
                let msg = format!(
                    "side {}, latent {}, labels {}, seed {}",
                    s.image_side, s.latent_dim, s.label_count, m.weights().seed
                );
                table.add_row(vec!["Model", "OK", &msg]);
            }
            Err(e) => {
                table.add_row(vec!["Model", "INVALID", &e.to_string()]);
            }
        }
    }

    if let Some(path) = table_path {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        match serde_json::from_str::<RepresentativeTable>(&raw) {
            Ok(t) => {
                let dim = t.iter().next().map_or(0, |(_, c)| c.dim());
                let msg = format!(
                    "{} labels, latent {}, fingerprint {}",
                    t.len(),
                    dim,
                    hex::encode(t.fingerprint())
                );
                table.add_row(vec!["Representatives", "OK", &msg]);
            }
            Err(e) => {
                table.add_row(vec!["Representatives", "INVALID", &e.to_string()]);
            }
        }
    }

    println!("{table}");
    Ok(())
}
