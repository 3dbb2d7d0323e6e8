use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::path::Path;

use idcvae_kernel::types::Label;
use idcvae_kernel::LatentSampling;

use crate::engine::Workbench;
use crate::imageio::read_pixels;

pub fn run(
    model: &Path,
    image: &Path,
    sampling: LatentSampling,
    show_losses: bool,
    config: Option<&Path>,
) -> Result<Label> {
    let bench = Workbench::open(model, config)?;
    let buffer = read_pixels(image)?;
    let result = bench.engine.predict_detailed(&buffer, sampling)?;

    println!("Prediction: {}", result.label);

    if show_losses {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Label", "Reconstruction loss", ""]);
        for (i, loss) in result.losses.iter().enumerate() {
            let mark = if i == result.label.index() { "<" } else { "" };
            table.add_row(vec![i.to_string(), format!("{:.6}", loss), mark.to_string()]);
        }
        println!("{table}");
    }

    Ok(result.label)
}
