use clap::{Parser, Subcommand};
use std::path::PathBuf;
use idcvae_cli::commands::{explain, init_model, inspect, predict, represent};
use idcvae_cli::telemetry;
use idcvae_kernel::LatentSampling;

#[derive(Parser)]
#[command(name = "idcvae")]
#[command(about = "Digit recognition by conditional reconstruction, with latent morphing explanations", long_about = None)]
struct Cli {
    /// Kernel config JSON (model shape, sampling, morph steps)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a randomly initialized dense model
    InitModel {
        #[arg(long, short)]
        out: PathBuf,

        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Compute per-label representatives from a labeled JSON dataset
    Represent {
        #[arg(long, short)]
        model: PathBuf,

        #[arg(long, short)]
        dataset: PathBuf,

        #[arg(long, short)]
        out: PathBuf,

        /// Use the sampled latent instead of the mean
        #[arg(long)]
        random: bool,
    },
    /// Predict the digit in an image
    Predict {
        #[arg(long, short)]
        model: PathBuf,

        #[arg(long, short)]
        image: PathBuf,

        #[arg(long)]
        random: bool,

        /// Print the reconstruction loss under every label
        #[arg(long)]
        losses: bool,
    },
    /// Predict and write the morphing frames as PNGs
    Explain {
        #[arg(long, short)]
        model: PathBuf,

        /// Representative table JSON produced by `represent`
        #[arg(long, short)]
        table: PathBuf,

        #[arg(long, short)]
        image: PathBuf,

        /// Interpolation steps (defaults to the config value)
        #[arg(long, short)]
        steps: Option<usize>,

        #[arg(long)]
        out_dir: PathBuf,

        #[arg(long)]
        random: bool,
    },
    /// Summarize a model and/or representative table file
    Inspect {
        #[arg(long, short)]
        model: Option<PathBuf>,

        #[arg(long, short)]
        table: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::InitModel { out, seed } => init_model::run(&out, seed, config),
        Commands::Represent { model, dataset, out, random } => {
            represent::run(&model, &dataset, &out, LatentSampling::from_flag(random), config)
        }
        Commands::Predict { model, image, random, losses } => {
            predict::run(&model, &image, LatentSampling::from_flag(random), losses, config).map(|_| ())
        }
        Commands::Explain {
            model,
            table,
            image,
            steps,
            out_dir,
            random,
        } => explain::run(
            &model,
            &table,
            &image,
            steps,
            &out_dir,
            LatentSampling::from_flag(random),
            config,
        )
        .map(|_| ()),
        Commands::Inspect { model, table } => inspect::run(model.as_deref(), table.as_deref()),
    }
}
