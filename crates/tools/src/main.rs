use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use delve_core::generate_seeded;
use delve_tools::config_file::resolve_generation_config;
use delve_tools::init_tracing;
use delve_tools::render::{render_ascii, render_json};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Ascii,
    Json,
}

#[derive(Parser)]
#[command(author, version, about = "Generate one floor and print it", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// TOML file with generation parameters; missing keys keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = Format::Ascii)]
    format: Format,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = resolve_generation_config(args.config.as_deref())?;
    let plan = generate_seeded(&config, args.seed)
        .with_context(|| format!("Generation failed for seed {}", args.seed))?;

    match args.format {
        Format::Ascii => {
            print!("{}", render_ascii(&plan, &[]));
            println!("Seed: {}", args.seed);
            println!("Walls: {}  Water: {}", plan.walls.len(), plan.water.len());
            println!("Fingerprint: {:016x}", plan.fingerprint());
        }
        Format::Json => {
            println!("{}", render_json(&plan, args.seed).context("Failed to serialize plan")?);
        }
    }
    Ok(())
}
