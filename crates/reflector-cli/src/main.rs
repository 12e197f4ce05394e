// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Command-Line Interface
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Reflector design command-line interface.
//!
//! ```sh
//! reflector sweep spec.json --top 5
//! reflector sweep spec.json --json > result.json
//! reflector limits spec.json
//! reflector validate spec.json
//! ```

mod report;

use anyhow::Context;
use clap::{Parser, Subcommand};
use reflector_design::{infer_derived_limits, run_sweep};
use reflector_types::config::InputSpec;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "reflector")]
#[command(about = "Reflecting telescope design sweep")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep the design space and rank passing candidates.
    Sweep {
        /// Path to the JSON input spec.
        spec: PathBuf,
        /// Number of candidates to keep in the top list.
        #[arg(short, long, default_value_t = 5)]
        top: usize,
        /// Print the sweep result as JSON instead of a summary.
        #[arg(long)]
        json: bool,
        /// Keep optical plans and ray traces in the JSON output.
        #[arg(long, requires = "json")]
        traces: bool,
    },
    /// Find the feasible f-ratio ranges and print the updated spec.
    Limits {
        /// Path to the JSON input spec.
        spec: PathBuf,
    },
    /// Check an input spec without running anything.
    Validate {
        /// Path to the JSON input spec.
        spec: PathBuf,
    },
}

fn load_spec(path: &Path) -> anyhow::Result<InputSpec> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    InputSpec::from_json(&contents).with_context(|| format!("loading {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sweep {
            spec,
            top,
            json,
            traces,
        } => {
            let input = load_spec(&spec)?;
            log::info!("sweeping {} ({})", input.name, spec.display());
            let result = run_sweep(&input, top)?;
            if json {
                let output = if traces {
                    result
                } else {
                    report::strip_payload(&result)
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print!("{}", report::sweep_summary(&input, &result));
            }
            Ok(())
        }
        Commands::Limits { spec } => {
            let input = load_spec(&spec)?;
            let updated = infer_derived_limits(&input)?;
            println!("{}", serde_json::to_string_pretty(&updated)?);
            Ok(())
        }
        Commands::Validate { spec } => {
            let input = load_spec(&spec)?;
            println!(
                "Spec is valid: {} ({} design kinds)",
                input.name,
                input.enabled_kinds().len()
            );
            Ok(())
        }
    }
}
