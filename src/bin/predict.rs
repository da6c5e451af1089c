// src/bin/predict.rs
//! One-shot prediction: searches as positional args, report on stdout.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;

use search_profiler::{init_tracing, ProfilerConfig};

/// Predict a demographic profile from a few searches
#[derive(Parser, Debug)]
#[command(
    name = "predict",
    version,
    about = "Predict age, gender, marital status and salary from free-text searches"
)]
struct Args {
    /// Name shown in the report
    #[arg(long)]
    name: Option<String>,

    /// Also write the plain text report to this file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Free-text searches, e.g. "tutorial for investing in cars"
    #[arg(required = true, num_args = 1..)]
    searches: Vec<String>,
}

impl Args {
    /// Trimmed, non-blank searches.
    fn cleaned_searches(&self) -> Vec<String> {
        self.searches
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let args = Args::parse();
    let searches = args.cleaned_searches();
    if searches.is_empty() {
        bail!("every search was blank");
    }

    let predictor = ProfilerConfig::load_default()?.build_predictor()?;
    let profile = predictor.predict(args.name.clone(), &searches)?;

    println!("{profile}");
    if let Some(path) = &args.save {
        profile
            .write_report(path)
            .with_context(|| format!("writing report to {}", path.display()))?;
        println!("Predictions saved to {}", path.display());
    }
    Ok(())
}
