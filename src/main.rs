//! Course Rankings - survey ranking analysis
//!
//! Computes the mean rank of each core course and saves a CSV table and a bar chart.

use anyhow::{Context, Result};
use course_rankings::config::CONFIG_FILE;
use course_rankings::RankingConfig;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let config = RankingConfig::load_or_default(Path::new(CONFIG_FILE))
        .context("loading configuration")?;

    let output = course_rankings::run(&config).context("ranking analysis failed")?;

    println!("\nRanking Results:");
    println!("{}", output.table);
    println!("Saved rankings to {}", output.paths.csv.display());
    println!("Saved plot to {}", output.paths.chart.display());

    Ok(())
}
