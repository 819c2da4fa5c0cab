//! Configuration Module
//! Fixed paths, core columns and chart text, optionally overridden by a JSON file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "course_rankings.json";

/// Survey questions holding the core course rankings, in reporting order.
pub const CORE_COLUMNS: [&str; 8] = [
    "Q35_1", "Q35_5", "Q35_2", "Q35_4", "Q35_3", "Q35_8", "Q35_9", "Q35_10",
];

/// Separator between the question prompt and the course name in the label row.
pub const LABEL_SEPARATOR: &str = " - ";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Top-level settings for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub input_path: PathBuf,
    /// Worksheet name; the first sheet when unset.
    pub sheet: Option<String>,
    pub core_columns: Vec<String>,
    pub label_separator: String,
    pub report: ReportConfig,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            input_path: Path::new("data").join("Grad Program Exit Survey Data 2024.xlsx"),
            sheet: None,
            core_columns: CORE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            label_separator: LABEL_SEPARATOR.to_string(),
            report: ReportConfig::default(),
        }
    }
}

impl RankingConfig {
    /// Read settings from `path` when it exists, otherwise fall back to defaults.
    ///
    /// Keys absent from the file keep their default values.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Where and how the results are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
    pub csv_file: String,
    pub chart_file: String,
    pub chart: ChartConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("outputs"),
            csv_file: "rankings.csv".to_string(),
            chart_file: "rankings_plot.png".to_string(),
            chart: ChartConfig::default(),
        }
    }
}

impl ReportConfig {
    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(&self.csv_file)
    }

    pub fn chart_path(&self) -> PathBuf {
        self.output_dir.join(&self.chart_file)
    }
}

/// Fixed chart text and image size in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub title: String,
    pub subtitle: String,
    pub x_label: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Average Student Ranking of MAcc Core Courses".to_string(),
            subtitle: "(Lower Score = More Beneficial)".to_string(),
            x_label: "Mean Rank (1 = Most Beneficial, 8 = Least Beneficial)".to_string(),
            width: 1000,
            height: 600,
        }
    }
}
