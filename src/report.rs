//! Report Writer Module
//! Writes the ranking table as CSV and the bar chart as PNG into the output directory.

use crate::charts::{BarChartRenderer, RenderError};
use crate::config::ReportConfig;
use crate::stats::RankingTable;
use polars::prelude::*;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// CSV header, in column order.
pub const CSV_COLUMNS: [&str; 3] = ["Course ID", "Course Name", "Mean Rank"];

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("Failed to create {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("Failed to write CSV {path}: {source}")]
    Csv { path: PathBuf, source: PolarsError },
    #[error("Failed to save chart {path}: {source}")]
    Chart { path: PathBuf, source: RenderError },
}

/// Files produced by one report run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPaths {
    pub csv: PathBuf,
    pub chart: PathBuf,
}

/// Report generator for the ranking results
pub struct ReportWriter;

impl ReportWriter {
    /// Write both artifacts, creating the output directory when needed.
    ///
    /// Existing files at the target paths are overwritten.
    pub fn write(table: &RankingTable, config: &ReportConfig) -> Result<ReportPaths, WriteError> {
        fs::create_dir_all(&config.output_dir).map_err(|source| WriteError::CreateDir {
            path: config.output_dir.clone(),
            source,
        })?;

        let paths = ReportPaths {
            csv: config.csv_path(),
            chart: config.chart_path(),
        };

        Self::write_csv(table, &paths.csv)?;
        info!(path = %paths.csv.display(), "saved rankings");

        BarChartRenderer::render_png(table, &config.chart, &paths.chart).map_err(|source| {
            WriteError::Chart {
                path: paths.chart.clone(),
                source,
            }
        })?;
        info!(path = %paths.chart.display(), "saved plot");

        Ok(paths)
    }

    /// Serialize `table` in ranked order. Undefined means become empty fields.
    pub fn write_csv(table: &RankingTable, path: &Path) -> Result<(), WriteError> {
        let csv_error = |source| WriteError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut df = Self::results_frame(table).map_err(csv_error)?;
        let mut file = File::create(path).map_err(|source| WriteError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)
            .map_err(csv_error)
    }

    /// Results as a DataFrame with the CSV column names.
    pub fn results_frame(table: &RankingTable) -> PolarsResult<DataFrame> {
        let ids: Vec<&str> = table.iter().map(|r| r.course_id.as_str()).collect();
        let names: Vec<&str> = table.iter().map(|r| r.course_name.as_str()).collect();
        let means: Vec<Option<f64>> = table
            .iter()
            .map(|r| Some(r.mean_rank).filter(|m| !m.is_nan()))
            .collect();

        DataFrame::new(vec![
            Column::new(CSV_COLUMNS[0].into(), ids),
            Column::new(CSV_COLUMNS[1].into(), names),
            Column::new(CSV_COLUMNS[2].into(), means),
        ])
    }
}
