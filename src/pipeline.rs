//! Pipeline Module
//! Load -> transform -> report, run once per process.

use crate::config::RankingConfig;
use crate::data::{LoadError, SchemaError, SurveyLoader, SurveyProcessor};
use crate::report::{ReportPaths, ReportWriter, WriteError};
use crate::stats::{RankingTable, StatsCalculator};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Everything a successful run produced.
#[derive(Debug, Clone)]
pub struct RankingOutput {
    pub table: RankingTable,
    pub paths: ReportPaths,
}

/// Run the whole analysis for `config`. Any error is fatal for the run.
pub fn run(config: &RankingConfig) -> Result<RankingOutput, PipelineError> {
    info!(path = %config.input_path.display(), "loading data");
    let df = SurveyLoader::load(&config.input_path, config.sheet.as_deref())?;

    let courses = SurveyProcessor::extract_core_courses(
        &df,
        &config.core_columns,
        &config.label_separator,
    )?;
    for course in &courses {
        info!(id = %course.course_id, name = %course.course_name, "identified course");
    }

    let table = StatsCalculator::rank_courses(&courses);
    let paths = ReportWriter::write(&table, &config.report)?;

    Ok(RankingOutput { table, paths })
}
