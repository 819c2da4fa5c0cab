//! Survey Data Processor Module
//! Splits the label row from the responses and coerces rank cells to numbers.

use polars::prelude::*;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Core columns missing from survey data: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Survey data has no label row below the column identifiers")]
    MissingLabelRow,
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Responses for one core course, label row already removed.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseResponses {
    pub course_id: String,
    pub course_name: String,
    /// One entry per respondent; `None` marks a missing or non-numeric answer.
    pub ranks: Vec<Option<f64>>,
}

impl CourseResponses {
    /// Ranks that survived numeric coercion.
    pub fn valid_ranks(&self) -> Vec<f64> {
        self.ranks.iter().flatten().copied().collect()
    }
}

/// Handles label extraction and numeric coercion of the ranking questions.
pub struct SurveyProcessor;

impl SurveyProcessor {
    /// Extract the responses of every core column, in core-column order.
    ///
    /// Row 0 of `df` is the label row; every later row is one respondent.
    pub fn extract_core_courses(
        df: &DataFrame,
        core_columns: &[String],
        separator: &str,
    ) -> Result<Vec<CourseResponses>, SchemaError> {
        Self::check_columns(df, core_columns)?;

        if df.height() == 0 {
            return Err(SchemaError::MissingLabelRow);
        }

        let mut courses = Vec::with_capacity(core_columns.len());

        for course_id in core_columns {
            let text = df.column(course_id)?.cast(&DataType::String)?;
            let cells = text.str()?;

            let course_name = match cells.get(0) {
                Some(label) => Self::extract_course_name(label, separator),
                None => course_id.clone(),
            };

            let ranks: Vec<Option<f64>> = cells
                .into_iter()
                .skip(1)
                .map(Self::coerce_rank)
                .collect();

            let dropped = cells
                .into_iter()
                .skip(1)
                .zip(&ranks)
                .filter(|(cell, rank)| cell.is_some() && rank.is_none())
                .count();
            if dropped > 0 {
                debug!(course = %course_id, dropped, "non-numeric responses treated as missing");
            }

            courses.push(CourseResponses {
                course_id: course_id.clone(),
                course_name,
                ranks,
            });
        }

        Ok(courses)
    }

    /// Fail with every core column absent from `df`.
    pub fn check_columns(df: &DataFrame, core_columns: &[String]) -> Result<(), SchemaError> {
        let present: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let missing: Vec<String> = core_columns
            .iter()
            .filter(|c| !present.contains(c))
            .cloned()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::MissingColumns(missing))
        }
    }

    /// Course name from a label such as `"Please rank ... - Advanced Tax"`.
    ///
    /// Keeps the text after the last separator, or the whole label when the
    /// separator does not occur.
    pub fn extract_course_name(label: &str, separator: &str) -> String {
        let name = if separator.is_empty() {
            label
        } else {
            label
                .rsplit_once(separator)
                .map(|(_, name)| name)
                .unwrap_or(label)
        };
        name.trim().to_string()
    }

    /// Numeric value of a response cell, `None` when it is empty or not a number.
    pub fn coerce_rank(cell: Option<&str>) -> Option<f64> {
        cell?
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| !value.is_nan())
    }
}
