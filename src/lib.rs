//! Course Rankings - mean survey ranks of core courses
//!
//! Loads a survey export, averages the rank each respondent gave every core
//! course, and writes the sorted results as a CSV table and a bar chart.

pub mod charts;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod report;
pub mod stats;

pub use config::RankingConfig;
pub use pipeline::{run, PipelineError, RankingOutput};
