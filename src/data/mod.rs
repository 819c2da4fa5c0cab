//! Data module - survey loading and processing

mod loader;
mod processor;

pub use loader::{LoadError, SurveyLoader};
pub use processor::{CourseResponses, SchemaError, SurveyProcessor};
