//! Survey Data Loader Module
//! Reads a survey spreadsheet (or CSV export) into a string-typed Polars DataFrame.

use calamine::{open_workbook_auto, Data, Reader};
use polars::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Input file not found: {0}")]
    NotFound(PathBuf),
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("Failed to read workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        source: calamine::Error,
    },
    #[error("Sheet '{0}' not found in workbook")]
    SheetNotFound(String),
    #[error("Workbook contains no sheets")]
    NoSheets,
    #[error("Sheet has no header row")]
    EmptySheet,
    #[error("Failed to build table: {0}")]
    Table(#[from] PolarsError),
}

/// Loads survey exports. The first row always supplies the column identifiers.
///
/// Every column of the returned DataFrame is a nullable string column; numeric
/// coercion happens later, per cell.
pub struct SurveyLoader;

impl SurveyLoader {
    /// Load `path`, dispatching on its extension.
    pub fn load(path: &Path, sheet: Option<&str>) -> Result<DataFrame, LoadError> {
        if !path.is_file() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        let df = match extension.as_str() {
            "csv" => Self::load_csv(path)?,
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Self::load_workbook(path, sheet)?,
            _ => return Err(LoadError::UnsupportedFormat(path.to_path_buf())),
        };

        info!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "loaded survey table"
        );
        Ok(df)
    }

    /// Load a CSV export using Polars, reading every column as text.
    pub fn load_csv(path: &Path) -> Result<DataFrame, LoadError> {
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;
        Ok(df)
    }

    /// Load one worksheet of a workbook: the named sheet, or the first one.
    pub fn load_workbook(path: &Path, sheet: Option<&str>) -> Result<DataFrame, LoadError> {
        let workbook_error = |source| LoadError::Workbook {
            path: path.to_path_buf(),
            source,
        };

        let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;

        let range = match sheet {
            Some(name) => {
                if !workbook.sheet_names().iter().any(|s| s == name) {
                    return Err(LoadError::SheetNotFound(name.to_string()));
                }
                workbook.worksheet_range(name).map_err(workbook_error)?
            }
            None => workbook
                .worksheet_range_at(0)
                .ok_or(LoadError::NoSheets)?
                .map_err(workbook_error)?,
        };

        let mut rows = range.rows();
        let header = rows.next().ok_or(LoadError::EmptySheet)?;
        let names = Self::column_names(header.iter().map(Self::cell_text));
        debug!(columns = ?names, "workbook header");

        let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
        for row in rows {
            for (idx, column) in values.iter_mut().enumerate() {
                column.push(row.get(idx).and_then(Self::cell_text));
            }
        }

        let columns = names
            .into_iter()
            .zip(values)
            .map(|(name, column)| Column::new(name.into(), column))
            .collect();

        Ok(DataFrame::new(columns)?)
    }

    /// Text content of a cell; empty cells are `None`.
    fn cell_text(cell: &Data) -> Option<String> {
        match cell {
            Data::Empty => None,
            Data::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Turn raw header cells into unique, non-empty column names.
    ///
    /// Blank headers become `column_<n>` (1-based position), repeats get a `_<k>` suffix.
    pub fn column_names<I>(header: I) -> Vec<String>
    where
        I: IntoIterator<Item = Option<String>>,
    {
        let mut seen: HashSet<String> = HashSet::new();
        let mut names = Vec::new();

        for (idx, cell) in header.into_iter().enumerate() {
            let base = match cell.map(|s| s.trim().to_string()) {
                Some(name) if !name.is_empty() => name,
                _ => format!("column_{}", idx + 1),
            };

            let mut name = base.clone();
            let mut suffix = 1;
            while seen.contains(&name) {
                name = format!("{}_{}", base, suffix);
                suffix += 1;
            }

            seen.insert(name.clone());
            names.push(name);
        }

        names
    }
}
