//! Typed failures for the record loader.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a load query. Malformed rows are not represented
/// here: the loader skips them with a warning and reports the count on
/// the returned dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unknown city {city:?}; registered cities: {known}")]
    UnknownCity { city: String, known: String },

    #[error("no data source for {city:?}: tried {} and {}.gz", path.display(), path.display())]
    SourceNotFound { city: String, path: PathBuf },

    #[error("{} is missing required column {column:?}", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
