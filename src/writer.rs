use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Failed to create output directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to create dataset file '{0}'")]
    FileCreate(PathBuf, #[source] std::io::Error),

    #[error("Failed to write CSV to '{0}'")]
    CsvWrite(PathBuf, #[source] PolarsError),

    #[error("Failed to build table '{table}'")]
    Table {
        table: String,
        #[source]
        source: PolarsError,
    },
}

/// Persists one named table per call.
pub trait DatasetWriter {
    /// Writes `frame` as `table_name`, returning where it ended up.
    fn write(&mut self, table_name: &str, frame: &mut DataFrame) -> Result<PathBuf, WriteError>;
}

/// Writes each table as `<dir>/<table_name>.csv`, header row included.
#[derive(Debug, Clone)]
pub struct CsvDatasetWriter {
    dir: PathBuf,
}

impl CsvDatasetWriter {
    /// Creates the output directory (and its parents) if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, WriteError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| WriteError::OutputDirCreation(dir.clone(), e))?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, table_name: &str) -> PathBuf {
        self.dir.join(format!("{table_name}.csv"))
    }
}

impl DatasetWriter for CsvDatasetWriter {
    fn write(&mut self, table_name: &str, frame: &mut DataFrame) -> Result<PathBuf, WriteError> {
        let path = self.path_for(table_name);
        let mut file = File::create(&path).map_err(|e| WriteError::FileCreate(path.clone(), e))?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(frame)
            .map_err(|e| WriteError::CsvWrite(path.clone(), e))?;
        Ok(path)
    }
}
