//! Writing finished runs to disk.

pub mod csv;
pub mod plot;

use std::io::Write;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not draw plot: {0}")]
    Plot(String),
}

/// Pretty-printed JSON of any serializable engine view.
pub fn write_json<W: Write, T: Serialize>(writer: &mut W, value: &T) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}
