//! FILENAME: core/dataview/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataViewError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid host payload: {0}")]
    Json(#[from] serde_json::Error),
}
