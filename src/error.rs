// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error type for the fallible outer surfaces.
//!
//! Highlighting itself never fails. Errors only come from the background
//! worker and from loading scripts off disk.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced outside the highlighting core.
#[derive(Debug, Error)]
pub enum Error {
    /// The highlight worker thread has stopped.
    #[error("highlight worker is no longer running")]
    WorkerDisconnected,

    /// The highlight worker thread panicked.
    #[error("highlight worker panicked")]
    WorkerPanicked,

    /// The highlight worker could not be started.
    #[error("failed to spawn highlight worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    /// A script could not be read.
    #[error("I/O error reading {path}: {error}")]
    Io {
        /// Path to the file that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        error: std::io::Error,
    },
}

/// Result type for fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reads a script from disk.
pub fn read_script(path: impl Into<PathBuf>) -> Result<String> {
    let path = path.into();
    std::fs::read_to_string(&path).map_err(|error| Error::Io { path, error })
}
