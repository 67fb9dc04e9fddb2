//! Errors for the terminal runtime and text parsing.
//!
//! The window, drag and grid engines themselves never fail: unknown ids are
//! ignored and out-of-range geometry is clamped.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown resize direction `{0}` (expected one of n, s, e, w, ne, nw, se, sw)")]
pub struct ParseEdgeError(pub String);
