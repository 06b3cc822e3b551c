//! Typed error hierarchy for getter.
//!
//! Core-engine functions return `Result<T, GetterError>` (or, for per-task
//! HTTP failures that must not abort a run, store the failure on the
//! `Task` itself, see `task.rs`). Only the CLI binary converts a terminal
//! `Err` into a printed diagnostic and a process exit code.

use std::fmt;

#[derive(Debug, Clone)]
pub enum GetterError {
    /// Wrong argument count or otherwise malformed CLI invocation.
    Usage { message: String },
    /// Filesystem setup failure: creating the download directory, opening
    /// the URL file, writing or reading a chunk file.
    Io {
        operation: String,
        path: Option<String>,
        source: String,
    },
    /// DNS, connect, socket read/write, or timeout failure.
    Network {
        operation: String,
        host: Option<String>,
        source: String,
    },
    /// Config file present but unreadable or not valid JSON.
    Config { operation: String, source: String },
}

impl fmt::Display for GetterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GetterError::Usage { message } => write!(f, "usage error: {}", message),
            GetterError::Io { operation, path, source } => {
                write!(f, "I/O error in {}: {}", operation, source)?;
                if let Some(path) = path {
                    write!(f, " (path: {})", path)?;
                }
                Ok(())
            }
            GetterError::Network { operation, host, source } => {
                write!(f, "network error in {}: {}", operation, source)?;
                if let Some(host) = host {
                    write!(f, " (host: {})", host)?;
                }
                Ok(())
            }
            GetterError::Config { operation, source } => {
                write!(f, "config error in {}: {}", operation, source)
            }
        }
    }
}

impl std::error::Error for GetterError {}

pub fn io_error(operation: &str, path: Option<&str>, source: std::io::Error) -> GetterError {
    GetterError::Io {
        operation: operation.to_string(),
        path: path.map(String::from),
        source: source.to_string(),
    }
}

pub fn network_error(operation: &str, host: Option<&str>, source: impl fmt::Display) -> GetterError {
    GetterError::Network {
        operation: operation.to_string(),
        host: host.map(String::from),
        source: source.to_string(),
    }
}
