// Dweve benchdelta - Benchmark Delta Reporting
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Structured error types for the benchdelta command-line tools.
//!
//! All command and orchestrator operations return `Result<T, CliError>`.
//! Errors carry enough context (paths, command lines, exit codes, captured
//! output) to diagnose a failed run without re-running it.

use crate::orchestrator::CommandError;
use benchdelta_core::ReportError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// The main error type for benchdelta CLI operations.
///
/// # Examples
///
/// ```rust,no_run
/// use benchdelta_cli::error::CliError;
///
/// fn read_report(path: &str) -> Result<String, CliError> {
///     std::fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
/// }
/// ```
#[derive(Error, Debug)]
pub enum CliError {
    /// An input report given on the command line does not exist.
    #[error("{role} file not found: {path}")]
    FileNotFound {
        /// Which input was missing ("Base" or "New").
        role: &'static str,
        /// The path as given, after `~` expansion.
        path: PathBuf,
    },

    /// File system operation failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// A report could not be loaded.
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// An external command (benchmark harness or VCS) failed.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// The harness finished but left no report behind.
    #[error("Benchmark output not found at {path}")]
    ReportMissing {
        /// Expected report location.
        path: PathBuf,
    },

    /// The run was interrupted with Ctrl+C.
    #[error("Interrupted")]
    Interrupted,

    /// The run configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON output could not be produced.
    #[error("JSON format error: {message}")]
    Json {
        /// The error message
        message: String,
    },
}

impl CliError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Returns `true` for errors about missing input files, which the
    /// comparison tool reports on stdout.
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }
}

impl From<serde_json::Error> for CliError {
    fn from(source: serde_json::Error) -> Self {
        Self::Json {
            message: source.to_string(),
        }
    }
}
