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

//! Error types for report loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for report loading operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors raised while reading a benchmark report.
///
/// Unparsable cells are not errors; they load as missing values. Only a
/// report that cannot be read at all, or whose CSV structure cannot be
/// decoded, produces a `ReportError`.
///
/// # Examples
///
/// ```
/// use benchdelta_core::ReportError;
///
/// let err = ReportError::Csv {
///     line: 3,
///     message: "invalid UTF-8".to_string(),
/// };
/// assert_eq!(err.to_string(), "CSV error at line 3: invalid UTF-8");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// The report file could not be read.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// Path of the report.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },

    /// A record could not be decoded.
    #[error("CSV error at line {line}: {message}")]
    Csv {
        /// 1-based line number reported by the CSV reader.
        line: u64,
        /// Underlying error message.
        message: String,
    },
}

impl ReportError {
    /// Creates an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }
}

impl From<csv::Error> for ReportError {
    fn from(source: csv::Error) -> Self {
        let line = source.position().map(|p| p.line()).unwrap_or(0);
        Self::Csv {
            line,
            message: source.to_string(),
        }
    }
}
