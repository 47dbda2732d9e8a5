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

//! Benchmark report loading.
//!
//! A report is a header-keyed CSV table with one row per measured operation,
//! as written by BenchmarkDotNet-style harnesses:
//!
//! ```text
//! Method,Mean,Error,StdDev,Allocated
//! Parse,"1,204.3 ns",3.1 ns,2.9 ns,64 B
//! Render,12.41 μs,0.08 μs,0.07 μs,1.2 KB
//! ```
//!
//! Only the name, mean, standard deviation and allocation columns are read.
//! Cells that do not parse load as `None` and rows are never rejected.

use crate::error::{ReportError, Result};
use crate::units::{parse_duration, parse_size};
use std::collections::btree_map::{self, BTreeMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One row of a benchmark report.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BenchmarkResult {
    /// Mean duration in seconds.
    pub mean_seconds: Option<f64>,
    /// Standard deviation of the duration in seconds.
    pub stddev_seconds: Option<f64>,
    /// Memory allocated per operation in bytes.
    pub allocated_bytes: Option<f64>,
}

impl BenchmarkResult {
    /// Creates a result from already-canonical values.
    pub fn new(
        mean_seconds: Option<f64>,
        stddev_seconds: Option<f64>,
        allocated_bytes: Option<f64>,
    ) -> Self {
        Self {
            mean_seconds,
            stddev_seconds,
            allocated_bytes,
        }
    }
}

/// Column layout of a report.
///
/// # Examples
///
/// ```
/// use benchdelta_core::ReportFormat;
///
/// let format = ReportFormat::default()
///     .with_name_column("Benchmark")
///     .with_delimiter(b';');
/// assert_eq!(format.mean_column, "Mean");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFormat {
    /// Field delimiter (default: `,`).
    pub delimiter: u8,
    /// Column holding the benchmark name (default: `Method`).
    pub name_column: String,
    /// Column holding the mean duration (default: `Mean`).
    pub mean_column: String,
    /// Column holding the duration standard deviation (default: `StdDev`).
    pub stddev_column: String,
    /// Column holding the allocation per operation (default: `Allocated`).
    pub allocated_column: String,
}

impl Default for ReportFormat {
    fn default() -> Self {
        Self {
            delimiter: b',',
            name_column: "Method".to_string(),
            mean_column: "Mean".to_string(),
            stddev_column: "StdDev".to_string(),
            allocated_column: "Allocated".to_string(),
        }
    }
}

impl ReportFormat {
    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the name column.
    pub fn with_name_column(mut self, column: impl Into<String>) -> Self {
        self.name_column = column.into();
        self
    }
}

/// Benchmark results keyed by name.
///
/// Names are case-sensitive and iterate in lexicographic order. A set is
/// built once from a report and is not modified afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    results: BTreeMap<String, BenchmarkResult>,
}

impl ResultSet {
    /// Loads a report from CSV text using the default column layout.
    ///
    /// # Examples
    ///
    /// ```
    /// use benchdelta_core::ResultSet;
    ///
    /// let set = ResultSet::load("Method,Mean,StdDev,Allocated\nFoo,120.0 ns,1.0 ns,64 B\n").unwrap();
    /// let foo = set.get("Foo").unwrap();
    /// assert_eq!(foo.allocated_bytes, Some(64.0));
    /// ```
    pub fn load(report: &str) -> Result<Self> {
        Self::load_with_format(report, &ReportFormat::default())
    }

    /// Loads a report from CSV text with a custom column layout.
    pub fn load_with_format(report: &str, format: &ReportFormat) -> Result<Self> {
        Self::from_reader(report.as_bytes(), format)
    }

    /// Loads a report file using the default column layout.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_path_with_format(path, &ReportFormat::default())
    }

    /// Loads a report file with a custom column layout.
    pub fn from_path_with_format(path: impl AsRef<Path>, format: &ReportFormat) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ReportError::io_error(path, e))?;
        let set = Self::from_reader(file, format)?;
        tracing::debug!(path = %path.display(), benchmarks = set.len(), "loaded report");
        Ok(set)
    }

    /// Loads a report from any reader.
    ///
    /// Rows may be shorter than the header; absent cells load as `None`.
    /// Invalid UTF-8 is replaced rather than rejected, so a garbled cell
    /// simply fails to parse. A name that appears twice keeps the values of
    /// its last row.
    pub fn from_reader<R: Read>(reader: R, format: &ReportFormat) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(format.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.byte_headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| String::from_utf8_lossy(h).trim() == name)
        };
        let name_idx = column(&format.name_column);
        let mean_idx = column(&format.mean_column);
        let stddev_idx = column(&format.stddev_column);
        let allocated_idx = column(&format.allocated_column);

        let mut results = BTreeMap::new();
        for record in csv_reader.byte_records() {
            let record = record?;
            let cell = |idx: Option<usize>| {
                idx.and_then(|i| record.get(i))
                    .map(String::from_utf8_lossy)
                    .unwrap_or_default()
            };

            let raw_name = cell(name_idx);
            let name = clean_name(&raw_name);
            let result = BenchmarkResult {
                mean_seconds: parse_duration(&cell(mean_idx)),
                stddev_seconds: parse_duration(&cell(stddev_idx)),
                allocated_bytes: parse_size(&cell(allocated_idx)),
            };

            if results.insert(name.to_string(), result).is_some() {
                tracing::debug!(name, "duplicate benchmark name, keeping last row");
            }
        }

        Ok(Self { results })
    }

    /// Looks up a benchmark by exact name.
    pub fn get(&self, name: &str) -> Option<&BenchmarkResult> {
        self.results.get(name)
    }

    /// Benchmark names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.results.keys().map(String::as_str)
    }

    /// Iterates over `(name, result)` pairs in lexicographic order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, BenchmarkResult> {
        self.results.iter()
    }

    /// Number of benchmarks in the set.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns `true` if the report had no rows.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl FromIterator<(String, BenchmarkResult)> for ResultSet {
    fn from_iter<I: IntoIterator<Item = (String, BenchmarkResult)>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = (&'a String, &'a BenchmarkResult);
    type IntoIter = btree_map::Iter<'a, String, BenchmarkResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Harnesses sometimes quote method names; strip whitespace and quotes.
fn clean_name(raw: &str) -> &str {
    raw.trim().trim_matches(|c| c == '\'' || c == '"')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const REPORT: &str = "\
Method,Mean,Error,StdDev,Allocated
Foo,120.000 ns,0.5 ns,1.000 ns,64 B
Bar,\"1,250.5 us\",3 us,2.5 us,1.5 KB
";

    #[test]
    fn test_load_basic_report() {
        let set = ResultSet::load(REPORT).unwrap();
        assert_eq!(set.len(), 2);

        let foo = set.get("Foo").unwrap();
        assert!((foo.mean_seconds.unwrap() - 120e-9).abs() < 1e-15);
        assert!((foo.stddev_seconds.unwrap() - 1e-9).abs() < 1e-15);
        assert_eq!(foo.allocated_bytes, Some(64.0));

        let bar = set.get("Bar").unwrap();
        assert!((bar.mean_seconds.unwrap() - 1250.5e-6).abs() < 1e-12);
        assert_eq!(bar.allocated_bytes, Some(1536.0));
    }

    #[test]
    fn test_invalid_utf8_cell_does_not_reject_report() {
        let mut report = b"Method,Mean,Allocated\nFoo,120.000 ns,64 B\nBar,".to_vec();
        report.extend_from_slice(&[0xff, 0xfe]);
        report.extend_from_slice(b" ns,1 KB\n");

        let set = ResultSet::from_reader(report.as_slice(), &ReportFormat::default()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("Bar").unwrap().mean_seconds, None);
        assert_eq!(set.get("Bar").unwrap().allocated_bytes, Some(1024.0));
        assert!(set.get("Foo").unwrap().mean_seconds.is_some());
    }

    #[test]
    fn test_names_are_sorted() {
        let set = ResultSet::load(REPORT).unwrap();
        let names: Vec<&str> = set.names().collect();
        assert_eq!(names, vec!["Bar", "Foo"]);
    }

    #[test]
    fn test_quoted_names_are_stripped() {
        let report = "Method,Mean,StdDev,Allocated\n\"'Parse'\",1 ms,,\n  Render  ,2 ms,,\n";
        let set = ResultSet::load(report).unwrap();
        assert!(set.get("Parse").is_some());
        assert!(set.get("Render").is_some());
    }

    #[test]
    fn test_empty_cells_load_as_none() {
        let report = "Method,Mean,StdDev,Allocated\nFoo,,,-\n";
        let set = ResultSet::load(report).unwrap();
        let foo = set.get("Foo").unwrap();
        assert_eq!(foo.mean_seconds, None);
        assert_eq!(foo.stddev_seconds, None);
        assert_eq!(foo.allocated_bytes, None);
    }

    #[test]
    fn test_missing_columns_load_as_none() {
        let report = "Method,Mean\nFoo,5 ms\n";
        let set = ResultSet::load(report).unwrap();
        let foo = set.get("Foo").unwrap();
        assert_eq!(foo.mean_seconds, Some(5e-3));
        assert_eq!(foo.stddev_seconds, None);
        assert_eq!(foo.allocated_bytes, None);
    }

    #[test]
    fn test_short_rows_are_kept() {
        let report = "Method,Mean,StdDev,Allocated\nFoo,1 s\n";
        let set = ResultSet::load(report).unwrap();
        assert_eq!(set.get("Foo").unwrap().mean_seconds, Some(1.0));
        assert_eq!(set.get("Foo").unwrap().allocated_bytes, None);
    }

    #[test]
    fn test_missing_name_column_uses_empty_name() {
        let report = "Mean,Allocated\n1 s,1 B\n";
        let set = ResultSet::load(report).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.get("").is_some());
    }

    #[test]
    fn test_duplicate_name_last_wins() {
        let report = "Method,Mean\nFoo,1 ms\nFoo,2 ms\n";
        let set = ResultSet::load(report).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("Foo").unwrap().mean_seconds, Some(2e-3));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let report = "Method,Mean\nfoo,1 ms\nFoo,2 ms\n";
        let set = ResultSet::load(report).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_custom_format() {
        let report = "Benchmark;Mean;StdDev;Allocated\nFoo;3 ns;;8 B\n";
        let format = ReportFormat::default()
            .with_name_column("Benchmark")
            .with_delimiter(b';');
        let set = ResultSet::load_with_format(report, &format).unwrap();
        assert_eq!(set.get("Foo").unwrap().allocated_bytes, Some(8.0));
    }

    #[test]
    fn test_header_only_report_is_empty() {
        let set = ResultSet::load("Method,Mean,StdDev,Allocated\n").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(REPORT.as_bytes()).unwrap();

        let set = ResultSet::from_path(file.path()).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = ResultSet::from_path("/nonexistent/report.csv").unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }

    #[test]
    fn test_invalid_utf8_name_is_replaced() {
        let bytes: &[u8] = b"Method,Mean\n\xff\xfe,1 ms\n";
        let set = ResultSet::from_reader(bytes, &ReportFormat::default()).unwrap();
        let result = set.get("\u{fffd}\u{fffd}").unwrap();
        assert!((result.mean_seconds.unwrap() - 1e-3).abs() < 1e-12);
    }
}
