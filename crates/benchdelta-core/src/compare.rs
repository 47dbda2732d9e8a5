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

//! Side-by-side comparison of two result sets.
//!
//! Compares a base report against a new one and renders the percentage change
//! of mean duration and allocation per benchmark.

use crate::results::ResultSet;
use crate::units::{format_duration, format_percent, format_size, percent_delta};
use serde::Serialize;

/// Placeholder shown for benchmarks without a name.
pub const UNKNOWN_NAME: &str = "(unknown)";

/// Table column headers.
pub const HEADERS: [&str; 7] = [
    "Benchmark",
    "Base Mean",
    "New Mean",
    "Mean Delta",
    "Base Alloc",
    "New Alloc",
    "Alloc Delta",
];

/// One benchmark compared across both reports.
///
/// Values are kept in canonical units (seconds, bytes, percent); `None` marks
/// a value that is missing on either side or could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// Benchmark name as it appears in the reports.
    pub name: String,
    /// Mean duration in the base report.
    pub base_mean: Option<f64>,
    /// Mean duration in the new report.
    pub new_mean: Option<f64>,
    /// Mean duration change in percent.
    pub mean_delta: Option<f64>,
    /// Allocation in the base report.
    pub base_alloc: Option<f64>,
    /// Allocation in the new report.
    pub new_alloc: Option<f64>,
    /// Allocation change in percent.
    pub alloc_delta: Option<f64>,
}

impl ComparisonRow {
    /// Name used for display, substituting a placeholder for empty names.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            UNKNOWN_NAME
        } else {
            &self.name
        }
    }

    /// Rendered table cells, in [`HEADERS`] order.
    pub fn cells(&self) -> [String; 7] {
        [
            self.display_name().to_string(),
            format_duration(self.base_mean),
            format_duration(self.new_mean),
            format_percent(self.mean_delta),
            format_size(self.base_alloc),
            format_size(self.new_alloc),
            format_percent(self.alloc_delta),
        ]
    }

    /// One-line duration summary: `name: <delta> (<base> -> <new>)`.
    pub fn summary_line(&self) -> String {
        format!(
            "{}: {} ({} -> {})",
            self.display_name(),
            format_percent(self.mean_delta),
            format_duration(self.base_mean),
            format_duration(self.new_mean)
        )
    }
}

/// Result of comparing two reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    rows: Vec<ComparisonRow>,
}

/// Compares `new` against `base`.
///
/// Every name present in either set produces one row, ordered by name.
///
/// # Examples
///
/// ```
/// use benchdelta_core::{compare, ResultSet};
///
/// let base = ResultSet::load("Method,Mean,Allocated\nFoo,120.000 ns,64 B\n").unwrap();
/// let new = ResultSet::load("Method,Mean,Allocated\nFoo,96.000 ns,64 B\n").unwrap();
///
/// let comparison = compare(&base, &new);
/// assert_eq!(comparison.summary(), "Foo: -20.0% (120.000 ns -> 96.000 ns)");
/// ```
pub fn compare(base: &ResultSet, new: &ResultSet) -> Comparison {
    let mut names: Vec<&str> = base.names().chain(new.names()).collect();
    names.sort_unstable();
    names.dedup();

    let rows = names
        .into_iter()
        .map(|name| {
            let base_result = base.get(name);
            let new_result = new.get(name);

            let base_mean = base_result.and_then(|r| r.mean_seconds);
            let new_mean = new_result.and_then(|r| r.mean_seconds);
            let base_alloc = base_result.and_then(|r| r.allocated_bytes);
            let new_alloc = new_result.and_then(|r| r.allocated_bytes);

            ComparisonRow {
                name: name.to_string(),
                base_mean,
                new_mean,
                mean_delta: percent_delta(base_mean, new_mean),
                base_alloc,
                new_alloc,
                alloc_delta: percent_delta(base_alloc, new_alloc),
            }
        })
        .collect();

    Comparison { rows }
}

impl Comparison {
    /// Compared rows, ordered by name.
    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    /// Returns `true` if neither report had any rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the comparison as an aligned plain-text table.
    ///
    /// Cells are left-aligned and padded to the widest value in their column,
    /// columns are separated by two spaces and a dashed rule follows the
    /// header. The result has no trailing newline.
    pub fn render_table(&self) -> String {
        let mut table: Vec<[String; 7]> = Vec::with_capacity(self.rows.len() + 1);
        table.push(HEADERS.map(str::to_string));
        table.extend(self.rows.iter().map(ComparisonRow::cells));

        let mut widths = [0usize; 7];
        for row in &table {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut lines = Vec::with_capacity(table.len() + 1);
        for (idx, row) in table.iter().enumerate() {
            let line = row
                .iter()
                .zip(widths.iter())
                .map(|(cell, &width)| pad_right(cell, width))
                .collect::<Vec<_>>()
                .join("  ");

            if idx == 0 {
                let rule = "-".repeat(line.chars().count());
                lines.push(line);
                lines.push(rule);
            } else {
                lines.push(line);
            }
        }

        lines.join("\n")
    }

    /// Duration summary, one entry per benchmark.
    ///
    /// Entries after the first are indented so the summary can be used as a
    /// multi-line trailer value.
    pub fn summary(&self) -> String {
        self.rows
            .iter()
            .map(ComparisonRow::summary_line)
            .collect::<Vec<_>>()
            .join("\n  ")
    }
}

fn pad_right(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    let mut padded = String::with_capacity(cell.len() + width.saturating_sub(len));
    padded.push_str(cell);
    padded.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    padded
}
