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

//! Benchmark report comparison and trailer editing.
//!
//! This crate holds the pure, I/O-light parts of benchdelta:
//!
//! - **[`units`]**: lossy parsing of duration (`"1.2 μs"`) and size (`"64 B"`)
//!   strings into seconds and bytes, and formatting back for display
//! - **[`results`]**: loading a CSV benchmark report into a [`ResultSet`]
//! - **[`compare`](mod@compare)**: percentage deltas between two result sets,
//!   rendered as an aligned table and a one-entry-per-benchmark summary
//! - **[`trailer`]**: inserting or replacing a `Key: value` trailer in a
//!   change description
//!
//! # Examples
//!
//! ```
//! use benchdelta_core::{apply_trailer, compare, ResultSet};
//!
//! let base = ResultSet::load("Method,Mean,StdDev,Allocated\nFoo,120.000 ns,1 ns,64 B\n")?;
//! let new = ResultSet::load("Method,Mean,StdDev,Allocated\nFoo,96.000 ns,1 ns,64 B\n")?;
//!
//! let comparison = compare(&base, &new);
//! println!("{}", comparison.render_table());
//!
//! let description = apply_trailer("Speed up Foo\n", "Benchmark", &comparison.summary());
//! assert_eq!(
//!     description,
//!     "Speed up Foo\n\nBenchmark: Foo: -20.0% (120.000 ns -> 96.000 ns)\n"
//! );
//! # Ok::<(), benchdelta_core::ReportError>(())
//! ```
//!
//! # Missing values
//!
//! A cell that cannot be parsed loads as `None`. Every delta that involves a
//! `None`, or a zero base value, is rendered as `n/a`; nothing in this crate
//! fails because of report content.

pub mod compare;
mod error;
pub mod results;
pub mod trailer;
pub mod units;

pub use compare::{compare, Comparison, ComparisonRow};
pub use error::{ReportError, Result};
pub use results::{BenchmarkResult, ReportFormat, ResultSet};
pub use trailer::{apply_trailer, DescriptionText, Trailer};
