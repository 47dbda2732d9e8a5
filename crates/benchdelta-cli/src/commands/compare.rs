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

//! Compare command - side-by-side view of two reports

use super::{expand_home, require_file};
use crate::cli::OutputFormat;
use crate::error::Result;
use benchdelta_core::ResultSet;

/// Compares the report at `base` with the report at `new` and prints the
/// result to stdout.
///
/// # Errors
///
/// Returns [`CliError::FileNotFound`](crate::error::CliError::FileNotFound)
/// if either path is not a file, or a report error if a file cannot be read.
pub fn compare(base: &str, new: &str, format: OutputFormat) -> Result<()> {
    let base_path = expand_home(base);
    let new_path = expand_home(new);
    require_file("Base", &base_path)?;
    require_file("New", &new_path)?;

    let base_results = ResultSet::from_path(&base_path)?;
    let new_results = ResultSet::from_path(&new_path)?;
    tracing::debug!(
        base = base_results.len(),
        new = new_results.len(),
        "loaded reports"
    );

    let comparison = benchdelta_core::compare(&base_results, &new_results);
    match format {
        OutputFormat::Table => println!("{}", comparison.render_table()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&comparison)?),
    }
    Ok(())
}
