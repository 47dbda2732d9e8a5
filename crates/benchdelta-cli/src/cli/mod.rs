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

//! Command-line argument definitions for both tools.
//!
//! - [`CompareArgs`]: `bench-compare <BASE> <NEW>`
//! - [`TrailerArgs`]: `bench-trailer [OPTIONS]`

use crate::commands;
use crate::config::RunConfig;
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format of the comparison tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// Comparison rows as JSON
    Json,
}

/// Compare two BenchmarkDotNet CSV reports
///
/// Prints one row per benchmark with the mean and allocation of both reports
/// and the relative change between them.
#[derive(Parser, Debug)]
#[command(name = "bench-compare", version, long_about = None)]
pub struct CompareArgs {
    /// Baseline report
    #[arg(value_name = "BASE")]
    pub base: String,

    /// Report to compare against the baseline
    #[arg(value_name = "NEW")]
    pub new: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl CompareArgs {
    /// Runs the comparison.
    pub fn execute(self) -> Result<()> {
        commands::compare(&self.base, &self.new, self.format)
    }
}

/// Benchmark the current change against its parent
///
/// Runs the benchmark harness on the current jj change and on its parent,
/// restores the working copy, and records the difference as a trailer on the
/// current change's description.
///
/// Every option can also be set through its BENCHDELTA_* environment variable.
#[derive(Parser, Debug, Default)]
#[command(name = "bench-trailer", version, long_about = None)]
pub struct TrailerArgs {
    /// Project root [env: BENCHDELTA_ROOT] [default: current directory]
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Harness script, run as `<SCRIPT> run` [env: BENCHDELTA_HARNESS]
    #[arg(long, value_name = "SCRIPT")]
    pub harness: Option<PathBuf>,

    /// Report left behind by the harness [env: BENCHDELTA_REPORT]
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// jj executable [env: BENCHDELTA_VCS]
    #[arg(long, value_name = "PROGRAM")]
    pub vcs: Option<PathBuf>,

    /// Trailer key [env: BENCHDELTA_TRAILER_KEY] [default: Benchmark]
    #[arg(short, long, value_name = "KEY")]
    pub key: Option<String>,

    /// Log orchestration steps to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl TrailerArgs {
    /// Layers the flags over the environment and defaults.
    pub fn config(&self) -> Result<RunConfig> {
        Ok(self.apply(RunConfig::from_env()?))
    }

    fn apply(&self, mut config: RunConfig) -> RunConfig {
        if let Some(root) = &self.root {
            config = config.with_root(root);
        }
        if let Some(harness) = &self.harness {
            config = config.with_harness(harness);
        }
        if let Some(report) = &self.report {
            config = config.with_report(report);
        }
        if let Some(vcs) = &self.vcs {
            config = config.with_vcs(vcs);
        }
        if let Some(key) = &self.key {
            config = config.with_trailer_key(key);
        }
        config
    }

    /// Runs the orchestrator.
    pub fn execute(self) -> Result<()> {
        let config = self.config()?;
        commands::trailer(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definitions_are_valid() {
        CompareArgs::command().debug_assert();
        TrailerArgs::command().debug_assert();
    }

    #[test]
    fn test_compare_args() {
        let args = CompareArgs::try_parse_from(["bench-compare", "a.csv", "b.csv"]).unwrap();
        assert_eq!(args.base, "a.csv");
        assert_eq!(args.new, "b.csv");
        assert_eq!(args.format, OutputFormat::Table);

        let args =
            CompareArgs::try_parse_from(["bench-compare", "a.csv", "b.csv", "--format", "json"])
                .unwrap();
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_compare_requires_two_reports() {
        assert!(CompareArgs::try_parse_from(["bench-compare", "a.csv"]).is_err());
        assert!(CompareArgs::try_parse_from(["bench-compare", "a", "b", "c"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let args = TrailerArgs::try_parse_from([
            "bench-trailer",
            "--root",
            "/repo",
            "--harness",
            "bench.sh",
            "-k",
            "Perf",
        ])
        .unwrap();

        let config = args.apply(RunConfig::new("/cwd").with_trailer_key("Env"));
        assert_eq!(config.harness_path(), PathBuf::from("/repo/bench.sh"));
        assert_eq!(config.trailer_key, "Perf");
        assert_eq!(config.vcs, PathBuf::from("jj"));
    }

    #[test]
    fn test_unset_flags_keep_config() {
        let config = TrailerArgs::default().apply(RunConfig::new("/cwd").with_vcs("/opt/jj"));
        assert_eq!(config.vcs, PathBuf::from("/opt/jj"));
        assert_eq!(config.root, PathBuf::from("/cwd"));
    }
}
