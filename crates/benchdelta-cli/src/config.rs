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

//! Run configuration for the orchestrator tool.
//!
//! Values are layered: command-line flags override environment variables,
//! which override the defaults below. Relative harness and report paths are
//! resolved against the project root.

use crate::error::{CliError, Result};
use std::path::{Path, PathBuf};

/// Harness script, relative to the project root.
pub const DEFAULT_HARNESS: &str = "benchmark.sh";

/// Report written by the harness, relative to the project root.
pub const DEFAULT_REPORT: &str = "BenchmarkDotNet.Artifacts/results/Benchmarks-report.csv";

/// Version-control executable.
pub const DEFAULT_VCS: &str = "jj";

/// Trailer key written to the change description.
pub const DEFAULT_TRAILER_KEY: &str = "Benchmark";

/// Prefix of the temporary directory holding staged reports.
pub const STAGING_PREFIX: &str = "jj-bench-";

/// Environment variable overriding the project root.
pub const ENV_ROOT: &str = "BENCHDELTA_ROOT";
/// Environment variable overriding the harness script.
pub const ENV_HARNESS: &str = "BENCHDELTA_HARNESS";
/// Environment variable overriding the report path.
pub const ENV_REPORT: &str = "BENCHDELTA_REPORT";
/// Environment variable overriding the VCS executable.
pub const ENV_VCS: &str = "BENCHDELTA_VCS";
/// Environment variable overriding the trailer key.
pub const ENV_TRAILER_KEY: &str = "BENCHDELTA_TRAILER_KEY";

/// Everything needed to run the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Project root; harness and VCS run here.
    pub root: PathBuf,
    /// Harness script, possibly relative to `root`.
    pub harness: PathBuf,
    /// Report path, possibly relative to `root`.
    pub report: PathBuf,
    /// VCS executable, looked up on `PATH` when it is a bare name.
    pub vcs: PathBuf,
    /// Trailer key.
    pub trailer_key: String,
}

impl RunConfig {
    /// Defaults for a project rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            harness: PathBuf::from(DEFAULT_HARNESS),
            report: PathBuf::from(DEFAULT_REPORT),
            vcs: PathBuf::from(DEFAULT_VCS),
            trailer_key: DEFAULT_TRAILER_KEY.to_string(),
        }
    }

    /// Defaults overridden by the `BENCHDELTA_*` environment variables.
    ///
    /// The root falls back to the current directory.
    pub fn from_env() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| CliError::io_error(".", e))?;
        Ok(Self::from_lookup(cwd, |name| std::env::var(name).ok()))
    }

    /// Like [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(cwd: impl Into<PathBuf>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let root = var(ENV_ROOT).map(PathBuf::from).unwrap_or_else(|| cwd.into());
        let mut config = Self::new(root);
        if let Some(harness) = var(ENV_HARNESS) {
            config.harness = harness.into();
        }
        if let Some(report) = var(ENV_REPORT) {
            config.report = report.into();
        }
        if let Some(vcs) = var(ENV_VCS) {
            config.vcs = vcs.into();
        }
        if let Some(key) = var(ENV_TRAILER_KEY) {
            config.trailer_key = key;
        }
        config
    }

    /// Sets the project root.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Sets the harness script.
    pub fn with_harness(mut self, harness: impl Into<PathBuf>) -> Self {
        self.harness = harness.into();
        self
    }

    /// Sets the report path.
    pub fn with_report(mut self, report: impl Into<PathBuf>) -> Self {
        self.report = report.into();
        self
    }

    /// Sets the VCS executable.
    pub fn with_vcs(mut self, vcs: impl Into<PathBuf>) -> Self {
        self.vcs = vcs.into();
        self
    }

    /// Sets the trailer key.
    pub fn with_trailer_key(mut self, key: impl Into<String>) -> Self {
        self.trailer_key = key.into();
        self
    }

    /// Harness script resolved against the root.
    pub fn harness_path(&self) -> PathBuf {
        resolve(&self.root, &self.harness)
    }

    /// Report path resolved against the root.
    pub fn report_path(&self) -> PathBuf {
        resolve(&self.root, &self.report)
    }

    /// Checks that the configuration can drive a run.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidConfig`] if the root is not a directory or
    /// the trailer key would not be recognized as a trailer.
    pub fn validate(&self) -> Result<()> {
        if !self.root.is_dir() {
            return Err(CliError::invalid_config(format!(
                "project root '{}' is not a directory",
                self.root.display()
            )));
        }
        if !is_trailer_key(&self.trailer_key) {
            return Err(CliError::invalid_config(format!(
                "'{}' is not a valid trailer key (letters, digits and '-', starting with a letter or digit)",
                self.trailer_key
            )));
        }
        Ok(())
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

fn is_trailer_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RunConfig::from_lookup("/work/project", lookup(&[]));

        assert_eq!(config.root, PathBuf::from("/work/project"));
        assert_eq!(config.harness_path(), PathBuf::from("/work/project/benchmark.sh"));
        assert_eq!(
            config.report_path(),
            PathBuf::from("/work/project/BenchmarkDotNet.Artifacts/results/Benchmarks-report.csv")
        );
        assert_eq!(config.vcs, PathBuf::from("jj"));
        assert_eq!(config.trailer_key, "Benchmark");
    }

    #[test]
    fn test_env_overrides_defaults() {
        let config = RunConfig::from_lookup(
            "/cwd",
            lookup(&[
                (ENV_ROOT, "/repo"),
                (ENV_HARNESS, "scripts/bench.sh"),
                (ENV_REPORT, "/tmp/report.csv"),
                (ENV_VCS, "/opt/jj"),
                (ENV_TRAILER_KEY, "Perf"),
            ]),
        );

        assert_eq!(config.harness_path(), PathBuf::from("/repo/scripts/bench.sh"));
        assert_eq!(config.report_path(), PathBuf::from("/tmp/report.csv"));
        assert_eq!(config.vcs, PathBuf::from("/opt/jj"));
        assert_eq!(config.trailer_key, "Perf");
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let config = RunConfig::from_lookup("/cwd", lookup(&[(ENV_ROOT, ""), (ENV_VCS, "")]));
        assert_eq!(config.root, PathBuf::from("/cwd"));
        assert_eq!(config.vcs, PathBuf::from("jj"));
    }

    #[test]
    fn test_builders_override_env() {
        let config = RunConfig::from_lookup("/cwd", lookup(&[(ENV_TRAILER_KEY, "Perf")]))
            .with_trailer_key("Bench")
            .with_root("/other");

        assert_eq!(config.trailer_key, "Bench");
        assert_eq!(config.harness_path(), PathBuf::from("/other/benchmark.sh"));
    }

    #[test]
    fn test_validate() {
        let dir = TempDir::new().unwrap();
        assert!(RunConfig::new(dir.path()).validate().is_ok());

        let missing = RunConfig::new(dir.path().join("missing"));
        assert!(matches!(
            missing.validate(),
            Err(CliError::InvalidConfig(_))
        ));

        for key in ["", "-Bench", "Bench mark", "Bench:"] {
            let config = RunConfig::new(dir.path()).with_trailer_key(key);
            assert!(config.validate().is_err(), "{key:?} accepted");
        }
        assert!(RunConfig::new(dir.path())
            .with_trailer_key("Perf-Delta2")
            .validate()
            .is_ok());
    }
}
