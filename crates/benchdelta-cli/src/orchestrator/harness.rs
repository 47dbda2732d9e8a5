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

//! The external benchmark harness.

use super::process::{run_command, Capture, CommandError};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Something that runs the benchmark suite and leaves a report behind.
pub trait BenchmarkHarness {
    /// Runs the full suite against the current working copy.
    fn run(&self) -> Result<(), CommandError>;

    /// Where the report is left after a successful [`run`](Self::run).
    fn report_path(&self) -> &Path;
}

/// A harness script invoked as `<script> run` from the project root.
///
/// The script's output is streamed to the terminal.
#[derive(Debug, Clone)]
pub struct ScriptHarness {
    script: PathBuf,
    root: PathBuf,
    report: PathBuf,
}

impl ScriptHarness {
    /// Creates a harness for `script`, run in `root`, writing `report`.
    pub fn new(script: impl Into<PathBuf>, root: impl Into<PathBuf>, report: impl Into<PathBuf>) -> Self {
        Self {
            script: script.into(),
            root: root.into(),
            report: report.into(),
        }
    }
}

impl BenchmarkHarness for ScriptHarness {
    fn run(&self) -> Result<(), CommandError> {
        let mut cmd = Command::new(&self.script);
        cmd.arg("run").current_dir(&self.root);
        run_command(&mut cmd, Capture::Inherit).map(|_| ())
    }

    fn report_path(&self) -> &Path {
        &self.report
    }
}
