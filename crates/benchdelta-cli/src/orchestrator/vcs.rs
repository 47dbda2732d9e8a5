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

//! The version-control oracle.

use super::process::{run_command, Capture, CommandError};
use std::path::PathBuf;
use std::process::Command;

/// Operations the orchestrator needs from version control.
pub trait VersionControl {
    /// Starts a new working-copy change on top of the parent of the current
    /// change, so the parent's tree is checked out.
    fn checkout_parent(&self) -> Result<(), CommandError>;

    /// Reverts the last operation, returning to the original change.
    fn undo(&self) -> Result<(), CommandError>;

    /// Reads the description of the current change.
    fn description(&self) -> Result<String, CommandError>;

    /// Overwrites the description of the current change.
    fn set_description(&self, text: &str) -> Result<(), CommandError>;

    /// Short name used in progress messages.
    fn name(&self) -> &str {
        "vcs"
    }
}

/// Jujutsu (`jj`) driven through its command line.
#[derive(Debug, Clone)]
pub struct Jujutsu {
    binary: PathBuf,
    root: PathBuf,
}

impl Jujutsu {
    /// Creates a client running `binary` inside `root`.
    pub fn new(binary: impl Into<PathBuf>, root: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            root: root.into(),
        }
    }

    fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let mut cmd = Command::new(&self.binary);
        cmd.args(args).current_dir(&self.root);
        cmd
    }
}

impl VersionControl for Jujutsu {
    fn checkout_parent(&self) -> Result<(), CommandError> {
        run_command(&mut self.command(["new", "@-"]), Capture::Inherit).map(|_| ())
    }

    fn undo(&self) -> Result<(), CommandError> {
        run_command(&mut self.command(["undo"]), Capture::Inherit).map(|_| ())
    }

    fn description(&self) -> Result<String, CommandError> {
        let out = run_command(
            &mut self.command(["log", "-r", "@", "--no-graph", "-T", "description"]),
            Capture::Output,
        )?;
        Ok(out.stdout.trim_end_matches('\n').to_string())
    }

    fn set_description(&self, text: &str) -> Result<(), CommandError> {
        run_command(&mut self.command(["describe", "-m", text]), Capture::Inherit).map(|_| ())
    }

    fn name(&self) -> &str {
        "jj"
    }
}
