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

//! External command execution.
//!
//! Every collaborator call (benchmark harness, VCS) goes through
//! [`run_command`], which turns spawn failures and non-zero exits into a
//! [`CommandError`] carrying the command line and any captured output.

use std::process::{Command, Stdio};
use thiserror::Error;

/// How the child's standard streams are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// Capture stdout and stderr; they are returned and attached to errors.
    Output,
    /// Stream directly to the terminal.
    Inherit,
}

/// Captured output of a successful command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output (empty when streams were inherited).
    pub stdout: String,
    /// Standard error (empty when streams were inherited).
    pub stderr: String,
}

/// An external command could not be run or exited unsuccessfully.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The process could not be started.
    #[error("Failed to start {command}: {message}")]
    Spawn {
        /// Command line.
        command: String,
        /// OS error message.
        message: String,
    },

    /// The process exited with a non-zero status.
    #[error("Command failed ({}): {command}{}", exit_code(.code), details(.stdout, .stderr))]
    Failed {
        /// Command line.
        command: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },
}

fn exit_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

fn details(stdout: &str, stderr: &str) -> String {
    let (stdout, stderr) = (stdout.trim(), stderr.trim());
    if stdout.is_empty() && stderr.is_empty() {
        String::new()
    } else {
        format!("\nstdout:\n{}\n\nstderr:\n{}", stdout, stderr)
    }
}

/// Renders a command as `program arg1 arg2 ...`.
pub fn describe(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs a command to completion.
///
/// # Errors
///
/// Returns [`CommandError::Spawn`] if the program cannot be started and
/// [`CommandError::Failed`] if it exits with a non-zero status.
pub fn run_command(cmd: &mut Command, capture: Capture) -> Result<CommandOutput, CommandError> {
    let command = describe(cmd);
    tracing::debug!(%command, ?capture, "running command");

    let result = match capture {
        Capture::Output => cmd.stdin(Stdio::null()).output().map(|out| {
            (
                out.status,
                String::from_utf8_lossy(&out.stdout).into_owned(),
                String::from_utf8_lossy(&out.stderr).into_owned(),
            )
        }),
        Capture::Inherit => cmd.status().map(|status| (status, String::new(), String::new())),
    };

    let (status, stdout, stderr) = result.map_err(|e| CommandError::Spawn {
        command: command.clone(),
        message: e.to_string(),
    })?;

    if !status.success() {
        tracing::debug!(%command, code = ?status.code(), "command failed");
        return Err(CommandError::Failed {
            command,
            code: status.code(),
            stdout,
            stderr,
        });
    }

    Ok(CommandOutput { stdout, stderr })
}
