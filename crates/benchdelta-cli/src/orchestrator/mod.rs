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

//! Before/after benchmark runs across the parent and current change.
//!
//! The [`Orchestrator`] benchmarks the current change, switches the working
//! copy to its parent, benchmarks again, switches back, compares both reports
//! and records the summary as a trailer on the current change:
//!
//! ```text
//! Idle → RunningCurrent → SwitchedToParent → RunningParent → Restoring
//!      → Comparing → UpdatingDescription → Done
//! ```
//!
//! A failure while the parent is checked out still passes through
//! `Restoring`: the original change is restored before the error is
//! returned. The restore is tied to a [`ParentCheckout`] guard, so early
//! returns and panics restore as well.
//!
//! Collaborators sit behind the [`BenchmarkHarness`] and [`VersionControl`]
//! traits; [`ScriptHarness`] and [`Jujutsu`] drive the real command-line
//! tools.

mod guard;
mod harness;
mod interrupt;
mod process;
mod vcs;

#[cfg(test)]
pub(crate) mod testing;

pub use guard::ParentCheckout;
pub use harness::{BenchmarkHarness, ScriptHarness};
pub use interrupt::Interrupt;
pub use process::{describe, run_command, Capture, CommandError, CommandOutput};
pub use vcs::{Jujutsu, VersionControl};

use crate::config::{DEFAULT_TRAILER_KEY, STAGING_PREFIX};
use crate::error::{CliError, Result};
use benchdelta_core::{apply_trailer, compare, Comparison, ReportFormat, ResultSet};
use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

/// Progress of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Not started.
    Idle,
    /// Benchmarking the current change.
    RunningCurrent,
    /// The parent change is checked out.
    SwitchedToParent,
    /// Benchmarking the parent change.
    RunningParent,
    /// Returning to the original change.
    Restoring,
    /// Loading and comparing both reports.
    Comparing,
    /// Writing the trailer to the current change.
    UpdatingDescription,
    /// Finished successfully.
    Done,
}

/// Everything a successful run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Parent (base) against current (new) comparison.
    pub comparison: Comparison,
    /// Rendered comparison table.
    pub table: String,
    /// Trailer value.
    pub summary: String,
    /// The full trailer as written (`Key: summary`).
    pub trailer: String,
    /// The updated description of the current change.
    pub description: String,
}

/// Runs benchmarks on the current change and its parent and records the
/// difference as a trailer.
pub struct Orchestrator<H, V> {
    harness: H,
    vcs: V,
    trailer_key: String,
    format: ReportFormat,
    interrupt: Interrupt,
    state: Cell<RunState>,
}

impl<H: BenchmarkHarness, V: VersionControl> Orchestrator<H, V> {
    /// Creates an orchestrator with the default trailer key and report layout.
    pub fn new(harness: H, vcs: V) -> Self {
        Self {
            harness,
            vcs,
            trailer_key: DEFAULT_TRAILER_KEY.to_string(),
            format: ReportFormat::default(),
            interrupt: Interrupt::new(),
            state: Cell::new(RunState::Idle),
        }
    }

    /// Sets the trailer key.
    pub fn with_trailer_key(mut self, key: impl Into<String>) -> Self {
        self.trailer_key = key.into();
        self
    }

    /// Sets the report column layout.
    pub fn with_report_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Observes `interrupt` between steps.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Current state of the run.
    pub fn state(&self) -> RunState {
        self.state.get()
    }

    /// Executes the full run.
    ///
    /// Reports are staged in a temporary directory that is removed when the
    /// run ends, whatever the outcome.
    ///
    /// # Errors
    ///
    /// Any harness or VCS failure, a missing or unreadable report, or an
    /// interrupt aborts the run. The working copy is back on the original
    /// change by the time the error is returned.
    pub fn run(&self) -> Result<RunOutcome> {
        let staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir()
            .map_err(|e| CliError::io_error(std::env::temp_dir(), e))?;

        let outcome = self.run_in(staging.path());
        match &outcome {
            Ok(_) => self.transition(RunState::Done),
            Err(e) => tracing::debug!(state = ?self.state(), error = %e, "run failed"),
        }
        outcome
    }

    fn run_in(&self, staging: &Path) -> Result<RunOutcome> {
        self.transition(RunState::RunningCurrent);
        let current = self.capture("current", staging)?;
        let parent = self.capture_parent(staging)?;

        self.check_interrupt()?;
        self.transition(RunState::Comparing);

        // The working copy is the current change again; so is its report.
        let report = self.harness.report_path();
        fs::copy(&current, report).map_err(|e| CliError::io_error(report, e))?;

        let base = ResultSet::from_path_with_format(&parent, &self.format)?;
        let new = ResultSet::from_path_with_format(&current, &self.format)?;
        let comparison = compare(&base, &new);
        let table = comparison.render_table();
        let summary = comparison.summary();

        println!("\nBenchmark comparison:\n");
        println!("{}", table);

        self.check_interrupt()?;
        self.transition(RunState::UpdatingDescription);

        let existing = self.vcs.description()?;
        let description = apply_trailer(&existing, &self.trailer_key, &summary);
        println!("\nUpdating current change description with trailer...");
        self.vcs.set_description(&description)?;

        Ok(RunOutcome {
            trailer: format!("{}: {}", self.trailer_key, summary),
            comparison,
            table,
            summary,
            description,
        })
    }

    /// Benchmarks the parent change and restores the original one, whether
    /// or not the benchmark succeeded.
    fn capture_parent(&self, staging: &Path) -> Result<PathBuf> {
        self.check_interrupt()?;

        let checkout = ParentCheckout::enter(&self.vcs)?;
        self.transition(RunState::SwitchedToParent);

        self.transition(RunState::RunningParent);
        let captured = self.capture("parent", staging);

        self.transition(RunState::Restoring);
        match (captured, checkout.restore()) {
            (captured, Ok(())) => captured,
            (Ok(_), Err(restore)) => Err(restore.into()),
            (Err(benchmark), Err(restore)) => {
                // A failed restore takes precedence over the benchmark failure.
                tracing::error!(error = %benchmark, "parent benchmark failed");
                Err(restore.into())
            }
        }
    }

    /// Runs the harness and stages its report as `<label>.csv`.
    fn capture(&self, label: &str, staging: &Path) -> Result<PathBuf> {
        self.check_interrupt()?;
        println!("Running benchmarks for {}...", label);

        self.harness.run().map_err(|e| {
            if self.interrupt.is_triggered() {
                CliError::Interrupted
            } else {
                CliError::from(e)
            }
        })?;

        let report = self.harness.report_path();
        if !report.is_file() {
            return Err(CliError::ReportMissing {
                path: report.to_path_buf(),
            });
        }

        let dest = staging.join(format!("{}.csv", label));
        fs::copy(report, &dest).map_err(|e| CliError::io_error(report, e))?;
        println!("Saved {} results to {}", label, dest.display());
        Ok(dest)
    }

    fn check_interrupt(&self) -> Result<()> {
        if self.interrupt.is_triggered() {
            Err(CliError::Interrupted)
        } else {
            Ok(())
        }
    }

    fn transition(&self, next: RunState) {
        tracing::debug!(from = ?self.state.get(), to = ?next, "run state");
        self.state.set(next);
    }
}
