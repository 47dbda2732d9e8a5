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

//! In-memory collaborators for orchestrator tests.

use super::harness::BenchmarkHarness;
use super::interrupt::Interrupt;
use super::process::CommandError;
use super::vcs::VersionControl;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Debug, Default)]
struct Repo {
    on_parent: bool,
    calls: Vec<String>,
    description: String,
}

fn failure(command: &str) -> CommandError {
    CommandError::Failed {
        command: command.to_string(),
        code: Some(1),
        stdout: String::new(),
        stderr: format!("{} failed", command),
    }
}

/// Version control that tracks which change is checked out.
#[derive(Debug, Clone, Default)]
pub struct FakeVcs {
    repo: Rc<RefCell<Repo>>,
    fail_checkout: bool,
    fail_undo: bool,
    fail_describe: bool,
}

impl FakeVcs {
    pub fn new(description: &str) -> Self {
        let vcs = Self::default();
        vcs.repo.borrow_mut().description = description.to_string();
        vcs
    }

    pub fn failing_checkout(mut self) -> Self {
        self.fail_checkout = true;
        self
    }

    pub fn failing_undo(mut self) -> Self {
        self.fail_undo = true;
        self
    }

    pub fn failing_describe(mut self) -> Self {
        self.fail_describe = true;
        self
    }

    pub fn on_parent(&self) -> bool {
        self.repo.borrow().on_parent
    }

    pub fn calls(&self) -> Vec<String> {
        self.repo.borrow().calls.clone()
    }

    pub fn stored_description(&self) -> String {
        self.repo.borrow().description.clone()
    }

    /// A harness writing `current` or `parent` depending on the checkout.
    pub fn harness(&self, report: impl Into<PathBuf>, current: &str, parent: &str) -> FakeHarness {
        FakeHarness {
            repo: Rc::clone(&self.repo),
            report: report.into(),
            current: current.to_string(),
            parent: parent.to_string(),
            fail_on_parent: false,
            fail_on_current: false,
            skip_report: false,
            interrupt_on_parent: None,
        }
    }

    fn record(&self, call: &str) {
        self.repo.borrow_mut().calls.push(call.to_string());
    }
}

impl VersionControl for FakeVcs {
    fn checkout_parent(&self) -> Result<(), CommandError> {
        self.record("new @-");
        if self.fail_checkout {
            return Err(failure("jj new @-"));
        }
        self.repo.borrow_mut().on_parent = true;
        Ok(())
    }

    fn undo(&self) -> Result<(), CommandError> {
        self.record("undo");
        if self.fail_undo {
            return Err(failure("jj undo"));
        }
        self.repo.borrow_mut().on_parent = false;
        Ok(())
    }

    fn description(&self) -> Result<String, CommandError> {
        self.record("log");
        Ok(self.repo.borrow().description.clone())
    }

    fn set_description(&self, text: &str) -> Result<(), CommandError> {
        self.record("describe");
        if self.fail_describe {
            return Err(failure("jj describe"));
        }
        self.repo.borrow_mut().description = text.to_string();
        Ok(())
    }

    fn name(&self) -> &str {
        "jj"
    }
}

/// Harness that writes canned reports.
#[derive(Debug, Clone)]
pub struct FakeHarness {
    repo: Rc<RefCell<Repo>>,
    report: PathBuf,
    current: String,
    parent: String,
    fail_on_parent: bool,
    fail_on_current: bool,
    skip_report: bool,
    interrupt_on_parent: Option<Interrupt>,
}

impl FakeHarness {
    pub fn failing_on_parent(mut self) -> Self {
        self.fail_on_parent = true;
        self
    }

    pub fn failing_on_current(mut self) -> Self {
        self.fail_on_current = true;
        self
    }

    pub fn without_report(mut self) -> Self {
        self.skip_report = true;
        self
    }

    /// Simulates Ctrl+C while the parent is being benchmarked.
    pub fn interrupting_on_parent(mut self, interrupt: Interrupt) -> Self {
        self.interrupt_on_parent = Some(interrupt);
        self
    }
}

impl BenchmarkHarness for FakeHarness {
    fn run(&self) -> Result<(), CommandError> {
        let on_parent = self.repo.borrow().on_parent;
        let label = if on_parent { "parent" } else { "current" };
        self.repo.borrow_mut().calls.push(format!("bench {}", label));

        if on_parent {
            if let Some(interrupt) = &self.interrupt_on_parent {
                interrupt.trigger();
                return Err(CommandError::Failed {
                    command: "./benchmark.sh run".to_string(),
                    code: None,
                    stdout: String::new(),
                    stderr: String::new(),
                });
            }
        }
        if (on_parent && self.fail_on_parent) || (!on_parent && self.fail_on_current) {
            return Err(failure("./benchmark.sh run"));
        }
        if !self.skip_report {
            let content = if on_parent { &self.parent } else { &self.current };
            fs::write(&self.report, content).expect("write fake report");
        }
        Ok(())
    }

    fn report_path(&self) -> &Path {
        &self.report
    }
}
