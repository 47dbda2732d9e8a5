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

//! Trailer command - benchmark the current change against its parent

use crate::config::RunConfig;
use crate::error::{CliError, Result};
use crate::orchestrator::{Interrupt, Jujutsu, Orchestrator, ScriptHarness};
use colored::Colorize;

/// Runs the orchestrator described by `config`.
///
/// Installs the Ctrl+C handler, so this can only be called once per process.
pub fn trailer(config: &RunConfig) -> Result<()> {
    config.validate()?;

    let interrupt = Interrupt::install()
        .map_err(|e| CliError::invalid_config(format!("cannot install Ctrl+C handler: {}", e)))?;

    let harness = ScriptHarness::new(config.harness_path(), &config.root, config.report_path());
    let vcs = Jujutsu::new(&config.vcs, &config.root);
    tracing::debug!(?config, "starting benchmark run");

    let outcome = Orchestrator::new(harness, vcs)
        .with_trailer_key(config.trailer_key.as_str())
        .with_interrupt(interrupt)
        .run()?;

    println!("{} Added trailer: {}", "✓".green().bold(), outcome.trailer);
    Ok(())
}
