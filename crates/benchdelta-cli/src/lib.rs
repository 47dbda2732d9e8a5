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

//! Command-line tools for benchmark deltas.
//!
//! Two binaries are built from this library:
//!
//! - **bench-compare** `<BASE> <NEW>`: prints a side-by-side table of two
//!   BenchmarkDotNet CSV reports with mean and allocation deltas.
//! - **bench-trailer**: benchmarks the current jj change and its parent,
//!   restores the working copy, and records the mean deltas as a
//!   `Benchmark:` trailer on the current change.
//!
//! The run logic lives in [`orchestrator`]; argument parsing in [`cli`];
//! the per-binary entry points in [`commands`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod orchestrator;

pub use config::RunConfig;
pub use error::{CliError, Result};
pub use orchestrator::{Orchestrator, RunOutcome, RunState};
