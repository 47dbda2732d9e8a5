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

//! Ctrl+C handling.
//!
//! The orchestrator must restore the working copy even when the user
//! interrupts a run. Instead of letting SIGINT terminate the process, the
//! handler only records the request: the benchmark child receives the same
//! signal and fails, and the orchestrator unwinds through its normal error
//! path, restoring the original change on the way out.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared interrupt flag.
#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    /// Creates a flag that is only set through [`trigger`](Self::trigger).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a flag set by Ctrl+C.
    ///
    /// Only one handler can be installed per process.
    pub fn install() -> Result<Self, ctrlc::Error> {
        let flag = Self::new();
        let handler = flag.clone();
        ctrlc::set_handler(move || {
            handler.trigger();
        })?;
        Ok(flag)
    }

    /// Marks the run as interrupted.
    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once an interrupt was requested.
    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
