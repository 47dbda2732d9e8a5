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

//! Scoped checkout of the parent change.

use super::process::CommandError;
use super::vcs::VersionControl;

/// The working copy switched to the parent change.
///
/// Created by [`ParentCheckout::enter`]. Call [`restore`](Self::restore) to
/// return to the original change and observe the result; if the guard is
/// dropped without that (early return, panic), the drop performs the undo
/// and logs any failure.
#[must_use = "dropping the guard immediately restores the original change"]
pub struct ParentCheckout<'a, V: VersionControl + ?Sized> {
    vcs: &'a V,
    active: bool,
}

impl<'a, V: VersionControl + ?Sized> ParentCheckout<'a, V> {
    /// Switches to the parent change.
    ///
    /// Nothing needs restoring if this fails, so no guard is returned.
    pub fn enter(vcs: &'a V) -> Result<Self, CommandError> {
        vcs.checkout_parent()?;
        tracing::debug!(vcs = vcs.name(), "switched to parent change");
        Ok(Self { vcs, active: true })
    }

    /// Returns to the original change.
    pub fn restore(mut self) -> Result<(), CommandError> {
        self.active = false;
        announce(self.vcs);
        self.vcs.undo()
    }
}

impl<V: VersionControl + ?Sized> Drop for ParentCheckout<'_, V> {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        tracing::warn!("parent checkout dropped without explicit restore");
        announce(self.vcs);
        if let Err(e) = self.vcs.undo() {
            tracing::error!(error = %e, "failed to restore original change");
            eprintln!("Error: failed to restore original working copy: {}", e);
        }
    }
}

fn announce<V: VersionControl + ?Sized>(vcs: &V) {
    println!("Restoring original working copy ({} undo)...", vcs.name());
}
