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

//! Commit message trailer editing.
//!
//! A change description ends with an optional block of `Key: value` trailer
//! lines, separated from the body by a blank line:
//!
//! ```text
//! Speed up row parsing
//!
//! Reuse the field buffer between rows.
//!
//! Signed-off-by: Jane Doe <jane@example.com>
//! Benchmark: Parse: -12.5% (1.204 us -> 1.053 us)
//!   Render: +0.4% (12.410 us -> 12.460 us)
//! ```
//!
//! The trailer block is the longest run of trailer lines at the end of the
//! text. As in git, a non-blank line starting with whitespace continues the
//! trailer above it. Any other line ends the block, so trailer-shaped lines
//! above it are part of the body.
//!
//! Editing never fails: every input text has a body and a (possibly empty)
//! trailer block.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static TRAILER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]*:").expect("valid trailer pattern"));

/// One trailer together with its continuation lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trailer {
    key: String,
    lines: Vec<String>,
}

impl Trailer {
    fn new(key: &str, value: &str) -> Self {
        let mut value_lines = value.lines();
        let first = value_lines.next().unwrap_or("");

        let mut lines = vec![format!("{}: {}", key, first)];
        for line in value_lines {
            if line.trim().is_empty() {
                continue;
            }
            if is_continuation(line) {
                lines.push(line.to_string());
            } else {
                lines.push(format!(" {}", line));
            }
        }

        Self {
            key: key.to_string(),
            lines,
        }
    }

    fn from_line(line: &str) -> Self {
        let key = line
            .trim()
            .split_once(':')
            .map(|(key, _)| key)
            .unwrap_or_default()
            .to_string();

        Self {
            key,
            lines: vec![line.to_string()],
        }
    }

    /// Trailer key as written.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Trailer value, including continuation lines.
    pub fn value(&self) -> String {
        let first = self.lines[0]
            .trim()
            .split_once(':')
            .map(|(_, value)| value.trim_start())
            .unwrap_or_default();

        std::iter::once(first)
            .chain(self.lines[1..].iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Returns `true` if the key matches, ignoring case.
    pub fn has_key(&self, key: &str) -> bool {
        self.key.to_lowercase() == key.to_lowercase()
    }
}

/// A change description split into body and trailer block.
///
/// # Examples
///
/// ```
/// use benchdelta_core::DescriptionText;
///
/// let mut description = DescriptionText::parse("Fix parser\n\nSigned-off-by: A\n");
/// assert_eq!(description.trailers().count(), 1);
///
/// description.set_trailer("Benchmark", "+1.0% (1.000 ms -> 1.010 ms)");
/// assert_eq!(
///     description.to_string(),
///     "Fix parser\n\nSigned-off-by: A\nBenchmark: +1.0% (1.000 ms -> 1.010 ms)\n"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DescriptionText {
    body: Vec<String>,
    trailers: Vec<Trailer>,
}

impl DescriptionText {
    /// Splits a description into its body and trailer block.
    pub fn parse(text: &str) -> Self {
        let lines: Vec<&str> = text.trim_end().lines().collect();

        let mut run_start = lines.len();
        while run_start > 0 && is_block_line(lines[run_start - 1]) {
            run_start -= 1;
        }

        // Continuation lines need a trailer above them inside the block.
        let block_start = (run_start..lines.len())
            .find(|&i| is_trailer_line(lines[i]))
            .unwrap_or(lines.len());

        let mut trailers: Vec<Trailer> = Vec::new();
        for (offset, line) in lines[block_start..].iter().enumerate() {
            match trailers.last_mut() {
                Some(trailer) if offset > 0 && is_continuation(line) => {
                    trailer.lines.push(line.to_string());
                }
                _ => trailers.push(Trailer::from_line(line)),
            }
        }

        Self {
            body: lines[..block_start].iter().map(|l| l.to_string()).collect(),
            trailers,
        }
    }

    /// Body lines, without the trailer block.
    pub fn body(&self) -> &[String] {
        &self.body
    }

    /// Trailers in order of appearance.
    pub fn trailers(&self) -> impl Iterator<Item = &Trailer> {
        self.trailers.iter()
    }

    /// Last trailer with the given key, ignoring case.
    pub fn trailer(&self, key: &str) -> Option<&Trailer> {
        self.trailers.iter().rev().find(|t| t.has_key(key))
    }

    /// Replaces every trailer with `key` (ignoring case) by a single
    /// `key: value` trailer at the end of the block.
    ///
    /// Value lines after the first become continuation lines; blank ones are
    /// dropped.
    pub fn set_trailer(&mut self, key: &str, value: &str) {
        self.trailers.retain(|t| !t.has_key(key));
        self.trailers.push(Trailer::new(key, value));
    }
}

impl fmt::Display for DescriptionText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self.body.join("\n");
        let body = body.trim_end();

        let trailers = self
            .trailers
            .iter()
            .flat_map(|t| t.lines.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n");
        let trailers = trailers.trim_end();

        match (body.is_empty(), trailers.is_empty()) {
            (false, false) => writeln!(f, "{}\n\n{}", body, trailers),
            (true, false) => writeln!(f, "{}", trailers),
            _ => writeln!(f, "{}", body),
        }
    }
}

/// Sets the `key` trailer of `description` to `value`.
///
/// Existing trailers with the same key (ignoring case) are removed and the
/// new trailer is appended after all others. Applying the same key twice
/// leaves exactly one trailer with that key.
///
/// # Examples
///
/// ```
/// use benchdelta_core::apply_trailer;
///
/// let updated = apply_trailer("Fixes bug\n\nSigned-off-by: A\n", "Benchmark", "+5.0% (1ms -> 1.05ms)");
/// assert_eq!(updated, "Fixes bug\n\nSigned-off-by: A\nBenchmark: +5.0% (1ms -> 1.05ms)\n");
/// ```
pub fn apply_trailer(description: &str, key: &str, value: &str) -> String {
    let mut text = DescriptionText::parse(description);
    text.set_trailer(key, value);
    text.to_string()
}

fn is_trailer_line(line: &str) -> bool {
    TRAILER_RE.is_match(line.trim())
}

fn is_continuation(line: &str) -> bool {
    line.starts_with(char::is_whitespace) && !line.trim().is_empty()
}

fn is_block_line(line: &str) -> bool {
    is_trailer_line(line) || is_continuation(line)
}
