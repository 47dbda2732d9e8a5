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

//! Duration and size parsing for benchmark report cells.
//!
//! Benchmark harnesses print measurements as human-readable strings such as
//! `"1,234.5 ns"`, `"12.3 μs"` or `"64 B"`. This module converts those into
//! canonical units (seconds and bytes) and back into display strings.
//!
//! Parsing is lossy-tolerant: anything that cannot be recognized yields
//! `None` rather than an error, and every formatter renders `None` as
//! `"n/a"`.
//!
//! # Examples
//!
//! ```
//! use benchdelta_core::units::{format_duration, parse_duration, parse_size};
//!
//! assert_eq!(parse_duration("1,500 ns"), Some(1.5e-6));
//! assert_eq!(parse_size("2 KB"), Some(2048.0));
//! assert_eq!(format_duration(Some(0.25)), "250.000 ms");
//! assert_eq!(parse_duration("fast"), None);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// Text rendered for a missing or non-numeric value.
pub const NOT_AVAILABLE: &str = "n/a";

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([-+]?\d*\.?\d+)\s*(ns|us|ms|s)").expect("valid duration pattern")
});

static SIZE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([-+]?\d*\.?\d+)\s*(B|KB|MB)").expect("valid size pattern")
});

/// Parses a duration string into seconds.
///
/// Accepts an optionally signed decimal number followed by `ns`, `us`, `ms`
/// or `s` (case-insensitive). Thousands separators are ignored and both the
/// micro sign (`µ`) and the Greek mu (`μ`) are accepted in place of `u`.
///
/// Returns `None` for empty or unrecognized input.
pub fn parse_duration(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let cleaned = text
        .replace(',', "")
        .replace(['\u{00b5}', '\u{03bc}'], "u");

    let caps = DURATION_RE.captures(&cleaned)?;
    let amount: f64 = caps[1].parse().ok()?;
    let factor = match caps[2].to_ascii_lowercase().as_str() {
        "ns" => 1e-9,
        "us" => 1e-6,
        "ms" => 1e-3,
        _ => 1.0,
    };

    Some(amount * factor)
}

/// Parses a memory size string into bytes.
///
/// Accepts an optionally signed decimal number followed by `B`, `KB` or `MB`
/// (case-insensitive, binary multiples). Returns `None` for empty or
/// unrecognized input, including the `"-"` placeholder harnesses print when
/// nothing was allocated.
pub fn parse_size(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let cleaned = text.replace(',', "");
    let caps = SIZE_RE.captures(&cleaned)?;
    let amount: f64 = caps[1].parse().ok()?;
    let factor = match caps[2].to_ascii_lowercase().as_str() {
        "kb" => KIB,
        "mb" => MIB,
        _ => 1.0,
    };

    Some(amount * factor)
}

/// Formats seconds using the largest unit that keeps the magnitude at or
/// above one, with three decimals.
pub fn format_duration(seconds: Option<f64>) -> String {
    let seconds = match seconds {
        Some(s) if !s.is_nan() => s,
        _ => return NOT_AVAILABLE.to_string(),
    };

    let magnitude = seconds.abs();
    let (value, unit) = if magnitude < 1e-6 {
        (seconds * 1e9, "ns")
    } else if magnitude < 1e-3 {
        (seconds * 1e6, "us")
    } else if magnitude < 1.0 {
        (seconds * 1e3, "ms")
    } else {
        (seconds, "s")
    };

    format!("{:.3} {}", value, unit)
}

/// Formats a byte count as `B`, `KB` (one decimal) or `MB` (two decimals).
pub fn format_size(bytes: Option<f64>) -> String {
    let bytes = match bytes {
        Some(b) if !b.is_nan() => b,
        _ => return NOT_AVAILABLE.to_string(),
    };

    let magnitude = bytes.abs();
    if magnitude < KIB {
        format!("{:.0} B", bytes)
    } else if magnitude < MIB {
        format!("{:.1} KB", bytes / KIB)
    } else {
        format!("{:.2} MB", bytes / MIB)
    }
}

/// Formats a percentage with an explicit sign and one decimal.
pub fn format_percent(delta: Option<f64>) -> String {
    match delta {
        Some(d) => format!("{:+.1}%", d),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Relative change from `old` to `new` in percent.
///
/// `None` when either side is missing or `old` is zero.
pub fn percent_delta(old: Option<f64>, new: Option<f64>) -> Option<f64> {
    match (old, new) {
        (Some(old), Some(new)) if old != 0.0 => Some((new - old) / old * 100.0),
        _ => None,
    }
}
