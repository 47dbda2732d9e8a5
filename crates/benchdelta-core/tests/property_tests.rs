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

//! Property-based tests for unit parsing and trailer editing.
//!
//! - Duration and size formatting round-trips through parsing
//! - Comparing a report with itself gives zero deltas
//! - Replacing a trailer twice leaves one trailer with the latest value
//! - Adding a trailer keeps body and existing trailers verbatim

use benchdelta_core::units::{format_duration, format_size, parse_duration, parse_size};
use benchdelta_core::{apply_trailer, compare, BenchmarkResult, ResultSet};
use proptest::prelude::*;

// ===== Generators =====

/// Trailer keys: letters, digits and hyphens, starting with a letter.
fn trailer_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z][A-Za-z0-9-]{0,15}").expect("Failed to create key regex")
}

/// Single-line trailer values.
fn trailer_value() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 .,+%()>-]{1,40}")
        .expect("Failed to create value regex")
        .prop_map(|s| s.trim().to_string())
        .prop_filter("non-empty value", |s| !s.is_empty())
}

/// Body lines that can never be mistaken for trailers.
fn body_line() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{1,10}( [a-z]{1,10}){1,5}")
        .expect("Failed to create body regex")
}

// ===== Unit round-trips =====

proptest! {
    #[test]
    fn prop_duration_roundtrip(exponent in -9.0f64..1.5f64, mantissa in 1.0f64..9.99f64) {
        let seconds = mantissa * 10f64.powf(exponent);
        let formatted = format_duration(Some(seconds));
        let parsed = parse_duration(&formatted).expect("formatted duration must parse");

        // Three decimals in the display unit.
        let unit = if seconds < 1e-6 { 1e-9 } else if seconds < 1e-3 { 1e-6 } else if seconds < 1.0 { 1e-3 } else { 1.0 };
        prop_assert!((parsed - seconds).abs() <= 0.0005 * unit + 1e-15,
            "{} -> {} -> {}", seconds, formatted, parsed);
    }

    #[test]
    fn prop_size_roundtrip(bytes in 0.0f64..(64.0 * 1024.0 * 1024.0)) {
        let formatted = format_size(Some(bytes));
        let parsed = parse_size(&formatted).expect("formatted size must parse");

        let tolerance = if bytes < 1024.0 {
            0.5
        } else if bytes < 1024.0 * 1024.0 {
            0.05 * 1024.0
        } else {
            0.005 * 1024.0 * 1024.0
        };
        prop_assert!((parsed - bytes).abs() <= tolerance + 1e-9,
            "{} -> {} -> {}", bytes, formatted, parsed);
    }

    #[test]
    fn prop_compare_self_is_zero(means in prop::collection::vec(1e-9f64..10.0, 1..8)) {
        let set: ResultSet = means
            .iter()
            .enumerate()
            .map(|(i, &m)| (format!("Bench{}", i), BenchmarkResult::new(Some(m), None, Some(64.0))))
            .collect();

        let comparison = compare(&set, &set);
        for row in comparison.rows() {
            let cells = row.cells();
            prop_assert_eq!(&cells[3], "+0.0%");
            prop_assert_eq!(&cells[6], "+0.0%");
        }
    }

    #[test]
    fn prop_trailer_replace_idempotent(
        body in prop::collection::vec(body_line(), 0..4),
        others in prop::collection::vec((trailer_key(), trailer_value()), 0..5),
        v1 in trailer_value(),
        v2 in trailer_value(),
    ) {
        let others: Vec<(String, String)> = others
            .into_iter()
            .filter(|(k, _)| !k.eq_ignore_ascii_case("Benchmark"))
            .collect();

        let mut text = body.join("\n");
        if !others.is_empty() {
            text.push_str("\n\n");
            let block: Vec<String> = others.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
            text.push_str(&block.join("\n"));
        }

        let once = apply_trailer(&text, "Benchmark", &v1);
        let twice = apply_trailer(&once, "Benchmark", &v2);

        let hits: Vec<&str> = twice.lines().filter(|l| l.starts_with("Benchmark:")).collect();
        prop_assert_eq!(hits.len(), 1);
        let expected = format!("Benchmark: {}", v2);
        prop_assert_eq!(twice.lines().last(), Some(expected.as_str()));
    }

    #[test]
    fn prop_new_key_preserves_existing(
        body in body_line(),
        first in trailer_value(),
        second in trailer_value(),
        value in trailer_value(),
    ) {
        let text = format!("{}\n\nSigned-off-by: {}\nReviewed-by: {}\n", body, first, second);
        let result = apply_trailer(&text, "Benchmark", &value);
        prop_assert_eq!(
            result,
            format!("{}\n\nSigned-off-by: {}\nReviewed-by: {}\nBenchmark: {}\n", body, first, second, value)
        );
    }
}
