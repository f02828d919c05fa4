// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    equal = ("1.0.0", "1.0.0", Ordering::Equal),
    lexical_surprise = ("2.0", "10.0", Ordering::Greater),
    simple_less = ("1.0.0", "1.1.0", Ordering::Less),
)]
fn lexical_order(a: &str, b: &str, expected: Ordering) {
    assert_eq!(LexicalVersionOrder.compare(a, b), expected);
}

#[yare::parameterized(
    equal = ("1.0.0", "1.0.0", Ordering::Equal),
    numeric_correct = ("2.0", "10.0", Ordering::Less),
    patch_less = ("1.0.0", "1.0.1", Ordering::Less),
    trailing_zero_equal = ("1.0", "1.0.0", Ordering::Equal),
    extra_nonzero_segment_greater = ("1.0.1", "1.0", Ordering::Greater),
    major_series = ("2.3.1", "2.3.0", Ordering::Greater),
)]
fn numeric_order(a: &str, b: &str, expected: Ordering) {
    assert_eq!(NumericVersionOrder.compare(a, b), expected);
}

#[test]
fn max_picks_the_greater_string() {
    assert_eq!(NumericVersionOrder.max("2.0", "10.0"), "10.0");
    assert_eq!(LexicalVersionOrder.max("2.0", "10.0"), "2.0");
}
