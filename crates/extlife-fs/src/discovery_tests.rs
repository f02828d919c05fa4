// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use extlife_core::{LexicalVersionOrder, NumericVersionOrder};

#[yare::parameterized(
    simple = ("Foo-1.0.0", "Foo", "1.0.0"),
    name_with_dash = ("my-extension-1.2.3", "my-extension", "1.2.3"),
    multiple_dashes_in_version_like_name = ("a-b-c-2", "a-b-c", "2"),
)]
fn parse_splits_on_last_dash(dir_name: &str, expected_name: &str, expected_version: &str) {
    let (name, version) = parse_ext_dir_name(dir_name).unwrap();
    assert_eq!(name, expected_name);
    assert_eq!(version, expected_version);
}

#[test]
fn parse_rejects_name_without_dash() {
    assert!(parse_ext_dir_name("NoDashHere").is_err());
}

#[test]
fn discover_picks_highest_lexical_version_for_exact_name() {
    let tmp = tempfile::tempdir().unwrap();
    for dir in ["Foo-1.0.0", "Foo-2.0.0", "Foo-1.9.9", "FooBar-9.0.0"] {
        std::fs::create_dir(tmp.path().join(dir)).unwrap();
    }
    let paths = Paths::new(tmp.path(), tmp.path().join("logs"));
    let found = discover_installed(&paths, "Foo", &LexicalVersionOrder).unwrap();
    assert_eq!(found, Some("2.0.0".to_string()));
}

#[test]
fn discover_excludes_names_that_only_share_a_prefix() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::create_dir(tmp.path().join("FooBar-9.0.0")).unwrap();
    let paths = Paths::new(tmp.path(), tmp.path().join("logs"));
    let found = discover_installed(&paths, "Foo", &LexicalVersionOrder).unwrap();
    assert_eq!(found, None);
}

#[test]
fn discover_returns_none_when_lib_dir_missing() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = Paths::new(tmp.path().join("does-not-exist"), tmp.path().join("logs"));
    let found = discover_installed(&paths, "Foo", &LexicalVersionOrder).unwrap();
    assert_eq!(found, None);
}

#[test]
fn discover_with_numeric_order_picks_correct_highest() {
    let tmp = tempfile::tempdir().unwrap();
    for dir in ["Foo-2.0.0", "Foo-10.0.0"] {
        std::fs::create_dir(tmp.path().join(dir)).unwrap();
    }
    let paths = Paths::new(tmp.path(), tmp.path().join("logs"));
    let found = discover_installed(&paths, "Foo", &NumericVersionOrder).unwrap();
    assert_eq!(found, Some("10.0.0".to_string()));
}
