// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use extlife_core::{GoalState, LexicalVersionOrder, VersionUri};

fn setting(version: &str, upgrade_policy: Option<&str>, version_uris: Vec<VersionUri>) -> ExtensionSetting {
    ExtensionSetting {
        name: "Foo".into(),
        version: version.into(),
        seq_no: 0,
        state: GoalState::Enabled,
        upgrade_policy: upgrade_policy.map(str::to_string),
        version_uris,
        settings: serde_json::Value::Null,
    }
}

fn vu(version: &str, uris: &[&str]) -> VersionUri {
    VersionUri {
        version: version.into(),
        uris: uris.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn no_upgrade_policy_targets_setting_version_exactly() {
    let s = setting("1.2.3", None, vec![vu("1.9.9", &["http://x"])]);
    let order = LexicalVersionOrder;
    assert_eq!(resolve_target_version(&s, &order).unwrap(), "1.2.3");
}

#[test]
fn non_auto_upgrade_policy_also_targets_setting_version() {
    let s = setting("1.2.3", Some("manual"), vec![vu("1.9.9", &["http://x"])]);
    let order = LexicalVersionOrder;
    assert_eq!(resolve_target_version(&s, &order).unwrap(), "1.2.3");
}

#[test]
fn auto_upgrade_is_case_insensitive() {
    let s = setting("1.0.0", Some("AUTO"), vec![vu("1.5.0", &["http://x"])]);
    let order = LexicalVersionOrder;
    assert_eq!(resolve_target_version(&s, &order).unwrap(), "1.5.0");
}

#[test]
fn auto_upgrade_picks_highest_within_major_series() {
    let s = setting(
        "1.0.0",
        Some("auto"),
        vec![vu("1.2.0", &["http://a"]), vu("1.10.0", &["http://b"]), vu("2.0.0", &["http://c"])],
    );
    let order = LexicalVersionOrder;
    // lexical ordering picks "1.2.0" over "1.10.0" ("2" > "1" as bytes), a
    // documented caveat of this order variant.
    assert_eq!(resolve_target_version(&s, &order).unwrap(), "1.2.0");
}

#[test]
fn auto_upgrade_excludes_other_major_series() {
    let s = setting("1.0.0", Some("auto"), vec![vu("2.0.0", &["http://a"]), vu("2.5.0", &["http://b"])]);
    let order = LexicalVersionOrder;
    assert!(matches!(
        resolve_target_version(&s, &order),
        Err(ExtensionError::NoMatchingVersion { major }) if major == "1"
    ));
}

#[test]
fn resolve_uris_finds_matching_entry() {
    let s = setting(
        "1.0.0",
        None,
        vec![vu("1.0.0", &["http://a", "http://b"]), vu("2.0.0", &["http://c"])],
    );
    let uris = resolve_package_uris(&s, "1.0.0").unwrap();
    assert_eq!(uris, &["http://a".to_string(), "http://b".to_string()]);
}

#[test]
fn resolve_uris_missing_entry_is_no_package_uris() {
    let s = setting("1.0.0", None, vec![vu("9.9.9", &["http://a"])]);
    assert!(matches!(
        resolve_package_uris(&s, "1.0.0"),
        Err(ExtensionError::NoPackageUris(v)) if v == "1.0.0"
    ));
}
