// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    uninstalled = (HandlerState::Uninstalled, AggregateStatus::NotReady),
    installed = (HandlerState::Installed, AggregateStatus::Installing),
    disabled = (HandlerState::Disabled, AggregateStatus::Ready),
    enabled = (HandlerState::Enabled, AggregateStatus::Ready),
)]
fn base_aggregate_mapping_is_total(state: HandlerState, expected: AggregateStatus) {
    assert_eq!(state.base_aggregate(), expected);
}

#[test]
fn handler_state_round_trips_through_token() {
    for state in [
        HandlerState::Uninstalled,
        HandlerState::Installed,
        HandlerState::Disabled,
        HandlerState::Enabled,
    ] {
        let token = state.to_string();
        let parsed: HandlerState = token.parse().unwrap();
        assert_eq!(parsed.as_token(), state.as_token());
    }
}

#[test]
fn handler_state_rejects_unknown_token() {
    assert!("bogus".parse::<HandlerState>().is_err());
}

#[test]
fn aggregate_status_from_str_rejects_unknown() {
    assert!("Bogus".parse::<AggregateStatus>().is_err());
    assert_eq!(
        "Unresponsive".parse::<AggregateStatus>().unwrap(),
        AggregateStatus::Unresponsive
    );
}

#[test]
fn aggregate_status_document_serializes_camel_case_and_capital_message() {
    let doc = AggregateStatusDocument {
        handler_version: "1.0.0".into(),
        handler_name: "Foo".into(),
        status: AggregateStatus::NotReady,
        runtime_settings_status: RuntimeSettingsStatus {
            settings_status: ExtensionStatus::synthetic_error(crate::OperationTag::Download, "boom"),
            sequence_number: 3,
        },
        code: Some(42),
        message: Some("degraded".into()),
    };
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["handlerVersion"], "1.0.0");
    assert_eq!(json["runtimeSettingsStatus"]["sequenceNumber"], 3);
    assert_eq!(json["Message"], "degraded");
    assert!(json.get("message").is_none());
}

#[test]
fn synthetic_error_has_code_negative_one_and_en_us_lang() {
    let status = ExtensionStatus::synthetic_error(crate::OperationTag::Enable, "nope");
    assert_eq!(status.status.code, -1);
    assert_eq!(status.status.formatted_message.lang, "en-US");
    assert_eq!(status.status.formatted_message.message, "nope");
    assert_eq!(status.status.status, ExtStatusKind::Error);
}
