// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status vocabulary: handler state (C7), extension status (C3), and the
//! aggregate status document reported upstream (C8.4).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The handler's own lifecycle state, persisted as a single raw token in
/// `config/HandlerState` (`spec.md` §3, §4.7). No JSON involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerState {
    Uninstalled,
    Installed,
    Disabled,
    Enabled,
}

impl HandlerState {
    pub fn as_token(&self) -> &'static str {
        match self {
            HandlerState::Uninstalled => "uninstalled",
            HandlerState::Installed => "installed",
            HandlerState::Disabled => "disabled",
            HandlerState::Enabled => "enabled",
        }
    }

    /// The base aggregate status for this handler state, per the fixed
    /// table in `spec.md` §4.8.4. Total over the handler-state domain.
    pub fn base_aggregate(&self) -> AggregateStatus {
        match self {
            HandlerState::Uninstalled => AggregateStatus::NotReady,
            HandlerState::Installed => AggregateStatus::Installing,
            HandlerState::Disabled | HandlerState::Enabled => AggregateStatus::Ready,
        }
    }
}

impl fmt::Display for HandlerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl FromStr for HandlerState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "uninstalled" => Ok(HandlerState::Uninstalled),
            "installed" => Ok(HandlerState::Installed),
            "disabled" => Ok(HandlerState::Disabled),
            "enabled" => Ok(HandlerState::Enabled),
            other => Err(other.to_string()),
        }
    }
}

/// `status.status` values a handler-produced status file may report
/// (`spec.md` §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtStatusKind {
    Transitioning,
    Error,
    Success,
    Warning,
}

/// `status.formattedMessage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedMessage {
    pub lang: String,
    pub message: String,
}

/// The `status` sub-object of a handler status file, element 0 of the
/// top-level array (`spec.md` §3, §4.3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionStatusBody {
    pub status: ExtStatusKind,
    pub operation: String,
    pub code: i64,
    pub name: String,
    #[serde(rename = "formattedMessage")]
    pub formatted_message: FormattedMessage,
}

/// Element 0 of the handler-produced `<seqNo>.status` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionStatus {
    pub status: ExtensionStatusBody,
}

impl ExtensionStatus {
    /// Builds a synthetic error status for the Reconciler's failure path
    /// (`spec.md` §4.9 step 4).
    pub fn synthetic_error(operation: crate::OperationTag, message: impl Into<String>) -> Self {
        ExtensionStatus {
            status: ExtensionStatusBody {
                status: ExtStatusKind::Error,
                operation: operation.to_string(),
                code: -1,
                name: String::new(),
                formatted_message: FormattedMessage {
                    lang: "en-US".into(),
                    message: message.into(),
                },
            },
        }
    }
}

/// The control-plane-facing aggregate summary (`spec.md` §3, GLOSSARY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregateStatus {
    Installing,
    Ready,
    NotReady,
    Unresponsive,
}

impl AggregateStatus {
    pub const ALL: [AggregateStatus; 4] = [
        AggregateStatus::Installing,
        AggregateStatus::Ready,
        AggregateStatus::NotReady,
        AggregateStatus::Unresponsive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateStatus::Installing => "Installing",
            AggregateStatus::Ready => "Ready",
            AggregateStatus::NotReady => "NotReady",
            AggregateStatus::Unresponsive => "Unresponsive",
        }
    }
}

impl fmt::Display for AggregateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregateStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AggregateStatus::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Handler-written liveness record, `[0].heartbeat` of `heartbeat.log`
/// (`spec.md` §3). Field name `message` is capitalised on the wire
/// (`Message`) — this is a contract with the control plane, not a style
/// choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heartbeat {
    pub status: String,
    pub code: i64,
    #[serde(rename = "Message")]
    pub message: String,
}

impl Heartbeat {
    pub fn unresponsive() -> Self {
        Heartbeat {
            status: AggregateStatus::Unresponsive.to_string(),
            code: -1,
            message: "Extension heartbeat is not responsive".into(),
        }
    }
}

/// `runtimeSettingsStatus` of the aggregate status document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeSettingsStatus {
    #[serde(rename = "settingsStatus")]
    pub settings_status: ExtensionStatus,
    #[serde(rename = "sequenceNumber")]
    pub sequence_number: u64,
}

/// The document posted upstream via `GoalStateSource::report_status`
/// (`spec.md` §4.8.4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateStatusDocument {
    #[serde(rename = "handlerVersion")]
    pub handler_version: String,
    #[serde(rename = "handlerName")]
    pub handler_name: String,
    pub status: AggregateStatus,
    #[serde(rename = "runtimeSettingsStatus")]
    pub runtime_settings_status: RuntimeSettingsStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(rename = "Message", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod status_tests;
