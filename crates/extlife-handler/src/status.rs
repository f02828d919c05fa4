// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Extension status reader (`spec.md` §4.3, C3).

use std::fs;

use extlife_core::{ExtStatusKind, ExtensionError, ExtensionStatus, ExtensionStatusBody, FormattedMessage};
use extlife_fs::Paths;

/// Reads `status/<seqNo>.status`, takes element 0, and validates every
/// required key from `spec.md` §3. Fails with `MalformedStatus` on missing
/// keys or malformed JSON, `IoError` on read errors.
pub fn read_extension_status(
    paths: &Paths,
    name: &str,
    version: &str,
    seq_no: u64,
) -> Result<ExtensionStatus, ExtensionError> {
    let path = paths.status_file(name, version, seq_no);
    let raw = fs::read_to_string(&path)?;

    let parsed: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| ExtensionError::MalformedStatus(format!("invalid json: {e}")))?;

    let elem0 = parsed
        .as_array()
        .and_then(|arr| arr.first())
        .ok_or_else(|| ExtensionError::MalformedStatus("status file is not a non-empty array".into()))?;

    validate_and_parse(elem0)
}

fn validate_and_parse(elem0: &serde_json::Value) -> Result<ExtensionStatus, ExtensionError> {
    let missing = |key: &str| ExtensionError::MalformedStatus(format!("missing '{key}'"));

    let status_obj = elem0.get("status").ok_or_else(|| missing("status"))?;
    let status_str = status_obj
        .get("status")
        .and_then(|v| v.as_str())
        .ok_or_else(|| missing("status.status"))?;
    let operation = status_obj
        .get("operation")
        .and_then(|v| v.as_str())
        .ok_or_else(|| missing("status.operation"))?
        .to_string();
    let code = status_obj.get("code").and_then(|v| v.as_i64()).ok_or_else(|| missing("status.code"))?;
    let name = status_obj
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| missing("status.name"))?
        .to_string();
    let formatted = status_obj
        .get("formattedMessage")
        .ok_or_else(|| missing("status.formattedMessage"))?;
    let lang = formatted
        .get("lang")
        .and_then(|v| v.as_str())
        .ok_or_else(|| missing("status.formattedMessage.lang"))?
        .to_string();
    let message = formatted
        .get("message")
        .and_then(|v| v.as_str())
        .ok_or_else(|| missing("status.formattedMessage.message"))?
        .to_string();

    let status = match status_str {
        "transitioning" => ExtStatusKind::Transitioning,
        "error" => ExtStatusKind::Error,
        "success" => ExtStatusKind::Success,
        "warning" => ExtStatusKind::Warning,
        other => {
            return Err(ExtensionError::MalformedStatus(format!(
                "invalid 'status.status': {other}"
            )))
        }
    };

    Ok(ExtensionStatus {
        status: ExtensionStatusBody {
            status,
            operation,
            code,
            name,
            formatted_message: FormattedMessage { lang, message },
        },
    })
}

#[cfg(test)]
mod status_tests;
