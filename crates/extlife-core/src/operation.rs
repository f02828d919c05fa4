// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle operation tags, used in events and error-path status reports.

use serde::{Deserialize, Serialize};

/// Tag for the last-started operation on an [`crate::Instance`]
/// (`spec.md` §3 `currOperation`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum OperationTag {
    Download,
    Install,
    Enable,
    Disable,
    Uninstall,
    Update,
    Upgrade,
}

impl std::fmt::Display for OperationTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OperationTag::Download => "Download",
            OperationTag::Install => "Install",
            OperationTag::Enable => "Enable",
            OperationTag::Disable => "Disable",
            OperationTag::Uninstall => "Uninstall",
            OperationTag::Update => "Update",
            OperationTag::Upgrade => "Upgrade",
        };
        f.write_str(s)
    }
}
