// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handler State Store (`spec.md` §4.7, C7).
//!
//! Reads/writes the single raw token at `config/HandlerState`. A missing
//! file is reported to the caller as an error — it is the Reconciler's job
//! to treat "no installed directory at all" (from C6) as the not-yet-
//! installed case, never "missing state file" (`spec.md` §4.7).

use std::fs;
use std::io::{Error, ErrorKind};

use extlife_core::{ExtensionError, HandlerState};

use crate::paths::Paths;

pub fn read_handler_state(
    paths: &Paths,
    name: &str,
    version: &str,
) -> Result<HandlerState, ExtensionError> {
    let path = paths.handler_state_file(name, version);
    let raw = fs::read_to_string(&path)?;
    raw.trim().parse().map_err(|_| {
        ExtensionError::Io(Error::new(
            ErrorKind::InvalidData,
            format!("invalid handler state token {raw:?} in {}", path.display()),
        ))
    })
}

/// Overwrite-in-place; no fsync is mandated (`spec.md` §4.7).
pub fn write_handler_state(
    paths: &Paths,
    name: &str,
    version: &str,
    state: HandlerState,
) -> Result<(), ExtensionError> {
    let path = paths.handler_state_file(name, version);
    fs::write(path, state.as_token())?;
    Ok(())
}

#[cfg(test)]
mod state_store_tests;
