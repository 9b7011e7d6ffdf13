// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Process exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | request accepted, or already in the requested state |
//! | 2 | usage error (reported by clap) |
//! | 3 | instance not found |
//! | 4 | permission denied |
//! | 5 | any other failure |
//! | 6 | invalid configuration |
//! | 7 | `--wait` deadline passed |

use compute_client::{ComputeError, ErrorKind};
use tracing::{debug, error};

use crate::config::ConfigError;
use crate::lifecycle::LifecycleError;

pub const NOT_FOUND: u8 = 3;
pub const PERMISSION_DENIED: u8 = 4;
pub const UNEXPECTED: u8 = 5;
pub const CONFIG_INVALID: u8 = 6;
pub const WAIT_TIMED_OUT: u8 = 7;

fn code_for_kind(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::NotFound => NOT_FOUND,
        ErrorKind::PermissionDenied => PERMISSION_DENIED,
        ErrorKind::Unexpected => UNEXPECTED,
    }
}

/// Exit code for a failed run
pub fn code_for(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<ConfigError>().is_some() {
        return CONFIG_INVALID;
    }
    if let Some(e) = err.downcast_ref::<LifecycleError>() {
        return match e {
            LifecycleError::WaitTimedOut { .. } => WAIT_TIMED_OUT,
            LifecycleError::Compute(e) => code_for_kind(e.kind()),
        };
    }
    if let Some(e) = err.downcast_ref::<ComputeError>() {
        return code_for_kind(e.kind());
    }
    UNEXPECTED
}

/// Log a failed run and return its exit code
pub fn report(err: &anyhow::Error) -> u8 {
    let code = code_for(err);
    match code {
        NOT_FOUND => {
            error!("VM not found. Check project, zone, or VM name.");
            debug!("{:#}", err);
        }
        PERMISSION_DENIED => {
            error!("Permission denied. Check IAM roles.");
            debug!("{:#}", err);
        }
        CONFIG_INVALID => error!("Invalid configuration: {:#}", err),
        WAIT_TIMED_OUT => error!("{:#}", err),
        _ => error!("Unexpected error occurred: {:#}", err),
    }
    code
}
