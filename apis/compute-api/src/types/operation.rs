// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Zone operation types
//!
//! `instances.start` and `instances.stop` return an Operation right away;
//! the power transition itself happens asynchronously on the provider side.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::common::Timestamp;

/// Operation progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    Pending,
    Running,
    Done,
}

/// Zone operation resource (subset)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default)]
    pub id: Option<String>,
    /// Operation name, e.g. "operation-1700000000000-abc"
    pub name: String,
    /// "start" or "stop"
    #[serde(default)]
    pub operation_type: Option<String>,
    pub status: OperationStatus,
    /// URL of the instance the operation acts on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert_time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    /// Populated when the operation failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationError>,
}

/// Errors attached to a failed operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationError {
    #[serde(default)]
    pub errors: Vec<OperationErrorItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationErrorItem {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl Operation {
    /// Whether the provider already reported a failure for this operation
    pub fn has_failed(&self) -> bool {
        self.error.as_ref().is_some_and(|e| !e.errors.is_empty())
    }

    /// The reported errors as `CODE: message` pairs joined by `; `
    pub fn failure_message(&self) -> String {
        self.error
            .iter()
            .flat_map(|e| &e.errors)
            .map(|item| match &item.message {
                Some(message) => format!("{}: {}", item.code, message),
                None => item.code.clone(),
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}
