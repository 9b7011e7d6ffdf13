// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Common types used across the Compute API

use serde::{Deserialize, Serialize};

/// RFC3339 timestamp
pub type Timestamp = String;

/// Google API error envelope
///
/// Every non-2xx response from `compute.googleapis.com` carries a body of
/// the form `{"error": {"code": 404, "message": "...", "errors": [...]}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ApiError,
}

/// Body of a Google API error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// HTTP status code echoed by the server
    pub code: u16,
    /// Human-readable error message
    pub message: String,
    /// Canonical status name (e.g. "NOT_FOUND", "PERMISSION_DENIED")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Individual error details
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

/// One entry of `error.errors`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    /// Machine-readable reason (e.g. "notFound", "forbidden")
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
}

impl ErrorEnvelope {
    /// Try to decode an error body, returning None if it is not an envelope
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}
