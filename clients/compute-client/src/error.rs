// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for compute-client

use compute_api::{ErrorEnvelope, InstanceRef};
use gce_auth::AuthError;
use thiserror::Error;

/// Closed classification of failures
///
/// Every [`ComputeError`] collapses into exactly one of these, so callers can
/// branch on the failure class without inspecting messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The instance (or its project/zone) does not exist
    NotFound,
    /// The caller is not authorized for the instance
    PermissionDenied,
    /// Anything else: transport, provider-side, auth, decoding
    Unexpected,
}

/// Errors returned by the compute client
#[derive(Error, Debug)]
pub enum ComputeError {
    /// HTTP 404 for the instance
    #[error("Instance {instance} not found: {message}")]
    NotFound { instance: String, message: String },

    /// HTTP 401 or 403
    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    /// Any other non-2xx response
    #[error("Compute API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The request never got a response (connect failure, timeout, ...)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response whose body was not what the API documents
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The provider accepted the request but reported it as failed
    #[error("Operation {operation} failed: {message}")]
    OperationFailed { operation: String, message: String },

    /// No bearer token could be obtained
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),
}

impl ComputeError {
    /// Classify a non-2xx response
    pub fn from_response(status: u16, body: &str, target: &InstanceRef) -> Self {
        let message = ErrorEnvelope::parse(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    format!("HTTP {}", status)
                } else {
                    trimmed.to_string()
                }
            });

        match status {
            404 => ComputeError::NotFound {
                instance: target.to_string(),
                message,
            },
            401 | 403 => ComputeError::PermissionDenied { message },
            _ => ComputeError::Api { status, message },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ComputeError::NotFound { .. } => ErrorKind::NotFound,
            ComputeError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            ComputeError::Auth(e) if e.is_permission_denied() => ErrorKind::PermissionDenied,
            ComputeError::Api { .. }
            | ComputeError::OperationFailed { .. }
            | ComputeError::Transport(_)
            | ComputeError::Decode(_)
            | ComputeError::Auth(_) => ErrorKind::Unexpected,
        }
    }
}
