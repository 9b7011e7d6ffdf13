// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for gce-auth

use thiserror::Error;

/// Errors that can occur while acquiring an access token
#[derive(Error, Debug)]
pub enum AuthError {
    /// Failed to read or parse a credentials file
    #[error("Failed to load credentials: {0}")]
    CredentialsLoad(String),

    /// The service-account private key could not be used for signing
    #[error("Invalid service account key: {0}")]
    InvalidKey(String),

    /// The OAuth2 token endpoint rejected the request
    #[error("Token exchange failed{}: {message}", .status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default())]
    TokenExchange {
        /// HTTP status, if the endpoint answered at all
        status: Option<u16>,
        message: String,
    },

    /// The GCE metadata server did not hand out a token
    #[error("Metadata server unavailable: {0}")]
    MetadataUnavailable(String),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl AuthError {
    /// Whether the token endpoint refused the credentials outright
    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            AuthError::TokenExchange {
                status: Some(401 | 403),
                ..
            }
        )
    }
}
