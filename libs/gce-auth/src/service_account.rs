// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Service-account key files and the JWT bearer grant
//!
//! A service-account key is a JSON document holding a PKCS#8 RSA private key
//! and the account's email. To get an access token the key signs a short-lived
//! RS256 assertion, which the token endpoint swaps for a bearer token:
//!
//! ```text
//! POST {token_uri}
//! grant_type=urn:ietf:params:oauth:grant-type:jwt-bearer&assertion=<jwt>
//! ```

use std::path::Path;

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AuthError;
use crate::{AccessToken, TokenResponse};

/// Grant type for the JWT bearer flow (RFC 7523)
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Default token endpoint when the key file omits `token_uri`
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Lifetime of the signed assertion
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Parsed service-account key file
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type")]
    pub key_type: String,
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

// Keep the private key out of debug output.
impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("key_type", &self.key_type)
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("project_id", &self.project_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

/// JWT claim set for the bearer grant
#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl ServiceAccountKey {
    /// Load and parse a key file
    pub fn load(path: &Path) -> Result<Self, AuthError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AuthError::CredentialsLoad(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parse a key from its JSON text
    pub fn from_json(content: &str) -> Result<Self, AuthError> {
        let key: ServiceAccountKey = serde_json::from_str(content)
            .map_err(|e| AuthError::CredentialsLoad(format!("malformed key file: {}", e)))?;
        if key.key_type != "service_account" {
            return Err(AuthError::CredentialsLoad(format!(
                "unsupported credentials type '{}', expected 'service_account'",
                key.key_type
            )));
        }
        Ok(key)
    }

    /// Claims for an assertion issued now
    pub fn claims(&self, scope: &str) -> AssertionClaims {
        let iat = Utc::now().timestamp();
        AssertionClaims {
            iss: self.client_email.clone(),
            scope: scope.to_string(),
            aud: self.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        }
    }

    /// Sign an RS256 assertion for `scope`
    pub fn sign_assertion(&self, scope: &str) -> Result<String, AuthError> {
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| AuthError::InvalidKey(e.to_string()))?;

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.private_key_id.clone();

        jsonwebtoken::encode(&header, &self.claims(scope), &key)
            .map_err(|e| AuthError::InvalidKey(e.to_string()))
    }

    /// Exchange a freshly signed assertion for an access token
    pub async fn fetch_token(
        &self,
        http: &reqwest::Client,
        scope: &str,
    ) -> Result<AccessToken, AuthError> {
        let assertion = self.sign_assertion(scope)?;
        debug!(
            client_email = %self.client_email,
            token_uri = %self.token_uri,
            "exchanging service account assertion"
        );

        let response = http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| AuthError::TokenExchange {
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| AuthError::TokenExchange {
            status: Some(status.as_u16()),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(AuthError::TokenExchange {
                status: Some(status.as_u16()),
                message: oauth_error_message(&body),
            });
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        Ok(token.into_access_token())
    }
}

/// Pull `error_description` / `error` out of an OAuth2 error body
fn oauth_error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct OAuthError {
        error: String,
        #[serde(default)]
        error_description: Option<String>,
    }

    match serde_json::from_str::<OAuthError>(body) {
        Ok(OAuthError {
            error,
            error_description: Some(desc),
        }) => format!("{}: {}", error, desc),
        Ok(OAuthError { error, .. }) => error,
        Err(_) => body.trim().to_string(),
    }
}
