// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Compute Engine OAuth2 Token Library
//!
//! This library hands out bearer tokens for Compute Engine API requests. It
//! supports:
//!
//! - Pre-minted access tokens (e.g. `gcloud auth print-access-token`)
//! - Service-account JSON key files, via the JWT bearer grant
//! - The GCE metadata server, for code running on a VM
//!
//! # Token Source Selection
//!
//! [`TokenSource::auto`] mirrors the usual Application Default Credentials
//! order, minus the gcloud user-credential file:
//!
//! 1. `GOOGLE_OAUTH_ACCESS_TOKEN` if set
//! 2. `GOOGLE_APPLICATION_CREDENTIALS` if set
//! 3. the metadata server (`GCE_METADATA_HOST` overrides its address)
//!
//! # Example
//!
//! ```ignore
//! use gce_auth::{TokenProvider, TokenSource};
//!
//! let http = gce_auth::tls::client_builder().build()?;
//! let provider = TokenProvider::new(TokenSource::auto(), http);
//! let bearer = provider.token().await?;
//! ```
//!
//! Tokens are cached until shortly before they expire, so a provider can be
//! shared by every request a process makes.

pub mod error;
pub mod metadata;
pub mod service_account;
pub mod tls;

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

pub use error::AuthError;
pub use service_account::ServiceAccountKey;

/// OAuth2 scope for Compute Engine instance start/stop
pub const COMPUTE_SCOPE: &str = "https://www.googleapis.com/auth/compute";

/// Environment variable holding a pre-minted access token
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Environment variable naming a service-account key file
pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Environment variable overriding the metadata server host
pub const METADATA_HOST_ENV: &str = "GCE_METADATA_HOST";

/// Refresh tokens this long before the server-side expiry
const EXPIRY_SKEW_SECS: i64 = 60;

/// Where access tokens come from
#[derive(Clone)]
pub enum TokenSource {
    /// A pre-minted bearer token, used verbatim
    Static {
        token: String,
    },
    /// A service-account key file
    ServiceAccount {
        path: PathBuf,
    },
    /// The GCE metadata server at `base_url`
    MetadataServer {
        base_url: String,
    },
}

impl std::fmt::Debug for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static { .. } => f.write_str("Static { token: <redacted> }"),
            Self::ServiceAccount { path } => f
                .debug_struct("ServiceAccount")
                .field("path", path)
                .finish(),
            Self::MetadataServer { base_url } => f
                .debug_struct("MetadataServer")
                .field("base_url", base_url)
                .finish(),
        }
    }
}

impl TokenSource {
    /// Create a TokenSource for a pre-minted token
    pub fn static_token(token: impl Into<String>) -> Self {
        Self::Static {
            token: token.into(),
        }
    }

    /// Create a TokenSource for a service-account key file
    pub fn service_account(path: impl Into<PathBuf>) -> Self {
        Self::ServiceAccount { path: path.into() }
    }

    /// Create a TokenSource for the metadata server
    ///
    /// Honors `GCE_METADATA_HOST`, falling back to `metadata.google.internal`.
    pub fn metadata_server() -> Self {
        let host = std::env::var(METADATA_HOST_ENV)
            .unwrap_or_else(|_| metadata::DEFAULT_METADATA_HOST.to_string());
        Self::MetadataServer {
            base_url: metadata::base_url_for_host(&host),
        }
    }

    /// Pick a source from the environment
    pub fn auto() -> Self {
        if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV)
            && !token.trim().is_empty()
        {
            return Self::static_token(token.trim());
        }
        if let Ok(path) = std::env::var(CREDENTIALS_ENV)
            && !path.is_empty()
        {
            return Self::service_account(path);
        }
        Self::metadata_server()
    }

    /// Short human-readable label for logs
    pub fn describe(&self) -> String {
        match self {
            Self::Static { .. } => "access token".to_string(),
            Self::ServiceAccount { path } => format!("service account key {}", path.display()),
            Self::MetadataServer { base_url } => format!("metadata server {}", base_url),
        }
    }
}

/// A bearer token and its expiry
#[derive(Clone)]
pub struct AccessToken {
    pub token: String,
    /// None for tokens whose lifetime is unknown (static tokens)
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Whether the token can still be used at `now`
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            None => true,
            Some(expires_at) => now
                .checked_add_signed(Duration::seconds(EXPIRY_SKEW_SECS))
                .is_some_and(|deadline| deadline < expires_at),
        }
    }
}

/// OAuth2 token response body, shared by the token endpoint and the
/// metadata server
#[derive(Deserialize)]
pub(crate) struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenResponse {
    pub(crate) fn into_access_token(self) -> AccessToken {
        AccessToken {
            token: self.access_token,
            // An expiry too far out to represent is treated as none
            expires_at: self
                .expires_in
                .and_then(Duration::try_seconds)
                .and_then(|lifetime| Utc::now().checked_add_signed(lifetime)),
        }
    }
}

/// Caching token provider
pub struct TokenProvider {
    source: TokenSource,
    scope: String,
    http: reqwest::Client,
    cache: Mutex<Option<AccessToken>>,
}

impl TokenProvider {
    /// Create a provider requesting the Compute Engine scope
    pub fn new(source: TokenSource, http: reqwest::Client) -> Self {
        Self {
            source,
            scope: COMPUTE_SCOPE.to_string(),
            http,
            cache: Mutex::new(None),
        }
    }

    /// Return a bearer token, fetching a new one if the cached one is stale
    pub async fn token(&self) -> Result<String, AuthError> {
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref()
            && cached.is_fresh(Utc::now())
        {
            return Ok(cached.token.clone());
        }

        let fresh = self.fetch().await?;
        debug!(
            source = %self.source.describe(),
            expires_at = ?fresh.expires_at,
            "obtained access token"
        );
        let token = fresh.token.clone();
        *cache = Some(fresh);
        Ok(token)
    }

    async fn fetch(&self) -> Result<AccessToken, AuthError> {
        match &self.source {
            TokenSource::Static { token } => {
                if token.trim().is_empty() {
                    return Err(AuthError::CredentialsLoad(
                        "access token is empty".to_string(),
                    ));
                }
                Ok(AccessToken {
                    token: token.trim().to_string(),
                    expires_at: None,
                })
            }
            TokenSource::ServiceAccount { path } => {
                let key = ServiceAccountKey::load(path)?;
                key.fetch_token(&self.http, &self.scope).await
            }
            TokenSource::MetadataServer { base_url } => {
                metadata::fetch_token(&self.http, base_url).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_freshness() {
        let now = Utc::now();
        let no_expiry = AccessToken {
            token: "t".into(),
            expires_at: None,
        };
        assert!(no_expiry.is_fresh(now));

        let later = AccessToken {
            token: "t".into(),
            expires_at: Some(now + Duration::seconds(3600)),
        };
        assert!(later.is_fresh(now));

        // Inside the skew window counts as stale
        let almost = AccessToken {
            token: "t".into(),
            expires_at: Some(now + Duration::seconds(30)),
        };
        assert!(!almost.is_fresh(now));
    }

    #[test]
    fn test_token_response_expiry() {
        let normal = TokenResponse {
            access_token: "t".into(),
            expires_in: Some(3599),
        }
        .into_access_token();
        assert!(normal.expires_at.is_some_and(|at| at > Utc::now()));

        for huge in [i64::MAX, i64::MAX / 1000, i64::MIN] {
            let token = TokenResponse {
                access_token: "t".into(),
                expires_in: Some(huge),
            }
            .into_access_token();
            assert_eq!(token.expires_at, None, "expires_in = {}", huge);
            assert!(token.is_fresh(Utc::now()));
        }
    }

    #[test]
    fn test_freshness_near_max_time() {
        let token = AccessToken {
            token: "t".into(),
            expires_at: Some(DateTime::<Utc>::MAX_UTC),
        };
        assert!(!token.is_fresh(DateTime::<Utc>::MAX_UTC));
    }

    #[test]
    fn test_token_source_debug_redacts() {
        let source = TokenSource::static_token("ya29.secret");
        let debug = format!("{:?}", source);
        assert!(!debug.contains("ya29.secret"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_describe() {
        assert_eq!(TokenSource::static_token("x").describe(), "access token");
        let sa = TokenSource::service_account("/tmp/key.json");
        assert_eq!(sa.describe(), "service account key /tmp/key.json");
    }

    fn http() -> reqwest::Client {
        tls::client_builder().build().expect("build http client")
    }

    #[tokio::test]
    async fn test_static_token_provider() {
        let provider = TokenProvider::new(TokenSource::static_token("  ya29.abc \n"), http());
        assert_eq!(provider.token().await.expect("token"), "ya29.abc");
    }

    #[tokio::test]
    async fn test_empty_static_token_rejected() {
        let provider = TokenProvider::new(TokenSource::static_token(""), http());
        let err = provider.token().await.expect_err("empty token should fail");
        assert!(matches!(err, AuthError::CredentialsLoad(_)));
    }
}
