// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! GCE metadata server token source
//!
//! Code running on a Compute Engine VM can ask the local metadata server for
//! a token belonging to the VM's attached service account.

use std::time::Duration;

use tracing::debug;

use crate::error::AuthError;
use crate::{AccessToken, TokenResponse};

/// Default metadata server host
pub const DEFAULT_METADATA_HOST: &str = "metadata.google.internal";

/// Path of the default service account's token
pub const TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";

/// The metadata server answers locally; anything slower means it is not there.
const METADATA_TIMEOUT: Duration = Duration::from_secs(5);

/// Base URL for a metadata host (`GCE_METADATA_HOST` style, no scheme)
pub fn base_url_for_host(host: &str) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        host.trim_end_matches('/').to_string()
    } else {
        format!("http://{}", host.trim_end_matches('/'))
    }
}

/// Request a token for the default service account
pub async fn fetch_token(http: &reqwest::Client, base_url: &str) -> Result<AccessToken, AuthError> {
    let url = format!("{}{}", base_url.trim_end_matches('/'), TOKEN_PATH);
    debug!(%url, "requesting token from metadata server");

    let response = http
        .get(&url)
        .header("Metadata-Flavor", "Google")
        .timeout(METADATA_TIMEOUT)
        .send()
        .await
        .map_err(|e| AuthError::MetadataUnavailable(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AuthError::MetadataUnavailable(format!(
            "HTTP {} from {}",
            status.as_u16(),
            url
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| AuthError::MetadataUnavailable(e.to_string()))?;
    let token: TokenResponse = serde_json::from_str(&body)?;
    Ok(token.into_access_token())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_for_host() {
        assert_eq!(
            base_url_for_host(DEFAULT_METADATA_HOST),
            "http://metadata.google.internal"
        );
        assert_eq!(base_url_for_host("127.0.0.1:8080/"), "http://127.0.0.1:8080");
        assert_eq!(base_url_for_host("http://localhost:1234"), "http://localhost:1234");
    }
}
