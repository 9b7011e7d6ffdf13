// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Compute Engine Instance Client Library
//!
//! This client covers the three Compute Engine v1 calls a power toggle
//! needs:
//!
//! - `GET  /compute/v1/projects/{project}/zones/{zone}/instances/{instance}`
//! - `POST /compute/v1/projects/{project}/zones/{zone}/instances/{instance}/start`
//! - `POST /compute/v1/projects/{project}/zones/{zone}/instances/{instance}/stop`
//!
//! ## Usage
//!
//! ```ignore
//! use compute_client::{ClientOptions, ComputeClient, InstanceApi};
//! use compute_api::InstanceRef;
//! use gce_auth::TokenSource;
//!
//! let client = ComputeClient::new(
//!     compute_api::DEFAULT_ENDPOINT,
//!     TokenSource::auto(),
//!     ClientOptions::default(),
//! )?;
//!
//! let target = InstanceRef::new("my-project", "us-central1-a", "my-vm")?;
//! let instance = client.get_instance(&target).await?;
//! if instance.status != compute_api::InstanceStatus::Running {
//!     client.start_instance(&target).await?;
//! }
//! ```
//!
//! Code that drives the API should depend on the [`InstanceApi`] trait rather
//! than on [`ComputeClient`], so it can be exercised without a network.

pub mod error;

use std::time::Duration;

use async_trait::async_trait;
use compute_api::{Instance, InstanceRef, Operation};
use gce_auth::{TokenProvider, TokenSource};
use serde::de::DeserializeOwned;
use tracing::debug;

pub use error::{ComputeError, ErrorKind};

// Re-export types from the API crate for convenience
pub use compute_api::{InstanceStatus, OperationStatus, PowerAction};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Instance lifecycle operations
#[async_trait]
pub trait InstanceApi: Send + Sync {
    /// Fetch the instance resource
    async fn get_instance(&self, target: &InstanceRef) -> Result<Instance, ComputeError>;

    /// Ask the provider to power the instance on
    async fn start_instance(&self, target: &InstanceRef) -> Result<Operation, ComputeError>;

    /// Ask the provider to power the instance off
    async fn stop_instance(&self, target: &InstanceRef) -> Result<Operation, ComputeError>;
}

/// Knobs for the underlying HTTP client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Applied to every request, token requests included
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("compute-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Compute Engine client backed by reqwest
pub struct ComputeClient {
    base_url: String,
    http: reqwest::Client,
    tokens: TokenProvider,
}

impl ComputeClient {
    /// Create a client for `base_url` (e.g. `https://compute.googleapis.com`)
    pub fn new(
        base_url: &str,
        token_source: TokenSource,
        options: ClientOptions,
    ) -> Result<Self, ComputeError> {
        let http = gce_auth::tls::client_builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens: TokenProvider::new(token_source, http.clone()),
            http,
        })
    }

    fn instance_url(&self, target: &InstanceRef) -> String {
        format!("{}/compute/v1/{}", self.base_url, target.resource_path())
    }

    /// Send an authenticated request and decode a 2xx JSON body
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        target: &InstanceRef,
    ) -> Result<T, ComputeError> {
        let token = self.tokens.token().await?;
        let response = request.bearer_auth(token).send().await?;

        let status = response.status();
        let url = response.url().clone();
        let body = response.text().await?;
        debug!(%url, status = status.as_u16(), "compute api response");

        if !status.is_success() {
            return Err(ComputeError::from_response(status.as_u16(), &body, target));
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn post_action(
        &self,
        target: &InstanceRef,
        action: &str,
    ) -> Result<Operation, ComputeError> {
        let url = format!("{}/{}", self.instance_url(target), action);
        debug!(%url, "POST");
        // Google front ends answer 411 to a POST without a length
        let request = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_LENGTH, "0")
            .body("");
        self.execute(request, target).await
    }
}

#[async_trait]
impl InstanceApi for ComputeClient {
    async fn get_instance(&self, target: &InstanceRef) -> Result<Instance, ComputeError> {
        let url = self.instance_url(target);
        debug!(%url, "GET");
        self.execute(self.http.get(&url), target).await
    }

    async fn start_instance(&self, target: &InstanceRef) -> Result<Operation, ComputeError> {
        self.post_action(target, "start").await
    }

    async fn stop_instance(&self, target: &InstanceRef) -> Result<Operation, ComputeError> {
        self.post_action(target, "stop").await
    }
}
