// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Configuration management
//!
//! Settings are merged from three layers, highest first:
//!
//! 1. command-line flags
//! 2. environment variables (`VM_POWER_*`, read by clap)
//! 3. the profile named by `--profile` / `VM_POWER_PROFILE`
//!
//! Everything is validated here, before any request is sent.

pub mod paths;
pub mod profile;

use std::path::PathBuf;
use std::time::Duration;

use compute_api::{IdentifierError, InstanceRef};
use gce_auth::TokenSource;
use thiserror::Error;

pub use profile::Profile;

/// Invalid or incomplete configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no {field} configured: pass --{field}, set {env}, or add it to a profile")]
    Missing {
        field: &'static str,
        env: &'static str,
    },

    #[error("invalid target: {0}")]
    InvalidTarget(#[from] IdentifierError),

    #[error("invalid endpoint '{0}': expected an http:// or https:// URL")]
    InvalidEndpoint(String),

    #[error("invalid profile name '{0}'")]
    InvalidProfileName(String),

    #[error("failed to read profile '{name}' from {}: {source}", .path.display())]
    ProfileRead {
        name: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse profile '{name}': {source}")]
    ProfileParse {
        name: String,
        source: serde_json::Error,
    },
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub project: Option<String>,
    pub zone: Option<String>,
    pub instance: Option<String>,
    pub endpoint: Option<String>,
    pub credentials: Option<PathBuf>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub target: InstanceRef,
    pub endpoint: String,
    pub token_source: TokenSource,
    pub timeout: Duration,
}

impl Settings {
    /// Merge overrides with the named profile (if any) and validate
    pub fn resolve(overrides: Overrides, timeout: Duration) -> Result<Self, ConfigError> {
        let profile = match overrides.profile.as_deref() {
            Some(name) => Profile::load(name)?,
            None => Profile::default(),
        };
        Self::merge(overrides, profile, timeout)
    }

    fn merge(overrides: Overrides, profile: Profile, timeout: Duration) -> Result<Self, ConfigError> {
        let project = pick(overrides.project, profile.project).ok_or(ConfigError::Missing {
            field: "project",
            env: "VM_POWER_PROJECT",
        })?;
        let zone = pick(overrides.zone, profile.zone).ok_or(ConfigError::Missing {
            field: "zone",
            env: "VM_POWER_ZONE",
        })?;
        let instance = pick(overrides.instance, profile.instance).ok_or(ConfigError::Missing {
            field: "instance",
            env: "VM_POWER_INSTANCE",
        })?;
        let target = InstanceRef::new(project, zone, instance)?;

        let endpoint = pick(overrides.endpoint, profile.endpoint)
            .unwrap_or_else(|| compute_api::DEFAULT_ENDPOINT.to_string());
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(ConfigError::InvalidEndpoint(endpoint));
        }

        let token_source = match overrides.credentials.or(profile.credentials) {
            Some(path) => TokenSource::service_account(path),
            None => TokenSource::auto(),
        };

        Ok(Self {
            target,
            endpoint,
            token_source,
            timeout,
        })
    }
}

/// First non-blank value, trimmed
fn pick(preferred: Option<String>, fallback: Option<String>) -> Option<String> {
    [preferred, fallback]
        .into_iter()
        .flatten()
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}
