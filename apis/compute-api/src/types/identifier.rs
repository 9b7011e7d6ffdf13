// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Instance identifier (project, zone, instance name)
//!
//! An [`InstanceRef`] can only be built through [`InstanceRef::new`], which
//! checks each part against the Compute Engine naming rules. Holding one
//! therefore means the triple is safe to splice into a request path.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length of a zone or instance name
const MAX_NAME_LEN: usize = 63;

/// Project ID length bounds
const PROJECT_MIN_LEN: usize = 6;
const PROJECT_MAX_LEN: usize = 30;

/// Errors from identifier validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("project ID must not be empty")]
    EmptyProject,

    #[error(
        "invalid project ID '{0}': expected 6-30 lowercase letters, digits or hyphens, \
         starting with a letter and not ending with a hyphen"
    )]
    InvalidProject(String),

    #[error("zone must not be empty")]
    EmptyZone,

    #[error("invalid zone '{0}': expected a zone name such as 'us-central1-a'")]
    InvalidZone(String),

    #[error("instance name must not be empty")]
    EmptyInstance,

    #[error(
        "invalid instance name '{0}': expected 1-63 lowercase letters, digits or hyphens, \
         starting with a letter and not ending with a hyphen"
    )]
    InvalidInstance(String),
}

/// A validated reference to one Compute Engine instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInstanceRef")]
pub struct InstanceRef {
    project: String,
    zone: String,
    instance: String,
}

#[derive(Deserialize)]
struct RawInstanceRef {
    project: String,
    zone: String,
    instance: String,
}

impl TryFrom<RawInstanceRef> for InstanceRef {
    type Error = IdentifierError;

    fn try_from(raw: RawInstanceRef) -> Result<Self, Self::Error> {
        InstanceRef::new(raw.project, raw.zone, raw.instance)
    }
}

impl InstanceRef {
    /// Build a reference, validating every part
    pub fn new(
        project: impl Into<String>,
        zone: impl Into<String>,
        instance: impl Into<String>,
    ) -> Result<Self, IdentifierError> {
        let project = project.into();
        let zone = zone.into();
        let instance = instance.into();

        validate_project(&project)?;
        validate_zone(&zone)?;
        validate_instance(&instance)?;

        Ok(Self {
            project,
            zone,
            instance,
        })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Instance name
    pub fn name(&self) -> &str {
        &self.instance
    }

    /// Relative resource path, e.g. `projects/p/zones/z/instances/vm`
    pub fn resource_path(&self) -> String {
        format!(
            "projects/{}/zones/{}/instances/{}",
            self.project, self.zone, self.instance
        )
    }
}

impl fmt::Display for InstanceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resource_path())
    }
}

/// `[a-z]([-a-z0-9]*[a-z0-9])?`
fn is_rfc1035_label(s: &str) -> bool {
    let bytes = s.as_bytes();
    let Some((&first, rest)) = bytes.split_first() else {
        return false;
    };
    if !first.is_ascii_lowercase() {
        return false;
    }
    if rest.last() == Some(&b'-') {
        return false;
    }
    rest.iter()
        .all(|&b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Dotted lowercase DNS name, e.g. `example.com`
fn is_dns_name(s: &str) -> bool {
    !s.is_empty()
        && s.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        })
}

fn validate_project(project: &str) -> Result<(), IdentifierError> {
    if project.is_empty() {
        return Err(IdentifierError::EmptyProject);
    }

    // Domain-scoped projects ("example.com:my-project") keep the usual rules
    // for the part after the colon; the domain must be a DNS name.
    let (domain, id) = match project.rsplit_once(':') {
        Some((domain, id)) => (Some(domain), id),
        None => (None, project),
    };
    let domain_ok = domain.is_none_or(is_dns_name);
    let len_ok = (PROJECT_MIN_LEN..=PROJECT_MAX_LEN).contains(&id.len());
    if !domain_ok || !len_ok || !is_rfc1035_label(id) {
        return Err(IdentifierError::InvalidProject(project.to_string()));
    }
    Ok(())
}

fn validate_zone(zone: &str) -> Result<(), IdentifierError> {
    if zone.is_empty() {
        return Err(IdentifierError::EmptyZone);
    }
    if zone.len() > MAX_NAME_LEN || !zone.contains('-') || !is_rfc1035_label(zone) {
        return Err(IdentifierError::InvalidZone(zone.to_string()));
    }
    Ok(())
}

fn validate_instance(instance: &str) -> Result<(), IdentifierError> {
    if instance.is_empty() {
        return Err(IdentifierError::EmptyInstance);
    }
    if instance.len() > MAX_NAME_LEN || !is_rfc1035_label(instance) {
        return Err(IdentifierError::InvalidInstance(instance.to_string()));
    }
    Ok(())
}
