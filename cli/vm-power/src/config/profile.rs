// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Target profiles

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// A named set of defaults for one VM
///
/// Every field is optional so a profile can pin just the project and zone
/// and leave the instance to the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    /// Project ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Zone, e.g. `asia-south1-a`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,

    /// Instance name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Compute API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Service-account key file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<PathBuf>,
}

impl Profile {
    /// Load a profile from the profiles directory
    pub fn load(name: &str) -> Result<Self, ConfigError> {
        validate_name(name)?;
        Self::load_from(name, &super::paths::profile_path(name))
    }

    /// Load a profile from an explicit path
    pub fn load_from(name: &str, path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ProfileRead {
            name: name.to_string(),
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::ProfileParse {
            name: name.to_string(),
            source,
        })
    }
}

/// Profile names become file names, so keep them to one path component
fn validate_name(name: &str) -> Result<(), ConfigError> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidProfileName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("dev.json");
        std::fs::write(&path, content).expect("write profile");
        path
    }

    #[test]
    fn test_load_full_profile() {
        let dir = TempDir::new().expect("temp dir");
        let path = write(
            &dir,
            r#"{
                "project": "my-project",
                "zone": "asia-south1-a",
                "instance": "dev-backend-vm",
                "endpoint": "https://compute.example.test",
                "credentials": "/etc/vm-power/key.json"
            }"#,
        );

        let profile = Profile::load_from("dev", &path).expect("load profile");
        assert_eq!(
            profile,
            Profile {
                project: Some("my-project".into()),
                zone: Some("asia-south1-a".into()),
                instance: Some("dev-backend-vm".into()),
                endpoint: Some("https://compute.example.test".into()),
                credentials: Some(PathBuf::from("/etc/vm-power/key.json")),
            }
        );
    }

    #[test]
    fn test_load_partial_profile() {
        let dir = TempDir::new().expect("temp dir");
        let path = write(&dir, r#"{"project": "my-project"}"#);

        let profile = Profile::load_from("dev", &path).expect("load profile");
        assert_eq!(profile.project.as_deref(), Some("my-project"));
        assert!(profile.zone.is_none());
        assert!(profile.instance.is_none());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let path = write(&dir, r#"{"project": "my-project", "vm": "typo"}"#);

        let err = Profile::load_from("dev", &path).expect_err("unknown field");
        assert!(matches!(err, ConfigError::ProfileParse { .. }));
    }

    #[test]
    fn test_missing_profile() {
        let dir = TempDir::new().expect("temp dir");
        let err = Profile::load_from("dev", &dir.path().join("nope.json"))
            .expect_err("missing profile");
        assert!(matches!(err, ConfigError::ProfileRead { .. }));
    }

    #[test]
    fn test_profile_name_validation() {
        assert!(validate_name("dev").is_ok());
        assert!(validate_name("prod_eu-1.backup").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("../etc/passwd").is_err());
        assert!(validate_name(".hidden").is_err());
        assert!(validate_name("a/b").is_err());
    }
}
