// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Instance-related types

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::Display;

use super::common::Timestamp;

/// Instance status as reported by Compute Engine
///
/// The provider owns the state machine; this side only ever reads it. Status
/// strings that are not listed here deserialize to [`InstanceStatus::Unknown`]
/// so a newly introduced provider state does not break status reads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InstanceStatus {
    Provisioning,
    Staging,
    Running,
    Stopping,
    Stopped,
    Terminated,
    Suspending,
    Suspended,
    Repairing,
    Unknown(String),
}

impl InstanceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Provisioning => "PROVISIONING",
            Self::Staging => "STAGING",
            Self::Running => "RUNNING",
            Self::Stopping => "STOPPING",
            Self::Stopped => "STOPPED",
            Self::Terminated => "TERMINATED",
            Self::Suspending => "SUSPENDING",
            Self::Suspended => "SUSPENDED",
            Self::Repairing => "REPAIRING",
            Self::Unknown(s) => s,
        }
    }
}

impl From<String> for InstanceStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "PROVISIONING" => Self::Provisioning,
            "STAGING" => Self::Staging,
            "RUNNING" => Self::Running,
            "STOPPING" => Self::Stopping,
            "STOPPED" => Self::Stopped,
            "TERMINATED" => Self::Terminated,
            "SUSPENDING" => Self::Suspending,
            "SUSPENDED" => Self::Suspended,
            "REPAIRING" => Self::Repairing,
            _ => Self::Unknown(s),
        }
    }
}

impl From<&str> for InstanceStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<InstanceStatus> for String {
    fn from(status: InstanceStatus) -> Self {
        match status {
            InstanceStatus::Unknown(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Power action requested by the user
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PowerAction {
    /// Power the instance on
    Start,
    /// Power the instance off
    Stop,
}

impl PowerAction {
    /// The status the instance settles in once the action completes
    pub fn target_status(self) -> InstanceStatus {
        match self {
            Self::Start => InstanceStatus::Running,
            Self::Stop => InstanceStatus::Terminated,
        }
    }

    /// Whether an instance in `status` already satisfies this action
    ///
    /// Only the terminal status counts: an instance that is STOPPING is not
    /// yet stopped, and one that is STAGING is not yet running.
    pub fn is_satisfied_by(self, status: &InstanceStatus) -> bool {
        *status == self.target_status()
    }
}

/// Compute Engine instance resource (subset)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    /// Numeric ID, serialized by the API as a decimal string
    #[serde(default)]
    pub id: Option<String>,
    /// Instance name
    pub name: String,
    /// Current status
    pub status: InstanceStatus,
    /// Additional detail about the current status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    /// Zone URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    /// Machine type URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_start_timestamp: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_stop_timestamp: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("PROVISIONING" => InstanceStatus::Provisioning)]
    #[test_case("STAGING" => InstanceStatus::Staging)]
    #[test_case("RUNNING" => InstanceStatus::Running)]
    #[test_case("STOPPING" => InstanceStatus::Stopping)]
    #[test_case("STOPPED" => InstanceStatus::Stopped)]
    #[test_case("TERMINATED" => InstanceStatus::Terminated)]
    #[test_case("SUSPENDING" => InstanceStatus::Suspending)]
    #[test_case("SUSPENDED" => InstanceStatus::Suspended)]
    #[test_case("REPAIRING" => InstanceStatus::Repairing)]
    #[test_case("HIBERNATED" => InstanceStatus::Unknown("HIBERNATED".into()))]
    fn test_status_from_wire(s: &str) -> InstanceStatus {
        let json = format!("\"{}\"", s);
        let status: InstanceStatus = serde_json::from_str(&json).expect("deserialize status");
        assert_eq!(status.to_string(), s);
        status
    }

    #[test]
    fn test_status_serializes_as_wire_string() {
        let json = serde_json::to_string(&InstanceStatus::Terminated).expect("serialize");
        assert_eq!(json, r#""TERMINATED""#);
        let json = serde_json::to_string(&InstanceStatus::Unknown("NEW_STATE".into()))
            .expect("serialize");
        assert_eq!(json, r#""NEW_STATE""#);
    }

    #[test]
    fn test_power_action_strings() {
        assert_eq!(PowerAction::Start.to_string(), "start");
        assert_eq!(PowerAction::Stop.to_string(), "stop");
    }

    #[test_case(PowerAction::Start, InstanceStatus::Running => true)]
    #[test_case(PowerAction::Start, InstanceStatus::Staging => false)]
    #[test_case(PowerAction::Start, InstanceStatus::Terminated => false)]
    #[test_case(PowerAction::Stop, InstanceStatus::Terminated => true)]
    #[test_case(PowerAction::Stop, InstanceStatus::Stopping => false)]
    #[test_case(PowerAction::Stop, InstanceStatus::Stopped => false)]
    #[test_case(PowerAction::Stop, InstanceStatus::Running => false)]
    fn test_is_satisfied_by(action: PowerAction, status: InstanceStatus) -> bool {
        action.is_satisfied_by(&status)
    }

    #[test]
    fn test_instance_deserialize() {
        let body = r#"{
            "kind": "compute#instance",
            "id": "4567890123456789012",
            "creationTimestamp": "2025-11-02T09:14:03.123-07:00",
            "name": "dev-backend-vm",
            "machineType": "https://www.googleapis.com/compute/v1/projects/p/zones/asia-south1-a/machineTypes/e2-medium",
            "status": "RUNNING",
            "zone": "https://www.googleapis.com/compute/v1/projects/p/zones/asia-south1-a",
            "selfLink": "https://www.googleapis.com/compute/v1/projects/p/zones/asia-south1-a/instances/dev-backend-vm",
            "lastStartTimestamp": "2026-01-10T08:00:00.000-07:00"
        }"#;
        let instance: Instance = serde_json::from_str(body).expect("deserialize instance");
        assert_eq!(instance.name, "dev-backend-vm");
        assert_eq!(instance.status, InstanceStatus::Running);
        assert_eq!(instance.id.as_deref(), Some("4567890123456789012"));
        assert!(instance.last_stop_timestamp.is_none());
    }
}
