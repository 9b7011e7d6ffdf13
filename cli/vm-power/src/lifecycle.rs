// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Power state toggle for a single instance
//!
//! One status read, then at most one start or stop request. Only RUNNING
//! counts as started and only TERMINATED counts as stopped; every other
//! status is handed to the provider to sort out.

use std::time::Duration;

use compute_api::{InstanceRef, InstanceStatus, Operation, PowerAction};
use compute_client::{ComputeError, ErrorKind, InstanceApi};
use thiserror::Error;
use tracing::{debug, info, warn};

/// What `apply` did
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The instance was already where the action would take it
    AlreadyInState { status: InstanceStatus },
    /// The provider accepted a transition request
    RequestAccepted { operation: Operation },
}

#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error(transparent)]
    Compute(#[from] ComputeError),

    #[error(
        "timed out after {}s waiting for {expected}; last observed status {last}",
        .waited.as_secs()
    )]
    WaitTimedOut {
        expected: InstanceStatus,
        last: InstanceStatus,
        waited: Duration,
    },
}

impl LifecycleError {
    /// Failure class for API errors; `None` for a wait timeout
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            LifecycleError::Compute(e) => Some(e.kind()),
            LifecycleError::WaitTimedOut { .. } => None,
        }
    }
}

/// Drives one instance through an [`InstanceApi`]
pub struct Controller<'a, A: InstanceApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: InstanceApi + ?Sized> Controller<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Read the current status, fresh from the provider
    pub async fn query_status(&self, target: &InstanceRef) -> Result<InstanceStatus, LifecycleError> {
        let instance = self.api.get_instance(target).await?;
        debug!(instance = %target, status = %instance.status, "fetched instance");
        Ok(instance.status)
    }

    /// Bring the instance toward the action's target status
    pub async fn apply(
        &self,
        target: &InstanceRef,
        action: PowerAction,
    ) -> Result<Outcome, LifecycleError> {
        let status = self.query_status(target).await?;
        info!("Current VM status: {}", status);

        if action.is_satisfied_by(&status) {
            match action {
                PowerAction::Stop => warn!("VM already stopped. No action needed."),
                PowerAction::Start => warn!("VM already running. No action needed."),
            }
            return Ok(Outcome::AlreadyInState { status });
        }

        let operation = match action {
            PowerAction::Stop => {
                info!("Stopping VM: {}", target.name());
                self.api.stop_instance(target).await?
            }
            PowerAction::Start => {
                info!("Starting VM: {}", target.name());
                self.api.start_instance(target).await?
            }
        };
        debug!(
            %action,
            operation = %operation.name,
            status = ?operation.status,
            "transition request answered"
        );

        if operation.has_failed() {
            return Err(ComputeError::OperationFailed {
                operation: operation.name.clone(),
                message: operation.failure_message(),
            }
            .into());
        }
        match action {
            PowerAction::Stop => info!("Stop request sent successfully."),
            PowerAction::Start => info!("Start request sent successfully."),
        }

        Ok(Outcome::RequestAccepted { operation })
    }
}
