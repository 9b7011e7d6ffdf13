// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Wait for an instance to settle after a transition request

use std::time::Duration;

use compute_api::{InstanceRef, InstanceStatus};
use compute_client::InstanceApi;
use tokio::time::{Instant, sleep};
use tracing::{debug, info};

use crate::lifecycle::{Controller, LifecycleError};

/// Polling schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Delay before the second poll
    pub initial_delay: Duration,
    /// Upper bound on the delay between polls
    pub max_delay: Duration,
    /// Give up once this much time has passed
    pub timeout: Duration,
}

impl WaitOptions {
    pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(2);
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            initial_delay: Self::DEFAULT_INITIAL_DELAY,
            max_delay: Self::DEFAULT_MAX_DELAY,
            timeout,
        }
    }

    /// Delay that follows `current`: doubled, capped at `max_delay`
    fn next_delay(&self, current: Duration) -> Duration {
        current.saturating_mul(2).min(self.max_delay)
    }
}

impl<A: InstanceApi + ?Sized> Controller<'_, A> {
    /// Poll until the instance reports `expected`
    ///
    /// Read errors end the wait immediately; only the deadline is retried
    /// against.
    pub async fn wait_for(
        &self,
        target: &InstanceRef,
        expected: &InstanceStatus,
        options: WaitOptions,
    ) -> Result<InstanceStatus, LifecycleError> {
        let start = Instant::now();
        let mut delay = options.initial_delay;

        loop {
            let status = self.query_status(target).await?;
            if &status == expected {
                info!("VM reached {} after {}s.", status, start.elapsed().as_secs());
                return Ok(status);
            }

            let elapsed = start.elapsed();
            if elapsed >= options.timeout {
                return Err(LifecycleError::WaitTimedOut {
                    expected: expected.clone(),
                    last: status,
                    waited: elapsed,
                });
            }

            let pause = delay.min(options.timeout - elapsed);
            debug!(status = %status, ?pause, "waiting for {}", expected);
            sleep(pause).await;
            delay = options.next_delay(delay);
        }
    }
}
