// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! vm-power - start or stop a single Compute Engine VM

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use compute_api::PowerAction;
use compute_client::{ClientOptions, ComputeClient};
use tracing::{debug, info};

mod config;
mod exit;
mod lifecycle;
mod wait;

use config::{Overrides, Settings};
use lifecycle::{Controller, Outcome};
use wait::WaitOptions;

#[derive(Parser)]
#[command(
    name = "vm-power",
    version,
    about = "Start or stop a Compute Engine VM",
    long_about = "Query the power state of one Compute Engine VM and send a start or stop \
                  request only if it is not already RUNNING or TERMINATED"
)]
struct Cli {
    /// Action to perform
    #[arg(long, value_enum)]
    action: PowerAction,

    /// Profile supplying defaults for the target
    #[arg(long, env = "VM_POWER_PROFILE")]
    profile: Option<String>,

    /// Project ID
    #[arg(long, env = "VM_POWER_PROJECT")]
    project: Option<String>,

    /// Zone, e.g. asia-south1-a
    #[arg(long, env = "VM_POWER_ZONE")]
    zone: Option<String>,

    /// Instance name
    #[arg(long, env = "VM_POWER_INSTANCE")]
    instance: Option<String>,

    /// Compute API base URL
    #[arg(long, env = "VM_POWER_ENDPOINT")]
    endpoint: Option<String>,

    /// Service-account key file
    #[arg(long)]
    credentials: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "VM_POWER_TIMEOUT",
        default_value = "30",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    /// Wait for the VM to reach RUNNING or TERMINATED
    #[arg(long)]
    wait: bool,

    /// How long --wait polls before giving up, in seconds
    #[arg(long, default_value = "600")]
    wait_timeout: u64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            profile: self.profile.clone(),
            project: self.project.clone(),
            zone: self.zone.clone(),
            instance: self.instance.clone(),
            endpoint: self.endpoint.clone(),
            credentials: self.credentials.clone(),
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "vm_power=debug,compute_client=debug,gce_auth=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string()),
        ))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

async fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::resolve(cli.overrides(), Duration::from_secs(cli.timeout))?;
    debug!(
        instance = %settings.target,
        endpoint = %settings.endpoint,
        credentials = %settings.token_source.describe(),
        "resolved configuration"
    );

    let options = ClientOptions {
        timeout: settings.timeout,
        user_agent: format!("vm-power/{}", env!("CARGO_PKG_VERSION")),
    };
    let client = ComputeClient::new(&settings.endpoint, settings.token_source, options)?;
    let controller = Controller::new(&client);

    let outcome = controller.apply(&settings.target, cli.action).await?;

    if cli.wait
        && let Outcome::RequestAccepted { .. } = outcome
    {
        let expected = cli.action.target_status();
        info!("Waiting for VM to reach {}...", expected);
        controller
            .wait_for(
                &settings.target,
                &expected,
                WaitOptions::with_timeout(Duration::from_secs(cli.wait_timeout)),
            )
            .await?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => ExitCode::from(exit::report(&err)),
    }
}
