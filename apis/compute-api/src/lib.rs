// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Compute Engine instance lifecycle types
//!
//! This crate holds the subset of the Compute Engine v1 REST schema that the
//! power toggle needs: the instance resource and its status, the operation
//! returned by `instances.start` / `instances.stop`, and the error envelope
//! Google APIs wrap failures in.
//!
//! It also defines the local vocabulary layered over that schema:
//! [`InstanceRef`] (the validated project/zone/instance triple) and
//! [`PowerAction`] (the start/stop request a user asks for).

pub mod types;
pub use types::*;

/// Default Compute Engine endpoint
pub const DEFAULT_ENDPOINT: &str = "https://compute.googleapis.com";
