// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Compute API type definitions

pub mod common;
pub mod identifier;
pub mod instance;
pub mod operation;

pub use common::*;
pub use identifier::*;
pub use instance::*;
pub use operation::*;
