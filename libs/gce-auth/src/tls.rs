// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! rustls crypto provider setup
//!
//! reqwest is built with `rustls-no-provider`, so a process-level provider
//! has to be installed before the first client is built. See the comment
//! on `rustls` in the workspace Cargo.toml.

/// Install the `ring` provider as the process default
///
/// Safe to call more than once; later calls are no-ops.
pub fn install_crypto_provider() {
    // Err means a provider is already installed.
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// A reqwest builder that is ready to build
pub fn client_builder() -> reqwest::ClientBuilder {
    install_crypto_provider();
    reqwest::Client::builder()
}
