// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! # Tracing configuration setup.
//!
//! Calling the `init` function will initialize a global tracing subscriber based on the value of
//! the `OPENRPC_LOG` environment variable, which follows the same conventions as `RUST_LOG`.
//! Logs go to stderr so that a document printed to stdout stays clean.

use tracing_subscriber::{EnvFilter, filter::LevelFilter, prelude::*, util::TryInitError};

const OPENRPC_LOG: &str = "OPENRPC_LOG";

pub fn init() -> Result<(), TryInitError> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr);
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(OPENRPC_LOG)
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
}
