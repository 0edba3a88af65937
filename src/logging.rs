// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Subscriber setup for the binary. The library only emits events.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a stderr `fmt` layer filtered by `RUST_LOG` (default `info`).
///
/// `verbose` raises the default to `debug`; an explicit `RUST_LOG` always wins.
/// Calling this twice is harmless: the second install is ignored.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}
