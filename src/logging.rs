// ABOUTME: Production logging setup with env-filter support
// ABOUTME: Initializes the tracing subscriber for the server binaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

//! Logging initialization
//!
//! Honors `RUST_LOG` when set; defaults to `info` otherwise.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber
///
/// Call once at binary startup, before any other work.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
