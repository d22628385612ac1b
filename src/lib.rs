// Copyright 2026 Portside Contributors
// SPDX-License-Identifier: Apache-2.0

//! Portside library — cargo-manifest tracker for the customs portal.
//!
//! Queries the portal's paged manifest endpoint for one or two vessel
//! call signs, merges the results, and exposes them to the CLI layer.

pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod portal;
pub mod progress;
