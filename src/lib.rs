//! Specbump - refresh RPM packaging from upstream git snapshots
//!
//! Given an upstream tarball that ships its `git log` output, this library
//! computes a snapshot package version, patches the package's `.spec` file
//! and prepends the new upstream changes to its `.changes` file.
//!
//! This library provides:
//! - [`archive`]: Tarball inspection
//! - [`changelog`]: `.changes` entry rendering
//! - [`config`]: Run configuration
//! - [`fetch`]: Archive download
//! - [`history`]: Revision history parsing and diffing
//! - [`manifest`]: Spec file field patching
//! - [`model`]: Domain models
//! - [`store`]: Atomic file replacement
//! - [`sync`]: Run orchestration

pub mod archive;
pub mod changelog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod history;
pub mod manifest;
pub mod model;
pub mod store;
pub mod sync;

pub use config::{Config, Options};
pub use error::SyncError;
pub use sync::{Outcome, SyncState, Updater};
