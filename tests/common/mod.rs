//! Common test utilities for integration and scenario tests.
//!
//! This module provides helpers for creating temporary package
//! directories and upstream snapshot archives.
//!
//! Note: Each integration test file compiles as a separate crate,
//! so not all helpers are used in every test file. We suppress
//! dead_code warnings at the module level.

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod test_package;

pub use test_package::{EMAIL, HISTORY, PACKAGE, TestPackage};
