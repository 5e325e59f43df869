//! Common test utilities for riepete-deploy CLI and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: isolated project, home and deployment directories
//! - Fake `sbt`, `ssh`, `rsync`, `supervisorctl` and `chown` on `PATH`
//!   that append their invocation to a shared tool log

#![allow(dead_code)]

pub mod env;

pub use env::*;
