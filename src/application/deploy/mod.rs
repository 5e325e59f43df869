//! Deploy Module
//!
//! Turns the resolved configuration into the pipeline for a task and runs it.
//!
//! ## Usage
//!
//! ```ignore
//! use riepete_deploy::application::DeployUseCase;
//!
//! let use_case = DeployUseCase::new(config, project_dir, transfer)?;
//! let report = use_case.execute(Task::Deploy, &runner, &events)?;
//! ```

mod use_case;

pub use use_case::{DeployUseCase, PERMISSIONS_DISABLED_REASON};
