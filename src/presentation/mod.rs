//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases and runners with infrastructure dependencies
//!
//! Terminal rendering lives with the binary (`src/ui`).

pub mod cli;
pub mod factory;

pub use cli::{Cli, ColorWhen, Commands};
pub use factory::{create_deploy_use_case, create_runner};
