//! Domain Services
//!
//! Pure command construction. No process is spawned here.

pub mod shell;

pub use shell::{quote, quote_path, shell_command};
