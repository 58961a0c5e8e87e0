//! Library surface of the promframe binary.
//!
//! Argument parsing lives in [`cli`], command implementations in
//! [`commands`]. Splitting them out keeps the commands testable without
//! spawning the binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cli;
pub mod commands;
pub mod error;

pub use error::CliError;
