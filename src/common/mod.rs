//! # Common Components
//!
//! Shared utilities used by the library core and the `stego` binary.
//!
//! ## Modules
//!
//! - [`error`]: The error taxonomy for hide/reveal operations
//! - [`config`]: Configuration parsing utilities
//! - [`logging`]: Logger initialisation

pub mod config;
pub mod error;
pub mod logging;
