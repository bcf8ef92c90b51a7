//! Core library components.
//!
//! Configuration handling, provider backends and the file operations
//! built on top of them. Nothing here prints to the terminal.

pub mod codec;
pub mod config;
pub mod constants;
pub mod fs;
pub mod kms;
pub mod session;
pub mod walk;
