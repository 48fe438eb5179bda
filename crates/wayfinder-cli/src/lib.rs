//! Wayfinder CLI library.
//!
//! Output formatting shared by the `wayfinder` binary's subcommands.

pub mod output;
