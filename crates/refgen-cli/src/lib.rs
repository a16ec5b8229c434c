//! refgen CLI library.
//!
//! Exposes the argument definitions, logging setup and the generation
//! command so the binary stays a thin entry point.

pub mod cli;
pub mod logging;
pub mod run;
