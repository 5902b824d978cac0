//! Command line interface for the field line tracer.

pub mod build;
pub mod run;
mod utils;
