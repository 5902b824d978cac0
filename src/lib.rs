//! The `fieldtrace` crate traces field lines through static vector fields
//! sampled on the grid of a plasma simulation snapshot.

pub mod cli;
pub mod error;
pub mod field;
pub mod geometry;
pub mod grid;
pub mod interpolation;
pub mod io;
pub mod num;
pub mod tracing;
pub mod variables;
