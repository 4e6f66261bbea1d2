//! Command handlers for the prex CLI.
//!
//! Handlers build their output as text and leave printing to `main`, so
//! tests can compare it directly.

mod demo;
mod ops;

pub use demo::{demo_names, find_demo, run_all_demos, run_demo, Demo, DemoOptions};
pub use ops::list_operators;
