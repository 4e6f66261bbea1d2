//! Prex IR - plain data types shared by the evaluator and the driver.
//!
//! This crate contains no evaluation logic:
//! - `Number`: the numeric payload of every evaluated node (`Int` or `Float`)
//! - `NumericFault`: typed arithmetic faults raised by `Number` kernels
//! - `Name`: a cheaply cloned identifier for variables and lambdas
//! - `OpKind` / `FormKind`: the closed set of node tags with their
//!   canonical names and rendering symbols

mod name;
mod number;
mod op_kind;

pub use name::Name;
pub use number::{Number, NumericFault};
pub use op_kind::{FormKind, OpKind};
