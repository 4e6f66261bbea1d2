//! Crate-level tests that exercise several modules together.
