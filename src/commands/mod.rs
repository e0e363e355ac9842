//! Command implementations
//!
//! Every user-facing operation is an `impl Repository` block under
//! `porcelain`, so commands share the repository handle and its output
//! writer instead of threading state through free functions.

pub mod porcelain;
