//! The type model used by the type checker.
//!
//! Types live in a `TypeArena` and are addressed by `TypeId`. This module
//! provides:
//!
//! - The builtin types `int`, `string`, `nil` and `void` at fixed ids
//! - Nominal record and array types, one node per declaration
//! - Forward declared names that are filled in once, and cycle safe
//!   resolution of alias chains
//! - The equivalence and `nil`-to-record compatibility rules

pub mod types;

#[cfg(test)]
mod tests;
