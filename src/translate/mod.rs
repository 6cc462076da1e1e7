//! Translation to IR.
//!
//! This module turns checked constructs into IR trees. It handles:
//!
//! - The level tree, one level per function, and static link addressing of
//!   variables declared in enclosing functions
//! - The three shapes of translated expressions (value, effect and
//!   condition) and the coercions between them
//! - Backpatching of conditional jump targets through a patch table
//! - The fragment store of finished procedures and string literals

pub mod fragments;
pub mod level;
pub mod translate;

#[cfg(test)]
mod tests;
