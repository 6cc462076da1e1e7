//! The machine independent intermediate representation.
//!
//! - `tree` defines IR expressions and statements, with conditional jump
//!   targets that may still be pending a backpatch
//! - `printer` renders IR trees as indented text

pub mod printer;
pub mod tree;
