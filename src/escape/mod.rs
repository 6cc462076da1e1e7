//! Escape analysis.
//!
//! Runs over the syntax tree before type checking and decides which
//! variables have to live in the frame because a nested function reads or
//! writes them through a static link. Everything else may stay in a
//! register.

pub mod escape;
