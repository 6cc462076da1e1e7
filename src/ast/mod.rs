//! Syntax tree consumed by the analyzer.
//!
//! The parser lives outside this crate; this module only fixes the shape of
//! the tree it hands over. Every node carries a `Position`.
//!
//! - `ast`: variables, operators and expressions
//! - `declarations`: function, variable and type declarations
//! - `types`: type expressions and fields
//! - `builders`: shorthand constructors

pub mod ast;
pub mod builders;
pub mod declarations;
pub mod types;
