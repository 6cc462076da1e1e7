//! Symbols and scoped symbol tables.
//!
//! - `Symbol` interns names in a process-wide table so that comparing two
//!   names is an integer comparison
//! - `ScopedTable` maps symbols to values with `begin_scope`/`end_scope`
//!   shadowing, used for both the value and the type environment

pub mod symbol;
pub mod table;
