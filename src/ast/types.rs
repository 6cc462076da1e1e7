use std::cell::Cell;

use crate::{symbol::symbol::Symbol, Position};

/// A record field declaration or a function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: Symbol,
    pub escape: Cell<bool>,
    pub type_name: Symbol,
    pub position: Position,
}

/// Type expressions on the right of a type declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Ty {
    Name(Symbol, Position),
    Record(Vec<Field>, Position),
    Array(Symbol, Position),
}
