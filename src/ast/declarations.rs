use std::cell::Cell;

use crate::{symbol::symbol::Symbol, Position};

use super::{
    ast::Expr,
    types::{Field, Ty},
};

/// Declarations of a `let`. Consecutive function or type declarations are
/// grouped by the parser and may refer to each other.
#[derive(Debug, Clone, PartialEq)]
pub enum Dec {
    Functions(Vec<FunDec>),
    Var(VarDec),
    Types(Vec<TypeDec>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunDec {
    pub name: Symbol,
    pub params: Vec<Field>,
    pub result: Option<(Symbol, Position)>,
    pub body: Expr,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDec {
    pub name: Symbol,
    /// Set by escape analysis. Starts out `true`.
    pub escape: Cell<bool>,
    pub type_name: Option<(Symbol, Position)>,
    pub init: Expr,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDec {
    pub name: Symbol,
    pub ty: Ty,
    pub position: Position,
}
