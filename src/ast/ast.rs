use std::cell::Cell;

use crate::{symbol::symbol::Symbol, Position};

use super::declarations::Dec;

/// An assignable location.
#[derive(Debug, Clone, PartialEq)]
pub enum Var {
    Simple(Symbol, Position),
    Field(Box<Var>, Symbol, Position),
    Subscript(Box<Var>, Box<Expr>, Position),
}

impl Var {
    pub fn position(&self) -> &Position {
        match self {
            Var::Simple(_, position) | Var::Field(_, _, position) | Var::Subscript(_, _, position) => position,
        }
    }
}

/// Binary operators. `And` and `Or` short-circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Oper {
    Plus,
    Minus,
    Times,
    Divide,
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl Oper {
    pub fn is_equality(self) -> bool {
        matches!(self, Oper::Eq | Oper::Neq)
    }
}

/// One field initialiser of a record expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInit {
    pub name: Symbol,
    pub value: Expr,
    pub position: Position,
}

/// Expression nodes as produced by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Var(Var),
    Nil(Position),
    Int(i32, Position),
    String(String, Position),
    Call {
        function: Symbol,
        arguments: Vec<Expr>,
        position: Position,
    },
    Op {
        oper: Oper,
        left: Box<Expr>,
        right: Box<Expr>,
        position: Position,
    },
    Record {
        type_name: Symbol,
        fields: Vec<FieldInit>,
        position: Position,
    },
    Seq(Vec<Expr>, Position),
    Assign {
        var: Var,
        value: Box<Expr>,
        position: Position,
    },
    If {
        test: Box<Expr>,
        then: Box<Expr>,
        otherwise: Option<Box<Expr>>,
        position: Position,
    },
    While {
        test: Box<Expr>,
        body: Box<Expr>,
        position: Position,
    },
    For {
        var: Symbol,
        escape: Cell<bool>,
        lo: Box<Expr>,
        hi: Box<Expr>,
        body: Box<Expr>,
        position: Position,
    },
    Break(Position),
    Let {
        decs: Vec<Dec>,
        body: Box<Expr>,
        position: Position,
    },
    Array {
        type_name: Symbol,
        size: Box<Expr>,
        init: Box<Expr>,
        position: Position,
    },
}

impl Expr {
    pub fn position(&self) -> &Position {
        match self {
            Expr::Var(var) => var.position(),
            Expr::Nil(position)
            | Expr::Int(_, position)
            | Expr::String(_, position)
            | Expr::Seq(_, position)
            | Expr::Break(position) => position,
            Expr::Call { position, .. }
            | Expr::Op { position, .. }
            | Expr::Record { position, .. }
            | Expr::Assign { position, .. }
            | Expr::If { position, .. }
            | Expr::While { position, .. }
            | Expr::For { position, .. }
            | Expr::Let { position, .. }
            | Expr::Array { position, .. } => position,
        }
    }

    /// Moves this node to `new_position`. Children keep their own positions.
    pub fn at(mut self, new_position: Position) -> Self {
        let slot = match &mut self {
            Expr::Var(Var::Simple(_, position))
            | Expr::Var(Var::Field(_, _, position))
            | Expr::Var(Var::Subscript(_, _, position)) => position,
            Expr::Nil(position)
            | Expr::Int(_, position)
            | Expr::String(_, position)
            | Expr::Seq(_, position)
            | Expr::Break(position) => position,
            Expr::Call { position, .. }
            | Expr::Op { position, .. }
            | Expr::Record { position, .. }
            | Expr::Assign { position, .. }
            | Expr::If { position, .. }
            | Expr::While { position, .. }
            | Expr::For { position, .. }
            | Expr::Let { position, .. }
            | Expr::Array { position, .. } => position,
        };
        *slot = new_position;
        self
    }
}
