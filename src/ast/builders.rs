//! Shorthand constructors for syntax trees.
//!
//! Every node gets `Position::null()`; use [`Expr::at`] where a test needs a
//! real position. Escape flags start out `true`.

use std::cell::Cell;

use crate::{symbol::symbol::Symbol, Position};

use super::{
    ast::{Expr, FieldInit, Oper, Var},
    declarations::{Dec, FunDec, TypeDec, VarDec},
    types::{Field, Ty},
};

fn sym(name: &str) -> Symbol {
    Symbol::intern(name)
}

fn typed(type_name: Option<&str>) -> Option<(Symbol, Position)> {
    type_name.map(|name| (sym(name), Position::null()))
}

pub fn simple(name: &str) -> Var {
    Var::Simple(sym(name), Position::null())
}

pub fn field(record: Var, name: &str) -> Var {
    Var::Field(Box::new(record), sym(name), Position::null())
}

pub fn subscript(array: Var, index: Expr) -> Var {
    Var::Subscript(Box::new(array), Box::new(index), Position::null())
}

pub fn var(name: &str) -> Expr {
    Expr::Var(simple(name))
}

pub fn lvalue(var: Var) -> Expr {
    Expr::Var(var)
}

pub fn nil() -> Expr {
    Expr::Nil(Position::null())
}

pub fn int(value: i32) -> Expr {
    Expr::Int(value, Position::null())
}

pub fn string(text: &str) -> Expr {
    Expr::String(text.to_string(), Position::null())
}

pub fn call(function: &str, arguments: Vec<Expr>) -> Expr {
    Expr::Call {
        function: sym(function),
        arguments,
        position: Position::null(),
    }
}

pub fn op(left: Expr, oper: Oper, right: Expr) -> Expr {
    Expr::Op {
        oper,
        left: Box::new(left),
        right: Box::new(right),
        position: Position::null(),
    }
}

pub fn record(type_name: &str, fields: Vec<(&str, Expr)>) -> Expr {
    Expr::Record {
        type_name: sym(type_name),
        fields: fields
            .into_iter()
            .map(|(name, value)| FieldInit {
                name: sym(name),
                value,
                position: Position::null(),
            })
            .collect(),
        position: Position::null(),
    }
}

pub fn seq(exprs: Vec<Expr>) -> Expr {
    Expr::Seq(exprs, Position::null())
}

pub fn assign(var: Var, value: Expr) -> Expr {
    Expr::Assign {
        var,
        value: Box::new(value),
        position: Position::null(),
    }
}

pub fn if_then(test: Expr, then: Expr) -> Expr {
    Expr::If {
        test: Box::new(test),
        then: Box::new(then),
        otherwise: None,
        position: Position::null(),
    }
}

pub fn if_then_else(test: Expr, then: Expr, otherwise: Expr) -> Expr {
    Expr::If {
        test: Box::new(test),
        then: Box::new(then),
        otherwise: Some(Box::new(otherwise)),
        position: Position::null(),
    }
}

pub fn while_loop(test: Expr, body: Expr) -> Expr {
    Expr::While {
        test: Box::new(test),
        body: Box::new(body),
        position: Position::null(),
    }
}

pub fn for_loop(var: &str, lo: Expr, hi: Expr, body: Expr) -> Expr {
    Expr::For {
        var: sym(var),
        escape: Cell::new(true),
        lo: Box::new(lo),
        hi: Box::new(hi),
        body: Box::new(body),
        position: Position::null(),
    }
}

pub fn break_loop() -> Expr {
    Expr::Break(Position::null())
}

pub fn let_in(decs: Vec<Dec>, body: Expr) -> Expr {
    Expr::Let {
        decs,
        body: Box::new(body),
        position: Position::null(),
    }
}

pub fn array(type_name: &str, size: Expr, init: Expr) -> Expr {
    Expr::Array {
        type_name: sym(type_name),
        size: Box::new(size),
        init: Box::new(init),
        position: Position::null(),
    }
}

pub fn var_dec(name: &str, type_name: Option<&str>, init: Expr) -> Dec {
    Dec::Var(VarDec {
        name: sym(name),
        escape: Cell::new(true),
        type_name: typed(type_name),
        init,
        position: Position::null(),
    })
}

pub fn type_dec(name: &str, ty: Ty) -> TypeDec {
    TypeDec {
        name: sym(name),
        ty,
        position: Position::null(),
    }
}

pub fn types(decs: Vec<TypeDec>) -> Dec {
    Dec::Types(decs)
}

pub fn name_ty(name: &str) -> Ty {
    Ty::Name(sym(name), Position::null())
}

pub fn param(name: &str, type_name: &str) -> Field {
    Field {
        name: sym(name),
        escape: Cell::new(true),
        type_name: sym(type_name),
        position: Position::null(),
    }
}

pub fn record_ty(fields: &[(&str, &str)]) -> Ty {
    Ty::Record(
        fields.iter().map(|(name, type_name)| param(name, type_name)).collect(),
        Position::null(),
    )
}

pub fn array_ty(element: &str) -> Ty {
    Ty::Array(sym(element), Position::null())
}

pub fn fun_dec(name: &str, params: &[(&str, &str)], result: Option<&str>, body: Expr) -> FunDec {
    FunDec {
        name: sym(name),
        params: params.iter().map(|(name, type_name)| param(name, type_name)).collect(),
        result: typed(result),
        body,
        position: Position::null(),
    }
}

pub fn functions(decs: Vec<FunDec>) -> Dec {
    Dec::Functions(decs)
}
