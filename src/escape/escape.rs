use std::cell::Cell;

use log::debug;

use crate::{
    ast::{
        ast::{Expr, Var},
        declarations::Dec,
    },
    symbol::{symbol::Symbol, table::ScopedTable},
};

/// Function nesting depth of a declaration and its escape flag. Function
/// names are bound to `None` so that they shadow variables.
type Escape<'a> = Option<(usize, &'a Cell<bool>)>;

/// Sets the escape flag of every variable, parameter and loop variable in
/// `expr`. A binding escapes when a function nested deeper than the one
/// declaring it refers to it.
pub fn find_escapes(expr: &Expr) {
    let mut finder = EscapeFinder {
        env: ScopedTable::new(),
        depth: 0,
    };
    finder.traverse_expr(expr);
}

struct EscapeFinder<'a> {
    env: ScopedTable<Escape<'a>>,
    depth: usize,
}

impl<'a> EscapeFinder<'a> {
    fn declare(&mut self, name: Symbol, escape: &'a Cell<bool>) {
        escape.set(false);
        self.env.bind(name, Some((self.depth, escape)));
    }

    fn traverse_var(&mut self, var: &'a Var) {
        match var {
            Var::Simple(name, _) => {
                if let Some(Some((declared, escape))) = self.env.lookup(*name) {
                    if self.depth > *declared && !escape.get() {
                        debug!(target: "semant", "{} escapes", name);
                        escape.set(true);
                    }
                }
            }
            Var::Field(record, _, _) => self.traverse_var(record),
            Var::Subscript(array, index, _) => {
                self.traverse_var(array);
                self.traverse_expr(index);
            }
        }
    }

    fn traverse_expr(&mut self, expr: &'a Expr) {
        match expr {
            Expr::Var(var) => self.traverse_var(var),
            Expr::Nil(_) | Expr::Int(_, _) | Expr::String(_, _) | Expr::Break(_) => {}
            Expr::Call { arguments, .. } => {
                for argument in arguments {
                    self.traverse_expr(argument);
                }
            }
            Expr::Op { left, right, .. } => {
                self.traverse_expr(left);
                self.traverse_expr(right);
            }
            Expr::Record { fields, .. } => {
                for field in fields {
                    self.traverse_expr(&field.value);
                }
            }
            Expr::Seq(exprs, _) => {
                for expr in exprs {
                    self.traverse_expr(expr);
                }
            }
            Expr::Assign { var, value, .. } => {
                self.traverse_var(var);
                self.traverse_expr(value);
            }
            Expr::If {
                test,
                then,
                otherwise,
                ..
            } => {
                self.traverse_expr(test);
                self.traverse_expr(then);
                if let Some(otherwise) = otherwise {
                    self.traverse_expr(otherwise);
                }
            }
            Expr::While { test, body, .. } => {
                self.traverse_expr(test);
                self.traverse_expr(body);
            }
            Expr::For {
                var,
                escape,
                lo,
                hi,
                body,
                ..
            } => {
                self.traverse_expr(lo);
                self.traverse_expr(hi);

                self.env.begin_scope();
                self.declare(*var, escape);
                self.traverse_expr(body);
                self.env.end_scope();
            }
            Expr::Let { decs, body, .. } => {
                self.env.begin_scope();
                for dec in decs {
                    self.traverse_dec(dec);
                }
                self.traverse_expr(body);
                self.env.end_scope();
            }
            Expr::Array { size, init, .. } => {
                self.traverse_expr(size);
                self.traverse_expr(init);
            }
        }
    }

    fn traverse_dec(&mut self, dec: &'a Dec) {
        match dec {
            Dec::Var(var_dec) => {
                self.traverse_expr(&var_dec.init);
                self.declare(var_dec.name, &var_dec.escape);
            }
            Dec::Types(_) => {}
            Dec::Functions(fun_decs) => {
                for fun_dec in fun_decs {
                    self.env.bind(fun_dec.name, None);
                }

                for fun_dec in fun_decs {
                    self.env.begin_scope();
                    self.depth += 1;

                    for param in &fun_dec.params {
                        self.declare(param.name, &param.escape);
                    }
                    self.traverse_expr(&fun_dec.body);

                    self.depth -= 1;
                    self.env.end_scope();
                }
            }
        }
    }
}
