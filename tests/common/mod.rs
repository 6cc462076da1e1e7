#![allow(dead_code)]

use semant::{
    ast::ast::Expr,
    frame::x86_frame::X86Frame,
    ir::tree::{BinOp, Expr as IrExpr, Stmt},
    temp::temp::TempFactory,
    translate::fragments::Fragment,
    type_checker::{
        options::Options,
        type_checker::{type_check, Analysis},
    },
};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn analyze(program: &Expr) -> Analysis {
    init_logger();
    type_check(program, &Options::default())
}

pub fn error_names(analysis: &Analysis) -> Vec<&str> {
    analysis.errors.iter().map(|error| error.get_error_name()).collect()
}

pub fn procedures(analysis: &Analysis) -> Vec<&Stmt> {
    analysis
        .fragments
        .iter()
        .filter_map(|fragment| match fragment {
            Fragment::Procedure { body, .. } => Some(body),
            Fragment::StringLiteral { .. } => None,
        })
        .collect()
}

pub fn string_literals(fragments: &[Fragment<X86Frame>]) -> Vec<&str> {
    fragments
        .iter()
        .filter_map(|fragment| match fragment {
            Fragment::StringLiteral { text, .. } => Some(text.as_str()),
            Fragment::Procedure { .. } => None,
        })
        .collect()
}

/// Offsets of a chain of `MEM(base + offset)` nodes, outermost first, and
/// whether the chain bottoms out at the frame pointer.
pub fn frame_chain(expr: &IrExpr) -> (Vec<i32>, bool) {
    let mut offsets = vec![];
    let mut current = expr;

    while let IrExpr::Mem(address) = current {
        let IrExpr::BinOp(BinOp::Plus, base, offset) = address.as_ref() else {
            break;
        };
        let IrExpr::Const(offset) = offset.as_ref() else {
            break;
        };
        offsets.push(*offset);
        current = base;
    }

    (offsets, *current == IrExpr::Temp(TempFactory::FRAME_POINTER))
}
