use std::fmt::Debug;

use crate::{
    ir::tree::{BinOp, Expr, Stmt},
    temp::temp::{Label, Temp, TempFactory},
    MK_MEM_OFFSET,
};

/// Where a formal or local lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAccess {
    /// Byte offset from the frame pointer.
    InFrame(i32),
    /// A register that is never addressed through memory.
    InReg(Temp),
}

/// Machine specific activation record layout.
///
/// Implementations decide the offsets of formals and locals; everything
/// that only depends on `FrameAccess` is provided here.
pub trait Frame: Debug + Clone {
    /// Size in bytes of one frame slot. All offsets are multiples of it.
    const WORD_SIZE: i32;

    /// Creates a frame for a procedure whose formals escape as described by
    /// `escapes`. An escaping static link is prepended as formal 0.
    fn new(name: Label, escapes: &[bool], temps: &mut TempFactory) -> Self;

    fn name(&self) -> Label;

    /// The formals as seen from inside the callee, static link first.
    fn formals(&self) -> &[FrameAccess];

    fn alloc_local(&mut self, escape: bool, temps: &mut TempFactory) -> FrameAccess;

    /// `base + offset` for a frame resident access.
    ///
    /// Panics on register accesses, which have no address.
    fn frame_address(access: FrameAccess, base: Expr) -> Expr {
        match access {
            FrameAccess::InFrame(offset) => Expr::binop(BinOp::Plus, base, Expr::Const(offset)),
            FrameAccess::InReg(temp) => {
                panic!("frame_address called on register access {}", temp)
            }
        }
    }

    /// The value stored at `access`, given the frame pointer of the frame
    /// that owns it.
    fn access_expr(access: FrameAccess, base: Expr) -> Expr {
        match access {
            FrameAccess::InFrame(_) => Expr::mem(Self::frame_address(access, base)),
            FrameAccess::InReg(temp) => Expr::Temp(temp),
        }
    }

    /// The return value slot, at offset zero of the frame.
    fn return_value(base: Expr) -> Expr {
        MK_MEM_OFFSET!(base, 0)
    }

    /// A call to a runtime procedure, which takes no static link.
    fn external_call(name: &str, arguments: Vec<Expr>) -> Expr {
        Expr::call(Expr::Name(Label::named(name)), arguments)
    }

    /// Hook for moving incoming arguments and saving callee-save registers.
    fn proc_entry_exit1(&self, body: Stmt) -> Stmt {
        body
    }
}
