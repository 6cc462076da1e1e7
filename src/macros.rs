//! Utility macros for building IR.
//!
//! - `MK_SEQ!` - Builds a right-nested `Stmt::Seq` from a list of statements
//! - `MK_MEM_OFFSET!` - Builds `MEM(base + offset)`
//!
//! These macros reduce boilerplate in the translator and frame code.

/// Builds a right-nested sequence of IR statements.
///
/// # Example
///
/// ```ignore
/// let stmt = MK_SEQ!(Stmt::Label(test), cond.stmt, Stmt::jump(test));
/// ```
#[macro_export]
macro_rules! MK_SEQ {
    ($($stmt:expr),+ $(,)?) => {
        $crate::ir::tree::Stmt::seq(vec![$($stmt),+])
    };
}

/// Builds a memory access at a constant byte offset from `$base`.
///
/// # Arguments
///
/// * `$base` - The base address expression
/// * `$offset` - The offset in bytes
///
/// # Example
///
/// ```ignore
/// let field = MK_MEM_OFFSET!(record, 2 * WORD_SIZE);
/// ```
#[macro_export]
macro_rules! MK_MEM_OFFSET {
    ($base:expr, $offset:expr) => {
        $crate::ir::tree::Expr::mem($crate::ir::tree::Expr::binop(
            $crate::ir::tree::BinOp::Plus,
            $base,
            $crate::ir::tree::Expr::Const($offset),
        ))
    };
}
