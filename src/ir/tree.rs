use crate::temp::temp::{Label, Temp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Plus,
    Minus,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Const(i32),
    Name(Label),
    Temp(Temp),
    BinOp(BinOp, Box<Expr>, Box<Expr>),
    Mem(Box<Expr>),
    Call(Box<Expr>, Vec<Expr>),
    ESeq(Box<Stmt>, Box<Expr>),
}

/// A slot in the translator's patch table, standing in for a jump target
/// that has not been decided yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatchSlot(pub usize);

/// Destination of a conditional jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Resolved(Label),
    Pending(PatchSlot),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Move(Box<Expr>, Box<Expr>),
    Exp(Box<Expr>),
    Jump(Box<Expr>, Vec<Label>),
    CJump {
        op: RelOp,
        left: Box<Expr>,
        right: Box<Expr>,
        if_true: Target,
        if_false: Target,
    },
    Seq(Box<Stmt>, Box<Stmt>),
    Label(Label),
}

impl Expr {
    pub fn binop(op: BinOp, left: Expr, right: Expr) -> Expr {
        Expr::BinOp(op, Box::new(left), Box::new(right))
    }

    pub fn mem(address: Expr) -> Expr {
        Expr::Mem(Box::new(address))
    }

    pub fn call(function: Expr, arguments: Vec<Expr>) -> Expr {
        Expr::Call(Box::new(function), arguments)
    }

    pub fn eseq(stmt: Stmt, expr: Expr) -> Expr {
        Expr::ESeq(Box::new(stmt), Box::new(expr))
    }
}

impl Stmt {
    pub fn mov(destination: Expr, source: Expr) -> Stmt {
        Stmt::Move(Box::new(destination), Box::new(source))
    }

    pub fn exp(expr: Expr) -> Stmt {
        Stmt::Exp(Box::new(expr))
    }

    pub fn jump(label: Label) -> Stmt {
        Stmt::Jump(Box::new(Expr::Name(label)), vec![label])
    }

    pub fn cjump(op: RelOp, left: Expr, right: Expr, if_true: Target, if_false: Target) -> Stmt {
        Stmt::CJump {
            op,
            left: Box::new(left),
            right: Box::new(right),
            if_true,
            if_false,
        }
    }

    /// Right-nested sequence of `stmts`. An empty list is a no-op.
    pub fn seq(stmts: Vec<Stmt>) -> Stmt {
        let mut stmts = stmts.into_iter().rev();
        let Some(last) = stmts.next() else {
            return Stmt::exp(Expr::Const(0));
        };

        stmts.fold(last, |rest, stmt| Stmt::Seq(Box::new(stmt), Box::new(rest)))
    }
}
