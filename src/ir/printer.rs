use std::fmt::{Display, Formatter, Result};

use super::tree::{BinOp, Expr, RelOp, Stmt, Target};

impl Display for BinOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let name = match self {
            BinOp::Plus => "PLUS",
            BinOp::Minus => "MINUS",
            BinOp::Mul => "MUL",
            BinOp::Div => "DIV",
        };
        f.write_str(name)
    }
}

impl Display for RelOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let name = match self {
            RelOp::Eq => "EQ",
            RelOp::Ne => "NE",
            RelOp::Lt => "LT",
            RelOp::Gt => "GT",
            RelOp::Le => "LE",
            RelOp::Ge => "GE",
        };
        f.write_str(name)
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Target::Resolved(label) => write!(f, "{}", label),
            Target::Pending(slot) => write!(f, "?{}", slot.0),
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_stmt(f, self, 0)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_expr(f, self, 0)
    }
}

fn indent(f: &mut Formatter<'_>, depth: usize) -> Result {
    write!(f, "{:width$}", "", width = depth)
}

fn write_stmt(f: &mut Formatter<'_>, stmt: &Stmt, depth: usize) -> Result {
    indent(f, depth)?;
    match stmt {
        Stmt::Seq(first, second) => {
            f.write_str("SEQ(\n")?;
            write_stmt(f, first, depth + 1)?;
            f.write_str(",\n")?;
            write_stmt(f, second, depth + 1)?;
            f.write_str(")")
        }
        Stmt::Label(label) => write!(f, "LABEL {}", label),
        Stmt::Jump(target, _) => {
            f.write_str("JUMP(\n")?;
            write_expr(f, target, depth + 1)?;
            f.write_str(")")
        }
        Stmt::CJump {
            op,
            left,
            right,
            if_true,
            if_false,
        } => {
            writeln!(f, "CJUMP({},", op)?;
            write_expr(f, left, depth + 1)?;
            f.write_str(",\n")?;
            write_expr(f, right, depth + 1)?;
            f.write_str(",\n")?;
            indent(f, depth + 1)?;
            write!(f, "{}, {})", if_true, if_false)
        }
        Stmt::Move(destination, source) => {
            f.write_str("MOVE(\n")?;
            write_expr(f, destination, depth + 1)?;
            f.write_str(",\n")?;
            write_expr(f, source, depth + 1)?;
            f.write_str(")")
        }
        Stmt::Exp(expr) => {
            f.write_str("EXP(\n")?;
            write_expr(f, expr, depth + 1)?;
            f.write_str(")")
        }
    }
}

fn write_expr(f: &mut Formatter<'_>, expr: &Expr, depth: usize) -> Result {
    indent(f, depth)?;
    match expr {
        Expr::BinOp(op, left, right) => {
            writeln!(f, "BINOP({},", op)?;
            write_expr(f, left, depth + 1)?;
            f.write_str(",\n")?;
            write_expr(f, right, depth + 1)?;
            f.write_str(")")
        }
        Expr::Mem(address) => {
            f.write_str("MEM(\n")?;
            write_expr(f, address, depth + 1)?;
            f.write_str(")")
        }
        Expr::Temp(temp) => write!(f, "TEMP {}", temp),
        Expr::ESeq(stmt, expr) => {
            f.write_str("ESEQ(\n")?;
            write_stmt(f, stmt, depth + 1)?;
            f.write_str(",\n")?;
            write_expr(f, expr, depth + 1)?;
            f.write_str(")")
        }
        Expr::Name(label) => write!(f, "NAME {}", label),
        Expr::Const(value) => write!(f, "CONST {}", value),
        Expr::Call(function, arguments) => {
            f.write_str("CALL(\n")?;
            write_expr(f, function, depth + 1)?;
            for argument in arguments {
                f.write_str(",\n")?;
                write_expr(f, argument, depth + 1)?;
            }
            f.write_str(")")
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ir::tree::{BinOp, Expr, RelOp, Stmt, Target},
        temp::temp::{Label, Temp},
    };

    #[test]
    fn test_print_move() {
        let stmt = Stmt::mov(
            Expr::Temp(Temp(100)),
            Expr::binop(BinOp::Plus, Expr::Const(1), Expr::Const(2)),
        );

        assert_eq!(
            stmt.to_string(),
            "MOVE(\n TEMP t100,\n BINOP(PLUS,\n  CONST 1,\n  CONST 2))"
        );
    }

    #[test]
    fn test_print_cjump_and_call() {
        let done = Label::named("done");
        let stmt = Stmt::seq(vec![
            Stmt::cjump(
                RelOp::Lt,
                Expr::Const(0),
                Expr::call(Expr::Name(Label::named("size")), vec![Expr::Const(7)]),
                Target::Resolved(done),
                Target::Resolved(done),
            ),
            Stmt::Label(done),
        ]);

        let printed = stmt.to_string();
        assert!(printed.starts_with("SEQ(\n CJUMP(LT,\n"));
        assert!(printed.contains("CALL(\n   NAME size,\n   CONST 7)"));
        assert!(printed.contains("  done, done)"));
        assert!(printed.ends_with(" LABEL done)"));
    }
}
