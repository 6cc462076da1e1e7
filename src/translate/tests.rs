//! Unit tests for the translate module.
//!
//! Covers static link addressing, the coercions between expression shapes,
//! backpatching and the fragment store.

use crate::{
    frame::{
        frame::{Frame, FrameAccess},
        x86_frame::X86Frame,
    },
    ir::tree::{BinOp, Expr, RelOp, Stmt, Target},
    temp::temp::{Label, TempFactory},
};

use super::{
    fragments::Fragment,
    translate::{Conditional, TrExp, Translator},
};

fn translator() -> Translator<X86Frame> {
    Translator::new("main")
}

fn fp() -> Expr {
    Expr::Temp(TempFactory::FRAME_POINTER)
}

/// Offsets of the `MEM(base + offset)` chain in `expr`, outermost first,
/// together with the innermost base.
fn mem_chain(expr: &Expr) -> (Vec<i32>, &Expr) {
    let mut offsets = vec![];
    let mut current = expr;

    while let Expr::Mem(address) = current {
        match address.as_ref() {
            Expr::BinOp(BinOp::Plus, base, offset) => match offset.as_ref() {
                Expr::Const(offset) => {
                    offsets.push(*offset);
                    current = base;
                }
                _ => break,
            },
            _ => break,
        }
    }

    (offsets, current)
}

fn stmt_has_pending(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Move(destination, source) => expr_has_pending(destination) || expr_has_pending(source),
        Stmt::Exp(expr) | Stmt::Jump(expr, _) => expr_has_pending(expr),
        Stmt::CJump {
            left,
            right,
            if_true,
            if_false,
            ..
        } => {
            matches!(if_true, Target::Pending(_))
                || matches!(if_false, Target::Pending(_))
                || expr_has_pending(left)
                || expr_has_pending(right)
        }
        Stmt::Seq(first, second) => stmt_has_pending(first) || stmt_has_pending(second),
        Stmt::Label(_) => false,
    }
}

fn expr_has_pending(expr: &Expr) -> bool {
    match expr {
        Expr::BinOp(_, left, right) => expr_has_pending(left) || expr_has_pending(right),
        Expr::Mem(address) => expr_has_pending(address),
        Expr::Call(function, arguments) => {
            expr_has_pending(function) || arguments.iter().any(expr_has_pending)
        }
        Expr::ESeq(stmt, expr) => stmt_has_pending(stmt) || expr_has_pending(expr),
        Expr::Const(_) | Expr::Name(_) | Expr::Temp(_) => false,
    }
}

#[test]
fn test_outermost_level_has_static_link() {
    let translator = translator();
    let outermost = translator.outermost();

    assert!(translator.level(outermost).parent.is_none());
    assert_eq!(translator.level(outermost).name, Label::named("main"));
    assert_eq!(translator.formals(outermost).len(), 1);
}

#[test]
fn test_new_level_formals_belong_to_it() {
    let mut translator = translator();
    let outermost = translator.outermost();
    let level = translator.new_level(outermost, Label::named("f"), &[true, false]);

    let formals = translator.formals(level);
    assert_eq!(formals.len(), 3);
    assert!(formals.iter().all(|formal| formal.level == level));
    assert_eq!(formals[0].access, FrameAccess::InFrame(-4));
    assert_eq!(translator.level(level).static_link(), formals[0]);
}

#[test]
fn test_simple_var_in_own_level() {
    let mut translator = translator();
    let outermost = translator.outermost();
    let access = translator.alloc_local(outermost, true);

    let TrExp::Ex(expr) = translator.simple_var(access, outermost) else {
        panic!("variable access should be a value");
    };
    let (offsets, base) = mem_chain(&expr);

    assert_eq!(offsets, vec![-8]);
    assert_eq!(base, &fp());
}

#[test]
fn test_simple_var_follows_static_links() {
    let mut translator = translator();
    let outermost = translator.outermost();
    let outer = translator.new_level(outermost, Label::named("outer"), &[]);
    let access = translator.alloc_local(outer, true);
    let middle = translator.new_level(outer, Label::named("middle"), &[]);
    let inner = translator.new_level(middle, Label::named("inner"), &[]);

    let TrExp::Ex(expr) = translator.simple_var(access, inner) else {
        panic!("variable access should be a value");
    };
    let (offsets, base) = mem_chain(&expr);

    // Two static link hops, then the variable itself.
    assert_eq!(offsets, vec![-8, -4, -4]);
    assert_eq!(base, &fp());
}

#[test]
fn test_register_variable_is_temp() {
    let mut translator = translator();
    let outermost = translator.outermost();
    let access = translator.alloc_local(outermost, false);

    let FrameAccess::InReg(temp) = access.access else {
        panic!("non escaping local should live in a register");
    };
    assert_eq!(translator.simple_var(access, outermost), TrExp::Ex(Expr::Temp(temp)));
}

#[test]
#[should_panic(expected = "used from a nested function")]
fn test_register_variable_from_nested_level_panics() {
    let mut translator = translator();
    let outermost = translator.outermost();
    let access = translator.alloc_local(outermost, false);
    let nested = translator.new_level(outermost, Label::named("nested"), &[]);

    translator.simple_var(access, nested);
}

#[test]
fn test_field_var_offset() {
    let mut translator = translator();
    let record = TrExp::Ex(Expr::Temp(TempFactory::FRAME_POINTER));

    let TrExp::Ex(expr) = translator.field_var(record, 2) else {
        panic!("field access should be a value");
    };
    let (offsets, _) = mem_chain(&expr);

    assert_eq!(offsets, vec![8]);
}

#[test]
fn test_subscript_var_scales_index() {
    let mut translator = translator();
    let array = TrExp::Ex(fp());

    let expr = translator.subscript_var(array, TrExp::Ex(Expr::Const(3)));

    assert_eq!(
        expr,
        TrExp::Ex(Expr::mem(Expr::binop(
            BinOp::Plus,
            fp(),
            Expr::binop(BinOp::Mul, Expr::Const(3), Expr::Const(4)),
        )))
    );
}

#[test]
fn test_un_ex_of_condition_materialises_value() {
    let mut translator = translator();
    let condition = translator.rel_op(RelOp::Lt, TrExp::Ex(Expr::Const(1)), TrExp::Ex(Expr::Const(2)));

    let Expr::ESeq(stmt, result) = translator.un_ex(condition) else {
        panic!("condition as value should be an ESEQ");
    };
    let sealed = translator.seal(*stmt);

    assert!(matches!(*result, Expr::Temp(_)));
    assert!(!stmt_has_pending(&sealed));

    let Stmt::Seq(first, _) = sealed else {
        panic!("expected a sequence");
    };
    assert_eq!(*first, Stmt::mov(*result, Expr::Const(1)));
}

#[test]
fn test_rel_op_true_list_is_true_branch() {
    let mut translator = translator();
    let condition = translator.rel_op(RelOp::Gt, TrExp::Ex(Expr::Const(5)), TrExp::Ex(Expr::Const(2)));

    let TrExp::Cx(Conditional { trues, falses, stmt }) = condition else {
        panic!("comparison should be a condition");
    };
    let (yes, no) = (Label::named("yes"), Label::named("no"));
    translator.patch(&trues, yes);
    translator.patch(&falses, no);

    assert_eq!(
        translator.seal(stmt),
        Stmt::cjump(
            RelOp::Gt,
            Expr::Const(5),
            Expr::Const(2),
            Target::Resolved(yes),
            Target::Resolved(no),
        )
    );
}

#[test]
fn test_un_cx_of_value_compares_with_zero() {
    let mut translator = translator();
    let Conditional { trues, falses, stmt } = translator.un_cx(TrExp::Ex(Expr::Const(7)));
    let (yes, no) = (Label::named("nonzero"), Label::named("zero"));
    translator.patch(&trues, yes);
    translator.patch(&falses, no);

    assert_eq!(
        translator.seal(stmt),
        Stmt::cjump(
            RelOp::Eq,
            Expr::Const(7),
            Expr::Const(0),
            Target::Resolved(no),
            Target::Resolved(yes),
        )
    );
}

#[test]
#[should_panic(expected = "used as a condition")]
fn test_un_cx_of_statement_panics() {
    let mut translator = translator();
    translator.un_cx(TrExp::Nx(Stmt::Label(Label::named("nothing"))));
}

#[test]
fn test_un_nx_of_value_discards_it() {
    let mut translator = translator();

    assert_eq!(
        translator.un_nx(TrExp::Ex(Expr::Const(3))),
        Stmt::exp(Expr::Const(3))
    );
}

#[test]
fn test_un_nx_of_condition_joins_both_lists() {
    let mut translator = translator();
    let condition = translator.rel_op(RelOp::Eq, TrExp::Ex(Expr::Const(1)), TrExp::Ex(Expr::Const(1)));

    let stmt = translator.un_nx(condition);
    let sealed = translator.seal(stmt);

    let Stmt::Seq(jump, join) = sealed else {
        panic!("expected a sequence");
    };
    let Stmt::Label(join) = *join else {
        panic!("expected the join label");
    };
    let Stmt::CJump { if_true, if_false, .. } = *jump else {
        panic!("expected the comparison");
    };
    assert_eq!(if_true, Target::Resolved(join));
    assert_eq!(if_false, Target::Resolved(join));
}

#[test]
#[should_panic(expected = "never patched")]
fn test_unpatched_slot_panics_when_sealed() {
    let mut translator = translator();
    let outermost = translator.outermost();
    let condition = translator.un_cx(TrExp::Ex(Expr::Const(1)));

    translator.proc_entry_exit(outermost, TrExp::Nx(condition.stmt), false);
}

#[test]
fn test_string_equality_uses_runtime() {
    let mut translator = translator();
    let left = translator.string_exp("a");
    let right = translator.string_exp("b");

    let TrExp::Ex(Expr::BinOp(BinOp::Minus, one, call)) = translator.string_eq(RelOp::Ne, left, right) else {
        panic!("inequality should be 1 - stringEqual");
    };
    assert_eq!(*one, Expr::Const(1));
    let Expr::Call(function, arguments) = *call else {
        panic!("expected a call");
    };
    assert_eq!(*function, Expr::Name(Label::named("stringEqual")));
    assert_eq!(arguments.len(), 2);
}

#[test]
fn test_call_passes_static_link_first() {
    let mut translator = translator();
    let outermost = translator.outermost();
    let f = translator.new_level(outermost, Label::named("f"), &[true]);

    let TrExp::Ex(Expr::Call(_, arguments)) =
        translator.call_exp(f, Label::named("f"), vec![TrExp::Ex(Expr::Const(2))], outermost)
    else {
        panic!("expected a call");
    };
    assert_eq!(arguments, vec![fp(), Expr::Const(2)]);

    // A recursive call from inside f passes f's own static link along.
    let TrExp::Ex(Expr::Call(_, arguments)) =
        translator.call_exp(f, Label::named("f"), vec![TrExp::Ex(Expr::Const(3))], f)
    else {
        panic!("expected a call");
    };
    let (offsets, base) = mem_chain(&arguments[0]);
    assert_eq!(offsets, vec![-4]);
    assert_eq!(base, &fp());
}

#[test]
fn test_runtime_call_has_no_static_link() {
    let mut translator = translator();
    let outermost = translator.outermost();
    let argument = translator.string_exp("hello");

    let call = translator.call_exp(outermost, Label::named("print"), vec![argument], outermost);

    let TrExp::Ex(Expr::Call(function, arguments)) = call else {
        panic!("expected a call");
    };
    assert_eq!(*function, Expr::Name(Label::named("print")));
    assert_eq!(arguments.len(), 1);
    assert!(matches!(arguments[0], Expr::Name(_)));
}

#[test]
fn test_record_exp_allocates_and_stores_fields() {
    let mut translator = translator();
    let record = translator.record_exp(vec![TrExp::Ex(Expr::Const(1)), TrExp::Ex(Expr::Const(2))]);

    let TrExp::Ex(Expr::ESeq(stmt, result)) = record else {
        panic!("record should be an ESEQ");
    };
    let Stmt::Seq(allocation, stores) = *stmt else {
        panic!("expected a sequence");
    };
    assert_eq!(
        *allocation,
        Stmt::mov(
            (*result).clone(),
            Expr::call(Expr::Name(Label::named("initRecord")), vec![Expr::Const(8)]),
        )
    );
    assert_eq!(
        *stores,
        Stmt::seq(vec![
            Stmt::mov(Expr::mem(Expr::binop(BinOp::Plus, (*result).clone(), Expr::Const(0))), Expr::Const(1)),
            Stmt::mov(Expr::mem(Expr::binop(BinOp::Plus, (*result).clone(), Expr::Const(4))), Expr::Const(2)),
        ])
    );
}

#[test]
fn test_empty_seq_is_no_op() {
    let mut translator = translator();

    assert_eq!(translator.seq_exp(vec![]), TrExp::Nx(Stmt::exp(Expr::Const(0))));
}

#[test]
fn test_seq_value_is_last_expression() {
    let mut translator = translator();
    let seq = translator.seq_exp(vec![
        TrExp::Nx(Stmt::Label(Label::named("first"))),
        TrExp::Ex(Expr::Const(9)),
    ]);

    assert_eq!(
        seq,
        TrExp::Ex(Expr::eseq(Stmt::Label(Label::named("first")), Expr::Const(9)))
    );
}

#[test]
fn test_while_exits_to_done_label() {
    let mut translator = translator();
    let done = translator.new_label();
    let test = translator.rel_op(RelOp::Lt, TrExp::Ex(Expr::Const(0)), TrExp::Ex(Expr::Const(1)));
    let body = translator.break_exp(done);

    let stmt = translator.while_exp(test, body, done);
    let sealed = translator.seal(translator_stmt(stmt));

    assert!(!stmt_has_pending(&sealed));
    let printed = sealed.to_string();
    assert!(printed.contains(&format!("LABEL {}", done)));
    assert!(printed.contains(&format!("NAME {}", done)));
}

#[test]
fn test_for_loop_guards_increment() {
    let mut translator = translator();
    let outermost = translator.outermost();
    let index = translator.alloc_local(outermost, false);
    let done = translator.new_label();
    let variable = translator.simple_var(index, outermost);

    let stmt = translator.for_exp(
        variable,
        TrExp::Ex(Expr::Const(1)),
        TrExp::Ex(Expr::Const(10)),
        TrExp::Nx(Stmt::exp(Expr::Const(0))),
        done,
    );
    let printed = translator_stmt(stmt).to_string();

    assert_eq!(printed.matches("CJUMP(LT").count(), 2);
    assert!(printed.contains("CONST 10"));
}

#[test]
fn test_if_then_else_value_uses_one_temp() {
    let mut translator = translator();
    let test = translator.rel_op(RelOp::Eq, TrExp::Ex(Expr::Const(1)), TrExp::Ex(Expr::Const(2)));

    let value = translator.if_then_else(test, TrExp::Ex(Expr::Const(3)), TrExp::Ex(Expr::Const(4)), true);

    let TrExp::Ex(Expr::ESeq(stmt, result)) = value else {
        panic!("valued conditional should be an ESEQ");
    };
    let Expr::Temp(result) = *result else {
        panic!("expected a temporary");
    };
    let printed = translator.seal(*stmt).to_string();
    assert_eq!(printed.matches(&format!("TEMP {}", result)).count(), 2);
}

#[test]
fn test_let_runs_inits_before_body() {
    let mut translator = translator();
    let init = TrExp::Nx(Stmt::Label(Label::named("init")));

    let result = translator.let_exp(vec![init], TrExp::Ex(Expr::Const(1)));

    assert_eq!(
        result,
        TrExp::Ex(Expr::eseq(Stmt::Label(Label::named("init")), Expr::Const(1)))
    );
}

#[test]
fn test_proc_entry_exit_stores_result() {
    let mut translator = translator();
    let outermost = translator.outermost();
    let f = translator.new_level(outermost, Label::named("result_of_f"), &[]);

    translator.proc_entry_exit(f, TrExp::Ex(Expr::Const(42)), true);

    let fragments = translator.into_fragments();
    assert_eq!(fragments.len(), 1);
    let Fragment::Procedure { frame, body } = &fragments[0] else {
        panic!("expected a procedure fragment");
    };
    assert_eq!(frame.formals().len(), 1);
    assert_eq!(
        body,
        &Stmt::mov(
            Expr::mem(Expr::binop(BinOp::Plus, fp(), Expr::Const(0))),
            Expr::Const(42),
        )
    );
}

#[test]
fn test_fragments_keep_finishing_order() {
    let mut translator = translator();
    let outermost = translator.outermost();

    translator.string_exp("first");
    let f = translator.new_level(outermost, Label::named("second"), &[]);
    translator.proc_entry_exit(f, TrExp::Nx(Stmt::exp(Expr::Const(0))), false);
    translator.string_exp("third");

    let fragments = translator.fragments().all();
    assert_eq!(fragments.len(), 3);
    assert!(matches!(&fragments[0], Fragment::StringLiteral { text, .. } if text == "first"));
    assert!(fragments[1].is_procedure());
    assert!(matches!(&fragments[2], Fragment::StringLiteral { text, .. } if text == "third"));
}

fn translator_stmt(exp: TrExp) -> Stmt {
    match exp {
        TrExp::Nx(stmt) => stmt,
        other => panic!("expected a statement, got {:?}", other),
    }
}
