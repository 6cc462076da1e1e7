use crate::{
    ir::tree::{BinOp, Expr},
    temp::temp::{Label, Temp, TempFactory},
};

use super::{
    frame::{Frame, FrameAccess},
    x86_frame::X86Frame,
};

fn fp() -> Expr {
    Expr::Temp(TempFactory::FRAME_POINTER)
}

#[test]
fn test_static_link_is_prepended() {
    let mut temps = TempFactory::new();
    let frame = X86Frame::new(Label::named("f"), &[true, false, true], &mut temps);

    let formals = frame.formals();
    assert_eq!(formals.len(), 4);
    assert_eq!(formals[0], FrameAccess::InFrame(-4));
    assert_eq!(formals[1], FrameAccess::InFrame(-8));
    assert!(matches!(formals[2], FrameAccess::InReg(_)));
    assert_eq!(formals[3], FrameAccess::InFrame(-16));
    assert_eq!(frame.name(), Label::named("f"));
}

#[test]
fn test_parameterless_frame_has_static_link() {
    let mut temps = TempFactory::new();
    let frame = X86Frame::new(Label::named("main"), &[], &mut temps);

    assert_eq!(frame.formals(), &[FrameAccess::InFrame(-4)]);
}

#[test]
fn test_locals_count_down_below_formals() {
    let mut temps = TempFactory::new();
    let mut frame = X86Frame::new(Label::named("g"), &[true], &mut temps);

    assert_eq!(frame.alloc_local(true, &mut temps), FrameAccess::InFrame(-12));
    assert_eq!(frame.alloc_local(true, &mut temps), FrameAccess::InFrame(-16));
    assert_eq!(frame.local_count(), 2);

    let first = frame.alloc_local(false, &mut temps);
    let second = frame.alloc_local(false, &mut temps);
    assert!(matches!(first, FrameAccess::InReg(_)));
    assert_ne!(first, second);
    assert_eq!(frame.local_count(), 2);
}

#[test]
fn test_frame_address() {
    let address = X86Frame::frame_address(FrameAccess::InFrame(-8), fp());

    assert_eq!(
        address,
        Expr::binop(BinOp::Plus, fp(), Expr::Const(-8))
    );
    assert_eq!(
        X86Frame::access_expr(FrameAccess::InFrame(-8), fp()),
        Expr::mem(address)
    );
}

#[test]
fn test_register_access_expr_is_temp() {
    let access = FrameAccess::InReg(Temp(120));

    assert_eq!(X86Frame::access_expr(access, fp()), Expr::Temp(Temp(120)));
}

#[test]
#[should_panic(expected = "register access")]
fn test_frame_address_of_register_panics() {
    X86Frame::frame_address(FrameAccess::InReg(Temp(120)), fp());
}

#[test]
fn test_external_call_has_no_static_link() {
    let call = X86Frame::external_call("initRecord", vec![Expr::Const(8)]);

    assert_eq!(
        call,
        Expr::call(Expr::Name(Label::named("initRecord")), vec![Expr::Const(8)])
    );
}
