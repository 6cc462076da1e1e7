use std::collections::HashSet;

use log::debug;

use crate::{
    ast::{
        ast::{Expr, FieldInit, Oper, Var},
        declarations::{Dec, FunDec, TypeDec, VarDec},
        types::Ty,
    },
    errors::errors::{DiagnosticSink, Error, ErrorImpl},
    escape::escape::find_escapes,
    frame::{frame::Frame, x86_frame::X86Frame},
    ir::tree::{BinOp, RelOp},
    symbol::symbol::Symbol,
    temp::temp::Label,
    translate::{
        fragments::Fragment,
        level::LevelId,
        translate::{TrExp, Translator},
    },
    types::types::{TypeArena, TypeError, TypeId},
    Position,
};

use super::{
    env::{Binding, Environment},
    options::Options,
};

/// A checked expression: its translation and its actual type.
#[derive(Debug)]
pub struct ExpTy {
    pub exp: TrExp,
    pub ty: TypeId,
}

/// Result of analysing one program.
#[derive(Debug)]
pub struct Analysis<F: Frame = X86Frame> {
    /// String literals and procedures in the order they were finished. The
    /// program body is always the last procedure.
    pub fragments: Vec<Fragment<F>>,
    pub errors: Vec<Error>,
    pub program_type: TypeId,
    /// The arena `program_type` and every other `TypeId` point into.
    pub types: TypeArena,
}

impl<F: Frame> Analysis<F> {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn program_type_name(&self) -> String {
        self.types.describe(self.program_type)
    }
}

/// Finds escaping variables, then checks and translates `program`.
pub fn type_check(program: &Expr, options: &Options) -> Analysis<X86Frame> {
    type_check_with_frame::<X86Frame>(program, options)
}

pub fn type_check_with_frame<F: Frame>(program: &Expr, options: &Options) -> Analysis<F> {
    find_escapes(program);

    let mut errors = vec![];
    let checker = TypeChecker::<F>::new(options, &mut errors);
    let (fragments, program_type, types) = checker.check_program(program);

    Analysis {
        fragments,
        errors,
        program_type,
        types,
    }
}

/// One analysis session.
///
/// Owns the type arena, both environments and the translator. Diagnostics
/// go to the sink; after an error the checker substitutes `int` (or `void`
/// for statement-like constructs) and carries on.
pub struct TypeChecker<'a, F: Frame = X86Frame> {
    types: TypeArena,
    env: Environment,
    translator: Translator<F>,
    /// Exit labels of the enclosing loops, innermost last.
    loop_exits: Vec<Label>,
    diagnostics: &'a mut dyn DiagnosticSink,
}

impl<'a, F: Frame> TypeChecker<'a, F> {
    pub fn new(options: &Options, diagnostics: &'a mut dyn DiagnosticSink) -> Self {
        let translator = Translator::new(&options.entry_label);
        let env = Environment::base(translator.outermost(), options.with_runtime_library);

        TypeChecker {
            types: TypeArena::new(),
            env,
            translator,
            loop_exits: vec![],
            diagnostics,
        }
    }

    /// Checks `program` as the body of the outermost level and returns the
    /// fragments, the program's type and the arena describing it.
    pub fn check_program(mut self, program: &Expr) -> (Vec<Fragment<F>>, TypeId, TypeArena) {
        let main = self.translator.outermost();
        let body = self.check_expr(program, main);

        self.translator.proc_entry_exit(main, body.exp, body.ty != TypeArena::VOID);
        debug!(
            target: "semant",
            "program checked with {} fragment(s)",
            self.translator.fragments().len()
        );

        (self.translator.into_fragments(), body.ty, self.types)
    }

    fn report(&mut self, error: ErrorImpl, position: &Position) {
        debug!(target: "semant", "{}: {}", position, error);
        self.diagnostics.report_error(Error::new(error, position.clone()));
    }

    /// Actual type of `ty`. Broken aliases have already been reported where
    /// they were declared and count as `int` from then on.
    fn actual(&self, ty: TypeId) -> TypeId {
        self.types.resolve(ty).unwrap_or(TypeArena::INT)
    }

    fn describe(&self, ty: TypeId) -> String {
        self.types.describe(ty)
    }

    fn lookup_type(&mut self, name: Symbol, position: &Position) -> TypeId {
        match self.env.types.lookup(name) {
            Some(ty) => *ty,
            None => {
                self.report(
                    ErrorImpl::UnknownType {
                        type_: name.to_string(),
                    },
                    position,
                );
                TypeArena::INT
            }
        }
    }

    fn expect_int(&mut self, checked: &ExpTy, position: &Position) {
        if checked.ty != TypeArena::INT {
            self.report(
                ErrorImpl::IntegerRequired {
                    received: self.describe(checked.ty),
                },
                position,
            );
        }
    }

    /// Test of an `if`, `while`, `&` or `|`. A test that is not `int` has
    /// already been reported and branches on a constant instead.
    fn condition(&self, checked: ExpTy) -> TrExp {
        if checked.ty == TypeArena::INT {
            checked.exp
        } else {
            self.translator.error_exp()
        }
    }

    fn error_result(&self) -> ExpTy {
        ExpTy {
            exp: self.translator.error_exp(),
            ty: TypeArena::INT,
        }
    }

    pub fn check_var(&mut self, var: &Var, level: LevelId) -> ExpTy {
        match var {
            Var::Simple(name, position) => match self.env.values.lookup(*name) {
                Some(Binding::Variable { ty, access }) => {
                    let (ty, access) = (*ty, *access);
                    ExpTy {
                        exp: self.translator.simple_var(access, level),
                        ty: self.actual(ty),
                    }
                }
                _ => {
                    self.report(
                        ErrorImpl::UndefinedVariable {
                            variable: name.to_string(),
                        },
                        position,
                    );
                    self.error_result()
                }
            },
            Var::Field(record, name, position) => {
                let record = self.check_var(record, level);
                let field = self.types.record_fields(record.ty).map(|fields| {
                    fields
                        .iter()
                        .position(|(field, _)| field == name)
                        .map(|index| (index, fields[index].1))
                });

                match field {
                    Some(Some((index, ty))) => ExpTy {
                        exp: self.translator.field_var(record.exp, index),
                        ty: self.actual(ty),
                    },
                    Some(None) => {
                        self.report(
                            ErrorImpl::UnknownField {
                                field: name.to_string(),
                            },
                            position,
                        );
                        self.error_result()
                    }
                    None => {
                        self.report(
                            ErrorImpl::NotARecord {
                                type_: self.describe(record.ty),
                            },
                            position,
                        );
                        self.error_result()
                    }
                }
            }
            Var::Subscript(array, index, position) => {
                let array = self.check_var(array, level);
                let checked_index = self.check_expr(index, level);
                self.expect_int(&checked_index, index.position());

                match self.types.array_element(array.ty) {
                    Some(element) => ExpTy {
                        exp: self.translator.subscript_var(array.exp, checked_index.exp),
                        ty: self.actual(element),
                    },
                    None => {
                        self.report(
                            ErrorImpl::NotAnArray {
                                type_: self.describe(array.ty),
                            },
                            position,
                        );
                        self.error_result()
                    }
                }
            }
        }
    }

    pub fn check_expr(&mut self, expr: &Expr, level: LevelId) -> ExpTy {
        match expr {
            Expr::Var(var) => self.check_var(var, level),
            Expr::Nil(_) => ExpTy {
                exp: self.translator.nil_exp(),
                ty: TypeArena::NIL,
            },
            Expr::Int(value, _) => ExpTy {
                exp: self.translator.int_exp(*value),
                ty: TypeArena::INT,
            },
            Expr::String(text, _) => ExpTy {
                exp: self.translator.string_exp(text),
                ty: TypeArena::STRING,
            },
            Expr::Call {
                function,
                arguments,
                position,
            } => self.check_call(*function, arguments, position, level),
            Expr::Op {
                oper,
                left,
                right,
                position,
            } => self.check_op(*oper, left, right, position, level),
            Expr::Record {
                type_name,
                fields,
                position,
            } => self.check_record(*type_name, fields, position, level),
            Expr::Seq(exprs, _) => {
                let mut ty = TypeArena::VOID;
                let mut exps = Vec::with_capacity(exprs.len());

                for expr in exprs {
                    let checked = self.check_expr(expr, level);
                    ty = checked.ty;
                    exps.push(checked.exp);
                }

                ExpTy {
                    exp: self.translator.seq_exp(exps),
                    ty,
                }
            }
            Expr::Assign { var, value, .. } => {
                let target = self.check_var(var, level);
                let checked = self.check_expr(value, level);

                if !self.types.is_compatible(target.ty, checked.ty) {
                    self.report(
                        ErrorImpl::TypeMatchError {
                            expected: self.describe(target.ty),
                            received: self.describe(checked.ty),
                        },
                        value.position(),
                    );
                }

                ExpTy {
                    exp: self.translator.assign_exp(target.exp, checked.exp),
                    ty: TypeArena::VOID,
                }
            }
            Expr::If {
                test,
                then,
                otherwise,
                ..
            } => self.check_if(test, then, otherwise.as_deref(), level),
            Expr::While { test, body, .. } => {
                let checked_test = self.check_expr(test, level);
                self.expect_int(&checked_test, test.position());
                let test_exp = self.condition(checked_test);

                let done = self.translator.new_label();
                let checked_body = self.check_loop_body(body, done, level);

                ExpTy {
                    exp: self.translator.while_exp(test_exp, checked_body.exp, done),
                    ty: TypeArena::VOID,
                }
            }
            Expr::For {
                var,
                escape,
                lo,
                hi,
                body,
                ..
            } => {
                let checked_lo = self.check_expr(lo, level);
                self.expect_int(&checked_lo, lo.position());
                let checked_hi = self.check_expr(hi, level);
                self.expect_int(&checked_hi, hi.position());

                self.env.begin_scope();
                let access = self.translator.alloc_local(level, escape.get());
                self.env.values.bind(
                    *var,
                    Binding::Variable {
                        ty: TypeArena::INT,
                        access,
                    },
                );

                let done = self.translator.new_label();
                let checked_body = self.check_loop_body(body, done, level);
                self.env.end_scope();

                let variable = self.translator.simple_var(access, level);
                ExpTy {
                    exp: self.translator.for_exp(
                        variable,
                        checked_lo.exp,
                        checked_hi.exp,
                        checked_body.exp,
                        done,
                    ),
                    ty: TypeArena::VOID,
                }
            }
            Expr::Break(position) => match self.loop_exits.last() {
                Some(done) => ExpTy {
                    exp: self.translator.break_exp(*done),
                    ty: TypeArena::VOID,
                },
                None => {
                    self.report(ErrorImpl::BreakOutsideLoop, position);
                    ExpTy {
                        exp: self.translator.error_exp(),
                        ty: TypeArena::VOID,
                    }
                }
            },
            Expr::Let { decs, body, .. } => {
                self.env.begin_scope();

                let mut inits = vec![];
                for dec in decs {
                    if let Some(init) = self.check_dec(dec, level) {
                        inits.push(init);
                    }
                }
                let checked_body = self.check_expr(body, level);

                self.env.end_scope();

                ExpTy {
                    exp: self.translator.let_exp(inits, checked_body.exp),
                    ty: checked_body.ty,
                }
            }
            Expr::Array {
                type_name,
                size,
                init,
                position,
            } => {
                let declared = self.lookup_type(*type_name, position);
                let ty = self.actual(declared);

                let checked_size = self.check_expr(size, level);
                self.expect_int(&checked_size, size.position());
                let checked_init = self.check_expr(init, level);

                let Some(element) = self.types.array_element(ty) else {
                    self.report(
                        ErrorImpl::NotAnArray {
                            type_: self.describe(declared),
                        },
                        position,
                    );
                    return self.error_result();
                };

                let element = self.actual(element);
                if !self.types.is_compatible(element, checked_init.ty) {
                    self.report(
                        ErrorImpl::TypeMatchError {
                            expected: self.describe(element),
                            received: self.describe(checked_init.ty),
                        },
                        init.position(),
                    );
                }

                ExpTy {
                    exp: self.translator.array_exp(checked_size.exp, checked_init.exp),
                    ty,
                }
            }
        }
    }

    fn check_loop_body(&mut self, body: &Expr, done: Label, level: LevelId) -> ExpTy {
        self.loop_exits.push(done);
        let checked = self.check_expr(body, level);
        self.loop_exits.pop();

        if checked.ty != TypeArena::VOID {
            self.report(
                ErrorImpl::LoopBodyReturnsValue {
                    received: self.describe(checked.ty),
                },
                body.position(),
            );
        }

        checked
    }

    fn check_call(&mut self, function: Symbol, arguments: &[Expr], position: &Position, level: LevelId) -> ExpTy {
        let Some(Binding::Function {
            level: callee,
            label,
            formals,
            result,
        }) = self.env.values.lookup(function).cloned()
        else {
            self.report(
                ErrorImpl::UndefinedFunction {
                    function: function.to_string(),
                },
                position,
            );
            for argument in arguments {
                self.check_expr(argument, level);
            }
            return self.error_result();
        };

        let mut well_typed = true;
        let mut exps = Vec::with_capacity(arguments.len());

        for (index, argument) in arguments.iter().enumerate() {
            let checked = self.check_expr(argument, level);

            if let Some(&formal) = formals.get(index) {
                let expected = self.actual(formal);
                if !self.types.is_compatible(expected, checked.ty) {
                    self.report(
                        ErrorImpl::ArgumentTypeMatchError {
                            expected: self.describe(formal),
                            received: self.describe(checked.ty),
                        },
                        argument.position(),
                    );
                    well_typed = false;
                }
            }
            exps.push(checked.exp);
        }

        if arguments.len() > formals.len() {
            self.report(
                ErrorImpl::UnexpectedArguments {
                    expected: formals.len(),
                    received: arguments.len(),
                },
                position,
            );
            well_typed = false;
        } else if arguments.len() < formals.len() {
            self.report(
                ErrorImpl::MissingArguments {
                    expected: formals.len(),
                    received: arguments.len(),
                },
                position,
            );
            well_typed = false;
        }

        let ty = match result {
            Some(result) => self.actual(result),
            None => TypeArena::VOID,
        };
        let exp = if well_typed {
            self.translator.call_exp(callee, label, exps, level)
        } else {
            self.translator.error_exp()
        };

        ExpTy { exp, ty }
    }

    fn check_op(&mut self, oper: Oper, left: &Expr, right: &Expr, position: &Position, level: LevelId) -> ExpTy {
        let checked_left = self.check_expr(left, level);
        let checked_right = self.check_expr(right, level);

        if oper.is_equality() {
            let (l, r) = (checked_left.ty, checked_right.ty);
            let comparable = (self.types.is_compatible(l, r) || self.types.is_compatible(r, l))
                && l != TypeArena::VOID
                && !(l == TypeArena::NIL && r == TypeArena::NIL);

            if !comparable {
                self.report(
                    ErrorImpl::TypeMatchError {
                        expected: self.describe(l),
                        received: self.describe(r),
                    },
                    position,
                );
                return self.error_result();
            }

            let op = if oper == Oper::Eq { RelOp::Eq } else { RelOp::Ne };
            let exp = if l == TypeArena::STRING {
                self.translator.string_eq(op, checked_left.exp, checked_right.exp)
            } else {
                self.translator.rel_op(op, checked_left.exp, checked_right.exp)
            };

            return ExpTy {
                exp,
                ty: TypeArena::INT,
            };
        }

        self.expect_int(&checked_left, left.position());
        self.expect_int(&checked_right, right.position());

        let exp = match oper {
            Oper::Plus => self.translator.arith_op(BinOp::Plus, checked_left.exp, checked_right.exp),
            Oper::Minus => self.translator.arith_op(BinOp::Minus, checked_left.exp, checked_right.exp),
            Oper::Times => self.translator.arith_op(BinOp::Mul, checked_left.exp, checked_right.exp),
            Oper::Divide => self.translator.arith_op(BinOp::Div, checked_left.exp, checked_right.exp),
            Oper::Lt => self.translator.rel_op(RelOp::Lt, checked_left.exp, checked_right.exp),
            Oper::Le => self.translator.rel_op(RelOp::Le, checked_left.exp, checked_right.exp),
            Oper::Gt => self.translator.rel_op(RelOp::Gt, checked_left.exp, checked_right.exp),
            Oper::Ge => self.translator.rel_op(RelOp::Ge, checked_left.exp, checked_right.exp),
            // a & b is `if a then b else 0`, a | b is `if a then 1 else b`.
            Oper::And => {
                let test = self.condition(checked_left);
                let zero = self.translator.int_exp(0);
                self.translator.if_then_else(test, checked_right.exp, zero, true)
            }
            Oper::Or => {
                let test = self.condition(checked_left);
                let one = self.translator.int_exp(1);
                self.translator.if_then_else(test, one, checked_right.exp, true)
            }
            Oper::Eq | Oper::Neq => unreachable!("equality handled above"),
        };

        ExpTy {
            exp,
            ty: TypeArena::INT,
        }
    }

    fn check_record(&mut self, type_name: Symbol, fields: &[FieldInit], position: &Position, level: LevelId) -> ExpTy {
        let declared = self.lookup_type(type_name, position);
        let ty = self.actual(declared);

        let Some(declared_fields) = self.types.record_fields(ty).map(<[_]>::to_vec) else {
            self.report(
                ErrorImpl::NotARecord {
                    type_: self.describe(declared),
                },
                position,
            );
            for field in fields {
                self.check_expr(&field.value, level);
            }
            return self.error_result();
        };

        if fields.len() != declared_fields.len() {
            self.report(
                ErrorImpl::FieldCountMismatch {
                    expected: declared_fields.len(),
                    received: fields.len(),
                },
                position,
            );
        }

        let mut exps = Vec::with_capacity(fields.len());
        for (index, field) in fields.iter().enumerate() {
            let checked = self.check_expr(&field.value, level);

            if let Some(&(name, field_ty)) = declared_fields.get(index) {
                let expected = self.actual(field_ty);
                if name != field.name {
                    self.report(
                        ErrorImpl::FieldNameMismatch {
                            expected: name.to_string(),
                            received: field.name.to_string(),
                        },
                        &field.position,
                    );
                } else if !self.types.is_compatible(expected, checked.ty) {
                    self.report(
                        ErrorImpl::FieldTypeMatchError {
                            expected: self.describe(field_ty),
                            received: self.describe(checked.ty),
                        },
                        field.value.position(),
                    );
                }
            }
            exps.push(checked.exp);
        }

        ExpTy {
            exp: self.translator.record_exp(exps),
            ty,
        }
    }

    fn check_if(&mut self, test: &Expr, then: &Expr, otherwise: Option<&Expr>, level: LevelId) -> ExpTy {
        let checked_test = self.check_expr(test, level);
        self.expect_int(&checked_test, test.position());
        let test_exp = self.condition(checked_test);
        let checked_then = self.check_expr(then, level);

        let Some(otherwise) = otherwise else {
            if checked_then.ty != TypeArena::VOID {
                self.report(
                    ErrorImpl::IfThenReturnsValue {
                        received: self.describe(checked_then.ty),
                    },
                    then.position(),
                );
            }

            return ExpTy {
                exp: self.translator.if_then(test_exp, checked_then.exp),
                ty: TypeArena::VOID,
            };
        };

        let checked_else = self.check_expr(otherwise, level);
        let (then_ty, else_ty) = (checked_then.ty, checked_else.ty);

        let ty = if self.types.is_compatible(then_ty, else_ty) {
            then_ty
        } else if self.types.is_compatible(else_ty, then_ty) {
            else_ty
        } else {
            self.report(
                ErrorImpl::BranchTypeMismatch {
                    then_type: self.describe(then_ty),
                    else_type: self.describe(else_ty),
                },
                otherwise.position(),
            );
            TypeArena::VOID
        };

        ExpTy {
            exp: self.translator.if_then_else(
                test_exp,
                checked_then.exp,
                checked_else.exp,
                ty != TypeArena::VOID,
            ),
            ty,
        }
    }

    /// Adds the declaration to the current scope. Variable declarations
    /// return their initialisation.
    pub fn check_dec(&mut self, dec: &Dec, level: LevelId) -> Option<TrExp> {
        match dec {
            Dec::Var(var_dec) => Some(self.check_var_dec(var_dec, level)),
            Dec::Types(type_decs) => {
                self.check_type_decs(type_decs);
                None
            }
            Dec::Functions(fun_decs) => {
                self.check_fun_decs(fun_decs, level);
                None
            }
        }
    }

    fn check_var_dec(&mut self, var_dec: &VarDec, level: LevelId) -> TrExp {
        let init = self.check_expr(&var_dec.init, level);

        let ty = match &var_dec.type_name {
            Some((type_name, position)) => {
                let declared = self.lookup_type(*type_name, position);
                let expected = self.actual(declared);

                if !self.types.is_compatible(expected, init.ty) {
                    self.report(
                        ErrorImpl::TypeMatchError {
                            expected: self.describe(declared),
                            received: self.describe(init.ty),
                        },
                        var_dec.init.position(),
                    );
                }
                expected
            }
            None => {
                if init.ty == TypeArena::NIL {
                    self.report(ErrorImpl::UntypedNil, &var_dec.position);
                }
                init.ty
            }
        };

        let access = self.translator.alloc_local(level, var_dec.escape.get());
        self.env.values.bind(var_dec.name, Binding::Variable { ty, access });

        let variable = self.translator.simple_var(access, level);
        self.translator.assign_exp(variable, init.exp)
    }

    fn report_duplicates<'d>(&mut self, names: impl Iterator<Item = (Symbol, &'d Position)>) {
        let mut seen = HashSet::new();

        for (name, position) in names {
            if !seen.insert(name) {
                self.report(
                    ErrorImpl::DuplicateDeclaration {
                        name: name.to_string(),
                    },
                    position,
                );
            }
        }
    }

    fn check_type_decs(&mut self, type_decs: &[TypeDec]) {
        self.report_duplicates(type_decs.iter().map(|dec| (dec.name, &dec.position)));

        // Every name of the group is visible before any right hand side is
        // looked at.
        let headers: Vec<TypeId> = type_decs
            .iter()
            .map(|dec| {
                let id = self.types.name(dec.name);
                self.env.types.bind(dec.name, id);
                id
            })
            .collect();

        for (dec, id) in type_decs.iter().zip(&headers) {
            let target = self.check_ty(&dec.ty);
            self.types.set_name(*id, target);
        }

        for (dec, id) in type_decs.iter().zip(&headers) {
            if let Err(TypeError::Cyclic { .. }) = self.types.resolve(*id) {
                self.report(
                    ErrorImpl::CyclicType {
                        type_: dec.name.to_string(),
                    },
                    &dec.position,
                );
                break;
            }
        }
    }

    /// Type denoted by `ty`. Names are left unresolved.
    pub fn check_ty(&mut self, ty: &Ty) -> TypeId {
        match ty {
            Ty::Name(name, position) => self.lookup_type(*name, position),
            Ty::Record(fields, _) => {
                self.report_duplicates(fields.iter().map(|field| (field.name, &field.position)));

                let fields = fields
                    .iter()
                    .map(|field| (field.name, self.lookup_type(field.type_name, &field.position)))
                    .collect();
                self.types.record(fields)
            }
            Ty::Array(element, position) => {
                let element = self.lookup_type(*element, position);
                self.types.array(element)
            }
        }
    }

    fn check_fun_decs(&mut self, fun_decs: &[FunDec], level: LevelId) {
        self.report_duplicates(fun_decs.iter().map(|dec| (dec.name, &dec.position)));

        let mut headers = Vec::with_capacity(fun_decs.len());
        for dec in fun_decs {
            let formals: Vec<TypeId> = dec
                .params
                .iter()
                .map(|param| self.lookup_type(param.type_name, &param.position))
                .collect();
            let result = dec
                .result
                .as_ref()
                .map(|(result, position)| self.lookup_type(*result, position));
            let escapes: Vec<bool> = dec.params.iter().map(|param| param.escape.get()).collect();

            let label = self.translator.new_label();
            let fun_level = self.translator.new_level(level, label, &escapes);
            debug!(target: "semant", "new level for {} labelled {}", dec.name, label);

            self.env.values.bind(
                dec.name,
                Binding::Function {
                    level: fun_level,
                    label,
                    formals: formals.clone(),
                    result,
                },
            );
            headers.push((fun_level, formals, result));
        }

        for (dec, (fun_level, formals, result)) in fun_decs.iter().zip(headers) {
            self.check_fun_body(dec, fun_level, &formals, result);
        }
    }

    fn check_fun_body(&mut self, dec: &FunDec, fun_level: LevelId, formals: &[TypeId], result: Option<TypeId>) {
        self.env.begin_scope();

        // Formal 0 is the static link.
        let accesses = self.translator.formals(fun_level)[1..].to_vec();
        for ((param, ty), access) in dec.params.iter().zip(formals).zip(accesses) {
            self.env.values.bind(param.name, Binding::Variable { ty: *ty, access });
        }

        let enclosing_loops = std::mem::take(&mut self.loop_exits);
        let body = self.check_expr(&dec.body, fun_level);
        self.loop_exits = enclosing_loops;

        self.env.end_scope();

        match result {
            Some(result) => {
                if !self.types.is_compatible(self.actual(result), body.ty) {
                    self.report(
                        ErrorImpl::ReturnTypeMismatch {
                            function: dec.name.to_string(),
                            expected: self.describe(result),
                            received: self.describe(body.ty),
                        },
                        dec.body.position(),
                    );
                }
            }
            None => {
                if body.ty != TypeArena::VOID {
                    self.report(
                        ErrorImpl::ProcedureReturnsValue {
                            function: dec.name.to_string(),
                            received: self.describe(body.ty),
                        },
                        dec.body.position(),
                    );
                }
            }
        }

        self.translator.proc_entry_exit(fun_level, body.exp, result.is_some());
    }
}
