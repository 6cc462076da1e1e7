use log::{debug, trace};

use crate::{
    frame::frame::{Frame, FrameAccess},
    ir::tree::{BinOp, Expr, PatchSlot, RelOp, Stmt, Target},
    temp::temp::{Label, Temp, TempFactory},
    MK_MEM_OFFSET, MK_SEQ,
};

use super::{
    fragments::{Fragment, FragmentStore},
    level::{Access, Level, LevelId},
};

pub type PatchList = Vec<PatchSlot>;

/// A condition whose jump targets are still open.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    /// Slots to fill with the label to go to when the condition holds.
    pub trues: PatchList,
    /// Slots to fill with the label to go to when it does not.
    pub falses: PatchList,
    pub stmt: Stmt,
}

/// A translated expression in one of its three shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum TrExp {
    /// Computes a value.
    Ex(Expr),
    /// Computes nothing.
    Nx(Stmt),
    /// Jumps to one of two places.
    Cx(Conditional),
}

#[derive(Debug, Default)]
struct PatchTable {
    slots: Vec<Option<Label>>,
}

impl PatchTable {
    fn new_slot(&mut self) -> PatchSlot {
        self.slots.push(None);
        PatchSlot(self.slots.len() - 1)
    }

    fn patch(&mut self, list: &[PatchSlot], label: Label) {
        for slot in list {
            self.slots[slot.0] = Some(label);
        }
    }

    fn target(&self, target: Target) -> Target {
        match target {
            Target::Pending(slot) => match self.slots[slot.0] {
                Some(label) => Target::Resolved(label),
                None => panic!("jump target slot {} was never patched", slot.0),
            },
            resolved => resolved,
        }
    }

    fn seal_stmt(&self, stmt: &mut Stmt) {
        match stmt {
            Stmt::Move(destination, source) => {
                self.seal_expr(destination);
                self.seal_expr(source);
            }
            Stmt::Exp(expr) | Stmt::Jump(expr, _) => self.seal_expr(expr),
            Stmt::CJump {
                left,
                right,
                if_true,
                if_false,
                ..
            } => {
                self.seal_expr(left);
                self.seal_expr(right);
                *if_true = self.target(*if_true);
                *if_false = self.target(*if_false);
            }
            Stmt::Seq(first, second) => {
                self.seal_stmt(first);
                self.seal_stmt(second);
            }
            Stmt::Label(_) => {}
        }
    }

    fn seal_expr(&self, expr: &mut Expr) {
        match expr {
            Expr::BinOp(_, left, right) => {
                self.seal_expr(left);
                self.seal_expr(right);
            }
            Expr::Mem(address) => self.seal_expr(address),
            Expr::Call(function, arguments) => {
                self.seal_expr(function);
                for argument in arguments.iter_mut() {
                    self.seal_expr(argument);
                }
            }
            Expr::ESeq(stmt, expr) => {
                self.seal_stmt(stmt);
                self.seal_expr(expr);
            }
            Expr::Const(_) | Expr::Name(_) | Expr::Temp(_) => {}
        }
    }
}

/// Builds IR for one analysis session.
///
/// Owns the level tree, the temp and label counters, the patch table for
/// pending jump targets and the fragment store.
#[derive(Debug)]
pub struct Translator<F: Frame> {
    levels: Vec<Level<F>>,
    temps: TempFactory,
    patches: PatchTable,
    fragments: FragmentStore<F>,
}

impl<F: Frame> Translator<F> {
    /// Creates a translator whose outermost level is named `entry_label`.
    pub fn new(entry_label: &str) -> Self {
        let mut translator = Translator {
            levels: vec![],
            temps: TempFactory::new(),
            patches: PatchTable::default(),
            fragments: FragmentStore::new(),
        };
        translator.push_level(None, Label::named(entry_label), &[]);
        translator
    }

    fn push_level(&mut self, parent: Option<LevelId>, name: Label, escapes: &[bool]) -> LevelId {
        let id = LevelId(self.levels.len());
        let frame = F::new(name, escapes, &mut self.temps);
        let formals = frame
            .formals()
            .iter()
            .map(|access| Access {
                level: id,
                access: *access,
            })
            .collect();

        self.levels.push(Level {
            parent,
            name,
            frame,
            formals,
        });
        id
    }

    pub fn outermost(&self) -> LevelId {
        LevelId(0)
    }

    pub fn new_level(&mut self, parent: LevelId, name: Label, escapes: &[bool]) -> LevelId {
        self.push_level(Some(parent), name, escapes)
    }

    pub fn level(&self, id: LevelId) -> &Level<F> {
        &self.levels[id.0]
    }

    /// Formals of `level` as accesses, the static link first.
    pub fn formals(&self, level: LevelId) -> &[Access] {
        &self.levels[level.0].formals
    }

    pub fn alloc_local(&mut self, level: LevelId, escape: bool) -> Access {
        let access = self.levels[level.0].frame.alloc_local(escape, &mut self.temps);
        Access { level, access }
    }

    pub fn new_label(&mut self) -> Label {
        self.temps.new_label()
    }

    fn new_temp(&mut self) -> Temp {
        self.temps.new_temp()
    }

    pub fn patch(&mut self, list: &[PatchSlot], label: Label) {
        trace!(target: "translate", "patching {} slot(s) with {}", list.len(), label);
        self.patches.patch(list, label);
    }

    /// Replaces every patched pending target in `stmt` with its label.
    pub fn seal(&self, mut stmt: Stmt) -> Stmt {
        self.patches.seal_stmt(&mut stmt);
        stmt
    }

    pub fn un_ex(&mut self, exp: TrExp) -> Expr {
        match exp {
            TrExp::Ex(expr) => expr,
            TrExp::Nx(stmt) => Expr::eseq(stmt, Expr::Const(0)),
            TrExp::Cx(Conditional { trues, falses, stmt }) => {
                let result = Expr::Temp(self.new_temp());
                let (t, f) = (self.new_label(), self.new_label());
                self.patch(&trues, t);
                self.patch(&falses, f);

                Expr::eseq(
                    MK_SEQ!(
                        Stmt::mov(result.clone(), Expr::Const(1)),
                        stmt,
                        Stmt::Label(f),
                        Stmt::mov(result.clone(), Expr::Const(0)),
                        Stmt::Label(t),
                    ),
                    result,
                )
            }
        }
    }

    pub fn un_nx(&mut self, exp: TrExp) -> Stmt {
        match exp {
            TrExp::Ex(expr) => Stmt::exp(expr),
            TrExp::Nx(stmt) => stmt,
            TrExp::Cx(Conditional { trues, falses, stmt }) => {
                let join = self.new_label();
                self.patch(&trues, join);
                self.patch(&falses, join);
                MK_SEQ!(stmt, Stmt::Label(join))
            }
        }
    }

    /// Panics on `Nx`: a statement without a value is never a condition.
    pub fn un_cx(&mut self, exp: TrExp) -> Conditional {
        match exp {
            TrExp::Ex(expr) => {
                let (t, f) = (self.patches.new_slot(), self.patches.new_slot());
                // Jumps to the false label when the value is zero.
                let stmt = Stmt::cjump(
                    RelOp::Eq,
                    expr,
                    Expr::Const(0),
                    Target::Pending(f),
                    Target::Pending(t),
                );

                Conditional {
                    trues: vec![t],
                    falses: vec![f],
                    stmt,
                }
            }
            TrExp::Nx(stmt) => panic!("statement without a value used as a condition:\n{}", stmt),
            TrExp::Cx(conditional) => conditional,
        }
    }

    /// Frame pointer of `target` as seen from code running in `from`.
    fn frame_pointer_of(&self, target: LevelId, from: LevelId) -> Expr {
        let mut address = Expr::Temp(TempFactory::FRAME_POINTER);
        let mut current = from;

        while current != target {
            let level = &self.levels[current.0];
            address = F::access_expr(level.static_link().access, address);
            current = level
                .parent
                .unwrap_or_else(|| panic!("level {:?} is not enclosed by level {:?}", from, target));
        }

        address
    }

    pub fn simple_var(&self, access: Access, level: LevelId) -> TrExp {
        if let FrameAccess::InReg(temp) = access.access {
            if access.level != level {
                panic!("register variable {} used from a nested function", temp);
            }
        }

        let frame_pointer = self.frame_pointer_of(access.level, level);
        TrExp::Ex(F::access_expr(access.access, frame_pointer))
    }

    pub fn field_var(&mut self, record: TrExp, index: usize) -> TrExp {
        let record = self.un_ex(record);
        TrExp::Ex(MK_MEM_OFFSET!(record, index as i32 * F::WORD_SIZE))
    }

    pub fn subscript_var(&mut self, array: TrExp, index: TrExp) -> TrExp {
        let array = self.un_ex(array);
        let index = self.un_ex(index);
        let offset = Expr::binop(BinOp::Mul, index, Expr::Const(F::WORD_SIZE));
        TrExp::Ex(Expr::mem(Expr::binop(BinOp::Plus, array, offset)))
    }

    pub fn nil_exp(&self) -> TrExp {
        TrExp::Ex(Expr::Const(0))
    }

    pub fn int_exp(&self, value: i32) -> TrExp {
        TrExp::Ex(Expr::Const(value))
    }

    /// Placeholder for an expression that failed to check.
    pub fn error_exp(&self) -> TrExp {
        TrExp::Ex(Expr::Const(0))
    }

    pub fn string_exp(&mut self, text: &str) -> TrExp {
        let label = self.new_label();
        self.fragments.push(Fragment::StringLiteral {
            label,
            text: text.to_string(),
        });
        TrExp::Ex(Expr::Name(label))
    }

    /// Calls the function at `callee`, passing its static link first.
    ///
    /// Functions at the outermost level are runtime procedures and are
    /// called without a static link.
    pub fn call_exp(&mut self, callee: LevelId, label: Label, arguments: Vec<TrExp>, caller: LevelId) -> TrExp {
        let parent = self.levels[callee.0].parent;
        let mut converted = Vec::with_capacity(arguments.len() + 1);

        if let Some(parent) = parent {
            converted.push(self.frame_pointer_of(parent, caller));
        }
        for argument in arguments {
            let argument = self.un_ex(argument);
            converted.push(argument);
        }

        match parent {
            Some(_) => TrExp::Ex(Expr::call(Expr::Name(label), converted)),
            None => TrExp::Ex(F::external_call(&label.to_string(), converted)),
        }
    }

    pub fn arith_op(&mut self, op: BinOp, left: TrExp, right: TrExp) -> TrExp {
        let left = self.un_ex(left);
        let right = self.un_ex(right);
        TrExp::Ex(Expr::binop(op, left, right))
    }

    pub fn rel_op(&mut self, op: RelOp, left: TrExp, right: TrExp) -> TrExp {
        let left = self.un_ex(left);
        let right = self.un_ex(right);
        let (t, f) = (self.patches.new_slot(), self.patches.new_slot());
        let stmt = Stmt::cjump(op, left, right, Target::Pending(t), Target::Pending(f));

        TrExp::Cx(Conditional {
            trues: vec![t],
            falses: vec![f],
            stmt,
        })
    }

    /// String `=` and `<>` through the runtime's `stringEqual`.
    pub fn string_eq(&mut self, op: RelOp, left: TrExp, right: TrExp) -> TrExp {
        let left = self.un_ex(left);
        let right = self.un_ex(right);
        let equal = F::external_call("stringEqual", vec![left, right]);

        match op {
            RelOp::Eq => TrExp::Ex(equal),
            RelOp::Ne => TrExp::Ex(Expr::binop(BinOp::Minus, Expr::Const(1), equal)),
            other => panic!("strings compared with {}", other),
        }
    }

    pub fn record_exp(&mut self, fields: Vec<TrExp>) -> TrExp {
        let record = Expr::Temp(self.new_temp());
        let size = fields.len() as i32 * F::WORD_SIZE;
        let mut stmts = vec![Stmt::mov(
            record.clone(),
            F::external_call("initRecord", vec![Expr::Const(size)]),
        )];

        for (index, field) in fields.into_iter().enumerate() {
            let value = self.un_ex(field);
            stmts.push(Stmt::mov(
                MK_MEM_OFFSET!(record.clone(), index as i32 * F::WORD_SIZE),
                value,
            ));
        }

        TrExp::Ex(Expr::eseq(Stmt::seq(stmts), record))
    }

    pub fn array_exp(&mut self, size: TrExp, init: TrExp) -> TrExp {
        let size = self.un_ex(size);
        let init = self.un_ex(init);
        TrExp::Ex(F::external_call("initArray", vec![size, init]))
    }

    /// Runs `prefix` for effect, then `last`, keeping the shape of `last`.
    fn sequence(&mut self, prefix: Vec<TrExp>, last: TrExp) -> TrExp {
        if prefix.is_empty() {
            return last;
        }

        let stmts: Vec<Stmt> = prefix.into_iter().map(|exp| self.un_nx(exp)).collect();
        let prefix = Stmt::seq(stmts);

        match last {
            TrExp::Nx(stmt) => TrExp::Nx(MK_SEQ!(prefix, stmt)),
            other => {
                let value = self.un_ex(other);
                TrExp::Ex(Expr::eseq(prefix, value))
            }
        }
    }

    pub fn seq_exp(&mut self, mut exps: Vec<TrExp>) -> TrExp {
        match exps.pop() {
            Some(last) => self.sequence(exps, last),
            None => TrExp::Nx(Stmt::seq(vec![])),
        }
    }

    pub fn assign_exp(&mut self, variable: TrExp, value: TrExp) -> TrExp {
        let variable = self.un_ex(variable);
        let value = self.un_ex(value);
        TrExp::Nx(Stmt::mov(variable, value))
    }

    pub fn if_then(&mut self, test: TrExp, then: TrExp) -> TrExp {
        let condition = self.un_cx(test);
        let (t, f) = (self.new_label(), self.new_label());
        self.patch(&condition.trues, t);
        self.patch(&condition.falses, f);
        let then = self.un_nx(then);

        TrExp::Nx(MK_SEQ!(condition.stmt, Stmt::Label(t), then, Stmt::Label(f)))
    }

    /// When `yields_value` both branches store into one temporary, which is
    /// the value of the whole expression.
    pub fn if_then_else(&mut self, test: TrExp, then: TrExp, otherwise: TrExp, yields_value: bool) -> TrExp {
        let condition = self.un_cx(test);
        let (t, f, join) = (self.new_label(), self.new_label(), self.new_label());
        self.patch(&condition.trues, t);
        self.patch(&condition.falses, f);

        if yields_value {
            let result = Expr::Temp(self.new_temp());
            let then = self.un_ex(then);
            let otherwise = self.un_ex(otherwise);

            TrExp::Ex(Expr::eseq(
                MK_SEQ!(
                    condition.stmt,
                    Stmt::Label(t),
                    Stmt::mov(result.clone(), then),
                    Stmt::jump(join),
                    Stmt::Label(f),
                    Stmt::mov(result.clone(), otherwise),
                    Stmt::Label(join),
                ),
                result,
            ))
        } else {
            let then = self.un_nx(then);
            let otherwise = self.un_nx(otherwise);

            TrExp::Nx(MK_SEQ!(
                condition.stmt,
                Stmt::Label(t),
                then,
                Stmt::jump(join),
                Stmt::Label(f),
                otherwise,
                Stmt::Label(join),
            ))
        }
    }

    /// `done` is the label `break` jumps to.
    pub fn while_exp(&mut self, test: TrExp, body: TrExp, done: Label) -> TrExp {
        let (test_label, body_label) = (self.new_label(), self.new_label());
        let condition = self.un_cx(test);
        self.patch(&condition.trues, body_label);
        self.patch(&condition.falses, done);
        let body = self.un_nx(body);

        TrExp::Nx(MK_SEQ!(
            Stmt::Label(test_label),
            condition.stmt,
            Stmt::Label(body_label),
            body,
            Stmt::jump(test_label),
            Stmt::Label(done),
        ))
    }

    /// `variable` is the loop variable. The bound is evaluated once and the
    /// increment only happens while `variable < limit`, so the loop never
    /// steps past the bound.
    pub fn for_exp(&mut self, variable: TrExp, lo: TrExp, hi: TrExp, body: TrExp, done: Label) -> TrExp {
        let variable = self.un_ex(variable);
        let limit = Expr::Temp(self.new_temp());
        let (body_label, increment) = (self.new_label(), self.new_label());
        let lo = self.un_ex(lo);
        let hi = self.un_ex(hi);
        let body = self.un_nx(body);

        TrExp::Nx(MK_SEQ!(
            Stmt::mov(variable.clone(), lo),
            Stmt::mov(limit.clone(), hi),
            Stmt::cjump(
                RelOp::Lt,
                limit.clone(),
                variable.clone(),
                Target::Resolved(done),
                Target::Resolved(body_label),
            ),
            Stmt::Label(body_label),
            body,
            Stmt::cjump(
                RelOp::Lt,
                variable.clone(),
                limit,
                Target::Resolved(increment),
                Target::Resolved(done),
            ),
            Stmt::Label(increment),
            Stmt::mov(
                variable.clone(),
                Expr::binop(BinOp::Plus, variable, Expr::Const(1)),
            ),
            Stmt::jump(body_label),
            Stmt::Label(done),
        ))
    }

    pub fn break_exp(&self, done: Label) -> TrExp {
        TrExp::Nx(Stmt::jump(done))
    }

    /// Variable initialisations in declaration order, then the body.
    pub fn let_exp(&mut self, inits: Vec<TrExp>, body: TrExp) -> TrExp {
        self.sequence(inits, body)
    }

    /// Finishes the body of `level` and stores it as a procedure fragment.
    /// With `returns_value` the body's value goes to the return value slot.
    pub fn proc_entry_exit(&mut self, level: LevelId, body: TrExp, returns_value: bool) {
        let body = if returns_value {
            let value = self.un_ex(body);
            Stmt::mov(F::return_value(Expr::Temp(TempFactory::FRAME_POINTER)), value)
        } else {
            self.un_nx(body)
        };

        let frame = self.levels[level.0].frame.clone();
        let body = self.seal(frame.proc_entry_exit1(body));

        debug!(target: "translate", "finished procedure {}", frame.name());
        self.fragments.push(Fragment::Procedure { frame, body });
    }

    pub fn fragments(&self) -> &FragmentStore<F> {
        &self.fragments
    }

    pub fn into_fragments(self) -> Vec<Fragment<F>> {
        self.fragments.into_fragments()
    }
}
