use crate::{
    symbol::{symbol::Symbol, table::ScopedTable},
    temp::temp::Label,
    translate::level::{Access, LevelId},
    types::types::{TypeArena, TypeId},
};

/// What a name in the value environment stands for.
#[derive(Debug, Clone)]
pub enum Binding {
    Variable {
        ty: TypeId,
        access: Access,
    },
    Function {
        /// The function's own level. Its parent is where it was declared.
        level: LevelId,
        label: Label,
        formals: Vec<TypeId>,
        result: Option<TypeId>,
    },
}

/// Runtime procedures as (name, formals, result).
const RUNTIME_LIBRARY: &[(&str, &[TypeId], Option<TypeId>)] = &[
    ("print", &[TypeArena::STRING], None),
    ("flush", &[], None),
    ("getchar", &[], Some(TypeArena::STRING)),
    ("ord", &[TypeArena::STRING], Some(TypeArena::INT)),
    ("chr", &[TypeArena::INT], Some(TypeArena::STRING)),
    ("size", &[TypeArena::STRING], Some(TypeArena::INT)),
    (
        "substring",
        &[TypeArena::STRING, TypeArena::INT, TypeArena::INT],
        Some(TypeArena::STRING),
    ),
    ("concat", &[TypeArena::STRING, TypeArena::STRING], Some(TypeArena::STRING)),
    ("not", &[TypeArena::INT], Some(TypeArena::INT)),
    ("exit", &[TypeArena::INT], None),
];

/// The value and the type environment, scoped together.
#[derive(Debug, Default)]
pub struct Environment {
    pub values: ScopedTable<Binding>,
    pub types: ScopedTable<TypeId>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: ScopedTable::new(),
            types: ScopedTable::new(),
        }
    }

    /// `int` and `string`, plus the runtime procedures bound at `outermost`
    /// when `with_runtime_library` is set.
    pub fn base(outermost: LevelId, with_runtime_library: bool) -> Self {
        let mut env = Environment::new();
        env.types.bind(Symbol::intern("int"), TypeArena::INT);
        env.types.bind(Symbol::intern("string"), TypeArena::STRING);

        if with_runtime_library {
            for (name, formals, result) in RUNTIME_LIBRARY {
                env.values.bind(
                    Symbol::intern(name),
                    Binding::Function {
                        level: outermost,
                        label: Label::named(name),
                        formals: formals.to_vec(),
                        result: *result,
                    },
                );
            }
        }

        env
    }

    pub fn begin_scope(&mut self) {
        self.values.begin_scope();
        self.types.begin_scope();
    }

    pub fn end_scope(&mut self) {
        self.values.end_scope();
        self.types.end_scope();
    }
}
