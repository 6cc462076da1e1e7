use std::collections::HashSet;

use thiserror::Error;

use crate::symbol::symbol::Symbol;

/// Index of a type node in a `TypeArena`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(usize);

/// A type node.
///
/// Records and arrays are nominal: two of them are the same type only if
/// they are the same node. `Name` is an alias created by a type
/// declaration whose target is filled in exactly once.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Int,
    String,
    Nil,
    Void,
    Record(Vec<(Symbol, TypeId)>),
    Array(TypeId),
    Name(Symbol, Option<TypeId>),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypeError {
    #[error("type {name} is an alias of itself")]
    Cyclic { name: Symbol },
    #[error("type {name} has not been resolved yet")]
    Unresolved { name: Symbol },
}

#[derive(Debug, Clone)]
pub struct TypeArena {
    types: Vec<Type>,
}

impl TypeArena {
    pub const INT: TypeId = TypeId(0);
    pub const STRING: TypeId = TypeId(1);
    pub const NIL: TypeId = TypeId(2);
    pub const VOID: TypeId = TypeId(3);

    pub fn new() -> Self {
        TypeArena {
            types: vec![Type::Int, Type::String, Type::Nil, Type::Void],
        }
    }

    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.0]
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn alloc(&mut self, ty: Type) -> TypeId {
        self.types.push(ty);
        TypeId(self.types.len() - 1)
    }

    pub fn record(&mut self, fields: Vec<(Symbol, TypeId)>) -> TypeId {
        self.alloc(Type::Record(fields))
    }

    pub fn array(&mut self, element: TypeId) -> TypeId {
        self.alloc(Type::Array(element))
    }

    /// Creates an unresolved alias, to be completed with `set_name`.
    pub fn name(&mut self, name: Symbol) -> TypeId {
        self.alloc(Type::Name(name, None))
    }

    /// Fills in the target of an alias created by `name`.
    ///
    /// Panics if `id` is not an alias or has already been filled in.
    pub fn set_name(&mut self, id: TypeId, target: TypeId) {
        match &mut self.types[id.0] {
            Type::Name(name, slot) => {
                if slot.is_some() {
                    panic!("type name `{}` resolved twice", name);
                }
                *slot = Some(target);
            }
            other => panic!("set_name called on non-name type {:?}", other),
        }
    }

    /// Follows `Name` links to the first non-alias type.
    pub fn resolve(&self, id: TypeId) -> Result<TypeId, TypeError> {
        let mut visited = HashSet::new();
        let mut current = id;

        loop {
            match &self.types[current.0] {
                Type::Name(name, target) => {
                    if !visited.insert(current) {
                        return Err(TypeError::Cyclic { name: *name });
                    }
                    match target {
                        Some(next) => current = *next,
                        None => return Err(TypeError::Unresolved { name: *name }),
                    }
                }
                _ => return Ok(current),
            }
        }
    }

    /// Equivalence of two resolved types.
    pub fn is_equivalent(&self, left: TypeId, right: TypeId) -> bool {
        left == right
    }

    /// Whether a value of resolved type `actual` may be used where resolved
    /// type `expected` is required. `nil` fits any record type.
    pub fn is_compatible(&self, expected: TypeId, actual: TypeId) -> bool {
        if self.is_equivalent(expected, actual) {
            return true;
        }

        actual == Self::NIL && matches!(self.get(expected), Type::Record(_))
    }

    pub fn record_fields(&self, id: TypeId) -> Option<&[(Symbol, TypeId)]> {
        match self.get(id) {
            Type::Record(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn array_element(&self, id: TypeId) -> Option<TypeId> {
        match self.get(id) {
            Type::Array(element) => Some(*element),
            _ => None,
        }
    }

    /// A short human readable rendering used in diagnostics.
    pub fn describe(&self, id: TypeId) -> String {
        match self.get(id) {
            Type::Int => String::from("int"),
            Type::String => String::from("string"),
            Type::Nil => String::from("nil"),
            Type::Void => String::from("void"),
            Type::Record(fields) => {
                let fields: Vec<String> = fields
                    .iter()
                    .map(|(name, ty)| format!("{}: {}", name, self.describe_shallow(*ty)))
                    .collect();
                format!("{{{}}}", fields.join(", "))
            }
            Type::Array(element) => format!("array of {}", self.describe_shallow(*element)),
            Type::Name(name, _) => name.to_string(),
        }
    }

    // Record fields and array elements may refer back to the enclosing type.
    fn describe_shallow(&self, id: TypeId) -> String {
        match self.get(id) {
            Type::Record(_) => String::from("record"),
            Type::Array(_) => String::from("array"),
            _ => self.describe(id),
        }
    }
}

impl Default for TypeArena {
    fn default() -> Self {
        Self::new()
    }
}
