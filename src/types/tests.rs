use crate::symbol::symbol::Symbol;

use super::types::{Type, TypeArena, TypeError};

#[test]
fn test_builtins_only_equal_themselves() {
    let arena = TypeArena::new();
    let builtins = [TypeArena::INT, TypeArena::STRING, TypeArena::NIL, TypeArena::VOID];

    for left in builtins {
        for right in builtins {
            assert_eq!(arena.is_equivalent(left, right), left == right);
        }
    }
}

#[test]
fn test_identical_records_are_not_equivalent() {
    let mut arena = TypeArena::new();
    let x = Symbol::intern("x");
    let first = arena.record(vec![(x, TypeArena::INT)]);
    let second = arena.record(vec![(x, TypeArena::INT)]);

    assert_eq!(arena.get(first), arena.get(second));
    assert!(!arena.is_equivalent(first, second));
    assert!(arena.is_equivalent(first, first));
}

#[test]
fn test_identical_arrays_are_not_equivalent() {
    let mut arena = TypeArena::new();
    let first = arena.array(TypeArena::INT);
    let second = arena.array(TypeArena::INT);

    assert!(!arena.is_equivalent(first, second));
}

#[test]
fn test_nil_compatible_with_records_one_way() {
    let mut arena = TypeArena::new();
    let record = arena.record(vec![]);
    let array = arena.array(TypeArena::INT);

    assert!(arena.is_compatible(record, TypeArena::NIL));
    assert!(!arena.is_compatible(TypeArena::NIL, record));
    assert!(!arena.is_compatible(array, TypeArena::NIL));
    assert!(!arena.is_compatible(TypeArena::INT, TypeArena::NIL));
}

#[test]
fn test_resolve_follows_alias_chain() {
    let mut arena = TypeArena::new();
    let a = arena.name(Symbol::intern("a"));
    let b = arena.name(Symbol::intern("b"));
    arena.set_name(a, b);
    arena.set_name(b, TypeArena::STRING);

    assert_eq!(arena.resolve(a), Ok(TypeArena::STRING));
    assert_eq!(arena.resolve(TypeArena::INT), Ok(TypeArena::INT));
}

#[test]
fn test_resolve_detects_alias_cycle() {
    let mut arena = TypeArena::new();
    let a_name = Symbol::intern("a");
    let a = arena.name(a_name);
    let b = arena.name(Symbol::intern("b"));
    arena.set_name(a, b);
    arena.set_name(b, a);

    assert_eq!(arena.resolve(a), Err(TypeError::Cyclic { name: a_name }));
}

#[test]
fn test_array_breaks_cycle() {
    let mut arena = TypeArena::new();
    let a = arena.name(Symbol::intern("a"));
    let array = arena.array(a);
    arena.set_name(a, array);

    assert_eq!(arena.resolve(a), Ok(array));
    assert_eq!(arena.array_element(array), Some(a));
}

#[test]
fn test_record_breaks_cycle() {
    let mut arena = TypeArena::new();
    let list = arena.name(Symbol::intern("list"));
    let record = arena.record(vec![
        (Symbol::intern("head"), TypeArena::INT),
        (Symbol::intern("tail"), list),
    ]);
    arena.set_name(list, record);

    assert_eq!(arena.resolve(list), Ok(record));
    assert_eq!(arena.describe(record), "{head: int, tail: list}");
}

#[test]
fn test_unresolved_name() {
    let mut arena = TypeArena::new();
    let pending = Symbol::intern("pending");
    let id = arena.name(pending);

    assert_eq!(arena.resolve(id), Err(TypeError::Unresolved { name: pending }));
    assert!(matches!(arena.get(id), Type::Name(_, None)));
}

#[test]
#[should_panic(expected = "resolved twice")]
fn test_name_filled_in_once() {
    let mut arena = TypeArena::new();
    let id = arena.name(Symbol::intern("once"));
    arena.set_name(id, TypeArena::INT);
    arena.set_name(id, TypeArena::STRING);
}

#[test]
fn test_describe() {
    let mut arena = TypeArena::new();
    let ints = arena.array(TypeArena::INT);

    assert_eq!(arena.describe(TypeArena::VOID), "void");
    assert_eq!(arena.describe(ints), "array of int");
}
