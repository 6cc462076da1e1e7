use std::collections::HashMap;

use super::symbol::Symbol;

/// A mapping from symbols to values with nested, shadowing scopes.
///
/// Every binding is pushed onto a per-symbol stack and recorded in an undo
/// log. `end_scope` pops the undo log back to the matching `begin_scope`
/// marker, which restores shadowed bindings instead of deleting them.
#[derive(Debug)]
pub struct ScopedTable<V> {
    bindings: HashMap<Symbol, Vec<V>>,
    // `None` marks the start of a scope.
    undo: Vec<Option<Symbol>>,
}

impl<V> ScopedTable<V> {
    pub fn new() -> Self {
        ScopedTable {
            bindings: HashMap::new(),
            undo: vec![],
        }
    }

    pub fn begin_scope(&mut self) {
        self.undo.push(None);
    }

    pub fn end_scope(&mut self) {
        loop {
            match self.undo.pop() {
                Some(None) => return,
                Some(Some(symbol)) => {
                    if let Some(stack) = self.bindings.get_mut(&symbol) {
                        stack.pop();
                        if stack.is_empty() {
                            self.bindings.remove(&symbol);
                        }
                    }
                }
                None => panic!("end_scope called without a matching begin_scope"),
            }
        }
    }

    pub fn bind(&mut self, symbol: Symbol, value: V) {
        self.bindings.entry(symbol).or_default().push(value);
        self.undo.push(Some(symbol));
    }

    pub fn lookup(&self, symbol: Symbol) -> Option<&V> {
        self.bindings.get(&symbol).and_then(|stack| stack.last())
    }

    /// Number of scopes currently open.
    pub fn depth(&self) -> usize {
        self.undo.iter().filter(|entry| entry.is_none()).count()
    }
}

impl<V> Default for ScopedTable<V> {
    fn default() -> Self {
        Self::new()
    }
}
