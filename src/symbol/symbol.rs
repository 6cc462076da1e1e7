use lazy_static::lazy_static;
use std::{
    collections::HashMap,
    fmt::Display,
    sync::{Arc, Mutex, PoisonError},
};

#[derive(Debug, Default)]
struct Interner {
    lookup: HashMap<Arc<str>, Symbol>,
    names: Vec<Arc<str>>,
}

lazy_static! {
    // Shared by every analysis session; only ever appended to.
    static ref INTERNER: Mutex<Interner> = Mutex::new(Interner::default());
}

/// An interned name. Two symbols are equal iff they were interned from equal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

impl Symbol {
    pub fn intern(text: &str) -> Symbol {
        let mut interner = INTERNER.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(symbol) = interner.lookup.get(text) {
            return *symbol;
        }

        let symbol = Symbol(interner.names.len() as u32);
        let name: Arc<str> = Arc::from(text);
        interner.names.push(Arc::clone(&name));
        interner.lookup.insert(name, symbol);
        symbol
    }

    pub fn name(&self) -> Arc<str> {
        let interner = INTERNER.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&interner.names[self.0 as usize])
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
