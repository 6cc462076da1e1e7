use std::fmt::Display;

use crate::symbol::symbol::Symbol;

/// An abstract register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Temp(pub u32);

/// A symbolic code address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label(Symbol);

impl Label {
    pub fn named(name: &str) -> Label {
        Label(Symbol::intern(name))
    }
}

impl Display for Temp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out fresh temporaries and labels for one analysis session.
#[derive(Debug)]
pub struct TempFactory {
    next_temp: u32,
    next_label: u32,
}

impl TempFactory {
    /// The frame pointer of the currently executing procedure.
    pub const FRAME_POINTER: Temp = Temp(0);

    pub fn new() -> Self {
        TempFactory {
            next_temp: 100,
            next_label: 0,
        }
    }

    pub fn new_temp(&mut self) -> Temp {
        let temp = Temp(self.next_temp);
        self.next_temp += 1;
        temp
    }

    pub fn new_label(&mut self) -> Label {
        let label = Label::named(&format!("L{}", self.next_label));
        self.next_label += 1;
        label
    }
}

impl Default for TempFactory {
    fn default() -> Self {
        Self::new()
    }
}
