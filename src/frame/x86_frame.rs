use std::iter;

use crate::temp::temp::{Label, TempFactory};

use super::frame::{Frame, FrameAccess};

/// 32-bit x86 layout.
///
/// Offset 0 is the return value slot. Escaping formals take the slots
/// below it in order, and locals continue below the formals.
#[derive(Debug, Clone)]
pub struct X86Frame {
    name: Label,
    formals: Vec<FrameAccess>,
    local_count: i32,
}

impl X86Frame {
    pub fn local_count(&self) -> i32 {
        self.local_count
    }
}

impl Frame for X86Frame {
    const WORD_SIZE: i32 = 4;

    fn new(name: Label, escapes: &[bool], temps: &mut TempFactory) -> Self {
        let formals = iter::once(&true)
            .chain(escapes.iter())
            .enumerate()
            .map(|(index, escape)| {
                if *escape {
                    FrameAccess::InFrame(-(index as i32 + 1) * Self::WORD_SIZE)
                } else {
                    FrameAccess::InReg(temps.new_temp())
                }
            })
            .collect();

        X86Frame {
            name,
            formals,
            local_count: 0,
        }
    }

    fn name(&self) -> Label {
        self.name
    }

    fn formals(&self) -> &[FrameAccess] {
        &self.formals
    }

    fn alloc_local(&mut self, escape: bool, temps: &mut TempFactory) -> FrameAccess {
        if !escape {
            return FrameAccess::InReg(temps.new_temp());
        }

        self.local_count += 1;
        let slot = self.formals.len() as i32 + self.local_count;
        FrameAccess::InFrame(-slot * Self::WORD_SIZE)
    }
}
