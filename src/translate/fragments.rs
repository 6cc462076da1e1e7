use crate::{frame::frame::Frame, ir::tree::Stmt, temp::temp::Label};

/// A finished unit of IR handed to the code generator.
#[derive(Debug, Clone)]
pub enum Fragment<F: Frame> {
    StringLiteral { label: Label, text: String },
    Procedure { frame: F, body: Stmt },
}

impl<F: Frame> Fragment<F> {
    pub fn is_procedure(&self) -> bool {
        matches!(self, Fragment::Procedure { .. })
    }
}

/// Fragments of one analysis session, in the order they were finished.
#[derive(Debug)]
pub struct FragmentStore<F: Frame> {
    fragments: Vec<Fragment<F>>,
}

impl<F: Frame> FragmentStore<F> {
    pub fn new() -> Self {
        FragmentStore { fragments: vec![] }
    }

    pub fn push(&mut self, fragment: Fragment<F>) {
        self.fragments.push(fragment);
    }

    pub fn all(&self) -> &[Fragment<F>] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn into_fragments(self) -> Vec<Fragment<F>> {
        self.fragments
    }
}

impl<F: Frame> Default for FragmentStore<F> {
    fn default() -> Self {
        Self::new()
    }
}
