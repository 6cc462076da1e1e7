use crate::{
    frame::frame::{Frame, FrameAccess},
    temp::temp::Label,
};

/// Index of a level in the translator. Levels are never freed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelId(pub(crate) usize);

/// A storage location together with the level that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    pub level: LevelId,
    pub access: FrameAccess,
}

/// One function nesting depth.
#[derive(Debug)]
pub struct Level<F: Frame> {
    pub parent: Option<LevelId>,
    pub name: Label,
    pub frame: F,
    /// One access per formal. The first is the static link.
    pub formals: Vec<Access>,
}

impl<F: Frame> Level<F> {
    pub fn static_link(&self) -> Access {
        self.formals[0]
    }
}
