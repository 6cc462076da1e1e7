//! Temporaries (abstract registers) and labels (abstract code addresses).

pub mod temp;
