//! Activation records.
//!
//! A frame records, for one procedure, where each formal and local lives:
//! in a slot at a fixed offset from the frame pointer when its address must
//! survive nested functions, or in a register otherwise. The `Frame` trait
//! is the machine independent interface; `X86Frame` is the layout used by
//! default.

pub mod frame;
pub mod x86_frame;

#[cfg(test)]
mod tests;
