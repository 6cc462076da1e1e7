//! Type checking and semantic analysis module.
//!
//! This module checks a parsed program and translates it to IR in the same
//! walk. It:
//!
//! - Resolves variables, functions and type names through scoped value and
//!   type environments
//! - Processes mutually recursive type and function groups in two passes and
//!   reports alias cycles
//! - Checks operand, argument, field and branch types, reporting every error
//!   to a diagnostic sink and continuing with a fallback type
//! - Creates one level per function and hands each construct to the
//!   translator
//!
//! `type_check` is the entry point; it runs escape analysis first.

pub mod env;
pub mod options;
pub mod type_checker;
