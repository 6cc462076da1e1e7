//! Error types and error handling for the analyzer.
//!
//! This module defines the diagnostics reported while checking a program.
//! It includes:
//!
//! - Error structures with source position information
//! - One error variant per kind of semantic error
//! - Error names and suggestions for display
//! - The `DiagnosticSink` that collects reported errors
//!
//! Semantic errors never abort analysis. Defects in the analyzer itself
//! are not represented here; they panic.

pub mod errors;
