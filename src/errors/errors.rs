use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UndefinedVariable { .. } => "UndefinedVariable",
            ErrorImpl::UndefinedFunction { .. } => "UndefinedFunction",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::IntegerRequired { .. } => "IntegerRequired",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::UnexpectedArguments { .. } => "UnexpectedArguments",
            ErrorImpl::MissingArguments { .. } => "MissingArguments",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::FieldTypeMatchError { .. } => "FieldTypeMatchError",
            ErrorImpl::FieldNameMismatch { .. } => "FieldNameMismatch",
            ErrorImpl::FieldCountMismatch { .. } => "FieldCountMismatch",
            ErrorImpl::NotARecord { .. } => "NotARecord",
            ErrorImpl::UnknownField { .. } => "UnknownField",
            ErrorImpl::NotAnArray { .. } => "NotAnArray",
            ErrorImpl::CyclicType { .. } => "CyclicType",
            ErrorImpl::DuplicateDeclaration { .. } => "DuplicateDeclaration",
            ErrorImpl::IfThenReturnsValue { .. } => "IfThenReturnsValue",
            ErrorImpl::BranchTypeMismatch { .. } => "BranchTypeMismatch",
            ErrorImpl::LoopBodyReturnsValue { .. } => "LoopBodyReturnsValue",
            ErrorImpl::BreakOutsideLoop => "BreakOutsideLoop",
            ErrorImpl::UntypedNil => "UntypedNil",
            ErrorImpl::ReturnTypeMismatch { .. } => "ReturnTypeMismatch",
            ErrorImpl::ProcedureReturnsValue { .. } => "ProcedureReturnsValue",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UndefinedVariable { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` is not declared in this scope", variable))
            }
            ErrorImpl::UndefinedFunction { function } => {
                ErrorTip::Suggestion(format!("Function `{}` is not declared in this scope", function))
            }
            ErrorImpl::UnknownType { type_ } => {
                ErrorTip::Suggestion(format!("Unknown type `{}` found", type_))
            }
            ErrorImpl::IntegerRequired { received } => {
                ErrorTip::Suggestion(format!("Expected `int`, received `{}`", received))
            }
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::UnexpectedArguments { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::MissingArguments { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::ArgumentTypeMatchError { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected argument type `{}`, received `{}`",
                    expected, received
                ))
            }
            ErrorImpl::FieldTypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected field type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::FieldNameMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected field `{}`, received `{}`; fields must be given in declaration order",
                expected, received
            )),
            ErrorImpl::FieldCountMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} fields, received {}",
                expected, received
            )),
            ErrorImpl::NotARecord { type_ } => {
                ErrorTip::Suggestion(format!("`{}` is not a record type", type_))
            }
            ErrorImpl::UnknownField { field } => {
                ErrorTip::Suggestion(format!("The record has no field named `{}`", field))
            }
            ErrorImpl::NotAnArray { type_ } => {
                ErrorTip::Suggestion(format!("`{}` is not an array type", type_))
            }
            ErrorImpl::CyclicType { type_ } => ErrorTip::Suggestion(format!(
                "Type `{}` only aliases itself; introduce a record or array type",
                type_
            )),
            ErrorImpl::DuplicateDeclaration { name } => ErrorTip::Suggestion(format!(
                "`{}` is declared twice in the same declaration group",
                name
            )),
            ErrorImpl::IfThenReturnsValue { received } => ErrorTip::Suggestion(format!(
                "An `if` without `else` must not produce a value, received `{}`",
                received
            )),
            ErrorImpl::BranchTypeMismatch { then_type, else_type } => ErrorTip::Suggestion(format!(
                "Branches produce `{}` and `{}`",
                then_type, else_type
            )),
            ErrorImpl::LoopBodyReturnsValue { received } => ErrorTip::Suggestion(format!(
                "A loop body must not produce a value, received `{}`",
                received
            )),
            ErrorImpl::BreakOutsideLoop => ErrorTip::None,
            ErrorImpl::UntypedNil => ErrorTip::Suggestion(String::from(
                "Give the variable a record type when initialising it with `nil`",
            )),
            ErrorImpl::ReturnTypeMismatch {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "Function `{}` should return `{}`, its body produces `{}`",
                function, expected, received
            )),
            ErrorImpl::ProcedureReturnsValue { function, received } => {
                ErrorTip::Suggestion(format!(
                    "Procedure `{}` has no result type but its body produces `{}`",
                    function, received
                ))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.position, self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("undefined variable {variable}")]
    UndefinedVariable { variable: String },
    #[error("undefined function {function}")]
    UndefinedFunction { function: String },
    #[error("unknown type {type_}")]
    UnknownType { type_: String },
    #[error("integer required")]
    IntegerRequired { received: String },
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMatchError { expected: String, received: String },
    #[error("too many arguments: expected {expected}, received {received}")]
    UnexpectedArguments { expected: usize, received: usize },
    #[error("not enough arguments: expected {expected}, received {received}")]
    MissingArguments { expected: usize, received: usize },
    #[error("argument types do not match: expected {expected}, received {received}")]
    ArgumentTypeMatchError { expected: String, received: String },
    #[error("field types do not match: expected {expected}, received {received}")]
    FieldTypeMatchError { expected: String, received: String },
    #[error("field names do not match: expected {expected}, received {received}")]
    FieldNameMismatch { expected: String, received: String },
    #[error("wrong number of fields: expected {expected}, received {received}")]
    FieldCountMismatch { expected: usize, received: usize },
    #[error("{type_} is not a record")]
    NotARecord { type_: String },
    #[error("could not find a field with name {field}")]
    UnknownField { field: String },
    #[error("{type_} is not an array")]
    NotAnArray { type_: String },
    #[error("invalid recursive type {type_}")]
    CyclicType { type_: String },
    #[error("{name} declared twice in one group")]
    DuplicateDeclaration { name: String },
    #[error("if without else produces a value of type {received}")]
    IfThenReturnsValue { received: String },
    #[error("then and else branches have different types: {then_type} and {else_type}")]
    BranchTypeMismatch { then_type: String, else_type: String },
    #[error("loop body produces a value of type {received}")]
    LoopBodyReturnsValue { received: String },
    #[error("break outside of a loop")]
    BreakOutsideLoop,
    #[error("nil used without a record type")]
    UntypedNil,
    #[error("function {function} returns {received} instead of {expected}")]
    ReturnTypeMismatch {
        function: String,
        expected: String,
        received: String,
    },
    #[error("procedure {function} returns a value of type {received}")]
    ProcedureReturnsValue { function: String, received: String },
}

/// Receives every semantic diagnostic produced during analysis.
pub trait DiagnosticSink {
    fn report_error(&mut self, error: Error);
}

impl DiagnosticSink for Vec<Error> {
    fn report_error(&mut self, error: Error) {
        self.push(error);
    }
}
