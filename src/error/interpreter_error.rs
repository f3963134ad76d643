use thiserror::Error;

use crate::ast::Position;

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpreterError {
    /// A name that no activation record on the chain binds.
    #[error("InterpreterError: {pos}: name `{name}` not declared")]
    NameNotDeclared {
        /// The name.
        name: String,
        /// Where the name is used.
        pos:  Position,
    },
    /// A name bound twice in the same activation record.
    #[error("InterpreterError: {pos}: name `{name}` duplicate declared")]
    DuplicateDeclared {
        /// The name.
        name: String,
        /// Position of the second declaration.
        pos:  Position,
    },
    /// Write to a constant binding.
    #[error("InterpreterError: {pos}: name `{name}` not assignable")]
    NotAssignable {
        /// The name.
        name: String,
        /// Position of the assignment.
        pos:  Position,
    },
    /// An operator or built-in applied to operands of the wrong type.
    #[error("InterpreterError: {pos}: expr type error: {details}")]
    TypeError {
        /// What was expected and what was found.
        details: String,
        /// Position of the operation.
        pos:     Position,
    },
    /// An operator without an implementation.
    #[error("InterpreterError: {pos}: op `{op}` is not implemented")]
    OpNotImplemented {
        /// The operator text.
        op:  String,
        /// Position of the operation.
        pos: Position,
    },
    /// Index out of range, missing key, or unsupported container.
    #[error("InterpreterError: {pos}: member access error: {details}")]
    MemberAccess {
        /// What went wrong.
        details: String,
        /// Position of the access.
        pos:     Position,
    },
    /// Call of a value that is not a function.
    #[error("InterpreterError: {pos}: value of type `{type_name}` not callable")]
    NotCallable {
        /// Runtime type of the called value.
        type_name: String,
        /// Position of the call.
        pos:       Position,
    },
    /// A call with the wrong number of arguments.
    #[error("InterpreterError: {pos}: expected {expected} argument(s), found {found}")]
    ArgumentCount {
        /// Accepted argument count, e.g. `2` or `at least 1`.
        expected: String,
        /// Supplied argument count.
        found:    usize,
        /// Position of the call.
        pos:      Position,
    },
    /// Integer division or modulo by zero.
    #[error("InterpreterError: {pos}: division by zero")]
    DivisionByZero {
        /// Position of the operation.
        pos: Position,
    },
    /// Integer arithmetic overflowed.
    #[error("InterpreterError: {pos}: integer overflow")]
    Overflow {
        /// Position of the operation.
        pos: Position,
    },
    /// Too many script function calls in progress.
    #[error("InterpreterError: {pos}: call depth exceeds {limit}")]
    CallDepthExceeded {
        /// The configured limit.
        limit: usize,
        /// Position of the call that went over it.
        pos:   Position,
    },
    /// A value outside the domain of an operation.
    #[error("InterpreterError: {pos}: expr value error: {details}")]
    ValueError {
        /// What went wrong.
        details: String,
        /// Position of the operation.
        pos:     Position,
    },
    /// `break` reached a function or program boundary.
    #[error("InterpreterError: {pos}: break outside of loop")]
    BreakOutsideLoop {
        /// Position of the statement.
        pos: Position,
    },
    /// `continue` reached a function or program boundary.
    #[error("InterpreterError: {pos}: continue outside of loop")]
    ContinueOutsideLoop {
        /// Position of the statement.
        pos: Position,
    },
    /// `return` reached the program record.
    #[error("InterpreterError: {pos}: return outside of function")]
    ReturnOutsideFunction {
        /// Position of the statement.
        pos: Position,
    },
    /// `assert` failed.
    #[error("InterpreterError: {pos}: assertion failed: {message}")]
    AssertionFailed {
        /// User supplied or default message.
        message: String,
        /// Position of the call.
        pos:     Position,
    },
    /// Console I/O failed.
    #[error("InterpreterError: {pos}: io error: {details}")]
    Io {
        /// The underlying error, rendered.
        details: String,
        /// Position of the call.
        pos:     Position,
    },
}

impl InterpreterError {
    /// Returns the position the error refers to.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::NameNotDeclared { pos, .. }
            | Self::DuplicateDeclared { pos, .. }
            | Self::NotAssignable { pos, .. }
            | Self::TypeError { pos, .. }
            | Self::OpNotImplemented { pos, .. }
            | Self::MemberAccess { pos, .. }
            | Self::NotCallable { pos, .. }
            | Self::ArgumentCount { pos, .. }
            | Self::DivisionByZero { pos }
            | Self::Overflow { pos }
            | Self::CallDepthExceeded { pos, .. }
            | Self::ValueError { pos, .. }
            | Self::BreakOutsideLoop { pos }
            | Self::ContinueOutsideLoop { pos }
            | Self::ReturnOutsideFunction { pos }
            | Self::AssertionFailed { pos, .. }
            | Self::Io { pos, .. } => *pos,
        }
    }
}
