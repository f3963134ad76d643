use thiserror::Error;

use crate::ast::Position;

/// Represents all errors found by the semantic analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// A name used without a visible declaration.
    #[error("SemanticError: {pos}: name `{name}` not declared")]
    NameNotDeclared {
        /// The name.
        name: String,
        /// Where the name is used.
        pos:  Position,
    },
    /// A name declared twice in the same scope.
    #[error("SemanticError: {pos}: name `{name}` duplicate declared")]
    DuplicateDeclared {
        /// The name.
        name: String,
        /// Position of the second declaration.
        pos:  Position,
    },
    /// Assignment to a constant, loop variable or built-in.
    #[error("SemanticError: {pos}: name `{name}` not assignable")]
    NotAssignable {
        /// The name.
        name: String,
        /// Position of the assignment target.
        pos:  Position,
    },
    /// `break` with no enclosing loop.
    #[error("SemanticError: {pos}: break outside of loop")]
    BreakOutsideLoop {
        /// Position of the statement.
        pos: Position,
    },
    /// `continue` with no enclosing loop.
    #[error("SemanticError: {pos}: continue outside of loop")]
    ContinueOutsideLoop {
        /// Position of the statement.
        pos: Position,
    },
    /// `return` with no enclosing function.
    #[error("SemanticError: {pos}: return outside of function")]
    ReturnOutsideFunction {
        /// Position of the statement.
        pos: Position,
    },
}

impl SemanticError {
    /// Returns the position the error refers to.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::NameNotDeclared { pos, .. }
            | Self::DuplicateDeclared { pos, .. }
            | Self::NotAssignable { pos, .. }
            | Self::BreakOutsideLoop { pos }
            | Self::ContinueOutsideLoop { pos }
            | Self::ReturnOutsideFunction { pos } => *pos,
        }
    }
}
