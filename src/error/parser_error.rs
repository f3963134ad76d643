use thiserror::Error;

use crate::{ast::Position, error::LexerError};

/// Represents all errors that can occur during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    /// The token stream itself failed while the parser pulled from it.
    #[error(transparent)]
    Lexer(#[from] LexerError),
    /// Found a token other than the one the grammar requires.
    #[error("ParserError: {pos}: token `{found}` is not expected, want `{want}`")]
    UnexpectedToken {
        /// The token encountered.
        found: String,
        /// What the parser was looking for.
        want:  String,
        /// Position of the encountered token.
        pos:   Position,
    },
    /// A token that cannot start a statement.
    #[error("ParserError: {pos}: invalid syntax `{found}`")]
    InvalidStatement {
        /// The token encountered.
        found: String,
        /// Position of the token.
        pos:   Position,
    },
    /// The left side of an assignment is not a name or member access.
    #[error("ParserError: {pos}: expression is not assignable")]
    InvalidAssignTarget {
        /// Position of the target expression.
        pos: Position,
    },
    /// An identifier-led statement that is neither an assignment nor a call.
    #[error("ParserError: {pos}: expression statement must be a call or an assignment")]
    NotAStatement {
        /// Position of the expression.
        pos: Position,
    },
}

impl ParserError {
    /// Returns the position the error refers to.
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::Lexer(err) => err.position(),
            Self::UnexpectedToken { pos, .. }
            | Self::InvalidStatement { pos, .. }
            | Self::InvalidAssignTarget { pos }
            | Self::NotAStatement { pos } => *pos,
        }
    }
}
