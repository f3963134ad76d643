use thiserror::Error;

use crate::ast::Position;

/// Represents all errors that can occur while scanning source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexerError {
    /// A character that starts no token.
    #[error("LexerError: {pos}: unrecognized char `{ch}`")]
    UnrecognizedChar {
        /// The offending character.
        ch:  char,
        /// Where the character appears.
        pos: Position,
    },
    /// A backslash followed by a character with no escape meaning.
    #[error("LexerError: {pos}: unsupport escape char `{ch}`")]
    UnsupportedEscape {
        /// The character following the backslash.
        ch:  char,
        /// Position of the string literal.
        pos: Position,
    },
    /// A string literal missing its closing quote.
    #[error("LexerError: {pos}: literal string is not end")]
    UnterminatedString {
        /// Position of the opening quote.
        pos: Position,
    },
    /// An integer literal that does not fit in 64 bits.
    #[error("LexerError: {pos}: integer literal `{literal}` is too large")]
    IntegerTooLarge {
        /// The literal text.
        literal: String,
        /// Position of the literal.
        pos:     Position,
    },
}

impl LexerError {
    /// Returns the position the error refers to.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnrecognizedChar { pos, .. }
            | Self::UnsupportedEscape { pos, .. }
            | Self::UnterminatedString { pos }
            | Self::IntegerTooLarge { pos, .. } => *pos,
        }
    }
}
