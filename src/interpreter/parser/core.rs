use crate::{
    ast::{Name, Position, Program},
    error::ParserError,
    interpreter::lexer::{Token, TokenStream},
};

pub type ParseResult<T> = Result<T, ParserError>;

/// A recursive-descent parser over a [`TokenStream`].
///
/// The parser holds exactly one token of lookahead, the "current" token, and
/// advances explicitly. Parsing is not resumable: the first error aborts the
/// whole parse.
pub struct Parser<'src> {
    tokens:             TokenStream<'src>,
    pub(super) current: Token,
    pub(super) pos:     Position,
}

impl<'src> Parser<'src> {
    /// Creates a parser over `source` and reads the first token.
    ///
    /// # Errors
    /// Returns [`ParserError::Lexer`] if the first token cannot be scanned.
    pub fn new(source: &'src str) -> ParseResult<Self> {
        let mut tokens = TokenStream::new(source);
        let (current, pos) = tokens.next_token()?;
        Ok(Self { tokens, current, pos })
    }

    /// Parses a whole program.
    ///
    /// Grammar: `program := stat* EOF`
    ///
    /// # Returns
    /// The parsed [`Program`]. Empty statements (`;`) are dropped.
    ///
    /// # Errors
    /// Returns the first [`ParserError`] encountered, including lexer errors
    /// surfaced while pulling tokens.
    ///
    /// # Example
    /// ```
    /// use toylang::interpreter::parser::core::Parser;
    ///
    /// let program = Parser::new("var x = 1; x = x + 1").unwrap()
    ///                                                  .parse_program()
    ///                                                  .unwrap();
    ///
    /// assert_eq!(program.stats.len(), 2);
    /// ```
    pub fn parse_program(mut self) -> ParseResult<Program> {
        let stats = self.parse_stat_list()?;
        if self.current != Token::Eof {
            return Err(self.unexpected("EOF"));
        }
        Ok(Program { stats })
    }

    /// Advances to the next token, returning the one that was current.
    pub(super) fn advance(&mut self) -> ParseResult<(Token, Position)> {
        let (next, pos) = self.tokens.next_token()?;
        let previous = std::mem::replace(&mut self.current, next);
        let previous_pos = std::mem::replace(&mut self.pos, pos);
        Ok((previous, previous_pos))
    }

    /// Returns `true` if the current token equals `token`.
    pub(super) fn check(&self, token: &Token) -> bool {
        self.current == *token
    }

    /// Consumes the current token if it equals `token`.
    ///
    /// # Returns
    /// Whether the token was consumed.
    pub(super) fn eat_if(&mut self, token: &Token) -> ParseResult<bool> {
        if self.check(token) {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Consumes the current token, which must equal `token`.
    ///
    /// # Returns
    /// The position of the consumed token.
    ///
    /// # Errors
    /// [`ParserError::UnexpectedToken`] naming `token` as the wanted one.
    pub(super) fn eat(&mut self, token: &Token) -> ParseResult<Position> {
        if self.check(token) {
            return Ok(self.advance()?.1);
        }
        Err(self.unexpected(&token.to_string()))
    }

    /// Consumes an identifier token and returns it as a [`Name`].
    pub(super) fn eat_name(&mut self) -> ParseResult<Name> {
        if let Token::Identifier(identifier) = &self.current {
            let name = Name { identifier: identifier.clone(),
                              pos:        self.pos, };
            self.advance()?;
            return Ok(name);
        }
        Err(self.unexpected("identifier"))
    }

    /// Builds an "unexpected token" error for the current token.
    pub(super) fn unexpected(&self, want: &str) -> ParserError {
        ParserError::UnexpectedToken { found: self.current.to_string(),
                                       want:  want.to_string(),
                                       pos:   self.pos, }
    }
}
