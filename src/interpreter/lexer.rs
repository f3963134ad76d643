use logos::{Lexer, Logos, Skip};

use crate::{ast::Position, error::LexerError};

/// The reason the logos scanner rejected a piece of input.
///
/// Carries no position; [`TokenStream`] attaches one when it converts the
/// kind into a [`LexerError`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    /// No token pattern matched.
    #[default]
    UnrecognizedChar,
    /// A backslash escape with no meaning.
    UnsupportedEscape(char),
    /// A string literal without its closing quote.
    UnterminatedString,
    /// An integer literal outside the `i64` range.
    IntegerTooLarge,
}

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexErrorKind)]
pub enum Token {
    /// Float literal tokens, such as `3.14` or `2.1e-10`.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    Float(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Int(i64),
    /// String literal tokens delimited by `"`, `'` or `` ` ``.
    #[token("\"", |lex| lex_string(lex, '"'))]
    #[token("'", |lex| lex_string(lex, '\''))]
    #[token("`", |lex| lex_string(lex, '`'))]
    Str(String),
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `/* Block comments. */`
    #[token("/*", skip_block_comment)]
    BlockComment,
    /// Spaces, tabs, feeds and newlines.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Whitespace,

    /// `and`
    #[token("and")]
    And,
    /// `not`
    #[token("not")]
    Not,
    /// `or`
    #[token("or")]
    Or,
    /// `if`
    #[token("if")]
    If,
    /// `elif`
    #[token("elif")]
    Elif,
    /// `else`
    #[token("else")]
    Else,
    /// `switch`
    #[token("switch")]
    Switch,
    /// `case`
    #[token("case")]
    Case,
    /// `default`
    #[token("default")]
    Default,
    /// `break`
    #[token("break")]
    Break,
    /// `continue`
    #[token("continue")]
    Continue,
    /// `repeat`
    #[token("repeat")]
    Repeat,
    /// `until`
    #[token("until")]
    Until,
    /// `while`
    #[token("while")]
    While,
    /// `for`
    #[token("for")]
    For,
    /// `is`
    #[token("is")]
    Is,
    /// `in`
    #[token("in")]
    In,
    /// `func`
    #[token("func")]
    Func,
    /// `return`
    #[token("return")]
    Return,
    /// `var`
    #[token("var")]
    Var,
    /// `const`
    #[token("const")]
    Const,
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,
    /// `null`
    #[token("null")]
    Null,

    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semi,
    /// `?`
    #[token("?")]
    Query,
    /// `...`
    #[token("...")]
    Ellipsis,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `**`
    #[token("**")]
    StarStar,
    /// `%`
    #[token("%")]
    Percent,
    /// `<<`
    #[token("<<")]
    Shl,
    /// `>>`
    #[token(">>")]
    Shr,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `^`
    #[token("^")]
    Caret,
    /// `|`
    #[token("|")]
    Pipe,
    /// `~`
    #[token("~")]
    Tilde,
    /// `#`
    #[token("#")]
    Hash,
    /// `=`
    #[token("=")]
    Equals,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*=`
    #[token("*=")]
    StarAssign,
    /// `/=`
    #[token("/=")]
    SlashAssign,
    /// `**=`
    #[token("**=")]
    StarStarAssign,
    /// `%=`
    #[token("%=")]
    PercentAssign,
    /// `<<=`
    #[token("<<=")]
    ShlAssign,
    /// `>>=`
    #[token(">>=")]
    ShrAssign,
    /// `&=`
    #[token("&=")]
    AmpersandAssign,
    /// `^=`
    #[token("^=")]
    CaretAssign,
    /// `|=`
    #[token("|=")]
    PipeAssign,

    /// End of input. Never produced by logos; [`TokenStream`] emits it once
    /// the scanner is exhausted.
    Eof,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Float(v) => return write!(f, "{v}"),
            Self::Int(v) => return write!(f, "{v}"),
            Self::Str(s) => return write!(f, "{s:?}"),
            Self::Identifier(s) => return write!(f, "{s}"),
            Self::Comment | Self::BlockComment | Self::Whitespace => "",
            Self::And => "and",
            Self::Not => "not",
            Self::Or => "or",
            Self::If => "if",
            Self::Elif => "elif",
            Self::Else => "else",
            Self::Switch => "switch",
            Self::Case => "case",
            Self::Default => "default",
            Self::Break => "break",
            Self::Continue => "continue",
            Self::Repeat => "repeat",
            Self::Until => "until",
            Self::While => "while",
            Self::For => "for",
            Self::Is => "is",
            Self::In => "in",
            Self::Func => "func",
            Self::Return => "return",
            Self::Var => "var",
            Self::Const => "const",
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Colon => ":",
            Self::Semi => ";",
            Self::Query => "?",
            Self::Ellipsis => "...",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::StarStar => "**",
            Self::Percent => "%",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Ampersand => "&",
            Self::Caret => "^",
            Self::Pipe => "|",
            Self::Tilde => "~",
            Self::Hash => "#",
            Self::Equals => "=",
            Self::PlusAssign => "+=",
            Self::MinusAssign => "-=",
            Self::StarAssign => "*=",
            Self::SlashAssign => "/=",
            Self::StarStarAssign => "**=",
            Self::PercentAssign => "%=",
            Self::ShlAssign => "<<=",
            Self::ShrAssign => ">>=",
            Self::AmpersandAssign => "&=",
            Self::CaretAssign => "^=",
            Self::PipeAssign => "|=",
            Self::Eof => "EOF",
        };
        write!(f, "{text}")
    }
}

/// Parses a floating-point literal from the current token slice.
fn parse_float(lex: &Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
///
/// # Returns
/// - `Ok(i64)`: The parsed value.
/// - `Err(LexErrorKind::IntegerTooLarge)`: If the literal overflows `i64`.
fn parse_integer(lex: &Lexer<Token>) -> Result<i64, LexErrorKind> {
    lex.slice()
       .parse()
       .map_err(|_| LexErrorKind::IntegerTooLarge)
}

/// Skips a block comment whose opening `/*` has just been matched.
///
/// An unterminated comment swallows the rest of the input.
fn skip_block_comment(lex: &mut Lexer<Token>) -> Skip {
    let remainder = lex.remainder();
    let consumed = remainder.find("*/").map_or(remainder.len(), |end| end + 2);
    lex.bump(consumed);
    Skip
}

/// Scans the body of a string literal whose opening `quote` has just been
/// matched, resolving escape sequences.
///
/// Only backtick strings may contain raw newlines. Carriage returns are
/// dropped.
fn lex_string(lex: &mut Lexer<Token>, quote: char) -> Result<String, LexErrorKind> {
    let mut value = String::new();
    let mut chars = lex.remainder().char_indices();

    let consumed = loop {
        match chars.next() {
            None => return Err(LexErrorKind::UnterminatedString),
            Some((index, c)) if c == quote => break index + c.len_utf8(),
            Some((_, '\n')) if quote != '`' => return Err(LexErrorKind::UnterminatedString),
            Some((_, '\r')) => {},
            Some((_, '\\')) => match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, 't')) => value.push('\t'),
                Some((_, 'r')) => value.push('\r'),
                Some((_, c @ ('\\' | '"' | '\'' | '`'))) => value.push(c),
                Some((_, other)) => return Err(LexErrorKind::UnsupportedEscape(other)),
                None => return Err(LexErrorKind::UnterminatedString),
            },
            Some((_, c)) => value.push(c),
        }
    };

    lex.bump(consumed);
    Ok(value)
}

/// A pull-based token source with single-token granularity.
///
/// Wraps the logos scanner and attaches a 1-based `(line, column)` position to
/// every token. Once the input is exhausted, [`Token::Eof`] is returned on
/// every further call.
pub struct TokenStream<'src> {
    lexer:      Lexer<'src, Token>,
    source:     &'src str,
    /// Byte offset up to which line information has been computed.
    cursor:     usize,
    line:       usize,
    line_start: usize,
}

impl<'src> TokenStream<'src> {
    /// Creates a token stream over `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { lexer: Token::lexer(source),
               source,
               cursor: 0,
               line: 1,
               line_start: 0 }
    }

    /// Returns the next token together with its position.
    ///
    /// # Errors
    /// Returns a [`LexerError`] for unrecognized characters, unsupported
    /// escapes, unterminated strings and oversized integer literals.
    ///
    /// # Example
    /// ```
    /// use toylang::interpreter::lexer::{Token, TokenStream};
    ///
    /// let mut stream = TokenStream::new("var x");
    ///
    /// assert_eq!(stream.next_token().unwrap().0, Token::Var);
    /// assert_eq!(stream.next_token().unwrap().0, Token::Identifier("x".into()));
    /// assert_eq!(stream.next_token().unwrap().0, Token::Eof);
    /// ```
    pub fn next_token(&mut self) -> Result<(Token, Position), LexerError> {
        let Some(result) = self.lexer.next() else {
            let pos = self.locate(self.source.len());
            return Ok((Token::Eof, pos));
        };

        let span = self.lexer.span();
        let pos = self.locate(span.start);

        result.map(|token| (token, pos)).map_err(|kind| match kind {
                                            LexErrorKind::UnrecognizedChar => {
                                                let ch = self.source[span.start..].chars()
                                                                                  .next()
                                                                                  .unwrap_or('\0');
                                                LexerError::UnrecognizedChar { ch, pos }
                                            },
                                            LexErrorKind::UnsupportedEscape(ch) => {
                                                LexerError::UnsupportedEscape { ch, pos }
                                            },
                                            LexErrorKind::UnterminatedString => {
                                                LexerError::UnterminatedString { pos }
                                            },
                                            LexErrorKind::IntegerTooLarge => {
                                                LexerError::IntegerTooLarge { literal:
                                                                                  self.source[span]
                                                                                      .to_string(),
                                                                              pos }
                                            },
                                        })
    }

    /// Computes the position of byte `offset`, advancing the line bookkeeping.
    ///
    /// Offsets must be requested in non-decreasing order.
    fn locate(&mut self, offset: usize) -> Position {
        let offset = offset.max(self.cursor);
        for (index, byte) in self.source.as_bytes()[self.cursor..offset].iter().enumerate() {
            if *byte == b'\n' {
                self.line += 1;
                self.line_start = self.cursor + index + 1;
            }
        }
        self.cursor = offset;

        let column = self.source[self.line_start..offset].chars().count() + 1;
        Position::new(self.line, column)
    }
}

/// Scans the whole of `source` into a token vector terminated by
/// [`Token::Eof`].
///
/// # Errors
/// Returns the first [`LexerError`] encountered.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Position)>, LexerError> {
    let mut stream = TokenStream::new(source);
    let mut tokens = Vec::new();

    loop {
        let (token, pos) = stream.next_token()?;
        let done = token == Token::Eof;
        tokens.push((token, pos));
        if done {
            return Ok(tokens);
        }
    }
}
