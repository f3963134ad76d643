use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a comma-separated list of expressions until a closing token.
    ///
    /// This utility is shared by list literals and call argument lists. The
    /// opening token must already be consumed; the closing one is consumed
    /// here. An immediately encountered closing token produces an empty list.
    ///
    /// Grammar (simplified): `list := (expr ("," expr)*)? closing`
    ///
    /// # Errors
    /// Returns a `ParserError` if an item fails to parse or a token other
    /// than `,` or `closing` follows an item.
    pub(super) fn parse_delimited(&mut self, closing: &Token) -> ParseResult<Vec<Expr>> {
        let mut items = Vec::new();
        if self.eat_if(closing)? {
            return Ok(items);
        }
        loop {
            items.push(self.parse_expression()?);
            if self.eat_if(&Token::Comma)? {
                continue;
            }
            if self.eat_if(closing)? {
                return Ok(items);
            }
            return Err(self.unexpected(&format!(", or {closing}")));
        }
    }
}

/// Maps a token to the binary operator it spells, if any.
///
/// `**` is not included; power is parsed at its own level.
pub(super) const fn binary_operator(token: &Token) -> Option<BinaryOperator> {
    Some(match token {
        Token::Or => BinaryOperator::Or,
        Token::And => BinaryOperator::And,
        Token::In => BinaryOperator::In,
        Token::Is => BinaryOperator::Is,
        Token::EqualEqual => BinaryOperator::Equal,
        Token::BangEqual => BinaryOperator::NotEqual,
        Token::Less => BinaryOperator::Less,
        Token::LessEqual => BinaryOperator::LessEqual,
        Token::Greater => BinaryOperator::Greater,
        Token::GreaterEqual => BinaryOperator::GreaterEqual,
        Token::Pipe => BinaryOperator::BitOr,
        Token::Caret => BinaryOperator::BitXor,
        Token::Ampersand => BinaryOperator::BitAnd,
        Token::Shl => BinaryOperator::Shl,
        Token::Shr => BinaryOperator::Shr,
        Token::Plus => BinaryOperator::Add,
        Token::Minus => BinaryOperator::Sub,
        Token::Star => BinaryOperator::Mul,
        Token::Slash => BinaryOperator::Div,
        Token::Percent => BinaryOperator::Mod,
        _ => return None,
    })
}

/// Maps a compound assignment token to the operator it applies.
pub(super) const fn compound_operator(token: &Token) -> Option<BinaryOperator> {
    Some(match token {
        Token::PlusAssign => BinaryOperator::Add,
        Token::MinusAssign => BinaryOperator::Sub,
        Token::StarAssign => BinaryOperator::Mul,
        Token::SlashAssign => BinaryOperator::Div,
        Token::StarStarAssign => BinaryOperator::Pow,
        Token::PercentAssign => BinaryOperator::Mod,
        Token::ShlAssign => BinaryOperator::Shl,
        Token::ShrAssign => BinaryOperator::Shr,
        Token::AmpersandAssign => BinaryOperator::BitAnd,
        Token::CaretAssign => BinaryOperator::BitXor,
        Token::PipeAssign => BinaryOperator::BitOr,
        _ => return None,
    })
}

/// Returns `true` if `token` may begin an expression.
pub(super) const fn starts_expression(token: &Token) -> bool {
    matches!(token, Token::LParen | Token::LBracket | Token::LBrace)
    || starts_command_argument(token)
}

/// Returns `true` if `token` may begin the unparenthesized argument list of
/// a command call such as `println x, y`.
///
/// Brackets are excluded because after a name they continue the postfix
/// chain (`f(x)`, `a[i]`) or start the next statement (`{`).
pub(super) const fn starts_command_argument(token: &Token) -> bool {
    matches!(token,
             Token::Int(_)
             | Token::Float(_)
             | Token::Str(_)
             | Token::Identifier(_)
             | Token::True
             | Token::False
             | Token::Null
             | Token::Func
             | Token::Plus
             | Token::Minus
             | Token::Not
             | Token::Hash
             | Token::Tilde)
}
