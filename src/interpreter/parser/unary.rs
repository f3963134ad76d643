use std::rc::Rc;

use crate::{
    ast::{BinaryOperator, Expr, NumLiteral, UnaryOperator},
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses prefix operators.
    ///
    /// Grammar: `unary := ("+" | "-" | "not" | "#" | "~") unary | power`
    pub(super) fn parse_unary(&mut self) -> ParseResult<Expr> {
        let op = match self.current {
            Token::Plus => UnaryOperator::Plus,
            Token::Minus => UnaryOperator::Negate,
            Token::Not => UnaryOperator::Not,
            Token::Hash => UnaryOperator::Len,
            Token::Tilde => UnaryOperator::BitNot,
            _ => return self.parse_power(),
        };
        let pos = self.advance()?.1;
        let expr = self.parse_unary()?;
        Ok(Expr::UniOp { op,
                         expr: Box::new(expr),
                         pos })
    }

    /// Parses exponentiation.
    ///
    /// `**` is right-associative and binds tighter than the prefix operators
    /// on its left, so `-2 ** 2` is `-(2 ** 2)`. The exponent may carry its
    /// own prefix operator: `2 ** -1`.
    ///
    /// Grammar: `power := postfix ("**" unary)?`
    fn parse_power(&mut self) -> ParseResult<Expr> {
        let base = self.parse_postfix()?;
        if !self.check(&Token::StarStar) {
            return Ok(base);
        }
        let pos = self.advance()?.1;
        let exponent = self.parse_unary()?;
        Ok(Expr::BinOp { op: BinaryOperator::Pow,
                         left: Box::new(base),
                         right: Box::new(exponent),
                         pos })
    }

    /// Parses a primary expression followed by calls and member accesses.
    ///
    /// Grammar: `postfix := primary ("(" args ")" | "[" expr "]" | "." name)*`
    pub(super) fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let primary = self.parse_primary()?;
        self.parse_postfix_tail(primary)
    }

    /// Applies any trailing calls and member accesses to `expr`.
    pub(super) fn parse_postfix_tail(&mut self, mut expr: Expr) -> ParseResult<Expr> {
        loop {
            expr = match self.current {
                Token::LParen => {
                    let pos = self.advance()?.1;
                    let args = self.parse_delimited(&Token::RParen)?;
                    Expr::FuncCall { callee: Box::new(expr),
                                     args,
                                     pos }
                },
                Token::LBracket => {
                    let pos = self.advance()?.1;
                    let key = self.parse_expression()?;
                    self.eat(&Token::RBracket)?;
                    Expr::Access { expr: Box::new(expr),
                                   key: Box::new(key),
                                   dot: false,
                                   pos }
                },
                Token::Dot => {
                    let pos = self.advance()?.1;
                    let field = self.eat_name()?;
                    Expr::Access { expr: Box::new(expr),
                                   key: Box::new(Expr::Str { value: field.identifier,
                                                             pos:   field.pos, }),
                                   dot: true,
                                   pos }
                },
                _ => return Ok(expr),
            };
        }
    }

    /// Parses the highest-precedence expressions.
    ///
    /// Grammar:
    /// ```text
    ///     primary := INT | FLOAT | STRING | "true" | "false" | "null" | name
    ///              | "(" expression ")" | list | map_or_set | "func" func_rest
    /// ```
    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let pos = self.pos;
        let expr = match &self.current {
            Token::Int(value) => Expr::Num { value: NumLiteral::Int(*value),
                                             pos },
            Token::Float(value) => Expr::Num { value: NumLiteral::Float(*value),
                                               pos },
            Token::Str(value) => Expr::Str { value: value.clone(),
                                             pos },
            Token::True => Expr::Bool { value: true,
                                        pos },
            Token::False => Expr::Bool { value: false,
                                         pos },
            Token::Null => Expr::Null { pos },
            Token::Identifier(_) => return Ok(Expr::Name(self.eat_name()?)),
            Token::LParen => {
                self.advance()?;
                let expr = self.parse_expression()?;
                self.eat(&Token::RParen)?;
                return Ok(expr);
            },
            Token::LBracket => {
                self.advance()?;
                let exprs = self.parse_delimited(&Token::RBracket)?;
                return Ok(Expr::ListCtor { exprs, pos });
            },
            Token::LBrace => return self.parse_map_or_set(),
            Token::Func => {
                self.advance()?;
                return Ok(Expr::FuncDef(Rc::new(self.parse_func_rest(pos)?)));
            },
            _ => return Err(self.unexpected("expression")),
        };
        self.advance()?;
        Ok(expr)
    }

    /// Parses a brace constructor.
    ///
    /// `{}` is an empty map. The first element decides the form: followed by
    /// `:` it is a map, otherwise a set.
    ///
    /// Grammar:
    /// ```text
    ///     map := "{" expr ":" expr ("," expr ":" expr)* "}"
    ///     set := "{" expr ("," expr)* "}"
    /// ```
    fn parse_map_or_set(&mut self) -> ParseResult<Expr> {
        let pos = self.eat(&Token::LBrace)?;
        if self.eat_if(&Token::RBrace)? {
            return Ok(Expr::MapCtor { keys: Vec::new(),
                                      values: Vec::new(),
                                      pos });
        }

        let first = self.parse_expression()?;
        if !self.eat_if(&Token::Colon)? {
            let mut exprs = vec![first];
            while self.eat_if(&Token::Comma)? {
                exprs.push(self.parse_expression()?);
            }
            self.eat(&Token::RBrace)?;
            return Ok(Expr::SetCtor { exprs, pos });
        }

        let mut keys = vec![first];
        let mut values = vec![self.parse_expression()?];
        while self.eat_if(&Token::Comma)? {
            keys.push(self.parse_expression()?);
            self.eat(&Token::Colon)?;
            values.push(self.parse_expression()?);
        }
        self.eat(&Token::RBrace)?;
        Ok(Expr::MapCtor { keys, values, pos })
    }
}
