use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, Parser},
            utils::binary_operator,
        },
    },
};

impl Parser<'_> {
    /// Parses a full expression.
    ///
    /// This is the entry point for expression parsing.
    /// It begins at the lowest-precedence level, ternary select, and
    /// recursively descends through the precedence hierarchy.
    ///
    /// Grammar: `expression := select`
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_select()
    }

    /// Parses a comma-separated, non-empty expression list.
    ///
    /// Grammar: `expr_list := expr ("," expr)*`
    pub(super) fn parse_expr_list(&mut self) -> ParseResult<Vec<Expr>> {
        let mut exprs = vec![self.parse_expression()?];
        while self.eat_if(&Token::Comma)? {
            exprs.push(self.parse_expression()?);
        }
        Ok(exprs)
    }

    /// Parses a ternary select.
    ///
    /// Grammar: `select := logical_or ("?" expression ":" expression)?`
    fn parse_select(&mut self) -> ParseResult<Expr> {
        let cond = self.parse_logical_or()?;
        if !self.check(&Token::Query) {
            return Ok(cond);
        }
        let pos = self.advance()?.1;
        let then = self.parse_expression()?;
        self.eat(&Token::Colon)?;
        let otherwise = self.parse_expression()?;
        Ok(Expr::Select { cond: Box::new(cond),
                          then: Box::new(then),
                          otherwise: Box::new(otherwise),
                          pos })
    }

    /// Parses one left-associative precedence level.
    ///
    /// Repeatedly applies any operator in `ops` between operands produced by
    /// `next`.
    ///
    /// # Parameters
    /// - `ops`: Operators accepted at this level.
    /// - `next`: Parser for the next-higher precedence level.
    fn parse_left_assoc(&mut self,
                        ops: &[BinaryOperator],
                        next: fn(&mut Self) -> ParseResult<Expr>)
                        -> ParseResult<Expr> {
        let mut left = next(self)?;
        while let Some(op) = binary_operator(&self.current)
              && ops.contains(&op)
        {
            let pos = self.advance()?.1;
            let right = next(self)?;
            left = Expr::BinOp { op,
                                 left: Box::new(left),
                                 right: Box::new(right),
                                 pos };
        }
        Ok(left)
    }

    /// Grammar: `logical_or := logical_and ("or" logical_and)*`
    fn parse_logical_or(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(&[BinaryOperator::Or], Self::parse_logical_and)
    }

    /// Grammar: `logical_and := membership ("and" membership)*`
    fn parse_logical_and(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(&[BinaryOperator::And], Self::parse_membership)
    }

    /// Grammar: `membership := relational (("in" | "is") relational)*`
    fn parse_membership(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(&[BinaryOperator::In, BinaryOperator::Is],
                              Self::parse_relational)
    }

    /// Parses a comparison.
    ///
    /// Relational operators do not chain: `a < b < c` stops after `a < b`
    /// and leaves `<` for the caller to reject.
    ///
    /// Grammar: `relational := bit_or (("==" | "!=" | "<" | "<=" | ">" | ">=") bit_or)?`
    fn parse_relational(&mut self) -> ParseResult<Expr> {
        let left = self.parse_bit_or()?;
        if let Some(op) = binary_operator(&self.current)
           && matches!(op,
                       BinaryOperator::Equal
                       | BinaryOperator::NotEqual
                       | BinaryOperator::Less
                       | BinaryOperator::LessEqual
                       | BinaryOperator::Greater
                       | BinaryOperator::GreaterEqual)
        {
            let pos = self.advance()?.1;
            let right = self.parse_bit_or()?;
            return Ok(Expr::BinOp { op,
                                    left: Box::new(left),
                                    right: Box::new(right),
                                    pos });
        }
        Ok(left)
    }

    /// Grammar: `bit_or := bit_xor ("|" bit_xor)*`
    fn parse_bit_or(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(&[BinaryOperator::BitOr], Self::parse_bit_xor)
    }

    /// Grammar: `bit_xor := bit_and ("^" bit_and)*`
    fn parse_bit_xor(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(&[BinaryOperator::BitXor], Self::parse_bit_and)
    }

    /// Grammar: `bit_and := shift ("&" shift)*`
    fn parse_bit_and(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(&[BinaryOperator::BitAnd], Self::parse_shift)
    }

    /// Grammar: `shift := additive (("<<" | ">>") additive)*`
    fn parse_shift(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(&[BinaryOperator::Shl, BinaryOperator::Shr],
                              Self::parse_additive)
    }

    /// Parses addition and subtraction expressions.
    ///
    /// Grammar: `additive := multiplicative (("+" | "-") multiplicative)*`
    fn parse_additive(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(&[BinaryOperator::Add, BinaryOperator::Sub],
                              Self::parse_multiplicative)
    }

    /// Parses multiplication-level expressions.
    ///
    /// Grammar: `multiplicative := unary (("*" | "/" | "%") unary)*`
    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(&[BinaryOperator::Mul, BinaryOperator::Div, BinaryOperator::Mod],
                              Self::parse_unary)
    }
}
