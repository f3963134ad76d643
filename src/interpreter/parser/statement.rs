use std::rc::Rc;

use crate::{
    ast::{Expr, FuncDef, Name, Position, Stat},
    error::ParserError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, Parser},
            utils::{compound_operator, starts_command_argument, starts_expression},
        },
    },
};

impl Parser<'_> {
    /// Parses statements until `}` or the end of input.
    ///
    /// Grammar: `stat_list := stat*`
    pub(super) fn parse_stat_list(&mut self) -> ParseResult<Vec<Stat>> {
        let mut stats = Vec::new();
        while !matches!(self.current, Token::RBrace | Token::Eof) {
            if let Some(stat) = self.parse_statement()? {
                stats.push(stat);
            }
        }
        Ok(stats)
    }

    /// Parses a single statement.
    ///
    /// # Returns
    /// `None` for the empty statement `;`.
    ///
    /// # Errors
    /// [`ParserError::InvalidStatement`] when the current token cannot start
    /// a statement.
    pub(super) fn parse_statement(&mut self) -> ParseResult<Option<Stat>> {
        let stat = match self.current {
            Token::Semi => {
                self.advance()?;
                return Ok(None);
            },
            Token::LBrace => self.parse_block()?,
            Token::Var | Token::Const => self.parse_var_decl()?,
            Token::If => self.parse_if()?,
            Token::Switch => self.parse_switch()?,
            Token::Repeat => self.parse_repeat()?,
            Token::While => self.parse_while()?,
            Token::For => self.parse_for()?,
            Token::Break => Stat::Break { pos: self.advance()?.1 },
            Token::Continue => Stat::Continue { pos: self.advance()?.1 },
            Token::Return => self.parse_return()?,
            Token::Func => self.parse_func_stat()?,
            Token::Identifier(_) | Token::LParen => {
                let first = self.parse_postfix()?;
                self.parse_expr_stat(first)?
            },
            _ => {
                return Err(ParserError::InvalidStatement { found: self.current.to_string(),
                                                           pos:   self.pos, });
            },
        };
        Ok(Some(stat))
    }

    /// Parses the body following a control-statement header.
    ///
    /// An optional `:` is accepted; a following `{` always starts a block.
    fn parse_body(&mut self) -> ParseResult<Box<Stat>> {
        self.eat_if(&Token::Colon)?;
        let pos = self.pos;
        let stat = self.parse_statement()?
                       .unwrap_or(Stat::Block { stats: Vec::new(),
                                                pos });
        Ok(Box::new(stat))
    }

    /// Grammar: `block := "{" stat* "}"`
    pub(super) fn parse_block(&mut self) -> ParseResult<Stat> {
        let pos = self.eat(&Token::LBrace)?;
        let stats = self.parse_stat_list()?;
        self.eat(&Token::RBrace)?;
        Ok(Stat::Block { stats, pos })
    }

    /// Grammar: `var_decl := ("var" | "const") name ("," name)* ("=" expr_list)?`
    fn parse_var_decl(&mut self) -> ParseResult<Stat> {
        let (keyword, pos) = self.advance()?;
        let mut names = vec![self.eat_name()?];
        while self.eat_if(&Token::Comma)? {
            names.push(self.eat_name()?);
        }
        let exprs = if self.eat_if(&Token::Equals)? {
            self.parse_expr_list()?
        } else {
            Vec::new()
        };
        Ok(Stat::VarDecl { names,
                           exprs,
                           constant: keyword == Token::Const,
                           pos })
    }

    /// Parses `if` with any number of `elif` branches and an optional `else`.
    ///
    /// Grammar:
    /// ```text
    ///     if_stat := "if" expr ":"? stat ("elif" expr ":"? stat)* ("else" ":"? stat)?
    /// ```
    /// `else` is stored as a final branch whose condition is the literal
    /// `true`.
    fn parse_if(&mut self) -> ParseResult<Stat> {
        let pos = self.eat(&Token::If)?;
        let mut conds = vec![self.parse_expression()?];
        let mut stats = vec![*self.parse_body()?];

        while self.eat_if(&Token::Elif)? {
            conds.push(self.parse_expression()?);
            stats.push(*self.parse_body()?);
        }

        if self.check(&Token::Else) {
            let else_pos = self.advance()?.1;
            conds.push(Expr::Bool { value: true,
                                    pos:   else_pos, });
            stats.push(*self.parse_body()?);
        }

        Ok(Stat::If { conds, stats, pos })
    }

    /// Grammar:
    /// ```text
    ///     switch_stat := "switch" expr ":"? ("case" expr ":"? stat)+ ("default" ":"? stat)?
    /// ```
    fn parse_switch(&mut self) -> ParseResult<Stat> {
        let pos = self.eat(&Token::Switch)?;
        let expr = self.parse_expression()?;
        self.eat_if(&Token::Colon)?;

        let mut cases = Vec::new();
        let mut stats = Vec::new();
        loop {
            self.eat(&Token::Case)?;
            cases.push(self.parse_expression()?);
            stats.push(*self.parse_body()?);
            if !self.check(&Token::Case) {
                break;
            }
        }

        let default = if self.eat_if(&Token::Default)? {
            Some(self.parse_body()?)
        } else {
            None
        };

        Ok(Stat::Switch { expr,
                          cases,
                          stats,
                          default,
                          pos })
    }

    /// Grammar: `repeat_stat := "repeat" ":"? stat "until" expr`
    fn parse_repeat(&mut self) -> ParseResult<Stat> {
        let pos = self.eat(&Token::Repeat)?;
        let stat = self.parse_body()?;
        self.eat(&Token::Until)?;
        let cond = self.parse_expression()?;
        Ok(Stat::Repeat { stat, cond, pos })
    }

    /// Grammar: `while_stat := "while" expr ":"? stat`
    fn parse_while(&mut self) -> ParseResult<Stat> {
        let pos = self.eat(&Token::While)?;
        let cond = self.parse_expression()?;
        let stat = self.parse_body()?;
        Ok(Stat::While { cond, stat, pos })
    }

    /// Parses either loop form introduced by `for`.
    ///
    /// Grammar:
    /// ```text
    ///     forloop_stat := "for" name "is" expr "," expr ("," expr)? ":"? stat
    ///     foreach_stat := "for" name ("," name)? "in" expr ":"? stat
    /// ```
    fn parse_for(&mut self) -> ParseResult<Stat> {
        let pos = self.eat(&Token::For)?;
        let var = self.eat_name()?;

        if self.eat_if(&Token::Is)? {
            let start = self.parse_expression()?;
            self.eat(&Token::Comma)?;
            let stop = self.parse_expression()?;
            let step = if self.eat_if(&Token::Comma)? {
                Some(self.parse_expression()?)
            } else {
                None
            };
            let stat = self.parse_body()?;
            return Ok(Stat::ForLoop { var,
                                      start,
                                      stop,
                                      step,
                                      stat,
                                      pos });
        }

        let value = if self.eat_if(&Token::Comma)? {
            Some(self.eat_name()?)
        } else {
            None
        };
        if !self.check(&Token::In) {
            return Err(self.unexpected("in` or `is"));
        }
        self.advance()?;
        let expr = self.parse_expression()?;
        let stat = self.parse_body()?;
        Ok(Stat::ForEach { key: var,
                           value,
                           expr,
                           stat,
                           pos })
    }

    /// Grammar: `return_stat := "return" expr?`
    ///
    /// The expression is omitted when the next token cannot start one.
    fn parse_return(&mut self) -> ParseResult<Stat> {
        let pos = self.eat(&Token::Return)?;
        let expr = if starts_expression(&self.current) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        Ok(Stat::Return { expr, pos })
    }

    /// Parses a statement starting with `func`.
    ///
    /// `func name(...) {...}` desugars to `const name = func(...) {...}`. An
    /// anonymous literal may start a call statement, as in `func() {...}()`.
    fn parse_func_stat(&mut self) -> ParseResult<Stat> {
        let pos = self.eat(&Token::Func)?;

        if let Token::Identifier(_) = self.current {
            let name = self.eat_name()?;
            let def = self.parse_func_rest(pos)?;
            return Ok(Stat::VarDecl { names: vec![name],
                                      exprs: vec![Expr::FuncDef(Rc::new(def))],
                                      constant: true,
                                      pos });
        }

        let literal = Expr::FuncDef(Rc::new(self.parse_func_rest(pos)?));
        let first = self.parse_postfix_tail(literal)?;
        self.parse_expr_stat(first)
    }

    /// Finishes a statement whose leading postfix expression is `first`.
    ///
    /// Grammar:
    /// ```text
    ///     assign_stat         := lvalue ("," lvalue)* "=" expr_list
    ///     compoundassign_stat := lvalue compound_op expr
    ///     call_stat           := call | name expr_list
    /// ```
    ///
    /// # Errors
    /// - [`ParserError::InvalidAssignTarget`] if a target is not an lvalue.
    /// - [`ParserError::NotAStatement`] if the expression is neither assigned
    ///   nor a call.
    fn parse_expr_stat(&mut self, first: Expr) -> ParseResult<Stat> {
        let pos = first.position();

        if matches!(first, Expr::Name(_)) && starts_command_argument(&self.current) {
            let args = self.parse_expr_list()?;
            return Ok(Stat::Call { call: Expr::FuncCall { callee: Box::new(first),
                                                          args,
                                                          pos },
                                   pos });
        }

        if matches!(self.current, Token::Comma | Token::Equals) {
            let mut targets = vec![first];
            while self.eat_if(&Token::Comma)? {
                targets.push(self.parse_postfix()?);
            }
            if let Some(target) = targets.iter().find(|target| !target.is_lvalue()) {
                return Err(ParserError::InvalidAssignTarget { pos: target.position() });
            }
            let assign_pos = self.eat(&Token::Equals)?;
            let exprs = self.parse_expr_list()?;
            return Ok(Stat::Assign { targets,
                                     exprs,
                                     pos: assign_pos });
        }

        if let Some(op) = compound_operator(&self.current) {
            if !first.is_lvalue() {
                return Err(ParserError::InvalidAssignTarget { pos });
            }
            let op_pos = self.advance()?.1;
            let expr = self.parse_expression()?;
            return Ok(Stat::CompoundAssign { op,
                                             target: first,
                                             expr,
                                             pos: op_pos });
        }

        if matches!(first, Expr::FuncCall { .. }) {
            return Ok(Stat::Call { call: first, pos });
        }
        Err(ParserError::NotAStatement { pos })
    }

    /// Parses a function's parameter list and body, after `func` and the
    /// optional name.
    ///
    /// Grammar:
    /// ```text
    ///     func_rest := "(" (name ("," name)* ("," "..." name)? | "..." name)? ")" block
    /// ```
    pub(super) fn parse_func_rest(&mut self, pos: Position) -> ParseResult<FuncDef> {
        self.eat(&Token::LParen)?;
        let mut params: Vec<Name> = Vec::new();
        let mut vararg = None;

        if !self.check(&Token::RParen) {
            loop {
                if self.eat_if(&Token::Ellipsis)? {
                    vararg = Some(self.eat_name()?);
                    break;
                }
                params.push(self.eat_name()?);
                if !self.eat_if(&Token::Comma)? {
                    break;
                }
            }
        }
        self.eat(&Token::RParen)?;

        self.eat(&Token::LBrace)?;
        let body = self.parse_stat_list()?;
        self.eat(&Token::RBrace)?;

        Ok(FuncDef { params,
                     vararg,
                     body,
                     pos })
    }
}
