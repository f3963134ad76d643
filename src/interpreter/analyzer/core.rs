use crate::{
    ast::{Expr, FuncDef, Name, Program, Stat},
    config::Config,
    error::SemanticError,
    interpreter::{
        analyzer::scope::{ScopeSymbolTable, SymbolKind},
        evaluator::function::core::HOST_FUNCTIONS,
        value::core::TYPE_NAMES,
    },
};

pub type AnalyzeResult = Result<(), SemanticError>;

/// Validates scoping rules over a parsed program.
///
/// The analyzer is a pure validation pass: it checks that names are declared
/// before use and not redeclared in the same scope, that only `var` bindings
/// are assigned, and that `break`, `continue` and `return` appear where they
/// make sense. It stops at the first violation, in visitation order.
///
/// The global scope persists between calls to [`SemanticAnalyzer::analyze`],
/// so a REPL can analyze its inputs one at a time. A failed analysis leaves
/// the global scope as it was before the call.
pub struct SemanticAnalyzer {
    scopes: Vec<ScopeSymbolTable>,
    config: Config,
}

impl SemanticAnalyzer {
    /// Creates an analyzer whose global scope holds the built-in type names
    /// and host functions.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let mut global = ScopeSymbolTable::new("global", 0, false, false);
        for name in TYPE_NAMES.iter().chain(HOST_FUNCTIONS.iter().map(|def| &def.name)) {
            global.insert(name, SymbolKind::Builtin);
        }
        Self { scopes: vec![global],
               config }
    }

    /// Declares an additional built-in name, such as a host function
    /// registered by an embedder.
    pub fn declare_builtin(&mut self, name: &str) {
        if let Some(global) = self.scopes.first_mut() {
            global.insert(name, SymbolKind::Builtin);
        }
    }

    /// Analyzes `program` against the persistent global scope.
    ///
    /// # Errors
    /// Returns the first [`SemanticError`] found. The global scope is rolled
    /// back to its state before the call.
    ///
    /// # Example
    /// ```
    /// use toylang::{config::Config, interpreter::analyzer::core::SemanticAnalyzer, parse};
    ///
    /// let mut analyzer = SemanticAnalyzer::new(Config::default());
    ///
    /// assert!(analyzer.analyze(&parse("var x = 1").unwrap()).is_ok());
    /// assert!(analyzer.analyze(&parse("var x = 2").unwrap()).is_err());
    /// assert!(analyzer.analyze(&parse("x = 3").unwrap()).is_ok());
    /// ```
    pub fn analyze(&mut self, program: &Program) -> AnalyzeResult {
        let snapshot = self.scopes.first().cloned();

        let result = program.stats.iter().try_for_each(|stat| self.visit_stat(stat));

        if result.is_err() {
            self.scopes.truncate(1);
            if let Some(global) = snapshot {
                self.scopes[0] = global;
            }
            log::debug!("semantic analysis failed; global scope rolled back");
        }
        result
    }

    fn current(&mut self) -> &mut ScopeSymbolTable {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    fn enter_scope(&mut self, identifier: &'static str, in_loop: Option<bool>, in_function: Option<bool>) {
        let parent = self.current();
        let scope = ScopeSymbolTable::new(identifier,
                                          parent.level + 1,
                                          in_loop.unwrap_or(parent.in_loop),
                                          in_function.unwrap_or(parent.in_function));
        if self.config.trace_scopes {
            log::trace!("enter scope: {} (level {})", scope.identifier, scope.level);
        }
        self.scopes.push(scope);
    }

    fn leave_scope(&mut self) {
        if let Some(scope) = self.scopes.pop()
           && self.config.trace_scopes
        {
            log::trace!("leave scope: {scope}");
        }
    }

    /// Runs `visit` inside a fresh scope, leaving it on success.
    ///
    /// On failure the scope is left in place; `analyze` truncates the stack.
    fn scoped(&mut self,
              identifier: &'static str,
              in_loop: Option<bool>,
              in_function: Option<bool>,
              visit: impl FnOnce(&mut Self) -> AnalyzeResult)
              -> AnalyzeResult {
        self.enter_scope(identifier, in_loop, in_function);
        visit(self)?;
        self.leave_scope();
        Ok(())
    }

    fn declare(&mut self, name: &Name, kind: SymbolKind) -> AnalyzeResult {
        let trace = self.config.trace_scopes;
        let scope = self.current();
        if !scope.insert(&name.identifier, kind) {
            return Err(SemanticError::DuplicateDeclared { name: name.identifier.clone(),
                                                          pos:  name.pos, });
        }
        if trace {
            log::trace!("insert: {} as {kind:?} (scope: {})", name.identifier, scope.identifier);
        }
        Ok(())
    }

    fn lookup(&self, identifier: &str) -> Option<SymbolKind> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.lookup(identifier))
    }

    fn in_loop(&self) -> bool {
        self.scopes.last().is_some_and(|scope| scope.in_loop)
    }

    fn in_function(&self) -> bool {
        self.scopes.last().is_some_and(|scope| scope.in_function)
    }

    fn visit_stats(&mut self, stats: &[Stat]) -> AnalyzeResult {
        stats.iter().try_for_each(|stat| self.visit_stat(stat))
    }

    fn visit_stat(&mut self, stat: &Stat) -> AnalyzeResult {
        match stat {
            Stat::Block { stats, .. } => self.scoped("block", None, None, |this| this.visit_stats(stats)),
            Stat::VarDecl { names,
                            exprs,
                            constant,
                            .. } => {
                let kind = if *constant { SymbolKind::Const } else { SymbolKind::Var };
                for name in names {
                    self.declare(name, kind)?;
                }
                exprs.iter().try_for_each(|expr| self.visit_expr(expr))
            },
            Stat::If { conds, stats, .. } => {
                for (cond, stat) in conds.iter().zip(stats) {
                    self.visit_expr(cond)?;
                    self.visit_stat(stat)?;
                }
                Ok(())
            },
            Stat::Switch { expr,
                           cases,
                           stats,
                           default,
                           .. } => {
                self.visit_expr(expr)?;
                for (case, stat) in cases.iter().zip(stats) {
                    self.visit_expr(case)?;
                    self.visit_stat(stat)?;
                }
                default.as_deref().map_or(Ok(()), |stat| self.visit_stat(stat))
            },
            Stat::Repeat { stat, cond, .. } => self.scoped("loop", Some(true), None, |this| {
                                                       this.visit_loop_body(stat)?;
                                                       this.visit_expr(cond)
                                                   }),
            Stat::While { cond, stat, .. } => {
                self.visit_expr(cond)?;
                self.scoped("loop", Some(true), None, |this| this.visit_loop_body(stat))
            },
            Stat::ForLoop { var,
                            start,
                            stop,
                            step,
                            stat,
                            .. } => {
                self.visit_expr(start)?;
                self.visit_expr(stop)?;
                if let Some(step) = step {
                    self.visit_expr(step)?;
                }
                self.scoped("loop", Some(true), None, |this| {
                        this.declare(var, SymbolKind::Name)?;
                        this.visit_loop_body(stat)
                    })
            },
            Stat::ForEach { key,
                            value,
                            expr,
                            stat,
                            .. } => {
                self.visit_expr(expr)?;
                self.scoped("loop", Some(true), None, |this| {
                        this.declare(key, SymbolKind::Name)?;
                        if let Some(value) = value {
                            this.declare(value, SymbolKind::Name)?;
                        }
                        this.visit_loop_body(stat)
                    })
            },
            Stat::Break { pos } => {
                if self.in_loop() {
                    Ok(())
                } else {
                    Err(SemanticError::BreakOutsideLoop { pos: *pos })
                }
            },
            Stat::Continue { pos } => {
                if self.in_loop() {
                    Ok(())
                } else {
                    Err(SemanticError::ContinueOutsideLoop { pos: *pos })
                }
            },
            Stat::Return { expr, pos } => {
                if !self.in_function() {
                    return Err(SemanticError::ReturnOutsideFunction { pos: *pos });
                }
                expr.as_ref().map_or(Ok(()), |expr| self.visit_expr(expr))
            },
            Stat::Assign { targets, exprs, .. } => {
                targets.iter().try_for_each(|target| self.visit_target(target))?;
                exprs.iter().try_for_each(|expr| self.visit_expr(expr))
            },
            Stat::CompoundAssign { target, expr, .. } => {
                self.visit_target(target)?;
                self.visit_expr(expr)
            },
            Stat::Call { call, .. } => self.visit_expr(call),
        }
    }

    /// Checks a loop body. A body that is not a block still gets a scope of
    /// its own, so its declarations are not visible to an `until` condition.
    fn visit_loop_body(&mut self, stat: &Stat) -> AnalyzeResult {
        match stat {
            Stat::Block { .. } => self.visit_stat(stat),
            _ => self.scoped("body", None, None, |this| this.visit_stat(stat)),
        }
    }

    /// Checks an assignment target.
    ///
    /// A bare name must resolve to a `var` binding; an access chain only needs
    /// its parts to be declared.
    fn visit_target(&mut self, target: &Expr) -> AnalyzeResult {
        let Expr::Name(name) = target else {
            return self.visit_expr(target);
        };
        match self.lookup(&name.identifier) {
            None => Err(SemanticError::NameNotDeclared { name: name.identifier.clone(),
                                                         pos:  name.pos, }),
            Some(kind) if !kind.is_assignable() => {
                Err(SemanticError::NotAssignable { name: name.identifier.clone(),
                                                   pos:  name.pos, })
            },
            Some(_) => Ok(()),
        }
    }

    fn visit_func(&mut self, def: &FuncDef) -> AnalyzeResult {
        self.scoped("function", Some(false), Some(true), |this| {
                for param in def.params.iter().chain(&def.vararg) {
                    this.declare(param, SymbolKind::Var)?;
                }
                this.visit_stats(&def.body)
            })
    }

    fn visit_expr(&mut self, expr: &Expr) -> AnalyzeResult {
        match expr {
            Expr::FuncDef(def) => self.visit_func(def),
            Expr::FuncCall { callee, args, .. } => {
                self.visit_expr(callee)?;
                args.iter().try_for_each(|arg| self.visit_expr(arg))
            },
            Expr::Select { cond,
                           then,
                           otherwise,
                           .. } => {
                self.visit_expr(cond)?;
                self.visit_expr(then)?;
                self.visit_expr(otherwise)
            },
            Expr::BinOp { left, right, .. } => {
                self.visit_expr(left)?;
                self.visit_expr(right)
            },
            Expr::UniOp { expr, .. } => self.visit_expr(expr),
            Expr::ListCtor { exprs, .. } | Expr::SetCtor { exprs, .. } => {
                exprs.iter().try_for_each(|expr| self.visit_expr(expr))
            },
            Expr::MapCtor { keys, values, .. } => {
                for (key, value) in keys.iter().zip(values) {
                    self.visit_expr(key)?;
                    self.visit_expr(value)?;
                }
                Ok(())
            },
            Expr::Access { expr, key, .. } => {
                self.visit_expr(expr)?;
                self.visit_expr(key)
            },
            Expr::Name(name) => {
                if self.lookup(&name.identifier).is_none() {
                    return Err(SemanticError::NameNotDeclared { name: name.identifier.clone(),
                                                                pos:  name.pos, });
                }
                Ok(())
            },
            Expr::Num { .. } | Expr::Str { .. } | Expr::Bool { .. } | Expr::Null { .. } => Ok(()),
        }
    }
}
