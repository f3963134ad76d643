use crate::{
    ast::{BinaryOperator, Expr, Name, Position, Stat},
    error::InterpreterError,
    interpreter::{
        evaluator::{
            call_stack::RecordKind,
            core::{EvalResult, Flow, Interpreter},
        },
        value::core::Value,
    },
};

/// Decides what a loop does once its body finished with `flow`.
///
/// # Returns
/// `None` to go on with the next iteration, or the flow the loop statement
/// itself finishes with.
pub(crate) fn after_iteration(flow: Flow) -> Option<Flow> {
    match flow {
        Flow::Normal | Flow::Continue(_) => None,
        Flow::Break(_) => Some(Flow::Normal),
        ret @ Flow::Return(..) => Some(ret),
    }
}

impl Interpreter {
    /// Executes a `var` or `const` declaration.
    ///
    /// All initializers are evaluated first, then the names are declared in
    /// the current record. Names without an initializer are bound to `null`;
    /// surplus initializers are evaluated and dropped.
    pub(crate) fn exec_var_decl(&mut self,
                                names: &[Name],
                                exprs: &[Expr],
                                constant: bool,
                                pos: Position)
                                -> EvalResult<Flow> {
        let values = self.eval_all(exprs)?;
        if values.len() > names.len() {
            log::debug!("{pos}: {} surplus initializer(s) ignored", values.len() - names.len());
        }

        let mut values = values.into_iter();
        for name in names {
            let value = values.next().unwrap_or(Value::Null);
            self.call_stack.declare(&name.identifier, value, constant, name.pos)?;
        }
        Ok(Flow::Normal)
    }

    /// Executes `a, b[i] = x, y`.
    ///
    /// Every right-hand side is evaluated before the first target is written,
    /// so `a, b = b, a` swaps. Targets without a value receive `null`.
    pub(crate) fn exec_assign(&mut self, targets: &[Expr], exprs: &[Expr]) -> EvalResult<()> {
        let mut values = self.eval_all(exprs)?.into_iter();
        for target in targets {
            let value = values.next().unwrap_or(Value::Null);
            self.assign_to(target, value)?;
        }
        Ok(())
    }

    /// Executes `target op= expr`.
    ///
    /// For an access target the container and key are evaluated once.
    pub(crate) fn exec_compound_assign(&mut self,
                                       op: BinaryOperator,
                                       target: &Expr,
                                       expr: &Expr,
                                       pos: Position)
                                       -> EvalResult<()> {
        match target {
            Expr::Name(name) => {
                let old = self.call_stack.get(&name.identifier, name.pos)?;
                let rhs = self.eval(expr)?;
                let new = Self::apply_binary(op, &old, &rhs, pos)?;
                self.call_stack.set(&name.identifier, new, false, name.pos)
            },
            Expr::Access { expr: container,
                           key,
                           pos: access_pos,
                           .. } => {
                let container = self.eval(container)?;
                let key = self.eval(key)?;
                let old = Self::get_member(&container, &key, *access_pos)?;
                let rhs = self.eval(expr)?;
                let new = Self::apply_binary(op, &old, &rhs, pos)?;
                Self::set_member(&container, &key, new, *access_pos)
            },
            _ => Err(not_assignable(target)),
        }
    }

    /// Writes `value` to an assignment target.
    fn assign_to(&mut self, target: &Expr, value: Value) -> EvalResult<()> {
        match target {
            Expr::Name(name) => self.call_stack.set(&name.identifier, value, false, name.pos),
            Expr::Access { expr, key, pos, .. } => {
                let container = self.eval(expr)?;
                let key = self.eval(key)?;
                Self::set_member(&container, &key, value, *pos)
            },
            _ => Err(not_assignable(target)),
        }
    }

    /// Runs the first branch whose condition holds.
    pub(crate) fn exec_if(&mut self, conds: &[Expr], stats: &[Stat]) -> EvalResult<Flow> {
        for (cond, stat) in conds.iter().zip(stats) {
            if self.eval(cond)?.to_bool(cond.position())? {
                return self.exec_stat(stat);
            }
        }
        Ok(Flow::Normal)
    }

    /// Runs the first case equal to the scrutinee, or the default.
    ///
    /// Case expressions are evaluated in order until one matches. There is no
    /// fall-through.
    pub(crate) fn exec_switch(&mut self,
                              expr: &Expr,
                              cases: &[Expr],
                              stats: &[Stat],
                              default: Option<&Stat>)
                              -> EvalResult<Flow> {
        let value = self.eval(expr)?;
        for (case, stat) in cases.iter().zip(stats) {
            if value.equals(&self.eval(case)?) {
                return self.exec_stat(stat);
            }
        }
        default.map_or(Ok(Flow::Normal), |stat| self.exec_stat(stat))
    }

    /// Executes `while cond: stat`.
    pub(crate) fn exec_while(&mut self, cond: &Expr, stat: &Stat) -> EvalResult<Flow> {
        self.with_record("while", RecordKind::Loop, |this| {
                while this.eval(cond)?.to_bool(cond.position())? {
                    let flow = this.exec_loop_body(stat)?;
                    if let Some(flow) = after_iteration(flow) {
                        return Ok(flow);
                    }
                }
                Ok(Flow::Normal)
            })
    }

    /// Executes `repeat stat until cond`.
    ///
    /// The body runs at least once; the loop ends after the first iteration
    /// whose condition holds. `continue` jumps to the condition.
    pub(crate) fn exec_repeat(&mut self, stat: &Stat, cond: &Expr) -> EvalResult<Flow> {
        self.with_record("repeat", RecordKind::Loop, |this| {
                loop {
                    let flow = this.exec_loop_body(stat)?;
                    if let Some(flow) = after_iteration(flow) {
                        return Ok(flow);
                    }
                    if this.eval(cond)?.to_bool(cond.position())? {
                        return Ok(Flow::Normal);
                    }
                }
            })
    }

    /// Runs one iteration of a loop body.
    ///
    /// A block already gets a record of its own; any other statement is given
    /// one so that declarations do not pile up in the loop record.
    pub(crate) fn exec_loop_body(&mut self, stat: &Stat) -> EvalResult<Flow> {
        match stat {
            Stat::Block { .. } => self.exec_stat(stat),
            _ => self.with_record("body", RecordKind::Block, |this| this.exec_stat(stat)),
        }
    }

    /// Evaluates expressions left to right.
    pub(crate) fn eval_all(&mut self, exprs: &[Expr]) -> EvalResult<Vec<Value>> {
        exprs.iter().map(|expr| self.eval(expr)).collect()
    }
}

fn not_assignable(target: &Expr) -> InterpreterError {
    InterpreterError::TypeError { details: "expression is not assignable".to_string(),
                                  pos:     target.position(), }
}
