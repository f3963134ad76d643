use std::rc::Rc;

use crate::{
    ast::{Expr, Position, Stat},
    interpreter::{
        evaluator::{
            call_stack::{RecordKind, RecordRef},
            core::{EvalResult, Flow, Interpreter},
        },
        value::{
            core::Value,
            map_value::{MapKey, MapValue},
        },
    },
};

impl Interpreter {
    /// Pushes a record whose lookups continue in `outer`.
    pub(crate) fn enter_record(&mut self, name: &str, kind: RecordKind, outer: RecordRef) {
        self.call_stack.push(name, kind, outer);
        if self.config.trace_scopes {
            log::trace!("ENTER: {kind} {name}\n{}", self.call_stack);
        }
    }

    /// Pops the current record.
    pub(crate) fn leave_record(&mut self) {
        if self.config.trace_scopes {
            log::trace!("LEAVE: {}", self.call_stack.current().borrow());
        }
        self.call_stack.pop();
    }

    /// Runs `body` inside a fresh record nested in the current one.
    ///
    /// The record is popped whether `body` succeeds or not.
    pub(crate) fn with_record<T>(&mut self,
                                 name: &str,
                                 kind: RecordKind,
                                 body: impl FnOnce(&mut Self) -> EvalResult<T>)
                                 -> EvalResult<T> {
        let outer = Rc::clone(self.call_stack.current());
        self.enter_record(name, kind, outer);
        let result = body(self);
        self.leave_record();
        result
    }

    /// Executes a `{ ... }` block in its own record.
    pub(crate) fn exec_block(&mut self, stats: &[Stat]) -> EvalResult<Flow> {
        self.with_record("block", RecordKind::Block, |this| this.exec_stats(stats))
    }

    /// Evaluates a map constructor.
    ///
    /// Keys and values are evaluated pairwise, left to right. A repeated key
    /// keeps its first position and takes the last value.
    pub(crate) fn eval_map_ctor(&mut self, keys: &[Expr], values: &[Expr], pos: Position) -> EvalResult<Value> {
        let mut map = MapValue::new();
        for (key, value) in keys.iter().zip(values) {
            let key = MapKey::from_value(&self.eval(key)?, key.position())?;
            let value = self.eval(value)?;
            map.insert(key, value);
        }
        log::trace!("map constructed at {pos} with {} entries", map.len());
        Ok(map.into())
    }

    /// Evaluates a set constructor `{a, b}`.
    ///
    /// Sets are maps whose values are all `true`.
    pub(crate) fn eval_set_ctor(&mut self, exprs: &[Expr], pos: Position) -> EvalResult<Value> {
        let mut map = MapValue::new();
        for expr in exprs {
            let key = MapKey::from_value(&self.eval(expr)?, expr.position())?;
            map.insert(key, Value::Bool(true));
        }
        log::trace!("set constructed at {pos} with {} elements", map.len());
        Ok(map.into())
    }
}
