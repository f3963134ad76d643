use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::{Expr, Name, Position, Stat},
    error::InterpreterError,
    interpreter::{
        evaluator::{
            call_stack::RecordKind,
            core::{EvalResult, Flow, Interpreter},
            statement::after_iteration,
        },
        value::{
            core::Value,
            map_value::{MapKey, MapValue},
        },
    },
    util::num::usize_to_i64_checked,
};

/// The values taken by a numeric `for` variable.
///
/// The stop value is inclusive. A positive step counts up while the counter
/// is at most `stop`; a negative step counts down while it is at least
/// `stop`.
#[derive(Debug, Clone, Copy)]
enum Counter {
    Int {
        next: Option<i64>,
        stop: i64,
        step: i64,
    },
    Float {
        next: f64,
        stop: f64,
        step: f64,
    },
}

impl Counter {
    fn new(start: &Value, stop: &Value, step: &Value, pos: Position) -> EvalResult<Self> {
        if let (Value::Int(start), Value::Int(stop), Value::Int(step)) = (start, stop, step) {
            if *step == 0 {
                return Err(step_is_zero(pos));
            }
            return Ok(Self::Int { next: Some(*start),
                                  stop: *stop,
                                  step: *step, });
        }

        let step = step.as_float(pos)?;
        if step == 0.0 {
            return Err(step_is_zero(pos));
        }
        Ok(Self::Float { next: start.as_float(pos)?,
                         stop: stop.as_float(pos)?,
                         step })
    }
}

impl Iterator for Counter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        match self {
            Self::Int { next, stop, step } => {
                let current = (*next)?;
                if (*step > 0 && current > *stop) || (*step < 0 && current < *stop) {
                    return None;
                }
                // On overflow the next value would be past any i64 stop.
                *next = current.checked_add(*step);
                Some(Value::Int(current))
            },
            Self::Float { next, stop, step } => {
                let current = *next;
                if (*step > 0.0 && current > *stop) || (*step < 0.0 && current < *stop) {
                    return None;
                }
                *next += *step;
                Some(Value::Float(current))
            },
        }
    }
}

fn step_is_zero(pos: Position) -> InterpreterError {
    InterpreterError::ValueError { details: "for loop step must not be zero".to_string(),
                                   pos }
}

/// A frozen view of the iterated value, taken before the first iteration.
///
/// Elements appended to a list or keys added to a map during the loop are
/// not visited. Map values are read when their key is reached.
enum Snapshot {
    List(Vec<Value>),
    Map(Rc<RefCell<MapValue>>, Rc<[MapKey]>),
    Str(Vec<char>),
}

impl Snapshot {
    fn take(iterable: &Value, pos: Position) -> EvalResult<Self> {
        match iterable {
            Value::List(list) => Ok(Self::List(list.borrow().clone())),
            Value::Map(map) => {
                let keys = map.borrow_mut().keys();
                Ok(Self::Map(Rc::clone(map), keys))
            },
            Value::Str(s) => Ok(Self::Str(s.chars().collect())),
            _ => Err(InterpreterError::TypeError { details: format!("value of type `{}` is not iterable",
                                                                    iterable.type_name()),
                                                   pos }),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::List(items) => items.len(),
            Self::Map(_, keys) => keys.len(),
            Self::Str(chars) => chars.len(),
        }
    }

    /// Returns the `(key, value)` pair at position `i`.
    ///
    /// For lists and strings the key is the index.
    fn pair(&self, i: usize, pos: Position) -> EvalResult<(Value, Value)> {
        match self {
            Self::List(items) => {
                Ok((Value::Int(usize_to_i64_checked(i, pos)?), items[i].clone()))
            },
            Self::Map(map, keys) => {
                let key = &keys[i];
                let value = map.borrow().get(key).cloned().unwrap_or(Value::Null);
                Ok((key.to_value(), value))
            },
            Self::Str(chars) => {
                Ok((Value::Int(usize_to_i64_checked(i, pos)?), chars[i].to_string().into()))
            },
        }
    }

    /// Returns what a single loop variable is bound to at position `i`: the
    /// element of a list or string, or the key of a map.
    fn single(&self, i: usize) -> Value {
        match self {
            Self::List(items) => items[i].clone(),
            Self::Map(_, keys) => keys[i].to_value(),
            Self::Str(chars) => chars[i].to_string().into(),
        }
    }
}

impl Interpreter {
    /// Executes `for i is start, stop, step: stat`.
    ///
    /// The bounds and step are evaluated once, before the loop record is
    /// entered. The counter is an `int` when all three are ints and a `float`
    /// otherwise. The loop variable is constant for the body; only the loop
    /// itself advances it.
    ///
    /// # Errors
    /// - `TypeError` if a bound or the step is not a number.
    /// - `ValueError` if the step is zero.
    ///
    /// # Example
    /// ```
    /// use toylang::{
    ///     config::Config,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    ///     parse,
    /// };
    ///
    /// let mut interpreter = Interpreter::new(Config::default());
    /// let program = parse("var total = 0 for i is 10, 1, -3: total += i").unwrap();
    /// interpreter.interpret(&program).unwrap();
    ///
    /// assert_eq!(interpreter.global("total"), Some(Value::Int(10 + 7 + 4 + 1)));
    /// ```
    pub(crate) fn exec_for_loop(&mut self,
                                var: &Name,
                                start: &Expr,
                                stop: &Expr,
                                step: Option<&Expr>,
                                stat: &Stat,
                                pos: Position)
                                -> EvalResult<Flow> {
        let start = self.eval(start)?;
        let stop = self.eval(stop)?;
        let step = match step {
            Some(step) => self.eval(step)?,
            None => Value::Int(1),
        };
        let counter = Counter::new(&start, &stop, &step, pos)?;

        self.with_record("for", RecordKind::Loop, |this| {
                this.call_stack.declare(&var.identifier, Value::Null, true, var.pos)?;
                for value in counter {
                    this.call_stack.set(&var.identifier, value, true, var.pos)?;
                    let flow = this.exec_loop_body(stat)?;
                    if let Some(flow) = after_iteration(flow) {
                        return Ok(flow);
                    }
                }
                Ok(Flow::Normal)
            })
    }

    /// Executes `for k in expr: stat` or `for k, v in expr: stat`.
    ///
    /// With one name a list or string yields its elements and a map yields
    /// its keys in insertion order. With two names the first is bound to the
    /// index or key and the second to the element or value.
    ///
    /// # Errors
    /// `TypeError` if the iterated value is not a list, map or string.
    pub(crate) fn exec_for_each(&mut self,
                                key: &Name,
                                value: Option<&Name>,
                                expr: &Expr,
                                stat: &Stat)
                                -> EvalResult<Flow> {
        let pos = expr.position();
        let snapshot = Snapshot::take(&self.eval(expr)?, pos)?;

        self.with_record("foreach", RecordKind::Loop, |this| {
                this.call_stack.declare(&key.identifier, Value::Null, true, key.pos)?;
                if let Some(value) = value {
                    this.call_stack.declare(&value.identifier, Value::Null, true, value.pos)?;
                }

                for i in 0..snapshot.len() {
                    if let Some(value) = value {
                        let (first, second) = snapshot.pair(i, pos)?;
                        this.call_stack.set(&key.identifier, first, true, key.pos)?;
                        this.call_stack.set(&value.identifier, second, true, value.pos)?;
                    } else {
                        this.call_stack.set(&key.identifier, snapshot.single(i), true, key.pos)?;
                    }

                    let flow = this.exec_loop_body(stat)?;
                    if let Some(flow) = after_iteration(flow) {
                        return Ok(flow);
                    }
                }
                Ok(Flow::Normal)
            })
    }
}
