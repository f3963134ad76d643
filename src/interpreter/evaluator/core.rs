use std::rc::Rc;

use crate::{
    ast::{Expr, NumLiteral, Position, Program, Stat},
    config::Config,
    error::InterpreterError,
    interpreter::{
        evaluator::{
            call_stack::{CallStack, RecordKind},
            console::Console,
            function::core::HOST_FUNCTIONS,
        },
        value::{
            core::{TYPE_NAMES, Value},
            function::{Arity, FunctionValue, HostFn, HostFunctionDef},
        },
    },
};

/// Remaining native stack below which evaluation switches to a new segment.
const STACK_RED_ZONE: usize = 128 * 1024;
/// Size of each stack segment allocated for deep recursion.
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `InterpreterError` describing the failure.
pub type EvalResult<T> = Result<T, InterpreterError>;

/// How a statement finished.
///
/// Every statement execution returns a `Flow`. Blocks stop at the first
/// non-`Normal` flow and hand it upward; loops consume `Break` and
/// `Continue`; function calls consume `Return`.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Continue with the next statement.
    Normal,
    /// A `break` is looking for its loop.
    Break(Position),
    /// A `continue` is looking for its loop.
    Continue(Position),
    /// A `return` is looking for its function, carrying the result.
    Return(Value, Position),
}

/// A tree-walking interpreter.
///
/// Holds the call stack, whose global record persists across calls to
/// [`Interpreter::interpret`], the console used by host functions, and the
/// tracing configuration.
pub struct Interpreter {
    pub(crate) call_stack: CallStack,
    pub(crate) console:    Console,
    pub(crate) config:     Config,
}

impl Interpreter {
    /// Creates an interpreter using the process's standard streams.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_console(config, Console::stdio())
    }

    /// Creates an interpreter using the given console.
    ///
    /// The global record is populated with the type tokens and the host
    /// functions.
    #[must_use]
    pub fn with_console(config: Config, console: Console) -> Self {
        let interpreter = Self { call_stack: CallStack::new(),
                                 console,
                                 config };

        let global = interpreter.call_stack.global();
        let mut global = global.borrow_mut();
        for name in TYPE_NAMES {
            global.bind_builtin(name, Value::Type((*name).into()));
        }
        for def in HOST_FUNCTIONS {
            global.bind_builtin(def.name, Value::HostFunction(Rc::new(*def)));
        }
        drop(global);

        interpreter
    }

    /// Binds an additional host function in the global record.
    ///
    /// The function is constant and callable like the built-in ones. A
    /// semantic analyzer used alongside must be told about the name too.
    pub fn register_host(&mut self, name: &'static str, arity: Arity, func: HostFn) {
        let def = HostFunctionDef { name, arity, func };
        self.call_stack
            .global()
            .borrow_mut()
            .bind_builtin(name, Value::HostFunction(Rc::new(def)));
    }

    /// Returns the call stack, for inspection.
    #[must_use]
    pub const fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    /// Looks up a global binding.
    #[must_use]
    pub fn global(&self, name: &str) -> Option<Value> {
        self.call_stack.global().borrow().get_local(name)
    }

    /// Executes a program in the global record.
    ///
    /// # Errors
    /// Returns the first `InterpreterError`. The call stack is unwound back
    /// to the global record, so the interpreter stays usable.
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
    /// interpreter.interpret(&parse("var x = 7 / 2").unwrap()).unwrap();
    ///
    /// assert_eq!(interpreter.global("x"), Some(Value::Int(3)));
    /// ```
    pub fn interpret(&mut self, program: &Program) -> EvalResult<()> {
        let result = self.exec_stats(&program.stats).and_then(|flow| match flow {
                                                         Flow::Normal => Ok(()),
                                                         Flow::Break(pos) => {
                                                             Err(InterpreterError::BreakOutsideLoop { pos })
                                                         },
                                                         Flow::Continue(pos) => {
                                                             Err(InterpreterError::ContinueOutsideLoop { pos })
                                                         },
                                                         Flow::Return(_, pos) => {
                                                             Err(InterpreterError::ReturnOutsideFunction { pos })
                                                         },
                                                     });
        if result.is_err() {
            log::debug!("interpretation failed at depth {}; unwinding", self.call_stack.depth());
            self.call_stack.unwind();
        }
        result
    }

    /// Executes statements in order until one finishes with a non-`Normal`
    /// flow.
    pub(crate) fn exec_stats(&mut self, stats: &[Stat]) -> EvalResult<Flow> {
        for stat in stats {
            let flow = self.exec_stat(stat)?;
            if flow != Flow::Normal {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// Executes one statement.
    pub(crate) fn exec_stat(&mut self, stat: &Stat) -> EvalResult<Flow> {
        match stat {
            Stat::Block { stats, .. } => self.exec_block(stats),
            Stat::VarDecl { names,
                            exprs,
                            constant,
                            pos, } => self.exec_var_decl(names, exprs, *constant, *pos),
            Stat::If { conds, stats, .. } => self.exec_if(conds, stats),
            Stat::Switch { expr,
                           cases,
                           stats,
                           default,
                           .. } => self.exec_switch(expr, cases, stats, default.as_deref()),
            Stat::Repeat { stat, cond, .. } => self.exec_repeat(stat, cond),
            Stat::While { cond, stat, .. } => self.exec_while(cond, stat),
            Stat::ForLoop { var,
                            start,
                            stop,
                            step,
                            stat,
                            pos, } => self.exec_for_loop(var, start, stop, step.as_ref(), stat, *pos),
            Stat::ForEach { key,
                            value,
                            expr,
                            stat,
                            .. } => self.exec_for_each(key, value.as_ref(), expr, stat),
            Stat::Break { pos } => Ok(Flow::Break(*pos)),
            Stat::Continue { pos } => Ok(Flow::Continue(*pos)),
            Stat::Return { expr, pos } => {
                let value = match expr {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(value, *pos))
            },
            Stat::Assign { targets, exprs, .. } => {
                self.exec_assign(targets, exprs)?;
                Ok(Flow::Normal)
            },
            Stat::CompoundAssign { op,
                                   target,
                                   expr,
                                   pos, } => {
                self.exec_compound_assign(*op, target, expr, *pos)?;
                Ok(Flow::Normal)
            },
            Stat::Call { call, .. } => {
                self.eval(call)?;
                Ok(Flow::Normal)
            },
        }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Script calls
    /// recurse through here, so the native stack is grown on demand and
    /// recursion depth is bounded by `Config::max_call_depth` alone.
    pub(crate) fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.eval_expr(expr))
    }

    fn eval_expr(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::FuncDef(def) => {
                let current = self.call_stack.current();
                let env = (current.borrow().kind != RecordKind::Program).then(|| Rc::clone(current));
                Ok(Value::Function(Rc::new(FunctionValue { def: Rc::clone(def),
                                                           env })))
            },
            Expr::FuncCall { callee, args, pos } => {
                let callee = self.eval(callee)?;
                let args = args.iter()
                               .map(|arg| self.eval(arg))
                               .collect::<EvalResult<Vec<_>>>()?;
                self.call_value(&callee, args, *pos)
            },
            Expr::Select { cond,
                           then,
                           otherwise,
                           pos, } => {
                if self.eval(cond)?.to_bool(*pos)? {
                    self.eval(then)
                } else {
                    self.eval(otherwise)
                }
            },
            Expr::BinOp { op,
                          left,
                          right,
                          pos, } => self.eval_binary_op(*op, left, right, *pos),
            Expr::UniOp { op, expr, pos } => {
                let value = self.eval(expr)?;
                Self::eval_unary_op(*op, &value, *pos)
            },
            Expr::ListCtor { exprs, .. } => {
                let items = exprs.iter()
                                 .map(|expr| self.eval(expr))
                                 .collect::<EvalResult<Vec<_>>>()?;
                Ok(items.into())
            },
            Expr::MapCtor { keys, values, pos } => self.eval_map_ctor(keys, values, *pos),
            Expr::SetCtor { exprs, pos } => self.eval_set_ctor(exprs, *pos),
            Expr::Access { expr, key, pos, .. } => {
                let container = self.eval(expr)?;
                let key = self.eval(key)?;
                Self::get_member(&container, &key, *pos)
            },
            Expr::Name(name) => self.call_stack.get(&name.identifier, name.pos),
            Expr::Num { value, .. } => Ok(match value {
                                           NumLiteral::Int(n) => Value::Int(*n),
                                           NumLiteral::Float(r) => Value::Float(*r),
                                       }),
            Expr::Str { value, .. } => Ok(value.as_str().into()),
            Expr::Bool { value, .. } => Ok(Value::Bool(*value)),
            Expr::Null { .. } => Ok(Value::Null),
        }
    }
}
