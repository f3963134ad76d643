use std::rc::Rc;

use crate::{
    ast::{FuncDef, Position},
    error::InterpreterError,
    interpreter::{
        evaluator::{
            call_stack::RecordKind,
            core::{EvalResult, Flow, Interpreter},
            function::{builtin, input, print},
        },
        value::{
            core::Value,
            function::{Arity, FunctionValue, HostFunctionDef},
        },
    },
};

/// Defines the host functions bound in every global record.
///
/// Each entry provides:
/// - the global name,
/// - an arity specification,
/// - a function pointer implementing the function.
///
/// The macro produces `HOST_FUNCTIONS`, the static table read by the
/// interpreter and the semantic analyzer.
macro_rules! host_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        pub static HOST_FUNCTIONS: &[HostFunctionDef] = &[
            $(
                HostFunctionDef { name: $name, arity: $arity, func: $func },
            )*
        ];
    };
}

host_functions! {
    "print"   => { arity: Arity::Any,              func: print::print },
    "println" => { arity: Arity::Any,              func: print::println },
    "input"   => { arity: Arity::OneOf(&[0, 1, 2]), func: input::input },
    "typeof"  => { arity: Arity::Exact(1),         func: builtin::type_of },
    "assert"  => { arity: Arity::OneOf(&[1, 2]),    func: builtin::assert },
}

impl Interpreter {
    /// Calls `callee` with already evaluated arguments.
    ///
    /// # Errors
    /// - `NotCallable` if `callee` is not a function.
    /// - `ArgumentCount` if the arguments do not fit the parameters.
    /// - Anything raised by the function body.
    pub(crate) fn call_value(&mut self, callee: &Value, args: Vec<Value>, pos: Position) -> EvalResult<Value> {
        match callee {
            Value::Function(func) => self.call_function(func, args, pos),
            Value::HostFunction(def) => {
                if !def.arity.check(args.len()) {
                    return Err(InterpreterError::ArgumentCount { expected: def.arity.to_string(),
                                                                 found: args.len(),
                                                                 pos });
                }
                if self.config.trace_calls {
                    log::trace!("{pos}: call host function {} with {} argument(s)", def.name, args.len());
                }
                (def.func)(&mut self.console, &args, pos)
            },
            _ => Err(InterpreterError::NotCallable { type_name: callee.type_name().to_string(),
                                                     pos }),
        }
    }

    /// Calls a script function.
    ///
    /// Arguments bind to the parameters in order; with a `...rest`
    /// parameter the surplus arguments are collected into a list. Without
    /// one the count must match exactly. The call fails once
    /// `Config::max_call_depth` calls are already in progress.
    fn call_function(&mut self, func: &FunctionValue, args: Vec<Value>, pos: Position) -> EvalResult<Value> {
        let def = &func.def;
        let fixed = def.params.len();
        let fits = if def.vararg.is_some() { args.len() >= fixed } else { args.len() == fixed };
        if !fits {
            let expected = if def.vararg.is_some() { format!("at least {fixed}") } else { fixed.to_string() };
            return Err(InterpreterError::ArgumentCount { expected,
                                                         found: args.len(),
                                                         pos });
        }

        if self.call_stack.calls() >= self.config.max_call_depth {
            return Err(InterpreterError::CallDepthExceeded { limit: self.config.max_call_depth,
                                                             pos });
        }

        if self.config.trace_calls {
            let rendered: Vec<String> = args.iter().map(Value::repr).collect();
            log::trace!("{pos}: call function defined at {} ({})", def.pos, rendered.join(", "));
        }

        let env = func.env
                      .as_ref()
                      .map_or_else(|| Rc::clone(self.call_stack.global()), Rc::clone);
        self.enter_record(&format!("func@{}", def.pos), RecordKind::Function, env);
        let flow = self.run_function_body(def, args);
        self.leave_record();

        let result = match flow? {
            Flow::Normal => Value::Null,
            Flow::Return(value, _) => value,
            Flow::Break(pos) => return Err(InterpreterError::BreakOutsideLoop { pos }),
            Flow::Continue(pos) => return Err(InterpreterError::ContinueOutsideLoop { pos }),
        };

        if self.config.trace_calls {
            log::trace!("{pos}: function defined at {} returned {}", def.pos, result.repr());
        }
        Ok(result)
    }

    fn run_function_body(&mut self, def: &FuncDef, args: Vec<Value>) -> EvalResult<Flow> {
        let mut args = args.into_iter();
        for param in &def.params {
            let value = args.next().unwrap_or(Value::Null);
            self.call_stack.declare(&param.identifier, value, false, param.pos)?;
        }
        if let Some(vararg) = &def.vararg {
            let rest: Vec<Value> = args.collect();
            self.call_stack.declare(&vararg.identifier, rest.into(), false, vararg.pos)?;
        }
        self.exec_stats(&def.body)
    }
}
