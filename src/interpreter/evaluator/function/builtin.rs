use crate::{
    ast::Position,
    error::InterpreterError,
    interpreter::{
        evaluator::{console::Console, core::EvalResult},
        value::core::Value,
    },
};

/// Returns the type token of the argument's runtime type.
///
/// `typeof(x) == int` holds exactly when `x is int` does.
///
/// # Example
/// ```
/// use toylang::{
///     ast::Position,
///     interpreter::{
///         evaluator::{console::Console, function::builtin::type_of},
///         value::core::Value,
///     },
/// };
///
/// let mut console = Console::new(std::io::sink(), std::io::empty());
/// let t = type_of(&mut console, &[Value::Float(1.5)], Position::new(1, 1)).unwrap();
///
/// assert_eq!(t, Value::Type("float".into()));
/// ```
#[allow(clippy::unnecessary_wraps)]
pub fn type_of(_console: &mut Console, args: &[Value], _pos: Position) -> EvalResult<Value> {
    let name = args.first().map_or("null", Value::type_name);
    Ok(Value::Type(name.into()))
}

/// Fails unless the first argument is truthy.
///
/// The optional second argument becomes the error message.
///
/// # Errors
/// `AssertionFailed` when the condition is false.
pub fn assert(_console: &mut Console, args: &[Value], pos: Position) -> EvalResult<Value> {
    let holds = match args.first() {
        Some(cond) => cond.to_bool(pos)?,
        None => false,
    };
    if holds {
        return Ok(Value::Null);
    }

    let message = args.get(1)
                      .map_or_else(|| "condition is false".to_string(), ToString::to_string);
    Err(InterpreterError::AssertionFailed { message, pos })
}
