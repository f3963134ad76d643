use crate::{
    ast::Position,
    error::InterpreterError,
    interpreter::{
        evaluator::{console::Console, core::EvalResult},
        value::core::Value,
    },
};

/// Reads one line of input.
///
/// The optional first argument is written as a prompt. The optional second
/// argument is a type token: `int` and `float` convert the line (surrounding
/// whitespace ignored), `string` keeps it as is.
///
/// # Returns
/// The line, converted as requested, or `null` at end of input.
///
/// # Errors
/// - `TypeError` if the second argument is not a type token.
/// - `ValueError` if the type is not `int`, `float` or `string`, or the line
///   does not parse as the requested number.
///
/// # Example
/// ```
/// use toylang::{
///     ast::Position,
///     interpreter::{
///         evaluator::{
///             console::{Console, OutputBuffer},
///             function::input::input,
///         },
///         value::core::Value,
///     },
/// };
///
/// let output = OutputBuffer::default();
/// let mut console = Console::new(output.clone(), "42\n".as_bytes());
/// let int = Value::Type("int".into());
///
/// let v = input(&mut console, &[Value::from("n? "), int], Position::new(1, 1)).unwrap();
///
/// assert_eq!(v, Value::Int(42));
/// assert_eq!(output.contents(), "n? ");
/// ```
pub fn input(console: &mut Console, args: &[Value], pos: Position) -> EvalResult<Value> {
    if let Some(prompt) = args.first() {
        console.write_str(&prompt.to_string(), pos)?;
    }

    let target = match args.get(1) {
        None => "string",
        Some(Value::Type(name)) => &**name,
        Some(other) => {
            return Err(InterpreterError::TypeError { details: format!("input type must be a type token, found `{}`",
                                                                      other.type_name()),
                                                     pos });
        },
    };

    let Some(line) = console.read_line(pos)? else {
        return Ok(Value::Null);
    };

    match target {
        "string" => Ok(line.into()),
        "int" => line.trim()
                     .parse::<i64>()
                     .map(Value::Int)
                     .map_err(|_| invalid_input(&line, target, pos)),
        "float" => line.trim()
                       .parse::<f64>()
                       .map(Value::Float)
                       .map_err(|_| invalid_input(&line, target, pos)),
        _ => Err(InterpreterError::ValueError { details: format!("input cannot produce `{target}`"),
                                                pos }),
    }
}

fn invalid_input(line: &str, target: &str, pos: Position) -> InterpreterError {
    InterpreterError::ValueError { details: format!("{line:?} is not a valid {target}"),
                                   pos }
}
