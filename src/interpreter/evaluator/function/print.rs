use crate::{
    ast::Position,
    interpreter::{
        evaluator::{console::Console, core::EvalResult},
        value::core::Value,
    },
};

fn join(args: &[Value]) -> String {
    args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes the arguments separated by spaces, without a trailing newline.
///
/// # Returns
/// `null`.
///
/// # Example
/// ```
/// use toylang::{
///     ast::Position,
///     interpreter::{
///         evaluator::{
///             console::{Console, OutputBuffer},
///             function::print::print,
///         },
///         value::core::Value,
///     },
/// };
///
/// let output = OutputBuffer::default();
/// let mut console = Console::new(output.clone(), std::io::empty());
///
/// print(&mut console, &[Value::Int(1), Value::from("a"), Value::Float(2.0)], Position::new(1, 1)).unwrap();
///
/// assert_eq!(output.contents(), "1 a 2.0");
/// ```
pub fn print(console: &mut Console, args: &[Value], pos: Position) -> EvalResult<Value> {
    console.write_str(&join(args), pos)?;
    Ok(Value::Null)
}

/// Like [`print`], followed by a newline.
pub fn println(console: &mut Console, args: &[Value], pos: Position) -> EvalResult<Value> {
    let mut line = join(args);
    line.push('\n');
    console.write_str(&line, pos)?;
    Ok(Value::Null)
}
