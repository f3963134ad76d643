use std::{
    cell::RefCell,
    io::{self, BufRead, Write},
    rc::Rc,
};

use crate::{ast::Position, error::InterpreterError, interpreter::evaluator::core::EvalResult};

/// The input and output streams available to host functions.
///
/// The interpreter never touches the process's standard streams directly;
/// everything goes through the console it was built with.
pub struct Console {
    output: Box<dyn Write>,
    input:  Box<dyn BufRead>,
}

impl Console {
    /// Creates a console over the given streams.
    pub fn new(output: impl Write + 'static, input: impl BufRead + 'static) -> Self {
        Self { output: Box::new(output),
               input:  Box::new(input), }
    }

    /// Creates a console over the process's standard output and input.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::BufReader::new(io::stdin()))
    }

    /// Writes `text` and flushes.
    ///
    /// # Errors
    /// `Io` if the underlying stream fails.
    pub fn write_str(&mut self, text: &str, pos: Position) -> EvalResult<()> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|()| self.output.flush())
            .map_err(|e| io_error(&e, pos))
    }

    /// Reads one line without its line terminator.
    ///
    /// # Returns
    /// `None` at end of input.
    ///
    /// # Errors
    /// `Io` if the underlying stream fails.
    pub fn read_line(&mut self, pos: Position) -> EvalResult<Option<String>> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(|e| io_error(&e, pos))?;
        if read == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

fn io_error(err: &io::Error, pos: Position) -> InterpreterError {
    InterpreterError::Io { details: err.to_string(),
                           pos }
}

/// A cloneable in-memory output sink.
///
/// Hand one clone to [`Console::new`] and keep another to read what the
/// program printed.
///
/// # Example
/// ```
/// use std::io::Write;
///
/// use toylang::interpreter::evaluator::console::OutputBuffer;
///
/// let buffer = OutputBuffer::default();
/// let mut writer = buffer.clone();
/// write!(writer, "hello").unwrap();
///
/// assert_eq!(buffer.contents(), "hello");
/// ```
#[derive(Debug, Clone, Default)]
pub struct OutputBuffer(Rc<RefCell<Vec<u8>>>);

impl OutputBuffer {
    /// Returns everything written so far, lossily decoded as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
