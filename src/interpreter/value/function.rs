use std::{fmt, rc::Rc};

use crate::{
    ast::{FuncDef, Position},
    interpreter::{
        evaluator::{call_stack::RecordRef, console::Console, core::EvalResult},
        value::core::Value,
    },
};

/// A function literal evaluated at run time.
///
/// Holds the definition and the activation record the literal was evaluated
/// in. Calls resolve free names through that record, which outlives the call
/// that created it as long as the function value is reachable.
pub struct FunctionValue {
    /// The parsed definition.
    pub def: Rc<FuncDef>,
    /// The defining activation record, or `None` for the global record.
    pub env: Option<RecordRef>,
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The env may hold this function, so it is not printed.
        f.debug_struct("FunctionValue")
         .field("pos", &self.def.pos)
         .finish_non_exhaustive()
    }
}

/// Signature of a native function.
///
/// Receives the console for I/O, the evaluated arguments and the position of
/// the call for error reporting.
pub type HostFn = fn(&mut Console, &[Value], Position) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a host function.
///
/// - `Exact(n)` means the function must receive exactly `n` arguments.
/// - `OneOf(slice)` means it accepts any count listed in `slice`.
/// - `Any` accepts every count.
#[derive(Debug, Clone, Copy)]
pub enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    Any,
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    #[must_use]
    pub fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(counts) => counts.contains(&n),
            Self::Any => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::OneOf(counts) => {
                let counts: Vec<String> = counts.iter().map(ToString::to_string).collect();
                write!(f, "{}", counts.join(" or "))
            },
            Self::Any => write!(f, "any number of"),
        }
    }
}

/// A native function callable from scripts.
#[derive(Debug, Clone, Copy)]
pub struct HostFunctionDef {
    /// The global name the function is bound to.
    pub name:  &'static str,
    /// Accepted argument counts.
    pub arity: Arity,
    /// The implementation.
    pub func:  HostFn,
}
