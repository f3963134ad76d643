use std::{
    any::Any,
    cell::RefCell,
    fmt::{self, Write as _},
    rc::Rc,
};

use crate::{
    ast::Position,
    error::InterpreterError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{
            function::{FunctionValue, HostFunctionDef},
            map_value::MapValue,
        },
    },
};

/// Names of the built-in type tokens bound in the global scope.
///
/// Each name evaluates to a [`Value::Type`] and is the right operand of the
/// type test `x is int`.
pub const TYPE_NAMES: &[&str] = &["null", "bool", "int", "float", "string", "list", "map", "function",
                                  "object", "type"];

/// An opaque value created by a host function.
///
/// Scripts can store, pass and compare objects (by identity) but not look
/// inside them; host code recovers the payload with [`HostObject::downcast`].
pub struct HostObject {
    /// Shown when the object is printed.
    pub class: String,
    payload:   Box<dyn Any>,
}

impl HostObject {
    /// Wraps `payload` under the given class name.
    pub fn new(class: impl Into<String>, payload: impl Any) -> Self {
        Self { class:   class.into(),
               payload: Box::new(payload), }
    }

    /// Returns the payload if it has type `T`.
    #[must_use]
    pub fn downcast<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref()
    }
}

impl fmt::Debug for HostObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostObject")
         .field("class", &self.class)
         .finish_non_exhaustive()
    }
}

/// Represents a runtime value in the interpreter.
///
/// Lists and maps are reference types: cloning a `Value` that holds one
/// clones the handle, so every alias observes mutations.
#[derive(Debug, Clone)]
pub enum Value {
    /// `null`
    Null,
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// A 64-bit integer number.
    Int(i64),
    /// A double-precision floating-point number.
    Float(f64),
    /// An immutable string.
    Str(Rc<str>),
    /// A mutable, shared list.
    List(Rc<RefCell<Vec<Self>>>),
    /// A mutable, shared, insertion-ordered map.
    Map(Rc<RefCell<MapValue>>),
    /// An opaque host object.
    Object(Rc<HostObject>),
    /// A type token such as `int`.
    Type(Rc<str>),
    /// A function defined in the script.
    Function(Rc<FunctionValue>),
    /// A native function.
    HostFunction(Rc<HostFunctionDef>),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v.into())
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(Rc::new(RefCell::new(v)))
    }
}

impl From<MapValue> for Value {
    fn from(v: MapValue) -> Self {
        Self::Map(Rc::new(RefCell::new(v)))
    }
}

impl Value {
    /// Returns the name of the value's runtime type, as spelled by the type
    /// tokens.
    ///
    /// # Example
    /// ```
    /// use toylang::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Int(1).type_name(), "int");
    /// assert_eq!(Value::from("s").type_name(), "string");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Object(_) => "object",
            Self::Type(_) => "type",
            Self::Function(_) | Self::HostFunction(_) => "function",
        }
    }

    /// Returns `true` for `Int` and `Float`.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// Converts the value to `bool` for use as a condition.
    ///
    /// `null` is false, numbers are true when non-zero, strings, lists and
    /// maps are true when non-empty.
    ///
    /// # Errors
    /// `TypeError` for objects, types and functions, which have no truth
    /// value.
    ///
    /// # Example
    /// ```
    /// use toylang::{ast::Position, interpreter::value::core::Value};
    ///
    /// let pos = Position::new(1, 1);
    ///
    /// assert!(!Value::Null.to_bool(pos).unwrap());
    /// assert!(Value::Float(0.5).to_bool(pos).unwrap());
    /// assert!(!Value::from(Vec::new()).to_bool(pos).unwrap());
    /// ```
    pub fn to_bool(&self, pos: Position) -> EvalResult<bool> {
        match self {
            Self::Null => Ok(false),
            Self::Bool(b) => Ok(*b),
            Self::Int(n) => Ok(*n != 0),
            Self::Float(r) => Ok(*r != 0.0),
            Self::Str(s) => Ok(!s.is_empty()),
            Self::List(list) => Ok(!list.borrow().is_empty()),
            Self::Map(map) => Ok(!map.borrow().is_empty()),
            Self::Object(_) | Self::Type(_) | Self::Function(_) | Self::HostFunction(_) => {
                Err(InterpreterError::TypeError { details: format!("`{}` cannot be converted to bool",
                                                                   self.type_name()),
                                                  pos })
            },
        }
    }

    /// Converts a numeric value to `f64`.
    ///
    /// Integers beyond 2^53 round to the nearest float, as any arithmetic
    /// with a float operand does.
    ///
    /// # Errors
    /// `TypeError` if the value is not a number.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self, pos: Position) -> EvalResult<f64> {
        match self {
            Self::Float(r) => Ok(*r),
            Self::Int(n) => Ok(*n as f64),
            _ => Err(InterpreterError::TypeError { details: format!("expected a number, found `{}`",
                                                                    self.type_name()),
                                                   pos }),
        }
    }

    /// Returns the integer inside an `Int`.
    ///
    /// # Errors
    /// `TypeError` for any other value.
    pub fn as_int(&self, pos: Position) -> EvalResult<i64> {
        match self {
            Self::Int(n) => Ok(*n),
            _ => Err(InterpreterError::TypeError { details: format!("expected an int, found `{}`",
                                                                    self.type_name()),
                                                   pos }),
        }
    }

    /// Structural equality as used by `==` and `switch`.
    ///
    /// Values of different runtime types are never equal, except that `Int`
    /// and `Float` compare by numeric value. Lists and maps compare element
    /// by element; objects and functions compare by identity.
    ///
    /// # Example
    /// ```
    /// use toylang::interpreter::value::core::Value;
    ///
    /// assert!(Value::Int(1).equals(&Value::Float(1.0)));
    /// assert!(!Value::Int(1).equals(&Value::from("1")));
    /// assert!(Value::from(vec![Value::Int(1)]).equals(&Value::from(vec![Value::Int(1)])));
    /// ```
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => int_equals_float(*a, *b),
            (Self::Str(a), Self::Str(b)) | (Self::Type(a), Self::Type(b)) => a == b,
            (Self::List(a), Self::List(b)) => {
                Rc::ptr_eq(a, b) || {
                    let (a, b) = (a.borrow(), b.borrow());
                    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y))
                }
            },
            (Self::Map(a), Self::Map(b)) => Rc::ptr_eq(a, b) || a.borrow().equals(&b.borrow()),
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::HostFunction(a), Self::HostFunction(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Identity as used by `is` when the right operand is not a type token.
    ///
    /// Containers, objects and functions are identical only when they are the
    /// same instance; other values fall back to [`Value::equals`].
    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(a), Self::List(b)) => Rc::ptr_eq(a, b),
            (Self::Map(a), Self::Map(b)) => Rc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::HostFunction(a), Self::HostFunction(b)) => Rc::ptr_eq(a, b),
            (Self::List(_) | Self::Map(_) | Self::Object(_) | Self::Function(_) | Self::HostFunction(_),
             _)
            | (_,
               Self::List(_) | Self::Map(_) | Self::Object(_) | Self::Function(_) | Self::HostFunction(_)) => {
                false
            },
            _ => self.equals(other),
        }
    }

    /// Returns `true` if `target` is this container or is nested anywhere
    /// inside it. Containers are matched by identity; only lists and maps are
    /// searched.
    ///
    /// # Example
    /// ```
    /// use toylang::interpreter::value::core::Value;
    ///
    /// let inner = Value::from(vec![Value::Int(1)]);
    /// let outer = Value::from(vec![inner.clone()]);
    ///
    /// assert!(outer.reaches(&inner));
    /// assert!(!inner.reaches(&outer));
    /// assert!(!outer.reaches(&Value::from(vec![Value::Int(1)])));
    /// ```
    #[must_use]
    pub fn reaches(&self, target: &Self) -> bool {
        match self {
            Self::List(list) => {
                matches!(target, Self::List(other) if Rc::ptr_eq(list, other))
                || list.borrow().iter().any(|item| item.reaches(target))
            },
            Self::Map(map) => {
                matches!(target, Self::Map(other) if Rc::ptr_eq(map, other))
                || map.borrow().values().any(|item| item.reaches(target))
            },
            _ => false,
        }
    }

    /// Formats the value as it appears inside a container: strings are
    /// quoted, everything else prints as usual.
    pub(crate) fn fmt_nested(&self, f: &mut impl fmt::Write) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s:?}"),
            _ => write!(f, "{self}"),
        }
    }

    /// Renders the value the way `fmt_nested` does.
    #[must_use]
    pub fn repr(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.fmt_nested(&mut out);
        out
    }
}

/// Compares an integer and a float without rounding the integer.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn int_equals_float(int: i64, float: f64) -> bool {
    float.fract() == 0.0 && float >= i64::MIN as f64 && float < i64::MAX as f64 && float as i64 == int
}

/// Writes a float the way scripts see it: integral values keep one decimal
/// (`3.0`).
pub(crate) fn fmt_float(f: &mut impl fmt::Write, value: f64) -> fmt::Result {
    if value.is_finite() && value.fract() == 0.0 {
        write!(f, "{value:.1}")
    } else {
        write!(f, "{value}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(r) => fmt_float(f, *r),
            Self::Str(s) => write!(f, "{s}"),
            Self::List(list) => {
                f.write_char('[')?;
                for (index, value) in list.borrow().iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    value.fmt_nested(f)?;
                }
                f.write_char(']')
            },
            Self::Map(map) => write!(f, "{}", map.borrow()),
            Self::Object(object) => write!(f, "<object {}>", object.class),
            Self::Type(name) => write!(f, "<type {name}>"),
            Self::Function(func) => write!(f, "<function at {}>", func.def.pos),
            Self::HostFunction(def) => write!(f, "<host function {}>", def.name),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}
