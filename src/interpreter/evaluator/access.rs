use crate::{
    ast::Position,
    error::InterpreterError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::{core::Value, map_value::MapKey},
    },
    util::num::resolve_index,
};

impl Interpreter {
    /// Reads `container[key]`.
    ///
    /// - Lists take an `int` index; negative indices count from the end.
    /// - Maps take any valid key and fail when it is absent.
    /// - Strings take an `int` index and yield a one-character string.
    ///
    /// # Errors
    /// - `MemberAccess` for an index out of range, a missing map key or a
    ///   value that cannot be indexed.
    /// - `TypeError` for a non-integer list or string index.
    ///
    /// # Example
    /// ```
    /// use toylang::{
    ///     ast::Position,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let list = Value::from(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    /// let pos = Position::new(1, 1);
    ///
    /// assert_eq!(Interpreter::get_member(&list, &Value::Int(-1), pos).unwrap(), Value::Int(3));
    /// assert!(Interpreter::get_member(&list, &Value::Int(3), pos).is_err());
    /// ```
    pub fn get_member(container: &Value, key: &Value, pos: Position) -> EvalResult<Value> {
        match container {
            Value::List(list) => {
                let list = list.borrow();
                let index = resolve_index(index_of(key, pos)?, list.len(), pos)?;
                Ok(list[index].clone())
            },
            Value::Map(map) => {
                let key = MapKey::from_value(key, pos)?;
                map.borrow()
                   .get(&key)
                   .cloned()
                   .ok_or_else(|| InterpreterError::MemberAccess { details: format!("key {key} not found"),
                                                                   pos })
            },
            Value::Str(s) => {
                let len = s.chars().count();
                let index = resolve_index(index_of(key, pos)?, len, pos)?;
                Ok(s.chars()
                    .nth(index)
                    .map_or(Value::Null, |c| c.to_string().into()))
            },
            _ => Err(not_indexable(container, pos)),
        }
    }

    /// Writes `container[key] = value`.
    ///
    /// List elements must already exist; map entries are inserted or
    /// overwritten. A container can never end up inside itself, so values
    /// stay printable and comparable.
    ///
    /// # Errors
    /// - `MemberAccess` for an index out of range, a value that cannot be
    ///   written through (strings included), or a `value` that is or holds
    ///   `container`.
    /// - `TypeError` for a non-integer list index.
    pub fn set_member(container: &Value, key: &Value, value: Value, pos: Position) -> EvalResult<()> {
        if value.reaches(container) {
            return Err(InterpreterError::MemberAccess { details: format!("a {} cannot be stored inside itself",
                                                                         container.type_name()),
                                                        pos });
        }
        match container {
            Value::List(list) => {
                let mut list = list.borrow_mut();
                let index = resolve_index(index_of(key, pos)?, list.len(), pos)?;
                list[index] = value;
                Ok(())
            },
            Value::Map(map) => {
                let key = MapKey::from_value(key, pos)?;
                map.borrow_mut().insert(key, value);
                Ok(())
            },
            Value::Str(_) => Err(InterpreterError::MemberAccess { details: "strings are immutable".to_string(),
                                                                  pos }),
            _ => Err(not_indexable(container, pos)),
        }
    }
}

fn index_of(key: &Value, pos: Position) -> EvalResult<i64> {
    match key {
        Value::Int(n) => Ok(*n),
        _ => Err(InterpreterError::TypeError { details: format!("index must be an int, found `{}`",
                                                                key.type_name()),
                                               pos }),
    }
}

fn not_indexable(container: &Value, pos: Position) -> InterpreterError {
    InterpreterError::MemberAccess { details: format!("value of type `{}` cannot be indexed",
                                                      container.type_name()),
                                     pos }
}
