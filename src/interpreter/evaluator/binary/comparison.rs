use std::cmp::Ordering;

use crate::{
    ast::{BinaryOperator, Position},
    error::InterpreterError,
    interpreter::{
        evaluator::{binary::arithmetic::unsupported, core::EvalResult},
        value::{core::Value, map_value::MapKey},
    },
};

/// `left == right`, see [`Value::equals`].
#[allow(clippy::unnecessary_wraps)]
pub fn equal(left: &Value, right: &Value, _pos: Position) -> EvalResult<Value> {
    Ok(Value::Bool(left.equals(right)))
}

/// Orders two numbers.
///
/// Ints compare exactly; mixed pairs compare as floats. `None` when a float
/// is NaN.
fn compare(op: BinaryOperator, left: &Value, right: &Value, pos: Position) -> EvalResult<Option<Ordering>> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(Some(a.cmp(b))),
        _ if left.is_number() && right.is_number() => {
            Ok(left.as_float(pos)?.partial_cmp(&right.as_float(pos)?))
        },
        _ => Err(unsupported(op, left, right, pos)),
    }
}

/// `left < right` on numbers.
pub fn less(left: &Value, right: &Value, pos: Position) -> EvalResult<Value> {
    let ordering = compare(BinaryOperator::Less, left, right, pos)?;
    Ok(Value::Bool(ordering == Some(Ordering::Less)))
}

/// `left <= right` on numbers.
pub fn less_equal(left: &Value, right: &Value, pos: Position) -> EvalResult<Value> {
    let ordering = compare(BinaryOperator::LessEqual, left, right, pos)?;
    Ok(Value::Bool(matches!(ordering, Some(Ordering::Less | Ordering::Equal))))
}

/// `left in right`.
///
/// - List: some element equals `left`.
/// - Map: `left` is a key. Values that cannot be keys are never present.
/// - String: `left` is a substring.
///
/// # Errors
/// `TypeError` if `right` is none of the above, or if it is a string and
/// `left` is not.
pub fn contains(left: &Value, right: &Value, pos: Position) -> EvalResult<Value> {
    match right {
        Value::List(list) => Ok(Value::Bool(list.borrow().iter().any(|item| item.equals(left)))),
        Value::Map(map) => {
            let present = MapKey::from_value(left, pos).is_ok_and(|key| map.borrow().contains_key(&key));
            Ok(Value::Bool(present))
        },
        Value::Str(haystack) => match left {
            Value::Str(needle) => Ok(Value::Bool(haystack.contains(&**needle))),
            _ => Err(unsupported(BinaryOperator::In, left, right, pos)),
        },
        _ => Err(InterpreterError::TypeError { details: format!("value of type `{}` does not support `in`",
                                                                right.type_name()),
                                               pos }),
    }
}

/// `left is right`.
///
/// With a type token on the right this is a type test; otherwise it is
/// [`Value::is_same`].
#[allow(clippy::unnecessary_wraps)]
pub fn is(left: &Value, right: &Value, _pos: Position) -> EvalResult<Value> {
    match right {
        Value::Type(name) => Ok(Value::Bool(left.type_name() == &**name)),
        _ => Ok(Value::Bool(left.is_same(right))),
    }
}
