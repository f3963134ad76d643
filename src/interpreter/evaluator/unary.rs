use crate::{
    ast::{Position, UnaryOperator},
    error::InterpreterError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
    util::num::usize_to_i64_checked,
};

impl Interpreter {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Plus`, `Negate`: numeric identity and negation.
    /// - `Not`: logical negation of the operand's truth value.
    /// - `Len`: character count of a string, element count of a list or map.
    /// - `BitNot`: bitwise complement of an `int`.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Operand.
    /// - `pos`: Position of the operator.
    ///
    /// # Errors
    /// - `TypeError` when the operand type does not support the operator.
    /// - `Overflow` when negating `i64::MIN`.
    ///
    /// # Example
    /// ```
    /// use toylang::{
    ///     ast::{Position, UnaryOperator},
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let pos = Position::new(1, 1);
    ///
    /// let v = Interpreter::eval_unary_op(UnaryOperator::Negate, &Value::Int(5), pos).unwrap();
    /// assert_eq!(v, Value::Int(-5));
    ///
    /// let v = Interpreter::eval_unary_op(UnaryOperator::Not, &Value::Null, pos).unwrap();
    /// assert_eq!(v, Value::Bool(true));
    ///
    /// let v = Interpreter::eval_unary_op(UnaryOperator::Len, &Value::from("héllo"), pos).unwrap();
    /// assert_eq!(v, Value::Int(5));
    /// ```
    pub fn eval_unary_op(op: UnaryOperator, value: &Value, pos: Position) -> EvalResult<Value> {
        match (op, value) {
            (UnaryOperator::Plus, Value::Int(_) | Value::Float(_)) => Ok(value.clone()),
            (UnaryOperator::Negate, Value::Int(n)) => {
                n.checked_neg()
                 .map(Value::Int)
                 .ok_or(InterpreterError::Overflow { pos })
            },
            (UnaryOperator::Negate, Value::Float(r)) => Ok(Value::Float(-r)),
            (UnaryOperator::Not, _) => Ok(Value::Bool(!value.to_bool(pos)?)),
            (UnaryOperator::Len, Value::Str(s)) => Ok(Value::Int(usize_to_i64_checked(s.chars().count(), pos)?)),
            (UnaryOperator::Len, Value::List(list)) => Ok(Value::Int(usize_to_i64_checked(list.borrow().len(), pos)?)),
            (UnaryOperator::Len, Value::Map(map)) => Ok(Value::Int(usize_to_i64_checked(map.borrow().len(), pos)?)),
            (UnaryOperator::BitNot, Value::Int(n)) => Ok(Value::Int(!n)),
            _ => Err(InterpreterError::TypeError { details: format!("cannot apply `{op}` to `{}`",
                                                                    value.type_name()),
                                                   pos }),
        }
    }
}
