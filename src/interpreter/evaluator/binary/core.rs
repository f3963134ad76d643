use crate::{
    ast::{BinaryOperator, Expr, Position},
    error::InterpreterError,
    interpreter::{
        evaluator::{
            binary::{arithmetic, bitwise, comparison},
            core::{EvalResult, Interpreter},
        },
        value::core::Value,
    },
};

/// Signature shared by every operator implementation.
///
/// Receives both evaluated operands and the position of the operator.
type BinaryFn = fn(&Value, &Value, Position) -> EvalResult<Value>;

/// Defines the operator table as a lookup function.
///
/// Each entry maps an operator to the function implementing it. Operators
/// missing from the table either are handled before lookup (`and`, `or`,
/// and the negated comparisons) or are not implemented.
macro_rules! binary_operators {
    (
        $(
            $op:ident => $func:path
        ),* $(,)?
    ) => {
        fn binary_function(op: BinaryOperator) -> Option<BinaryFn> {
            match op {
                $(
                    BinaryOperator::$op => Some($func),
                )*
                _ => None,
            }
        }
    };
}

binary_operators! {
    In        => comparison::contains,
    Is        => comparison::is,
    Equal     => comparison::equal,
    Less      => comparison::less,
    LessEqual => comparison::less_equal,
    BitOr     => bitwise::bit_or,
    BitXor    => bitwise::bit_xor,
    BitAnd    => bitwise::bit_and,
    Shl       => bitwise::shl,
    Shr       => bitwise::shr,
    Add       => arithmetic::add,
    Sub       => arithmetic::sub,
    Mul       => arithmetic::mul,
    Div       => arithmetic::div,
    Mod       => arithmetic::rem,
    Pow       => arithmetic::pow,
}

/// Returns the operator whose negation `op` is, if any.
const fn complement(op: BinaryOperator) -> Option<BinaryOperator> {
    match op {
        BinaryOperator::NotEqual => Some(BinaryOperator::Equal),
        BinaryOperator::GreaterEqual => Some(BinaryOperator::Less),
        BinaryOperator::Greater => Some(BinaryOperator::LessEqual),
        _ => None,
    }
}

impl Interpreter {
    /// Evaluates a binary expression.
    ///
    /// `and` and `or` evaluate their right operand only when the left one
    /// does not decide the result, and always produce a `bool`. Every other
    /// operator evaluates both operands, left first, exactly once, then
    /// applies [`Interpreter::apply_binary`].
    pub(crate) fn eval_binary_op(&mut self,
                                 op: BinaryOperator,
                                 left: &Expr,
                                 right: &Expr,
                                 pos: Position)
                                 -> EvalResult<Value> {
        match op {
            BinaryOperator::And => {
                if !self.eval(left)?.to_bool(left.position())? {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.eval(right)?.to_bool(right.position())?))
            },
            BinaryOperator::Or => {
                if self.eval(left)?.to_bool(left.position())? {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(self.eval(right)?.to_bool(right.position())?))
            },
            _ => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::apply_binary(op, &left, &right, pos)
            },
        }
    }

    /// Applies a binary operator to two evaluated operands.
    ///
    /// `!=`, `>=` and `>` are computed as the negation of `==`, `<` and `<=`
    /// respectively, so only the latter need an implementation.
    ///
    /// # Errors
    /// `OpNotImplemented` for operators without a table entry (`and`, `or`);
    /// otherwise whatever the operator implementation reports.
    ///
    /// # Example
    /// ```
    /// use toylang::{
    ///     ast::{BinaryOperator, Position},
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let pos = Position::new(1, 1);
    ///
    /// let v = Interpreter::apply_binary(BinaryOperator::Div, &Value::Int(-7), &Value::Int(2), pos);
    /// assert_eq!(v.unwrap(), Value::Int(-4));
    ///
    /// let v = Interpreter::apply_binary(BinaryOperator::GreaterEqual,
    ///                                   &Value::Float(2.5),
    ///                                   &Value::Int(2),
    ///                                   pos);
    /// assert_eq!(v.unwrap(), Value::Bool(true));
    /// ```
    pub fn apply_binary(op: BinaryOperator, left: &Value, right: &Value, pos: Position) -> EvalResult<Value> {
        if let Some(base) = complement(op) {
            let result = Self::apply_binary(base, left, right, pos)?;
            return Ok(Value::Bool(!result.to_bool(pos)?));
        }

        let func = binary_function(op).ok_or_else(|| InterpreterError::OpNotImplemented { op: op.to_string(),
                                                                                          pos })?;
        func(left, right, pos)
    }
}
