use crate::runtime::{
    data_structures::value::{NumberType, ToValue},
    error::{self, ErrorKind, script_error},
    interpreter::Interpreter,
};

/// Helper function to handle math operations.  Handlers for integer and floating point operations
/// are passed in as arguments.  Integer math is used when both values are integers, an integer
/// overflow falls back to the float handler.  The stack operations and value conversions are
/// handled here.
fn math_op(
    interpreter: &mut dyn Interpreter,
    iop: fn(i64, i64) -> Option<i64>,
    fop: fn(f64, f64) -> f64,
) -> error::Result<()> {
    let b = interpreter.pop_as_number()?;
    let a = interpreter.pop_as_number()?;

    let result = match (a, b) {
        (NumberType::Int(a), NumberType::Int(b)) => match iop(a, b) {
            Some(result) => NumberType::Int(result),
            None => NumberType::Float(fop(a as f64, b as f64)),
        },

        _ => NumberType::Float(fop(a.as_float(), b.as_float())),
    };

    interpreter.push(result.to_value());

    Ok(())
}

/// Helper function to handle numeric comparisons.  Both values must be numbers.
fn compare_op(
    interpreter: &mut dyn Interpreter,
    cop: fn(&NumberType, &NumberType) -> bool,
) -> error::Result<()> {
    let b = interpreter.pop_as_number()?;
    let a = interpreter.pop_as_number()?;

    interpreter.push(cop(&a, &b).to_value());

    Ok(())
}

/// Helper function to handle logic operations.  Both values are read for their truthiness.
fn logic_op(interpreter: &mut dyn Interpreter, bop: fn(bool, bool) -> bool) -> error::Result<()> {
    let b = interpreter.pop_as_bool()?;
    let a = interpreter.pop_as_bool()?;

    interpreter.push(bop(a, b).to_value());

    Ok(())
}

/// Equality shared by `==` and `!=`.  Numbers compare by value, so `1` equals `1.0`, anything
/// else compares as text.
fn values_equal(interpreter: &mut dyn Interpreter) -> error::Result<bool> {
    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    let equal = match (a.get_number(), b.get_number()) {
        (Some(a), Some(b)) => a == b,
        _ => a == b,
    };

    Ok(equal)
}

/// Add 2 numbers together.
///
/// Signature: `a b -- result`
pub fn word_add(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    math_op(interpreter, i64::checked_add, |a, b| a + b)
}

/// Subtract 2 numbers.
///
/// Signature: `a b -- result`
pub fn word_subtract(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    math_op(interpreter, i64::checked_sub, |a, b| a - b)
}

/// Multiply 2 numbers.
///
/// Signature: `a b -- result`
pub fn word_multiply(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    math_op(interpreter, i64::checked_mul, |a, b| a * b)
}

/// Divide 2 numbers.  The result is always a float, even for evenly divisible integers.
///
/// Signature: `a b -- result`
pub fn word_divide(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let b = interpreter.pop_as_number()?;
    let a = interpreter.pop_as_number()?;

    if b.is_zero() {
        script_error(interpreter, ErrorKind::DivisionByZero)?;
    }

    interpreter.push((a.as_float() / b.as_float()).to_value());

    Ok(())
}

/// Negate a number.
///
/// Signature: `a -- -a`
pub fn word_negate(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let result = match interpreter.pop_as_number()? {
        NumberType::Int(a) => match a.checked_neg() {
            Some(negated) => NumberType::Int(negated),
            None => NumberType::Float(-(a as f64)),
        },
        NumberType::Float(a) => NumberType::Float(-a),
    };

    interpreter.push(result.to_value());

    Ok(())
}

/// Logically and 2 boolean values.
///
/// Signature: `a b -- result`
pub fn word_logic_and(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    logic_op(interpreter, |a, b| a && b)
}

/// Logically or 2 boolean values.
///
/// Signature: `a b -- result`
pub fn word_logic_or(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    logic_op(interpreter, |a, b| a || b)
}

/// Logically invert a boolean value.
///
/// Signature: `a -- a'`
pub fn word_logic_not(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let a = interpreter.pop_as_bool()?;

    interpreter.push((!a).to_value());
    Ok(())
}

/// Are 2 values equal?
///
/// Signature: `a b -- boolean`
pub fn word_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let equal = values_equal(interpreter)?;

    interpreter.push(equal.to_value());
    Ok(())
}

/// Are 2 values different?
///
/// Signature: `a b -- boolean`
pub fn word_not_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let equal = values_equal(interpreter)?;

    interpreter.push((!equal).to_value());
    Ok(())
}

/// Is one number less than another?
///
/// Signature: `a b -- boolean`
pub fn word_less(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    compare_op(interpreter, |a, b| a < b)
}

/// Is one number greater than another?
///
/// Signature: `a b -- boolean`
pub fn word_greater(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    compare_op(interpreter, |a, b| a > b)
}

/// Is one number lesser or equal to another?
///
/// Signature: `a b -- boolean`
pub fn word_less_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    compare_op(interpreter, |a, b| a <= b)
}

/// Is one number greater or equal to another?
///
/// Signature: `a b -- boolean`
pub fn word_greater_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    compare_op(interpreter, |a, b| a >= b)
}
