use crate::runtime::{
    error::{self, ErrorKind, script_error},
    interpreter::Interpreter,
};

/// Make sure at least `count` values are on the stack before touching any of them, so a failing
/// word leaves the stack as it found it.
fn require_depth(interpreter: &mut dyn Interpreter, count: usize) -> error::Result<()> {
    if interpreter.stack().len() < count {
        script_error(interpreter, ErrorKind::StackUnderflow)?;
    }

    Ok(())
}

/// Duplicate the top value on the data stack.
///
/// Signature: `value -- value value`
pub fn word_dupe(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.peek()?.clone();

    interpreter.push(value);

    Ok(())
}

/// Drop the top value on the data stack.
///
/// Signature: `value -- `
pub fn word_drop(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let _ = interpreter.pop()?;

    Ok(())
}

/// Swap the top 2 values on the data stack.
///
/// Signature: `a b -- b a`
pub fn word_swap(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    require_depth(interpreter, 2)?;

    let a = interpreter.pop()?;
    let b = interpreter.pop()?;

    interpreter.push(a);
    interpreter.push(b);

    Ok(())
}

/// Move the value `count` deep to the top, the values above it each shift down one.
///
/// Signature: `x1 x2 .. xn -- x2 .. xn x1`
pub fn word_rot(interpreter: &mut dyn Interpreter, count: usize) -> error::Result<()> {
    require_depth(interpreter, count)?;

    let value = interpreter.pick(count - 1)?;
    interpreter.push(value);

    Ok(())
}
