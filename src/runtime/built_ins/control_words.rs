use crate::runtime::{error, interpreter::Interpreter};

/// Select between 2 values based on a condition.  Only selects, running the chosen branch is left
/// to a following `eval`.
///
/// Signature: `condition then-value else-value -- chosen-value`
pub fn word_if(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let else_value = interpreter.pop()?;
    let then_value = interpreter.pop()?;
    let condition = interpreter.pop_as_bool()?;

    interpreter.push(if condition { then_value } else { else_value });
    Ok(())
}

/// Lex the top value and run its tokens against the current stack and dictionary.
///
/// Signature: `code -- <results of the code>`
pub fn word_eval(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let code = interpreter.pop_as_string()?;
    let location = interpreter.current_location().clone().unwrap_or_default();

    interpreter.execute_source("eval", &location, &code)
}
