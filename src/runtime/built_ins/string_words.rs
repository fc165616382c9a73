use crate::runtime::{
    data_structures::value::{NumberType, ToValue},
    error,
    interpreter::Interpreter,
};

/// Turn a possibly negative slice index into a position within `len` characters.  Negative
/// indices count back from the end and anything out of range is clamped.
fn slice_index(index: i64, len: usize) -> usize {
    let len = len as i64;
    let index = if index < 0 { index + len } else { index };

    index.clamp(0, len) as usize
}

/// Get the length of a value in characters.
///
/// Signature: `string -- length`
pub fn word_len(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let string = interpreter.pop_as_string()?;

    interpreter.push(string.chars().count().to_value());
    Ok(())
}

/// Concatenate 2 values.
///
/// Signature: `a b -- ab`
pub fn word_cat(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let b = interpreter.pop_as_string()?;
    let a = interpreter.pop_as_string()?;

    interpreter.push((a + &b).to_value());
    Ok(())
}

/// Take the characters from start up to, but not including, end.
///
/// Signature: `string start end -- sub-string`
pub fn word_substr(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let end = interpreter.pop_as_int()?;
    let start = interpreter.pop_as_int()?;
    let string = interpreter.pop_as_string()?;

    let count = string.chars().count();
    let start = slice_index(start, count);
    let end = slice_index(end, count);

    let sub_string: String = if start < end {
        string.chars().skip(start).take(end - start).collect()
    } else {
        String::new()
    };

    interpreter.push(sub_string.to_value());
    Ok(())
}

/// Replace every occurrence of a search string.
///
/// Signature: `string search replacement -- result`
pub fn word_replace(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let replacement = interpreter.pop_as_string()?;
    let search = interpreter.pop_as_string()?;
    let string = interpreter.pop_as_string()?;

    interpreter.push(string.replace(&search, &replacement).to_value());
    Ok(())
}

/// Convert a number to an integer, truncating toward zero.
///
/// Signature: `number -- int`
pub fn word_int(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop_as_int()?;

    interpreter.push(value.to_value());
    Ok(())
}

/// Convert a number to a float.
///
/// Signature: `number -- float`
pub fn word_float(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop_as_number()?;

    interpreter.push(NumberType::Float(value.as_float()).to_value());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::slice_index;

    #[test]
    fn slice_indices_clamp_and_wrap() {
        assert_eq!(slice_index(0, 5), 0);
        assert_eq!(slice_index(3, 5), 3);
        assert_eq!(slice_index(9, 5), 5);
        assert_eq!(slice_index(-1, 5), 4);
        assert_eq!(slice_index(-9, 5), 0);
        assert_eq!(slice_index(-1, 0), 0);
    }
}
