use std::{
    cmp::Ordering,
    fmt::{self, Debug, Display, Formatter},
};

/// Canonical text of a true boolean.
pub const TRUE_TEXT: &str = "true";

/// Canonical text of a false boolean.
pub const FALSE_TEXT: &str = "false";

/// 2^63, the first float past the top of the `i64` range.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// A numeric view of a value, computed when a word needs it and never stored on the stack.
#[derive(Clone, Copy)]
pub enum NumberType {
    /// The text was a whole number that fits in 64 bits.
    Int(i64),

    /// Any other numeric text.
    Float(f64),
}

impl PartialEq for NumberType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NumberType::Int(a), NumberType::Int(b)) => a == b,
            (NumberType::Float(a), NumberType::Float(b)) => a == b,

            (NumberType::Float(a), NumberType::Int(b)) => a == &(*b as f64),
            (NumberType::Int(a), NumberType::Float(b)) => &(*a as f64) == b,
        }
    }
}

impl PartialOrd for NumberType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (NumberType::Int(a), NumberType::Int(b)) => a.partial_cmp(b),
            (NumberType::Float(a), NumberType::Float(b)) => a.partial_cmp(b),

            (NumberType::Float(a), NumberType::Int(b)) => a.partial_cmp(&(*b as f64)),
            (NumberType::Int(a), NumberType::Float(b)) => (*a as f64).partial_cmp(b),
        }
    }
}

/// Integers print plainly.  Floats print in their shortest form, keeping a trailing `.0` on
/// whole values so they still read as floats.
impl Display for NumberType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            NumberType::Int(num) => write!(f, "{}", num),
            NumberType::Float(num) if num.is_finite() && num.fract() == 0.0 && num.abs() < 1e16 => {
                write!(f, "{:.1}", num)
            }
            NumberType::Float(num) => write!(f, "{}", num),
        }
    }
}

impl Debug for NumberType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            NumberType::Int(num) => write!(f, "{} i", num),
            NumberType::Float(num) => write!(f, "{} f", num),
        }
    }
}

impl NumberType {
    /// Parse text as a number.  Whole numbers that fit become `Int`, anything else that Rust can
    /// read as a float becomes `Float`.  Other than the exact texts non-finite floats print as,
    /// text without a single digit, such as `infinity` or `nan`, is never numeric.
    pub fn parse(text: &str) -> Option<NumberType> {
        match text {
            "inf" => return Some(NumberType::Float(f64::INFINITY)),
            "-inf" => return Some(NumberType::Float(f64::NEG_INFINITY)),
            "NaN" => return Some(NumberType::Float(f64::NAN)),
            _ => {}
        }

        if !text.bytes().any(|byte| byte.is_ascii_digit()) {
            return None;
        }

        if let Ok(int) = text.parse::<i64>() {
            Some(NumberType::Int(int))
        } else if let Ok(float) = text.parse::<f64>() {
            Some(NumberType::Float(float))
        } else {
            None
        }
    }

    /// The value as a float, converting integers as needed.
    pub fn as_float(&self) -> f64 {
        match self {
            NumberType::Int(num) => *num as f64,
            NumberType::Float(num) => *num,
        }
    }

    /// The value as an integer, floats are truncated toward zero.  Floats that are not finite
    /// or fall outside the `i64` range have no integer value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            NumberType::Int(num) => Some(*num),
            NumberType::Float(num) => {
                let truncated = num.trunc();

                if truncated >= -I64_LIMIT && truncated < I64_LIMIT {
                    Some(truncated as i64)
                } else {
                    None
                }
            }
        }
    }

    /// Is this exactly zero?
    pub fn is_zero(&self) -> bool {
        self.as_float() == 0.0
    }
}

/// The only thing that ever lives on the stack or in the dictionary.  A value is just text, any
/// numeric or boolean meaning is read out of it by the words that need one.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Value {
    text: String,
}

/// Values print as their raw text.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Values debug print as a quoted literal.
impl Debug for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", Value::stringify(&self.text))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value { text }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value {
            text: text.to_string(),
        }
    }
}

impl From<&String> for Value {
    fn from(text: &String) -> Self {
        Value { text: text.clone() }
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl Value {
    /// Borrow the value's text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Take the value's text.
    pub fn into_string(self) -> String {
        self.text
    }

    /// Try to read the value as a number.
    pub fn get_number(&self) -> Option<NumberType> {
        NumberType::parse(&self.text)
    }

    /// A value is true only when its text is exactly `true`.
    pub fn get_bool_val(&self) -> bool {
        self.text == TRUE_TEXT
    }

    /// Convert the text into a quoted literal that lexes back to the original text.
    pub fn stringify(text: &str) -> String {
        let mut result = String::with_capacity(text.len() + 2);

        result.push('"');

        for character in text.chars() {
            match character {
                '"' => result.push_str("\\\""),
                '\\' => result.push_str("\\\\"),
                '\n' => result.push_str("\\n"),
                '\r' => result.push_str("\\r"),
                '\t' => result.push_str("\\t"),
                _ => result.push(character),
            }
        }

        result.push('"');

        result
    }
}

/// Helper trait for converting Rust values into stack values.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::from(if *self { TRUE_TEXT } else { FALSE_TEXT })
    }
}

impl ToValue for i64 {
    fn to_value(&self) -> Value {
        NumberType::Int(*self).to_value()
    }
}

impl ToValue for usize {
    fn to_value(&self) -> Value {
        Value::from(self.to_string())
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        NumberType::Float(*self).to_value()
    }
}

impl ToValue for NumberType {
    fn to_value(&self) -> Value {
        Value::from(self.to_string())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::from(self)
    }
}

impl ToValue for &str {
    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}
