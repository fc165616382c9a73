/// Words that manipulate the data stack.
mod stack_words;

/// Words that work with math, logic and value equality.
mod math_logic_words;

/// Words that work with strings and numeric conversion.
mod string_words;

/// Branch selection and inline evaluation.
mod control_words;

use crate::runtime::{error, interpreter::Interpreter};
use lazy_static::lazy_static;
use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
};

/// The closed set of operations the language provides.  Invocations are resolved to one of these
/// once, through the name table, and then dispatched by match.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Builtin {
    Drop,
    Dupe,
    Swap,
    /// Move the value at the given depth, counting the top as 1, to the top.
    Rot(usize),
    Add,
    Subtract,
    Multiply,
    Divide,
    Negate,
    And,
    Or,
    Not,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    If,
    Len,
    Cat,
    Substr,
    Replace,
    Int,
    Float,
    Eval,
}

impl Builtin {
    /// Run the operation against the interpreter's stack.
    pub fn execute(self, interpreter: &mut dyn Interpreter) -> error::Result<()> {
        match self {
            Builtin::Drop => stack_words::word_drop(interpreter),
            Builtin::Dupe => stack_words::word_dupe(interpreter),
            Builtin::Swap => stack_words::word_swap(interpreter),
            Builtin::Rot(count) => stack_words::word_rot(interpreter, count),

            Builtin::Add => math_logic_words::word_add(interpreter),
            Builtin::Subtract => math_logic_words::word_subtract(interpreter),
            Builtin::Multiply => math_logic_words::word_multiply(interpreter),
            Builtin::Divide => math_logic_words::word_divide(interpreter),
            Builtin::Negate => math_logic_words::word_negate(interpreter),
            Builtin::And => math_logic_words::word_logic_and(interpreter),
            Builtin::Or => math_logic_words::word_logic_or(interpreter),
            Builtin::Not => math_logic_words::word_logic_not(interpreter),
            Builtin::Equal => math_logic_words::word_equal(interpreter),
            Builtin::NotEqual => math_logic_words::word_not_equal(interpreter),
            Builtin::Less => math_logic_words::word_less(interpreter),
            Builtin::Greater => math_logic_words::word_greater(interpreter),
            Builtin::LessEqual => math_logic_words::word_less_equal(interpreter),
            Builtin::GreaterEqual => math_logic_words::word_greater_equal(interpreter),

            Builtin::Len => string_words::word_len(interpreter),
            Builtin::Cat => string_words::word_cat(interpreter),
            Builtin::Substr => string_words::word_substr(interpreter),
            Builtin::Replace => string_words::word_replace(interpreter),
            Builtin::Int => string_words::word_int(interpreter),
            Builtin::Float => string_words::word_float(interpreter),

            Builtin::If => control_words::word_if(interpreter),
            Builtin::Eval => control_words::word_eval(interpreter),
        }
    }
}

/// The name, documentation and operation of a builtin word.
#[derive(Clone, Copy, Debug)]
pub struct BuiltinInfo {
    pub name: &'static str,
    pub builtin: Builtin,
    pub description: &'static str,
    pub signature: &'static str,
}

/// One line listing, in the same shape as the dictionary listing.
impl Display for BuiltinInfo {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{:8}  {:28}  --  {}",
            self.name, self.signature, self.description
        )
    }
}

/// Simplify writing out the entries of the builtin table.
macro_rules! built_in {
    ($name:literal, $builtin:expr, $description:literal, $signature:literal) => {
        BuiltinInfo {
            name: $name,
            builtin: $builtin,
            description: $description,
            signature: $signature,
        }
    };
}

/// Every builtin word, in listing order.
pub const BUILT_INS: &[BuiltinInfo] = &[
    // Stack words.
    built_in!("drop", Builtin::Drop, "Discard the top value.", "value --"),
    built_in!("dupe", Builtin::Dupe, "Duplicate the top value.", "value -- value value"),
    built_in!("swap", Builtin::Swap, "Swap the top 2 values.", "a b -- b a"),
    built_in!("rot3", Builtin::Rot(3), "Rotate the third value to the top.", "a b c -- b c a"),
    built_in!("rot4", Builtin::Rot(4), "Rotate the 4th value to the top.", "x1 .. x4 -- x2 .. x4 x1"),
    built_in!("rot5", Builtin::Rot(5), "Rotate the 5th value to the top.", "x1 .. x5 -- x2 .. x5 x1"),
    built_in!("rot6", Builtin::Rot(6), "Rotate the 6th value to the top.", "x1 .. x6 -- x2 .. x6 x1"),
    built_in!("rot7", Builtin::Rot(7), "Rotate the 7th value to the top.", "x1 .. x7 -- x2 .. x7 x1"),
    built_in!("rot8", Builtin::Rot(8), "Rotate the 8th value to the top.", "x1 .. x8 -- x2 .. x8 x1"),
    built_in!("rot9", Builtin::Rot(9), "Rotate the 9th value to the top.", "x1 .. x9 -- x2 .. x9 x1"),
    // Math words.
    built_in!("+", Builtin::Add, "Add 2 numbers.", "a b -- result"),
    built_in!("-", Builtin::Subtract, "Subtract 2 numbers.", "a b -- result"),
    built_in!("*", Builtin::Multiply, "Multiply 2 numbers.", "a b -- result"),
    built_in!("/", Builtin::Divide, "Divide 2 numbers, always giving a float.", "a b -- result"),
    built_in!("~", Builtin::Negate, "Negate a number.", "a -- -a"),
    // Logic words.
    built_in!("and", Builtin::And, "True if both values are true.", "a b -- bool"),
    built_in!("or", Builtin::Or, "True if either value is true.", "a b -- bool"),
    built_in!("not", Builtin::Not, "Logically invert a value.", "a -- bool"),
    // Equality words.
    built_in!("==", Builtin::Equal, "Are 2 values equal, numerically if both are numbers?", "a b -- bool"),
    built_in!("!=", Builtin::NotEqual, "Are 2 values different?", "a b -- bool"),
    built_in!("<", Builtin::Less, "Is one number less than another?", "a b -- bool"),
    built_in!(">", Builtin::Greater, "Is one number greater than another?", "a b -- bool"),
    built_in!("<=", Builtin::LessEqual, "Is one number less than or equal to another?", "a b -- bool"),
    built_in!(">=", Builtin::GreaterEqual, "Is one number greater or equal to another?", "a b -- bool"),
    // Control words.
    built_in!("if", Builtin::If, "Select one of 2 values, without running it.", "cond then else -- chosen"),
    built_in!("eval", Builtin::Eval, "Lex and run a value against the current stack.", "code -- ..."),
    // String words.
    built_in!("len", Builtin::Len, "Number of characters in a value.", "string -- length"),
    built_in!("cat", Builtin::Cat, "Join 2 values together.", "a b -- ab"),
    built_in!("substr", Builtin::Substr, "Characters from start up to end.", "string start end -- sub"),
    built_in!("replace", Builtin::Replace, "Replace every occurrence of old with new.", "string old new -- result"),
    built_in!("int", Builtin::Int, "Truncate a number to an integer.", "number -- int"),
    built_in!("float", Builtin::Float, "Convert a number to a float.", "number -- float"),
];

lazy_static! {
    /// Name lookup for the builtin table.
    static ref BUILT_IN_NAMES: HashMap<&'static str, Builtin> = BUILT_INS
        .iter()
        .map(|info| (info.name, info.builtin))
        .collect();
}

/// Resolve an invocation name to a builtin, if it names one.
pub fn find_builtin(name: &str) -> Option<Builtin> {
    BUILT_IN_NAMES.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_are_unique() {
        assert_eq!(BUILT_IN_NAMES.len(), BUILT_INS.len());
    }

    #[test]
    fn resolves_names() {
        assert_eq!(find_builtin("dupe"), Some(Builtin::Dupe));
        assert_eq!(find_builtin("rot5"), Some(Builtin::Rot(5)));
        assert_eq!(find_builtin("=="), Some(Builtin::Equal));
        assert_eq!(find_builtin("dup"), None);
        assert_eq!(find_builtin("rot2"), None);
        assert_eq!(find_builtin(""), None);
    }
}
