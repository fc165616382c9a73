//! An interpreter for a tiny concatenative language where every value is a string.
//!
//! Programs are sequences of whitespace separated words.  Plain words are pushed, `:name` pops the
//! top value into the dictionary and `$name` runs a builtin or re-lexes and runs a stored
//! definition.  Running one program after another against the same interpreter is the same as
//! running their concatenation.
//!
//! ```
//! use catto::runtime::interpreter::{CodeManagement, InterpreterStack};
//! use catto::runtime::interpreter::catto_interpreter::CattoInterpreter;
//!
//! let mut interpreter = CattoInterpreter::new();
//! interpreter.process_source("<doc>", "\"$dupe $*\" :square 7 $square").unwrap();
//!
//! assert_eq!(interpreter.stack()[0].as_str(), "49");
//! ```

/// Module for managing the source text and turning it into tokens.
pub mod lang;

/// Module for the runtime and the data structures used by the interpreter.  As well as the
/// interpreter itself.
pub mod runtime;
