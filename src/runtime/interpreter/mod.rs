use crate::{
    lang::{source_buffer::SourceLocation, tokenizing::Token},
    runtime::{
        data_structures::{
            dictionary::{Dictionary, WordInfo},
            value::{NumberType, Value},
        },
        error,
    },
};
use std::fmt::{self, Display, Formatter};

pub mod catto_interpreter;

/// The default limit on nested named calls and evals.  Every step of a recursive word costs two
/// levels, the call itself and the `eval` of the chosen branch.
pub const DEFAULT_MAX_DEPTH: usize = 100_000;

/// A call stack item is a record of the executing word's name and the location in the source
/// text it was invoked from.  These items are read-only and the fields are accessed by member
/// functions.
#[derive(Clone, PartialEq, Eq)]
pub struct CallItem {
    location: SourceLocation,
    word: String,
}

impl CallItem {
    /// Create a new call stack item.
    pub fn new(word: String, location: SourceLocation) -> CallItem {
        CallItem { location, word }
    }

    /// Where in the source text was this word invoked?
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    // The name of the word being executed.
    pub fn word(&self) -> &String {
        &self.word
    }
}

/// Make sure that this word can be nicely displayed to the user in event of an error.
impl Display for CallItem {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.word)
    }
}

impl fmt::Debug for CallItem {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// The stack of named calls and evals currently being executed.  Only used to help the user track
/// down errors.
pub type CallStack = Vec<CallItem>;

/// The data stack of values managed by the interpreter.
pub type ValueStack = Vec<Value>;

/// Settings for an interpreter instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// How deeply named calls and evals may nest before evaluation fails with a recursion limit
    /// error instead of exhausting the host.
    pub max_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl InterpreterConfig {
    /// Create a config with a custom depth limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        InterpreterConfig { max_depth }
    }
}

/// Trait for managing the interpreter's data stack.  Intended to be called by the builtin words.
pub trait InterpreterStack {
    /// Examine the full data stack, bottom first.
    fn stack(&self) -> &ValueStack;

    /// Push a value onto the stack.
    fn push(&mut self, value: Value);

    /// Pop a value from the stack.  If the stack is empty a stack underflow error is returned.
    fn pop(&mut self) -> error::Result<Value>;

    /// Look at the top value without removing it.  Fails like `pop` on an empty stack.
    fn peek(&self) -> error::Result<&Value>;

    /// Pop the top value and read it as a number.  Non-numeric text is a numeric parse error.
    fn pop_as_number(&mut self) -> error::Result<NumberType>;

    /// Pop the top value and read it as an integer, floats are truncated toward zero.  A float
    /// with no `i64` value is an integer out of range error.
    fn pop_as_int(&mut self) -> error::Result<i64>;

    /// Pop the top value and read its truthiness.  Only the text `true` is true.
    fn pop_as_bool(&mut self) -> error::Result<bool>;

    /// Pop the top value as plain text.
    fn pop_as_string(&mut self) -> error::Result<String>;

    /// Remove the value at the given index from the top, 0 being the top itself.  If the index is
    /// out of bounds a stack underflow error is returned.
    fn pick(&mut self, index: usize) -> error::Result<Value>;
}

/// Trait for managing and executing words known to the interpreter.
pub trait WordManagement {
    /// If currently set, the location of the token being executed.
    fn current_location(&self) -> &Option<SourceLocation>;

    /// Store a definition under a name, replacing any earlier one.
    fn define_word(&mut self, location: Option<SourceLocation>, name: String, definition: Value);

    /// Find a user word in the dictionary by name.
    fn find_word(&self, name: &str) -> Option<&WordInfo>;

    /// Execute a word by name.  Builtins take priority over dictionary words.  If neither knows
    /// the name an undefined word error is returned.
    fn execute_word_named(&mut self, location: &SourceLocation, name: &str) -> error::Result<()>;

    /// The current call stack.
    fn call_stack(&self) -> &CallStack;

    /// Push a new name and location onto the call stack.
    fn call_stack_push(&mut self, name: String, location: SourceLocation);

    /// Pop the last name and location from the call stack.
    fn call_stack_pop(&mut self) -> error::Result<()>;
}

/// Trait for lexing and evaluating source text.
pub trait CodeManagement {
    /// Execute tokens left to right against the interpreter's stack and dictionary.
    fn evaluate(&mut self, tokens: &[Token]) -> error::Result<()>;

    /// Lex and evaluate a whole program at the top level.  The path is used to describe the text
    /// in error locations.
    fn process_source(&mut self, path: &str, source: &str) -> error::Result<()>;

    /// Lex text at runtime and evaluate it inline, as a named call or an eval does.  The name is
    /// recorded on the call stack for the duration and the nesting depth is checked against the
    /// configured limit.
    fn execute_source(
        &mut self,
        name: &str,
        location: &SourceLocation,
        source: &str,
    ) -> error::Result<()>;
}

/// Core interpreter trait, bringing together the stack, the dictionary and evaluation.
pub trait Interpreter: InterpreterStack + WordManagement + CodeManagement {
    /// The settings the interpreter was created with.
    fn config(&self) -> &InterpreterConfig;

    /// The current word dictionary.
    fn dictionary(&self) -> &Dictionary;
}
