use std::{ error::Error,
           fmt::{ self, Debug, Display, Formatter } };
use thiserror::Error as ThisError;
use crate::{ runtime::interpreter::CallStack,
             lang::source_buffer::SourceLocation };

use super::interpreter::Interpreter;



pub type Result<T> = std::result::Result<T, ScriptError>;



/// Every way a program can fail.  None of these can be recovered from within the language, they
/// all abort the whole evaluation.
#[derive(Clone, PartialEq, Eq, Debug, ThisError)]
pub enum ErrorKind
{
    /// A quoted region was still open at the end of the text.
    #[error("Unterminated quoted literal.")]
    UnterminatedQuote,

    /// A word needed more values than the stack holds.
    #[error("Stack underflow.")]
    StackUnderflow,

    /// An invocation named neither a builtin nor a dictionary word.
    #[error("Undefined word '{0}'.")]
    UndefinedWord(String),

    /// A word that works on numbers was given text that isn't one.
    #[error("Expected a numeric value, found '{0}'.")]
    NumericParseError(String),

    /// A word that needs an integer was given a number that has no `i64` value.
    #[error("Value '{0}' does not fit in an integer.")]
    IntegerOutOfRange(String),

    /// Division with a zero divisor.
    #[error("Division by zero.")]
    DivisionByZero,

    /// Named calls and evals nested deeper than the configured limit.
    #[error("Maximum evaluation depth of {0} exceeded.")]
    RecursionLimit(usize),

    /// Reading program text failed.
    #[error("I/O error: {0}")]
    Io(String)
}



/// Any error that occurs during the lexing or execution of a program.
#[derive(Clone)]
pub struct ScriptError
{
    /// The location in the source text the error occurred, if available.
    location: Option<SourceLocation>,

    /// What went wrong.
    kind: ErrorKind,

    /// The program's call stack at the time of the error, if available.
    call_stack: Option<CallStack>
}


impl Error for ScriptError
{
    fn source(&self) -> Option<&(dyn Error + 'static)>
    {
        Some(&self.kind)
    }
}


/// Pretty print the error along with where it happened and how execution got there.
impl Display for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match &self.location
        {
            Some(location) => write!(f, "{}: {}", location, self.kind)?,
            None => write!(f, "{}", self.kind)?
        }

        if let Some(call_stack) = &self.call_stack
        {
            if !call_stack.is_empty()
            {
                write!(f, "\n\nCall stack\n")?;

                for item in call_stack.iter().rev()
                {
                    writeln!(f, "  {}", item)?;
                }
            }
        }

        Ok(())
    }
}


/// Returning an error from main prints it through Debug, so make that the readable form.
impl Debug for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", self)
    }
}


impl ScriptError
{
    /// Create a new ScriptError.
    pub fn new(location: Option<SourceLocation>,
               kind: ErrorKind,
               call_stack: Option<CallStack>) -> ScriptError
    {
        ScriptError
            {
                location,
                kind,
                call_stack
            }
    }

    /// Create a new ScriptError and wrap it in a Result::Err.
    pub fn new_as_result<T>(location: Option<SourceLocation>,
                            kind: ErrorKind,
                            call_stack: Option<CallStack>) -> Result<T>
    {
        Err(ScriptError::new(location, kind, call_stack))
    }

    /// Attach a call stack to an error that was raised without one, such as a lexing error in a
    /// re-lexed definition.
    pub fn with_call_stack(mut self, call_stack: &CallStack) -> ScriptError
    {
        if self.call_stack.is_none()
        {
            self.call_stack = Some(call_stack.clone());
        }

        self
    }

    /// If available, the location in the source text the error occurred.
    pub fn location(&self) -> &Option<SourceLocation>
    {
        &self.location
    }

    /// What went wrong.
    pub fn kind(&self) -> &ErrorKind
    {
        &self.kind
    }

    /// If available, the program's call stack at the time of the error.
    pub fn call_stack(&self) -> &Option<CallStack>
    {
        &self.call_stack
    }
}


/// Allow for the conversion of a std::io::Error into a ScriptError.
impl From<std::io::Error> for ScriptError
{
    fn from(error: std::io::Error) -> ScriptError
    {
        ScriptError::new(None, ErrorKind::Io(error.to_string()), None)
    }
}



/// A convenience function for creating a ScriptError and wrapping it in a Result::Err using the
/// interpreter's current location and call stack.
pub fn script_error<T>(interpreter: &dyn Interpreter, kind: ErrorKind) -> Result<T>
{
    let location = interpreter.current_location().clone();
    let call_stack = interpreter.call_stack().clone();

    ScriptError::new_as_result(location, kind, Some(call_stack))
}



#[cfg(test)]
mod tests
{
    use super::*;
    use crate::runtime::interpreter::CallItem;

    #[test]
    fn display_includes_location_and_call_stack()
    {
        let location = SourceLocation::new_from_info("<program>", 1, 5);
        let call_stack = vec![ CallItem::new("factorial".to_string(),
                                             SourceLocation::new_from_info("<program>", 1, 1)) ];
        let error = ScriptError::new(Some(location),
                                     ErrorKind::UndefinedWord("bogus".to_string()),
                                     Some(call_stack));

        assert_eq!(error.to_string(),
                   "<program> (1, 5): Undefined word 'bogus'.\n\nCall stack\n  <program> (1, 1): factorial\n");
    }

    #[test]
    fn empty_call_stack_is_not_printed()
    {
        let error = ScriptError::new(None, ErrorKind::StackUnderflow, Some(Vec::new()));

        assert_eq!(error.to_string(), "Stack underflow.");
        assert_eq!(format!("{:?}", error), "Stack underflow.");
    }

    #[test]
    fn io_errors_convert()
    {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.cat");
        let error = ScriptError::from(io);

        assert_eq!(error.kind(), &ErrorKind::Io("missing.cat".to_string()));
        assert!(error.source().is_some());
    }
}
