use tracing::{ debug, trace };
use crate::{ lang::{ source_buffer::SourceLocation,
                     tokenizing::{ tokenize_from_source,
                                   Token } },
             runtime::{ built_ins::find_builtin,
                        data_structures::{ dictionary::{ Dictionary,
                                                         WordInfo },
                                           value::{ NumberType,
                                                    Value } },
                        error::{ self,
                                 script_error,
                                 ErrorKind },
                        interpreter::{ CallItem,
                                       CallStack,
                                       CodeManagement,
                                       Interpreter,
                                       InterpreterConfig,
                                       InterpreterStack,
                                       ValueStack,
                                       WordManagement },
                        native_stack::ensure_sufficient_stack } };



/// The core interpreter implementation.  It owns the one data stack and the one dictionary that
/// every nested evaluation shares.
pub struct CattoInterpreter
{
    /// Settings such as the nesting limit.
    config: InterpreterConfig,

    /// The data stack used by the interpreter.
    stack: ValueStack,


    /// The location of the token currently being executed.
    current_location: Option<SourceLocation>,

    /// The named calls and evals currently executing.  Its length is the nesting depth.
    call_stack: CallStack,


    /// The dictionary of user words.
    dictionary: Dictionary
}


impl Interpreter for CattoInterpreter
{
    fn config(&self) -> &InterpreterConfig
    {
        &self.config
    }

    fn dictionary(&self) -> &Dictionary
    {
        &self.dictionary
    }
}


impl InterpreterStack for CattoInterpreter
{
    fn stack(&self) -> &ValueStack
    {
        &self.stack
    }

    fn push(&mut self, value: Value)
    {
        self.stack.push(value);
    }

    fn pop(&mut self) -> error::Result<Value>
    {
        match self.stack.pop()
        {
            Some(value) => Ok(value),
            None        => script_error(self, ErrorKind::StackUnderflow)
        }
    }

    fn peek(&self) -> error::Result<&Value>
    {
        match self.stack.last()
        {
            Some(value) => Ok(value),
            None        => script_error(self, ErrorKind::StackUnderflow)
        }
    }

    fn pop_as_number(&mut self) -> error::Result<NumberType>
    {
        let value = self.pop()?;

        match value.get_number()
        {
            Some(number) => Ok(number),
            None         => script_error(self, ErrorKind::NumericParseError(value.into_string()))
        }
    }

    fn pop_as_int(&mut self) -> error::Result<i64>
    {
        let value = self.pop()?;

        match value.get_number()
        {
            Some(number) => match number.as_int()
                {
                    Some(int) => Ok(int),
                    None      => script_error(self, ErrorKind::IntegerOutOfRange(value.into_string()))
                },

            None => script_error(self, ErrorKind::NumericParseError(value.into_string()))
        }
    }

    fn pop_as_bool(&mut self) -> error::Result<bool>
    {
        Ok(self.pop()?.get_bool_val())
    }

    fn pop_as_string(&mut self) -> error::Result<String>
    {
        Ok(self.pop()?.into_string())
    }

    fn pick(&mut self, index: usize) -> error::Result<Value>
    {
        if index >= self.stack.len()
        {
            return script_error(self, ErrorKind::StackUnderflow);
        }

        let value = self.stack.remove(self.stack.len() - 1 - index);
        Ok(value)
    }
}


impl CodeManagement for CattoInterpreter
{
    fn evaluate(&mut self, tokens: &[Token]) -> error::Result<()>
    {
        for token in tokens
        {
            // Keep track of where we are so that any error raised by this token can point at it.
            self.current_location = Some(token.location().clone());

            trace!(token = %token, depth = self.call_stack.len(), "evaluating");

            match token
            {
                Token::Literal(_, text) => self.push(Value::from(text)),

                Token::Store(location, name) =>
                    {
                        let definition = self.pop()?;
                        self.define_word(Some(location.clone()), name.clone(), definition);
                    },

                Token::Invoke(location, name) => self.execute_word_named(location, name)?
            }
        }

        Ok(())
    }

    fn process_source(&mut self, path: &str, source: &str) -> error::Result<()>
    {
        let tokens = tokenize_from_source(path, source)?;

        debug!(path, tokens = tokens.len(), "processing source");
        self.evaluate(&tokens)
    }

    fn execute_source(&mut self,
                      name: &str,
                      location: &SourceLocation,
                      source: &str) -> error::Result<()>
    {
        let max_depth = self.config().max_depth;

        if self.call_stack.len() >= max_depth
        {
            return script_error(self, ErrorKind::RecursionLimit(max_depth));
        }

        self.call_stack_push(name.to_string(), location.clone());
        debug!(word = name, depth = self.call_stack.len(), "entering nested evaluation");

        let result =
            match tokenize_from_source(&format!("<{}>", name), source)
            {
                Ok(tokens) => ensure_sufficient_stack(|| self.evaluate(&tokens)),
                Err(error) => Err(error.with_call_stack(&self.call_stack))
            };

        // Unwind the call stack on both paths, the error already holds its own copy.
        self.call_stack_pop()?;
        result
    }
}


impl WordManagement for CattoInterpreter
{
    fn current_location(&self) -> &Option<SourceLocation>
    {
        &self.current_location
    }

    fn define_word(&mut self, location: Option<SourceLocation>, name: String, definition: Value)
    {
        debug!(word = %name, definition = ?definition, "storing word");

        let info = WordInfo::new(location, name.clone(), definition);
        self.dictionary.insert(name, info);
    }

    fn find_word(&self, name: &str) -> Option<&WordInfo>
    {
        self.dictionary.try_get(name)
    }

    fn execute_word_named(&mut self, location: &SourceLocation, name: &str) -> error::Result<()>
    {
        if let Some(builtin) = find_builtin(name)
        {
            return builtin.execute(self);
        }

        // Copy the definition out so the dictionary isn't borrowed while the word runs, the word
        // is free to redefine itself.
        let definition = match self.find_word(name)
            {
                Some(word) => word.definition.to_string(),
                None       => return script_error(self, ErrorKind::UndefinedWord(name.to_string()))
            };

        self.execute_source(name, location, &definition)
    }

    fn call_stack(&self) -> &CallStack
    {
        &self.call_stack
    }

    fn call_stack_push(&mut self, name: String, location: SourceLocation)
    {
        self.call_stack.push(CallItem::new(name, location));
    }

    fn call_stack_pop(&mut self) -> error::Result<()>
    {
        if self.call_stack.pop().is_none()
        {
            return script_error(self, ErrorKind::StackUnderflow);
        }

        Ok(())
    }
}


impl CattoInterpreter
{
    /// Create a new interpreter with an empty stack, an empty dictionary and default settings.
    pub fn new() -> CattoInterpreter
    {
        CattoInterpreter::with_config(InterpreterConfig::default())
    }

    /// Create a new interpreter with custom settings.
    pub fn with_config(config: InterpreterConfig) -> CattoInterpreter
    {
        CattoInterpreter
            {
                config,
                stack: ValueStack::new(),
                current_location: None,
                call_stack: CallStack::new(),
                dictionary: Dictionary::new()
            }
    }

    /// Take the final stack out of the interpreter, bottom first.
    pub fn into_stack(self) -> ValueStack
    {
        self.stack
    }
}


impl Default for CattoInterpreter
{
    fn default() -> Self
    {
        Self::new()
    }
}



#[cfg(test)]
mod tests
{
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(source: &str) -> error::Result<Vec<String>>
    {
        let mut interpreter = CattoInterpreter::new();

        interpreter.process_source("<test>", source)?;
        Ok(interpreter.into_stack().into_iter().map(Value::into_string).collect())
    }

    #[test]
    fn literals_are_pushed_in_order()
    {
        assert_eq!(run("a b c").unwrap(), vec![ "a", "b", "c" ]);
    }

    #[test]
    fn stores_pop_into_the_dictionary()
    {
        let mut interpreter = CattoInterpreter::new();

        interpreter.process_source("<test>", "keep \"$dupe\" :twice").unwrap();

        assert_eq!(interpreter.stack(), &vec![ Value::from("keep") ]);
        assert_eq!(interpreter.find_word("twice").unwrap().definition, "$dupe");
        assert_eq!(interpreter.find_word("twice").unwrap().location.clone().unwrap().column(), 14);
    }

    #[test]
    fn store_on_empty_stack_underflows()
    {
        let error = run(":x").unwrap_err();

        assert_eq!(error.kind(), &ErrorKind::StackUnderflow);
        assert_eq!(error.location().clone().unwrap().column(), 1);
    }

    #[test]
    fn errors_carry_the_call_stack()
    {
        let mut interpreter = CattoInterpreter::new();
        let error = interpreter.process_source("<test>", "\"$drop\" :inner \"$inner\" :outer $outer")
                               .unwrap_err();

        let names: Vec<&String> = error.call_stack()
                                       .as_ref()
                                       .unwrap()
                                       .iter()
                                       .map(|item| item.word())
                                       .collect();

        assert_eq!(error.kind(), &ErrorKind::StackUnderflow);
        assert_eq!(names, vec![ "outer", "inner" ]);

        let call_stack = error.call_stack().as_ref().unwrap();

        assert_eq!(call_stack[0].location(), &SourceLocation::new_from_info("<test>", 1, 32));
        assert_eq!(call_stack[1].location(), &SourceLocation::new_from_info("<outer>", 1, 1));
        assert_eq!(error.location().clone().unwrap().path(), "<inner>");

        // The interpreter itself is back at the top level.
        assert!(interpreter.call_stack().is_empty());
    }

    #[test]
    fn depth_limit_stops_runaway_recursion()
    {
        let mut interpreter = CattoInterpreter::with_config(InterpreterConfig::with_max_depth(16));
        let error = interpreter.process_source("<test>", "\"$loop\" :loop $loop").unwrap_err();

        assert_eq!(error.kind(), &ErrorKind::RecursionLimit(16));
        assert_eq!(error.call_stack().as_ref().unwrap().len(), 16);
        assert!(interpreter.call_stack().is_empty());
    }

    #[test]
    fn lex_errors_in_definitions_report_the_word()
    {
        let error = run("\"\\\"unclosed\" :broken $broken").unwrap_err();

        assert_eq!(error.kind(), &ErrorKind::UnterminatedQuote);
        assert_eq!(error.location().clone().unwrap().path(), "<broken>");
        assert_eq!(error.call_stack().as_ref().unwrap().len(), 1);
    }
}
