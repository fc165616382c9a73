/// The core data structures used by the interpreter.
pub mod data_structures;

/// Module for defining the builtin words and the name table used to resolve them.
pub mod built_ins;

/// Module for defining the error reporting of the interpreter.
pub mod error;

/// Module for defining the core functionality of the interpreter.  This includes the evaluator
/// and tools for examining the interpreter's state.
pub mod interpreter;

/// Keeps deep recursion through nested evaluation from overflowing the host stack.
pub mod native_stack;
