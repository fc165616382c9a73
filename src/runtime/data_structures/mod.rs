/// Module contains the Value type, the only kind of data the interpreter manages, along with the
/// numeric and boolean views words read out of it.
pub mod value;

/// The dictionary module provides the user word dictionary used by the interpreter.
pub mod dictionary;
