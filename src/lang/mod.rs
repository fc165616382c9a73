/// Module for walking the original source text while keeping track of line and column.
pub mod source_buffer;

/// Module for turning source text into the list of literal, store, and invocation tokens the
/// interpreter executes.
pub mod tokenizing;
