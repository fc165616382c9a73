//! Command line driver.
//!
//! Reads the program from the given files, or standard input when there are none, pushes the
//! trailing arguments onto the stack, runs the program and prints the final stack one value per
//! line, bottom first.

use catto::runtime::{
    built_ins::BUILT_INS,
    data_structures::value::Value,
    error::{self, ErrorKind, ScriptError},
    interpreter::{
        CodeManagement, DEFAULT_MAX_DEPTH, Interpreter, InterpreterConfig, InterpreterStack,
        catto_interpreter::CattoInterpreter,
    },
};
use clap::Parser;
use std::{
    fs::read_to_string,
    io::{self, Write},
    path::PathBuf,
};
use tracing_subscriber::EnvFilter;

/// How the concatenated program text is described in error locations.
const PROGRAM_PATH: &str = "<program>";

#[derive(Parser)]
#[command(name = "catto")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run a concatenative string stack program", long_about = None)]
struct Cli {
    /// Program source file, may be given more than once.  Files are joined in order.  Reads
    /// standard input when no file is given.
    #[arg(short, long = "file", value_name = "PATH")]
    files: Vec<PathBuf>,

    /// Maximum nesting of named calls and evals.
    #[arg(long, env = "CATTO_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Print the builtin words and exit.
    #[arg(long)]
    list_words: bool,

    /// After a successful run, list the dictionary on standard error.
    #[arg(long)]
    dump_dictionary: bool,

    /// Values pushed onto the stack before the program runs, bottom first.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    values: Vec<String>,
}

/// Log to standard error, filtered by `CATTO_LOG`.  Quiet unless asked.
fn init_logging() {
    let filter = EnvFilter::try_from_env("CATTO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read the whole program.  Multiple files are joined with new lines so that the last word of one
/// file can't run into the first word of the next.
fn read_program(files: &[PathBuf]) -> error::Result<String> {
    if files.is_empty() {
        return Ok(io::read_to_string(io::stdin())?);
    }

    let mut sources = Vec::with_capacity(files.len());

    for path in files {
        match read_to_string(path) {
            Ok(source) => sources.push(source),
            Err(err) => {
                return ScriptError::new_as_result(
                    None,
                    ErrorKind::Io(format!("Could not read file {}: {}", path.display(), err)),
                    None,
                );
            }
        }
    }

    Ok(sources.join("\n"))
}

fn main() -> error::Result<()> {
    init_logging();

    let cli = Cli::parse();

    if cli.list_words {
        let mut out = io::stdout().lock();

        for info in BUILT_INS {
            writeln!(out, "{}", info)?;
        }

        return Ok(());
    }

    let source = read_program(&cli.files)?;

    let mut interpreter =
        CattoInterpreter::with_config(InterpreterConfig::with_max_depth(cli.max_depth));

    for value in &cli.values {
        interpreter.push(Value::from(value));
    }

    interpreter.process_source(PROGRAM_PATH, &source)?;

    // Looks like everything went well, print the stack bottom first.
    let mut out = io::stdout().lock();

    for value in interpreter.stack() {
        writeln!(out, "{}", value)?;
    }

    out.flush()?;

    if cli.dump_dictionary {
        eprintln!("{}", interpreter.dictionary());
    }

    Ok(())
}
