//! Property tests for the evaluator and the lexer.

use catto::lang::tokenizing::{Token, tokenize_from_source};
use catto::runtime::data_structures::value::Value;
use catto::runtime::error::ErrorKind;
use catto::runtime::interpreter::catto_interpreter::CattoInterpreter;
use catto::runtime::interpreter::{CodeManagement, Interpreter, InterpreterConfig, InterpreterStack};
use proptest::prelude::*;
use std::collections::HashMap;

/// Stack and dictionary after a run, or the kind of error that stopped it.
type Outcome = Result<(Vec<String>, HashMap<String, String>), ErrorKind>;

fn interpreter() -> CattoInterpreter {
    CattoInterpreter::with_config(InterpreterConfig::with_max_depth(32))
}

fn outcome(interp: &CattoInterpreter) -> (Vec<String>, HashMap<String, String>) {
    let stack = interp.stack().iter().map(|value| value.to_string()).collect();
    (stack, interp.dictionary().definitions())
}

fn run_all(programs: &[String]) -> Outcome {
    let mut interp = interpreter();

    for program in programs {
        interp
            .process_source("<prop>", program)
            .map_err(|error| error.kind().clone())?;
    }

    Ok(outcome(&interp))
}

fn token_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("a".to_string()),
        Just("b".to_string()),
        Just("1".to_string()),
        Just("2.5".to_string()),
        Just("true".to_string()),
        Just(r#""a b""#.to_string()),
        Just(r#""$w""#.to_string()),
        Just(r#""1 $+""#.to_string()),
        Just("$dupe".to_string()),
        Just("$drop".to_string()),
        Just("$swap".to_string()),
        Just("$rot3".to_string()),
        Just("$+".to_string()),
        Just("$==".to_string()),
        Just("$eval".to_string()),
        Just(":w".to_string()),
        Just("$w".to_string()),
    ]
}

fn program_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(token_strategy(), 0..12).prop_map(|tokens| tokens.join(" "))
}

/// Kind and text of each token, locations left out.
fn shapes(tokens: &[Token]) -> Vec<(char, String)> {
    tokens
        .iter()
        .map(|token| {
            let kind = match token {
                Token::Literal(_, _) => 'l',
                Token::Invoke(_, _) => 'i',
                Token::Store(_, _) => 's',
            };

            (kind, token.text().clone())
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn running_in_sequence_matches_running_the_concatenation(
        first in program_strategy(),
        second in program_strategy(),
    ) {
        let joined = format!("{} {}", first, second);

        prop_assert_eq!(run_all(&[first, second]), run_all(&[joined]));
    }

    #[test]
    fn dupe_then_drop_changes_nothing(values in prop::collection::vec("[a-z0-9]{1,6}", 1..6)) {
        let mut interp = interpreter();

        for value in &values {
            interp.push(Value::from(value));
        }

        let before = interp.stack().clone();
        interp.process_source("<prop>", "$dupe $drop").unwrap();

        prop_assert_eq!(interp.stack(), &before);
    }

    #[test]
    fn swap_twice_changes_nothing(values in prop::collection::vec("[a-z0-9]{1,6}", 2..6)) {
        let mut interp = interpreter();

        for value in &values {
            interp.push(Value::from(value));
        }

        let before = interp.stack().clone();
        interp.process_source("<prop>", "$swap $swap").unwrap();

        prop_assert_eq!(interp.stack(), &before);
    }

    #[test]
    fn printed_tokens_lex_back_the_same(source in r#"[a-z$: "\\\n]{0,24}"#) {
        let first = tokenize_from_source("<prop>", &source);

        match first {
            Ok(tokens) => {
                let printed = tokens
                    .iter()
                    .map(|token| token.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");

                let again = tokenize_from_source("<again>", &printed).unwrap();

                prop_assert_eq!(shapes(&tokens), shapes(&again));
            }

            Err(error) => {
                prop_assert_eq!(error.kind(), &ErrorKind::UnterminatedQuote);
            }
        }
    }

    #[test]
    fn stringified_text_lexes_to_one_literal(text in "\\PC{0,16}|[ \t\r\n\"\\\\]{0,8}") {
        let tokens = tokenize_from_source("<prop>", &Value::stringify(&text)).unwrap();

        prop_assert_eq!(tokens.len(), 1);
        prop_assert!(tokens[0].is_literal());
        prop_assert_eq!(tokens[0].text(), &text);
    }
}
