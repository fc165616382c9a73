use crate::{
    lang::source_buffer::{SourceBuffer, SourceLocation},
    runtime::{
        data_structures::value::Value,
        error::{self, ErrorKind, ScriptError},
    },
};
use std::fmt::{self, Debug, Display, Formatter};

/// Prefix marking a word as an invocation of a builtin or dictionary word.
pub const INVOKE_MARKER: char = '$';

/// Prefix marking a word as a store into the dictionary.
pub const STORE_MARKER: char = ':';

/// A token is a simple unit of the language.  There are only three possibilities.  A literal that
/// is pushed as is, a store that pops the top value into the dictionary, or an invocation that
/// runs a builtin or a stored definition.
///
/// Every token holds the decoded text, markers stripped and quoted regions unescaped, as well as
/// the location in the original source where it was found.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// A word pushed onto the stack as is.
    Literal(SourceLocation, String),

    /// A `$name` word, executed by name.
    Invoke(SourceLocation, String),

    /// A `:name` word, pops the top of the stack into the dictionary.
    Store(SourceLocation, String),
}

/// A list of tokens found in the source text.
pub type TokenList = Vec<Token>;

/// Does the text have to be quoted to lex back into a single token with the same text?
fn needs_quoting(text: &str, is_literal: bool) -> bool {
    text.is_empty()
        || (is_literal && text.starts_with([INVOKE_MARKER, STORE_MARKER]))
        || text
            .chars()
            .any(|c| is_whitespace(&c) || c == '"' || c == '\\')
}

fn write_text(f: &mut Formatter, text: &str, is_literal: bool) -> fmt::Result {
    if needs_quoting(text, is_literal) {
        write!(f, "{}", Value::stringify(text))
    } else {
        write!(f, "{}", text)
    }
}

/// Tokens print as source text that lexes back into an equal token.
impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Token::Literal(_, text) => write_text(f, text, true),
            Token::Invoke(_, name) => {
                write!(f, "{}", INVOKE_MARKER)?;
                write_text(f, name, false)
            }
            Token::Store(_, name) => {
                write!(f, "{}", STORE_MARKER)?;
                write_text(f, name, false)
            }
        }
    }
}

/// Include the location for debugging purposes.
impl Debug for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.location(), self)
    }
}

impl Token {
    /// Get the token's location in the original source text.
    pub fn location(&self) -> &SourceLocation {
        match self {
            Token::Literal(location, _) => location,
            Token::Invoke(location, _) => location,
            Token::Store(location, _) => location,
        }
    }

    /// The decoded text of the token, without any marker.
    pub fn text(&self) -> &String {
        match self {
            Token::Literal(_, text) => text,
            Token::Invoke(_, name) => name,
            Token::Store(_, name) => name,
        }
    }

    /// Check if the token is a literal word.
    pub fn is_literal(&self) -> bool {
        matches!(self, Token::Literal(_, _))
    }

    /// Check if the token is an invocation.
    pub fn is_invoke(&self) -> bool {
        matches!(self, Token::Invoke(_, _))
    }

    /// Check if the token is a store.
    pub fn is_store(&self) -> bool {
        matches!(self, Token::Store(_, _))
    }
}

/// Check if the given character separates tokens.
fn is_whitespace(next: &char) -> bool {
    next.is_ascii_whitespace()
}

/// Skip over whitespace in the text.  Stopping only at either the end of the buffer or the next
/// non-whitespace character.
fn skip_whitespace(buffer: &mut SourceBuffer) {
    while let Some(next) = buffer.peek_next() {
        if !is_whitespace(&next) {
            break;
        }

        let _ = buffer.next_char();
    }
}

/// Process the character following a backslash within a quoted region.  `\n`, `\r` and `\t` are
/// translated as well as the quote and the backslash itself.  Anything else is kept verbatim,
/// backslash included.
fn process_escape(
    location: &SourceLocation,
    buffer: &mut SourceBuffer,
    text: &mut String,
) -> error::Result<()> {
    let next = buffer.next_char();
    debug_assert!(next == Some('\\'));

    match buffer.peek_next() {
        Some(escaped @ ('"' | '\\')) => {
            let _ = buffer.next_char();
            text.push(escaped);
        }

        Some('n') => {
            let _ = buffer.next_char();
            text.push('\n');
        }

        Some('r') => {
            let _ = buffer.next_char();
            text.push('\r');
        }

        Some('t') => {
            let _ = buffer.next_char();
            text.push('\t');
        }

        // The escape was on a non-special character, so keep the backslash and let the next pass
        // handle the character.
        Some(_) => text.push('\\'),

        // Hitting the end of the text here means the quote was never closed.
        None => {
            ScriptError::new_as_result(Some(location.clone()), ErrorKind::UnterminatedQuote, None)?
        }
    }

    Ok(())
}

/// Copy a quoted region into the text, decoding escapes along the way.  Expects the buffer to be
/// sitting on the opening quote.  The region may span lines.
fn process_quoted(buffer: &mut SourceBuffer, text: &mut String) -> error::Result<()> {
    let location = buffer.location().clone();
    let next = buffer.next_char();

    debug_assert!(next == Some('"'));

    loop {
        match buffer.peek_next() {
            Some('"') => {
                let _ = buffer.next_char();
                return Ok(());
            }

            Some('\\') => process_escape(&location, buffer, text)?,

            Some(_) => {
                if let Some(next) = buffer.next_char() {
                    text.push(next);
                }
            }

            None => {
                return ScriptError::new_as_result(
                    Some(location),
                    ErrorKind::UnterminatedQuote,
                    None,
                );
            }
        }
    }
}

/// Copy a backslash outside of a quote through untouched.  A quote or backslash right after it is
/// copied along with it, so `\"` never opens a quoted region.
fn process_raw_escape(buffer: &mut SourceBuffer, text: &mut String) {
    let next = buffer.next_char();
    debug_assert!(next == Some('\\'));

    text.push('\\');

    if let Some(escaped @ ('"' | '\\')) = buffer.peek_next() {
        let _ = buffer.next_char();
        text.push(escaped);
    }
}

/// Pull text out of the buffer until we hit whitespace outside of a quote.  Any number of quoted
/// regions may appear in the word, each one is decoded in place.  Text outside of them is raw.  Also report if a quoted region
/// was seen, because `$""` names the empty word while a bare `$` is just text.
fn process_word(buffer: &mut SourceBuffer) -> error::Result<(String, bool)> {
    let mut text = String::new();
    let mut quoted = false;

    while let Some(next) = buffer.peek_next() {
        match next {
            _ if is_whitespace(&next) => break,

            '"' => {
                process_quoted(buffer, &mut text)?;
                quoted = true;
            }

            '\\' => process_raw_escape(buffer, &mut text),

            _ => {
                let _ = buffer.next_char();
                text.push(next);
            }
        }
    }

    Ok((text, quoted))
}

/// Read one whole token, deciding its kind from the first raw character.
fn process_token(buffer: &mut SourceBuffer) -> error::Result<Token> {
    let location = buffer.location().clone();

    let marker = match buffer.peek_next() {
        Some(marker @ (INVOKE_MARKER | STORE_MARKER)) => {
            let _ = buffer.next_char();
            Some(marker)
        }
        _ => None,
    };

    let (text, quoted) = process_word(buffer)?;

    let token = match marker {
        Some(INVOKE_MARKER) if quoted || !text.is_empty() => Token::Invoke(location, text),
        Some(STORE_MARKER) if quoted || !text.is_empty() => Token::Store(location, text),

        // A lone marker is just a word of its own.
        Some(marker) => Token::Literal(location, format!("{}{}", marker, text)),

        None => Token::Literal(location, text),
    };

    Ok(token)
}

/// Tokenize source text.  The path is only used to describe the text in locations.
///
/// Lexing the same text twice always gives the same list, this is what allows stored definitions
/// to be re-lexed every time they are called.
pub fn tokenize_from_source(path: &str, source: &str) -> error::Result<TokenList> {
    let mut buffer = SourceBuffer::new(path, source);
    let mut token_list = TokenList::new();

    while let Some(next) = buffer.peek_next() {
        if is_whitespace(&next) {
            skip_whitespace(&mut buffer);
            continue;
        }

        token_list.push(process_token(&mut buffer)?);
    }

    Ok(token_list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(source: &str) -> Vec<(char, String)> {
        tokenize_from_source("<test>", source)
            .unwrap()
            .into_iter()
            .map(|token| {
                let kind = match token {
                    Token::Literal(_, _) => 'L',
                    Token::Invoke(_, _) => '$',
                    Token::Store(_, _) => ':',
                };
                (kind, token.text().clone())
            })
            .collect()
    }

    fn literal(text: &str) -> (char, String) {
        ('L', text.to_string())
    }

    #[test]
    fn splits_on_any_ascii_whitespace() {
        assert_eq!(
            texts("  foo\tbar\r\n\nbaz  "),
            vec![literal("foo"), literal("bar"), literal("baz")]
        );
        assert!(texts("").is_empty());
        assert!(texts(" \n\t ").is_empty());
    }

    #[test]
    fn decodes_quoted_literals() {
        assert_eq!(
            texts(r#"foo bar "Hello World" "String with \"nested\" quotes""#),
            vec![
                literal("foo"),
                literal("bar"),
                literal("Hello World"),
                literal(r#"String with "nested" quotes"#),
            ]
        );
    }

    #[test]
    fn quotes_can_start_mid_token() {
        assert_eq!(texts(r#"ab"c d"ef g"#), vec![literal("abc def"), literal("g")]);
        assert_eq!(texts(r#""a b""c d""#), vec![literal("a bc d")]);
    }

    #[test]
    fn classifies_markers_by_raw_first_character() {
        assert_eq!(
            texts(r#"$dupe :x $"My Variable" :"My Variable" "$dupe""#),
            vec![
                ('$', "dupe".to_string()),
                (':', "x".to_string()),
                ('$', "My Variable".to_string()),
                (':', "My Variable".to_string()),
                literal("$dupe"),
            ]
        );
    }

    #[test]
    fn lone_markers_are_literals() {
        assert_eq!(texts("$ :"), vec![literal("$"), literal(":")]);
        assert_eq!(texts(r#"$"""#), vec![('$', String::new())]);
    }

    #[test]
    fn escapes_inside_quotes() {
        assert_eq!(texts(r#""a\nb\tc\\d\q""#), vec![literal("a\nb\tc\\d\\q")]);
        assert_eq!(texts(r"a\n"), vec![literal("a\\n")]);
    }

    #[test]
    fn backslashes_outside_quotes_stay_raw() {
        assert_eq!(
            texts(r#"C:\\dir a\"b c\d"#),
            vec![literal(r"C:\\dir"), literal(r#"a\"b"#), literal(r"c\d")]
        );
        assert_eq!(texts(r#"x\\"y z""#), vec![literal(r"x\\y z")]);
        assert_eq!(texts(r"trailing\"), vec![literal(r"trailing\")]);
    }

    #[test]
    fn quoted_regions_span_lines() {
        let tokens = tokenize_from_source("<test>", "\"one\ntwo\" three").unwrap();

        assert_eq!(tokens[0].text(), "one\ntwo");
        assert_eq!(tokens[1].location().line(), 2);
        assert_eq!(tokens[1].location().column(), 6);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        for source in [r#""abc"#, r#"foo "bar \" baz"#, r#"x "\"#] {
            let error = tokenize_from_source("<test>", source).unwrap_err();
            assert_eq!(error.kind(), &ErrorKind::UnterminatedQuote, "{}", source);
        }
    }

    #[test]
    fn unterminated_quote_reports_the_opening_quote() {
        let error = tokenize_from_source("<test>", "ok\n  \"never closed").unwrap_err();
        let location = error.location().clone().unwrap();

        assert_eq!(location.line(), 2);
        assert_eq!(location.column(), 3);
    }

    #[test]
    fn display_lexes_back_to_the_same_tokens() {
        let source = r#"plain "two words" $"My Variable" :x "$not-a-call" "" "a\"b" $+"#;
        let tokens = tokenize_from_source("<test>", source).unwrap();
        let printed = tokens
            .iter()
            .map(|token| token.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let relexed = tokenize_from_source("<test>", &printed).unwrap();

        let kinds = |list: &TokenList| {
            list.iter()
                .map(|token| (token.is_invoke(), token.is_store(), token.text().clone()))
                .collect::<Vec<_>>()
        };

        assert_eq!(kinds(&tokens), kinds(&relexed));
    }
}
