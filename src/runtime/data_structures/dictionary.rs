use crate::{lang::source_buffer::SourceLocation, runtime::data_structures::value::Value};
use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
};

/// The information stored in the dictionary for each user defined word.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct WordInfo {
    /// The location of the store that defined the word, if it came from source text.
    pub location: Option<SourceLocation>,

    /// The name of the word.
    pub name: String,

    /// The stored source text, re-lexed every time the word is invoked.
    pub definition: Value,
}

impl WordInfo {
    /// Create a new word record.
    pub fn new(location: Option<SourceLocation>, name: String, definition: Value) -> WordInfo {
        WordInfo {
            location,
            name,
            definition,
        }
    }
}

/// The user word dictionary.  Words can be added or redefined but never removed, the dictionary
/// lives as long as the interpreter that owns it.
#[derive(Clone, Default, Debug)]
pub struct Dictionary {
    words: HashMap<String, WordInfo>,
}

/// Pretty print the dictionary as a sorted listing of names and their definitions.
impl Display for Dictionary {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let max_size = self.words.keys().map(|name| name.len()).max().unwrap_or(0);

        writeln!(formatter, "{} words defined.", self.words.len())?;

        for name in self.names() {
            let word = &self.words[name];

            write!(
                formatter,
                "\n{:width$}  --  {:?}",
                word.name,
                word.definition,
                width = max_size
            )?;
        }

        Ok(())
    }
}

impl Dictionary {
    /// Create a new empty dictionary.
    pub fn new() -> Dictionary {
        Dictionary {
            words: HashMap::new(),
        }
    }

    /// Insert a word into the dictionary, replacing any previous definition of that name.
    pub fn insert(&mut self, name: String, info: WordInfo) {
        let _ = self.words.insert(name, info);
    }

    /// Try to get a word from the dictionary.
    pub fn try_get(&self, name: &str) -> Option<&WordInfo> {
        self.words.get(name)
    }

    /// How many words are defined?
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The defined names in sorted order.
    pub fn names(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self.words.keys().collect();
        names.sort();
        names
    }

    /// Get a plain name to definition text view of the dictionary, mostly useful for comparing the
    /// state of two interpreters.
    pub fn definitions(&self) -> HashMap<String, String> {
        self.words
            .iter()
            .map(|(name, info)| (name.clone(), info.definition.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(name: &str, definition: &str) -> WordInfo {
        WordInfo::new(None, name.to_string(), Value::from(definition))
    }

    #[test]
    fn later_stores_overwrite() {
        let mut dictionary = Dictionary::new();

        dictionary.insert("x".to_string(), word("x", "1"));
        dictionary.insert("x".to_string(), word("x", "2"));

        assert_eq!(dictionary.len(), 1);
        assert_eq!(dictionary.try_get("x").unwrap().definition, "2");
        assert!(dictionary.try_get("y").is_none());
    }

    #[test]
    fn names_with_spaces_are_plain_keys() {
        let mut dictionary = Dictionary::new();

        dictionary.insert("My Variable".to_string(), word("My Variable", "Hello World"));

        assert_eq!(
            dictionary.try_get("My Variable").unwrap().definition,
            "Hello World"
        );
        assert!(dictionary.try_get("My").is_none());
    }

    #[test]
    fn listing_is_sorted() {
        let mut dictionary = Dictionary::new();

        dictionary.insert("b".to_string(), word("b", "2"));
        dictionary.insert("a".to_string(), word("a", "one two"));

        assert_eq!(
            dictionary.to_string(),
            "2 words defined.\n\na  --  \"one two\"\nb  --  \"2\""
        );
    }
}
