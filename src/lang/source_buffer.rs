use core::str::Chars;
use std::fmt::{ self,
                Display,
                Formatter };



/// The location in the source text where a token was found.  Locations travel with every token
/// so that errors raised while a token executes can point back at the text that caused them.
///
/// This is a read-only structure.  Use the field accessor methods to get the values.
#[derive(Clone, PartialEq, PartialOrd, Eq, Hash)]
pub struct SourceLocation
{
    /// Either the path to the file or a description of the source text.  Definitions re-lexed
    /// from the dictionary use the word name, for example "\<factorial\>".
    path: String,

    /// The 1 based line number in the source text where the token was found.
    line: usize,

    /// The 1 based column number in the source text where the token was found.
    column: usize
}


/// Used for error reporting to show where in the source text an error originated.
impl Display for SourceLocation
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), fmt::Error>
    {
        write!(formatter, "{} ({}, {})", self.path, self.line, self.column)
    }
}


impl std::fmt::Debug for SourceLocation
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), fmt::Error>
    {
        write!(formatter, "{}", self)
    }
}


impl Default for SourceLocation
{
    fn default() -> Self
    {
        SourceLocation::new_from_path("unspecified")
    }
}


impl SourceLocation
{
    /// Create a new SourceLocation pointing at the start of the given source.
    pub fn new_from_path(path: &str) -> Self
    {
        SourceLocation { path: path.to_owned(), line: 1, column: 1 }
    }

    /// Create a new SourceLocation with all of the needed information.
    pub fn new_from_info(path: &str, line: usize, column: usize) -> Self
    {
        SourceLocation { path: path.to_owned(), line, column }
    }

    /// The path to the source text or a meaningful description of it.
    pub fn path(&self) -> &String
    {
        &self.path
    }

    /// The 1 based line number in the source text.
    pub fn line(&self) -> usize
    {
        self.line
    }

    /// The 1 based column number in the source text.
    pub fn column(&self) -> usize
    {
        self.column
    }
}



/// A forward only cursor over source text used by the tokenizer.  As characters are consumed the
/// location of the cursor is maintained so every token can record where it started.
///
/// The buffer only borrows the text, it is never copied.
pub struct SourceBuffer<'a>
{
    /// Iterator over the text being processed.
    chars: Chars<'a>,

    /// The logical location of the cursor.
    location: SourceLocation,

    /// A character that has been peeked at but not yet consumed.
    current: Option<char>
}


impl<'a> SourceBuffer<'a>
{
    /// Create a new SourceBuffer over the given text.  The path is only used for reporting.
    pub fn new(path: &str, source: &'a str) -> Self
    {
        SourceBuffer
            {
                chars: source.chars(),
                location: SourceLocation::new_from_path(path),
                current: None
            }
    }

    /// The location the cursor is at in the source text.
    pub fn location(&self) -> &SourceLocation
    {
        &self.location
    }

    /// Take a peek at the next character without consuming it.
    pub fn peek_next(&mut self) -> Option<char>
    {
        if self.current.is_none()
        {
            self.current = self.chars.next();
        }

        self.current
    }

    /// Get and consume the next character.
    pub fn next_char(&mut self) -> Option<char>
    {
        let next = match self.current.take()
            {
                Some(peeked) => Some(peeked),
                None         => self.chars.next()
            };

        if let Some(next_char) = next
        {
            self.increment_location(next_char);
        }

        next
    }

    /// Advance one column for regular characters.  Reset the column to 1 and move to the next
    /// line for new line characters.
    fn increment_location(&mut self, next: char)
    {
        if next == '\n'
        {
            self.location.line += 1;
            self.location.column = 1;
        }
        else
        {
            self.location.column += 1;
        }
    }
}
