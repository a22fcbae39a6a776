//! Cursor over command input.

use crate::error::CommandError;

/// Character cursor over a command line. Cheap to clone so that grammar
/// branches can be tried and abandoned.
#[derive(Debug, Clone)]
pub struct StringReader<'a> {
    input: &'a str,
    cursor: usize,
}

impl<'a> StringReader<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, cursor: 0 }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Unread part of the input.
    pub fn remaining(&self) -> &'a str {
        &self.input[self.cursor..]
    }

    pub fn can_read(&self) -> bool {
        self.cursor < self.input.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    pub fn skip(&mut self) {
        if let Some(c) = self.peek() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.skip();
        }
    }

    /// Parse failure at the current position.
    pub fn error(&self, message: impl Into<String>) -> CommandError {
        CommandError::parse(message, self.cursor)
    }

    /// Read up to the next whitespace, or up to `stop` if given.
    pub fn read_token_until(&mut self, stop: Option<char>) -> &'a str {
        let start = self.cursor;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || Some(c) == stop {
                break;
            }
            self.skip();
        }
        &self.input[start..self.cursor]
    }

    /// Read up to the next whitespace.
    pub fn read_unquoted(&mut self) -> &'a str {
        self.read_token_until(None)
    }

    pub fn read_int(&mut self) -> Result<i32, CommandError> {
        let start = self.cursor;
        let token = self.read_unquoted();
        if token.is_empty() {
            return Err(self.error("Expected integer"));
        }
        token.parse::<i32>().map_err(|_| {
            self.cursor = start;
            self.error(format!("Invalid integer '{token}'"))
        })
    }

    /// Read a double-quoted string (with `\"` and `\\` escapes) or a single
    /// unquoted word.
    pub fn read_string(&mut self) -> Result<String, CommandError> {
        if self.peek() != Some('"') {
            let word = self.read_unquoted();
            if word.is_empty() {
                return Err(self.error("Expected string"));
            }
            return Ok(word.to_string());
        }

        let start = self.cursor;
        self.skip();
        let mut out = String::new();
        let mut escaped = false;
        while let Some(c) = self.peek() {
            self.skip();
            if escaped {
                if c != '"' && c != '\\' {
                    self.cursor = start;
                    return Err(self.error(format!("Invalid escape sequence '\\{c}' in quoted string")));
                }
                out.push(c);
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                return Ok(out);
            } else {
                out.push(c);
            }
        }
        self.cursor = start;
        Err(self.error("Unclosed quoted string"))
    }

    /// Read a balanced `{...}` block, honoring JSON string literals.
    pub fn read_braced(&mut self) -> Result<&'a str, CommandError> {
        if self.peek() != Some('{') {
            return Err(self.error("Expected '{'"));
        }
        let start = self.cursor;
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;
        while let Some(c) = self.peek() {
            self.skip();
            if in_string {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            match c {
                '"' => in_string = true,
                '{' | '[' => depth += 1,
                '}' | ']' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(&self.input[start..self.cursor]);
                    }
                }
                _ => {}
            }
        }
        self.cursor = start;
        Err(self.error("Unterminated compound"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_tokens_and_ints() {
        let mut reader = StringReader::new("slot 12 x");
        assert_eq!(reader.read_unquoted(), "slot");
        reader.skip_whitespace();
        assert_eq!(reader.read_int().unwrap(), 12);
        reader.skip_whitespace();
        let err = reader.read_int().unwrap_err();
        assert_eq!(err.cursor(), Some(8));
    }

    #[test]
    fn reads_quoted_strings() {
        let mut reader = StringReader::new(r#""Hello \"world\"" rest"#);
        assert_eq!(reader.read_string().unwrap(), r#"Hello "world""#);
        assert_eq!(reader.remaining(), " rest");

        let mut open = StringReader::new("\"never closed");
        assert!(open.read_string().is_err());
        assert_eq!(open.cursor(), 0);
    }

    #[test]
    fn reads_balanced_braces() {
        let mut reader = StringReader::new(r#"{"a":{"b":"}"},"l":[1]} tail"#);
        assert_eq!(reader.read_braced().unwrap(), r#"{"a":{"b":"}"},"l":[1]}"#);
        assert_eq!(reader.remaining(), " tail");

        assert!(StringReader::new("{\"a\":1").read_braced().is_err());
    }
}
