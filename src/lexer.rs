use crate::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Text(String),
    /// `{{! body}}`. Body is kept verbatim and never re-parsed.
    Comment(String),
    /// `{{path}}` — raw path text, trimmed.
    Variable(String),
    /// `{{#path arg?}}` — raw content after `#`, trimmed.
    BlockOpen(String),
    /// `{{/name}}`.
    BlockClose(String),
    /// `{{>name}}`.
    Partial(String),
}

/// Cursor-based tokenizer: text runs interleaved with `{{...}}` markers.
///
/// Each token is returned with the byte offset where it starts, so parse
/// errors can point at the offending marker.
pub(crate) struct Lexer<'a> {
    input: &'a str,
    cursor: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, cursor: 0 }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.cursor..]
    }

    fn advance(&mut self, n: usize) {
        self.cursor += n;
    }

    pub fn next_token(&mut self) -> Result<Option<(usize, Token)>, ParseError> {
        let rest = self.remaining();
        if rest.is_empty() {
            return Ok(None);
        }

        let start = self.cursor;
        match rest.find("{{") {
            Some(0) => {
                // Marker. The body runs to the first `}}`.
                let inner_end = rest[2..]
                    .find("}}")
                    .ok_or_else(|| ParseError::new("unclosed marker", start))?;
                let inner = &rest[2..2 + inner_end];
                self.advance(2 + inner_end + 2);
                Ok(Some((start, classify(inner, start)?)))
            }
            Some(idx) => {
                // Text before the next marker.
                let text = rest[..idx].to_string();
                self.advance(idx);
                Ok(Some((start, Token::Text(text))))
            }
            None => {
                // All text.
                let text = rest.to_string();
                self.advance(rest.len());
                Ok(Some((start, Token::Text(text))))
            }
        }
    }
}

fn classify(inner: &str, position: usize) -> Result<Token, ParseError> {
    let trimmed = inner.trim();

    if let Some(body) = trimmed.strip_prefix('!') {
        return Ok(Token::Comment(body.to_string()));
    }
    if let Some(rest) = trimmed.strip_prefix('#') {
        let rest = rest.trim();
        if rest.is_empty() {
            return Err(ParseError::new("missing block name", position));
        }
        return Ok(Token::BlockOpen(rest.to_string()));
    }
    if let Some(rest) = trimmed.strip_prefix('/') {
        let rest = rest.trim();
        if rest.is_empty() {
            return Err(ParseError::new("missing name in closing marker", position));
        }
        return Ok(Token::BlockClose(rest.to_string()));
    }
    if let Some(rest) = trimmed.strip_prefix('>') {
        let rest = rest.trim();
        if rest.is_empty() {
            return Err(ParseError::new("missing partial name", position));
        }
        return Ok(Token::Partial(rest.to_string()));
    }
    if trimmed.is_empty() {
        return Err(ParseError::new("empty marker", position));
    }
    Ok(Token::Variable(trimmed.to_string()))
}
