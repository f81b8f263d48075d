use crate::ast::{Ast, Node};
use crate::lexer::{Lexer, Token};
use crate::path::parse_path;
use crate::ParseError;

pub(crate) fn parse(source: &str) -> Result<Ast, ParseError> {
    let mut parser = Parser {
        lexer: Lexer::new(source),
    };
    parser.parse_nodes(None)
}

struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    /// Parses a node sequence. When `enclosing` names an open block, the
    /// sequence ends at the matching `{{/name}}`; otherwise it ends at EOF.
    fn parse_nodes(&mut self, enclosing: Option<(&str, usize)>) -> Result<Ast, ParseError> {
        let mut nodes = Vec::new();
        loop {
            let Some((position, token)) = self.lexer.next_token()? else {
                return match enclosing {
                    Some((name, open_position)) => Err(ParseError::new(
                        format!("unclosed block `{name}`"),
                        open_position,
                    )),
                    None => Ok(nodes),
                };
            };

            match token {
                Token::Text(text) => nodes.push(Node::Text(text)),
                Token::Comment(body) => nodes.push(Node::Comment(body)),
                Token::Variable(raw) => nodes.push(Node::Mustache(parse_path(&raw, position)?)),
                Token::Partial(name) => nodes.push(Node::Partial(name)),
                Token::BlockOpen(raw) => nodes.push(self.parse_block(&raw, position)?),
                Token::BlockClose(name) => match enclosing {
                    Some((open_name, _)) if open_name == name => return Ok(nodes),
                    Some((open_name, _)) => {
                        return Err(ParseError::new(
                            format!(
                                "mismatched closing marker: expected `{open_name}`, found `{name}`"
                            ),
                            position,
                        ))
                    }
                    None => {
                        return Err(ParseError::new(
                            format!("closing marker `{name}` without matching open"),
                            position,
                        ))
                    }
                },
            }
        }
    }

    /// `raw` is the marker content after `#`: a path, optionally followed by
    /// a single whitespace-separated argument path.
    fn parse_block(&mut self, raw: &str, position: usize) -> Result<Node, ParseError> {
        let mut words = raw.split_whitespace();
        let name = words
            .next()
            .ok_or_else(|| ParseError::new("missing block name", position))?;
        let path = parse_path(name, position)?;
        let argument = words.next().map(|w| parse_path(w, position)).transpose()?;
        if words.next().is_some() {
            return Err(ParseError::new(
                format!("too many tokens in block `{name}`"),
                position,
            ));
        }

        let body = self.parse_nodes(Some((name, position)))?;
        Ok(Node::Block {
            path,
            argument,
            body,
        })
    }
}
