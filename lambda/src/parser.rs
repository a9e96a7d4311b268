use thiserror::Error;

use crate::{
    name::Name,
    term::{Term, TermRef},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid argument name at position {position}")]
    InvalidArgumentName { position: usize },
    #[error("unclosed term at position {position}, input string: {input}")]
    UnclosedTerm { position: usize, input: String },
    #[error("unexpected `{character}` at position {position}")]
    UnexpectedCharacter { character: char, position: usize },
    #[error("missing abstraction body at position {position}")]
    MissingBody { position: usize },
    #[error("no term in input")]
    EmptyInput,
}

/// Glyphs accepted for the abstraction head and separator, on top of the
/// fixed `\`/`λ` heads and `.`/`→`/`->` separators. Also drives markup
/// rendering.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Syntax {
    head: String,
    separator: String,
}

impl Default for Syntax {
    fn default() -> Self {
        Self {
            head: "λ".to_string(),
            separator: "→".to_string(),
        }
    }
}

impl Syntax {
    pub fn new(head: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            head: head.into(),
            separator: separator.into(),
        }
    }

    pub fn head(&self) -> &str {
        &self.head
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn set_head(&mut self, head: impl Into<String>) {
        self.head = head.into();
    }

    pub fn set_separator(&mut self, separator: impl Into<String>) {
        self.separator = separator.into();
    }
}

/// Parses `input` with the default syntax.
pub fn parse(input: &str) -> Result<TermRef, ParseError> {
    parse_with(&Syntax::default(), input)
}

pub fn parse_with(syntax: &Syntax, input: &str) -> Result<TermRef, ParseError> {
    let mut parser = Parser::new(syntax, input);
    let parsed = parser.parse_terms()?;
    if let Some(character) = parser.peek() {
        return Err(ParseError::UnexpectedCharacter {
            character,
            position: parser.pos,
        });
    }
    parsed.ok_or(ParseError::EmptyInput)
}

struct Parser<'a> {
    syntax: &'a Syntax,
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(syntax: &'a Syntax, input: &'a str) -> Self {
        Self {
            syntax,
            input,
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Skips characters at or below the space code point; true at end of
    /// input. The skip is committed even when no term follows.
    fn skip_whitespace(&mut self) -> bool {
        while self.peek().map_or(false, |c| c <= ' ') {
            self.pos += 1;
        }
        self.pos >= self.chars.len()
    }

    fn eat_one_of(&mut self, accepted: &str) -> bool {
        match self.peek() {
            Some(c) if accepted.contains(c) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn eat_exact(&mut self, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        let mut len = 0;
        for (have, want) in self.chars[self.pos..].iter().zip(token.chars()) {
            if *have != want {
                return false;
            }
            len += 1;
        }
        if len < token.chars().count() {
            return false;
        }
        self.pos += len;
        true
    }

    /// `[a-z][0-9]*` or `[A-Z][a-z0-9]*`, consumed greedily.
    fn parse_name(&mut self) -> Option<Name> {
        let first = self.peek()?;
        let tail: fn(char) -> bool = if first.is_ascii_lowercase() {
            |c| c.is_ascii_digit()
        } else if first.is_ascii_uppercase() {
            |c| c.is_ascii_lowercase() || c.is_ascii_digit()
        } else {
            return None;
        };
        let mut name = String::from(first);
        self.pos += 1;
        while let Some(c) = self.peek() {
            if !tail(c) {
                break;
            }
            name.push(c);
            self.pos += 1;
        }
        Some(Name::from_valid(name))
    }

    /// A maximal run of terms folded into left-associated applications.
    fn parse_terms(&mut self) -> Result<Option<TermRef>, ParseError> {
        let mut parsed: Option<TermRef> = None;
        while let Some(term) = self.parse_term()? {
            parsed = Some(match parsed {
                Some(lhs) => Term::app(lhs, term),
                None => term,
            });
        }
        Ok(parsed)
    }

    /// A variable, an abstraction, or a parenthesised group; `None` when the
    /// cursor sits on something that cannot start a term.
    fn parse_term(&mut self) -> Result<Option<TermRef>, ParseError> {
        if self.skip_whitespace() {
            return Ok(None);
        }
        if let Some(name) = self.parse_name() {
            return Ok(Some(Term::var(name)));
        }
        let syntax = self.syntax;
        if self.eat_one_of("\\λ") || self.eat_exact(syntax.head()) {
            let Some(bound) = self.parse_name() else {
                return Err(ParseError::InvalidArgumentName { position: self.pos });
            };
            // the separator is optional; first match wins
            let _ = self.eat_one_of(".→")
                || self.eat_exact("->")
                || self.eat_exact(syntax.separator());
            let body_at = self.pos;
            let Some(body) = self.parse_terms()? else {
                return Err(ParseError::MissingBody { position: body_at });
            };
            return Ok(Some(Term::abs(bound, body)));
        }
        if self.eat_one_of("(") {
            let inner = self.parse_terms()?;
            if !self.eat_one_of(")") {
                return Err(ParseError::UnclosedTerm {
                    position: self.pos,
                    input: self.input.to_string(),
                });
            }
            return Ok(inner);
        }
        Ok(None)
    }
}
