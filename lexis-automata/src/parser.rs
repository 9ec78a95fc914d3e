// Copyright 2018 Steven Bosnick
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE-2.0 or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms

//! The pattern parser.
//!
//! `parse` turns a single pattern into a `Regex` in one left-to-right pass.
//! The pattern is read byte by byte, so any UTF-8 text in it is matched
//! byte-wise. The supported syntax is:
//!
//! - `(`...`)` groups, `|` alternation, `.` any byte
//! - `*`, `+` and `?` applied to the preceding term
//! - `[`...`]` character sets, where every byte is a literal alternative
//!   (there are no ranges and no negation; `-` and `^` are literals)
//! - `\` makes the next byte a literal
//!
//! Groups and repetition operators may nest at most `NESTING_LIMIT` levels
//! deep.
//!
//! The result is always an `Alternation` of `Sequence`'s, both for the
//! pattern as a whole and for each group.

use std::mem;

use crate::regex::Regex;

/// The deepest nesting of groups and repetition operators that `parse` accepts.
pub const NESTING_LIMIT: usize = 250;

/// The kinds of error that the parser detects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Fail)]
pub enum ErrorKind {
    /// The input ended inside a group. The offset is that of the `(`.
    #[fail(display = "unterminated group")]
    UnterminatedGroup,

    /// A `]` appeared outside of a character set.
    #[fail(display = "unexpected ']' outside of a character set")]
    UnexpectedCloseBracket,

    /// A `)` appeared without a matching `(`.
    #[fail(display = "unexpected ')' without a matching '('")]
    UnexpectedCloseGroup,

    /// The input ended after a `\` or inside a character set. The offset is
    /// that of the `\` or the `[`.
    #[fail(display = "unexpected end of input")]
    UnexpectedEndOfInput,

    /// A repetition operator had no preceding term to apply to.
    #[fail(display = "repetition operator '{}' has nothing to repeat", _0)]
    DanglingOperator(char),

    /// A group or repetition operator nested deeper than the given limit. The
    /// offset is that of the `(` or the operator that crossed the limit.
    #[fail(display = "nesting deeper than {} levels", _0)]
    NestingTooDeep(usize),
}

/// The error type for parsing a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Fail)]
#[fail(display = "{} at byte {}", kind, offset)]
pub struct Error {
    kind: ErrorKind,
    offset: usize,
}

impl Error {
    fn new(kind: ErrorKind, offset: usize) -> Error {
        Error { kind, offset }
    }

    /// The kind of the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The byte offset into the pattern of the construct that caused the error.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// A specialized `Result` type for parsing patterns.
pub type Result<T> = ::std::result::Result<T, Error>;

/// Parse `pattern` into a `Regex`.
pub fn parse<P: AsRef<[u8]>>(pattern: P) -> Result<Regex> {
    let mut parser = Parser::new(pattern.as_ref());
    parser.parse_alternation(None).map(|(regex, _)| regex)
}

// A parsed term together with its own nesting depth.
type Term = (Regex, usize);

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    groups: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a [u8]) -> Parser<'a> {
        Parser {
            input,
            pos: 0,
            groups: 0,
        }
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.input.get(self.pos).cloned();
        if byte.is_some() {
            self.pos += 1;
        }
        byte
    }

    // Parses up to the ')' that closes the group opened at `open`, or up to
    // the end of the input when `open` is None. Also gives the nesting depth
    // of the result.
    fn parse_alternation(&mut self, open: Option<usize>) -> Result<Term> {
        let mut alternatives = Vec::new();
        let mut current: Vec<Term> = Vec::new();
        let mut deepest = 0;

        loop {
            let offset = self.pos;
            let byte = match (self.next_byte(), open) {
                (Some(byte), _) => byte,
                (None, Some(open)) => {
                    return Err(Error::new(ErrorKind::UnterminatedGroup, open))
                }
                (None, None) => break,
            };

            match byte {
                b'(' => {
                    if self.groups >= NESTING_LIMIT {
                        return Err(Error::new(ErrorKind::NestingTooDeep(NESTING_LIMIT), offset));
                    }
                    self.groups += 1;
                    let group = self.parse_alternation(Some(offset))?;
                    self.groups -= 1;
                    current.push(group);
                }
                b')' if open.is_some() => break,
                b')' => return Err(Error::new(ErrorKind::UnexpectedCloseGroup, offset)),
                b']' => return Err(Error::new(ErrorKind::UnexpectedCloseBracket, offset)),
                b'|' => alternatives.push(sequence(&mut current)),
                b'[' => {
                    let class = self.parse_class(offset)?;
                    current.push((class, 1));
                }
                b'\\' => {
                    let escaped = self.escaped(offset)?;
                    current.push((Regex::Literal(escaped), 0));
                }
                b'*' => self.apply_postfix(&mut current, '*', offset, Regex::zero_or_more)?,
                b'+' => self.apply_postfix(&mut current, '+', offset, Regex::one_or_more)?,
                b'?' => self.apply_postfix(&mut current, '?', offset, Regex::optional)?,
                b'.' => current.push((Regex::AnyByte, 0)),
                _ => current.push((Regex::Literal(byte), 0)),
            }

            if let Some(&(_, depth)) = current.last() {
                deepest = deepest.max(depth);
            }
        }

        alternatives.push(sequence(&mut current));
        Ok((Regex::Alternation(alternatives), deepest + 1))
    }

    fn parse_class(&mut self, open: usize) -> Result<Regex> {
        let mut members = Vec::new();

        loop {
            let offset = self.pos;
            match self.next_byte() {
                None => return Err(Error::new(ErrorKind::UnexpectedEndOfInput, open)),
                Some(b']') => return Ok(Regex::Alternation(members)),
                Some(b'\\') => {
                    let escaped = self.escaped(offset)?;
                    members.push(Regex::Literal(escaped));
                }
                Some(byte) => members.push(Regex::Literal(byte)),
            }
        }
    }

    fn escaped(&mut self, offset: usize) -> Result<u8> {
        self.next_byte()
            .ok_or_else(|| Error::new(ErrorKind::UnexpectedEndOfInput, offset))
    }

    fn apply_postfix<F>(
        &self,
        current: &mut Vec<Term>,
        operator: char,
        offset: usize,
        op: F,
    ) -> Result<()>
    where
        F: FnOnce(Regex) -> Regex,
    {
        match current.pop() {
            Some((_, depth)) if self.groups + depth >= NESTING_LIMIT => Err(Error::new(
                ErrorKind::NestingTooDeep(NESTING_LIMIT),
                offset,
            )),
            Some((term, depth)) => {
                current.push((op(term), depth + 1));
                Ok(())
            }
            None => Err(Error::new(ErrorKind::DanglingOperator(operator), offset)),
        }
    }
}

fn sequence(terms: &mut Vec<Term>) -> Regex {
    Regex::Sequence(terms.drain(..).map(|(term, _)| term).collect())
}
