// Copyright 2018 Steven Bosnick
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE-2.0 or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms

//! Defines the `Lexer` iterator that lexes a byte iterator using a compiled
//! deterministic finite automaton.

use std::collections::VecDeque;
use std::marker::PhantomData;

use failure::Fail;
use lexis_automata::{Dfa, PatternId};

use crate::error::LexError;
use crate::span::{Location, Span};

/// A type that can be built from a single match of the `Lexer`.
pub trait Token: Sized {
    /// Create the token for `text`, which was matched by `pattern`.
    fn from_match(pattern: PatternId, text: &[u8]) -> Self;
}

impl Token for PatternId {
    fn from_match(pattern: PatternId, _text: &[u8]) -> Self {
        pattern
    }
}

/// A generic token: the pattern that matched together with the matched bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Match {
    pattern: PatternId,
    text: Vec<u8>,
}

impl Match {
    /// Create a new `Match`.
    pub fn new(pattern: PatternId, text: Vec<u8>) -> Match {
        Match { pattern, text }
    }

    /// The pattern that matched.
    pub fn pattern(&self) -> PatternId {
        self.pattern
    }

    /// The matched bytes.
    pub fn text(&self) -> &[u8] {
        &self.text
    }
}

impl Token for Match {
    fn from_match(pattern: PatternId, text: &[u8]) -> Self {
        Match::new(pattern, text.to_vec())
    }
}

/// The iterator that lexes a byte iterator into a token iterator.
///
/// The generic type `T` is the token type.
///
/// The iterator is a falible iterator over `Span<T>` where the span runs from
/// the first byte of the token to just past its last byte. `Lexer` performs a
/// maximal-munch lex of a falible byte iterator using a `Dfa`: each token is
/// the longest prefix of the remaining input that the `Dfa` accepts, and it
/// is attributed to the pattern that the `Dfa` resolves for that prefix.
///
/// The `Location`'s of the spans track lines and columns as well as byte
/// offsets. Bytes that are read past the end of a token are lexed again as
/// part of the next token and do not move the `Location`.
///
/// When no prefix is accepted the iterator yields an error and skips a single
/// byte before it continues. An error from the underlying iterator is passed
/// through; the bytes read for the current token are kept, so lexing resumes
/// at the same `Location` on the next call.
pub struct Lexer<'d, T, I> {
    dfa: &'d Dfa,
    input: I,
    pending: VecDeque<u8>,
    location: Location,
    _token: PhantomData<fn() -> T>,
}

impl<'d, T, I, F> Lexer<'d, T, I>
where
    T: Token,
    I: Iterator<Item = Result<u8, F>>,
    F: Fail,
{
    /// Create a new `Lexer` over `input` that starts at offset 0 on line 1.
    pub fn new<II>(dfa: &'d Dfa, input: II) -> Self
    where
        II: IntoIterator<Item = Result<u8, F>, IntoIter = I>,
    {
        Lexer::with_start(dfa, input, Location::default())
    }

    /// Create a new `Lexer` over `input` where the first byte is at `start`.
    pub fn with_start<II>(dfa: &'d Dfa, input: II, start: Location) -> Self
    where
        II: IntoIterator<Item = Result<u8, F>, IntoIter = I>,
    {
        Lexer {
            dfa,
            input: input.into_iter(),
            pending: VecDeque::new(),
            location: start,
            _token: PhantomData,
        }
    }

    /// The `Location` of the next byte to be lexed.
    pub fn location(&self) -> Location {
        self.location
    }

    fn next_byte(&mut self) -> Option<Result<u8, F>> {
        match self.pending.pop_front() {
            Some(byte) => Some(Ok(byte)),
            None => self.input.next(),
        }
    }

    // Puts bytes back in front of the input so that they are read again,
    // in order, by the next scan.
    fn unread(&mut self, bytes: &[u8]) {
        for &byte in bytes.iter().rev() {
            self.pending.push_front(byte);
        }
    }
}

impl<'d, T, I, F> Iterator for Lexer<'d, T, I>
where
    T: Token,
    I: Iterator<Item = Result<u8, F>>,
    F: Fail,
{
    type Item = Result<Span<T>, LexError<F>>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.location;
        let mut state = self.dfa.start();
        let mut buffer = Vec::new();
        let mut stuck = None;
        let mut last = None;

        loop {
            let byte = match self.next_byte() {
                None => break,
                Some(Ok(byte)) => byte,
                Some(Err(err)) => {
                    self.unread(&buffer);
                    return Some(Err(LexError::Input(err)));
                }
            };

            match self.dfa.next(state, byte) {
                Some(next) => {
                    buffer.push(byte);
                    state = next;
                    if let Some(pattern) = self.dfa.accepting(state) {
                        last = Some((buffer.len(), pattern));
                    }
                }
                None => {
                    stuck = Some(byte);
                    break;
                }
            }
        }

        if let Some(byte) = stuck {
            self.pending.push_front(byte);
        }

        match (last, stuck) {
            (Some((len, pattern)), _) => {
                self.unread(&buffer[len..]);
                self.location = self.location.advanced_by(&buffer[..len]);
                trace!("matched {} bytes at {} for pattern {}", len, start, pattern);

                let token = T::from_match(pattern, &buffer[..len]);
                Some(Ok(Span::new(start, self.location, token)))
            }
            (None, _) if !buffer.is_empty() => {
                self.unread(&buffer[1..]);
                self.location.advance(buffer[0]);
                debug!("invalid token at {}", start);

                let text = String::from_utf8_lossy(&buffer).into_owned();
                Some(Err(LexError::InvalidToken(text, start)))
            }
            (None, Some(byte)) => {
                self.pending.pop_front();
                self.location.advance(byte);
                debug!("invalid byte {:#04x} at {}", byte, start);

                Some(Err(LexError::InvalidByte(byte, start)))
            }
            (None, None) => None,
        }
    }
}

/// Extension trait for `Dfa` to create a `Lexer` from it.
pub trait Lex {
    /// Lex `input` into tokens of type `T`.
    fn lex<T, I, F>(&self, input: I) -> Lexer<T, I::IntoIter>
    where
        T: Token,
        I: IntoIterator<Item = Result<u8, F>>,
        F: Fail;
}

impl Lex for Dfa {
    fn lex<T, I, F>(&self, input: I) -> Lexer<T, I::IntoIter>
    where
        T: Token,
        I: IntoIterator<Item = Result<u8, F>>,
        F: Fail,
    {
        Lexer::new(self, input)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::input::{ByteInput, Never};
    use lexis_automata::compile;
    use std::io::{self, Read};

    fn dfa_for(patterns: &[&str]) -> Dfa {
        compile(patterns.iter().map(|p| (*p, *p))).expect("Unexpected compile error")
    }

    fn lex_all(dfa: &Dfa, input: &str) -> Vec<Result<Span<Match>, LexError<Never>>> {
        dfa.lex(input.input_bytes()).collect()
    }

    fn text(span: &Span<Match>) -> &[u8] {
        span.value_ref().text()
    }

    #[test]
    fn lexer_longer_match_wins() {
        let dfa = dfa_for(&["a", "ab"]);

        let result: Result<Vec<Span<PatternId>>, _> = dfa.lex("ab".input_bytes()).collect();

        assert_eq!(
            result.expect("unexpected lexer error"),
            vec![Span::new(0.into(), 2.into(), PatternId::new(1))]
        );
    }

    #[test]
    fn lexer_equal_length_goes_to_first_pattern() {
        let dfa = dfa_for(&["a+", "a"]);

        let result: Result<Vec<Span<PatternId>>, _> = dfa.lex("a".input_bytes()).collect();

        assert_eq!(
            result.expect("unexpected lexer error"),
            vec![Span::new(0.into(), 1.into(), PatternId::new(0))]
        );
    }

    #[test]
    fn lexer_rescans_over_read_bytes() {
        let dfa = dfa_for(&["ab", "a", "b"]);

        let result = lex_all(&dfa, "aab");

        let texts: Vec<_> = result
            .iter()
            .map(|r| r.as_ref().map(|s| text(s).to_vec()).expect("unexpected lexer error"))
            .collect();
        assert_eq!(texts, vec![b"a".to_vec(), b"ab".to_vec()]);
    }

    #[test]
    fn lexer_invalid_first_byte_is_invalid_byte() {
        let dfa = dfa_for(&["a"]);

        let result = lex_all(&dfa, "xa");

        assert_matches!(result[0], Err(LexError::InvalidByte(b'x', loc)) if loc == Location::new(0));
        assert_matches!(result[1], Ok(ref span) if span.start() == Location::new(1));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn lexer_partial_token_is_invalid_token() {
        let dfa = dfa_for(&["abc", "b"]);

        let result = lex_all(&dfa, "abx");

        assert_matches!(result[0], Err(LexError::InvalidToken(ref t, loc))
            if t == "ab" && loc == Location::new(0));
        assert_matches!(result[1], Ok(ref span) if text(span) == b"b");
        assert_matches!(result[2], Err(LexError::InvalidByte(b'x', loc)) if loc == Location::new(2));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn lexer_empty_input_gives_no_tokens() {
        let dfa = dfa_for(&["a*"]);

        let result = lex_all(&dfa, "");

        assert!(result.is_empty());
    }

    #[test]
    fn lexer_never_produces_empty_tokens() {
        let dfa = dfa_for(&["a*"]);

        let result = lex_all(&dfa, "b");

        assert_matches!(result[..], [Err(LexError::InvalidByte(b'b', _))]);
    }

    #[test]
    fn lexer_reads_from_io_read() {
        let dfa = dfa_for(&["a+", " "]);
        let reader = io::Cursor::new(b"aa a".to_vec());

        let result: Result<Vec<Span<PatternId>>, _> = dfa.lex(reader.bytes()).collect();

        assert_eq!(
            result.expect("unexpected lexer error"),
            vec![
                Span::new(0.into(), 2.into(), PatternId::new(0)),
                Span::new(2.into(), 3.into(), PatternId::new(1)),
                Span::new(3.into(), 4.into(), PatternId::new(0)),
            ]
        );
    }

    #[test]
    fn lexer_passes_input_error_through_and_resumes() {
        let dfa = dfa_for(&["ab"]);
        let input = vec![
            Ok(b'a'),
            Err(io::Error::new(io::ErrorKind::Other, "boom")),
            Ok(b'b'),
        ];

        let mut sut: Lexer<PatternId, _> = Lexer::new(&dfa, input);

        assert_matches!(sut.next(), Some(Err(LexError::Input(_))));
        assert_eq!(sut.location(), Location::new(0));
        assert_matches!(sut.next(), Some(Ok(ref span)) if span.end() == Location::new(2));
        assert_matches!(sut.next(), None);
    }

    #[test]
    fn lexer_with_start_offsets_locations() {
        let dfa = dfa_for(&["a"]);

        let mut sut: Lexer<PatternId, _> = Lexer::with_start(&dfa, "a".input_bytes(), 10.into());

        assert_matches!(sut.next(), Some(Ok(ref span))
            if span.start() == Location::new(10) && span.end() == Location::new(11));
    }

    #[test]
    fn lexer_tracks_lines_and_columns() {
        let dfa = dfa_for(&["a", "abc", "\n"]);

        let result = lex_all(&dfa, "a\nab\n");

        let at = Location::with_line_column;
        assert_matches!(result[0], Ok(ref span)
            if span.start() == at(0, 1, 1) && span.end() == at(1, 1, 2));
        assert_matches!(result[1], Ok(ref span)
            if span.start() == at(1, 1, 2) && span.end() == at(2, 2, 1));
        assert_matches!(result[2], Ok(ref span)
            if text(span) == b"a" && span.start() == at(2, 2, 1) && span.end() == at(3, 2, 2));
        assert_matches!(result[3], Err(LexError::InvalidByte(b'b', loc)) if loc == at(3, 2, 2));
        assert_matches!(result[4], Ok(ref span)
            if span.start() == at(4, 2, 3) && span.end() == at(5, 3, 1));
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn lexer_invalid_token_reports_line_and_column() {
        let dfa = dfa_for(&["abc", "\n+"]);

        let result = lex_all(&dfa, "\n\nabx");

        assert_matches!(result[1], Err(LexError::InvalidToken(ref t, loc))
            if t == "ab" && loc == Location::with_line_column(2, 3, 1));
        assert_matches!(result[1], Err(ref e)
            if e.to_string() == "The lexer encountered an invalid token \"ab\" at line 3, column 1.");
    }

    #[test]
    fn lexer_location_follows_consumed_newlines() {
        let dfa = dfa_for(&["a+", "\n"]);

        let mut sut: Lexer<PatternId, _> = Lexer::new(&dfa, "aa\na".input_bytes());

        assert_matches!(sut.next(), Some(Ok(_)));
        assert_matches!(sut.next(), Some(Ok(_)));
        assert_eq!(sut.location(), Location::with_line_column(3, 2, 1));
    }

    quickcheck! {
        fn prop_total_lexer_reproduces_input(input: Vec<u8>) -> bool {
            let dfa = dfa_for(&["a+", "ab", "."]);

            let tokens: Result<Vec<Span<Match>>, _> = dfa.lex(input.input_bytes()).collect();

            match tokens {
                Ok(tokens) => {
                    let joined: Vec<u8> = tokens.iter().flat_map(|t| text(t).to_vec()).collect();
                    let contiguous = tokens.windows(2).all(|w| w[0].end() == w[1].start());
                    joined == input && contiguous
                }
                Err(_) => false,
            }
        }

        fn prop_errors_skip_one_byte(input: Vec<u8>) -> bool {
            let dfa = dfa_for(&["ab"]);

            let results: Vec<_> = dfa.lex(input.input_bytes()).collect::<Vec<Result<Span<PatternId>, _>>>();

            let covered: usize = results
                .iter()
                .map(|r| match r {
                    Ok(span) => span.len(),
                    Err(_) => 1,
                })
                .sum();
            covered == input.len()
        }
    }
}
