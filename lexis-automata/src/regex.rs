// Copyright 2018 Steven Bosnick
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE-2.0 or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms

//! Regular expression syntax trees.
//!
//! `Regex` is the tree produced by the pattern parser and consumed by the
//! `Nfa` builder. It has only five kinds of node. The zero-or-more (`*`) and
//! zero-or-one (`?`) operators are not separate kinds; they are expressed
//! through `Repetition` (one-or-more), `Alternation` and the empty `Sequence`.
//! A character class is an `Alternation` of `Literal`'s.
//!
//! A `Regex` can be rendered back to pattern form with `Regex::to_pattern()`
//! (or through its `Display` implementation). The rendering uses the fewest
//! parentheses that the operator precedence allows.

use std::fmt::{self, Display};

// Binding strength of each operator; atoms bind tightest.
const ALTERNATION_PRECEDENCE: u8 = 1;
const SEQUENCE_PRECEDENCE: u8 = 2;
const REPETITION_PRECEDENCE: u8 = 3;
const ATOM_PRECEDENCE: u8 = 4;

const METACHARACTERS: &[u8] = b"()[]|\\*+?.";

/// A regular expression over bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Regex {
    /// Matches exactly one byte.
    Literal(u8),

    /// Matches any single byte (0 through 255).
    AnyByte,

    /// Matches each of the sub-expressions in turn. The empty sequence
    /// matches the empty string.
    Sequence(Vec<Regex>),

    /// Matches any one of the sub-expressions. The order is the declaration
    /// order. The empty alternation matches nothing.
    Alternation(Vec<Regex>),

    /// Matches one or more repetitions of the sub-expression.
    Repetition(Box<Regex>),
}

impl Regex {
    /// Create the regular expression that matches only the empty string.
    pub fn empty() -> Regex {
        Regex::Sequence(Vec::new())
    }

    /// Create the regular expression that matches exactly the bytes of `text`.
    pub fn literal<T: AsRef<[u8]>>(text: T) -> Regex {
        Regex::Sequence(text.as_ref().iter().map(|&b| Regex::Literal(b)).collect())
    }

    /// Create the regular expression for one or more repetitions of `inner`.
    pub fn one_or_more(inner: Regex) -> Regex {
        Regex::Repetition(Box::new(inner))
    }

    /// Create the regular expression for zero or more repetitions of `inner`.
    ///
    /// This is `Alternation[Repetition(inner), Sequence[]]`.
    pub fn zero_or_more(inner: Regex) -> Regex {
        Regex::Alternation(vec![Regex::one_or_more(inner), Regex::empty()])
    }

    /// Create the regular expression for zero or one occurrence of `inner`.
    ///
    /// This is `Alternation[Sequence[], inner]`.
    pub fn optional(inner: Regex) -> Regex {
        Regex::Alternation(vec![Regex::empty(), inner])
    }

    /// Check if the regular expression matches the empty string.
    pub fn is_nullable(&self) -> bool {
        use self::Regex::*;

        match self {
            Literal(_) | AnyByte => false,
            Sequence(items) => items.iter().all(Regex::is_nullable),
            Alternation(items) => items.iter().any(Regex::is_nullable),
            Repetition(inner) => inner.is_nullable(),
        }
    }

    /// Render the regular expression in pattern form.
    ///
    /// Parsing the result gives a regular expression that matches the same
    /// language as `self`.
    pub fn to_pattern(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_pattern(0, &mut out);
        out
    }

    /// Render the regular expression in pattern form in a context that
    /// requires at least `precedence`, appending the result to `out`.
    ///
    /// The expression is parenthesized only if its own operator binds less
    /// tightly than `precedence`. A `precedence` of 0 never parenthesizes.
    pub fn write_pattern(&self, precedence: u8, out: &mut Vec<u8>) {
        use self::Regex::*;

        let own = self.precedence();
        let parenthesize = own < precedence;
        if parenthesize {
            out.push(b'(');
        }

        match self {
            Literal(byte) => {
                if METACHARACTERS.contains(byte) {
                    out.push(b'\\');
                }
                out.push(*byte);
            }
            AnyByte => out.push(b'.'),
            Sequence(items) => {
                for item in items {
                    item.write_pattern(SEQUENCE_PRECEDENCE, out);
                }
            }
            Alternation(items) if items.is_empty() => out.extend_from_slice(b"[]"),
            Alternation(items) => {
                for (index, item) in items.iter().enumerate() {
                    if index != 0 {
                        out.push(b'|');
                    }
                    item.write_pattern(ALTERNATION_PRECEDENCE, out);
                }
            }
            Repetition(inner) => {
                inner.write_pattern(REPETITION_PRECEDENCE, out);
                out.push(b'+');
            }
        }

        if parenthesize {
            out.push(b')');
        }
    }

    fn precedence(&self) -> u8 {
        use self::Regex::*;

        match self {
            Literal(_) | AnyByte => ATOM_PRECEDENCE,
            Alternation(items) if items.is_empty() => ATOM_PRECEDENCE,
            Alternation(_) => ALTERNATION_PRECEDENCE,
            Sequence(_) => SEQUENCE_PRECEDENCE,
            Repetition(_) => REPETITION_PRECEDENCE,
        }
    }
}

impl Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.to_pattern()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn lit(b: u8) -> Regex {
        Regex::Literal(b)
    }

    #[test]
    fn alternation_of_sequences_prints_without_parentheses() {
        let sut = Regex::Alternation(vec![Regex::literal("ab"), Regex::literal("cd")]);

        assert_eq!(sut.to_string(), "ab|cd");
    }

    #[test]
    fn alternation_inside_sequence_is_parenthesized() {
        let sut = Regex::Sequence(vec![
            lit(b'a'),
            Regex::Alternation(vec![lit(b'b'), lit(b'c')]),
        ]);

        assert_eq!(sut.to_string(), "a(b|c)");
    }

    #[test]
    fn repeated_sequence_is_parenthesized() {
        let sut = Regex::one_or_more(Regex::literal("ab"));

        assert_eq!(sut.to_string(), "(ab)+");
    }

    #[test]
    fn repeated_literal_is_not_parenthesized() {
        let sut = Regex::Sequence(vec![lit(b'a'), Regex::one_or_more(lit(b'b'))]);

        assert_eq!(sut.to_string(), "ab+");
    }

    #[test]
    fn zero_or_more_prints_as_alternation_with_empty() {
        let sut = Regex::Sequence(vec![lit(b'x'), Regex::zero_or_more(lit(b'a'))]);

        assert_eq!(sut.to_string(), "x(a+|)");
    }

    #[test]
    fn repeated_empty_sequence_prints_empty_group() {
        let sut = Regex::one_or_more(Regex::empty());

        assert_eq!(sut.to_string(), "()+");
    }

    #[test]
    fn metacharacters_are_escaped() {
        let sut = Regex::literal("a.b*");

        assert_eq!(sut.to_string(), "a\\.b\\*");
    }

    #[test]
    fn empty_alternation_prints_empty_class() {
        let sut = Regex::Sequence(vec![lit(b'a'), Regex::Alternation(Vec::new())]);

        assert_eq!(sut.to_string(), "a[]");
    }

    #[test]
    fn explicit_precedence_parenthesizes_alternation() {
        let sut = Regex::Alternation(vec![lit(b'a'), lit(b'b')]);
        let mut out = Vec::new();

        sut.write_pattern(SEQUENCE_PRECEDENCE, &mut out);

        assert_eq!(out, b"(a|b)".to_vec());
    }

    #[test]
    fn repetition_of_nullable_is_nullable() {
        assert!(Regex::one_or_more(Regex::optional(lit(b'a'))).is_nullable());
        assert!(!Regex::one_or_more(lit(b'a')).is_nullable());
        assert!(Regex::zero_or_more(lit(b'a')).is_nullable());
        assert!(!Regex::Alternation(Vec::new()).is_nullable());
        assert!(Regex::empty().is_nullable());
    }
}
