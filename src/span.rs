// Copyright 2018 Steven Bosnick
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE-2.0 or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms

use std::fmt::{self, Display};

/// Wraps a value with start and end `Location`'s.
///
/// The start is the `Location` of the first byte of the value and the end is
/// the `Location` just past its last byte, so the length of the span is the
/// difference between their byte offsets.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Span<T> {
    start: Location,
    end: Location,
    value: T,
}

impl<T> Span<T> {
    /// Create a new `Span` for a given start and end `Location` and value.
    pub fn new(start: Location, end: Location, value: T) -> Span<T> {
        Span { start, end, value }
    }

    /// Gets the start `Location` of the `Span`.
    pub fn start(&self) -> Location {
        self.start
    }

    /// Gets the end `Location` of the `Span`.
    pub fn end(&self) -> Location {
        self.end
    }

    /// The number of bytes the `Span` covers.
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    /// Check if the `Span` covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Gets a reference to the value of the `Span`.
    pub fn value_ref(&self) -> &T {
        &self.value
    }

    /// Converts the `Span` into a (start, value, end) triple.
    pub fn into_inner(self) -> (Location, T, Location) {
        (self.start, self.value, self.end)
    }

    /// Converts a `Span<T>` into a `Span<U>` covering the same `Location`'s.
    pub fn map<U, F>(self, f: F) -> Span<U>
    where
        F: FnOnce(T) -> U,
    {
        Span::new(self.start, self.end, f(self.value))
    }
}

/// A position within a stream of bytes.
///
/// A `Location` holds the byte offset together with the line and column of
/// that byte, both counted from 1. A `\n` byte ends a line; columns count
/// bytes, not characters.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Location {
    offset: usize,
    line: usize,
    column: usize,
}

impl Location {
    /// Create a new `Location` for a byte offset on the first line.
    pub fn new(offset: usize) -> Location {
        Location::with_line_column(offset, 1, offset + 1)
    }

    /// Create a new `Location` for a byte offset at a given line and column.
    pub fn with_line_column(offset: usize, line: usize, column: usize) -> Location {
        Location {
            offset,
            line,
            column,
        }
    }

    /// The byte offset of the `Location`.
    pub fn offset(self) -> usize {
        self.offset
    }

    /// The line of the `Location`, starting at 1.
    pub fn line(self) -> usize {
        self.line
    }

    /// The column of the `Location` within its line, starting at 1.
    pub fn column(self) -> usize {
        self.column
    }

    /// Move the `Location` past `byte`.
    pub fn advance(&mut self, byte: u8) {
        self.offset += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// The `Location` just past `bytes` when they start at this `Location`.
    pub fn advanced_by(mut self, bytes: &[u8]) -> Location {
        for &byte in bytes {
            self.advance(byte);
        }
        self
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::new(0)
    }
}

impl From<usize> for Location {
    fn from(value: usize) -> Self {
        Self::new(value)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
