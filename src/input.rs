// Copyright 2018 Steven Bosnick
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE-2.0 or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms

//! Defines adapters that turn in-memory text into lexer input.
//!
//! The `Lexer` reads a falible iterator of bytes. Any `std::io::Read` already
//! provides one through `Read::bytes()`; the `ByteInput` extension trait
//! provides one, that never fails, for `str` and `[u8]`.

use std::{fmt, slice};

/// A failure that cannot occur.
///
/// This type is used as the error type in a `Result<T,E>` when no errors
/// are possible.
#[derive(Fail, Debug)]
pub enum Never {}

impl fmt::Display for Never {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "The impossible has occured. Never has occured as a failure."
        )
    }
}

/// An iterator over the bytes of an in-memory input that never fails.
pub struct Bytes<'a> {
    inner: slice::Iter<'a, u8>,
}

impl<'a> Bytes<'a> {
    /// Create a new `Bytes` iterator for the given slice.
    pub fn new(input: &'a [u8]) -> Self {
        Bytes {
            inner: input.iter(),
        }
    }
}

impl<'a> Iterator for Bytes<'a> {
    type Item = Result<u8, Never>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|&byte| Ok(byte))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Extention trait for in-memory text to provide the `input_bytes` method.
pub trait ByteInput {
    /// Iterate over the bytes of the text as lexer input.
    fn input_bytes(&self) -> Bytes;
}

impl ByteInput for str {
    fn input_bytes(&self) -> Bytes {
        Bytes::new(self.as_bytes())
    }
}

impl ByteInput for [u8] {
    fn input_bytes(&self) -> Bytes {
        Bytes::new(self)
    }
}
