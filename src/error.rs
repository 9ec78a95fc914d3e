// Copyright 2018 Steven Bosnick
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE-2.0 or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms

use crate::span::Location;
use failure::Fail;
use std::result;

/// The error type for the `Lexer` iterator.
#[derive(Debug, Fail)]
pub enum LexError<F: Fail> {
    /// The lexer encountered an invalid byte in the input. This error occurs
    /// when the invalid byte would be the first byte of a new token.
    #[fail(display = "The lexer encountered an invalid byte {:#04x} at {}.", _0, _1)]
    InvalidByte(u8, Location),

    /// The lexer encountered an invalid token in the input. This error occurs
    /// when the lexer has consumed some valid bytes but cannot make further
    /// progress and the consumed bytes do not form a valid token.
    #[fail(display = "The lexer encountered an invalid token {:?} at {}.", _0, _1)]
    InvalidToken(String, Location),

    /// The lexer encountered an error in the input stream.
    #[fail(display = "The lexer encountered an input error.")]
    Input(#[cause] F),
}

impl<F: Fail> LexError<F> {
    /// The `Location` in the input at which the error was detected, if known.
    pub fn location(&self) -> Option<Location> {
        match self {
            LexError::InvalidByte(_, location) | LexError::InvalidToken(_, location) => {
                Some(*location)
            }
            LexError::Input(_) => None,
        }
    }
}

impl<F: Fail> From<F> for LexError<F> {
    fn from(f: F) -> LexError<F> {
        LexError::Input(f)
    }
}

/// A specialized Result type for lexer operations.
pub type Result<T, F> = result::Result<T, LexError<F>>;
