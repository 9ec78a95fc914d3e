// Copyright 2018 Steven Bosnick
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE-2.0 or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms

//! A library for lexing byte streams with a compiled set of patterns.
//!
//! The patterns are compiled into a `Dfa` by the [lexis-automata] crate
//! (re-exported here as `automata`). The `Lex` trait, implemented for `Dfa`,
//! turns a falible iterator over bytes into a falible iterator over `Span`'s
//! of a token type. Each token is the longest prefix of the remaining input
//! that some pattern matches; when several patterns match that prefix the one
//! declared first wins.
//!
//! ```
//! use lexis::{compile, ByteInput, Lex, PatternId, Span};
//!
//! let dfa = compile(vec![("ab", "ab"), ("acc", "acc*")]).unwrap();
//!
//! let tokens: Result<Vec<Span<PatternId>>, _> = dfa.lex("abaccc".input_bytes()).collect();
//!
//! assert_eq!(
//!     tokens.unwrap(),
//!     vec![
//!         Span::new(0.into(), 2.into(), PatternId::new(0)),
//!         Span::new(2.into(), 6.into(), PatternId::new(1)),
//!     ]
//! );
//! ```
//!
//! [lexis-automata]: https://crates.io/crates/lexis-automata

#![deny(missing_docs)]

#[macro_use]
extern crate failure;
pub extern crate lexis_automata as automata;
#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

#[cfg(test)]
#[macro_use]
extern crate quickcheck;

mod error;
pub mod input;
pub mod lexer;
mod span;

pub use crate::automata::{compile, CompileError, Compiler, Dfa, PatternId};
pub use crate::error::{LexError, Result};
pub use crate::input::{ByteInput, Never};
pub use crate::lexer::{Lex, Lexer, Match, Token};
pub use crate::span::{Location, Span};
