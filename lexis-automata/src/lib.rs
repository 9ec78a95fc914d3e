// Copyright 2018 Steven Bosnick
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE-2.0 or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms

//! A library for compiling a set of regular expressions into a single
//! deterministic finite automaton suitable for driving a longest-match lexer.
//!
//! The compilation runs in four stages, each of which is public so that it can
//! be used on its own:
//!
//! 1. `parse` turns each pattern into a `Regex` syntax tree.
//! 2. `Nfa::from_regexes` builds a single nondeterministic automaton for all
//!    of the patterns using Thompson's construction.
//! 3. `EpsilonClosures::new` computes the epsilon closure of every `Nfa` node.
//! 4. `Dfa::from_nfa` runs the powerset construction.
//!
//! The `Compiler` builder (or the `compile` function) runs all four stages for
//! a list of named patterns. When more than one pattern accepts at a `Dfa`
//! state the pattern that was declared first wins.
//!
//! ```
//! use lexis_automata::{compile, PatternId};
//!
//! let dfa = compile(vec![("if", "if"), ("ident", "[fi]+")]).unwrap();
//!
//! assert_eq!(dfa.longest_match("if"), Some((2, PatternId::new(0))));
//! assert_eq!(dfa.longest_match("iff"), Some((3, PatternId::new(1))));
//! ```

#![deny(missing_docs)]

#[macro_use]
extern crate failure;
extern crate itertools;
#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate proptest;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

pub mod parser;
pub mod regex;

mod automaton;
mod closure;
mod compile;
mod dfa;
#[cfg(feature = "dot")]
pub mod dot;
mod nfa;

#[cfg(test)]
mod testutils;

pub use crate::automaton::{Automaton, Label, NodeId, NodeIds, PatternId};
pub use crate::closure::{EpsilonClosures, StateKey};
pub use crate::compile::{compile, CompileError, Compiler};
pub use crate::dfa::{Dfa, DfaNode};
pub use crate::nfa::{Nfa, NfaNode};
pub use crate::parser::parse;
pub use crate::regex::Regex;
