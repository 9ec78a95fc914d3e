// Copyright 2018 Steven Bosnick
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE-2.0 or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms

use std::fmt::{self, Display};

use failure::Fail;

use crate::automaton::PatternId;
use crate::closure::EpsilonClosures;
use crate::dfa::Dfa;
use crate::nfa::Nfa;
use crate::parser::{self, ErrorKind};

/// The builder for compiling a set of named patterns into a `Dfa`.
///
/// Patterns are numbered in the order they are added, starting at 0. When
/// two patterns match the same input the one added first is preferred.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    patterns: Vec<(String, Vec<u8>)>,
}

impl Compiler {
    /// Create a new `Compiler` with no patterns.
    pub fn new() -> Compiler {
        Compiler {
            patterns: Vec::new(),
        }
    }

    /// Add the pattern `source` under the name `name`.
    pub fn pattern<N, P>(mut self, name: N, source: P) -> Compiler
    where
        N: Into<String>,
        P: AsRef<[u8]>,
    {
        self.patterns.push((name.into(), source.as_ref().to_vec()));
        self
    }

    /// Add each of the `(name, source)` pairs in `patterns` in turn.
    pub fn patterns<I, N, P>(self, patterns: I) -> Compiler
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: AsRef<[u8]>,
    {
        patterns
            .into_iter()
            .fold(self, |compiler, (name, source)| compiler.pattern(name, source))
    }

    /// The number of patterns added so far.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if no patterns have been added.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Compile the patterns into a `Dfa`.
    ///
    /// # Errors
    /// Fails with a `CompileError` for the first pattern that does not parse.
    /// No `Dfa` is produced unless every pattern parses.
    pub fn build(&self) -> Result<Dfa, CompileError> {
        let regexes = self
            .patterns
            .iter()
            .enumerate()
            .map(|(index, (name, source))| {
                parser::parse(source).map_err(|cause| CompileError {
                    index,
                    name: name.clone(),
                    pattern: String::from_utf8_lossy(source).into_owned(),
                    cause,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let nfa = Nfa::from_regexes(
            regexes
                .iter()
                .enumerate()
                .map(|(index, regex)| (PatternId::new(index), regex)),
        );
        debug!(
            "built nfa with {} nodes for {} patterns",
            nfa.node_count(),
            nfa.pattern_count()
        );

        let closures = EpsilonClosures::new(&nfa);
        let mut dfa = Dfa::from_nfa(&nfa, &closures);
        dfa.set_pattern_names(self.patterns.iter().map(|(name, _)| name.clone()).collect());
        debug!("built dfa with {} states", dfa.state_count());

        Ok(dfa)
    }
}

/// Compile the `(name, source)` pairs in `patterns` into a `Dfa`.
///
/// This is shorthand for `Compiler::new().patterns(patterns).build()`.
pub fn compile<I, N, P>(patterns: I) -> Result<Dfa, CompileError>
where
    I: IntoIterator<Item = (N, P)>,
    N: Into<String>,
    P: AsRef<[u8]>,
{
    Compiler::new().patterns(patterns).build()
}

/// The error type for compiling a set of patterns.
///
/// It identifies the pattern that failed to parse. The underlying parser
/// error is available as its `cause()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    index: usize,
    name: String,
    pattern: String,
    cause: parser::Error,
}

impl CompileError {
    /// The position of the failing pattern in declaration order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The `PatternId` the failing pattern would have had.
    pub fn pattern_id(&self) -> PatternId {
        PatternId::new(self.index)
    }

    /// The name of the failing pattern.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The source text of the failing pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The kind of parse error.
    pub fn kind(&self) -> ErrorKind {
        self.cause.kind()
    }

    /// The byte offset of the error in the source of the failing pattern.
    pub fn offset(&self) -> usize {
        self.cause.offset()
    }
}

impl Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Invalid pattern {} (\"{}\", #{}): {}",
            self.name, self.pattern, self.index, self.cause
        )
    }
}

impl Fail for CompileError {
    fn cause(&self) -> Option<&dyn Fail> {
        Some(&self.cause)
    }
}
