// Copyright 2018 Steven Bosnick
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE-2.0 or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms

// The utilities in this module are used to support tests in more than
// one other module.

use proptest::prelude::*;

use crate::automaton::{NodeId, PatternId};
use crate::closure::EpsilonClosures;
use crate::nfa::Nfa;
use crate::regex::Regex;

pub fn arb_regex() -> impl Strategy<Value = Regex> {
    let leaf = prop_oneof![
        prop::sample::select(vec![b'a', b'b', b'c']).prop_map(Regex::Literal),
        Just(Regex::AnyByte),
        Just(Regex::empty()),
    ];

    leaf.prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(Regex::Sequence),
            prop::collection::vec(inner.clone(), 1..4).prop_map(Regex::Alternation),
            inner.prop_map(Regex::one_or_more),
        ]
    })
}

pub fn arb_input() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(vec![b'a', b'b', b'c', b'x']), 0..6)
}

// Simulates the nfa directly on the whole of input, giving the lowest
// pattern that accepts it.
pub fn nfa_matches(nfa: &Nfa, closures: &EpsilonClosures, input: &[u8]) -> Option<PatternId> {
    let mut current = closures.closure(nfa.start()).clone();

    for &byte in input {
        let targets: Vec<NodeId> = current
            .iter()
            .filter_map(|&node| nfa.node(node).targets(byte))
            .flat_map(|targets| targets.iter().cloned())
            .collect();
        current = closures.closure_of_set(targets);
    }

    current.iter().filter_map(|&node| nfa.accepting(node)).min()
}
