// Copyright 2018 Steven Bosnick
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE-2.0 or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms

//! Deterministic finite automata built by powerset construction.
//!
//! Each state of a `Dfa` stands for the set of `Nfa` nodes (its `StateKey`)
//! that the `Nfa` could be in after reading the same input. States are
//! discovered breadth first from the epsilon closure of the `Nfa` start node,
//! and a newly computed set is looked up by its `StateKey` so that each
//! distinct set becomes exactly one state.
//!
//! A state accepts when its set holds the accepting node of at least one
//! pattern. When it holds the accepting nodes of several patterns the
//! earliest declared pattern wins; the others are kept as `candidates`.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use itertools::Itertools;

use crate::automaton::{Automaton, Label, NodeId, PatternId};
use crate::closure::{EpsilonClosures, StateKey};
use crate::nfa::Nfa;

/// A state of a `Dfa`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DfaNode {
    transitions: BTreeMap<u8, NodeId>,
}

impl DfaNode {
    /// The transitions out of this state, in ascending byte order.
    pub fn transitions(&self) -> &BTreeMap<u8, NodeId> {
        &self.transitions
    }
}

/// A deterministic finite automaton over bytes for a set of patterns.
///
/// There is at most one transition for each state and byte. A `Dfa` is
/// immutable once built and can be shared between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    nodes: Vec<DfaNode>,
    keys: Vec<StateKey>,
    candidates: Vec<Vec<PatternId>>,
    start: NodeId,
    names: Vec<String>,
    pattern_count: usize,
}

impl Dfa {
    /// Build the `Dfa` for `nfa` using the epsilon `closures` of its nodes.
    pub fn from_nfa(nfa: &Nfa, closures: &EpsilonClosures) -> Dfa {
        let mut builder = PowersetBuilder::new(nfa);
        let start = builder.intern(closures.closure(nfa.start()).clone());

        while let Some(current) = builder.worklist.pop_front() {
            for (byte, targets) in builder.moves(current) {
                let next = builder.intern(closures.closure_of_set(targets));
                builder.nodes[current.index()].transitions.insert(byte, next);
            }
        }

        builder.finish(start)
    }

    pub(crate) fn set_pattern_names(&mut self, names: Vec<String>) {
        self.names = names;
    }

    /// The start state.
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// The number of states in the `Dfa`.
    pub fn state_count(&self) -> usize {
        self.nodes.len()
    }

    /// The state for `state`.
    ///
    /// # Panics
    /// Panics if `state` is not a state of this `Dfa`.
    pub fn node(&self, state: NodeId) -> &DfaNode {
        &self.nodes[state.index()]
    }

    /// The state reached from `state` on `byte`, if there is one.
    pub fn next(&self, state: NodeId, byte: u8) -> Option<NodeId> {
        self.nodes[state.index()].transitions.get(&byte).cloned()
    }

    /// Iterate over the transitions out of `state` in ascending byte order.
    pub fn transitions<'a>(&'a self, state: NodeId) -> impl Iterator<Item = (u8, NodeId)> + 'a {
        self.nodes[state.index()]
            .transitions
            .iter()
            .map(|(&byte, &target)| (byte, target))
    }

    /// The pattern accepted at `state`, if any.
    ///
    /// This is the earliest declared of the `candidates` for `state`.
    pub fn accepting(&self, state: NodeId) -> Option<PatternId> {
        self.candidates[state.index()].first().cloned()
    }

    /// Every pattern whose accepting node is in the set for `state`, in
    /// ascending order.
    pub fn candidates(&self, state: NodeId) -> &[PatternId] {
        &self.candidates[state.index()]
    }

    /// The set of `Nfa` nodes that `state` stands for.
    pub fn key(&self, state: NodeId) -> &StateKey {
        &self.keys[state.index()]
    }

    /// The name of `pattern`, if the `Dfa` was built with pattern names.
    pub fn pattern_name(&self, pattern: PatternId) -> Option<&str> {
        self.names.get(pattern.index()).map(String::as_str)
    }

    /// The number of patterns the `Dfa` was built from.
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// The pattern that matches the whole of `input`, if any.
    pub fn matches<T: AsRef<[u8]>>(&self, input: T) -> Option<PatternId> {
        input
            .as_ref()
            .iter()
            .try_fold(self.start, |state, &byte| self.next(state, byte))
            .and_then(|state| self.accepting(state))
    }

    /// Check if some pattern matches the whole of `input`.
    pub fn accepts<T: AsRef<[u8]>>(&self, input: T) -> bool {
        self.matches(input).is_some()
    }

    /// Find the longest prefix of `input` that some pattern matches.
    ///
    /// The result is the length of the prefix and the pattern that the state
    /// reached after it accepts. Only non-empty prefixes are considered.
    pub fn longest_match<T: AsRef<[u8]>>(&self, input: T) -> Option<(usize, PatternId)> {
        let mut state = self.start;
        let mut last = None;

        for (index, &byte) in input.as_ref().iter().enumerate() {
            state = match self.next(state, byte) {
                Some(next) => next,
                None => break,
            };
            if let Some(pattern) = self.accepting(state) {
                last = Some((index + 1, pattern));
            }
        }

        last
    }
}

impl Automaton for Dfa {
    fn start(&self) -> NodeId {
        self.start
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edges<'a>(&'a self, node: NodeId) -> Box<dyn Iterator<Item = (Label, NodeId)> + 'a> {
        Box::new(
            self.transitions(node)
                .map(|(byte, target)| (Label::Byte(byte), target)),
        )
    }

    fn accepting(&self, node: NodeId) -> Option<PatternId> {
        Dfa::accepting(self, node)
    }
}

struct PowersetBuilder<'a> {
    nfa: &'a Nfa,
    nodes: Vec<DfaNode>,
    keys: Vec<StateKey>,
    index: HashMap<StateKey, NodeId>,
    worklist: VecDeque<NodeId>,
}

impl<'a> PowersetBuilder<'a> {
    fn new(nfa: &'a Nfa) -> PowersetBuilder<'a> {
        PowersetBuilder {
            nfa,
            nodes: Vec::new(),
            keys: Vec::new(),
            index: HashMap::new(),
            worklist: VecDeque::new(),
        }
    }

    // Find the state for key, allocating and queueing a new one if needed.
    fn intern(&mut self, key: StateKey) -> NodeId {
        if let Some(&id) = self.index.get(&key) {
            return id;
        }

        let id = NodeId::new(self.nodes.len());
        self.nodes.push(DfaNode::default());
        self.keys.push(key.clone());
        self.index.insert(key, id);
        self.worklist.push_back(id);
        id
    }

    // The nfa nodes reachable from the members of state on each byte,
    // before taking epsilon closures.
    fn moves(&self, state: NodeId) -> BTreeMap<u8, BTreeSet<NodeId>> {
        let mut moves: BTreeMap<u8, BTreeSet<NodeId>> = BTreeMap::new();

        for &member in &self.keys[state.index()] {
            for (&byte, targets) in self.nfa.node(member).transitions() {
                moves
                    .entry(byte)
                    .or_insert_with(BTreeSet::new)
                    .extend(targets.iter().cloned());
            }
        }

        moves
    }

    fn finish(self, start: NodeId) -> Dfa {
        let nfa = self.nfa;
        let candidates: Vec<Vec<PatternId>> = self
            .keys
            .iter()
            .map(|key| {
                key.iter()
                    .filter_map(|&node| nfa.accepting(node))
                    .sorted()
                    .dedup()
                    .collect()
            })
            .collect();

        for (index, patterns) in candidates.iter().enumerate() {
            if patterns.len() > 1 {
                debug!(
                    "state {} accepts patterns {}; resolved to {}",
                    NodeId::new(index),
                    patterns.iter().join(", "),
                    patterns[0]
                );
            }
        }

        Dfa {
            nodes: self.nodes,
            keys: self.keys,
            candidates,
            start,
            names: Vec::new(),
            pattern_count: nfa.pattern_count(),
        }
    }
}
