// Copyright 2018 Steven Bosnick
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE-2.0 or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms

//! Nondeterministic finite automata built by Thompson construction.
//!
//! An `Nfa` is built from a set of patterns at once. All of the patterns share
//! a single start node, and each pattern has its own accepting node. The
//! nodes live in a flat store indexed by `NodeId`; every edge is a `NodeId`
//! into that store, so the cycles introduced by repetition need no shared
//! ownership.

use std::collections::{BTreeMap, BTreeSet};

use crate::automaton::{Automaton, Label, NodeId, PatternId};
use crate::regex::Regex;

/// A node of an `Nfa`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NfaNode {
    transitions: BTreeMap<u8, BTreeSet<NodeId>>,
    epsilons: BTreeSet<NodeId>,
}

impl NfaNode {
    /// The literal transitions out of this node, in ascending byte order.
    pub fn transitions(&self) -> &BTreeMap<u8, BTreeSet<NodeId>> {
        &self.transitions
    }

    /// The destinations of the literal transitions for `byte`.
    pub fn targets(&self, byte: u8) -> Option<&BTreeSet<NodeId>> {
        self.transitions.get(&byte)
    }

    /// The destinations of the epsilon edges out of this node.
    pub fn epsilons(&self) -> &BTreeSet<NodeId> {
        &self.epsilons
    }
}

/// A nondeterministic finite automaton over bytes for a set of patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    nodes: Vec<NfaNode>,
    start: NodeId,
    accepting: BTreeMap<NodeId, PatternId>,
    pattern_count: usize,
}

impl Nfa {
    /// Build the `Nfa` for the patterns in `regexes`.
    ///
    /// The patterns are emitted in iteration order, which determines the
    /// allocation order of the `NodeId`'s. The start node is always the first
    /// node allocated.
    pub fn from_regexes<'a, I>(regexes: I) -> Nfa
    where
        I: IntoIterator<Item = (PatternId, &'a Regex)>,
    {
        let mut nfa = Nfa {
            nodes: Vec::new(),
            start: NodeId::new(0),
            accepting: BTreeMap::new(),
            pattern_count: 0,
        };
        nfa.start = nfa.new_node();

        for (pattern, regex) in regexes {
            let accept = nfa.new_node();
            nfa.accepting.insert(accept, pattern);
            nfa.pattern_count += 1;

            let start = nfa.start;
            nfa.emit(regex, start, accept);
        }

        nfa
    }

    /// Build the `Nfa` for a single pattern, which is given `PatternId` 0.
    pub fn from_regex(regex: &Regex) -> Nfa {
        Nfa::from_regexes(Some((PatternId::new(0), regex)))
    }

    /// The start node shared by every pattern.
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// The number of nodes in the `Nfa`.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The node for `id`.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this `Nfa`.
    pub fn node(&self, id: NodeId) -> &NfaNode {
        &self.nodes[id.index()]
    }

    /// The pattern accepted at `id`, if any.
    pub fn accepting(&self, id: NodeId) -> Option<PatternId> {
        self.accepting.get(&id).cloned()
    }

    /// Iterate over the accepting nodes in `NodeId` order, paired with the
    /// pattern that each one accepts.
    pub fn accepting_nodes<'a>(&'a self) -> impl Iterator<Item = (NodeId, PatternId)> + 'a {
        self.accepting.iter().map(|(&node, &pattern)| (node, pattern))
    }

    /// The number of patterns in the `Nfa`.
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Find every edge whose destination is not a node of this `Nfa`.
    ///
    /// Each entry is the source node and the dangling destination. A
    /// well-formed `Nfa` gives an empty result.
    pub fn dangling_edges(&self) -> Vec<(NodeId, NodeId)> {
        let count = self.nodes.len();

        self.nodes()
            .flat_map(|id| self.edges(id).map(move |(_, target)| (id, target)))
            .filter(|&(_, target)| target.index() >= count)
            .collect()
    }

    fn new_node(&mut self) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(NfaNode::default());
        id
    }

    fn add_transition(&mut self, from: NodeId, byte: u8, to: NodeId) {
        self.nodes[from.index()]
            .transitions
            .entry(byte)
            .or_insert_with(BTreeSet::new)
            .insert(to);
    }

    fn add_epsilon(&mut self, from: NodeId, to: NodeId) {
        self.nodes[from.index()].epsilons.insert(to);
    }

    fn emit(&mut self, regex: &Regex, from: NodeId, to: NodeId) {
        use crate::regex::Regex::*;

        match regex {
            Literal(byte) => self.add_transition(from, *byte, to),
            AnyByte => {
                for byte in 0..=u8::MAX {
                    self.add_transition(from, byte, to);
                }
            }
            Sequence(items) => match items.split_last() {
                None => self.add_epsilon(from, to),
                Some((last, init)) => {
                    let mut current = from;
                    for item in init {
                        let next = self.new_node();
                        self.emit(item, current, next);
                        current = next;
                    }
                    self.emit(last, current, to);
                }
            },
            Alternation(items) => {
                for item in items {
                    self.emit(item, from, to);
                }
            }
            Repetition(inner) => {
                let enter = self.new_node();
                let exit = self.new_node();
                self.add_epsilon(from, enter);
                self.add_epsilon(exit, to);
                self.add_epsilon(exit, enter);
                self.emit(inner, enter, exit);
            }
        }
    }
}

impl Automaton for Nfa {
    fn start(&self) -> NodeId {
        self.start
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edges<'a>(&'a self, node: NodeId) -> Box<dyn Iterator<Item = (Label, NodeId)> + 'a> {
        let node = &self.nodes[node.index()];
        let literals = node
            .transitions
            .iter()
            .flat_map(|(&byte, targets)| targets.iter().map(move |&t| (Label::Byte(byte), t)));
        let epsilons = node.epsilons.iter().map(|&t| (Label::Epsilon, t));

        Box::new(literals.chain(epsilons))
    }

    fn accepting(&self, node: NodeId) -> Option<PatternId> {
        Nfa::accepting(self, node)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::parse;
    use crate::testutils::arb_regex;
    use proptest::prelude::*;

    fn nfa_for(patterns: &[&str]) -> Nfa {
        let regexes: Vec<_> = patterns
            .iter()
            .map(|p| parse(p).expect("Unexpected parse error"))
            .collect();

        Nfa::from_regexes(
            regexes
                .iter()
                .enumerate()
                .map(|(i, r)| (PatternId::new(i), r)),
        )
    }

    #[test]
    fn nfa_literal_gives_single_transition() {
        let sut = Nfa::from_regex(&Regex::Literal(b'a'));

        assert_eq!(sut.node_count(), 2);
        assert_eq!(sut.start(), NodeId::new(0));
        assert_eq!(
            sut.node(sut.start()).targets(b'a'),
            Some(&vec![NodeId::new(1)].into_iter().collect())
        );
        assert_eq!(sut.accepting(NodeId::new(1)), Some(PatternId::new(0)));
    }

    #[test]
    fn nfa_any_byte_covers_full_alphabet() {
        let sut = Nfa::from_regex(&Regex::AnyByte);

        let transitions = sut.node(sut.start()).transitions();

        assert_eq!(transitions.len(), 256);
        assert!(transitions.contains_key(&0));
        assert!(transitions.contains_key(&255));
    }

    #[test]
    fn nfa_empty_sequence_gives_epsilon_edge() {
        let sut = Nfa::from_regex(&Regex::empty());

        assert_eq!(sut.node_count(), 2);
        assert!(sut.node(sut.start()).epsilons().contains(&NodeId::new(1)));
    }

    #[test]
    fn nfa_sequence_allocates_intermediate_nodes() {
        let sut = Nfa::from_regex(&Regex::literal("abc"));

        // start, accept, and two intermediate nodes
        assert_eq!(sut.node_count(), 4);
    }

    #[test]
    fn nfa_repetition_has_back_edge() {
        let sut = Nfa::from_regex(&Regex::one_or_more(Regex::Literal(b'a')));

        // n0 start, n1 accept, n2 enter, n3 exit
        assert_eq!(sut.node_count(), 4);
        assert!(sut.node(NodeId::new(0)).epsilons().contains(&NodeId::new(2)));
        assert!(sut.node(NodeId::new(3)).epsilons().contains(&NodeId::new(1)));
        assert!(sut.node(NodeId::new(3)).epsilons().contains(&NodeId::new(2)));
        assert!(sut.node(NodeId::new(2)).targets(b'a').is_some());
    }

    #[test]
    fn nfa_patterns_share_start_and_have_own_accepting_node() {
        let sut = nfa_for(&["ab", "cd"]);

        let accepting: Vec<_> = sut.accepting_nodes().map(|(_, p)| p).collect();

        assert_eq!(accepting, vec![PatternId::new(0), PatternId::new(1)]);
        assert_eq!(sut.pattern_count(), 2);
        assert!(sut.node(sut.start()).targets(b'a').is_some());
        assert!(sut.node(sut.start()).targets(b'c').is_some());
    }

    #[test]
    fn nfa_has_no_dangling_edges() {
        let sut = nfa_for(&["(a|b)*c", "x?y+", ".[abc]", ""]);

        assert_eq!(sut.dangling_edges(), Vec::new());
    }

    #[test]
    fn nfa_edges_list_epsilons_after_bytes() {
        let sut = Nfa::from_regex(&Regex::optional(Regex::Literal(b'a')));

        let edges: Vec<_> = sut.edges(sut.start()).collect();

        assert_eq!(
            edges,
            vec![
                (Label::Byte(b'a'), NodeId::new(1)),
                (Label::Epsilon, NodeId::new(1)),
            ]
        );
    }

    #[test]
    fn nfa_from_no_patterns_has_only_start() {
        let sut = Nfa::from_regexes(Vec::<(PatternId, &Regex)>::new());

        assert_eq!(sut.node_count(), 1);
        assert_eq!(sut.pattern_count(), 0);
    }

    proptest! {
        #[test]
        fn prop_nfa_has_no_dangling_edges(regexes in prop::collection::vec(arb_regex(), 0..4)) {
            let sut = Nfa::from_regexes(
                regexes
                    .iter()
                    .enumerate()
                    .map(|(i, r)| (PatternId::new(i), r)),
            );

            prop_assert!(sut.dangling_edges().is_empty());
            prop_assert_eq!(sut.accepting_nodes().count(), regexes.len());
        }
    }
}
