// Copyright 2018 Steven Bosnick
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE-2.0 or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms

//! Identifiers and the read-only graph view shared by `Nfa` and `Dfa`.

use std::fmt::{self, Display};
use std::ops;

/// Identifies a node within a single automaton.
///
/// `NodeId`'s are allocated densely, starting at 0, by the automaton that owns
/// the node. The start node of both the `Nfa` and the `Dfa` is always the first
/// node allocated. A `NodeId` from one automaton has no meaning in another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> NodeId {
        NodeId(index)
    }

    /// The position of the node in the node store of its automaton.
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Identifies a pattern by its (zero-based) position in declaration order.
///
/// The ordering of `PatternId`'s is the declaration order, so the "lowest"
/// `PatternId` is the pattern that was declared first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatternId(usize);

impl PatternId {
    /// Create the `PatternId` for the pattern declared at `index`.
    pub fn new(index: usize) -> PatternId {
        PatternId(index)
    }

    /// The declaration index of the pattern.
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The label on an edge of an automaton.
///
/// The derived ordering puts every byte label before the epsilon label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    /// The edge consumes this byte.
    Byte(u8),

    /// The edge consumes no input.
    Epsilon,
}

/// A read-only view of the graph of an automaton.
///
/// Both `Nfa` and `Dfa` implement `Automaton`. It is the interface through
/// which an automaton is rendered for inspection.
pub trait Automaton {
    /// The start node.
    fn start(&self) -> NodeId;

    /// The number of nodes in the automaton.
    fn node_count(&self) -> usize;

    /// The outgoing edges of `node`.
    fn edges<'a>(&'a self, node: NodeId) -> Box<dyn Iterator<Item = (Label, NodeId)> + 'a>;

    /// The pattern accepted at `node`, if any.
    fn accepting(&self, node: NodeId) -> Option<PatternId>;

    /// Iterate over the id of every node in the automaton in allocation order.
    fn nodes(&self) -> NodeIds {
        NodeIds {
            inner: 0..self.node_count(),
        }
    }
}

/// An iterator over the `NodeId`'s of an automaton.
///
/// This is the return type of the `Automaton::nodes()` method.
pub struct NodeIds {
    inner: ops::Range<usize>,
}

impl Iterator for NodeIds {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(NodeId)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
