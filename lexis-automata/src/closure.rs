// Copyright 2018 Steven Bosnick
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE-2.0 or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms

//! Epsilon closures of the nodes of an `Nfa`.

use std::collections::BTreeSet;
use std::iter::FromIterator;
use std::slice;

use itertools::Itertools;

use crate::automaton::NodeId;
use crate::nfa::Nfa;

/// A canonical set of `Nfa` nodes.
///
/// The nodes are kept sorted and free of duplicates, so two `StateKey`'s are
/// equal exactly when they hold the same set of nodes, no matter the order in
/// which the nodes were collected. A `StateKey` identifies a `Dfa` state.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateKey(Vec<NodeId>);

impl StateKey {
    /// The nodes of the key in ascending order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.0
    }

    /// Iterate over the nodes of the key in ascending order.
    pub fn iter(&self) -> slice::Iter<NodeId> {
        self.0.iter()
    }

    /// The number of nodes in the key.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the key has no nodes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if `node` is a member of the key.
    pub fn contains(&self, node: NodeId) -> bool {
        self.0.binary_search(&node).is_ok()
    }
}

impl FromIterator<NodeId> for StateKey {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        StateKey(iter.into_iter().sorted().dedup().collect())
    }
}

impl<'a> IntoIterator for &'a StateKey {
    type Item = &'a NodeId;
    type IntoIter = slice::Iter<'a, NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The epsilon closure of every node of an `Nfa`.
///
/// The closure of a node is the set of nodes reachable from it by following
/// zero or more epsilon edges, so it always includes the node itself.
#[derive(Debug, Clone)]
pub struct EpsilonClosures {
    closures: Vec<StateKey>,
    passes: usize,
}

impl EpsilonClosures {
    /// Compute the epsilon closures for `nfa`.
    ///
    /// Every closure starts as the node itself. Each pass then unions into a
    /// node's closure the closures of its direct epsilon successors, until a
    /// full pass changes nothing.
    pub fn new(nfa: &Nfa) -> EpsilonClosures {
        let count = nfa.node_count();
        let mut sets: Vec<BTreeSet<NodeId>> = (0..count)
            .map(|index| Some(NodeId::new(index)).into_iter().collect())
            .collect();

        let mut passes = 0;
        let mut changed = true;
        while changed {
            changed = false;
            passes += 1;

            for index in 0..count {
                let mut additions = BTreeSet::new();
                for successor in nfa.node(NodeId::new(index)).epsilons() {
                    additions.extend(
                        sets[successor.index()]
                            .iter()
                            .filter(|n| !sets[index].contains(*n))
                            .cloned(),
                    );
                }

                if !additions.is_empty() {
                    sets[index].extend(additions);
                    changed = true;
                }
            }
        }

        debug!(
            "epsilon closures of {} nodes converged after {} passes",
            count, passes
        );

        EpsilonClosures {
            closures: sets.into_iter().map(|set| StateKey(set.into_iter().collect())).collect(),
            passes,
        }
    }

    /// The epsilon closure of `node`.
    ///
    /// # Panics
    /// Panics if `node` is not a node of the `Nfa` the closures were computed for.
    pub fn closure(&self, node: NodeId) -> &StateKey {
        &self.closures[node.index()]
    }

    /// The union of the epsilon closures of every node in `nodes`.
    pub fn closure_of_set<I>(&self, nodes: I) -> StateKey
    where
        I: IntoIterator<Item = NodeId>,
    {
        nodes
            .into_iter()
            .flat_map(|node| self.closure(node).iter().cloned())
            .collect()
    }

    /// The number of passes the fixed-point iteration took to converge.
    pub fn passes(&self) -> usize {
        self.passes
    }
}
