// Copyright 2018 Steven Bosnick
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE-2.0 or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms

//! Rendering of automata as Graphviz digraphs.

use std::collections::BTreeMap;
use std::io::{self, Write};

use itertools::Itertools;

use crate::automaton::{Automaton, Label, NodeId};

/// Write `graph` to `w` in the Graphviz DOT language.
///
/// The start node is filled green and accepting nodes are drawn as red double
/// circles labelled with the pattern they accept. There is one edge line for
/// each pair of nodes that has at least one edge between them; runs of
/// consecutive bytes on those edges are collapsed into ranges such as `a-z`
/// and epsilon edges are labelled `ε`.
pub fn write_dot<A, W>(graph: &A, w: &mut W) -> io::Result<()>
where
    A: Automaton + ?Sized,
    W: Write,
{
    writeln!(w, "digraph {{")?;

    for node in graph.nodes() {
        let mut attrs = vec![];
        match graph.accepting(node) {
            Some(pattern) => {
                attrs.push(format!("label=\"{}\\n{}\"", node, pattern));
                attrs.push("shape=doublecircle".to_string());
                attrs.push("color=red".to_string());
            }
            None => attrs.push(format!("label=\"{}\"", node)),
        }
        if node == graph.start() {
            attrs.push("style=filled".to_string());
            attrs.push("fillcolor=green".to_string());
        }

        writeln!(w, "    {} [{}];", node, attrs.join(", "))?;
    }

    for node in graph.nodes() {
        let mut targets: BTreeMap<NodeId, Vec<Label>> = BTreeMap::new();
        for (label, target) in graph.edges(node) {
            targets.entry(target).or_insert_with(Vec::new).push(label);
        }

        for (target, labels) in targets {
            writeln!(w, "    {} -> {} [label=\"{}\"];", node, target, edge_label(labels))?;
        }
    }

    writeln!(w, "}}")
}

fn edge_label(mut labels: Vec<Label>) -> String {
    labels.sort();
    labels.dedup();

    let mut runs: Vec<(u8, u8)> = Vec::new();
    let mut epsilon = false;
    for label in labels {
        let byte = match label {
            Label::Byte(byte) => byte,
            Label::Epsilon => {
                epsilon = true;
                continue;
            }
        };

        if let Some(run) = runs.last_mut() {
            if u16::from(run.1) + 1 == u16::from(byte) {
                run.1 = byte;
                continue;
            }
        }
        runs.push((byte, byte));
    }

    runs.into_iter()
        .map(|(low, high)| {
            if low == high {
                escape(low)
            } else {
                format!("{}-{}", escape(low), escape(high))
            }
        })
        .chain(if epsilon { Some("ε".to_string()) } else { None })
        .join(", ")
}

fn escape(byte: u8) -> String {
    match byte {
        b'"' => "\\\"".to_string(),
        b'\\' => "\\\\".to_string(),
        b' '..=b'~' => (byte as char).to_string(),
        _ => format!("0x{:02x}", byte),
    }
}
